//! Single-pass extraction: the root object is walked once, dispatching on
//! each key as it streams by.
//!
//! Every member's value is consumed by exactly one accessor (after one
//! non-consuming type peek); nothing is ever re-queried. That makes this the
//! fast path compared with [`crate::lookup`], which re-walks the object once
//! per recognized key.

use jiter::Jiter;

use crate::{
    buffer::PaddedBytes,
    fields::{
        ExtractError, ManifestFields, PackageType, entry_points_value, object_error, string_value,
    },
};

/// The keys the scan recognizes; everything else is skipped unread.
#[derive(Clone, Copy)]
enum Field {
    Name,
    Main,
    Exports,
    Imports,
    Type,
    Other,
}

impl Field {
    fn from_key(key: &str) -> Self {
        match key {
            "name" => Self::Name,
            "main" => Self::Main,
            "exports" => Self::Exports,
            "imports" => Self::Imports,
            "type" => Self::Type,
            _ => Self::Other,
        }
    }
}

/// Extract the resolver fields in one pass over the root object.
///
/// Members appear in source order; later duplicates of a recognized key
/// overwrite earlier ones. Wrong-typed fields — `type` included — read as
/// absent.
///
/// # Errors
///
/// [`ExtractError::RootNotObject`] when the document's root is not an
/// object; [`ExtractError::Malformed`] when the document fails to parse at
/// the root or the parser reports an error while fetching any member's key
/// or value.
///
/// ```
/// use pkgscan::{PaddedBytes, extract_by_scan};
///
/// let doc = PaddedBytes::from(r#"{"exports":"./index.js","unrelated":[1,2]}"#);
/// let fields = extract_by_scan(&doc)?;
/// assert_eq!(fields.exports.as_path(), "./index.js");
/// assert!(!fields.exports.is_object());
/// # Ok::<(), pkgscan::ExtractError>(())
/// ```
pub fn extract_by_scan(buffer: &PaddedBytes) -> Result<ManifestFields, ExtractError> {
    let document = buffer.document();
    let mut jiter = Jiter::new(document);
    let mut fields = ManifestFields::default();

    let mut field = match jiter.next_object() {
        Ok(key) => key.map(Field::from_key),
        Err(err) => return Err(object_error(err)),
    };

    while let Some(current) = field {
        match current {
            Field::Name => {
                if let Some(value) = string_value(&mut jiter)? {
                    fields.name = value;
                    fields.has_recognized_fields = true;
                }
            }
            Field::Main => {
                if let Some(value) = string_value(&mut jiter)? {
                    fields.main = value;
                    fields.has_recognized_fields = true;
                }
            }
            Field::Exports => {
                let entry = entry_points_value(&mut jiter, document)?;
                if !entry.is_absent() {
                    fields.has_recognized_fields = true;
                }
                fields.exports = entry;
            }
            Field::Imports => {
                let entry = entry_points_value(&mut jiter, document)?;
                if !entry.is_absent() {
                    fields.has_recognized_fields = true;
                }
                fields.imports = entry;
            }
            Field::Type => {
                if let Some(keyword) = string_value(&mut jiter)? {
                    fields.package_type = PackageType::from_keyword(&keyword);
                    fields.has_recognized_fields = true;
                }
            }
            Field::Other => jiter.next_skip()?,
        }
        field = jiter.next_key()?.map(Field::from_key);
    }

    Ok(fields)
}
