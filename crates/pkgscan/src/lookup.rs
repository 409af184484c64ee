//! Indexed extraction: each recognized key is located with its own pass
//! over the root object.
//!
//! This is the straightforward strategy — five independent keyed lookups —
//! and the baseline the single-pass scan in [`crate::scan`] is measured
//! against. Lookups are lenient: a missing key, a wrong-typed value, or even
//! corruption encountered while hunting for `name`, `main`, `exports`, or
//! `imports` all read as "field not present". The `type` lookup alone
//! distinguishes absence from other failures and poisons the whole document
//! on the latter.

use jiter::{Jiter, JiterError};

use crate::{
    buffer::PaddedBytes,
    fields::{
        EntryPoints, ExtractError, ManifestFields, PackageType, entry_points_value, object_error,
    },
};

/// Extract the resolver fields by querying each recognized key
/// independently.
///
/// # Errors
///
/// [`ExtractError::RootNotObject`] when the document's root is not an
/// object; [`ExtractError::Malformed`] when the document fails to parse at
/// the root, or when the `type` lookup fails with anything other than plain
/// absence.
///
/// ```
/// use pkgscan::{PaddedBytes, extract_by_lookup};
///
/// let doc = PaddedBytes::from(r#"{"main":"./cli.js","type":"commonjs"}"#);
/// let fields = extract_by_lookup(&doc)?;
/// assert_eq!(fields.main, "./cli.js");
/// assert_eq!(fields.package_type.as_str(), "commonjs");
/// # Ok::<(), pkgscan::ExtractError>(())
/// ```
pub fn extract_by_lookup(buffer: &PaddedBytes) -> Result<ManifestFields, ExtractError> {
    let document = buffer.document();

    // The root must be an object before any field is consulted.
    {
        let mut jiter = Jiter::new(document);
        jiter.next_object().map_err(object_error)?;
    }

    let mut fields = ManifestFields::default();

    if let Some(name) = lookup_string(document, "name") {
        fields.name = name;
        fields.has_recognized_fields = true;
    }
    if let Some(main) = lookup_string(document, "main") {
        fields.main = main;
        fields.has_recognized_fields = true;
    }

    fields.exports = lookup_entry_points(document, "exports");
    if !fields.exports.is_absent() {
        fields.has_recognized_fields = true;
    }
    fields.imports = lookup_entry_points(document, "imports");
    if !fields.imports.is_absent() {
        fields.has_recognized_fields = true;
    }

    // `type` is stricter than the other lookups: any failure that is not
    // plain absence aborts the extraction.
    match seek_field(document, "type") {
        Ok(None) => {}
        Ok(Some(mut value)) => {
            let keyword = value.next_str()?;
            fields.package_type = PackageType::from_keyword(keyword);
            fields.has_recognized_fields = true;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(fields)
}

/// Walk the root object until `key` is found, leaving the parser positioned
/// at its value. `Ok(None)` means the object was exhausted without a match.
fn seek_field<'j>(document: &'j [u8], key: &str) -> Result<Option<Jiter<'j>>, JiterError> {
    let mut jiter = Jiter::new(document);
    let mut matched = jiter.next_object()?.map(|k| k == key);
    loop {
        match matched {
            None => return Ok(None),
            Some(true) => return Ok(Some(jiter)),
            Some(false) => jiter.next_skip()?,
        }
        matched = jiter.next_key()?.map(|k| k == key);
    }
}

fn lookup_string(document: &[u8], key: &str) -> Option<String> {
    let mut value = seek_field(document, key).ok().flatten()?;
    value.next_str().ok().map(str::to_owned)
}

fn lookup_entry_points(document: &[u8], key: &str) -> EntryPoints {
    match seek_field(document, key) {
        Ok(Some(mut value)) => entry_points_value(&mut value, document).unwrap_or_default(),
        _ => EntryPoints::Absent,
    }
}
