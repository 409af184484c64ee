//! The extraction record and the per-field typing rules shared by both
//! extraction strategies.

use core::fmt;

use jiter::{Jiter, JiterError, JiterErrorType, Peek};
use thiserror::Error;

use crate::buffer::PADDING;

/// Errors that abort extraction outright.
///
/// Field-level absence or a wrong-typed field is *not* an error; those
/// degrade to defaults in the record. Only document-level damage lands here,
/// and no partial record is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The document parsed, but its root value is not an object.
    #[error("manifest root is not an object")]
    RootNotObject,
    /// The document is structurally broken.
    #[error("malformed manifest at byte {index}: {kind}")]
    Malformed {
        /// The parser's description of what went wrong.
        kind: String,
        /// Byte offset (past any BOM) where the parser stopped.
        index: usize,
    },
}

impl From<JiterError> for ExtractError {
    fn from(err: JiterError) -> Self {
        Self::Malformed {
            kind: err.error_type.to_string(),
            index: err.index,
        }
    }
}

/// Map a parser error at the document root onto the extraction taxonomy.
///
/// A wrong-type report means the document parsed to something other than an
/// object; anything else is ordinary structural damage.
pub(crate) fn object_error(err: JiterError) -> ExtractError {
    if matches!(err.error_type, JiterErrorType::WrongType { .. }) {
        ExtractError::RootNotObject
    } else {
        err.into()
    }
}

/// The `type` field of a manifest, normalized.
///
/// Unrecognized keywords collapse to [`PackageType::None`] so that future
/// module-system names degrade gracefully instead of failing resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PackageType {
    /// `"type": "module"` — ES modules by default.
    Module,
    /// `"type": "commonjs"`.
    CommonJs,
    /// Absent or unrecognized.
    #[default]
    None,
}

impl PackageType {
    pub(crate) fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "module" => Self::Module,
            "commonjs" => Self::CommonJs,
            _ => Self::None,
        }
    }

    /// The normalized keyword: `"module"`, `"commonjs"`, or `"none"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::CommonJs => "commonjs",
            Self::None => "none",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a conditional-resolution field (`exports` or `imports`).
///
/// These fields are type-polymorphic in the wild: a plain string names a
/// single target, while an object maps conditions to targets. The two shapes
/// are deliberately *not* unified — an object is captured as its exact,
/// unparsed source text for deferred parsing by the resolver, whereas a
/// string is decoded immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntryPoints {
    /// Field absent, or present with a type that is neither string nor
    /// object.
    #[default]
    Absent,
    /// The field was a plain string target; holds the decoded content.
    Path(String),
    /// The field was an object; holds the exact source substring spanning
    /// it, whitespace and all.
    RawObject(String),
}

impl EntryPoints {
    /// Copy `raw` into an owned string with [`PADDING`] spare capacity, so
    /// the captured object can later be handed to a padded parser view
    /// without reallocating.
    pub(crate) fn raw_object(raw: &str) -> Self {
        let mut text = String::with_capacity(raw.len() + PADDING);
        text.push_str(raw);
        Self::RawObject(text)
    }

    /// Whether the field held an object needing deferred parsing.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::RawObject(_))
    }

    /// Whether the field contributed nothing to the record.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The raw source text of an object-shaped field, or `""` otherwise.
    #[must_use]
    pub fn raw_json(&self) -> &str {
        match self {
            Self::RawObject(text) => text,
            _ => "",
        }
    }

    /// The decoded target of a string-shaped field, or `""` otherwise.
    #[must_use]
    pub fn as_path(&self) -> &str {
        match self {
            Self::Path(target) => target,
            _ => "",
        }
    }
}

/// The fields a module resolver needs from one manifest.
///
/// Produced fresh per extraction; owns every byte of its string data, so it
/// outlives the buffer it was read from. A record where nothing was
/// recognized is a successful, all-default record with
/// [`has_recognized_fields`](Self::has_recognized_fields) left `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ManifestFields {
    /// True once any of the five fields was present with a usable type.
    pub has_recognized_fields: bool,
    /// The `name` field; empty if absent or not a string.
    pub name: String,
    /// The `main` field; empty if absent or not a string.
    pub main: String,
    /// The `exports` field.
    pub exports: EntryPoints,
    /// The `imports` field.
    pub imports: EntryPoints,
    /// The `type` field, normalized.
    pub package_type: PackageType,
}

/// Consume the value the parser is positioned at and type it under the
/// `exports`/`imports` rules.
///
/// `document` must be the same byte view the parser was built over; object
/// values are captured as exact subslices of it. Every branch consumes the
/// value exactly once, so callers iterating an object can continue directly
/// afterwards.
pub(crate) fn entry_points_value(
    jiter: &mut Jiter<'_>,
    document: &[u8],
) -> Result<EntryPoints, ExtractError> {
    let peek = jiter.peek()?;
    match peek {
        Peek::Object => {
            let start = jiter.current_index();
            jiter.known_skip(peek)?;
            let end = jiter.current_index();
            let raw = core::str::from_utf8(&document[start..end]).map_err(|_| {
                ExtractError::Malformed {
                    kind: "invalid UTF-8 in object value".to_owned(),
                    index: start,
                }
            })?;
            Ok(EntryPoints::raw_object(raw))
        }
        Peek::String => Ok(EntryPoints::Path(jiter.known_str()?.to_owned())),
        other => {
            jiter.known_skip(other)?;
            Ok(EntryPoints::Absent)
        }
    }
}

/// Consume the value the parser is positioned at; `Some` only for strings.
///
/// Non-string values are skipped, not reported — a wrong-typed field reads
/// as absent.
pub(crate) fn string_value(jiter: &mut Jiter<'_>) -> Result<Option<String>, ExtractError> {
    let peek = jiter.peek()?;
    if peek == Peek::String {
        Ok(Some(jiter.known_str()?.to_owned()))
    } else {
        jiter.known_skip(peek)?;
        Ok(None)
    }
}
