//! Selective extraction of package manifest fields from JSON documents.
//!
//! Package-aware runtimes read a manifest (`package.json`) on every module
//! resolution, but only ever consult a handful of fields: `name`, `main`,
//! `exports`, `imports`, and `type`. `pkgscan` pulls exactly those fields out
//! of a document without building a generic value tree, so the hot path pays
//! for no allocation, copying, or validation beyond what the five fields
//! themselves require.
//!
//! The crate has two halves:
//!
//! - **Loading** ([`read_chunked`], [`read_two_pass`]) produces a
//!   [`PaddedBytes`] buffer whose content is followed by at least [`PADDING`]
//!   writable bytes, so a vectorized scanner may over-read past the last
//!   content byte without bounds violations. The two loaders are functionally
//!   equivalent and differ only in I/O pattern; both are kept because the
//!   surrounding tooling measures them against each other.
//! - **Extraction** ([`extract_by_lookup`], [`extract_by_scan`]) drives a
//!   lazy on-demand parser over the buffer and yields a [`ManifestFields`]
//!   record. The indexed strategy locates each recognized key independently;
//!   the scan strategy walks the root object once and dispatches by key.
//!   Both produce identical records for well-formed input.
//!
//! Absent fields and wrong-typed fields are not errors: they come back as
//! defaults, and [`ManifestFields::has_recognized_fields`] reports whether
//! anything was found at all. Only structural damage to the document (or a
//! non-object root) aborts extraction.
//!
//! ```
//! use pkgscan::{PaddedBytes, extract_by_scan};
//!
//! let doc = PaddedBytes::from(r#"{"name":"demo","type":"module","main":"./lib.js"}"#);
//! let fields = extract_by_scan(&doc)?;
//! assert_eq!(fields.name, "demo");
//! assert_eq!(fields.main, "./lib.js");
//! assert_eq!(fields.package_type.as_str(), "module");
//! # Ok::<(), pkgscan::ExtractError>(())
//! ```

mod buffer;
mod fields;
mod lookup;
mod read;
mod scan;

pub use buffer::{PADDING, PaddedBytes};
pub use fields::{EntryPoints, ExtractError, ManifestFields, PackageType};
pub use lookup::extract_by_lookup;
pub use read::{LoadError, read_chunked, read_two_pass};
pub use scan::extract_by_scan;
