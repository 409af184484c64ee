//! Owned byte regions with a guaranteed trailing parser margin.

use core::fmt;

use bstr::BStr;

/// Minimum number of writable bytes kept past the logical content.
///
/// Vectorized JSON scanners load fixed-width lanes and may touch bytes past
/// the final content byte. Every [`PaddedBytes`] region extends at least this
/// far beyond its content so those over-reads stay inside the allocation.
pub const PADDING: usize = 64;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A contiguous byte region whose content is followed by at least
/// [`PADDING`] writable-but-logically-unused bytes.
///
/// The margin is scratch space for the parser: it is never part of the
/// document. Content length and region length are tracked separately so
/// callers can tell how much over-read allowance exists past the content.
///
/// ```
/// use pkgscan::{PADDING, PaddedBytes};
///
/// let buf = PaddedBytes::from("{}");
/// assert_eq!(buf.contents(), b"{}");
/// assert!(buf.margin() >= PADDING);
/// ```
#[derive(Clone)]
pub struct PaddedBytes {
    bytes: Vec<u8>,
    content_len: usize,
}

impl PaddedBytes {
    /// `bytes` must already include the trailing margin.
    ///
    /// # Panics
    ///
    /// Panics if the region past `content_len` is shorter than [`PADDING`].
    pub(crate) fn from_parts(bytes: Vec<u8>, content_len: usize) -> Self {
        assert!(
            bytes.len() >= content_len + PADDING,
            "trailing margin shorter than PADDING"
        );
        Self { bytes, content_len }
    }

    /// Copy `content` into a fresh region with a zeroed trailing margin.
    #[must_use]
    pub fn from_slice(content: &[u8]) -> Self {
        let mut bytes = vec![0u8; content.len() + PADDING];
        bytes[..content.len()].copy_from_slice(content);
        Self {
            bytes,
            content_len: content.len(),
        }
    }

    /// The logical content, without the margin.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.bytes[..self.content_len]
    }

    /// The content with a single leading UTF-8 byte-order mark removed.
    ///
    /// A BOM is invalid in UTF-8 per the Unicode standard, but manifests
    /// written by BOM-emitting editors exist in the wild; parsing starts past
    /// it when present.
    #[must_use]
    pub fn document(&self) -> &[u8] {
        let contents = self.contents();
        contents.strip_prefix(&UTF8_BOM).unwrap_or(contents)
    }

    /// Number of content bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content_len
    }

    /// Whether the region holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content_len == 0
    }

    /// Total region length: content plus margin.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Writable bytes past the content, always at least [`PADDING`].
    #[must_use]
    pub fn margin(&self) -> usize {
        self.bytes.len() - self.content_len
    }
}

impl From<&[u8]> for PaddedBytes {
    fn from(content: &[u8]) -> Self {
        Self::from_slice(content)
    }
}

impl From<&str> for PaddedBytes {
    fn from(content: &str) -> Self {
        Self::from_slice(content.as_bytes())
    }
}

impl fmt::Debug for PaddedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddedBytes")
            .field("contents", &BStr::new(self.contents()))
            .field("margin", &self.margin())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_keeps_content_and_margin_apart() {
        let buf = PaddedBytes::from_slice(b"{\"name\":\"x\"}");
        assert_eq!(buf.contents(), b"{\"name\":\"x\"}");
        assert_eq!(buf.len(), 12);
        assert_eq!(buf.capacity(), 12 + PADDING);
        assert_eq!(buf.margin(), PADDING);
    }

    #[test]
    fn empty_content_still_carries_the_margin() {
        let buf = PaddedBytes::from_slice(b"");
        assert!(buf.is_empty());
        assert_eq!(buf.margin(), PADDING);
    }

    #[test]
    fn document_strips_a_leading_bom() {
        let buf = PaddedBytes::from_slice(b"\xEF\xBB\xBF{}");
        assert_eq!(buf.contents(), b"\xEF\xBB\xBF{}");
        assert_eq!(buf.document(), b"{}");
    }

    #[test]
    fn document_leaves_bomless_content_alone() {
        let buf = PaddedBytes::from("{}");
        assert_eq!(buf.document(), b"{}");
    }

    #[test]
    fn bom_shorter_than_three_bytes_is_content() {
        let buf = PaddedBytes::from_slice(b"\xEF\xBB");
        assert_eq!(buf.document(), b"\xEF\xBB");
    }

    #[test]
    #[should_panic(expected = "trailing margin")]
    fn from_parts_rejects_a_thin_margin() {
        let _ = PaddedBytes::from_parts(vec![0u8; 10], 8);
    }
}
