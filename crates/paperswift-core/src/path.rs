//! Percent-encoding of keys placed in URL and route path segments

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Encode `raw` so it occupies exactly one path segment
///
/// # Examples
///
/// ```
/// use paperswift_core::path::encode_segment;
///
/// assert_eq!(encode_segment("B/TECH"), "B%2FTECH");
/// assert_eq!(encode_segment("CS301"), "CS301");
/// ```
pub fn encode_segment(raw: &str) -> String {
	utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Decode one path segment; `None` if the bytes are not UTF-8
pub fn decode_segment(segment: &str) -> Option<String> {
	percent_decode_str(segment)
		.decode_utf8()
		.ok()
		.map(|decoded| decoded.into_owned())
}
