//! HTML escaping for user-supplied text.

/// Escapes `&`, `<`, `>`, `"` and `'`, making the text safe in HTML content
/// and in quoted attribute values.
///
/// Escaping is not idempotent: already-escaped input is escaped again.
pub fn escape(text: &str) -> String {
	html_escape::encode_quoted_attribute(text).into_owned()
}
