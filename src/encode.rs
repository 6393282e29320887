use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// AsciiSet for [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-2.3) encoding.
///
/// Encodes every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static RFC3986_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986.
///
/// Spaces become `%20` and `~` is left untouched.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, &RFC3986_ENCODE_SET).to_string()
}

/// Encode every element independently, preserving order.
pub fn encode_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| encode(v.as_ref())).collect()
}

/// Build an `application/x-www-form-urlencoded` string from pairs.
///
/// `*` is left literal rather than sent as `%2A`; servers decode both alike.
/// Only the signature base string depends on exact encoding, and it goes
/// through [`encode`].
pub fn form_encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Decode a form-encoded body into a map.
///
/// A repeated key keeps its last value.
pub fn decode_form(body: &[u8]) -> IndexMap<String, String> {
    form_urlencoded::parse(body).into_owned().collect()
}
