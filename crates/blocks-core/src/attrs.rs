//! Block attributes: lenient normalization and comment-safe JSON encoding.

use std::io;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::{CharEscape, Formatter};
use serde_json::{Map, Value};

use crate::error::Result;

/// Ordered attribute mapping. Key order survives serialization.
pub type Attributes = Map<String, Value>;

/// Coerces any JSON value into an attribute mapping.
///
/// Objects are kept as they are; everything else (null, arrays, scalars)
/// becomes an empty mapping.
pub fn normalize(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        _ => Attributes::new(),
    }
}

/// `deserialize_with` helper that never rejects malformed attributes.
///
/// A missing field, `null`, or a non-object value all yield an empty mapping.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> std::result::Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(normalize).unwrap_or_default())
}

/// Encodes attributes as JSON that can sit inside an HTML comment.
///
/// `--`, `<`, `>` and `&` are written as unicode escapes, as are quotes
/// inside string values, so the encoded text can never terminate the
/// surrounding comment or be mistaken for markup.
///
/// # Example
/// ```
/// use blocks_core::attrs::{Attributes, to_comment_json};
/// use serde_json::json;
///
/// let mut attrs = Attributes::new();
/// attrs.insert("content".into(), json!("<b>a--b</b>"));
/// assert_eq!(
///     to_comment_json(&attrs).unwrap(),
///     r#"{"content":"\u003cb\u003ea\u002d\u002db\u003c/b\u003e"}"#
/// );
/// ```
pub fn to_comment_json(attributes: &Attributes) -> Result<String> {
    let mut buf = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, CommentSafeFormatter);
    attributes.serialize(&mut serializer)?;
    // The formatter only ever writes ASCII escapes or the UTF-8 input back out.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Compact JSON formatter with comment-safe string escaping.
struct CommentSafeFormatter;

impl CommentSafeFormatter {
    fn needs_escaping(fragment: &str) -> bool {
        fragment.contains("--") || fragment.contains(['<', '>', '&'])
    }
}

impl Formatter for CommentSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !Self::needs_escaping(fragment) {
            return writer.write_all(fragment.as_bytes());
        }

        let escaped = fragment
            .replace("--", "\\u002d\\u002d")
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026");
        writer.write_all(escaped.as_bytes())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let escape: &[u8] = match char_escape {
            CharEscape::Quote => b"\\u0022",
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::Solidus => b"\\/",
            CharEscape::Backspace => b"\\b",
            CharEscape::FormFeed => b"\\f",
            CharEscape::LineFeed => b"\\n",
            CharEscape::CarriageReturn => b"\\r",
            CharEscape::Tab => b"\\t",
            CharEscape::AsciiControl(byte) => {
                return write!(writer, "\\u{:04x}", byte);
            }
        };
        writer.write_all(escape)
    }
}
