//! JSON output that is safe to embed in HTML documents.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

/// Compact JSON formatter that escapes `<`, `>`, `&`, U+2028 and U+2029 inside strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;

        for (idx, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            if start < idx {
                writer.write_all(&bytes[start..idx])?;
            }
            writer.write_all(escaped.as_bytes())?;
            start = idx + ch.len_utf8();
        }

        if start < bytes.len() {
            writer.write_all(&bytes[start..])?;
        }
        Ok(())
    }
}

/// Serialize `value` as compact JSON with HTML-unsafe characters escaped.
///
/// # Errors
/// Returns the codec error when `value` cannot be represented as JSON.
pub fn to_vec_html_safe<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
