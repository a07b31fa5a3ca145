//! JSON projection of objects.
//!
//! Names and strings become JSON strings, with everything outside ASCII
//! written as `\uHHHH`. Nested indirect references become `"n g R"`,
//! streams contribute their dictionary only, and operators, inline
//! images, reserved and uninitialized objects become `null`.

use super::objects::{Object, Value};
use crate::error::{PdfError, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// JSON formatter that escapes all non-ASCII characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Real text as a valid JSON number: `.5` -> `0.5`, `3.` -> `3.0`.
fn json_number(text: &str) -> Result<serde_json::Number> {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => ("-", &text[1..]),
        Some(b'+') => ("", &text[1..]),
        _ => ("", text),
    };
    let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, ""));
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    format!("{sign}{int_part}.{frac_part}")
        .parse()
        .map_err(|e| PdfError::InvalidValue(format!("real {text:?} is not a JSON number: {e}")))
}

fn json_value(obj: &Object, dereference: bool, depth: usize) -> Result<serde_json::Value> {
    if depth > DEFAULT_MAX_DEPTH {
        return Err(PdfError::StructureTooDeep {
            limit: DEFAULT_MAX_DEPTH,
        });
    }
    if obj.is_indirect() && !dereference {
        return Ok(serde_json::Value::String(format!("{} R", obj.objgen())));
    }
    obj.with_value(|v| {
        Ok(match v {
            Value::Null
            | Value::Operator(_)
            | Value::InlineImage(_)
            | Value::Reserved
            | Value::Uninitialized => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(n) => serde_json::Value::Number((*n).into()),
            Value::Real(r) => serde_json::Value::Number(json_number(r.text())?),
            Value::String(s) => serde_json::Value::String(s.to_text()),
            Value::Name(n) => serde_json::Value::String(n.to_text().into_owned()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| json_value(item, false, depth + 1))
                    .collect::<Result<_>>()?,
            ),
            Value::Dictionary(dict) | Value::Stream(super::objects::Stream { dict, .. }) => {
                let mut map = serde_json::Map::new();
                for (key, item) in dict {
                    map.insert(key.to_text().into_owned(), json_value(item, false, depth + 1)?);
                }
                serde_json::Value::Object(map)
            }
        })
    })
}

impl Object {
    /// JSON value for this object.
    ///
    /// With `dereference`, a top-level indirect object is replaced by its
    /// value; nested references are always written as `"n g R"`.
    pub fn to_json_value(&self, dereference: bool) -> Result<serde_json::Value> {
        json_value(self, dereference, 0)
    }

    /// Compact JSON text, ASCII only.
    pub fn to_json(&self, dereference: bool) -> Result<String> {
        let value = self.to_json_value(dereference)?;
        write_json(&value)
    }
}

/// Serialize any JSON value with [`AsciiFormatter`].
pub fn write_json(value: &serde_json::Value) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| PdfError::InvalidValue(format!("JSON serialization failed: {e}")))?;
    String::from_utf8(out).map_err(|e| PdfError::InvalidValue(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_number_canonical_forms() {
        assert_eq!(json_number(".5").unwrap().to_string(), "0.5");
        assert_eq!(json_number("-.25").unwrap().to_string(), "-0.25");
        assert_eq!(json_number("3.").unwrap().to_string(), "3.0");
        assert_eq!(json_number("+007.10").unwrap().to_string(), "7.10");
    }

    #[test]
    fn test_ascii_formatter_escapes() {
        let value = serde_json::Value::String("caf\u{e9} \u{1d11e}".into());
        assert_eq!(write_json(&value).unwrap(), r#""caf\u00e9 \ud834\udd1e""#);
    }
}
