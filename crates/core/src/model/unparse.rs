//! Serialization of objects back to PDF syntax.

use super::objects::{ObjGen, Object, Value};
use super::text::Name;
use crate::error::{PdfError, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use rustc_hash::FxHashSet;
use std::io::Write;

/// True for bytes that end a regular token.
pub(crate) const fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

pub(crate) const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x00')
}

/// Write a name, escaping bytes that cannot appear literally as `#xx`.
pub(crate) fn write_name(out: &mut Vec<u8>, name: &Name) {
    out.push(b'/');
    for &b in name.body() {
        if (0x21..=0x7e).contains(&b) && b != b'#' && !is_delimiter(b) {
            out.push(b);
        } else {
            // Writes into a Vec cannot fail.
            let _ = write!(out, "#{b:02x}");
        }
    }
}

fn is_printable(b: u8) -> bool {
    (0x20..0x7f).contains(&b) || matches!(b, b'\n' | b'\r' | b'\t' | b'\x08' | b'\x0c')
}

pub(crate) fn write_hex_string(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(b'<');
    for &b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out.push(b'>');
}

/// Literal `( )` form for mostly printable strings, hex otherwise.
pub(crate) fn write_string(out: &mut Vec<u8>, bytes: &[u8], force_hex: bool) {
    let nonprintable = bytes.iter().filter(|&&b| !is_printable(b)).count();
    if force_hex || nonprintable * 5 > bytes.len() {
        write_hex_string(out, bytes);
        return;
    }
    out.push(b'(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\x08' => out.extend_from_slice(b"\\b"),
            b'\x0c' => out.extend_from_slice(b"\\f"),
            b if is_printable(b) => out.push(b),
            b => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out.push(b')');
}

struct Unparser {
    out: Vec<u8>,
    resolved: bool,
    binary: bool,
    max_depth: usize,
    visiting: FxHashSet<(usize, ObjGen)>,
}

impl Unparser {
    fn new(resolved: bool, binary: bool) -> Self {
        Self {
            out: Vec::new(),
            resolved,
            binary,
            max_depth: DEFAULT_MAX_DEPTH,
            visiting: FxHashSet::default(),
        }
    }

    fn object(&mut self, obj: &Object, depth: usize, top: bool) -> Result<()> {
        if depth > self.max_depth {
            return Err(PdfError::StructureTooDeep {
                limit: self.max_depth,
            });
        }
        if let Some(r) = obj.indirect_ref() {
            let inline = (top || self.resolved) && !obj.is_stream();
            if !inline {
                let _ = write!(self.out, "{} R", r.objgen);
                return Ok(());
            }
            let key = (r.owner.as_ptr() as usize, r.objgen);
            if !self.visiting.insert(key) {
                return Err(PdfError::InvalidValue(format!(
                    "cannot unparse resolved object: object {} refers to itself",
                    r.objgen
                )));
            }
            let result = obj.with_value(|v| self.value(v, depth));
            self.visiting.remove(&key);
            return result;
        }
        obj.with_value(|v| self.value(v, depth))
    }

    fn value(&mut self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Null => self.out.extend_from_slice(b"null"),
            Value::Boolean(true) => self.out.extend_from_slice(b"true"),
            Value::Boolean(false) => self.out.extend_from_slice(b"false"),
            Value::Integer(n) => {
                let _ = write!(self.out, "{n}");
            }
            Value::Real(r) => self.out.extend_from_slice(r.text().as_bytes()),
            Value::String(s) => write_string(&mut self.out, s.as_bytes(), self.binary),
            Value::Name(n) => write_name(&mut self.out, n),
            Value::Operator(op) => self.out.extend_from_slice(op.as_bytes()),
            Value::InlineImage(image) => self.out.extend_from_slice(image.raw_bytes()),
            Value::Array(items) => {
                self.out.extend_from_slice(b"[ ");
                for item in items {
                    self.object(item, depth + 1, false)?;
                    self.out.push(b' ');
                }
                self.out.push(b']');
            }
            Value::Dictionary(dict) => {
                self.out.extend_from_slice(b"<< ");
                for (key, item) in dict {
                    write_name(&mut self.out, key);
                    self.out.push(b' ');
                    self.object(item, depth + 1, false)?;
                    self.out.push(b' ');
                }
                self.out.extend_from_slice(b">>");
            }
            Value::Stream(_) => {
                return Err(PdfError::InvalidValue(
                    "streams can only be unparsed as indirect references".into(),
                ));
            }
            Value::Uninitialized | Value::Reserved => {
                return Err(PdfError::InvalidValue(format!(
                    "cannot unparse {} object",
                    value.type_name()
                )));
            }
        }
        Ok(())
    }
}

impl Object {
    /// PDF syntax for this object.
    ///
    /// An indirect object at the top level is written by value. Nested
    /// indirect references are written as `n g R` unless `resolved` is set,
    /// in which case they are substituted inline; a reference cycle is then
    /// an error. Streams are always written as references.
    pub fn unparse(&self, resolved: bool) -> Result<Vec<u8>> {
        let mut unparser = Unparser::new(resolved, false);
        unparser.object(self, 0, true)?;
        Ok(unparser.out)
    }

    /// Like [`Object::unparse`] but strings are always hex-encoded.
    pub fn unparse_binary(&self) -> Result<Vec<u8>> {
        let mut unparser = Unparser::new(false, true);
        unparser.object(self, 0, true)?;
        Ok(unparser.out)
    }

    /// Unparse as a reference: `n g R` for indirect objects, syntax otherwise.
    pub(crate) fn unparse_operand(&self) -> Result<Vec<u8>> {
        if let Some(r) = self.indirect_ref() {
            return Ok(format!("{} R", r.objgen).into_bytes());
        }
        self.unparse(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(bytes: &[u8], force_hex: bool) -> String {
        let mut out = Vec::new();
        write_string(&mut out, bytes, force_hex);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_literal_string_escapes() {
        assert_eq!(string(b"a(b)c\\", false), r"(a\(b\)c\\)");
        assert_eq!(string(b"line\n", false), r"(line\n)");
        assert_eq!(string(b"hello\x01", false), r"(hello\001)");
    }

    #[test]
    fn test_binary_string_goes_hex() {
        assert_eq!(string(b"\x00\x01\x02", false), "<000102>");
        assert_eq!(string(b"abc", true), "<616263>");
    }

    #[test]
    fn test_name_escaping() {
        let mut out = Vec::new();
        write_name(&mut out, &Name::new("/A B#").unwrap());
        assert_eq!(out, b"/A#20B#23");
    }
}
