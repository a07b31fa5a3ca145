//! PDF strings, names, and text encodings.
//!
//! PDF text strings are either PDFDocEncoding or UTF-16BE with a byte
//! order mark. Strings arriving from content streams carry no encoding
//! information at all, so [`PdfString`] stores raw bytes and decodes on
//! demand.

use crate::error::{PdfError, Result};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use bytes::Bytes;
use std::borrow::{Borrow, Cow};
use std::fmt;

/// PDFDocEncoding table - maps bytes 0-255 to Unicode code points.
///
/// Undefined positions map to U+FFFD.
const PDF_DOC_ENCODING: [u32; 256] = [
    0x0000, 0x0001, 0x0002, 0x0003, 0x0004, 0x0005, 0x0006, 0x0007, 0x0008, 0x0009, 0x000A, 0x000B,
    0x000C, 0x000D, 0x000E, 0x000F, 0x0010, 0x0011, 0x0012, 0x0013, 0x0014, 0x0015, 0x0016, 0x0017,
    0x02D8, 0x02C7, 0x02C6, 0x02D9, 0x02DD, 0x02DB, 0x02DA, 0x02DC, 0x0020, 0x0021, 0x0022, 0x0023,
    0x0024, 0x0025, 0x0026, 0x0027, 0x0028, 0x0029, 0x002A, 0x002B, 0x002C, 0x002D, 0x002E, 0x002F,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037, 0x0038, 0x0039, 0x003A, 0x003B,
    0x003C, 0x003D, 0x003E, 0x003F, 0x0040, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047,
    0x0048, 0x0049, 0x004A, 0x004B, 0x004C, 0x004D, 0x004E, 0x004F, 0x0050, 0x0051, 0x0052, 0x0053,
    0x0054, 0x0055, 0x0056, 0x0057, 0x0058, 0x0059, 0x005A, 0x005B, 0x005C, 0x005D, 0x005E, 0x005F,
    0x0060, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067, 0x0068, 0x0069, 0x006A, 0x006B,
    0x006C, 0x006D, 0x006E, 0x006F, 0x0070, 0x0071, 0x0072, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077,
    0x0078, 0x0079, 0x007A, 0x007B, 0x007C, 0x007D, 0x007E, 0xFFFD, 0x2022, 0x2020, 0x2021, 0x2026,
    0x2014, 0x2013, 0x0192, 0x2044, 0x2039, 0x203A, 0x2212, 0x2030, 0x201E, 0x201C, 0x201D, 0x2018,
    0x2019, 0x201A, 0x2122, 0xFB01, 0xFB02, 0x0141, 0x0152, 0x0160, 0x0178, 0x017D, 0x0131, 0x0142,
    0x0153, 0x0161, 0x017E, 0xFFFD, 0x20AC, 0x00A1, 0x00A2, 0x00A3, 0x00A4, 0x00A5, 0x00A6, 0x00A7,
    0x00A8, 0x00A9, 0x00AA, 0x00AB, 0x00AC, 0xFFFD, 0x00AE, 0x00AF, 0x00B0, 0x00B1, 0x00B2, 0x00B3,
    0x00B4, 0x00B5, 0x00B6, 0x00B7, 0x00B8, 0x00B9, 0x00BA, 0x00BB, 0x00BC, 0x00BD, 0x00BE, 0x00BF,
    0x00C0, 0x00C1, 0x00C2, 0x00C3, 0x00C4, 0x00C5, 0x00C6, 0x00C7, 0x00C8, 0x00C9, 0x00CA, 0x00CB,
    0x00CC, 0x00CD, 0x00CE, 0x00CF, 0x00D0, 0x00D1, 0x00D2, 0x00D3, 0x00D4, 0x00D5, 0x00D6, 0x00D7,
    0x00D8, 0x00D9, 0x00DA, 0x00DB, 0x00DC, 0x00DD, 0x00DE, 0x00DF, 0x00E0, 0x00E1, 0x00E2, 0x00E3,
    0x00E4, 0x00E5, 0x00E6, 0x00E7, 0x00E8, 0x00E9, 0x00EA, 0x00EB, 0x00EC, 0x00ED, 0x00EE, 0x00EF,
    0x00F0, 0x00F1, 0x00F2, 0x00F3, 0x00F4, 0x00F5, 0x00F6, 0x00F7, 0x00F8, 0x00F9, 0x00FA, 0x00FB,
    0x00FC, 0x00FD, 0x00FE, 0x00FF,
];

static PDF_DOC_REVERSE: Lazy<FxHashMap<char, u8>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for (byte, &cp) in PDF_DOC_ENCODING.iter().enumerate() {
        if cp == 0xFFFD {
            continue;
        }
        if let Some(ch) = char::from_u32(cp) {
            map.entry(ch).or_insert(byte as u8);
        }
    }
    map
});

/// Decode a PDF text string to Unicode.
///
/// Honors UTF-16BE, UTF-16LE and UTF-8 byte order marks; anything else is
/// PDFDocEncoding.
pub fn decode_text(s: &[u8]) -> String {
    if let Some(body) = s.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(body) = s.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(body) = s.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(body).into_owned()
    } else {
        s.iter()
            .map(|&c| char::from_u32(PDF_DOC_ENCODING[c as usize]).unwrap_or('\u{FFFD}'))
            .collect()
    }
}

/// Encode text as PDFDocEncoding when every character is representable,
/// otherwise as UTF-16BE with a byte order mark.
pub fn encode_text(text: &str) -> Vec<u8> {
    let pdfdoc: Option<Vec<u8>> = text
        .chars()
        .map(|ch| PDF_DOC_REVERSE.get(&ch).copied())
        .collect();
    if let Some(bytes) = pdfdoc {
        return bytes;
    }
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// A PDF string: raw bytes of unknown encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PdfString(Vec<u8>);

impl PdfString {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Build a string from Unicode text, choosing PDFDocEncoding or UTF-16BE.
    pub fn from_text(text: &str) -> Self {
        Self(encode_text(text))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decoded Unicode text.
    pub fn to_text(&self) -> String {
        decode_text(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl serde::Serialize for PdfString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

/// A PDF name, stored as raw bytes with its leading `/`.
///
/// Names compare, order and hash by their bytes. [`Name::to_text`] is a
/// display view only.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Bytes);

impl Name {
    /// Create a name from text such as `"/Type"`.
    ///
    /// The text must begin with `/` and have at least one more character.
    pub fn new(text: &str) -> Result<Self> {
        Self::from_bytes(text.as_bytes())
    }

    /// Create a name from raw bytes, leading `/` included.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.first() != Some(&b'/') {
            return Err(PdfError::InvalidValue(format!(
                "Name objects must begin with '/': {:?}",
                String::from_utf8_lossy(bytes)
            )));
        }
        if bytes.len() < 2 {
            return Err(PdfError::InvalidValue(
                "Name must be at least one character long".into(),
            ));
        }
        Ok(Self(Bytes::copy_from_slice(bytes)))
    }

    /// Name from lexer bytes (without the leading `/`, escapes resolved).
    pub(crate) fn from_lexed(body: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(body.len() + 1);
        bytes.push(b'/');
        bytes.extend_from_slice(body);
        Self(Bytes::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name bytes without the leading `/`.
    pub fn body(&self) -> &[u8] {
        &self.0[1..]
    }

    /// The name as text; bytes that are not UTF-8 are read as Latin-1.
    pub fn to_text(&self) -> Cow<'_, str> {
        match std::str::from_utf8(&self.0) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => Cow::Owned(self.0.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&self.to_text()).finish()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Borrow<[u8]> for Name {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf16_bom() {
        assert_eq!(decode_text(b"\xfe\xff\x00H\x00i"), "Hi");
        assert_eq!(decode_text(b"\xff\xfeH\x00i\x00"), "Hi");
    }

    #[test]
    fn test_decode_pdfdoc_specials() {
        assert_eq!(decode_text(b"\x80"), "\u{2022}");
        assert_eq!(decode_text(b"\xa0"), "\u{20AC}");
        assert_eq!(decode_text(b"\x16"), "\u{16}");
        assert_eq!(decode_text(b"\x7f"), "\u{FFFD}");
    }

    #[test]
    fn test_encode_prefers_pdfdoc() {
        assert_eq!(encode_text("caf\u{e9}"), b"caf\xe9");
        assert_eq!(encode_text("\u{2022}"), b"\x80");
        assert_eq!(encode_text("\u{3b1}"), b"\xfe\xff\x03\xb1");
    }

    #[test]
    fn test_name_validation() {
        assert!(Name::new("/Type").is_ok());
        assert!(Name::new("/").is_err());
        assert!(Name::new("Type").is_err());
        assert_eq!(Name::new("/Type").unwrap().body(), b"Type");
        assert!(Name::from_bytes(b"/\xe9").is_ok());
    }

    #[test]
    fn test_name_text_view() {
        assert_eq!(Name::from_lexed(b"\xc3\xa9").to_text(), "/\u{e9}");
        assert_eq!(Name::from_lexed(b"\xe9").to_text(), "/\u{e9}");
        assert_ne!(Name::from_lexed(b"\xc3\xa9"), Name::from_lexed(b"\xe9"));
    }
}
