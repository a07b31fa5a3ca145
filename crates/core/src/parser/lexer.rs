//! Content stream tokenizer.
//!
//! Splits a byte buffer into primitive tokens: scalars, array and
//! dictionary delimiters, operators, and the three markers that bracket
//! an inline image (`BI`, the `ID` payload, `EI`). Each token records its
//! byte offset and length in the source.

use crate::codec::ascii85::hex_nibble;
use crate::error::{PdfError, Result};
use crate::model::objects::Real;
use crate::model::text::{Name, PdfString};
use crate::model::unparse::{is_delimiter, is_whitespace};
use bytes::Bytes;
use smol_str::SmolStr;

/// Lexical class of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentToken {
    Boolean(bool),
    Null,
    Integer(i64),
    Real(Real),
    String(PdfString),
    Name(Name),
    ArrayStart,
    ArrayEnd,
    DictStart,
    DictEnd,
    /// Any other bare keyword.
    Operator(SmolStr),
    /// The `BI` keyword.
    BeginInlineImage,
    /// Raw inline image bytes following `ID`.
    InlineImageData(Bytes),
    /// The `EI` keyword.
    EndInlineImage,
}

/// A token and the span of source bytes it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: ContentToken,
    pub offset: usize,
    pub length: usize,
}

/// Single-pass tokenizer over a content stream.
pub struct ContentLexer<'a> {
    data: &'a [u8],
    pos: usize,
}

fn is_keyword_end(b: u8) -> bool {
    is_whitespace(b) || is_delimiter(b)
}

fn find_line_end(data: &[u8]) -> Option<usize> {
    data.iter().position(|&b| b == b'\r' || b == b'\n')
}

impl<'a> ContentLexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position in the buffer.
    pub fn tell(&self) -> usize {
        self.pos
    }

    fn skip_whitespace(&mut self) {
        let data = self.data;
        while self.pos < data.len() {
            let b = data[self.pos];
            if b == b'%' {
                self.pos += 1;
                match find_line_end(&data[self.pos..]) {
                    Some(offset) => self.pos += offset + 1,
                    None => self.pos = data.len(),
                }
                continue;
            }
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn parse_name(&mut self) -> ContentToken {
        let data = self.data;
        let mut pos = self.pos + 1;
        let mut name = Vec::with_capacity(16);

        while pos < data.len() {
            let b = data[pos];
            if is_keyword_end(b) {
                break;
            }
            if b == b'#' {
                let escaped = data
                    .get(pos + 1..pos + 3)
                    .and_then(|pair| Some((hex_nibble(pair[0])?, hex_nibble(pair[1])?)));
                if let Some((high, low)) = escaped {
                    name.push((high << 4) | low);
                    pos += 3;
                    continue;
                }
            }
            name.push(b);
            pos += 1;
        }

        self.pos = pos;
        ContentToken::Name(Name::from_lexed(&name))
    }

    fn parse_number(&mut self) -> Result<ContentToken> {
        let data = self.data;
        let start = self.pos;
        let mut pos = start;

        if matches!(data.get(pos), Some(b'-' | b'+')) {
            pos += 1;
        }
        while pos < data.len() && data[pos].is_ascii_digit() {
            pos += 1;
        }
        let has_dot = data.get(pos) == Some(&b'.');
        if has_dot {
            pos += 1;
            while pos < data.len() && data[pos].is_ascii_digit() {
                pos += 1;
            }
        }

        self.pos = pos;
        // Only ASCII digits, signs and dots were consumed.
        let text = std::str::from_utf8(&data[start..pos])
            .map_err(|_| PdfError::malformed(start, "invalid number"))?;
        if !has_dot {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(ContentToken::Integer(value));
            }
        }
        // Integers too large for 64 bits are kept as reals.
        Real::parse(text)
            .map(ContentToken::Real)
            .map_err(|_| PdfError::malformed(start, format!("invalid number {text:?}")))
    }

    fn parse_string(&mut self) -> Result<ContentToken> {
        let data = self.data;
        let start = self.pos;
        let mut pos = self.pos + 1;
        let mut depth = 1;
        let mut result = Vec::with_capacity(32);

        while pos < data.len() {
            let c = data[pos];
            pos += 1;
            match c {
                b'(' => {
                    depth += 1;
                    result.push(b'(');
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = pos;
                        return Ok(ContentToken::String(PdfString::from_bytes(result)));
                    }
                    result.push(b')');
                }
                b'\\' => {
                    let Some(&esc) = data.get(pos) else {
                        break;
                    };
                    pos += 1;
                    match esc {
                        b'n' => result.push(b'\n'),
                        b'r' => result.push(b'\r'),
                        b't' => result.push(b'\t'),
                        b'b' => result.push(0x08),
                        b'f' => result.push(0x0c),
                        b'\r' => {
                            if data.get(pos) == Some(&b'\n') {
                                pos += 1;
                            }
                        }
                        b'\n' => {}
                        b'0'..=b'7' => {
                            let mut octal = (esc - b'0') as u32;
                            for _ in 0..2 {
                                match data.get(pos) {
                                    Some(&d @ b'0'..=b'7') => {
                                        octal = octal * 8 + (d - b'0') as u32;
                                        pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            result.push((octal & 0xff) as u8);
                        }
                        other => result.push(other),
                    }
                }
                b'\r' => {
                    // An end-of-line in a literal string is a single newline.
                    if data.get(pos) == Some(&b'\n') {
                        pos += 1;
                    }
                    result.push(b'\n');
                }
                other => result.push(other),
            }
        }

        self.pos = data.len();
        Err(PdfError::malformed(start, "unterminated string"))
    }

    fn parse_hex_string(&mut self) -> Result<ContentToken> {
        let data = self.data;
        let start = self.pos;
        let mut pos = self.pos + 1;
        let mut result = Vec::with_capacity(32);
        let mut pending: Option<u8> = None;

        loop {
            let Some(&c) = data.get(pos) else {
                self.pos = data.len();
                return Err(PdfError::malformed(start, "unterminated hex string"));
            };
            pos += 1;
            if c == b'>' {
                break;
            }
            if is_whitespace(c) {
                continue;
            }
            let nibble = hex_nibble(c).ok_or_else(|| {
                PdfError::malformed(pos - 1, format!("invalid character {:?} in hex string", c as char))
            })?;
            match pending.take() {
                Some(high) => result.push((high << 4) | nibble),
                None => pending = Some(nibble),
            }
        }

        if let Some(high) = pending {
            result.push(high << 4);
        }
        self.pos = pos;
        Ok(ContentToken::String(PdfString::from_bytes(result)))
    }

    fn parse_keyword(&mut self) -> ContentToken {
        let data = self.data;
        let start = self.pos;
        let end = data[start..]
            .iter()
            .position(|&b| is_keyword_end(b))
            .map_or(data.len(), |offset| start + offset);
        self.pos = end;

        match &data[start..end] {
            b"true" => ContentToken::Boolean(true),
            b"false" => ContentToken::Boolean(false),
            b"null" => ContentToken::Null,
            b"BI" => ContentToken::BeginInlineImage,
            b"EI" => ContentToken::EndInlineImage,
            b"ID" => self.parse_inline_image_data(),
            word => ContentToken::Operator(SmolStr::new(String::from_utf8_lossy(word))),
        }
    }

    /// Read the payload after `ID`.
    ///
    /// One whitespace byte separates `ID` from the data. The data ends at
    /// the whitespace before an `EI` that is itself followed by whitespace,
    /// a delimiter or the end of input. Without such an `EI` the rest of
    /// the buffer is taken as data.
    fn parse_inline_image_data(&mut self) -> ContentToken {
        let data = self.data;
        let keyword_end = self.pos;
        let data_start = if data.get(keyword_end).copied().is_some_and(is_whitespace) {
            keyword_end + 1
        } else {
            keyword_end
        };

        let search_from = data_start.saturating_sub(1).max(keyword_end);
        let end = (search_from..data.len()).find(|&i| {
            is_whitespace(data[i])
                && data.get(i + 1..i + 3) == Some(b"EI".as_slice())
                && data.get(i + 3).is_none_or(|&b| is_keyword_end(b))
        });

        match end {
            Some(i) => {
                self.pos = i;
                ContentToken::InlineImageData(Bytes::copy_from_slice(
                    &data[data_start..i.max(data_start)],
                ))
            }
            None => {
                self.pos = data.len();
                ContentToken::InlineImageData(Bytes::copy_from_slice(
                    &data[data_start.min(data.len())..],
                ))
            }
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Result<Token>> {
        self.skip_whitespace();
        let data = self.data;
        if self.pos >= data.len() {
            return None;
        }

        let offset = self.pos;
        let b = data[self.pos];
        let next = data.get(self.pos + 1).copied();

        let result = match b {
            b'/' => Ok(self.parse_name()),
            b'(' => self.parse_string(),
            b'<' if next == Some(b'<') => {
                self.pos += 2;
                Ok(ContentToken::DictStart)
            }
            b'<' => self.parse_hex_string(),
            b'>' if next == Some(b'>') => {
                self.pos += 2;
                Ok(ContentToken::DictEnd)
            }
            b'[' => {
                self.pos += 1;
                Ok(ContentToken::ArrayStart)
            }
            b']' => {
                self.pos += 1;
                Ok(ContentToken::ArrayEnd)
            }
            b'>' | b')' | b'{' | b'}' => {
                self.pos += 1;
                Err(PdfError::malformed(
                    offset,
                    format!("unexpected delimiter {:?}", b as char),
                ))
            }
            b'+' | b'-' if matches!(next, Some(c) if c.is_ascii_digit() || c == b'.') => {
                self.parse_number()
            }
            b'.' if matches!(next, Some(c) if c.is_ascii_digit()) => self.parse_number(),
            c if c.is_ascii_digit() => self.parse_number(),
            _ => Ok(self.parse_keyword()),
        };

        Some(result.map(|kind| Token {
            kind,
            offset,
            length: self.pos - offset,
        }))
    }
}

impl Iterator for ContentLexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
