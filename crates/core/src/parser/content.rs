//! Object assembly over the token stream, and callback-driven parsing.

use super::lexer::{ContentLexer, ContentToken, Token};
use crate::error::{PdfError, Result};
use crate::model::document::Document;
use crate::model::objects::{Dictionary, ObjGen, Object};
use crate::options::ParseOptions;

/// Receives each top-level object of a content stream in order.
///
/// `offset` and `length` give the object's span in the source buffer.
/// Arrays and dictionaries arrive whole; operators arrive as Operator
/// objects; an inline image arrives as Operator `BI`, its metadata
/// objects, an InlineImage object holding the payload, then Operator `EI`.
pub trait ParserCallbacks {
    fn on_object(&mut self, obj: Object, offset: usize, length: usize) -> Result<()>;

    /// Called once after the last object.
    fn on_eof(&mut self) -> Result<()> {
        Ok(())
    }
}

enum Frame {
    Array { offset: usize, items: Vec<Object> },
    Dict { offset: usize, items: Vec<Object> },
}

impl Frame {
    fn items(&mut self) -> &mut Vec<Object> {
        match self {
            Frame::Array { items, .. } | Frame::Dict { items, .. } => items,
        }
    }
}

/// Builds arrays and dictionaries from tokens and yields top-level objects.
pub struct ObjectAssembler<'a> {
    lexer: ContentLexer<'a>,
    context: Vec<Frame>,
    max_depth: usize,
    resolver: Option<&'a Document>,
}

impl<'a> ObjectAssembler<'a> {
    pub fn new(data: &'a [u8], max_depth: usize) -> Self {
        Self {
            lexer: ContentLexer::new(data),
            context: Vec::new(),
            max_depth,
            resolver: None,
        }
    }

    /// Resolve `n g R` inside arrays and dictionaries against `doc`.
    pub(crate) fn with_resolver(mut self, doc: &'a Document) -> Self {
        self.resolver = Some(doc);
        self
    }

    /// Current position in the buffer.
    pub fn tell(&self) -> usize {
        self.lexer.tell()
    }

    fn start_context(&mut self, frame: Frame) -> Result<()> {
        if self.context.len() >= self.max_depth {
            return Err(PdfError::StructureTooDeep {
                limit: self.max_depth,
            });
        }
        self.context.push(frame);
        Ok(())
    }

    fn end_array(&mut self, token: &Token) -> Result<(Object, usize)> {
        match self.context.pop() {
            Some(Frame::Array { offset, items }) => Ok((Object::array(items), offset)),
            Some(frame) => {
                self.context.push(frame);
                Err(PdfError::malformed(token.offset, "unexpected ] inside dictionary"))
            }
            None => Err(PdfError::malformed(token.offset, "unexpected ]")),
        }
    }

    fn end_dict(&mut self, token: &Token) -> Result<(Object, usize)> {
        let (offset, items) = match self.context.pop() {
            Some(Frame::Dict { offset, items }) => (offset, items),
            Some(frame) => {
                self.context.push(frame);
                return Err(PdfError::malformed(token.offset, "unexpected >> inside array"));
            }
            None => return Err(PdfError::malformed(token.offset, "unexpected >>")),
        };
        if items.len() % 2 != 0 {
            return Err(PdfError::malformed(offset, "dictionary key has no value"));
        }

        let mut dict = Dictionary::new();
        let mut iter = items.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            let key = key.as_name().map_err(|_| {
                PdfError::malformed(
                    offset,
                    format!("dictionary key is a {}, not a name", key.type_name()),
                )
            })?;
            // A null value is the same as an absent key.
            if !value.is_null() {
                dict.insert(key, value);
            }
        }
        Ok((Object::dictionary(dict), offset))
    }

    /// Replace the trailing `n g` in the current frame with a reference.
    fn resolve_reference(&mut self, doc: &Document, token: &Token) -> Result<Object> {
        let bad_ref = || PdfError::malformed(token.offset, "R must follow two non-negative integers");
        let frame = self.context.last_mut().ok_or_else(bad_ref)?;
        let items = frame.items();
        if items.len() < 2 {
            return Err(bad_ref());
        }
        let generation = items[items.len() - 1].as_int().map_err(|_| bad_ref())?;
        let number = items[items.len() - 2].as_int().map_err(|_| bad_ref())?;
        let number = u32::try_from(number).ok().filter(|&n| n > 0).ok_or_else(bad_ref)?;
        let generation = u32::try_from(generation).map_err(|_| bad_ref())?;
        items.truncate(items.len() - 2);
        Ok(doc.reference(ObjGen::new(number, generation)))
    }

    /// Next top-level object with its offset and length.
    pub fn next_object(&mut self) -> Option<Result<(Object, usize, usize)>> {
        loop {
            let token = match self.lexer.next_token() {
                Some(Ok(token)) => token,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    if let Some(frame) = self.context.last() {
                        let (offset, what) = match frame {
                            Frame::Array { offset, .. } => (*offset, "array"),
                            Frame::Dict { offset, .. } => (*offset, "dictionary"),
                        };
                        return Some(Err(PdfError::malformed(
                            offset,
                            format!("unterminated {what}"),
                        )));
                    }
                    return None;
                }
            };
            let end = token.offset + token.length;

            let (obj, offset) = match token.kind {
                ContentToken::ArrayStart => {
                    let frame = Frame::Array {
                        offset: token.offset,
                        items: Vec::new(),
                    };
                    if let Err(e) = self.start_context(frame) {
                        return Some(Err(e));
                    }
                    continue;
                }
                ContentToken::DictStart => {
                    let frame = Frame::Dict {
                        offset: token.offset,
                        items: Vec::new(),
                    };
                    if let Err(e) = self.start_context(frame) {
                        return Some(Err(e));
                    }
                    continue;
                }
                ContentToken::ArrayEnd => match self.end_array(&token) {
                    Ok(built) => built,
                    Err(e) => return Some(Err(e)),
                },
                ContentToken::DictEnd => match self.end_dict(&token) {
                    Ok(built) => built,
                    Err(e) => return Some(Err(e)),
                },
                ContentToken::Operator(ref op) if !self.context.is_empty() => {
                    match (op.as_str(), self.resolver) {
                        ("R", Some(doc)) => match self.resolve_reference(doc, &token) {
                            Ok(reference) => (reference, token.offset),
                            Err(e) => return Some(Err(e)),
                        },
                        _ => {
                            return Some(Err(PdfError::malformed(
                                token.offset,
                                format!("operator {op} inside array or dictionary"),
                            )));
                        }
                    }
                }
                ContentToken::BeginInlineImage
                | ContentToken::InlineImageData(_)
                | ContentToken::EndInlineImage
                    if !self.context.is_empty() =>
                {
                    return Some(Err(PdfError::malformed(
                        token.offset,
                        "inline image inside array or dictionary",
                    )));
                }
                kind => (scalar(kind), token.offset),
            };

            match self.context.last_mut() {
                Some(frame) => frame.items().push(obj),
                None => return Some(Ok((obj, offset, end - offset))),
            }
        }
    }
}

fn scalar(kind: ContentToken) -> Object {
    match kind {
        ContentToken::Boolean(b) => Object::boolean(b),
        ContentToken::Null => Object::null(),
        ContentToken::Integer(n) => Object::integer(n),
        ContentToken::Real(r) => Object::from(r),
        ContentToken::String(s) => Object::from(s),
        ContentToken::Name(n) => Object::from(n),
        ContentToken::Operator(op) => Object::operator(&op),
        ContentToken::BeginInlineImage => Object::operator("BI"),
        ContentToken::InlineImageData(data) => Object::inline_image(data),
        ContentToken::EndInlineImage => Object::operator("EI"),
        ContentToken::ArrayStart
        | ContentToken::ArrayEnd
        | ContentToken::DictStart
        | ContentToken::DictEnd => unreachable!("delimiters are handled by the assembler"),
    }
}

impl Iterator for ObjectAssembler<'_> {
    type Item = Result<(Object, usize, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_object()
    }
}

/// Parse `data` and hand every top-level object to `callbacks`.
pub fn parse_content_with<C>(data: &[u8], callbacks: &mut C) -> Result<()>
where
    C: ParserCallbacks + ?Sized,
{
    parse_content_with_options(data, &ParseOptions::default(), callbacks)
}

pub fn parse_content_with_options<C>(
    data: &[u8],
    options: &ParseOptions,
    callbacks: &mut C,
) -> Result<()>
where
    C: ParserCallbacks + ?Sized,
{
    let mut assembler = ObjectAssembler::new(data, options.max_depth);
    while let Some(item) = assembler.next_object() {
        let (obj, offset, length) = item?;
        callbacks.on_object(obj, offset, length)?;
    }
    callbacks.on_eof()
}

/// Parse exactly one object. With a document, `n g R` becomes a
/// reference into it.
pub(crate) fn parse_single_object(
    data: &[u8],
    doc: Option<&Document>,
    max_depth: usize,
) -> Result<Object> {
    let mut assembler = ObjectAssembler::new(data, max_depth);
    if let Some(doc) = doc {
        assembler = assembler.with_resolver(doc);
    }
    let objects = assembler.collect::<Result<Vec<_>>>()?;

    match objects.as_slice() {
        [] => Err(PdfError::malformed(0, "no object found")),
        [(obj, _, _)] if !obj.is_operator() => Ok(obj.clone()),
        [(number, offset, _), (generation, _, _), (op, _, _)]
            if doc.is_some() && op.eq_operator("R") =>
        {
            let bad_ref = || PdfError::malformed(*offset, "R must follow two non-negative integers");
            let number = u32::try_from(number.as_int().map_err(|_| bad_ref())?)
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(bad_ref)?;
            let generation =
                u32::try_from(generation.as_int().map_err(|_| bad_ref())?).map_err(|_| bad_ref())?;
            match doc {
                Some(doc) => Ok(doc.reference(ObjGen::new(number, generation))),
                None => Err(bad_ref()),
            }
        }
        [(obj, offset, _)] => Err(PdfError::malformed(
            *offset,
            format!("unexpected operator {}", obj.as_text().unwrap_or_default()),
        )),
        [_, (_, offset, _), ..] => Err(PdfError::malformed(*offset, "trailing data after object")),
    }
}

impl Object {
    /// Parse one object from PDF syntax. References (`n g R`) are not
    /// allowed; use [`Document::parse_object`] for those.
    pub fn parse(data: &[u8]) -> Result<Object> {
        parse_single_object(data, None, crate::options::DEFAULT_MAX_DEPTH)
    }

    pub(crate) fn eq_operator(&self, op: &str) -> bool {
        self.with_value(|v| matches!(v, crate::model::objects::Value::Operator(o) if o == op))
    }
}
