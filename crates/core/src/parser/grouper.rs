//! Grouping of content stream objects into instructions.
//!
//! [`OperandGrouper`] is a [`ParserCallbacks`] consumer: operands pile up
//! until an operator closes them into an [`Instruction`]. Everything
//! between `BI` and `EI` is collected into a single inline image
//! instruction.

use super::content::{ParserCallbacks, parse_content_with_options};
use crate::error::{PdfError, Result};
use crate::model::objects::{InlineImage, Object, ObjectType, Value};
use crate::model::stream::DecodeLevel;
use crate::options::ParseOptions;
use bytes::Bytes;
use std::fmt;

/// Operator reported for inline image instructions.
pub const INLINE_IMAGE_OPERATOR: &str = "INLINE IMAGE";

/// One grouped unit of a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Operation { operands: Vec<Object>, operator: Object },
    InlineImage(InlineImage),
}

impl Instruction {
    /// Build an operation, checking that `operator` is an Operator.
    pub fn new(operands: Vec<Object>, operator: Object) -> Result<Self> {
        if !operator.is_operator() {
            return Err(PdfError::TypeMismatch {
                expected: "operator",
                got: operator.type_name(),
            });
        }
        Ok(Instruction::Operation { operands, operator })
    }

    /// The operator; `INLINE IMAGE` for inline images.
    pub fn operator(&self) -> Object {
        match self {
            Instruction::Operation { operator, .. } => operator.clone(),
            Instruction::InlineImage(_) => Object::operator(INLINE_IMAGE_OPERATOR),
        }
    }

    /// Operands; an inline image is the sole operand of its instruction,
    /// carrying both metadata and payload.
    pub fn operands(&self) -> Vec<Object> {
        match self {
            Instruction::Operation { operands, .. } => operands.clone(),
            Instruction::InlineImage(image) => vec![Object::from(image.clone())],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = unparse_instruction(self).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

/// Result of grouping a whole content stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedContent {
    pub instructions: Vec<Instruction>,
    /// Non-fatal problems found while grouping, joined into one message.
    pub warning: Option<String>,
}

#[derive(Debug)]
enum State {
    Normal,
    CollectingInlineImage {
        metadata: Vec<Object>,
        data: Option<Bytes>,
    },
}

/// Groups operands with their operators.
///
/// Operators outside the whitelist are dropped together with their
/// operands. If any dropped operand was an array or dictionary a warning
/// is reported once parsing ends.
pub struct OperandGrouper<'o> {
    options: &'o ParseOptions,
    state: State,
    operands: Vec<Object>,
    instructions: Vec<Instruction>,
    dropped_composites: usize,
    warnings: Vec<String>,
    end: usize,
}

fn is_composite(obj: &Object) -> bool {
    obj.with_value(|v| matches!(v, Value::Array(_) | Value::Dictionary(_)))
}

impl<'o> OperandGrouper<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            state: State::Normal,
            operands: Vec::new(),
            instructions: Vec::new(),
            dropped_composites: 0,
            warnings: Vec::new(),
            end: 0,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Joined warning text, if anything was reported.
    pub fn warning(&self) -> Option<String> {
        (!self.warnings.is_empty()).then(|| self.warnings.join("; "))
    }

    pub fn finish(self) -> ParsedContent {
        let warning = self.warning();
        ParsedContent {
            instructions: self.instructions,
            warning,
        }
    }

    fn handle_operator(&mut self, op: &str, operator: Object, offset: usize) -> Result<()> {
        if op == "BI" {
            if !self.operands.is_empty() {
                tracing::debug!(
                    offset,
                    count = self.operands.len(),
                    "discarding operands before inline image"
                );
                self.operands.clear();
            }
            tracing::debug!(offset, "begin inline image");
            self.state = State::CollectingInlineImage {
                metadata: Vec::new(),
                data: None,
            };
            return Ok(());
        }

        let operands = std::mem::take(&mut self.operands);
        if self.options.accepts(op) {
            self.instructions
                .push(Instruction::Operation { operands, operator });
        } else {
            if operands.iter().any(is_composite) {
                self.dropped_composites += 1;
            }
            tracing::debug!(offset, operator = op, "dropped operator outside whitelist");
        }
        Ok(())
    }

    fn collect_inline(&mut self, obj: Object, offset: usize) -> Result<()> {
        let State::CollectingInlineImage { metadata, data } = &mut self.state else {
            unreachable!("collect_inline outside an inline image");
        };

        if let Ok(op) = obj.as_operator() {
            if op != "EI" {
                return Err(PdfError::malformed(
                    offset,
                    format!("operator {op} inside inline image"),
                ));
            }
            let Some(data) = data.take() else {
                return Err(PdfError::malformed(offset, "inline image has no ID data"));
            };
            let image = InlineImage::new(std::mem::take(metadata), data);
            self.state = State::Normal;
            tracing::debug!(offset, "end inline image");
            if self.options.accepts("BI") || self.options.accepts(INLINE_IMAGE_OPERATOR) {
                self.instructions.push(Instruction::InlineImage(image));
            }
            return Ok(());
        }

        if obj.type_code() == ObjectType::InlineImage {
            if data.is_some() {
                return Err(PdfError::malformed(offset, "inline image has two ID sections"));
            }
            *data = Some(obj.inline_image_raw_bytes()?);
        } else if data.is_some() {
            return Err(PdfError::malformed(offset, "object after inline image data"));
        } else {
            metadata.push(obj);
        }
        Ok(())
    }
}

impl ParserCallbacks for OperandGrouper<'_> {
    fn on_object(&mut self, obj: Object, offset: usize, length: usize) -> Result<()> {
        self.end = offset + length;
        if matches!(self.state, State::CollectingInlineImage { .. }) {
            return self.collect_inline(obj, offset);
        }
        match obj.as_operator() {
            Ok(op) => self.handle_operator(&op, obj, offset),
            Err(_) if obj.type_code() == ObjectType::InlineImage => Err(
                PdfError::malformed(offset, "inline image data outside BI/EI"),
            ),
            Err(_) => {
                self.operands.push(obj);
                Ok(())
            }
        }
    }

    fn on_eof(&mut self) -> Result<()> {
        if matches!(self.state, State::CollectingInlineImage { .. }) {
            return Err(PdfError::malformed(self.end, "truncated inline image"));
        }
        if self.dropped_composites > 0 {
            self.warnings.push(format!(
                "{} operators outside the whitelist were dropped together with array or \
                 dictionary operands",
                self.dropped_composites
            ));
        }
        if !self.operands.is_empty() {
            self.warnings.push(format!(
                "unexpected end of stream: {} operands without an operator",
                self.operands.len()
            ));
        }
        if let Some(warning) = self.warning() {
            tracing::warn!("{warning}");
        }
        Ok(())
    }
}

/// Group raw content stream bytes.
pub fn parse_content_bytes(data: &[u8], options: &ParseOptions) -> Result<ParsedContent> {
    let mut grouper = OperandGrouper::new(options);
    parse_content_with_options(data, options, &mut grouper)?;
    Ok(grouper.finish())
}

fn content_bytes(obj: &Object) -> Result<Vec<u8>> {
    if obj.is_stream() {
        return obj.read_bytes(DecodeLevel::Generalized);
    }
    if obj.is_array() {
        let mut out = Vec::new();
        for (i, part) in obj.as_list()?.iter().enumerate() {
            if !part.is_stream() {
                return Err(PdfError::TypeMismatch {
                    expected: "stream",
                    got: part.type_name(),
                });
            }
            if i > 0 {
                out.push(b'\n');
            }
            out.extend(part.read_bytes(DecodeLevel::Generalized)?);
        }
        return Ok(out);
    }
    if obj.is_dictionary() && obj.has_key("/Contents")? {
        return content_bytes(&obj.get_key("/Contents")?);
    }
    Err(PdfError::TypeMismatch {
        expected: "stream, array of streams or page",
        got: obj.type_name(),
    })
}

/// Group the content of a stream, an array of streams (joined with
/// newlines) or a page dictionary's `/Contents`.
pub fn parse_content_stream(obj: &Object, options: &ParseOptions) -> Result<ParsedContent> {
    let data = content_bytes(obj)?;
    parse_content_bytes(&data, options)
}

fn unparse_instruction(instruction: &Instruction) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match instruction {
        Instruction::Operation { operands, operator } => {
            for operand in operands {
                out.extend(operand.unparse_operand()?);
                out.push(b' ');
            }
            out.extend(operator.as_operator()?.as_bytes());
        }
        Instruction::InlineImage(image) => {
            out.extend_from_slice(b"BI\n");
            for (i, item) in image.metadata().iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                out.extend(item.unparse_operand()?);
            }
            out.extend_from_slice(b"\nID\n");
            out.extend_from_slice(image.raw_bytes());
            out.extend_from_slice(b"\nEI");
        }
    }
    Ok(out)
}

/// Serialize instructions back into content stream bytes, one per line.
///
/// Errors carry the index of the failing instruction as their position.
pub fn unparse_content_stream(instructions: &[Instruction]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (i, instruction) in instructions.iter().enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        let bytes = unparse_instruction(instruction)
            .map_err(|e| PdfError::malformed(i, format!("instruction {i}: {e}")))?;
        out.extend(bytes);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_requires_operator() {
        assert!(Instruction::new(vec![], Object::integer(1)).is_err());
        let ins = Instruction::new(vec![Object::integer(1)], Object::operator("w")).unwrap();
        assert_eq!(ins.to_string(), "1 w");
    }

    #[test]
    fn test_inline_image_instruction_operand() {
        let image = InlineImage::new(
            vec![Object::name("/W").unwrap(), Object::integer(4)],
            &b"\xff"[..],
        );
        let ins = Instruction::InlineImage(image.clone());
        let operands = ins.operands();
        assert_eq!(operands.len(), 1);
        assert_eq!(operands[0].as_inline_image().unwrap(), image);
        assert_eq!(ins.to_string(), "BI\n/W 4\nID\n\u{fffd}\nEI");
    }
}
