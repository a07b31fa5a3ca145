//! Content stream parsing.
//!
//! - `lexer`: tokenizer with byte offsets
//! - `content`: assembles tokens into objects, drives [`ParserCallbacks`]
//! - `grouper`: groups objects into instructions

pub mod content;
pub mod grouper;
pub mod lexer;

pub use content::{
    ObjectAssembler, ParserCallbacks, parse_content_with, parse_content_with_options,
};
pub use grouper::{
    INLINE_IMAGE_OPERATOR, Instruction, OperandGrouper, ParsedContent,
    parse_content_bytes, parse_content_stream, unparse_content_stream,
};
pub use lexer::{ContentLexer, ContentToken, Token};
