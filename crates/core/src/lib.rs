//! quire - an in-memory PDF object model and content stream parser.
//!
//! Objects are handles: direct objects carry their value, indirect objects
//! point into the [`Document`] that owns them. Content streams are
//! tokenized, assembled into objects and grouped into [`Instruction`]s.
//!
//! ```
//! use quire_core::{Object, ParseOptions, parse_content_bytes};
//!
//! let parsed = parse_content_bytes(b"1 0 0 rg /F1 12 Tf", &ParseOptions::default()).unwrap();
//! assert_eq!(parsed.instructions.len(), 2);
//! assert_eq!(parsed.instructions[1].operator(), Object::operator("Tf"));
//! ```

pub mod codec;
pub mod error;
pub mod model;
pub mod options;
pub mod parser;

pub use codec::{DecodeLevel, FilterDecoder, StreamDecoder};
pub use error::{PdfError, Result};
pub use model::{
    Decimal, Dictionary, Document, InlineImage, Name, ObjGen, Object, ObjectType, PdfString, Real,
    to_object, to_object_with,
};
pub use options::{EncodeOptions, ParseOptions};
pub use parser::{
    Instruction, ParsedContent, ParserCallbacks, parse_content_bytes,
    parse_content_stream, parse_content_with, unparse_content_stream,
};
