//! PDF object model.
//!
//! - `objects`: the [`Object`] handle and its value types
//! - `document`: the arena that owns indirect objects
//! - `container`: dictionary and array access
//! - `equality`: structural equality and hashing
//! - `stream`: stream payload access
//! - `encode`: host values to objects
//! - `unparse`, `json`: serialization

pub mod container;
pub mod decimal;
pub mod document;
pub mod encode;
pub mod equality;
pub mod json;
pub mod objects;
pub mod stream;
pub mod text;
pub mod unparse;

pub use decimal::Decimal;
pub use document::Document;
pub use encode::{to_object, to_object_with};
pub use json::{AsciiFormatter, write_json};
pub use objects::{Dictionary, InlineImage, ObjGen, Object, ObjectType, Real, Stream, Value};
pub use text::{Name, PdfString};
