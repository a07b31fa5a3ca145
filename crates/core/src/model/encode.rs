//! Host value to object conversion.
//!
//! Any `Serialize` value converts into an [`Object`]:
//!
//! - `bool` -> Boolean, integers -> Integer, [`Decimal`] -> Real
//! - `f32`/`f64` -> Real, rounded to `decimal_precision` places
//! - `&str`/`String` -> String (PDFDocEncoding, else UTF-16BE)
//! - byte buffers -> String holding the raw bytes
//! - sequences and tuples -> Array
//! - maps with `/Name` keys -> Dictionary; struct fields get a `/` prefix
//! - `None`/`()` -> Null; unit enum variants -> Name
//!
//! ```
//! use quire_core::model::encode::to_object;
//!
//! let obj = to_object(&vec![1, 2, 3]).unwrap();
//! assert_eq!(obj.len().unwrap(), 3);
//! ```

use super::container::validate_key;
use super::decimal::Decimal;
use super::objects::{Dictionary, Object, Real};
use super::text::{Name, PdfString};
use crate::error::{PdfError, Result};
use crate::options::EncodeOptions;
use serde::{Serialize, ser};

/// Newtype name that carries a [`Decimal`]'s text through serde.
pub(crate) const DECIMAL_TOKEN: &str = "$quire::Decimal";

impl Serialize for Decimal {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(DECIMAL_TOKEN, &self.to_string())
    }
}

/// Convert a host value with default options.
pub fn to_object<T: Serialize + ?Sized>(value: &T) -> Result<Object> {
    to_object_with(value, EncodeOptions::default())
}

pub fn to_object_with<T: Serialize + ?Sized>(value: &T, options: EncodeOptions) -> Result<Object> {
    value.serialize(ObjectSerializer { options, depth: 0 })
}

/// Serializer whose output is an [`Object`].
#[derive(Debug, Clone, Copy)]
pub struct ObjectSerializer {
    options: EncodeOptions,
    depth: usize,
}

impl ObjectSerializer {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options, depth: 0 }
    }

    fn nested(self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.options.max_depth {
            return Err(PdfError::StructureTooDeep {
                limit: self.options.max_depth,
            });
        }
        Ok(Self { depth, ..self })
    }

    fn unsupported(what: &'static str) -> PdfError {
        PdfError::TypeMismatch {
            expected: "encodable value",
            got: what,
        }
    }
}

impl ser::Serializer for ObjectSerializer {
    type Ok = Object;
    type Error = PdfError;

    type SerializeSeq = SerializeArray;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeArray;
    type SerializeTupleVariant = ser::Impossible<Object, PdfError>;
    type SerializeMap = SerializeDict;
    type SerializeStruct = SerializeDict;
    type SerializeStructVariant = ser::Impossible<Object, PdfError>;

    fn serialize_bool(self, v: bool) -> Result<Object> {
        Ok(Object::boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Object> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Object> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Object> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Object> {
        Ok(Object::integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Object> {
        i64::try_from(v)
            .map(Object::integer)
            .map_err(|_| PdfError::InvalidValue(format!("integer {v} does not fit in 64 bits")))
    }

    fn serialize_u8(self, v: u8) -> Result<Object> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Object> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Object> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Object> {
        self.serialize_i128(v as i128)
    }

    fn serialize_u128(self, v: u128) -> Result<Object> {
        i64::try_from(v)
            .map(Object::integer)
            .map_err(|_| PdfError::InvalidValue(format!("integer {v} does not fit in 64 bits")))
    }

    fn serialize_f32(self, v: f32) -> Result<Object> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Object> {
        Ok(Object::from(Real::from_f64(v, self.options.decimal_precision)?))
    }

    fn serialize_char(self, v: char) -> Result<Object> {
        let mut buf = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<Object> {
        Ok(Object::text_string(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Object> {
        Ok(Object::from(PdfString::from_bytes(v)))
    }

    fn serialize_none(self) -> Result<Object> {
        Ok(Object::null())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Object>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Object> {
        Ok(Object::null())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Object> {
        Ok(Object::null())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Object> {
        let name = if variant.starts_with('/') {
            Name::new(variant)?
        } else {
            Name::new(&format!("/{variant}"))?
        };
        Ok(Object::from(name))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Object>
    where
        T: ?Sized + Serialize,
    {
        if name == DECIMAL_TOKEN {
            let text = value.serialize(self)?.as_text()?;
            return Ok(Object::from(Real::parse(&text)?));
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Object>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::unsupported("newtype variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray> {
        Ok(SerializeArray {
            items: Vec::with_capacity(len.unwrap_or(0)),
            ser: self.nested()?,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeArray> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::unsupported("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeDict> {
        Ok(SerializeDict {
            dict: Dictionary::new(),
            key: None,
            ser: self.nested()?,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeDict> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::unsupported("struct variant"))
    }
}

pub struct SerializeArray {
    items: Vec<Object>,
    ser: ObjectSerializer,
}

impl ser::SerializeSeq for SerializeArray {
    type Ok = Object;
    type Error = PdfError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Object> {
        Ok(Object::array(self.items))
    }
}

impl ser::SerializeTuple for SerializeArray {
    type Ok = Object;
    type Error = PdfError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Object> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeArray {
    type Ok = Object;
    type Error = PdfError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Object> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeDict {
    dict: Dictionary,
    key: Option<Name>,
    ser: ObjectSerializer,
}

impl SerializeDict {
    /// Null means "absent" in a dictionary, so null entries are skipped.
    fn insert(&mut self, key: Name, value: Object) {
        if !value.is_null() {
            self.dict.insert(key, value);
        }
    }
}

impl ser::SerializeMap for SerializeDict {
    type Ok = Object;
    type Error = PdfError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(self.ser)?;
        let name = if key.is_name() {
            key.as_name()?
        } else {
            let text = key
                .as_pdf_string()
                .map_err(|_| {
                    PdfError::InvalidValue(format!(
                        "dictionary keys must be names, not {}",
                        key.type_name()
                    ))
                })?
                .to_text();
            validate_key(&text)?
        };
        self.key = Some(name);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.key.take().ok_or_else(|| {
            PdfError::InvalidValue("serialize_value called without serialize_key".into())
        })?;
        let value = value.serialize(self.ser)?;
        self.insert(key, value);
        Ok(())
    }

    fn end(self) -> Result<Object> {
        Ok(Object::dictionary(self.dict))
    }
}

impl ser::SerializeStruct for SerializeDict {
    type Ok = Object;
    type Error = PdfError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = if key.starts_with('/') {
            validate_key(key)?
        } else {
            validate_key(&format!("/{key}"))?
        };
        let value = value.serialize(self.ser)?;
        self.insert(key, value);
        Ok(())
    }

    fn end(self) -> Result<Object> {
        Ok(Object::dictionary(self.dict))
    }
}
