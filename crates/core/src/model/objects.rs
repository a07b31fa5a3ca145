//! PDF object types.
//!
//! An [`Object`] is either *direct* (it carries its [`Value`] inline) or
//! *indirect* (a lightweight handle naming an entry in a [`Document`]'s
//! object arena by [`ObjGen`]). Indirect handles alias: mutating through
//! one is visible through every other handle to the same objgen.

use super::decimal::Decimal;
use super::text::{Name, PdfString};
use super::document::{Document, DocumentInner};
use crate::error::{PdfError, Result};
use bytes::Bytes;
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Name -> object mapping. Key order carries no meaning.
pub type Dictionary = BTreeMap<Name, Object>;

/// The reserved stream dictionary key that callers may not touch.
pub const LENGTH_KEY: &str = "/Length";

/// Object-number / generation-number pair of an indirect object.
///
/// Direct objects report `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjGen {
    pub number: u32,
    pub generation: u32,
}

impl ObjGen {
    pub const DIRECT: ObjGen = ObjGen {
        number: 0,
        generation: 0,
    };

    pub const fn new(number: u32, generation: u32) -> Self {
        Self { number, generation }
    }

    pub const fn is_direct(self) -> bool {
        self.number == 0
    }
}

impl fmt::Display for ObjGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.generation)
    }
}

impl From<(u32, u32)> for ObjGen {
    fn from((number, generation): (u32, u32)) -> Self {
        Self::new(number, generation)
    }
}

/// Type tag of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Uninitialized,
    Reserved,
    Null,
    Boolean,
    Integer,
    Real,
    String,
    Name,
    Array,
    Dictionary,
    Stream,
    Operator,
    InlineImage,
}

impl ObjectType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Reserved => "reserved",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::String => "string",
            Self::Name => "name",
            Self::Array => "array",
            Self::Dictionary => "dictionary",
            Self::Stream => "stream",
            Self::Operator => "operator",
            Self::InlineImage => "inlineimage",
        }
    }

    /// Boolean, Integer and Real compare with each other numerically.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Boolean | Self::Integer | Self::Real)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A PDF real: the exact decimal value plus the text it was written as.
#[derive(Debug, Clone)]
pub struct Real {
    text: SmolStr,
    value: Decimal,
}

impl Real {
    /// Parse PDF real text, keeping the text for unparsing.
    pub fn parse(text: &str) -> Result<Self> {
        let value = Decimal::parse(text)?;
        Ok(Self {
            text: SmolStr::new(text),
            value,
        })
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self {
            text: SmolStr::new(value.to_string()),
            value,
        }
    }

    /// Convert a float, rounded to `places` fractional digits.
    pub fn from_f64(value: f64, places: u32) -> Result<Self> {
        Ok(Self::from_decimal(Decimal::from_f64(value, places)?))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Stream dictionary plus raw payload. Streams only live in a document.
#[derive(Debug, Clone)]
pub struct Stream {
    pub(crate) dict: Dictionary,
    pub(crate) data: Bytes,
}

impl Stream {
    pub(crate) fn new(mut dict: Dictionary, data: Bytes) -> Self {
        dict.insert(
            Name::from_lexed(&LENGTH_KEY.as_bytes()[1..]),
            Object::integer(data.len() as i64),
        );
        Self { dict, data }
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Payload as stored, with all filters still applied.
    pub fn raw_data(&self) -> &Bytes {
        &self.data
    }
}

/// An image embedded in a content stream: the key/value objects written
/// between `BI` and `ID`, and the payload between `ID` and `EI`.
///
/// The payload object reported by the parser callbacks has no metadata;
/// the operand grouper attaches it.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    metadata: Vec<Object>,
    data: Bytes,
}

impl InlineImage {
    pub fn new(metadata: Vec<Object>, data: impl Into<Bytes>) -> Self {
        Self {
            metadata,
            data: data.into(),
        }
    }

    /// Key/value objects in source order, abbreviations kept.
    pub fn metadata(&self) -> &[Object] {
        &self.metadata
    }

    pub fn raw_bytes(&self) -> &Bytes {
        &self.data
    }

    /// Metadata as a dictionary. Keys must be names.
    pub fn dictionary(&self) -> Result<Dictionary> {
        if self.metadata.len() % 2 != 0 {
            return Err(PdfError::InvalidValue(
                "inline image metadata has a key without a value".into(),
            ));
        }
        let mut dict = Dictionary::new();
        for pair in self.metadata.chunks_exact(2) {
            let value = &pair[1];
            if !value.is_null() {
                dict.insert(pair[0].as_name()?, value.clone());
            }
        }
        Ok(dict)
    }
}

/// The value carried by an object, one variant per object kind.
///
/// Clone and drop walk nested direct arrays and dictionaries with a heap
/// stack, so arbitrarily deep direct nesting cannot exhaust the call stack.
#[derive(Debug)]
pub enum Value {
    Uninitialized,
    Reserved,
    Null,
    Boolean(bool),
    Integer(i64),
    Real(Real),
    String(PdfString),
    Name(Name),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Stream),
    Operator(SmolStr),
    InlineImage(InlineImage),
}

impl Value {
    pub const fn type_code(&self) -> ObjectType {
        match self {
            Self::Uninitialized => ObjectType::Uninitialized,
            Self::Reserved => ObjectType::Reserved,
            Self::Null => ObjectType::Null,
            Self::Boolean(_) => ObjectType::Boolean,
            Self::Integer(_) => ObjectType::Integer,
            Self::Real(_) => ObjectType::Real,
            Self::String(_) => ObjectType::String,
            Self::Name(_) => ObjectType::Name,
            Self::Array(_) => ObjectType::Array,
            Self::Dictionary(_) => ObjectType::Dictionary,
            Self::Stream(_) => ObjectType::Stream,
            Self::Operator(_) => ObjectType::Operator,
            Self::InlineImage(_) => ObjectType::InlineImage,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        self.type_code().name()
    }

    /// Exact numeric value of a Boolean, Integer or Real.
    pub fn decimal(&self) -> Option<Decimal> {
        match self {
            Self::Boolean(b) => Some(Decimal::from(*b)),
            Self::Integer(n) => Some(Decimal::from(*n)),
            Self::Real(r) => Some(r.value().clone()),
            _ => None,
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> PdfError {
        PdfError::TypeMismatch {
            expected,
            got: self.type_name(),
        }
    }

    /// Copy of this value with any direct children left out.
    fn clone_shell(&self) -> Self {
        match self {
            Self::Uninitialized => Self::Uninitialized,
            Self::Reserved => Self::Reserved,
            Self::Null => Self::Null,
            Self::Boolean(b) => Self::Boolean(*b),
            Self::Integer(n) => Self::Integer(*n),
            Self::Real(r) => Self::Real(r.clone()),
            Self::String(s) => Self::String(s.clone()),
            Self::Name(n) => Self::Name(n.clone()),
            Self::Array(items) => Self::Array(Vec::with_capacity(items.len())),
            Self::Dictionary(_) => Self::Dictionary(Dictionary::new()),
            Self::Stream(stream) => Self::Stream(Stream {
                dict: Dictionary::new(),
                data: stream.data.clone(),
            }),
            Self::Operator(op) => Self::Operator(op.clone()),
            Self::InlineImage(image) => Self::InlineImage(InlineImage {
                metadata: Vec::with_capacity(image.metadata.len()),
                data: image.data.clone(),
            }),
        }
    }

    fn children(&self) -> Option<Children<'_>> {
        match self {
            Self::Array(items) | Self::InlineImage(InlineImage { metadata: items, .. })
                if !items.is_empty() =>
            {
                Some(Children::Items(items.iter()))
            }
            Self::Dictionary(dict) | Self::Stream(Stream { dict, .. }) if !dict.is_empty() => {
                Some(Children::Entries(dict.iter()))
            }
            _ => None,
        }
    }

    fn adopt(&mut self, key: Option<&Name>, child: Object) {
        match (self, key) {
            (Self::Array(items) | Self::InlineImage(InlineImage { metadata: items, .. }), _) => {
                items.push(child)
            }
            (Self::Dictionary(dict) | Self::Stream(Stream { dict, .. }), Some(key)) => {
                dict.insert(key.clone(), child);
            }
            _ => debug_assert!(false, "child adopted by a scalar"),
        }
    }

    /// Move direct children out, leaving this value's containers empty.
    fn take_children(&mut self, out: &mut Vec<Object>) {
        match self {
            Self::Array(items) | Self::InlineImage(InlineImage { metadata: items, .. }) => {
                out.append(items)
            }
            Self::Dictionary(dict) | Self::Stream(Stream { dict, .. }) => {
                out.extend(std::mem::take(dict).into_values());
            }
            _ => {}
        }
    }
}

enum Children<'a> {
    Items(std::slice::Iter<'a, Object>),
    Entries(std::collections::btree_map::Iter<'a, Name, Object>),
}

impl<'a> Iterator for Children<'a> {
    type Item = (Option<&'a Name>, &'a Object);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Items(iter) => iter.next().map(|obj| (None, obj)),
            Self::Entries(iter) => iter.next().map(|(key, obj)| (Some(key), obj)),
        }
    }
}

struct CloneFrame<'a> {
    children: Children<'a>,
    key: Option<&'a Name>,
    value: Value,
}

impl Clone for Value {
    fn clone(&self) -> Self {
        let Some(children) = self.children() else {
            return self.clone_shell();
        };
        let mut stack = vec![CloneFrame {
            children,
            key: None,
            value: self.clone_shell(),
        }];
        while let Some(top) = stack.last_mut() {
            match top.children.next() {
                Some((key, child)) => {
                    let nested = match &child.repr {
                        Repr::Direct(value) => value.children().map(|c| (c, value)),
                        Repr::Indirect(_) => None,
                    };
                    match nested {
                        Some((children, value)) => stack.push(CloneFrame {
                            children,
                            key,
                            value: value.clone_shell(),
                        }),
                        // Scalars, empty containers and references clone flat.
                        None => top.value.adopt(key, child.clone()),
                    }
                }
                None => {
                    let Some(done) = stack.pop() else { break };
                    match stack.last_mut() {
                        Some(parent) => parent.value.adopt(done.key, Object::from_value(done.value)),
                        None => return done.value,
                    }
                }
            }
        }
        unreachable!("clone stack always ends with the root frame")
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            if let Repr::Direct(value) = &mut child.repr {
                value.take_children(&mut pending);
            }
        }
    }
}

/// Handle to an indirect object: owning document plus objgen.
#[derive(Clone)]
pub(crate) struct IndirectRef {
    pub(crate) owner: Weak<DocumentInner>,
    pub(crate) objgen: ObjGen,
}

impl IndirectRef {
    pub(crate) fn same_owner(&self, other: &IndirectRef) -> bool {
        Weak::ptr_eq(&self.owner, &other.owner)
    }
}

#[derive(Clone)]
enum Repr {
    Direct(Value),
    Indirect(IndirectRef),
}

/// A PDF object: a direct value or a handle to an indirect object.
#[derive(Clone)]
pub struct Object {
    repr: Repr,
}

impl Object {
    pub(crate) fn from_value(value: Value) -> Self {
        Self {
            repr: Repr::Direct(value),
        }
    }

    pub(crate) fn indirect(owner: &Rc<DocumentInner>, objgen: ObjGen) -> Self {
        Self {
            repr: Repr::Indirect(IndirectRef {
                owner: Rc::downgrade(owner),
                objgen,
            }),
        }
    }

    pub fn null() -> Self {
        Self::from_value(Value::Null)
    }

    pub fn uninitialized() -> Self {
        Self::from_value(Value::Uninitialized)
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_value(Value::Boolean(value))
    }

    pub fn integer(value: i64) -> Self {
        Self::from_value(Value::Integer(value))
    }

    /// Real from decimal text such as `"1.50"`; the text is preserved.
    pub fn real(text: &str) -> Result<Self> {
        Ok(Self::from_value(Value::Real(Real::parse(text)?)))
    }

    pub fn real_from_decimal(value: Decimal) -> Self {
        Self::from_value(Value::Real(Real::from_decimal(value)))
    }

    /// String holding raw bytes.
    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_value(Value::String(PdfString::from_bytes(bytes)))
    }

    /// String encoding Unicode text (PDFDocEncoding or UTF-16BE).
    pub fn text_string(text: &str) -> Self {
        Self::from_value(Value::String(PdfString::from_text(text)))
    }

    pub fn name(text: &str) -> Result<Self> {
        Ok(Self::from_value(Value::Name(Name::new(text)?)))
    }

    pub fn operator(op: &str) -> Self {
        Self::from_value(Value::Operator(SmolStr::new(op)))
    }

    pub fn array(items: Vec<Object>) -> Self {
        Self::from_value(Value::Array(items))
    }

    pub fn dictionary(dict: Dictionary) -> Self {
        Self::from_value(Value::Dictionary(dict))
    }

    /// Dictionary from `("/Key", value)` pairs, validating every key.
    pub fn dictionary_from<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Object)>,
    {
        let mut dict = Dictionary::new();
        for (key, value) in pairs {
            let key = super::container::validate_key(key)?;
            if value.is_null() {
                return Err(PdfError::InvalidValue(format!(
                    "dictionary key {key} may not be set to null"
                )));
            }
            dict.insert(key, value);
        }
        Ok(Self::dictionary(dict))
    }

    /// InlineImage payload without metadata, as the parser reports it.
    pub fn inline_image(data: impl Into<Bytes>) -> Self {
        Self::from_value(Value::InlineImage(InlineImage::new(Vec::new(), data)))
    }

    /// Run `f` against the resolved value of this object.
    ///
    /// Indirect handles whose objgen is not allocated resolve to Null;
    /// handles whose document has been dropped resolve to Uninitialized.
    pub fn with_value<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        match &self.repr {
            Repr::Direct(value) => f(value),
            Repr::Indirect(r) => match r.owner.upgrade() {
                Some(doc) => {
                    let objects = doc.objects.borrow();
                    let result = match objects.get(&r.objgen) {
                        Some(value) => f(value),
                        None => f(&Value::Null),
                    };
                    result
                }
                None => f(&Value::Uninitialized),
            },
        }
    }

    /// Run `f` against the value for mutation. Indirect objects are
    /// mutated in place inside their document.
    pub(crate) fn with_value_mut<R>(
        &mut self,
        f: impl FnOnce(&mut Value) -> Result<R>,
    ) -> Result<R> {
        match &mut self.repr {
            Repr::Direct(value) => f(value),
            Repr::Indirect(r) => {
                let doc = r.owner.upgrade().ok_or_else(|| {
                    PdfError::InvalidValue(format!(
                        "object {} belongs to a document that no longer exists",
                        r.objgen
                    ))
                })?;
                let mut objects = doc.objects.try_borrow_mut().map_err(|_| {
                    PdfError::InvalidValue(format!(
                        "object {} cannot be modified while the document is being read",
                        r.objgen
                    ))
                })?;
                let result = match objects.get_mut(&r.objgen) {
                    Some(value) => f(value),
                    None => f(&mut Value::Null),
                };
                result
            }
        }
    }

    pub(crate) fn indirect_ref(&self) -> Option<&IndirectRef> {
        match &self.repr {
            Repr::Indirect(r) => Some(r),
            Repr::Direct(_) => None,
        }
    }

    pub(crate) fn direct_value_mut(&mut self) -> Option<&mut Value> {
        match &mut self.repr {
            Repr::Direct(value) => Some(value),
            Repr::Indirect(_) => None,
        }
    }

    // === Identity ===

    /// `(0, 0)` for direct objects.
    pub fn objgen(&self) -> ObjGen {
        match &self.repr {
            Repr::Indirect(r) => r.objgen,
            Repr::Direct(_) => ObjGen::DIRECT,
        }
    }

    pub fn is_indirect(&self) -> bool {
        matches!(self.repr, Repr::Indirect(_))
    }

    /// The owning document of an indirect object.
    pub fn owner(&self) -> Option<Document> {
        self.indirect_ref()
            .and_then(|r| r.owner.upgrade())
            .map(Document::from_inner)
    }

    pub fn is_owned_by(&self, doc: &Document) -> bool {
        self.indirect_ref()
            .is_some_and(|r| std::ptr::eq(r.owner.as_ptr(), Rc::as_ptr(doc.inner())))
    }

    /// True when both objects have the same owner, or both have none.
    pub fn same_owner_as(&self, other: &Object) -> bool {
        match (self.indirect_ref(), other.indirect_ref()) {
            (Some(a), Some(b)) => a.same_owner(b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Return an object owned by the same document as `other`.
    ///
    /// Objects already sharing the owner are returned as is; a direct
    /// object becomes a new indirect object of `other`'s document; an
    /// object from another document is copied in with
    /// [`Document::copy_foreign`].
    pub fn with_same_owner_as(&self, other: &Object) -> Result<Object> {
        if self.same_owner_as(other) {
            return Ok(self.clone());
        }
        let owner = other.owner().ok_or_else(|| {
            PdfError::InvalidValue(
                "with_same_owner_as() called for object that has no owner".into(),
            )
        })?;
        if !self.is_indirect() {
            return owner.make_indirect(self.clone());
        }
        owner.copy_foreign(self)
    }

    // === Type inspection ===

    pub fn type_code(&self) -> ObjectType {
        self.with_value(Value::type_code)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_code().name()
    }

    pub fn is_null(&self) -> bool {
        self.type_code() == ObjectType::Null
    }

    pub fn is_initialized(&self) -> bool {
        self.type_code() != ObjectType::Uninitialized
    }

    pub fn is_array(&self) -> bool {
        self.type_code() == ObjectType::Array
    }

    pub fn is_dictionary(&self) -> bool {
        self.type_code() == ObjectType::Dictionary
    }

    pub fn is_stream(&self) -> bool {
        self.type_code() == ObjectType::Stream
    }

    pub fn is_name(&self) -> bool {
        self.type_code() == ObjectType::Name
    }

    pub fn is_operator(&self) -> bool {
        self.type_code() == ObjectType::Operator
    }

    pub fn is_numeric(&self) -> bool {
        self.type_code().is_numeric()
    }

    // === Per-type readers ===

    pub fn as_bool(&self) -> Result<bool> {
        self.with_value(|v| match v {
            Value::Boolean(b) => Ok(*b),
            other => Err(other.mismatch("boolean")),
        })
    }

    pub fn as_int(&self) -> Result<i64> {
        self.with_value(|v| match v {
            Value::Integer(n) => Ok(*n),
            other => Err(other.mismatch("integer")),
        })
    }

    /// Exact numeric value of a Boolean, Integer or Real.
    pub fn as_decimal(&self) -> Result<Decimal> {
        self.with_value(|v| v.decimal().ok_or_else(|| v.mismatch("number")))
    }

    pub fn as_real(&self) -> Result<Real> {
        self.with_value(|v| match v {
            Value::Real(r) => Ok(r.clone()),
            other => Err(other.mismatch("real")),
        })
    }

    pub fn as_name(&self) -> Result<Name> {
        self.with_value(|v| match v {
            Value::Name(n) => Ok(n.clone()),
            other => Err(other.mismatch("name")),
        })
    }

    pub fn as_pdf_string(&self) -> Result<PdfString> {
        self.with_value(|v| match v {
            Value::String(s) => Ok(s.clone()),
            other => Err(other.mismatch("string")),
        })
    }

    pub fn as_operator(&self) -> Result<SmolStr> {
        self.with_value(|v| match v {
            Value::Operator(op) => Ok(op.clone()),
            other => Err(other.mismatch("operator")),
        })
    }

    /// Text of a Name, Operator or (decoded) String.
    pub fn as_text(&self) -> Result<String> {
        self.with_value(|v| match v {
            Value::Name(n) => Ok(n.to_text().into_owned()),
            Value::Operator(op) => Ok(op.to_string()),
            Value::String(s) => Ok(s.to_text()),
            other => Err(other.mismatch("name, operator or string")),
        })
    }

    /// Bytes of a Name, Operator or String; decoded data for a Stream.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.is_stream() {
            return self.read_bytes(super::stream::DecodeLevel::Generalized);
        }
        self.with_value(|v| match v {
            Value::Name(n) => Ok(n.as_bytes().to_vec()),
            Value::Operator(op) => Ok(op.as_bytes().to_vec()),
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(other.mismatch("name, operator, string or stream")),
        })
    }

    pub fn inline_image_raw_bytes(&self) -> Result<Bytes> {
        self.with_value(|v| match v {
            Value::InlineImage(image) => Ok(image.data.clone()),
            other => Err(other.mismatch("inlineimage")),
        })
    }

    pub fn as_inline_image(&self) -> Result<InlineImage> {
        self.with_value(|v| match v {
            Value::InlineImage(image) => Ok(image.clone()),
            other => Err(other.mismatch("inlineimage")),
        })
    }

    /// Compare a String against text (decoded) or a Name against its text.
    pub fn eq_str(&self, text: &str) -> bool {
        self.with_value(|v| match v {
            Value::String(s) => s.to_text() == text,
            Value::Name(n) => n.as_bytes() == text.as_bytes(),
            _ => false,
        })
    }

    /// Compare a String's raw bytes, or a Name's bytes.
    pub fn eq_bytes(&self, bytes: &[u8]) -> bool {
        self.with_value(|v| match v {
            Value::String(s) => s.as_bytes() == bytes,
            Value::Name(n) => n.as_bytes() == bytes,
            _ => false,
        })
    }

    /// Copy the top level into a new direct object.
    ///
    /// Indirect children stay references to the same objects.
    pub fn shallow_copy(&self) -> Result<Object> {
        self.with_value(|v| match v {
            Value::Stream(_) => Err(PdfError::TypeMismatch {
                expected: "non-stream object",
                got: "stream",
            }),
            other => Ok(Object::from_value(other.clone())),
        })
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Direct(value) => value.fmt(f),
            Repr::Indirect(r) => write!(f, "Indirect({} R)", r.objgen),
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::null()
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Self::integer(i64::from(value))
    }
}

impl From<Decimal> for Object {
    fn from(value: Decimal) -> Self {
        Self::real_from_decimal(value)
    }
}

impl From<Real> for Object {
    fn from(value: Real) -> Self {
        Self::from_value(Value::Real(value))
    }
}

impl From<Name> for Object {
    fn from(value: Name) -> Self {
        Self::from_value(Value::Name(value))
    }
}

impl From<PdfString> for Object {
    fn from(value: PdfString) -> Self {
        Self::from_value(Value::String(value))
    }
}

impl From<Vec<Object>> for Object {
    fn from(value: Vec<Object>) -> Self {
        Self::array(value)
    }
}

impl From<InlineImage> for Object {
    fn from(value: InlineImage) -> Self {
        Self::from_value(Value::InlineImage(value))
    }
}

impl From<Dictionary> for Object {
    fn from(value: Dictionary) -> Self {
        Self::dictionary(value)
    }
}
