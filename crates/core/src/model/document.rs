//! Document - owner of the indirect object arena.
//!
//! Indirect objects live in an insertion-ordered table keyed by
//! [`ObjGen`]. Handles hold a weak reference back to the table, so a
//! handle never keeps its document alive.

use super::objects::{Dictionary, IndirectRef, ObjGen, Object, Stream, Value};
use crate::codec::{FilterDecoder, StreamDecoder};
use crate::error::{PdfError, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use bytes::Bytes;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) struct DocumentInner {
    pub(crate) objects: RefCell<IndexMap<ObjGen, Value>>,
    next_number: Cell<u32>,
    decoder: Box<dyn StreamDecoder>,
}

/// An in-memory PDF document: allocates and owns indirect objects.
///
/// Cloning a `Document` clones the handle, not the objects.
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Document {
    /// Empty document using the built-in [`FilterDecoder`].
    pub fn new() -> Self {
        Self::with_decoder(FilterDecoder::default())
    }

    /// Empty document whose streams decode through `decoder`.
    pub fn with_decoder(decoder: impl StreamDecoder + 'static) -> Self {
        Self {
            inner: Rc::new(DocumentInner {
                objects: RefCell::new(IndexMap::new()),
                next_number: Cell::new(1),
                decoder: Box::new(decoder),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<DocumentInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Rc<DocumentInner> {
        &self.inner
    }

    pub(crate) fn decoder(&self) -> &dyn StreamDecoder {
        self.inner.decoder.as_ref()
    }

    /// Number of allocated indirect objects.
    pub fn object_count(&self) -> usize {
        self.inner.objects.borrow().len()
    }

    /// All allocated objgens, in allocation order.
    pub fn objgens(&self) -> Vec<ObjGen> {
        self.inner.objects.borrow().keys().copied().collect()
    }

    fn allocate(&self, value: Value) -> Result<ObjGen> {
        let number = self.inner.next_number.get();
        let next = number
            .checked_add(1)
            .ok_or_else(|| PdfError::InvalidValue("object numbers exhausted".into()))?;
        self.inner.next_number.set(next);

        let objgen = ObjGen::new(number, 0);
        self.inner
            .objects
            .try_borrow_mut()
            .map_err(|_| PdfError::InvalidValue("document is being read".into()))?
            .insert(objgen, value);
        Ok(objgen)
    }

    fn replace(&self, objgen: ObjGen, value: Value) -> Result<()> {
        self.inner
            .objects
            .try_borrow_mut()
            .map_err(|_| PdfError::InvalidValue("document is being read".into()))?
            .insert(objgen, value);
        Ok(())
    }

    /// Make `obj` an indirect object of this document.
    ///
    /// Objects already owned by this document are returned unchanged.
    pub fn make_indirect(&self, obj: Object) -> Result<Object> {
        if let Some(r) = obj.indirect_ref() {
            if std::ptr::eq(r.owner.as_ptr(), Rc::as_ptr(&self.inner)) {
                return Ok(obj);
            }
            return Err(PdfError::ForeignObject(format!(
                "object {} is owned by another document; use copy_foreign",
                r.objgen
            )));
        }
        let value = obj.with_value(Value::clone);
        if matches!(value, Value::Uninitialized | Value::Reserved) {
            return Err(PdfError::InvalidValue(format!(
                "cannot make {} object indirect",
                value.type_name()
            )));
        }
        let objgen = self.allocate(value)?;
        tracing::trace!(%objgen, "allocated indirect object");
        Ok(Object::indirect(&self.inner, objgen))
    }

    /// New stream holding `data`, with an empty dictionary apart from `/Length`.
    pub fn new_stream(&self, data: impl Into<Bytes>) -> Result<Object> {
        self.new_stream_with_dict(Dictionary::new(), data)
    }

    /// New stream with the given dictionary. `/Length` is set from `data`.
    pub fn new_stream_with_dict(&self, dict: Dictionary, data: impl Into<Bytes>) -> Result<Object> {
        let objgen = self.allocate(Value::Stream(Stream::new(dict, data.into())))?;
        Ok(Object::indirect(&self.inner, objgen))
    }

    /// Handle to the indirect object `objgen`.
    pub fn get_object(&self, objgen: impl Into<ObjGen>) -> Result<Object> {
        let objgen = objgen.into();
        if !self.inner.objects.borrow().contains_key(&objgen) {
            return Err(PdfError::KeyNotFound(format!("object {objgen}")));
        }
        Ok(Object::indirect(&self.inner, objgen))
    }

    /// Reference to `objgen` without checking that it exists. A missing
    /// object reads as null.
    pub(crate) fn reference(&self, objgen: ObjGen) -> Object {
        Object::indirect(&self.inner, objgen)
    }

    /// Parse one object from its PDF syntax, resolving `n g R` against
    /// this document.
    pub fn parse_object(&self, data: &[u8]) -> Result<Object> {
        crate::parser::content::parse_single_object(data, Some(self), DEFAULT_MAX_DEPTH)
    }

    /// Copy an indirect object, and everything it reaches, from another
    /// document into this one.
    ///
    /// Each reachable foreign object is copied exactly once, so shared
    /// references and cycles are preserved in the copy.
    pub fn copy_foreign(&self, obj: &Object) -> Result<Object> {
        let root = obj.indirect_ref().ok_or_else(|| {
            PdfError::ForeignObject("copy_foreign requires an indirect object".into())
        })?;
        if std::ptr::eq(root.owner.as_ptr(), Rc::as_ptr(&self.inner)) {
            return Err(PdfError::ForeignObject(format!(
                "object {} is already owned by this document",
                root.objgen
            )));
        }
        let source = root.owner.upgrade().ok_or_else(|| {
            PdfError::InvalidValue(format!(
                "object {} belongs to a document that no longer exists",
                root.objgen
            ))
        })?;

        let mut copy = ForeignCopy {
            dest: self,
            source: Rc::downgrade(&source),
            map: FxHashMap::default(),
            queue: Vec::new(),
        };
        let root_dest = copy.reserve(root.objgen)?;

        while let Some(src) = copy.queue.pop() {
            let mut value = source
                .objects
                .borrow()
                .get(&src)
                .cloned()
                .unwrap_or(Value::Null);
            copy.remap_value(&mut value, 0)?;
            let dest = copy.map[&src];
            self.replace(dest, value)?;
        }
        tracing::debug!(count = copy.map.len(), "copied foreign objects");

        Ok(Object::indirect(&self.inner, root_dest))
    }
}

struct ForeignCopy<'a> {
    dest: &'a Document,
    source: Weak<DocumentInner>,
    map: FxHashMap<ObjGen, ObjGen>,
    queue: Vec<ObjGen>,
}

impl ForeignCopy<'_> {
    fn reserve(&mut self, src: ObjGen) -> Result<ObjGen> {
        if let Some(&dest) = self.map.get(&src) {
            return Ok(dest);
        }
        let dest = self.dest.allocate(Value::Reserved)?;
        self.map.insert(src, dest);
        self.queue.push(src);
        Ok(dest)
    }

    fn remap_value(&mut self, value: &mut Value, depth: usize) -> Result<()> {
        if depth > DEFAULT_MAX_DEPTH {
            return Err(PdfError::StructureTooDeep {
                limit: DEFAULT_MAX_DEPTH,
            });
        }
        match value {
            Value::Array(items) => {
                for item in items {
                    self.remap_object(item, depth)?;
                }
            }
            Value::Dictionary(dict) | Value::Stream(Stream { dict, .. }) => {
                for item in dict.values_mut() {
                    self.remap_object(item, depth)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn remap_object(&mut self, obj: &mut Object, depth: usize) -> Result<()> {
        let target = obj
            .indirect_ref()
            .filter(|r| Weak::ptr_eq(&r.owner, &self.source))
            .map(|r: &IndirectRef| r.objgen);
        if let Some(src) = target {
            let dest = self.reserve(src)?;
            *obj = Object::indirect(&self.dest.inner, dest);
            return Ok(());
        }
        if let Some(value) = obj.direct_value_mut() {
            self.remap_value(value, depth + 1)?;
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("objects", &self.object_count())
            .finish()
    }
}
