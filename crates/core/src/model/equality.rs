//! Structural equality and hashing.
//!
//! Indirect handles from the same document compare by objgen without
//! descending, which is what stops recursion on cyclic graphs. Handle
//! pairs from different documents are tracked while they are being
//! compared; meeting the same pair again is treated as equal. Direct
//! nesting is bounded by a depth budget.

use super::objects::{ObjectType, Object, Value};
use crate::error::{PdfError, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::{Hash, Hasher};

type PairKey = (usize, super::objects::ObjGen, usize, super::objects::ObjGen);

struct Comparator {
    max_depth: usize,
    visiting: FxHashSet<PairKey>,
}

impl Comparator {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            visiting: FxHashSet::default(),
        }
    }

    fn eq(&mut self, a: &Object, b: &Object, depth: usize) -> Result<bool> {
        if depth > self.max_depth {
            return Err(PdfError::StructureTooDeep {
                limit: self.max_depth,
            });
        }
        if a.type_code() == ObjectType::Uninitialized || b.type_code() == ObjectType::Uninitialized
        {
            return Ok(false);
        }

        if let (Some(ra), Some(rb)) = (a.indirect_ref(), b.indirect_ref()) {
            if ra.same_owner(rb) {
                return Ok(ra.objgen == rb.objgen);
            }
            let key = (
                ra.owner.as_ptr() as usize,
                ra.objgen,
                rb.owner.as_ptr() as usize,
                rb.objgen,
            );
            if !self.visiting.insert(key) {
                return Ok(true);
            }
            let result = self.eq_resolved(a, b, depth);
            self.visiting.remove(&key);
            return result;
        }
        self.eq_resolved(a, b, depth)
    }

    fn eq_resolved(&mut self, a: &Object, b: &Object, depth: usize) -> Result<bool> {
        a.with_value(|va| b.with_value(|vb| self.eq_value(va, vb, depth)))
    }

    fn eq_value(&mut self, va: &Value, vb: &Value, depth: usize) -> Result<bool> {
        let (ta, tb) = (va.type_code(), vb.type_code());
        match (va, vb) {
            (Value::Boolean(x), Value::Boolean(y)) => return Ok(x == y),
            (Value::Integer(x), Value::Integer(y)) => return Ok(x == y),
            _ => {}
        }
        if ta.is_numeric() && tb.is_numeric() {
            return Ok(va.decimal() == vb.decimal());
        }
        if ta != tb {
            return Ok(false);
        }

        match (va, vb) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Name(x), Value::Name(y)) => Ok(x == y),
            (Value::Operator(x), Value::Operator(y)) => Ok(x == y),
            (Value::String(x), Value::String(y)) => {
                Ok(x.as_bytes() == y.as_bytes() || x.to_text() == y.to_text())
            }
            (Value::Array(x), Value::Array(y)) => {
                if x.len() != y.len() {
                    return Ok(false);
                }
                for (ia, ib) in x.iter().zip(y) {
                    if !self.eq(ia, ib, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::Dictionary(x), Value::Dictionary(y)) => {
                if x.len() != y.len() {
                    return Ok(false);
                }
                for (key, ia) in x {
                    let Some(ib) = y.get(key) else {
                        return Ok(false);
                    };
                    if !self.eq(ia, ib, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::InlineImage(x), Value::InlineImage(y)) => {
                if x.raw_bytes() != y.raw_bytes() || x.metadata().len() != y.metadata().len() {
                    return Ok(false);
                }
                for (ia, ib) in x.metadata().iter().zip(y.metadata()) {
                    if !self.eq(ia, ib, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            // Streams are equal only by identity, handled above.
            _ => Ok(false),
        }
    }
}

impl Object {
    /// Structural equality with the default depth budget.
    pub fn try_eq(&self, other: &Object) -> Result<bool> {
        self.try_eq_with_depth(other, DEFAULT_MAX_DEPTH)
    }

    /// Structural equality, failing with `StructureTooDeep` when direct
    /// nesting exceeds `max_depth`.
    pub fn try_eq_with_depth(&self, other: &Object, max_depth: usize) -> Result<bool> {
        Comparator::new(max_depth).eq(self, other, 0)
    }

    /// Hash consistent with [`Object::try_eq`].
    ///
    /// Numbers hash by exact value, Strings by decoded text, Names and
    /// Operators by their bytes. Everything else is unhashable.
    pub fn try_hash(&self) -> Result<u64> {
        self.with_value(|v| {
            let mut hasher = FxHasher::default();
            match v {
                Value::Boolean(_) | Value::Integer(_) | Value::Real(_) => {
                    0u8.hash(&mut hasher);
                    v.decimal().hash(&mut hasher);
                }
                Value::String(s) => {
                    1u8.hash(&mut hasher);
                    s.to_text().hash(&mut hasher);
                }
                Value::Name(n) => {
                    2u8.hash(&mut hasher);
                    n.as_bytes().hash(&mut hasher);
                }
                Value::Operator(op) => {
                    3u8.hash(&mut hasher);
                    op.as_str().hash(&mut hasher);
                }
                other => return Err(PdfError::Unhashable(other.type_name())),
            }
            Ok(hasher.finish())
        })
    }
}

/// Structural equality that reports `false` when the comparison fails,
/// which happens when direct nesting exceeds the default depth budget.
/// Use [`Object::try_eq`] to see the `StructureTooDeep` error.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}
