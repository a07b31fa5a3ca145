//! Key and index access over dictionaries, streams and arrays.

use super::objects::{Dictionary, LENGTH_KEY, Object, Value};
use super::text::Name;
use crate::error::{PdfError, Result};

/// Validate a dictionary key such as `"/Type"`.
pub(crate) fn validate_key(key: &str) -> Result<Name> {
    if key == "/" {
        return Err(PdfError::InvalidValue(
            "Name must be at least one character long".into(),
        ));
    }
    if !key.starts_with('/') {
        return Err(PdfError::InvalidValue(format!(
            "Key must begin with '/': {key:?}"
        )));
    }
    Name::new(key)
}

fn dict_of(value: &Value) -> Result<&Dictionary> {
    match value {
        Value::Dictionary(dict) => Ok(dict),
        Value::Stream(stream) => Ok(&stream.dict),
        other => Err(other.mismatch("dictionary or stream")),
    }
}

fn dict_of_mut(value: &mut Value) -> Result<&mut Dictionary> {
    match value {
        Value::Dictionary(dict) => Ok(dict),
        Value::Stream(stream) => Ok(&mut stream.dict),
        other => Err(other.mismatch("dictionary or stream")),
    }
}

fn array_of(value: &Value) -> Result<&Vec<Object>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(other.mismatch("array")),
    }
}

fn array_of_mut(value: &mut Value) -> Result<&mut Vec<Object>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(other.mismatch("array")),
    }
}

/// Resolve a possibly negative index against `len`.
pub(crate) fn normalize_index(index: i64, len: usize) -> Result<usize> {
    let resolved = if index < 0 {
        index.checked_add(len as i64)
    } else {
        Some(index)
    };
    match resolved {
        Some(i) if i >= 0 && (i as usize) < len => Ok(i as usize),
        _ => Err(PdfError::IndexOutOfRange { index, len }),
    }
}

impl Object {
    // === Dictionary and stream dictionary ===

    pub fn has_key(&self, key: &str) -> Result<bool> {
        self.with_value(|v| Ok(dict_of(v)?.contains_key(key.as_bytes())))
    }

    pub fn get_key(&self, key: &str) -> Result<Object> {
        self.with_value(|v| {
            dict_of(v)?
                .get(key.as_bytes())
                .cloned()
                .ok_or_else(|| PdfError::KeyNotFound(key.to_string()))
        })
    }

    /// `get_key`, falling back to `default` when the key is absent.
    pub fn get_or(&self, key: &str, default: Object) -> Result<Object> {
        self.with_value(|v| Ok(dict_of(v)?.get(key.as_bytes()).cloned().unwrap_or(default)))
    }

    /// Set a dictionary entry.
    ///
    /// Null values are rejected (use [`Object::delete_key`]), as are
    /// malformed keys and a stream's `/Length`.
    pub fn set_key(&mut self, key: &str, value: Object) -> Result<()> {
        let is_stream = self.with_value(|v| dict_of(v).map(|_| matches!(v, Value::Stream(_))))?;
        if value.is_null() {
            return Err(PdfError::InvalidValue(format!(
                "PDF Dictionary keys may not be set to None - use 'del' to remove {key}"
            )));
        }
        let name = validate_key(key)?;
        if is_stream && key == LENGTH_KEY {
            return Err(PdfError::ImmutableField(LENGTH_KEY.into()));
        }
        self.with_value_mut(|v| {
            dict_of_mut(v)?.insert(name, value);
            Ok(())
        })
    }

    /// Remove a dictionary entry; absent keys are an error.
    pub fn delete_key(&mut self, key: &str) -> Result<()> {
        self.with_value_mut(|v| {
            if matches!(v, Value::Stream(_)) && key == LENGTH_KEY {
                return Err(PdfError::ImmutableField(LENGTH_KEY.into()));
            }
            dict_of_mut(v)?
                .remove(key.as_bytes())
                .map(|_| ())
                .ok_or_else(|| PdfError::KeyNotFound(key.to_string()))
        })
    }

    pub fn keys(&self) -> Result<Vec<Name>> {
        self.with_value(|v| Ok(dict_of(v)?.keys().cloned().collect()))
    }

    pub fn items(&self) -> Result<Vec<(Name, Object)>> {
        self.with_value(|v| {
            Ok(dict_of(v)?
                .iter()
                .map(|(k, o)| (k.clone(), o.clone()))
                .collect())
        })
    }

    pub fn as_dict(&self) -> Result<Dictionary> {
        self.with_value(|v| dict_of(v).cloned())
    }

    /// Entry count of a dictionary or array.
    ///
    /// Streams have no length; count their keys instead.
    pub fn len(&self) -> Result<usize> {
        self.with_value(|v| match v {
            Value::Dictionary(dict) => Ok(dict.len()),
            Value::Array(items) => Ok(items.len()),
            other => Err(other.mismatch("dictionary or array")),
        })
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|n| n == 0)
    }

    // === Array ===

    pub fn get_item(&self, index: i64) -> Result<Object> {
        self.with_value(|v| {
            let items = array_of(v)?;
            let i = normalize_index(index, items.len())?;
            Ok(items[i].clone())
        })
    }

    pub fn set_item(&mut self, index: i64, value: Object) -> Result<()> {
        self.with_value_mut(|v| {
            let items = array_of_mut(v)?;
            let i = normalize_index(index, items.len())?;
            items[i] = value;
            Ok(())
        })
    }

    pub fn delete_item(&mut self, index: i64) -> Result<()> {
        self.with_value_mut(|v| {
            let items = array_of_mut(v)?;
            let i = normalize_index(index, items.len())?;
            items.remove(i);
            Ok(())
        })
    }

    /// Linear scan of an array using object equality.
    pub fn contains_item(&self, needle: &Object) -> Result<bool> {
        self.with_value(|v| {
            for item in array_of(v)? {
                if item.try_eq(needle)? {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// Membership test: element scan for arrays, key lookup for
    /// dictionaries and streams (the needle must then be a Name).
    pub fn contains(&self, needle: &Object) -> Result<bool> {
        if self.is_array() {
            return self.contains_item(needle);
        }
        let key = needle.as_name()?;
        self.with_value(|v| Ok(dict_of(v)?.contains_key(key.as_bytes())))
    }

    pub fn append(&mut self, item: Object) -> Result<()> {
        self.with_value_mut(|v| {
            array_of_mut(v)?.push(item);
            Ok(())
        })
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Object>) -> Result<()> {
        self.with_value_mut(|v| {
            array_of_mut(v)?.extend(items);
            Ok(())
        })
    }

    pub fn as_list(&self) -> Result<Vec<Object>> {
        self.with_value(|v| array_of(v).cloned())
    }

    /// The object itself if it is an array, else a one-element array.
    pub fn wrap_in_array(&self) -> Object {
        if self.is_array() {
            self.clone()
        } else {
            Object::array(vec![self.clone()])
        }
    }

    /// True for an array of exactly four numbers.
    pub fn is_rectangle(&self) -> bool {
        self.with_value(|v| match v {
            Value::Array(items) => items.len() == 4 && items.iter().all(Object::is_numeric),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_index() {
        assert_eq!(normalize_index(0, 3).unwrap(), 0);
        assert_eq!(normalize_index(-1, 3).unwrap(), 2);
        assert_eq!(normalize_index(-3, 3).unwrap(), 0);
        assert!(normalize_index(-4, 3).is_err());
        assert!(normalize_index(3, 3).is_err());
        assert!(normalize_index(i64::MIN, 3).is_err());
        assert!(normalize_index(0, 0).is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("/A").is_ok());
        assert!(matches!(validate_key("/"), Err(PdfError::InvalidValue(_))));
        assert!(matches!(validate_key("A"), Err(PdfError::InvalidValue(_))));
    }
}
