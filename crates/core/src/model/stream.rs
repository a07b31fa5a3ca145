//! Stream payload access.

use super::objects::{Dictionary, LENGTH_KEY, ObjGen, Object, Value};
use super::text::Name;
use crate::error::{PdfError, Result};
use bytes::Bytes;

pub use crate::codec::DecodeLevel;

/// Attach the stream's objgen to a decode error.
fn tag_decode_error(err: PdfError, objgen: ObjGen) -> PdfError {
    match err {
        PdfError::DecodeFailure { msg, .. } => PdfError::DecodeFailure { objgen, msg },
        other => PdfError::DecodeFailure {
            objgen,
            msg: other.to_string(),
        },
    }
}

fn set_entry(dict: &mut Dictionary, key: &'static str, value: Option<Object>) {
    let name = Name::from_lexed(&key.as_bytes()[1..]);
    match value {
        Some(v) => {
            dict.insert(name, v);
        }
        None => {
            dict.remove(key.as_bytes());
        }
    }
}

impl Object {
    fn stream_parts(&self) -> Result<(Dictionary, Bytes)> {
        self.with_value(|v| match v {
            Value::Stream(s) => Ok((s.dict.clone(), s.data.clone())),
            other => Err(other.mismatch("stream")),
        })
    }

    /// Copy of the stream's dictionary.
    pub fn stream_dict(&self) -> Result<Dictionary> {
        self.stream_parts().map(|(dict, _)| dict)
    }

    /// Replace the stream's dictionary. `/Length` is kept in step with the
    /// payload whatever `dict` says.
    pub fn replace_stream_dict(&mut self, mut dict: Dictionary) -> Result<()> {
        self.with_value_mut(|v| match v {
            Value::Stream(s) => {
                set_entry(
                    &mut dict,
                    LENGTH_KEY,
                    Some(Object::integer(s.data.len() as i64)),
                );
                s.dict = dict;
                Ok(())
            }
            other => Err(other.mismatch("stream")),
        })
    }

    /// Payload exactly as stored.
    pub fn read_raw_bytes(&self) -> Result<Bytes> {
        self.stream_parts().map(|(_, data)| data)
    }

    /// Payload with filters reversed up to `level`.
    ///
    /// Failures are reported as `DecodeFailure` carrying this stream's objgen.
    pub fn read_bytes(&self, level: DecodeLevel) -> Result<Vec<u8>> {
        let (dict, data) = self.stream_parts()?;
        let objgen = self.objgen();
        let owner = self.owner().ok_or_else(|| PdfError::DecodeFailure {
            objgen,
            msg: "stream has no owning document".into(),
        })?;
        owner
            .decoder()
            .decode(&dict, &data, level)
            .map_err(|e| tag_decode_error(e, objgen))
    }

    /// Replace the stream payload.
    ///
    /// `data` must already be encoded with `filter`. `/Filter` and
    /// `/DecodeParms` are set from the arguments (removed when `None` or
    /// Null) and `/Length` is updated.
    pub fn write(
        &mut self,
        data: impl Into<Bytes>,
        filter: Option<Object>,
        decode_parms: Option<Object>,
    ) -> Result<()> {
        self.with_value(|v| match v {
            Value::Stream(_) => Ok(()),
            other => Err(other.mismatch("stream")),
        })?;

        let filter = filter.filter(|f| !f.is_null());
        let decode_parms = decode_parms.filter(|p| !p.is_null());

        let filter_count = match &filter {
            None => None,
            Some(f) => Some(f.with_value(|v| match v {
                Value::Name(_) => Ok(1),
                Value::Array(items) if items.iter().all(Object::is_name) => Ok(items.len()),
                other => Err(PdfError::TypeMismatch {
                    expected: "name or array of names",
                    got: other.type_name(),
                }),
            })?),
        };
        let parms_count = match &decode_parms {
            None => None,
            Some(p) => Some(p.with_value(|v| match v {
                Value::Dictionary(_) => Ok(None),
                Value::Array(items) => Ok(Some(items.len())),
                other => Err(PdfError::TypeMismatch {
                    expected: "dictionary or array",
                    got: other.type_name(),
                }),
            })?),
        };
        if let (Some(filters), Some(Some(parms))) = (filter_count, parms_count) {
            if filters != parms && filter.as_ref().is_some_and(Object::is_array) {
                return Err(PdfError::InvalidValue(format!(
                    "/Filter has {filters} entries but /DecodeParms has {parms}"
                )));
            }
        }

        let data = data.into();
        self.with_value_mut(move |v| match v {
            Value::Stream(s) => {
                set_entry(&mut s.dict, "/Filter", filter);
                set_entry(&mut s.dict, "/DecodeParms", decode_parms);
                set_entry(
                    &mut s.dict,
                    LENGTH_KEY,
                    Some(Object::integer(data.len() as i64)),
                );
                s.data = data;
                Ok(())
            }
            other => Err(other.mismatch("stream")),
        })
    }
}
