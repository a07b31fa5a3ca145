//! Stream filters and the decoder that applies them.
//!
//! This module contains:
//! - `ascii85`: ASCII85 and ASCIIHex decoding
//! - `flate`: zlib/deflate decoding
//! - `lzw`: LZW decoding
//! - `predictor`: PNG and TIFF predictor reversal
//! - `runlength`: run-length decoding

pub mod ascii85;
pub mod flate;
pub mod lzw;
pub mod predictor;
pub mod runlength;

pub use ascii85::{ascii85decode, asciihexdecode};
pub use flate::flatedecode;
pub use lzw::lzwdecode_with_earlychange;
pub use predictor::PredictorParams;
pub use runlength::rldecode;

use crate::error::{PdfError, Result};
use crate::model::objects::{Dictionary, Object, Value};
use crate::model::text::Name;
use std::fmt;

/// How much filtering to reverse when reading stream data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecodeLevel {
    /// Raw bytes, no filters reversed.
    None,
    /// Lossless general-purpose filters: Flate, LZW, ASCIIHex, ASCII85.
    #[default]
    Generalized,
    /// Generalized plus RunLength.
    Specialized,
    /// Everything this decoder can reverse. The built-in [`FilterDecoder`]
    /// decodes the same set as `Specialized` and fails on lossy image
    /// filters such as DCT, JPX, JBIG2 and CCITT.
    All,
}

impl fmt::Display for DecodeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Generalized => "generalized",
            Self::Specialized => "specialized",
            Self::All => "all",
        })
    }
}

/// Reverses a stream's filters.
///
/// A decoder sees only the stream dictionary and payload; callers attach
/// the stream's objgen to any error it returns.
pub trait StreamDecoder {
    fn decode(&self, dict: &Dictionary, raw: &[u8], level: DecodeLevel) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    Flate,
    Lzw,
    AsciiHex,
    Ascii85,
    RunLength,
}

impl Filter {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"FlateDecode" | b"Fl" => Some(Self::Flate),
            b"LZWDecode" | b"LZW" => Some(Self::Lzw),
            b"ASCIIHexDecode" | b"AHx" => Some(Self::AsciiHex),
            b"ASCII85Decode" | b"A85" => Some(Self::Ascii85),
            b"RunLengthDecode" | b"RL" => Some(Self::RunLength),
            _ => None,
        }
    }

    fn allowed_at(self, level: DecodeLevel) -> bool {
        match self {
            Self::RunLength => level >= DecodeLevel::Specialized,
            _ => level >= DecodeLevel::Generalized,
        }
    }

    fn apply(self, data: &[u8], parms: Option<&Dictionary>) -> Result<Vec<u8>> {
        match self {
            Self::Flate => {
                let params = PredictorParams::from_dict(parms)?;
                params.apply(flatedecode(data)?)
            }
            Self::Lzw => {
                let params = PredictorParams::from_dict(parms)?;
                let early_change = int_param(parms, "/EarlyChange", 1)?;
                params.apply(lzwdecode_with_earlychange(data, early_change)?)
            }
            Self::AsciiHex => asciihexdecode(data),
            Self::Ascii85 => ascii85decode(data),
            Self::RunLength => rldecode(data),
        }
    }
}

pub(crate) fn int_param(parms: Option<&Dictionary>, key: &str, default: i64) -> Result<i64> {
    match parms.and_then(|d| d.get(key.as_bytes())) {
        None => Ok(default),
        Some(obj) => obj
            .as_int()
            .map_err(|_| PdfError::decode(format!("{key} must be an integer"))),
    }
}

/// `/Filter` and `/DecodeParms` paired up, one entry per filter.
fn filter_chain(dict: &Dictionary) -> Result<Vec<(Name, Option<Dictionary>)>> {
    let filters: Vec<Name> = match dict.get(b"/Filter".as_slice()) {
        None => Vec::new(),
        Some(obj) => obj.with_value(|v| match v {
            Value::Null => Ok(Vec::new()),
            Value::Name(name) => Ok(vec![name.clone()]),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_name()
                        .map_err(|_| PdfError::decode("/Filter array must contain names"))
                })
                .collect(),
            other => Err(PdfError::decode(format!(
                "/Filter must be a name or array, not {}",
                other.type_name()
            ))),
        })?,
    };

    let parms: Vec<Option<Dictionary>> = match dict.get(b"/DecodeParms".as_slice()) {
        None => Vec::new(),
        Some(obj) => obj.with_value(|v| match v {
            Value::Dictionary(d) => Ok(vec![Some(d.clone())]),
            Value::Array(items) => Ok(items.iter().map(parms_entry).collect()),
            _ => Ok(Vec::new()),
        })?,
    };

    Ok(filters
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, parms.get(i).cloned().flatten()))
        .collect())
}

fn parms_entry(obj: &Object) -> Option<Dictionary> {
    obj.with_value(|v| match v {
        Value::Dictionary(d) => Some(d.clone()),
        _ => None,
    })
}

/// Built-in decoder for the lossless filters this crate implements.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterDecoder;

impl StreamDecoder for FilterDecoder {
    fn decode(&self, dict: &Dictionary, raw: &[u8], level: DecodeLevel) -> Result<Vec<u8>> {
        if level == DecodeLevel::None {
            return Ok(raw.to_vec());
        }
        let mut data = raw.to_vec();
        for (name, parms) in filter_chain(dict)? {
            let filter = Filter::from_name(name.body())
                .ok_or_else(|| PdfError::decode(format!("unsupported filter {name}")))?;
            if !filter.allowed_at(level) {
                return Err(PdfError::decode(format!(
                    "filter {name} is not decoded at level {level}"
                )));
            }
            tracing::trace!(filter = %name, input = data.len(), "applying stream filter");
            data = filter.apply(&data, parms.as_ref())?;
        }
        Ok(data)
    }
}
