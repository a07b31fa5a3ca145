//! Flate (zlib) stream decoder.

use crate::error::{PdfError, Result};
use flate2::read::ZlibDecoder;
use std::io::Read;

/// Inflate zlib-wrapped deflate data.
pub fn flatedecode(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut output)
        .map_err(|e| PdfError::decode(format!("FlateDecode: {e}")))?;
    Ok(output)
}
