//! LZW stream decoder using the weezl crate.

use crate::error::{PdfError, Result};
use weezl::{BitOrder, decode::Decoder};

/// Decode LZW-encoded data (MSB first, 8-bit codes).
pub fn lzwdecode(data: &[u8]) -> Result<Vec<u8>> {
    lzwdecode_with_earlychange(data, 1)
}

/// Decode LZW-encoded data with an `/EarlyChange` setting.
///
/// EarlyChange=1 is the PDF default and widens codes one entry early,
/// as TIFF does; EarlyChange=0 widens them exactly at the table limit.
pub fn lzwdecode_with_earlychange(data: &[u8], early_change: i64) -> Result<Vec<u8>> {
    let mut decoder = if early_change == 0 {
        Decoder::new(BitOrder::Msb, 8)
    } else {
        Decoder::with_tiff_size_switch(BitOrder::Msb, 8)
    };
    let mut output = Vec::new();
    let result = decoder.into_vec(&mut output).decode(data);
    result
        .status
        .map_err(|e| PdfError::decode(format!("LZW: {e}")))?;
    Ok(output)
}
