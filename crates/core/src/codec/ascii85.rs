//! ASCII85 and ASCIIHex stream decoders.

use crate::error::{PdfError, Result};

/// Decode ASCII85-encoded data (PDF variant).
///
/// Handles `z` for four zero bytes, optional `<~` prefix, whitespace and
/// a missing `~>` end marker.
pub fn ascii85decode(data: &[u8]) -> Result<Vec<u8>> {
    let data = data.strip_prefix(b"<~").unwrap_or(data);
    let data = match data.iter().position(|&b| b == b'~') {
        Some(pos) => &data[..pos],
        None => data,
    };

    let mut result = Vec::with_capacity(data.len() * 4 / 5 + 4);
    let mut group = [0u8; 5];
    let mut filled = 0;

    for &byte in data {
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x00' => continue,
            b'z' if filled == 0 => result.extend_from_slice(&[0; 4]),
            b'!'..=b'u' => {
                group[filled] = byte;
                filled += 1;
                if filled == 5 {
                    result.extend_from_slice(&group_value(&group)?.to_be_bytes());
                    filled = 0;
                }
            }
            _ => {
                return Err(PdfError::decode(format!(
                    "ASCII85: invalid character 0x{byte:02x}"
                )));
            }
        }
    }

    if filled == 1 {
        return Err(PdfError::decode("ASCII85: truncated final group"));
    }
    if filled > 1 {
        group[filled..].fill(b'u');
        let bytes = group_value(&group)?.to_be_bytes();
        result.extend_from_slice(&bytes[..filled - 1]);
    }
    Ok(result)
}

fn group_value(group: &[u8; 5]) -> Result<u32> {
    let value = group
        .iter()
        .fold(0u64, |acc, &b| acc * 85 + u64::from(b - b'!'));
    u32::try_from(value).map_err(|_| PdfError::decode("ASCII85: group value out of range"))
}

/// Decode ASCIIHex-encoded data. An odd final digit is padded with `0`.
pub fn asciihexdecode(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len() / 2);
    let mut pending: Option<u8> = None;

    for &byte in data {
        if byte == b'>' {
            break;
        }
        if byte.is_ascii_whitespace() || byte == b'\x00' {
            continue;
        }
        let nibble = hex_nibble(byte).ok_or_else(|| {
            PdfError::decode(format!("ASCIIHex: invalid character 0x{byte:02x}"))
        })?;
        match pending.take() {
            Some(high) => result.push((high << 4) | nibble),
            None => pending = Some(nibble),
        }
    }

    if let Some(high) = pending {
        result.push(high << 4);
    }
    Ok(result)
}

pub(crate) fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asciihex_decode_expected() {
        let decoded = asciihexdecode(b"48656c6c6f 20776f726c64>").unwrap();
        assert_eq!(decoded, b"Hello world");
    }

    #[test]
    fn asciihex_odd_digit_padded() {
        assert_eq!(asciihexdecode(b"7>").unwrap(), b"\x70");
    }

    #[test]
    fn ascii85_decode_expected() {
        let decoded = ascii85decode(b"<~87cURD]i,\"Ebo80~>").unwrap();
        assert_eq!(decoded, b"Hello World!");
    }

    #[test]
    fn ascii85_z_group() {
        assert_eq!(ascii85decode(b"z~>").unwrap(), vec![0; 4]);
    }
}
