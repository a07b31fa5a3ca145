//! PNG and TIFF predictor reversal for Flate and LZW streams.

use super::int_param;
use crate::error::{PdfError, Result};
use crate::model::objects::Dictionary;

/// `/DecodeParms` entries that control prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictorParams {
    pub predictor: i64,
    pub colors: usize,
    pub bits_per_component: usize,
    pub columns: usize,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            predictor: 1,
            colors: 1,
            bits_per_component: 8,
            columns: 1,
        }
    }
}

impl PredictorParams {
    pub fn from_dict(parms: Option<&Dictionary>) -> Result<Self> {
        let positive = |key: &str, default: i64| -> Result<usize> {
            let value = int_param(parms, key, default)?;
            usize::try_from(value)
                .ok()
                .filter(|&v| v > 0)
                .ok_or_else(|| PdfError::decode(format!("{key} must be positive, got {value}")))
        };
        let params = Self {
            predictor: int_param(parms, "/Predictor", 1)?,
            colors: positive("/Colors", 1)?,
            bits_per_component: positive("/BitsPerComponent", 8)?,
            columns: positive("/Columns", 1)?,
        };
        if !matches!(params.bits_per_component, 1 | 2 | 4 | 8 | 16) {
            return Err(PdfError::decode(format!(
                "invalid /BitsPerComponent {}",
                params.bits_per_component
            )));
        }
        Ok(params)
    }

    fn row_bytes(&self) -> usize {
        (self.colors * self.columns * self.bits_per_component).div_ceil(8)
    }

    fn bytes_per_pixel(&self) -> usize {
        (self.colors * self.bits_per_component).div_ceil(8).max(1)
    }

    /// Undo prediction on already-decompressed data.
    pub fn apply(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        match self.predictor {
            1 => Ok(data),
            2 => self.tiff_unpredict(data),
            10..=15 => self.png_unpredict(&data),
            other => Err(PdfError::decode(format!("unsupported predictor {other}"))),
        }
    }

    /// Each row carries a leading PNG filter-type byte.
    fn png_unpredict(&self, data: &[u8]) -> Result<Vec<u8>> {
        let row_bytes = self.row_bytes();
        let bpp = self.bytes_per_pixel();
        let row_size = row_bytes + 1;

        let mut result = Vec::with_capacity(data.len());
        let mut prev_row = vec![0u8; row_bytes];
        let mut current_row = vec![0u8; row_bytes];

        // A trailing partial row is dropped.
        for row in data.chunks_exact(row_size) {
            let filter_type = row[0];
            let row_data = &row[1..];

            match filter_type {
                0 => current_row.copy_from_slice(row_data),
                1 => {
                    for i in 0..row_bytes {
                        let left = if i >= bpp { current_row[i - bpp] } else { 0 };
                        current_row[i] = row_data[i].wrapping_add(left);
                    }
                }
                2 => {
                    for i in 0..row_bytes {
                        current_row[i] = row_data[i].wrapping_add(prev_row[i]);
                    }
                }
                3 => {
                    for i in 0..row_bytes {
                        let left = if i >= bpp { current_row[i - bpp] as u16 } else { 0 };
                        let above = prev_row[i] as u16;
                        current_row[i] = row_data[i].wrapping_add(((left + above) / 2) as u8);
                    }
                }
                4 => {
                    for i in 0..row_bytes {
                        let left = if i >= bpp { current_row[i - bpp] } else { 0 };
                        let above = prev_row[i];
                        let upper_left = if i >= bpp { prev_row[i - bpp] } else { 0 };
                        current_row[i] = row_data[i].wrapping_add(paeth(left, above, upper_left));
                    }
                }
                other => {
                    return Err(PdfError::decode(format!("invalid PNG filter type {other}")));
                }
            }

            result.extend_from_slice(&current_row);
            std::mem::swap(&mut prev_row, &mut current_row);
        }

        Ok(result)
    }

    /// Horizontal differencing; only whole-byte components are supported.
    fn tiff_unpredict(&self, mut data: Vec<u8>) -> Result<Vec<u8>> {
        if self.bits_per_component != 8 {
            return Err(PdfError::decode(format!(
                "TIFF predictor with {} bits per component is not supported",
                self.bits_per_component
            )));
        }
        let row_bytes = self.row_bytes();
        for row in data.chunks_mut(row_bytes) {
            for i in self.colors..row.len() {
                row[i] = row[i].wrapping_add(row[i - self.colors]);
            }
        }
        Ok(data)
    }
}

const fn paeth(left: u8, above: u8, upper_left: u8) -> u8 {
    let a = left as i32;
    let b = above as i32;
    let c = upper_left as i32;
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        above
    } else {
        upper_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(predictor: i64, columns: usize) -> PredictorParams {
        PredictorParams {
            predictor,
            columns,
            ..PredictorParams::default()
        }
    }

    #[test]
    fn test_png_up_filter() {
        let data = vec![2, 1, 2, 3, 2, 1, 1, 1];
        let out = params(12, 3).apply(data).unwrap();
        assert_eq!(out, vec![1, 2, 3, 2, 3, 4]);
    }

    #[test]
    fn test_png_sub_filter() {
        let out = params(11, 3).apply(vec![1, 5, 1, 1]).unwrap();
        assert_eq!(out, vec![5, 6, 7]);
    }

    #[test]
    fn test_tiff_predictor() {
        let out = params(2, 4).apply(vec![10, 1, 1, 1]).unwrap();
        assert_eq!(out, vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_unknown_png_filter_type() {
        assert!(params(15, 1).apply(vec![9, 0]).is_err());
    }
}
