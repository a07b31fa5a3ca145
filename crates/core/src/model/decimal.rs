//! Exact decimal numbers.
//!
//! PDF reals are written in decimal notation and must compare exactly
//! against integers and booleans, so numeric comparison never goes
//! through `f64`.

use crate::error::{PdfError, Result};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero, pow};
use std::cmp::Ordering;
use std::fmt;

/// An arbitrary-precision decimal: `mantissa * 10^-scale`.
///
/// Always normalized (no trailing zeros in the fraction, zero has scale 0),
/// so the derived equality and hash agree with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            scale: 0,
        }
    }

    fn normalized(mut mantissa: BigInt, mut scale: u32) -> Self {
        if mantissa.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10);
        while scale > 0 && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    /// Parse PDF numeric text: optional sign, digits, optional fraction.
    ///
    /// Accepts the forms PDF writers produce (`-.5`, `+3.`, `12.500`).
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || PdfError::InvalidValue(format!("invalid decimal: {text:?}"));

        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        if negative {
            mantissa = -mantissa;
        }
        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        Ok(Self::normalized(mantissa, scale))
    }

    /// Convert a host float, rounded to `places` fractional digits.
    pub fn from_f64(value: f64, places: u32) -> Result<Self> {
        if !value.is_finite() {
            return Err(PdfError::InvalidValue(format!(
                "{value} cannot be represented as a PDF real"
            )));
        }
        Self::parse(&format!("{:.*}", places as usize, value))
    }

    pub const fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Integer value, if this decimal has no fraction and fits in `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        if self.scale == 0 {
            self.mantissa.to_i64()
        } else {
            None
        }
    }

    /// Lossy conversion for callers that explicitly want a float.
    pub fn to_f64_lossy(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    fn rescaled(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        &self.mantissa * pow(BigInt::from(10), (scale - self.scale) as usize)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::normalized(BigInt::from(value), 0)
    }
}

impl From<bool> for Decimal {
    fn from(value: bool) -> Self {
        Self::from(i64::from(value))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.rescaled(scale).cmp(&other.rescaled(scale))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::str::FromStr for Decimal {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.abs().to_string();
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_trailing_zeros() {
        let a = Decimal::parse("1.500").unwrap();
        let b = Decimal::parse("1.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.scale(), 1);
        assert_eq!(a.to_string(), "1.5");
    }

    #[test]
    fn test_parse_pdf_forms() {
        assert_eq!(Decimal::parse("-.5").unwrap().to_string(), "-0.5");
        assert_eq!(Decimal::parse("+3.").unwrap().to_string(), "3");
        assert_eq!(Decimal::parse("-0.000").unwrap(), Decimal::zero());
        assert_eq!(Decimal::parse("0.001").unwrap().to_string(), "0.001");
        assert!(Decimal::parse(".").is_err());
        assert!(Decimal::parse("1e5").is_err());
        assert!(Decimal::parse("").is_err());
    }

    #[test]
    fn test_integer_equivalence() {
        assert_eq!(Decimal::parse("1.0").unwrap(), Decimal::from(1));
        assert_eq!(Decimal::from(true), Decimal::from(1));
        assert_eq!(Decimal::parse("42").unwrap().to_i64(), Some(42));
        assert_eq!(Decimal::parse("4.2").unwrap().to_i64(), None);
    }

    #[test]
    fn test_from_f64_rounds_to_places() {
        assert_eq!(Decimal::from_f64(0.1, 15).unwrap().to_string(), "0.1");
        assert_eq!(Decimal::from_f64(2.0 / 3.0, 3).unwrap().to_string(), "0.667");
        assert!(Decimal::from_f64(f64::NAN, 15).is_err());
    }

    #[test]
    fn test_ordering_across_scales() {
        let a = Decimal::parse("1.25").unwrap();
        let b = Decimal::parse("1.3").unwrap();
        assert!(a < b);
        assert!(Decimal::from(-2) < Decimal::parse("-1.99").unwrap());
    }
}
