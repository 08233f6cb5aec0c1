//! Arbitrary-precision decimal parsing. Reuses the chunked
//! divide-and-conquer combiner from [`super::bigint`] for the mantissa and
//! enforces the digit limit and scale limit as two independent caps, since
//! a decimal can carry few significant digits and still an enormous scale.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::{Position, ReaderError, SyntaxError};

struct DecimalParts<'a> {
    negative: bool,
    int_digits: &'a [u8],
    frac_digits: &'a [u8],
    exp_sign_negative: bool,
    exp_digits: &'a [u8],
}

fn split_decimal(bytes: &[u8], pos: Position) -> Result<DecimalParts<'_>, ReaderError> {
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &bytes[int_start..i];
    if int_digits.is_empty() {
        return Err(ReaderError::syntax(SyntaxError::IllegalNumber, pos, None));
    }
    if int_digits.len() > 1 && int_digits[0] == b'0' {
        return Err(ReaderError::syntax(SyntaxError::LeadingZero, pos, None));
    }

    let mut frac_digits: &[u8] = &[];
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = &bytes[frac_start..i];
        if frac_digits.is_empty() {
            return Err(ReaderError::syntax(SyntaxError::IllegalNumber, pos, None));
        }
    }

    let mut exp_sign_negative = false;
    let mut exp_digits: &[u8] = &[];
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            exp_sign_negative = bytes[i] == b'-';
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        exp_digits = &bytes[exp_start..i];
        if exp_digits.is_empty() {
            return Err(ReaderError::syntax(SyntaxError::IllegalNumber, pos, None));
        }
    }

    if i != bytes.len() {
        return Err(ReaderError::syntax(SyntaxError::IllegalNumber, pos, None));
    }

    Ok(DecimalParts {
        negative,
        int_digits,
        frac_digits,
        exp_sign_negative,
        exp_digits,
    })
}

pub(crate) fn parse_bigdecimal(
    bytes: &[u8],
    digits_limit: usize,
    scale_limit: i32,
    pos: Position,
) -> Result<BigDecimal, ReaderError> {
    let parts = split_decimal(bytes, pos)?;

    let mantissa_digit_count = parts.int_digits.len() + parts.frac_digits.len();
    if mantissa_digit_count > digits_limit {
        return Err(ReaderError::syntax(SyntaxError::DigitsLimit, pos, None));
    }

    let mut digits = Vec::with_capacity(mantissa_digit_count);
    digits.extend_from_slice(parts.int_digits);
    digits.extend_from_slice(parts.frac_digits);
    let magnitude = super::bigint::combine_digit_run(&digits);
    let mantissa: BigInt = if parts.negative { -magnitude } else { magnitude.into() };

    let explicit_exp: i64 = parts
        .exp_digits
        .iter()
        .fold(0i64, |acc, &b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    let explicit_exp = if parts.exp_sign_negative { -explicit_exp } else { explicit_exp };

    // `scale` in bigdecimal's representation is the *negative* power of ten,
    // i.e. `value = mantissa * 10^-scale`; the fractional digit count adds
    // to scale, a positive exponent subtracts from it.
    let scale = i64::try_from(parts.frac_digits.len())
        .unwrap_or(i64::MAX)
        .saturating_sub(explicit_exp);

    if scale.unsigned_abs() > scale_limit.unsigned_abs() as u64 {
        return Err(ReaderError::syntax(SyntaxError::ScaleLimit, pos, None));
    }

    Ok(BigDecimal::new(mantissa, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn parses_simple_decimal() {
        let v = parse_bigdecimal(b"3.3", 308, 6178, pos()).unwrap();
        assert_eq!(v, BigDecimal::from_str("3.3").unwrap());
    }

    #[test]
    fn parses_scientific_decimal() {
        let v = parse_bigdecimal(b"1.5E3", 308, 6178, pos()).unwrap();
        assert_eq!(v, BigDecimal::from_str("1500").unwrap());
    }

    #[test]
    fn enforces_digit_limit_independent_of_scale() {
        let digits = format!("{}.1", "9".repeat(10));
        assert!(parse_bigdecimal(digits.as_bytes(), 5, 6178, pos()).is_err());
    }

    #[test]
    fn enforces_scale_limit() {
        assert!(parse_bigdecimal(b"1E9999", 308, 6178, pos()).is_err());
    }
}
