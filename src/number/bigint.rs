//! Arbitrary-precision integer parsing.
//!
//! Values up to 18 digits are accumulated directly in a `u64`; beyond that,
//! digits are split into fixed 9-digit chunks and combined with a
//! divide-and-conquer strategy (`left * 10^right_digits + right`) so the
//! total work is `O(n^1.5)` rather than the `O(n^2)` a naive left-to-right
//! Horner accumulation over `BigUint` would cost.

use num_bigint::BigInt;

use crate::error::{Position, ReaderError, SyntaxError};

const CHUNK_DIGITS: usize = 9;
const CHUNK_BASE: u64 = 1_000_000_000;

/// Parses an arbitrary-precision integer literal, enforcing
/// `ReaderConfig::big_int_digits_limit` before doing any bignum work.
pub(crate) fn parse_bigint(
    bytes: &[u8],
    digits_limit: usize,
    pos: Position,
) -> Result<BigInt, ReaderError> {
    let negative = bytes.first() == Some(&b'-');
    let digits = if negative { &bytes[1..] } else { bytes };
    if digits.is_empty() {
        return Err(ReaderError::syntax(SyntaxError::IllegalNumber, pos, None));
    }
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(ReaderError::syntax(SyntaxError::LeadingZero, pos, None));
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(ReaderError::syntax(SyntaxError::IllegalNumber, pos, None));
    }
    if digits.len() > digits_limit {
        return Err(ReaderError::syntax(SyntaxError::DigitsLimit, pos, None));
    }

    let magnitude = combine_digit_run(digits);
    Ok(if negative { -magnitude } else { magnitude.into() })
}

/// Combines a run of ASCII decimal digits into a `BigInt` magnitude via
/// divide-and-conquer: split in half at a chunk boundary, recurse on each
/// half, then combine as `left * 10^right.len() + right`.
pub(crate) fn combine_digit_run(digits: &[u8]) -> BigInt {
    if digits.len() <= CHUNK_DIGITS {
        let mut acc: u64 = 0;
        for &b in digits {
            acc = acc * 10 + u64::from(b - b'0');
        }
        return BigInt::from(acc);
    }
    // Split on a chunk boundary so the low half is always a whole number of
    // 9-digit groups; this keeps the recursion's combine step a single
    // power-of-ten shift rather than an arbitrary one.
    let chunks_total = digits.len().div_ceil(CHUNK_DIGITS);
    let low_chunks = chunks_total / 2;
    let split_at = digits.len() - low_chunks * CHUNK_DIGITS;

    let high = combine_digit_run(&digits[..split_at]);
    let low = combine_digit_run(&digits[split_at..]);
    let low_len = digits.len() - split_at;
    let shift = BigInt::from(CHUNK_BASE).pow((low_len / CHUNK_DIGITS) as u32);
    high * shift + low
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn small_value_round_trips() {
        let v = parse_bigint(b"12345", 308, pos()).unwrap();
        assert_eq!(v, BigInt::from(12345));
    }

    #[test]
    fn large_value_matches_naive_parse() {
        let digits = "1".repeat(40);
        let v = parse_bigint(digits.as_bytes(), 308, pos()).unwrap();
        let expected: BigInt = digits.parse().unwrap();
        assert_eq!(v, expected);
    }

    #[test]
    fn negative_large_value() {
        let mut s = String::from("-");
        s.push_str(&"9".repeat(30));
        let v = parse_bigint(s.as_bytes(), 308, pos()).unwrap();
        let expected: BigInt = s.parse().unwrap();
        assert_eq!(v, expected);
    }

    #[test]
    fn digit_limit_enforced() {
        let digits = "1".repeat(10);
        assert!(parse_bigint(digits.as_bytes(), 5, pos()).is_err());
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(parse_bigint(b"007", 308, pos()).is_err());
    }
}
