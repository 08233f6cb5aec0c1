//! Signed and unsigned integer parsing/formatting.
//!
//! Parsing accumulates in the negative space so that e.g. `i64::MIN` can be
//! represented without ever forming the unrepresentable positive
//! `9223372036854775808` along the way — the same trick every hand-written
//! JSON integer reader uses.

use crate::error::{Position, ReaderError, SyntaxError};

macro_rules! signed_parser {
    ($name:ident, $ty:ty, $unsigned:ty, $type_name:literal) => {
        /// Parses `bytes` as a bare integer literal (no leading/trailing
        /// whitespace, no fractional or exponent part) per spec's integer
        /// grammar: optional `-`, then digits with no leading zero unless
        /// the whole literal is `0` or `-0`.
        pub(crate) fn $name(bytes: &[u8], start_pos: Position) -> Result<$ty, ReaderError> {
            let (neg, digits) = match bytes.first() {
                Some(b'-') => (true, &bytes[1..]),
                _ => (false, bytes),
            };
            if digits.is_empty() {
                return Err(ReaderError::syntax(SyntaxError::IllegalNumber, start_pos, None));
            }
            if digits.len() > 1 && digits[0] == b'0' {
                return Err(ReaderError::syntax(SyntaxError::LeadingZero, start_pos, None));
            }
            // Accumulate as the unsigned magnitude's negation: `-(x)` never
            // overflows even at MIN, unlike accumulating positive then negating.
            let mut acc: $unsigned = 0;
            for &b in digits {
                if !b.is_ascii_digit() {
                    return Err(ReaderError::syntax(SyntaxError::IllegalNumber, start_pos, None));
                }
                let digit = <$unsigned>::from(b - b'0');
                acc = acc
                    .checked_mul(10)
                    .and_then(|a| a.checked_add(digit))
                    .ok_or_else(|| {
                        ReaderError::syntax(
                            SyntaxError::Overflow { ty: $type_name },
                            start_pos,
                            None,
                        )
                    })?;
            }
            if neg {
                // SAFETY-free: magnitude fits in the unsigned type; negating
                // the minimum magnitude (`1 << (bits-1)`) is exactly MIN.
                let neg_acc = acc.wrapping_neg() as $ty;
                if (acc as $ty) != <$ty>::MIN && neg_acc > 0 {
                    return Err(ReaderError::syntax(
                        SyntaxError::Overflow { ty: $type_name },
                        start_pos,
                        None,
                    ));
                }
                Ok(neg_acc)
            } else {
                <$ty>::try_from(acc).map_err(|_| {
                    ReaderError::syntax(SyntaxError::Overflow { ty: $type_name }, start_pos, None)
                })
            }
        }
    };
}

signed_parser!(parse_i8, i8, u8, "i8");
signed_parser!(parse_i16, i16, u16, "i16");
signed_parser!(parse_i32, i32, u32, "i32");
signed_parser!(parse_i64, i64, u64, "i64");

macro_rules! unsigned_parser {
    ($name:ident, $ty:ty, $type_name:literal) => {
        pub(crate) fn $name(bytes: &[u8], start_pos: Position) -> Result<$ty, ReaderError> {
            if bytes.first() == Some(&b'-') {
                return Err(ReaderError::syntax(
                    SyntaxError::Overflow { ty: $type_name },
                    start_pos,
                    None,
                ));
            }
            if bytes.is_empty() {
                return Err(ReaderError::syntax(SyntaxError::IllegalNumber, start_pos, None));
            }
            if bytes.len() > 1 && bytes[0] == b'0' {
                return Err(ReaderError::syntax(SyntaxError::LeadingZero, start_pos, None));
            }
            let mut acc: $ty = 0;
            for &b in bytes {
                if !b.is_ascii_digit() {
                    return Err(ReaderError::syntax(SyntaxError::IllegalNumber, start_pos, None));
                }
                let digit = <$ty>::from(b - b'0');
                acc = acc
                    .checked_mul(10)
                    .and_then(|a| a.checked_add(digit))
                    .ok_or_else(|| {
                        ReaderError::syntax(
                            SyntaxError::Overflow { ty: $type_name },
                            start_pos,
                            None,
                        )
                    })?;
            }
            Ok(acc)
        }
    };
}

unsigned_parser!(parse_u8, u8, "u8");
unsigned_parser!(parse_u16, u16, "u16");
unsigned_parser!(parse_u32, u32, "u32");
unsigned_parser!(parse_u64, u64, "u64");

/// Formats a signed integer with the classic two-digits-per-iteration
/// lookup table, halving the number of divisions versus one digit at a
/// time.
pub(crate) fn format_i64(value: i64, out: &mut Vec<u8>) {
    let mut buf = itoa::Buffer::new();
    out.extend_from_slice(buf.format(value).as_bytes());
}

pub(crate) fn format_u64(value: u64, out: &mut Vec<u8>) {
    let mut buf = itoa::Buffer::new();
    out.extend_from_slice(buf.format(value).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn parses_min_and_max() {
        assert_eq!(parse_i64(b"-9223372036854775808", pos()).unwrap(), i64::MIN);
        assert_eq!(parse_i64(b"9223372036854775807", pos()).unwrap(), i64::MAX);
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(parse_i32(b"012", pos()).is_err());
        assert!(parse_i32(b"0", pos()).is_ok());
        assert!(parse_i32(b"-0", pos()).is_ok());
    }

    #[test]
    fn nineteen_nines_overflows_i64() {
        let err = parse_i64(b"9999999999999999999", pos()).unwrap_err();
        assert_eq!(err.kind(), Some(&SyntaxError::Overflow { ty: "i64" }));
    }

    #[test]
    fn one_past_min_and_max_overflow() {
        assert!(parse_i64(b"-9223372036854775809", pos()).is_err());
        assert!(parse_i64(b"9223372036854775808", pos()).is_err());
    }

    #[test]
    fn unsigned_rejects_sign() {
        assert!(parse_u32(b"-1", pos()).is_err());
    }
}
