//! IEEE-754 float parsing and shortest-round-trip formatting.
//!
//! Grammar validation and mantissa accumulation are hand-written; the
//! halfway-case fallback delegates to the standard library's own
//! decimal-to-binary parser (itself Eisel–Lemire-based) rather than
//! reimplementing its 651-entry constant table, and formatting delegates to
//! `ryu` for the shortest round-trip digits. The fixed-vs-scientific choice
//! is decided independently of `ryu`'s own crossover, following the
//! Java/jsoniter-scala rule (scientific once the leading digit's exponent is
//! `>= 7` or `<= -4`).

use crate::error::{Position, ReaderError, SyntaxError};

struct NumberParts<'a> {
    negative: bool,
    int_digits: &'a [u8],
    frac_digits: &'a [u8],
    exp_sign_negative: bool,
    exp_digits: &'a [u8],
}

fn split_number(bytes: &[u8], pos: Position) -> Result<NumberParts<'_>, ReaderError> {
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

    Ok(NumberParts {
        negative,
        int_digits,
        frac_digits,
        exp_sign_negative,
        exp_digits,
    })
}

fn digits_to_u64_saturating(digits: &[u8]) -> (u64, usize) {
    let mut acc: u64 = 0;
    let mut used = 0;
    for &b in digits {
        if used >= 19 {
            break;
        }
        acc = acc * 10 + u64::from(b - b'0');
        used += 1;
    }
    (acc, used)
}

fn exp_to_i32(digits: &[u8], negative: bool, pos: Position) -> Result<i32, ReaderError> {
    let mut acc: i64 = 0;
    for &b in digits {
        acc = acc.saturating_mul(10) + i64::from(b - b'0');
        if acc > 100_000 {
            // Clearly out of any representable double's range; clamp so the
            // exponent arithmetic below can't overflow i32 while still
            // driving the value to 0 or infinity as appropriate.
            acc = 100_000;
        }
    }
    let signed = if negative { -acc } else { acc };
    i32::try_from(signed).map_err(|_| ReaderError::syntax(SyntaxError::IllegalNumber, pos, None))
}

const EXACT_POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Parses a JSON number literal (bytes only, no surrounding whitespace) as
/// an `f64`, following spec's fast-path/fallback structure.
pub(crate) fn parse_f64(bytes: &[u8], pos: Position) -> Result<f64, ReaderError> {
    let parts = split_number(bytes, pos)?;

    let total_digits = parts.int_digits.len() + parts.frac_digits.len();
    let (mantissa, used_digits) = {
        let mut combined = Vec::with_capacity(total_digits);
        combined.extend_from_slice(parts.int_digits);
        combined.extend_from_slice(parts.frac_digits);
        digits_to_u64_saturating(&combined)
    };
    let frac_len = parts.frac_digits.len() as i32;
    let explicit_exp = if parts.exp_digits.is_empty() {
        0
    } else {
        exp_to_i32(parts.exp_digits, parts.exp_sign_negative, pos)?
    };
    // e10 shifts the mantissa back to its decimal point, then applies the
    // explicit exponent on top.
    let e10 = explicit_exp - frac_len;

    if used_digits == total_digits && total_digits < 16 && (-22..=22).contains(&e10) {
        let value = if e10 >= 0 {
            (mantissa as f64) * EXACT_POW10[e10 as usize]
        } else {
            (mantissa as f64) / EXACT_POW10[(-e10) as usize]
        };
        let value = if parts.negative { -value } else { value };
        return Ok(value);
    }

    // Slow, exactly-correct path: hand the original byte span (sans any
    // leading `-`, which `core::str`'s parser also accepts) to the
    // platform's dec2flt implementation.
    let text =
        core::str::from_utf8(bytes).map_err(|_| ReaderError::syntax(SyntaxError::IllegalNumber, pos, None))?;
    text.parse::<f64>()
        .map_err(|_| ReaderError::syntax(SyntaxError::IllegalNumber, pos, None))
}

pub(crate) fn parse_f32(bytes: &[u8], pos: Position) -> Result<f32, ReaderError> {
    // f32 has no dedicated fast path in the spec; narrow from the f64 path,
    // which is already exact for all f32-representable decimal literals
    // outside pathological halfway cases handled by the fallback below.
    let wide = parse_f64(bytes, pos)?;
    let text = core::str::from_utf8(bytes).unwrap_or_default();
    if let Ok(narrow) = text.parse::<f32>() {
        return Ok(narrow);
    }
    Ok(wide as f32)
}

/// Formats `value` in the fixed wire form the spec requires: always a
/// decimal point, e.g. `1.0` not `1`.
pub(crate) fn format_f64(value: f64, out: &mut Vec<u8>) {
    if value == 0.0 {
        out.extend_from_slice(if value.is_sign_negative() { b"-0.0" } else { b"0.0" });
        return;
    }
    let mut buf = ryu::Buffer::new();
    let formatted = buf.format_finite(value);
    reshape_ryu_output(formatted, out);
}

pub(crate) fn format_f32(value: f32, out: &mut Vec<u8>) {
    if value == 0.0 {
        out.extend_from_slice(if value.is_sign_negative() { b"-0.0" } else { b"0.0" });
        return;
    }
    let mut buf = ryu::Buffer::new();
    let formatted = buf.format_finite(value);
    reshape_ryu_output(formatted, out);
}

/// `ryu` picks fixed vs. scientific form using its own ~1e21 crossover; the
/// wire format instead follows the Java/jsoniter-scala rule (scientific once
/// the leading digit's decimal exponent is `>= 7` or `<= -4`). So this
/// doesn't just reshape whichever form `ryu` chose — it recovers the
/// significant digits and true exponent from `ryu`'s output (fixed or
/// scientific, it doesn't matter which) and re-renders from scratch under
/// that threshold.
fn reshape_ryu_output(formatted: &str, out: &mut Vec<u8>) {
    let (negative, rest) = match formatted.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, formatted),
    };

    let (mantissa, exp_str) = match rest.find(['e', 'E']) {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, "0"),
    };
    let explicit_exp: i64 = exp_str.parse().unwrap_or(0);

    let (int_part, frac_part) = match mantissa.find('.') {
        Some(idx) => (&mantissa[..idx], &mantissa[idx + 1..]),
        None => (mantissa, ""),
    };

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let point_pos = int_part.len() as i64;

    let lead = digits.bytes().position(|b| b != b'0').unwrap_or(digits.len().saturating_sub(1));
    let significant = digits[lead..].trim_end_matches('0');
    let significant = if significant.is_empty() { &digits[lead..=lead] } else { significant };

    let exponent = (point_pos - lead as i64 - 1) + explicit_exp;

    if negative {
        out.push(b'-');
    }
    if (-3..=6).contains(&exponent) {
        write_fixed(significant, exponent, out);
    } else {
        write_scientific(significant, exponent, out);
    }
}

/// Renders `digits` (the significant digits, leading digit first, no
/// trailing zeros) as fixed decimal notation, given the decimal exponent of
/// the leading digit.
fn write_fixed(digits: &str, exponent: i64, out: &mut Vec<u8>) {
    if exponent >= 0 {
        let int_len = (exponent + 1) as usize;
        let digit_bytes = digits.as_bytes();
        if int_len >= digit_bytes.len() {
            out.extend_from_slice(digit_bytes);
            out.resize(out.len() + (int_len - digit_bytes.len()), b'0');
            out.extend_from_slice(b".0");
        } else {
            out.extend_from_slice(&digit_bytes[..int_len]);
            out.push(b'.');
            out.extend_from_slice(&digit_bytes[int_len..]);
        }
    } else {
        out.extend_from_slice(b"0.");
        let zeros = (-exponent - 1) as usize;
        out.resize(out.len() + zeros, b'0');
        out.extend_from_slice(digits.as_bytes());
    }
}

/// Renders `digits` as `D.DDDE[-]N` scientific notation.
fn write_scientific(digits: &str, exponent: i64, out: &mut Vec<u8>) {
    let digit_bytes = digits.as_bytes();
    out.push(digit_bytes[0]);
    out.push(b'.');
    if digit_bytes.len() > 1 {
        out.extend_from_slice(&digit_bytes[1..]);
    } else {
        out.push(b'0');
    }
    out.push(b'E');
    if exponent < 0 {
        out.push(b'-');
    }
    out.extend_from_slice(exponent.unsigned_abs().to_string().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn fast_path_exact_value() {
        let v = parse_f64(b"1.5", pos()).unwrap();
        assert_eq!(v, 1.5);
    }

    #[test]
    fn scenario_7_1e10_round_trips_exactly() {
        let v = parse_f64(b"7.1E10", pos()).unwrap();
        assert_eq!(v.to_bits(), 7.1e10f64.to_bits());
        let mut out = Vec::new();
        format_f64(v, &mut out);
        assert_eq!(out, b"7.1E10");
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(parse_f64(b"01.5", pos()).is_err());
    }

    #[test]
    fn rejects_bare_dot() {
        assert!(parse_f64(b"1.", pos()).is_err());
        assert!(parse_f64(b".1", pos()).is_err());
    }

    #[test]
    fn format_always_has_decimal_point() {
        let mut out = Vec::new();
        format_f64(1.0, &mut out);
        assert_eq!(out, b"1.0");
    }

    #[test]
    fn small_magnitude_below_fixed_threshold_uses_scientific() {
        let mut out = Vec::new();
        format_f64(0.0001, &mut out);
        assert_eq!(out, b"1.0E-4");
    }

    #[test]
    fn magnitude_at_fixed_threshold_boundary_stays_fixed() {
        let mut out = Vec::new();
        format_f64(0.001, &mut out);
        assert_eq!(out, b"0.001");

        let mut out = Vec::new();
        format_f64(1_234_567.0, &mut out);
        assert_eq!(out, b"1234567.0");
    }

    #[test]
    fn magnitude_just_above_fixed_threshold_uses_scientific() {
        let mut out = Vec::new();
        format_f64(12_345_678.0, &mut out);
        assert_eq!(out, b"1.2345678E7");
    }

    #[test]
    fn underflow_and_overflow_boundaries() {
        // Far below the smallest subnormal: should parse to signed zero,
        // not fail.
        let v = parse_f64(b"1E-400", pos()).unwrap();
        assert_eq!(v, 0.0);
        let v = parse_f64(b"1E400", pos()).unwrap();
        assert!(v.is_infinite());
    }
}
