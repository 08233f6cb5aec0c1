//! `Duration` (`PT...`) and `Period` (`P...`) parsing/formatting.
//!
//! Each numeric component (hours/minutes/seconds, or years/months/days) may
//! carry its own leading sign, independent of the others — the grammar
//! scenario 4 exercises requires this rather than ISO-8601's single
//! whole-duration sign. Formatting decomposes the stored `(seconds, nanos)`
//! pair back into hours/minutes/seconds components the same way the
//! reference `java.time.Duration.toString()` algorithm does, which is what
//! reproduces scenario 4's exact output byte-for-byte.

use crate::error::{Position, ReaderError, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    pub seconds: i64,
    /// Always in `[0, 1_000_000_000)`; the fractional part is added to
    /// `seconds`, never subtracted, so e.g. "-60.000000001s" normalizes to
    /// `seconds = -61, nanos = 999_999_999`.
    pub nanos: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

struct SignedNumber {
    whole: i64,
    negative: bool,
    frac_nanos: Option<u32>,
    consumed: usize,
}

fn parse_signed_number(bytes: &[u8], allow_fraction: bool) -> Option<SignedNumber> {
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative || bytes.first() == Some(&b'+') {
        i += 1;
    }
    let digit_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digit_start {
        return None;
    }
    let mut whole: i64 = 0;
    for &b in &bytes[digit_start..i] {
        whole = whole * 10 + i64::from(b - b'0');
    }

    let mut frac_nanos = None;
    if allow_fraction && bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() && i - frac_start < 9 {
            i += 1;
        }
        if i == frac_start {
            return None;
        }
        let digits = &bytes[frac_start..i];
        let mut scaled = 0u32;
        for &b in digits {
            scaled = scaled * 10 + u32::from(b - b'0');
        }
        frac_nanos = Some(scaled * 10u32.pow(9 - digits.len() as u32));
    }

    Some(SignedNumber {
        whole: if negative { -whole } else { whole },
        negative,
        frac_nanos,
        consumed: i,
    })
}

/// Parses `PT[-]h'H'[-]m'M'[-]s['.'nnnnnnnnn]'S'`, each component optional
/// but at least one must be present.
pub(crate) fn parse_duration(bytes: &[u8], pos: Position) -> Result<(Duration, usize), ReaderError> {
    if bytes.len() < 2 || bytes[0] != b'P' || !matches!(bytes[1], b'T' | b't') {
        return Err(ReaderError::syntax(SyntaxError::IllegalDuration, pos, None));
    }
    let mut i = 2;
    let mut total_nanos: i128 = 0;
    let mut saw_component = false;

    if let Some(n) = parse_signed_number(&bytes[i..], false) {
        if matches!(bytes.get(i + n.consumed), Some(b'H' | b'h')) {
            total_nanos += i128::from(n.whole) * 3_600_000_000_000;
            i += n.consumed + 1;
            saw_component = true;
        }
    }
    if let Some(n) = parse_signed_number(&bytes[i..], false) {
        if matches!(bytes.get(i + n.consumed), Some(b'M' | b'm')) {
            total_nanos += i128::from(n.whole) * 60_000_000_000;
            i += n.consumed + 1;
            saw_component = true;
        }
    }
    if let Some(n) = parse_signed_number(&bytes[i..], true) {
        if matches!(bytes.get(i + n.consumed), Some(b'S' | b's')) {
            total_nanos += i128::from(n.whole) * 1_000_000_000;
            if let Some(frac) = n.frac_nanos {
                total_nanos += if n.negative { -i128::from(frac) } else { i128::from(frac) };
            }
            i += n.consumed + 1;
            saw_component = true;
        }
    }

    if !saw_component {
        return Err(ReaderError::syntax(SyntaxError::IllegalDuration, pos, None));
    }

    let seconds = total_nanos.div_euclid(1_000_000_000) as i64;
    let nanos = total_nanos.rem_euclid(1_000_000_000) as u32;

    Ok((Duration { seconds, nanos }, i))
}

/// Decomposes `(seconds, nanos)` into hours/minutes/seconds components via
/// truncating division (matching Rust's and Java's `/`/`%` on signed
/// integers), then applies the same negative-seconds/positive-nanos
/// adjustment `java.time.Duration` uses so the fractional part always
/// prints with the sign folded into the seconds component.
pub(crate) fn format_duration(d: Duration, out: &mut Vec<u8>) {
    out.extend_from_slice(b"PT");
    if d.seconds == 0 && d.nanos == 0 {
        out.extend_from_slice(b"0S");
        return;
    }

    let hours = d.seconds / 3600;
    let minutes = (d.seconds % 3600) / 60;
    let mut secs = d.seconds % 60;
    let mut nanos = d.nanos;
    let mut force_negative_zero = false;
    if secs < 0 && nanos > 0 {
        nanos = 1_000_000_000 - nanos;
        secs += 1;
        if secs == 0 {
            force_negative_zero = true;
        }
    }

    if hours != 0 {
        out.extend_from_slice(hours.to_string().as_bytes());
        out.push(b'H');
    }
    if minutes != 0 {
        out.extend_from_slice(minutes.to_string().as_bytes());
        out.push(b'M');
    }
    if secs != 0 || nanos != 0 || force_negative_zero || (hours == 0 && minutes == 0) {
        if force_negative_zero {
            out.extend_from_slice(b"-0");
        } else {
            out.extend_from_slice(secs.to_string().as_bytes());
        }
        super::time::format_nanos(nanos, out);
        out.push(b'S');
    }
}

/// Parses `P[-]y'Y'[-]m'M'[-]d'D'`.
pub(crate) fn parse_period(bytes: &[u8], pos: Position) -> Result<(Period, usize), ReaderError> {
    if bytes.first() != Some(&b'P') {
        return Err(ReaderError::syntax(SyntaxError::IllegalPeriod, pos, None));
    }
    let mut i = 1;
    let mut years = 0;
    let mut months = 0;
    let mut days = 0;
    let mut saw_component = false;

    if let Some(n) = parse_signed_number(&bytes[i..], false) {
        if bytes.get(i + n.consumed) == Some(&b'Y') {
            years = n.whole as i32;
            i += n.consumed + 1;
            saw_component = true;
        }
    }
    if let Some(n) = parse_signed_number(&bytes[i..], false) {
        if bytes.get(i + n.consumed) == Some(&b'M') {
            months = n.whole as i32;
            i += n.consumed + 1;
            saw_component = true;
        }
    }
    if let Some(n) = parse_signed_number(&bytes[i..], false) {
        if bytes.get(i + n.consumed) == Some(&b'D') {
            days = n.whole as i32;
            i += n.consumed + 1;
            saw_component = true;
        }
    }

    if !saw_component {
        return Err(ReaderError::syntax(SyntaxError::IllegalPeriod, pos, None));
    }

    Ok((Period { years, months, days }, i))
}

pub(crate) fn format_period(p: Period, out: &mut Vec<u8>) {
    out.push(b'P');
    if p.years == 0 && p.months == 0 && p.days == 0 {
        out.extend_from_slice(b"0D");
        return;
    }
    if p.years != 0 {
        out.extend_from_slice(p.years.to_string().as_bytes());
        out.push(b'Y');
    }
    if p.months != 0 {
        out.extend_from_slice(p.months.to_string().as_bytes());
        out.push(b'M');
    }
    if p.days != 0 {
        out.extend_from_slice(p.days.to_string().as_bytes());
        out.push(b'D');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn scenario_4_negative_components_combine_and_round_trip() {
        let (d, consumed) = parse_duration(b"PT-1M-0.000000001S", pos()).unwrap();
        assert_eq!(d.seconds, -61);
        assert_eq!(d.nanos, 999_999_999);
        assert_eq!(consumed, "PT-1M-0.000000001S".len());
        let mut out = Vec::new();
        format_duration(d, &mut out);
        assert_eq!(out, b"PT-1M-0.000000001S");
    }

    #[test]
    fn positive_duration_round_trips() {
        let (d, _) = parse_duration(b"PT1H30M", pos()).unwrap();
        assert_eq!(d.seconds, 5400);
        assert_eq!(d.nanos, 0);
        let mut out = Vec::new();
        format_duration(d, &mut out);
        assert_eq!(out, b"PT1H30M");
    }

    #[test]
    fn period_with_all_components() {
        let (p, _) = parse_period(b"P1Y2M3D", pos()).unwrap();
        assert_eq!(p, Period { years: 1, months: 2, days: 3 });
    }

    #[test]
    fn zero_duration_formats_as_pt0s() {
        let mut out = Vec::new();
        format_duration(Duration { seconds: 0, nanos: 0 }, &mut out);
        assert_eq!(out, b"PT0S");
    }
}
