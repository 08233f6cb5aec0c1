//! Time-of-day parsing/formatting: `LocalTime` and the fractional-seconds
//! grammar shared by every offset-bearing temporal type.

use crate::error::{Position, ReaderError, SyntaxError};
use crate::temporal::date::parse_two_digit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nano: u32,
}

/// Parses `HH:MM:SS` plus an optional `.` and up to 9 fractional digits
/// (trailing digits beyond 9 are rejected, matching spec's "consume up to
/// 9 digits"). Returns the parsed time and bytes consumed.
pub(crate) fn parse_local_time(bytes: &[u8], pos: Position) -> Result<(LocalTime, usize), ReaderError> {
    let (hour, _) = parse_two_digit(bytes, pos, SyntaxError::IllegalHour)?;
    if hour > 23 {
        return Err(ReaderError::syntax(SyntaxError::IllegalHour, pos, None));
    }
    let mut i = 2;
    if bytes.get(i) != Some(&b':') {
        return Err(ReaderError::syntax(SyntaxError::UnexpectedToken { expected: "':'" }, pos, None));
    }
    i += 1;
    let (minute, _) = parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalMinute)?;
    if minute > 59 {
        return Err(ReaderError::syntax(SyntaxError::IllegalMinute, pos, None));
    }
    i += 2;
    if bytes.get(i) != Some(&b':') {
        return Err(ReaderError::syntax(SyntaxError::UnexpectedToken { expected: "':'" }, pos, None));
    }
    i += 1;
    let (second, _) = parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalSecond)?;
    // A leap second (60) is accepted at the grammar level and normalized by
    // the caller folding it into the next minute; reject anything higher.
    if second > 60 {
        return Err(ReaderError::syntax(SyntaxError::IllegalSecond, pos, None));
    }
    i += 2;

    let mut nano = 0u32;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() && i - frac_start < 9 {
            i += 1;
        }
        if i == frac_start {
            return Err(ReaderError::syntax(SyntaxError::IllegalSecond, pos, None));
        }
        let digits = &bytes[frac_start..i];
        let mut scaled = 0u32;
        for &b in digits {
            scaled = scaled * 10 + u32::from(b - b'0');
        }
        nano = scaled * 10u32.pow(9 - digits.len() as u32);
        // Extra fractional digits beyond 9 are a grammar error, not silently
        // dropped.
        if i < bytes.len() && bytes[i].is_ascii_digit() {
            return Err(ReaderError::syntax(SyntaxError::IllegalSecond, pos, None));
        }
    }

    Ok((
        LocalTime {
            hour,
            minute,
            second,
            nano,
        },
        i,
    ))
}

/// Formats with the minimal fractional width that preserves exactness: 0,
/// 3, 6, or 9 digits, per spec's "seconds-nanos form".
pub(crate) fn format_local_time(time: LocalTime, out: &mut Vec<u8>) {
    crate::temporal::date::format_two_digit(time.hour, out);
    out.push(b':');
    crate::temporal::date::format_two_digit(time.minute, out);
    out.push(b':');
    crate::temporal::date::format_two_digit(time.second, out);
    format_nanos(time.nano, out);
}

pub(crate) fn format_nanos(nano: u32, out: &mut Vec<u8>) {
    if nano == 0 {
        return;
    }
    out.push(b'.');
    let width = if nano % 1_000_000 == 0 {
        3
    } else if nano % 1_000 == 0 {
        6
    } else {
        9
    };
    let scaled = nano / 10u32.pow(9 - width);
    out.extend_from_slice(format!("{scaled:0width$}", width = width as usize).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn parses_time_without_fraction() {
        let (t, consumed) = parse_local_time(b"23:59:59", pos()).unwrap();
        assert_eq!(t, LocalTime { hour: 23, minute: 59, second: 59, nano: 0 });
        assert_eq!(consumed, 8);
    }

    #[test]
    fn parses_nanosecond_fraction() {
        let (t, _) = parse_local_time(b"00:00:00.123456789", pos()).unwrap();
        assert_eq!(t.nano, 123_456_789);
    }

    #[test]
    fn rejects_hour_above_23() {
        assert!(parse_local_time(b"24:00:00", pos()).is_err());
    }

    #[test]
    fn minimal_fraction_width_round_trips() {
        let mut out = Vec::new();
        format_local_time(LocalTime { hour: 1, minute: 2, second: 3, nano: 500_000_000 }, &mut out);
        assert_eq!(out, b"01:02:03.500");
    }
}
