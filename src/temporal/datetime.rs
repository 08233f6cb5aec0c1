//! Date-time composites: `LocalDate`, `LocalDateTime`, `OffsetDateTime`,
//! `ZonedDateTime`, `Instant`.
//!
//! Grammars are hand-written fixed-format parsers over bytes;
//! `chrono` supplies calendar arithmetic (leap-year-aware day counting,
//! epoch-second conversion) rather than its own lenient parser.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;

use crate::error::{Position, ReaderError, SyntaxError};
use crate::temporal::date::{self, LocalDate};
use crate::temporal::time::{self, LocalTime};
use crate::temporal::zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalDateTime {
    pub date: LocalDate,
    pub time: LocalTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetDateTime {
    pub date_time: LocalDateTime,
    /// Offset from UTC in whole seconds, east-positive.
    pub offset_seconds: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instant {
    pub epoch_second: i64,
    pub nano: u32,
}

// `Tz` (chrono_tz) does not implement `serde::{Serialize, Deserialize}`
// without that crate's own `serde` feature, so `ZonedDateTime` is excluded
// from the ambient serde support the other owned temporal types get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedDateTime {
    pub date_time: LocalDateTime,
    pub offset_seconds: i32,
    pub zone: Option<Tz>,
}

/// `parse_local_time` admits `second == 60` as a leap second (`time.rs`);
/// folding it forward into second 0 of the next minute here — rather than
/// clamping it down to 59 — is what makes that acceptance actually mean
/// something instead of silently losing the leap second.
fn to_naive(date: LocalDate, time: LocalTime, pos: Position) -> Result<NaiveDateTime, ReaderError> {
    let d = NaiveDate::from_ymd_opt(date.year, date.month, date.day)
        .ok_or_else(|| ReaderError::syntax(SyntaxError::IllegalDay, pos, None))?;
    if time.second == 60 {
        let t = NaiveTime::from_hms_opt(time.hour, time.minute, 59)
            .ok_or_else(|| ReaderError::syntax(SyntaxError::IllegalSecond, pos, None))?;
        return NaiveDateTime::new(d, t)
            .checked_add_signed(chrono::Duration::seconds(1))
            .ok_or_else(|| ReaderError::syntax(SyntaxError::IllegalSecond, pos, None));
    }
    let t = NaiveTime::from_hms_nano_opt(time.hour, time.minute, time.second, time.nano)
        .ok_or_else(|| ReaderError::syntax(SyntaxError::IllegalSecond, pos, None))?;
    Ok(NaiveDateTime::new(d, t))
}

pub(crate) fn parse_local_date(bytes: &[u8], pos: Position) -> Result<(LocalDate, usize), ReaderError> {
    let (year, mut i) = date::parse_year(bytes, pos)?;
    if bytes.get(i) != Some(&b'-') {
        return Err(ReaderError::syntax(SyntaxError::UnexpectedToken { expected: "'-'" }, pos, None));
    }
    i += 1;
    let (month, _) = date::parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalMonth)?;
    date::validate_month(month, pos)?;
    i += 2;
    if bytes.get(i) != Some(&b'-') {
        return Err(ReaderError::syntax(SyntaxError::UnexpectedToken { expected: "'-'" }, pos, None));
    }
    i += 1;
    let (day, _) = date::parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalDay)?;
    date::validate_day(year, month, day, pos)?;
    i += 2;
    Ok((LocalDate { year, month, day }, i))
}

pub(crate) fn format_local_date(d: LocalDate, out: &mut Vec<u8>) {
    date::format_year(d.year, out);
    out.push(b'-');
    date::format_two_digit(d.month, out);
    out.push(b'-');
    date::format_two_digit(d.day, out);
}

pub(crate) fn parse_local_date_time(bytes: &[u8], pos: Position) -> Result<(LocalDateTime, usize), ReaderError> {
    let (date, mut i) = parse_local_date(bytes, pos)?;
    if !matches!(bytes.get(i), Some(b'T') | Some(b't')) {
        return Err(ReaderError::syntax(SyntaxError::UnexpectedToken { expected: "'T'" }, pos, None));
    }
    i += 1;
    let (time, consumed) = time::parse_local_time(&bytes[i..], pos)?;
    i += consumed;
    Ok((LocalDateTime { date, time }, i))
}

pub(crate) fn format_local_date_time(dt: LocalDateTime, out: &mut Vec<u8>) {
    format_local_date(dt.date, out);
    out.push(b'T');
    time::format_local_time(dt.time, out);
}

/// Parses `Z`, or a sign followed by `HH[:MM[:SS]]`, into a signed
/// east-positive offset in total seconds.
pub(crate) fn parse_offset(bytes: &[u8], pos: Position) -> Result<(i32, usize), ReaderError> {
    match bytes.first() {
        Some(b'Z') | Some(b'z') => Ok((0, 1)),
        Some(&sign_byte @ (b'+' | b'-')) => {
            let negative = sign_byte == b'-';
            let mut i = 1;
            let (hour, _) = date::parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalTimezoneOffsetHour)?;
            if hour > 18 {
                return Err(ReaderError::syntax(SyntaxError::IllegalTimezoneOffsetHour, pos, None));
            }
            i += 2;
            let mut minute = 0;
            let mut second = 0;
            if bytes.get(i) == Some(&b':') {
                i += 1;
                let (m, _) = date::parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalTimezoneOffsetMinute)?;
                if m > 59 {
                    return Err(ReaderError::syntax(SyntaxError::IllegalTimezoneOffsetMinute, pos, None));
                }
                minute = m;
                i += 2;
                if bytes.get(i) == Some(&b':') {
                    i += 1;
                    let (s, _) = date::parse_two_digit(&bytes[i..], pos, SyntaxError::IllegalTimezoneOffsetSecond)?;
                    if s > 59 {
                        return Err(ReaderError::syntax(SyntaxError::IllegalTimezoneOffsetSecond, pos, None));
                    }
                    second = s;
                    i += 2;
                }
            }
            let total = (hour * 3600 + minute * 60 + second) as i32;
            Ok((if negative { -total } else { total }, i))
        }
        _ => Err(ReaderError::syntax(SyntaxError::IllegalTimezone, pos, None)),
    }
}

pub(crate) fn format_offset(offset_seconds: i32, out: &mut Vec<u8>) {
    if offset_seconds == 0 {
        out.push(b'Z');
        return;
    }
    out.push(if offset_seconds < 0 { b'-' } else { b'+' });
    let abs = offset_seconds.unsigned_abs();
    date::format_two_digit(abs / 3600, out);
    let minute = (abs % 3600) / 60;
    let second = abs % 60;
    if minute != 0 || second != 0 {
        out.push(b':');
        date::format_two_digit(minute, out);
        if second != 0 {
            out.push(b':');
            date::format_two_digit(second, out);
        }
    }
}

pub(crate) fn parse_offset_date_time(bytes: &[u8], pos: Position) -> Result<(OffsetDateTime, usize), ReaderError> {
    let (date_time, mut i) = parse_local_date_time(bytes, pos)?;
    let (offset_seconds, consumed) = parse_offset(&bytes[i..], pos)?;
    i += consumed;
    Ok((OffsetDateTime { date_time, offset_seconds }, i))
}

pub(crate) fn format_offset_date_time(odt: OffsetDateTime, out: &mut Vec<u8>) {
    format_local_date_time(odt.date_time, out);
    format_offset(odt.offset_seconds, out);
}

pub(crate) fn parse_zoned_date_time(bytes: &[u8], pos: Position) -> Result<(ZonedDateTime, usize), ReaderError> {
    let (offset_dt, mut i) = parse_offset_date_time(bytes, pos)?;
    let mut zone = None;
    if bytes.get(i) == Some(&b'[') {
        let start = i + 1;
        let end = bytes[start..]
            .iter()
            .position(|&b| b == b']')
            .ok_or_else(|| ReaderError::syntax(SyntaxError::IllegalTimezone, pos, None))?
            + start;
        zone = Some(zone::resolve_zone_id(&bytes[start..end], pos)?);
        i = end + 1;
    }
    Ok((
        ZonedDateTime {
            date_time: offset_dt.date_time,
            offset_seconds: offset_dt.offset_seconds,
            zone,
        },
        i,
    ))
}

pub(crate) fn format_zoned_date_time(zdt: ZonedDateTime, out: &mut Vec<u8>) {
    format_local_date_time(zdt.date_time, out);
    format_offset(zdt.offset_seconds, out);
    if let Some(zone) = zdt.zone {
        out.push(b'[');
        out.extend_from_slice(zone.name().as_bytes());
        out.push(b']');
    }
}

pub(crate) fn parse_instant(bytes: &[u8], pos: Position) -> Result<(Instant, usize), ReaderError> {
    let (odt, consumed) = parse_offset_date_time(bytes, pos)?;
    let naive = to_naive(odt.date_time.date, odt.date_time.time, pos)?;
    let epoch_second = naive.and_utc().timestamp() - i64::from(odt.offset_seconds);
    Ok((
        Instant {
            epoch_second,
            nano: odt.date_time.time.nano,
        },
        consumed,
    ))
}

pub(crate) fn format_instant(instant: Instant, out: &mut Vec<u8>) {
    let naive = chrono::DateTime::from_timestamp(instant.epoch_second, instant.nano)
        .expect("epoch_second/nano pair produced by our own parser is always in range")
        .naive_utc();
    let date = LocalDate {
        year: naive.date().year(),
        month: naive.date().month(),
        day: naive.date().day(),
    };
    let time = LocalTime {
        hour: naive.time().hour(),
        minute: naive.time().minute(),
        second: naive.time().second(),
        nano: instant.nano,
    };
    format_local_date_time(LocalDateTime { date, time }, out);
    out.push(b'Z');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn scenario_3_instant_before_epoch() {
        let (instant, _) = parse_instant(b"1969-12-31T23:59:59Z", pos()).unwrap();
        assert_eq!(instant.epoch_second, -1);
        assert_eq!(instant.nano, 0);
        let mut out = Vec::new();
        format_instant(instant, &mut out);
        assert_eq!(out, b"1969-12-31T23:59:59Z");
    }

    #[test]
    fn leap_second_folds_into_next_minute_across_year_boundary() {
        let (instant, _) = parse_instant(b"1969-12-31T23:59:60Z", pos()).unwrap();
        assert_eq!(instant.epoch_second, 0);
        let mut out = Vec::new();
        format_instant(instant, &mut out);
        assert_eq!(out, b"1970-01-01T00:00:00Z");
    }

    #[test]
    fn parses_offset_with_minutes() {
        let (odt, _) = parse_offset_date_time(b"2024-01-01T00:00:00+05:30", pos()).unwrap();
        assert_eq!(odt.offset_seconds, 5 * 3600 + 30 * 60);
    }

    #[test]
    fn parses_zoned_date_time_with_bracketed_zone() {
        let (zdt, consumed) =
            parse_zoned_date_time(b"2024-06-01T12:00:00+03:00[Europe/Kyiv]", pos()).unwrap();
        assert!(zdt.zone.is_some());
        assert_eq!(consumed, "2024-06-01T12:00:00+03:00[Europe/Kyiv]".len());
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(parse_local_date(b"2024-13-01", pos()).is_err());
    }

    #[test]
    fn rejects_february_30() {
        assert!(parse_local_date(b"2023-02-30", pos()).is_err());
    }
}
