//! The push-style writer: the emitter driver. Drives indentation and
//! comma/colon interleaving between structural calls, formatting primitives
//! through the number/text/temporal engines.

use std::io::Write;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::config::WriterConfig;
use crate::error::WriterError;
use crate::number::{floats, integers};
use crate::text::strings::write_escaped_str;

macro_rules! int_writer {
    ($name:ident, $ty:ty, $format:path) => {
        pub fn $name(&mut self, value: $ty) -> Result<(), WriterError> {
            self.before_value()?;
            $format(value, &mut self.buf);
            self.comma_needed = true;
            self.maybe_flush()
        }
    };
}

/// Where a [`JsonWriter`] flushes bytes once its internal buffer fills.
enum Sink<'a> {
    /// No sink attached: the caller collects `finish()`'s return value
    /// directly (the `Vec`/fixed-slice output carriers).
    None,
    Write(&'a mut dyn Write),
}

/// The emitter driver. Not safe for concurrent use; one instance is
/// constructed per top-level encode call by the entry points in
/// [`crate::codec`].
pub struct JsonWriter<'a> {
    buf: Vec<u8>,
    config: WriterConfig,
    sink: Sink<'a>,
    depth: usize,
    comma_needed: bool,
    after_key: bool,
    level_has_content: Vec<bool>,
}

impl<'a> JsonWriter<'a> {
    fn new(config: WriterConfig, sink: Sink<'a>) -> Self {
        Self {
            buf: Vec::with_capacity(config.preferred_buf_size),
            config,
            sink,
            depth: 0,
            comma_needed: false,
            after_key: false,
            level_has_content: Vec::new(),
        }
    }

    pub(crate) fn over_vec(config: WriterConfig) -> Self {
        Self::new(config, Sink::None)
    }

    pub(crate) fn over_writer(out: &'a mut dyn Write, config: WriterConfig) -> Self {
        Self::new(config, Sink::Write(out))
    }

    #[inline]
    fn pretty(&self) -> bool {
        self.config.indention_step > 0
    }

    /// Consumes the writer, flushing anything buffered and returning the
    /// final bytes for sinkless carriers (empty for stream-backed writers,
    /// which have already flushed everything).
    pub(crate) fn finish(mut self) -> Result<Vec<u8>, WriterError> {
        self.flush_to_sink()?;
        Ok(std::mem::take(&mut self.buf))
    }

    fn flush_to_sink(&mut self) -> Result<(), WriterError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        match &mut self.sink {
            Sink::None => Ok(()),
            Sink::Write(w) => {
                w.write_all(&self.buf).map_err(|e| WriterError::Io(e.to_string()))?;
                self.buf.clear();
                Ok(())
            }
        }
    }

    fn maybe_flush(&mut self) -> Result<(), WriterError> {
        if matches!(self.sink, Sink::Write(_)) && self.buf.len() >= self.config.preferred_buf_size {
            self.flush_to_sink()?;
        }
        if matches!(self.sink, Sink::None) && self.buf.len() > self.config.max_buf_size {
            return Err(WriterError::TooLongOutput);
        }
        Ok(())
    }

    fn write_indent(&mut self) {
        self.buf.push(b'\n');
        let spaces = self.depth * usize::from(self.config.indention_step);
        self.buf.resize(self.buf.len() + spaces, b' ');
    }

    /// Common prologue for every value-level emission: emits a comma if the
    /// previous sibling at this level requires one, indents in pretty mode,
    /// and marks the enclosing level as non-empty. A no-op (beyond clearing
    /// the flag) for the value immediately following `write_key`.
    fn before_value(&mut self) -> Result<(), WriterError> {
        if self.after_key {
            self.after_key = false;
            return Ok(());
        }
        if self.comma_needed {
            self.buf.push(b',');
        }
        if self.pretty() {
            self.write_indent();
        }
        if let Some(top) = self.level_has_content.last_mut() {
            *top = true;
        }
        self.maybe_flush()
    }

    // ---- structural -----------------------------------------------------

    pub fn write_array_start(&mut self) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'[');
        self.level_has_content.push(false);
        self.depth += 1;
        self.comma_needed = false;
        Ok(())
    }

    pub fn write_array_end(&mut self) -> Result<(), WriterError> {
        self.depth -= 1;
        let had_content = self.level_has_content.pop().unwrap_or(false);
        if had_content && self.pretty() {
            self.write_indent();
        }
        self.buf.push(b']');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_object_start(&mut self) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'{');
        self.level_has_content.push(false);
        self.depth += 1;
        self.comma_needed = false;
        Ok(())
    }

    pub fn write_object_end(&mut self) -> Result<(), WriterError> {
        self.depth -= 1;
        let had_content = self.level_has_content.pop().unwrap_or(false);
        if had_content && self.pretty() {
            self.write_indent();
        }
        self.buf.push(b'}');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_key(&mut self, key: &str) -> Result<(), WriterError> {
        self.before_value()?;
        write_escaped_str(key, self.config.escape_unicode, &mut self.buf)?;
        self.buf.push(b':');
        if self.pretty() {
            self.buf.push(b' ');
        }
        self.after_key = true;
        Ok(())
    }

    pub fn write_non_escaped_ascii_key(&mut self, key: &str) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        self.buf.extend_from_slice(key.as_bytes());
        self.buf.push(b'"');
        self.buf.push(b':');
        if self.pretty() {
            self.buf.push(b' ');
        }
        self.after_key = true;
        Ok(())
    }

    // ---- scalar values ----------------------------------------------------

    pub fn write_null(&mut self) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.extend_from_slice(b"null");
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.extend_from_slice(if value { b"true" } else { b"false" });
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_val_str(&mut self, value: &str) -> Result<(), WriterError> {
        self.before_value()?;
        write_escaped_str(value, self.config.escape_unicode, &mut self.buf)?;
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_non_escaped_ascii_val(&mut self, value: &str) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_raw_val(&mut self, bytes: &[u8]) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.extend_from_slice(bytes);
        self.comma_needed = true;
        self.maybe_flush()
    }

    int_writer!(write_i64, i64, integers::format_i64);
    int_writer!(write_u64, u64, integers::format_u64);

    pub fn write_f64(&mut self, value: f64) -> Result<(), WriterError> {
        if !value.is_finite() {
            return Err(WriterError::IllegalNumber("non-finite float"));
        }
        self.before_value()?;
        floats::format_f64(value, &mut self.buf);
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), WriterError> {
        if !value.is_finite() {
            return Err(WriterError::IllegalNumber("non-finite float"));
        }
        self.before_value()?;
        floats::format_f32(value, &mut self.buf);
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_bigint(&mut self, value: &BigInt) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.extend_from_slice(value.to_string().as_bytes());
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_bigdecimal(&mut self, value: &BigDecimal) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.extend_from_slice(value.to_string().as_bytes());
        self.comma_needed = true;
        self.maybe_flush()
    }

    /// Emits an already-formatted numeric/boolean textual form wrapped in
    /// quotes, for schemas requiring stringified numbers (e.g. an object
    /// whose values must serialize as JSON strings, `{"2":"true"}`).
    pub fn write_val_as_string(&mut self, text: &str) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_base16_val(&mut self, bytes: &[u8], lower_case: bool) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        crate::text::base16::encode(bytes, lower_case, &mut self.buf);
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_base64_val(&mut self, bytes: &[u8], do_padding: bool) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        crate::text::base64::encode_standard(bytes, do_padding, &mut self.buf);
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_base64_url_val(&mut self, bytes: &[u8], do_padding: bool) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        crate::text::base64::encode_url(bytes, do_padding, &mut self.buf);
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_uuid(&mut self, id: uuid::Uuid) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        crate::uuid::format_uuid(id, &mut self.buf);
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    fn write_quoted_with(&mut self, format: impl FnOnce(&mut Vec<u8>)) -> Result<(), WriterError> {
        self.before_value()?;
        self.buf.push(b'"');
        format(&mut self.buf);
        self.buf.push(b'"');
        self.comma_needed = true;
        self.maybe_flush()
    }

    pub fn write_local_date(&mut self, d: crate::temporal::LocalDate) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::datetime::format_local_date(d, out))
    }

    pub fn write_local_time(&mut self, t: crate::temporal::LocalTime) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::time::format_local_time(t, out))
    }

    pub fn write_local_date_time(&mut self, dt: crate::temporal::LocalDateTime) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::datetime::format_local_date_time(dt, out))
    }

    pub fn write_offset_date_time(&mut self, odt: crate::temporal::OffsetDateTime) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::datetime::format_offset_date_time(odt, out))
    }

    pub fn write_zoned_date_time(&mut self, zdt: crate::temporal::ZonedDateTime) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::datetime::format_zoned_date_time(zdt, out))
    }

    pub fn write_instant(&mut self, instant: crate::temporal::Instant) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::datetime::format_instant(instant, out))
    }

    pub fn write_duration(&mut self, d: crate::temporal::Duration) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::duration::format_duration(d, out))
    }

    pub fn write_period(&mut self, p: crate::temporal::Period) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::duration::format_period(p, out))
    }

    pub fn write_year(&mut self, y: crate::temporal::Year) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::date::format_year(y.0, out))
    }

    pub fn write_year_month(&mut self, ym: crate::temporal::YearMonth) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::date::format_year_month(ym, out))
    }

    pub fn write_month_day(&mut self, md: crate::temporal::MonthDay) -> Result<(), WriterError> {
        self.write_quoted_with(|out| crate::temporal::date::format_month_day(md, out))
    }

    /// Emits a *numeric* (non-string) decimal of the exact timestamp, using
    /// the shortest trailing-zero-trimmed fractional width; nanos outside
    /// `[0, 10^9)` fail with `IllegalNanoseconds`.
    pub fn write_timestamp_val(&mut self, epoch_second: i64, nano_of_second: i64) -> Result<(), WriterError> {
        if !(0..1_000_000_000).contains(&nano_of_second) {
            return Err(WriterError::IllegalNanoseconds(nano_of_second));
        }
        self.before_value()?;
        self.buf.extend_from_slice(epoch_second.to_string().as_bytes());
        if nano_of_second != 0 {
            self.buf.push(b'.');
            let mut digits = format!("{nano_of_second:09}");
            while digits.ends_with('0') {
                digits.pop();
            }
            self.buf.extend_from_slice(digits.as_bytes());
        }
        self.comma_needed = true;
        self.maybe_flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> WriterConfig {
        WriterConfig::default()
    }

    fn pretty(step: u8) -> WriterConfig {
        WriterConfig { indention_step: step, ..WriterConfig::default() }
    }

    #[test]
    fn scenario_7_pretty_array() {
        let mut w = JsonWriter::over_vec(pretty(2));
        w.write_array_start().unwrap();
        w.write_i64(1).unwrap();
        w.write_val_str("VVV").unwrap();
        w.write_non_escaped_ascii_val("WWW").unwrap();
        w.write_val_as_string("2").unwrap();
        w.write_val_as_string("true").unwrap();
        w.write_raw_val(b"3").unwrap();
        w.write_array_end().unwrap();
        let out = w.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\n  1,\n  \"VVV\",\n  \"WWW\",\n  \"2\",\n  \"true\",\n  3\n]"
        );
    }

    #[test]
    fn compact_object_with_key_value_pairs() {
        let mut w = JsonWriter::over_vec(compact());
        w.write_object_start().unwrap();
        w.write_key("a").unwrap();
        w.write_i64(1).unwrap();
        w.write_key("b").unwrap();
        w.write_i64(2).unwrap();
        w.write_object_end().unwrap();
        assert_eq!(w.finish().unwrap(), br#"{"a":1,"b":2}"#);
    }

    #[test]
    fn pretty_object_nests_indentation() {
        let mut w = JsonWriter::over_vec(pretty(2));
        w.write_object_start().unwrap();
        w.write_key("a").unwrap();
        w.write_i64(1).unwrap();
        w.write_object_end().unwrap();
        assert_eq!(String::from_utf8(w.finish().unwrap()).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn empty_array_and_object_have_no_interior_newline() {
        let mut w = JsonWriter::over_vec(pretty(2));
        w.write_array_start().unwrap();
        w.write_array_end().unwrap();
        assert_eq!(w.finish().unwrap(), b"[]");
    }

    #[test]
    fn rejects_non_finite_floats() {
        let mut w = JsonWriter::over_vec(compact());
        assert!(w.write_f64(f64::NAN).is_err());
        assert!(w.write_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn timestamp_val_trims_trailing_zeros() {
        let mut w = JsonWriter::over_vec(compact());
        w.write_timestamp_val(100, 500_000_000).unwrap();
        assert_eq!(w.finish().unwrap(), b"100.5");
    }

    #[test]
    fn timestamp_val_rejects_out_of_range_nanos() {
        let mut w = JsonWriter::over_vec(compact());
        assert!(w.write_timestamp_val(0, 1_000_000_000).is_err());
    }

    #[test]
    fn scenario_6_round_trip_both_escape_modes() {
        let mut w = JsonWriter::over_vec(WriterConfig { escape_unicode: false, ..compact() });
        w.write_val_str("ї\u{8}c\u{0}").unwrap();
        assert_eq!(w.finish().unwrap(), "\"ї\\bc\\u0000\"".as_bytes());

        let mut w = JsonWriter::over_vec(WriterConfig { escape_unicode: true, ..compact() });
        w.write_val_str("ї\u{8}c\u{0}").unwrap();
        assert_eq!(w.finish().unwrap(), b"\"\\u0457\\bc\\u0000\"");
    }

    #[test]
    fn writes_year_month_and_month_day() {
        let mut w = JsonWriter::over_vec(compact());
        w.write_year_month(crate::temporal::YearMonth { year: 2024, month: 2 }).unwrap();
        assert_eq!(w.finish().unwrap(), br#""2024-02""#);

        let mut w = JsonWriter::over_vec(compact());
        w.write_month_day(crate::temporal::MonthDay { month: 2, day: 29 }).unwrap();
        assert_eq!(w.finish().unwrap(), br#""--02-29""#);
    }
}
