//! The pull-style reader: the tokenizer driver. Dispatches whitespace
//! skipping, token classification, structural skip, and typed value parsing
//! to the number/text/temporal engines, using the byte ring for refill and
//! the char buffer as scratch space for decoded strings.

use std::io::Read;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::byte_ring::ByteRing;
use crate::char_buffer::{combine_surrogates, CharBuffer, CharSlice};
use crate::config::ReaderConfig;
use crate::error::{render_hex_dump, PreconditionError, Position, ReaderError, SyntaxError};
use crate::number::{bigdecimal as bigdecimal_engine, bigint as bigint_engine, floats, integers};
use crate::text::strings::{
    decode_unicode_escape, decode_utf8_sequence, short_escape_value, utf8_sequence_len,
};

/// Where a [`JsonReader`] pulls additional bytes from once `buf[head..tail]`
/// is exhausted.
enum RefillSource<'a> {
    /// A slice, owned string, or byte-buffer carrier: no more bytes are
    /// ever available once `tail` is reached.
    None,
    /// A pull-based byte stream.
    Read(&'a mut dyn Read),
}

/// The tokenizer driver. Not safe for concurrent use; one instance is
/// constructed per top-level decode call by the entry points in
/// [`crate::codec`].
pub struct JsonReader<'a> {
    ring: ByteRing,
    chars: CharBuffer,
    config: ReaderConfig,
    source: RefillSource<'a>,
    /// The byte at `head - 1`, for `is_current_token`/`rollback_token`. `None`
    /// until the first byte has been consumed this call.
    last_byte: Option<u8>,
}

macro_rules! int_reader {
    ($name:ident, $ty:ty, $parse:path) => {
        pub fn $name(&mut self) -> Result<$ty, ReaderError> {
            let (start, end) = self.scan_number_span(false)?;
            let pos = self.ring.position();
            $parse(self.number_bytes(start, end), pos)
        }
    };
}

const WHITESPACE: [u8; 4] = [0x20, 0x09, 0x0A, 0x0D];

#[inline]
fn is_whitespace(b: u8) -> bool {
    WHITESPACE.contains(&b)
}

impl<'a> JsonReader<'a> {
    fn new(config: ReaderConfig, source: RefillSource<'a>) -> Self {
        Self {
            ring: ByteRing::new(config.preferred_buf_size, config.max_buf_size),
            chars: CharBuffer::new(config.preferred_char_buf_size, config.max_char_buf_size),
            config,
            source,
            last_byte: None,
        }
    }

    pub(crate) fn over_slice(bytes: &[u8], config: ReaderConfig) -> Self {
        let mut r = Self::new(config, RefillSource::None);
        r.ring.reset_over(bytes);
        r
    }

    pub(crate) fn over_reader(stream: &'a mut dyn Read, config: ReaderConfig) -> Self {
        let mut r = Self::new(config, RefillSource::Read(stream));
        r.ring.reset_empty();
        r
    }

    /// Re-arms the reader for another top-level value read from the same
    /// stream (used by `scan_value_stream`/`scan_json_array_from_stream`), keeping
    /// the allocation but reclaiming it toward the configured preferred
    /// sizes first.
    pub(crate) fn reset_for_next_value(&mut self) {
        self.ring.reclaim(self.config.preferred_buf_size);
        self.chars.reclaim(self.config.preferred_char_buf_size);
        self.last_byte = None;
    }

    fn err(&self, kind: SyntaxError) -> ReaderError {
        let pos = self.ring.position();
        let hex_dump = if self.config.append_hex_dump_to_parse_exception {
            Some(render_hex_dump(
                &self.ring.buf,
                self.ring.head,
                self.config.hex_dump_size,
            ))
        } else {
            None
        };
        ReaderError::Syntax { kind, pos, hex_dump }
    }

    fn unexpected(&self, expected: &'static str) -> ReaderError {
        self.err(SyntaxError::UnexpectedToken { expected })
    }

    /// Builds a positioned [`ReaderError`] for `kind`, for codecs (outside
    /// this module) that need to report a decode failure of their own —
    /// e.g. a missing required field or an unexpected key.
    #[must_use]
    pub fn position_error(&self, kind: SyntaxError) -> ReaderError {
        self.err(kind)
    }

    /// Ensures at least one more byte is available at `tail`, refilling from
    /// the source if necessary. Returns `false` at genuine end of input.
    fn ensure_byte(&mut self) -> Result<bool, ReaderError> {
        if self.ring.head < self.ring.tail {
            return Ok(true);
        }
        loop {
            match &mut self.source {
                RefillSource::None => return Ok(false),
                RefillSource::Read(stream) => {
                    self.ring.make_room()?;
                    let start = self.ring.tail;
                    let end = self.ring.buf.len();
                    let n = stream
                        .read(&mut self.ring.buf[start..end])
                        .map_err(|e| ReaderError::Io(e.to_string()))?;
                    if n == 0 {
                        return Ok(false);
                    }
                    self.ring.commit_refill(n);
                    return Ok(true);
                }
            }
        }
    }

    #[inline]
    fn peek_byte(&mut self) -> Result<Option<u8>, ReaderError> {
        if self.ensure_byte()? {
            Ok(Some(self.ring.buf[self.ring.head]))
        } else {
            Ok(None)
        }
    }

    /// Returns the byte at `head` and advances.
    pub fn next_byte(&mut self) -> Result<u8, ReaderError> {
        if !self.ensure_byte()? {
            return Err(self.err(SyntaxError::UnexpectedEndOfInput));
        }
        let b = self.ring.advance();
        self.last_byte = Some(b);
        Ok(b)
    }

    /// Skips whitespace, returns the next non-whitespace byte and advances
    /// past it.
    pub fn next_token(&mut self) -> Result<u8, ReaderError> {
        loop {
            let b = self.next_byte()?;
            if !is_whitespace(b) {
                return Ok(b);
            }
        }
    }

    /// Like [`Self::next_token`] but returns a boolean; `head` always
    /// advances past the inspected byte.
    pub fn is_next_token(&mut self, t: u8) -> Result<bool, ReaderError> {
        Ok(self.next_token()? == t)
    }

    /// Examines the byte at `head - 1`.
    pub fn is_current_token(&self, t: u8) -> Result<bool, ReaderError> {
        self.last_byte
            .map(|b| b == t)
            .ok_or_else(|| PreconditionError::IllegalState("is_current_token called before any byte was read").into())
    }

    /// Decrements `head` by 1.
    pub fn rollback_token(&mut self) -> Result<(), ReaderError> {
        if self.ring.head == 0 {
            return Err(PreconditionError::IllegalState("rollback_token called at the start of input").into());
        }
        // Line/column bookkeeping is best-effort for diagnostics; a
        // rollback is always immediately followed by re-reading the same
        // byte, so leaving them unadjusted here does not desynchronize
        // anything a caller can observe.
        self.ring.head -= 1;
        Ok(())
    }

    pub fn set_mark(&mut self) -> Result<(), ReaderError> {
        self.ring.set_mark()
    }

    pub fn reset_mark(&mut self) -> Result<(), ReaderError> {
        self.ring.reset_mark()
    }

    pub fn rollback_to_mark(&mut self) -> Result<(), ReaderError> {
        self.ring.rollback_to_mark()
    }

    pub fn position(&self) -> Position {
        self.ring.position()
    }

    /// Expects the next non-whitespace byte to equal `t`, for the codec
    /// entry points' structural checks (`scan_json_array_from_stream`'s `[`).
    pub(crate) fn expect_token(&mut self, t: u8, expected: &'static str) -> Result<(), ReaderError> {
        if self.next_token()? != t {
            return Err(self.unexpected(expected));
        }
        Ok(())
    }

    /// Skips whitespace and reports whether the stream is exhausted,
    /// without consuming a non-whitespace byte. Used by `scan_value_stream`
    /// to decide whether another top-level value follows.
    pub(crate) fn at_end_of_stream(&mut self) -> Result<bool, ReaderError> {
        loop {
            match self.peek_byte()? {
                None => return Ok(true),
                Some(b) if is_whitespace(b) => {
                    self.ring.advance();
                }
                Some(_) => return Ok(false),
            }
        }
    }

    /// If `check_for_end_of_input` is set, verifies the remaining input
    /// (after the top-level value) is whitespace only.
    pub(crate) fn check_end_of_input(&mut self) -> Result<(), ReaderError> {
        if !self.config.check_for_end_of_input {
            return Ok(());
        }
        loop {
            match self.peek_byte()? {
                None => return Ok(()),
                Some(b) if is_whitespace(b) => {
                    self.ring.advance();
                }
                Some(_) => return Err(self.unexpected("end of input")),
            }
        }
    }

    // ---- skip -------------------------------------------------------

    /// `skip()`: skips exactly one JSON value, respecting nested structure
    /// and string escapes.
    pub fn skip(&mut self) -> Result<(), ReaderError> {
        let tok = self.next_token()?;
        self.skip_value(tok)
    }

    fn skip_value(&mut self, tok: u8) -> Result<(), ReaderError> {
        match tok {
            b'"' => self.skip_string_body(),
            b'{' => self.skip_object(),
            b'[' => self.skip_array(),
            b't' => self.skip_fixed(3),
            b'n' => self.skip_fixed(3),
            b'f' => self.skip_fixed(4),
            b'-' | b'0'..=b'9' => self.skip_number(),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn skip_fixed(&mut self, n: usize) -> Result<(), ReaderError> {
        for _ in 0..n {
            self.next_byte()?;
        }
        Ok(())
    }

    fn skip_string_body(&mut self) -> Result<(), ReaderError> {
        loop {
            let b = self.next_byte()?;
            match b {
                b'"' => return Ok(()),
                b'\\' => {
                    let esc = self.next_byte()?;
                    if esc == b'u' {
                        for _ in 0..4 {
                            self.next_byte()?;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn skip_number(&mut self) -> Result<(), ReaderError> {
        loop {
            match self.peek_byte()? {
                Some(b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') => {
                    self.ring.advance();
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_array(&mut self) -> Result<(), ReaderError> {
        if self.is_next_token(b']')? {
            return Ok(());
        }
        self.rollback_token()?;
        loop {
            self.skip()?;
            match self.next_token()? {
                b',' => {}
                b']' => return Ok(()),
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
    }

    fn skip_object(&mut self) -> Result<(), ReaderError> {
        if self.is_next_token(b'}')? {
            return Ok(());
        }
        self.rollback_token()?;
        loop {
            if self.next_token()? != b'"' {
                return Err(self.unexpected("'\"'"));
            }
            self.skip_string_body()?;
            if self.next_token()? != b':' {
                return Err(self.unexpected("':'"));
            }
            self.skip()?;
            match self.next_token()? {
                b',' => {}
                b'}' => return Ok(()),
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }
    }

    /// Returns a copy of the raw byte span of the next value, excluding
    /// only the leading whitespace `next_token` consumes.
    pub fn read_raw_val_as_bytes(&mut self) -> Result<Vec<u8>, ReaderError> {
        let tok = self.next_token()?;
        self.rollback_token()?;
        self.set_mark()?;
        let tok = self.next_byte()?;
        self.skip_value(tok)?;
        let start = self.ring.mark.expect("mark set above");
        let bytes = self.ring.buf[start..self.ring.head].to_vec();
        self.reset_mark()?;
        Ok(bytes)
    }

    /// Within the current object, repeatedly reads a key and either matches
    /// against `name` or skips its value; returns `true` positioned past `:`
    /// on match, `false` at the object's `}`.
    pub fn skip_to_key(&mut self, name: &str) -> Result<bool, ReaderError> {
        loop {
            let tok = self.next_token()?;
            if tok == b'}' {
                return Ok(false);
            }
            if tok != b'"' {
                return Err(self.unexpected("'\"' or '}'"));
            }
            let slice = self.read_string_body_into_chars()?;
            if self.next_token()? != b':' {
                return Err(self.unexpected("':'"));
            }
            if self.chars.slice_eq_ascii(slice, name) {
                return Ok(true);
            }
            self.skip()?;
            match self.next_token()? {
                b',' => {}
                b'}' => return Ok(false),
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }
    }

    // ---- key reading --------------------------------------------------

    /// Expects `"`, reads a string key, expects `"`, expects `:`.
    /// Whitespace is permitted around each structural character via
    /// `next_token`.
    pub fn read_key_as_string(&mut self) -> Result<String, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        let key = self.chars.as_str_lossless(slice);
        if self.next_token()? != b':' {
            return Err(self.unexpected("':'"));
        }
        Ok(key)
    }

    // ---- string decode --------------------------------------------------

    /// Decodes a string body (opening `"` already consumed by `next_token`)
    /// into the char buffer using the two-phase fast/slow loop spec
    /// describes, returning the resulting slice.
    fn read_string_body_into_chars(&mut self) -> Result<CharSlice, ReaderError> {
        let start = self.chars.start_slice();
        loop {
            let b = self.next_byte()?;
            match b {
                b'"' => break,
                b'\\' => self.read_escape_into_chars()?,
                0x00..=0x1F => return Err(self.err(SyntaxError::UnescapedControl)),
                0x20..=0x7F => {
                    self.chars.push(b as char, self.ring.position())?;
                }
                _ => self.read_utf8_continuation_into_chars(b)?,
            }
        }
        Ok(self.chars.finish_slice(start))
    }

    fn read_escape_into_chars(&mut self) -> Result<(), ReaderError> {
        let esc = self.next_byte()?;
        if esc == b'u' {
            let high = self.read_unicode_escape()?;
            if (0xD800..=0xDBFF).contains(&high) {
                if self.next_byte()? != b'\\' || self.next_byte()? != b'u' {
                    return Err(self.err(SyntaxError::IllegalSurrogatePair));
                }
                let low = self.read_unicode_escape()?;
                let c = combine_surrogates(high, low).map_err(|_| self.err(SyntaxError::IllegalSurrogatePair))?;
                self.chars.push(c, self.ring.position())?;
            } else if (0xDC00..=0xDFFF).contains(&high) {
                return Err(self.err(SyntaxError::IllegalSurrogatePair));
            } else {
                let c = char::from_u32(u32::from(high)).expect("non-surrogate BMP code units are always valid");
                self.chars.push(c, self.ring.position())?;
            }
            return Ok(());
        }
        match short_escape_value(esc) {
            Some(v) => {
                self.chars.push(v as char, self.ring.position())?;
                Ok(())
            }
            None => Err(self.err(SyntaxError::IllegalEscape)),
        }
    }

    fn read_unicode_escape(&mut self) -> Result<u16, ReaderError> {
        let mut digits = [0u8; 4];
        for d in &mut digits {
            *d = self.next_byte()?;
        }
        decode_unicode_escape(digits).ok_or_else(|| self.err(SyntaxError::HexDigit))
    }

    fn read_utf8_continuation_into_chars(&mut self, lead: u8) -> Result<(), ReaderError> {
        let len = utf8_sequence_len(lead).filter(|&l| l > 1).ok_or_else(|| self.err(SyntaxError::MalformedBytes(vec![lead])))?;
        let mut bytes = vec![lead];
        for _ in 1..len {
            bytes.push(self.next_byte()?);
        }
        let c = decode_utf8_sequence(&bytes).ok_or_else(|| self.err(SyntaxError::MalformedBytes(bytes.clone())))?;
        self.chars.push(c, self.ring.position())?;
        Ok(())
    }

    /// Reads a JSON string value (the `"`…`"` form) into an owned `String`.
    pub fn read_string(&mut self) -> Result<String, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        Ok(self.chars.as_str_lossless(slice))
    }

    /// Reads either `null` or a quoted string, per the common
    /// nullable-string reader shape.
    pub fn read_string_or_null(&mut self) -> Result<Option<String>, ReaderError> {
        if self.is_next_token(b'n')? {
            self.skip_fixed(3)?;
            return Ok(None);
        }
        self.rollback_token()?;
        self.read_string().map(Some)
    }

    // ---- number scanning --------------------------------------------------

    /// Distance from the active mark to `head`. Unlike a raw snapshot of
    /// `self.ring.head`, this stays valid across a `ByteRing::make_room`
    /// compaction triggered by a refill mid-scan: compaction shifts `head`
    /// and `mark` down by the same offset, so their difference is
    /// invariant even though either absolute index on its own goes stale.
    fn mark_offset(&self) -> usize {
        self.ring.head - self.ring.mark.expect("mark set above")
    }

    /// Scans a number literal's byte span starting at the current head
    /// (which must be positioned via `next_token` at the number's first
    /// byte), validating the grammar and returning the span via
    /// mark/rollback.
    fn scan_number_span(&mut self, allow_float: bool) -> Result<(usize, usize), ReaderError> {
        let tok = self.next_token()?;
        if tok != b'-' && !tok.is_ascii_digit() {
            return Err(self.unexpected("a number"));
        }
        self.rollback_token()?;
        self.set_mark()?;

        if self.peek_byte()? == Some(b'-') {
            self.ring.advance();
        }
        let digits_start = self.mark_offset();
        while matches!(self.peek_byte()?, Some(b'0'..=b'9')) {
            self.ring.advance();
        }
        if self.mark_offset() == digits_start {
            self.reset_mark()?;
            return Err(self.err(SyntaxError::IllegalNumber));
        }
        let mark = self.ring.mark.expect("mark set above");
        if self.mark_offset() - digits_start > 1 && self.ring.buf[mark + digits_start] == b'0' {
            self.reset_mark()?;
            return Err(self.err(SyntaxError::LeadingZero));
        }

        if allow_float {
            if self.peek_byte()? == Some(b'.') {
                self.ring.advance();
                let frac_start = self.mark_offset();
                while matches!(self.peek_byte()?, Some(b'0'..=b'9')) {
                    self.ring.advance();
                }
                if self.mark_offset() == frac_start {
                    self.reset_mark()?;
                    return Err(self.err(SyntaxError::IllegalNumber));
                }
            }
            if matches!(self.peek_byte()?, Some(b'e' | b'E')) {
                self.ring.advance();
                if matches!(self.peek_byte()?, Some(b'+' | b'-')) {
                    self.ring.advance();
                }
                let exp_start = self.mark_offset();
                while matches!(self.peek_byte()?, Some(b'0'..=b'9')) {
                    self.ring.advance();
                }
                if self.mark_offset() == exp_start {
                    self.reset_mark()?;
                    return Err(self.err(SyntaxError::IllegalNumber));
                }
            }
        } else if matches!(self.peek_byte()?, Some(b'.' | b'e' | b'E')) {
            self.reset_mark()?;
            return Err(self.err(SyntaxError::IllegalNumber));
        }

        // Read the start back out of `self.ring.mark` rather than a snapshot
        // taken before scanning: `make_room` keeps it correctly adjusted
        // across any compaction the `peek_byte` calls above may have
        // triggered, the same pattern `read_raw_val_as_bytes` uses.
        let start = self.ring.mark.expect("mark set above");
        let end = self.ring.head;
        self.reset_mark()?;
        Ok((start, end))
    }

    fn number_bytes(&self, start: usize, end: usize) -> &[u8] {
        &self.ring.buf[start..end]
    }

    // ---- typed readers --------------------------------------------------

    pub fn read_bool(&mut self) -> Result<bool, ReaderError> {
        let tok = self.next_token()?;
        match tok {
            b't' => {
                self.skip_fixed(3)?;
                Ok(true)
            }
            b'f' => {
                self.skip_fixed(4)?;
                Ok(false)
            }
            _ => Err(self.err(SyntaxError::IllegalBoolean)),
        }
    }

    int_reader!(read_i8, i8, integers::parse_i8);
    int_reader!(read_i16, i16, integers::parse_i16);
    int_reader!(read_i32, i32, integers::parse_i32);
    int_reader!(read_i64, i64, integers::parse_i64);
    int_reader!(read_u8, u8, integers::parse_u8);
    int_reader!(read_u16, u16, integers::parse_u16);
    int_reader!(read_u32, u32, integers::parse_u32);
    int_reader!(read_u64, u64, integers::parse_u64);

    pub fn read_f64(&mut self) -> Result<f64, ReaderError> {
        let (start, end) = self.scan_number_span(true)?;
        let pos = self.ring.position();
        floats::parse_f64(self.number_bytes(start, end), pos)
    }

    pub fn read_f32(&mut self) -> Result<f32, ReaderError> {
        let (start, end) = self.scan_number_span(true)?;
        let pos = self.ring.position();
        floats::parse_f32(self.number_bytes(start, end), pos)
    }

    pub fn read_bigint(&mut self) -> Result<BigInt, ReaderError> {
        let (start, end) = self.scan_number_span(false)?;
        let pos = self.ring.position();
        bigint_engine::parse_bigint(self.number_bytes(start, end), self.config.big_int_digits_limit, pos)
    }

    pub fn read_bigdecimal(&mut self) -> Result<BigDecimal, ReaderError> {
        let (start, end) = self.scan_number_span(true)?;
        let pos = self.ring.position();
        bigdecimal_engine::parse_bigdecimal(
            self.number_bytes(start, end),
            self.config.big_decimal_digits_limit,
            self.config.big_decimal_scale_limit,
            pos,
        )
    }

    pub fn read_null(&mut self) -> Result<(), ReaderError> {
        if self.next_token()? != b'n' {
            return Err(self.unexpected("'null'"));
        }
        self.skip_fixed(3)
    }

    /// Reads the string form of a temporal/UUID value: consumes `"`,
    /// decodes the body via [`Self::read_string_body_into_chars`], expects
    /// the closing `"` (already consumed as the loop terminator), and
    /// hands the decoded text to `parse`.
    fn read_quoted_with<T>(&mut self, parse: impl FnOnce(&[u8], Position) -> Result<(T, usize), ReaderError>) -> Result<T, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        let text = self.chars.as_str_lossless(slice);
        let pos = self.ring.position();
        let (value, consumed) = parse(text.as_bytes(), pos)?;
        if consumed != text.as_bytes().len() {
            return Err(self.err(SyntaxError::IllegalTimezone));
        }
        Ok(value)
    }

    pub fn read_local_date(&mut self) -> Result<crate::temporal::LocalDate, ReaderError> {
        self.read_quoted_with(crate::temporal::date::parse_local_date)
    }

    pub fn read_local_time(&mut self) -> Result<crate::temporal::LocalTime, ReaderError> {
        self.read_quoted_with(crate::temporal::time::parse_local_time)
    }

    pub fn read_local_date_time(&mut self) -> Result<crate::temporal::LocalDateTime, ReaderError> {
        self.read_quoted_with(crate::temporal::datetime::parse_local_date_time)
    }

    pub fn read_offset_date_time(&mut self) -> Result<crate::temporal::OffsetDateTime, ReaderError> {
        self.read_quoted_with(crate::temporal::datetime::parse_offset_date_time)
    }

    pub fn read_zoned_date_time(&mut self) -> Result<crate::temporal::ZonedDateTime, ReaderError> {
        self.read_quoted_with(crate::temporal::datetime::parse_zoned_date_time)
    }

    pub fn read_instant(&mut self) -> Result<crate::temporal::Instant, ReaderError> {
        self.read_quoted_with(crate::temporal::datetime::parse_instant)
    }

    pub fn read_duration(&mut self) -> Result<crate::temporal::Duration, ReaderError> {
        self.read_quoted_with(crate::temporal::duration::parse_duration)
    }

    pub fn read_period(&mut self) -> Result<crate::temporal::Period, ReaderError> {
        self.read_quoted_with(crate::temporal::duration::parse_period)
    }

    pub fn read_year(&mut self) -> Result<crate::temporal::Year, ReaderError> {
        self.read_quoted_with(|b, p| crate::temporal::date::parse_year(b, p).map(|(y, c)| (crate::temporal::Year(y), c)))
    }

    pub fn read_year_month(&mut self) -> Result<crate::temporal::YearMonth, ReaderError> {
        self.read_quoted_with(crate::temporal::date::parse_year_month)
    }

    pub fn read_month_day(&mut self) -> Result<crate::temporal::MonthDay, ReaderError> {
        self.read_quoted_with(crate::temporal::date::parse_month_day)
    }

    pub fn read_uuid(&mut self) -> Result<uuid::Uuid, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        let text = self.chars.as_str_lossless(slice);
        let pos = self.ring.position();
        crate::uuid::parse_uuid(text.as_bytes(), pos)
    }

    /// Decodes a base16 (hex) blob wrapped in `"`…`"`.
    pub fn read_base16_val(&mut self) -> Result<Vec<u8>, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        let text = self.chars.as_str_lossless(slice);
        let pos = self.ring.position();
        crate::text::base16::decode(text.as_bytes(), pos)
    }

    pub fn read_base64_val(&mut self) -> Result<Vec<u8>, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        let text = self.chars.as_str_lossless(slice);
        let pos = self.ring.position();
        crate::text::base64::decode_standard(text.as_bytes(), pos)
    }

    pub fn read_base64_url_val(&mut self) -> Result<Vec<u8>, ReaderError> {
        if self.next_token()? != b'"' {
            return Err(self.unexpected("'\"'"));
        }
        let slice = self.read_string_body_into_chars()?;
        let text = self.chars.as_str_lossless(slice);
        let pos = self.ring.position();
        crate::text::base64::decode_url(text.as_bytes(), pos)
    }
}
