//! Reader/writer configuration: one `Copy` struct per direction, every
//! field defaulted, built with struct-update syntax
//! (`ReaderConfig { check_for_end_of_input: true, ..Default::default() }`).

/// Configuration accepted by [`crate::reader::JsonReader`].
///
/// # Default
///
/// All boolean options default to `false`; size options default to the
/// values documented on each field.
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    /// If `true`, after the top-level value is fully read the remaining
    /// input must be whitespace only; anything else upgrades to
    /// `UnexpectedToken("end of input")`.
    pub check_for_end_of_input: bool,
    /// Target size (bytes) the internal buffer is reallocated towards when
    /// idle, after having grown larger to service a big value.
    pub preferred_buf_size: usize,
    /// Target size (`char`s) the char-output buffer is reallocated towards
    /// when idle.
    pub preferred_char_buf_size: usize,
    /// Hard ceiling on the byte buffer; exceeding it fails with
    /// `TooLongInput`.
    pub max_buf_size: usize,
    /// Hard ceiling on the char buffer; exceeding it fails with
    /// `TooLongString`.
    pub max_char_buf_size: usize,
    /// Attach a 16-bytes-per-line hex dump around the error offset to parse
    /// exceptions.
    pub append_hex_dump_to_parse_exception: bool,
    /// Number of 16-byte lines of context to include on each side of the
    /// error offset when `append_hex_dump_to_parse_exception` is set.
    pub hex_dump_size: usize,
    /// Default limit on the number of significant digits accepted by the
    /// arbitrary-precision integer reader.
    pub big_int_digits_limit: usize,
    /// Default limit on the number of significant digits accepted by the
    /// arbitrary-precision decimal reader's mantissa.
    pub big_decimal_digits_limit: usize,
    /// Independent cap on the magnitude of an arbitrary-precision decimal's
    /// scale (exponent). Deliberately *not* derived from
    /// `big_decimal_digits_limit`: a decimal can have few significant digits
    /// and still an enormous scale (`1e400000`), so the two need separate
    /// limits.
    pub big_decimal_scale_limit: i32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            check_for_end_of_input: true,
            preferred_buf_size: 32 * 1024,
            preferred_char_buf_size: 4 * 1024,
            max_buf_size: 128 * 1024 * 1024,
            max_char_buf_size: 128 * 1024 * 1024,
            append_hex_dump_to_parse_exception: false,
            hex_dump_size: 5,
            big_int_digits_limit: 308,
            big_decimal_digits_limit: 308,
            big_decimal_scale_limit: 6178,
        }
    }
}

/// Configuration accepted by [`crate::writer::JsonWriter`].
#[derive(Debug, Clone, Copy)]
pub struct WriterConfig {
    /// `0` emits compact JSON; `>= 1` pretty-prints with that many spaces
    /// per indentation level.
    pub indention_step: u8,
    /// When `true`, every code point `>= 0x80` is emitted as `\uXXXX`
    /// (surrogate pairs as two escapes) instead of raw UTF-8 bytes.
    pub escape_unicode: bool,
    /// Target size (bytes) the internal buffer is reallocated towards when
    /// idle.
    pub preferred_buf_size: usize,
    /// Hard ceiling on the byte buffer; exceeding it without an attached
    /// sink fails with `TooLongOutput`.
    pub max_buf_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indention_step: 0,
            escape_unicode: false,
            preferred_buf_size: 32 * 1024,
            max_buf_size: 128 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_defaults_match_spec() {
        let cfg = ReaderConfig::default();
        assert!(cfg.check_for_end_of_input);
        assert_eq!(cfg.big_int_digits_limit, 308);
        assert_eq!(cfg.big_decimal_digits_limit, 308);
        assert_eq!(cfg.big_decimal_scale_limit, 6178);
    }

    #[test]
    fn writer_defaults_are_compact() {
        let cfg = WriterConfig::default();
        assert_eq!(cfg.indention_step, 0);
        assert!(!cfg.escape_unicode);
    }
}
