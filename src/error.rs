//! Error taxonomy for the reader and writer cores.
//!
//! Every failure mode has a corresponding variant here so callers can match
//! on `kind` instead of parsing messages. Both [`ReaderError`] and
//! [`WriterError`] carry the byte offset (and, for the reader, line/column)
//! at which the failure was detected.

use thiserror::Error;

/// A position within the input/output byte stream at the time an error was
/// raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Absolute byte offset from the start of the stream (cumulative across
    /// refills), used to render `offset: 0x<HEX>` in messages.
    pub offset: u64,
    /// 1-based line number, counting `\n` only.
    pub line: usize,
    /// 1-based column number within the current line.
    pub column: usize,
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "offset: {:#x} ({}:{})", self.offset, self.line, self.column)
    }
}

/// The specific reason a decode failed, independent of *where* it failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected token: expected {expected}")]
    UnexpectedToken { expected: &'static str },
    #[error("illegal number")]
    IllegalNumber,
    #[error("leading zero")]
    LeadingZero,
    #[error("{ty} overflow")]
    Overflow { ty: &'static str },
    #[error("digits limit exceeded")]
    DigitsLimit,
    #[error("scale limit exceeded")]
    ScaleLimit,
    #[error("illegal boolean")]
    IllegalBoolean,
    #[error("illegal escape sequence")]
    IllegalEscape,
    #[error("expected a hex digit")]
    HexDigit,
    #[error("illegal surrogate pair")]
    IllegalSurrogatePair,
    #[error("unescaped control character")]
    UnescapedControl,
    #[error("malformed UTF-8 bytes: {0:02x?}")]
    MalformedBytes(Vec<u8>),
    #[error("illegal duration")]
    IllegalDuration,
    #[error("illegal period")]
    IllegalPeriod,
    #[error("illegal year")]
    IllegalYear,
    #[error("illegal month")]
    IllegalMonth,
    #[error("illegal day")]
    IllegalDay,
    #[error("illegal hour")]
    IllegalHour,
    #[error("illegal minute")]
    IllegalMinute,
    #[error("illegal second")]
    IllegalSecond,
    #[error("illegal timezone")]
    IllegalTimezone,
    #[error("illegal timezone offset hour")]
    IllegalTimezoneOffsetHour,
    #[error("illegal timezone offset minute")]
    IllegalTimezoneOffsetMinute,
    #[error("illegal timezone offset second")]
    IllegalTimezoneOffsetSecond,
    #[error("illegal UUID")]
    IllegalUuid,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("input too long")]
    TooLongInput,
    #[error("string too long")]
    TooLongString,
    #[error("required field missing: {0}")]
    RequiredFieldMissing(String),
    #[error("duplicated key: {0}")]
    DuplicatedKey(String),
    #[error("unexpected key: {0}")]
    UnexpectedKey(String),
    #[error("discriminator value error")]
    DiscriminatorValueError,
}

/// A pre-condition violation: programmer error rather than malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("null pointer: {0}")]
    NullPointer(&'static str),
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}

/// The reader's error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("{kind} at {pos}")]
    Syntax {
        kind: SyntaxError,
        pos: Position,
        /// Optional 16-bytes-per-line hex dump around `pos`, attached when
        /// `ReaderConfig::append_hex_dump_to_parse_exception` is set.
        hex_dump: Option<String>,
    },
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// A refill source (`std::io::Read`) returned an error other than EOF.
    #[error("I/O error reading input: {0}")]
    Io(String),
}

impl ReaderError {
    #[must_use]
    pub fn syntax(kind: SyntaxError, pos: Position, hex_dump: Option<String>) -> Self {
        ReaderError::Syntax { kind, pos, hex_dump }
    }

    /// The underlying [`SyntaxError`] kind, if this is a decode failure
    /// rather than a precondition violation.
    #[must_use]
    pub fn kind(&self) -> Option<&SyntaxError> {
        match self {
            ReaderError::Syntax { kind, .. } => Some(kind),
            ReaderError::Precondition(_) => None,
        }
    }
}

/// The writer's error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriterError {
    #[error("illegal number: {0}")]
    IllegalNumber(&'static str),
    #[error("illegal surrogate pair")]
    IllegalSurrogatePair,
    #[error("illegal nanoseconds: {0} is out of range [0, 1_000_000_000)")]
    IllegalNanoseconds(i64),
    #[error("output too long")]
    TooLongOutput,
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// A sink (`std::io::Write`) returned an error while flushing.
    #[error("I/O error writing output: {0}")]
    Io(String),
}

/// Renders a bordered 16-bytes-per-line hex dump with a printable-ASCII
/// sidebar, covering `lines_each_side` rows of context on each side of
/// `center` (aligned to 16-byte row boundaries).
#[must_use]
pub fn render_hex_dump(buf: &[u8], center: usize, lines_each_side: usize) -> String {
    let center_row = center / 16;
    let first_row = center_row.saturating_sub(lines_each_side);
    let last_row = (center_row + lines_each_side).min(buf.len().saturating_sub(1) / 16.max(1));
    let mut out = String::new();
    for row in first_row..=last_row {
        let start = row * 16;
        if start >= buf.len() {
            break;
        }
        let end = (start + 16).min(buf.len());
        let chunk = &buf[start..end];
        out.push_str(&format!("{start:08x}  "));
        for i in 0..16 {
            if i < chunk.len() {
                out.push_str(&format!("{:02x} ", chunk[i]));
            } else {
                out.push_str("   ");
            }
            if i == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        for &b in chunk {
            let c = if (0x20..=0x7e).contains(&b) { b as char } else { '.' };
            out.push(c);
        }
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod hex_dump_tests {
    use super::render_hex_dump;

    #[test]
    fn renders_single_row_with_sidebar() {
        let buf = b"Hello, world!!!!";
        let dump = render_hex_dump(buf, 0, 0);
        assert!(dump.contains("48 65 6c 6c 6f"));
        assert!(dump.contains("|Hello, world!!!!|"));
    }

    #[test]
    fn nonprintable_bytes_become_dots() {
        let buf = [0x00, 0x01, b'A'];
        let dump = render_hex_dump(&buf, 0, 0);
        assert!(dump.contains("|..A|"));
    }
}
