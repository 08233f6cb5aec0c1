//! The codec contract: a per-type `decode`/`encode`/`null_value` triple plus
//! the top-level entry points that wrap a codec around one of the supported
//! input/output carriers.
//!
//! A codec is the only seam user code needs to implement a custom value
//! type: no reflection, no macro is required, though one may generate the
//! boilerplate. Each entry point constructs a fresh [`JsonReader`]/
//! [`JsonWriter`], drives exactly one top-level value through it, and tears
//! the instance down on return so callers never observe partially-reset
//! state from a previous call.

use std::io::{Read, Write};

use crate::config::{ReaderConfig, WriterConfig};
use crate::error::{ReaderError, SyntaxError, WriterError};
use crate::reader::JsonReader;
use crate::writer::JsonWriter;

/// A codec for value type `T`: `decode`/`encode` plus the `null` sentinel a
/// nullable reader falls back to.
pub trait JsonValueCodec<T> {
    /// Decodes one value of type `T`, given the caller's sentinel for a
    /// JSON `null` (mirrors the source's `decode(reader, default)`).
    fn decode(reader: &mut JsonReader<'_>, default: T) -> Result<T, ReaderError>;

    /// Encodes `value` through `writer`.
    fn encode(value: &T, writer: &mut JsonWriter<'_>) -> Result<(), WriterError>;

    /// The sentinel passed as `default` when a JSON `null` is encountered
    /// at the top level.
    fn null_value() -> T;
}

// ---- reader entry points --------------------------------------------------

/// Decodes one value from a byte slice.
pub fn read_from_slice<T, C: JsonValueCodec<T>>(bytes: &[u8], config: ReaderConfig) -> Result<T, ReaderError> {
    let mut reader = JsonReader::over_slice(bytes, config);
    let value = C::decode(&mut reader, C::null_value())?;
    reader.check_end_of_input()?;
    Ok(value)
}

/// Decodes one value from `bytes[from..to]`.
pub fn read_from_sub_slice<T, C: JsonValueCodec<T>>(
    bytes: &[u8],
    from: usize,
    to: usize,
    config: ReaderConfig,
) -> Result<T, ReaderError> {
    read_from_slice::<T, C>(&bytes[from..to], config)
}

/// Decodes one value from a UTF-8 string, transcoded to bytes once at
/// entry.
pub fn read_from_str<T, C: JsonValueCodec<T>>(s: &str, config: ReaderConfig) -> Result<T, ReaderError> {
    read_from_slice::<T, C>(s.as_bytes(), config)
}

/// Decodes one value from a pull-based byte stream, refilling via
/// `Read::read` as the reader's internal buffer empties.
pub fn read_from_reader<T, C: JsonValueCodec<T>>(stream: &mut dyn Read, config: ReaderConfig) -> Result<T, ReaderError> {
    let mut reader = JsonReader::over_reader(stream, config);
    let value = C::decode(&mut reader, C::null_value())?;
    reader.check_end_of_input()?;
    Ok(value)
}

/// Decodes one value from `buf[*pos..]`, advancing `*pos` by exactly the
/// number of bytes the reader consumed.
pub fn read_from_byte_buffer<T, C: JsonValueCodec<T>>(
    buf: &[u8],
    pos: &mut usize,
    config: ReaderConfig,
) -> Result<T, ReaderError> {
    let mut reader = JsonReader::over_slice(&buf[*pos..], config);
    let value = C::decode(&mut reader, C::null_value())?;
    *pos += reader.position().offset as usize;
    reader.check_end_of_input()?;
    Ok(value)
}

/// Repeatedly decodes top-level values from `stream`, applying `f` to
/// each; `f`'s return value is the continuation signal — `false` stops
/// scanning without treating it as an error.
pub fn scan_value_stream<T, C: JsonValueCodec<T>>(
    stream: &mut dyn Read,
    config: ReaderConfig,
    mut f: impl FnMut(T) -> bool,
) -> Result<(), ReaderError> {
    let mut reader = JsonReader::over_reader(stream, config);
    loop {
        if reader.at_end_of_stream()? {
            return Ok(());
        }
        let value = C::decode(&mut reader, C::null_value())?;
        let keep_going = f(value);
        reader.reset_for_next_value();
        if !keep_going {
            return Ok(());
        }
    }
}

/// Like [`scan_value_stream`] but expects the whole stream to be a single
/// top-level JSON array, applying `f` to each element in turn.
pub fn scan_json_array_from_stream<T, C: JsonValueCodec<T>>(
    stream: &mut dyn Read,
    config: ReaderConfig,
    mut f: impl FnMut(T) -> bool,
) -> Result<(), ReaderError> {
    let mut reader = JsonReader::over_reader(stream, config);
    reader.expect_token(b'[', "'['")?;
    if reader.is_next_token(b']')? {
        reader.check_end_of_input()?;
        return Ok(());
    }
    reader.rollback_token()?;
    loop {
        let value = C::decode(&mut reader, C::null_value())?;
        if !f(value) {
            return Ok(());
        }
        match reader.next_token()? {
            b',' => {}
            b']' => {
                reader.check_end_of_input()?;
                return Ok(());
            }
            _ => return Err(reader.position_error(SyntaxError::UnexpectedToken { expected: "',' or ']'" })),
        }
    }
}

// ---- writer entry points --------------------------------------------------

/// Encodes `value` into a freshly allocated byte vector.
pub fn write_to_vec<T, C: JsonValueCodec<T>>(value: &T, config: WriterConfig) -> Result<Vec<u8>, WriterError> {
    let mut writer = JsonWriter::over_vec(config);
    C::encode(value, &mut writer)?;
    writer.finish()
}

/// Encodes `value` into the caller's `out[from..to]` slice, returning the
/// number of bytes written; fails with `TooLongOutput` if the slice is too
/// small.
pub fn write_to_slice<T, C: JsonValueCodec<T>>(
    value: &T,
    out: &mut [u8],
    from: usize,
    to: usize,
    config: WriterConfig,
) -> Result<usize, WriterError> {
    let bytes = write_to_vec::<T, C>(value, config)?;
    let capacity = to - from;
    if bytes.len() > capacity {
        return Err(WriterError::TooLongOutput);
    }
    out[from..from + bytes.len()].copy_from_slice(&bytes);
    Ok(bytes.len())
}

/// Encodes `value` into `out[*pos..]`, advancing
/// `*pos` by the number of bytes written.
pub fn write_to_byte_buffer<T, C: JsonValueCodec<T>>(
    value: &T,
    out: &mut [u8],
    pos: &mut usize,
    config: WriterConfig,
) -> Result<(), WriterError> {
    let bytes = write_to_vec::<T, C>(value, config)?;
    if *pos + bytes.len() > out.len() {
        return Err(WriterError::TooLongOutput);
    }
    out[*pos..*pos + bytes.len()].copy_from_slice(&bytes);
    *pos += bytes.len();
    Ok(())
}

/// Encodes `value`, flushing to `out` whenever the
/// writer's internal buffer fills and once more on completion.
pub fn write_to_writer<T, C: JsonValueCodec<T>>(value: &T, out: &mut dyn Write, config: WriterConfig) -> Result<(), WriterError> {
    let mut writer = JsonWriter::over_writer(out, config);
    C::encode(value, &mut writer)?;
    writer.finish()?;
    Ok(())
}
