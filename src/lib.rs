//! A high-throughput, low-allocation JSON codec: a pull-style byte-level
//! reader and a push-style byte-level writer, plus exact parsers/formatters
//! for numbers, text, temporal values, and UUIDs, glued together by a small
//! codec contract (`decode`/`encode`/`null_value`) user types implement
//! once.
//!
//! The reader and writer are the hard-engineered cores of this crate;
//! everything above them — schema-derived codecs, bridges to third-party
//! JSON ASTs, benchmark harnesses — is an external collaborator this crate
//! does not provide.
//!
//! Neither [`JsonReader`] nor [`JsonWriter`] is safe for concurrent use from
//! multiple threads; construct one per decode/encode call (the [`codec`]
//! entry points do this for you) and use distinct instances across threads.

#![allow(missing_docs)]

mod byte_ring;
mod char_buffer;
mod codec;
mod config;
mod error;
mod number;
mod reader;
mod temporal;
mod text;
mod uuid;
mod writer;

#[cfg(test)]
mod tests;

pub use codec::{
    read_from_byte_buffer, read_from_reader, read_from_slice, read_from_str, read_from_sub_slice,
    scan_json_array_from_stream, scan_value_stream, write_to_byte_buffer, write_to_slice, write_to_vec,
    write_to_writer, JsonValueCodec,
};
pub use config::{ReaderConfig, WriterConfig};
pub use error::{PreconditionError, Position, ReaderError, SyntaxError, WriterError};
pub use reader::JsonReader;
pub use temporal::{
    Duration, Instant, LocalDate, LocalDateTime, LocalTime, MonthDay, OffsetDateTime, Period, Year, YearMonth,
    ZonedDateTime,
};
pub use text::strings::is_non_escaped_ascii;
pub use writer::JsonWriter;

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
// Leading `::` forces extern-prelude resolution so this doesn't resolve to
// the crate's own (private) `uuid` module of the same name.
pub use ::uuid::Uuid;
