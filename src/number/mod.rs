//! The number engine: integer, float, and arbitrary-precision parsers and
//! formatters.

pub(crate) mod bigdecimal;
pub(crate) mod bigint;
pub(crate) mod floats;
pub(crate) mod integers;
