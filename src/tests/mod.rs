//! Cross-module property and regression suites (`SPEC_FULL.md` §1 "Test
//! tooling"): the per-module `#[cfg(test)]` blocks next to `reader.rs`,
//! `writer.rs`, and the engines cover unit-level behavior; this directory
//! covers properties and scenarios that span reader + writer together.

mod errors;
mod roundtrip;
mod scenarios;
