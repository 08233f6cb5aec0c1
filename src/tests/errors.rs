//! Table-driven checks that every decode failure mode in `spec.md` §7
//! actually surfaces as the matching [`SyntaxError`] variant.

use rstest::rstest;

use crate::config::ReaderConfig;
use crate::error::SyntaxError;
use crate::reader::JsonReader;

fn decode_int_err(input: &str) -> SyntaxError {
    let mut r = JsonReader::over_slice(input.as_bytes(), ReaderConfig::default());
    r.read_i64().unwrap_err().kind().unwrap().clone()
}

fn decode_string_err(input: &str) -> SyntaxError {
    let mut r = JsonReader::over_slice(input.as_bytes(), ReaderConfig::default());
    r.read_string().unwrap_err().kind().unwrap().clone()
}

#[rstest]
#[case("01", SyntaxError::LeadingZero)]
#[case("-01", SyntaxError::LeadingZero)]
#[case("1.5", SyntaxError::IllegalNumber)]
#[case("1e5", SyntaxError::IllegalNumber)]
#[case("-", SyntaxError::IllegalNumber)]
fn integer_grammar_errors(#[case] input: &str, #[case] expected: SyntaxError) {
    assert_eq!(decode_int_err(input), expected);
}

#[rstest]
#[case(r#""\q""#, SyntaxError::IllegalEscape)]
#[case(r#""\uZZZZ""#, SyntaxError::HexDigit)]
#[case(r#""\ud800""#, SyntaxError::IllegalSurrogatePair)]
#[case("\"\u{0}\"", SyntaxError::UnescapedControl)]
fn string_escape_errors(#[case] input: &str, #[case] expected: SyntaxError) {
    assert_eq!(decode_string_err(input), expected);
}

#[test]
fn malformed_utf8_continuation_is_reported() {
    // 0xC0 starts a 2-byte sequence; 0x20 (space) is not a valid
    // continuation byte, so the reader must fail rather than silently
    // resync.
    let mut bytes = vec![b'"'];
    bytes.push(0xC0);
    bytes.push(b' ');
    bytes.push(b'"');
    let mut r = JsonReader::over_slice(&bytes, ReaderConfig::default());
    let err = r.read_string().unwrap_err();
    assert!(matches!(err.kind(), Some(SyntaxError::MalformedBytes(_))));
}

#[rstest]
#[case(i8::MIN as i64 - 1)]
#[case(i8::MAX as i64 + 1)]
fn i8_overflow_is_reported(#[case] out_of_range: i64) {
    let text = out_of_range.to_string();
    let mut r = JsonReader::over_slice(text.as_bytes(), ReaderConfig::default());
    let err = r.read_i8().unwrap_err();
    assert_eq!(err.kind(), Some(&SyntaxError::Overflow { ty: "i8" }));
}

#[test]
fn scenario_5_long_overflow_at_nineteen_nines() {
    let mut r = JsonReader::over_slice(b"9999999999999999999", ReaderConfig::default());
    let err = r.read_i64().unwrap_err();
    assert_eq!(err.kind(), Some(&SyntaxError::Overflow { ty: "i64" }));
}

#[test]
fn check_for_end_of_input_rejects_trailing_garbage() {
    let mut r = JsonReader::over_slice(b"1 2", ReaderConfig { check_for_end_of_input: true, ..ReaderConfig::default() });
    r.read_i64().unwrap();
    assert!(r.check_end_of_input().is_err());
}

#[test]
fn check_for_end_of_input_disabled_allows_trailing_garbage() {
    let mut r = JsonReader::over_slice(b"1 2", ReaderConfig { check_for_end_of_input: false, ..ReaderConfig::default() });
    r.read_i64().unwrap();
    assert!(r.check_end_of_input().is_ok());
}
