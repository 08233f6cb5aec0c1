//! The concrete scenarios from `spec.md` §8 that exercise reader and
//! writer together (scenario 1's full decode-then-reencode byte identity;
//! the others are covered next to the engine that owns them — see
//! `floats.rs` scenario 2, `duration.rs` scenario 4, `reader.rs` scenario
//! 5, `strings.rs`/`writer.rs` scenario 6, `writer.rs` scenario 7).

use crate::config::ReaderConfig;
use crate::reader::JsonReader;
use crate::writer::JsonWriter;

/// Mirrors the nested-mapping codec from spec scenario 1 directly against
/// reader/writer primitives (no user codec needed): an outer object with a
/// `"1"`/`"2"`-keyed inner map of floats, and a two-level nested map.
fn reencode_scenario_1(input: &str) -> String {
    let mut r = JsonReader::over_slice(input.as_bytes(), ReaderConfig::default());
    let mut w = JsonWriter::over_vec(crate::config::WriterConfig::default());

    w.write_object_start().unwrap();
    assert_eq!(r.next_token().unwrap(), b'{');
    loop {
        let key = r.read_key_as_string().unwrap();
        w.write_key(&key).unwrap();
        assert_eq!(r.next_token().unwrap(), b'{');
        w.write_object_start().unwrap();
        if !r.is_next_token(b'}').unwrap() {
            r.rollback_token().unwrap();
            loop {
                let inner_key = r.read_key_as_string().unwrap();
                w.write_key(&inner_key).unwrap();
                match r.next_token().unwrap() {
                    b'{' => {
                        w.write_object_start().unwrap();
                        if !r.is_next_token(b'}').unwrap() {
                            r.rollback_token().unwrap();
                            loop {
                                let leaf_key = r.read_key_as_string().unwrap();
                                w.write_key(&leaf_key).unwrap();
                                w.write_f64(r.read_f64().unwrap()).unwrap();
                                match r.next_token().unwrap() {
                                    b',' => continue,
                                    b'}' => break,
                                    _ => panic!("malformed input"),
                                }
                            }
                        }
                        w.write_object_end().unwrap();
                    }
                    _ => {
                        r.rollback_token().unwrap();
                        w.write_f64(r.read_f64().unwrap()).unwrap();
                    }
                }
                match r.next_token().unwrap() {
                    b',' => continue,
                    b'}' => break,
                    _ => panic!("malformed input"),
                }
            }
        }
        w.write_object_end().unwrap();
        match r.next_token().unwrap() {
            b',' => continue,
            b'}' => break,
            _ => panic!("malformed input"),
        }
    }
    w.write_object_end().unwrap();
    r.check_end_of_input().unwrap();
    String::from_utf8(w.finish().unwrap()).unwrap()
}

#[test]
fn scenario_1_nested_mapping_round_trips_exactly() {
    let input = r#"{"m":{"1":1.1,"2":2.2},"mm":{"1":{"3":3.3},"2":{}}}"#;
    assert_eq!(reencode_scenario_1(input), input);
}
