//! UUID parse/format (`SPEC_FULL.md` §2 `[UUID]`, spec.md §2 item 3). Wraps
//! `uuid::Uuid` for 128-bit storage, restricting the wire grammar to the
//! canonical `8-4-4-4-12` hyphenated hex form (RFC 4122 textual
//! representation) and rejecting any other layout the `uuid` crate would
//! otherwise also accept (braces, URNs, no hyphens).

use crate::error::{Position, ReaderError, SyntaxError};

const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Parses a canonical hyphenated UUID string, rejecting any other layout.
pub(crate) fn parse_uuid(bytes: &[u8], pos: Position) -> Result<uuid::Uuid, ReaderError> {
    if bytes.len() != 36 {
        return Err(ReaderError::syntax(SyntaxError::IllegalUuid, pos, None));
    }
    for (i, &b) in bytes.iter().enumerate() {
        if HYPHEN_POSITIONS.contains(&i) {
            if b != b'-' {
                return Err(ReaderError::syntax(SyntaxError::IllegalUuid, pos, None));
            }
        } else if !b.is_ascii_hexdigit() {
            return Err(ReaderError::syntax(SyntaxError::IllegalUuid, pos, None));
        }
    }
    let text = core::str::from_utf8(bytes).expect("already validated as ASCII hex + hyphens");
    uuid::Uuid::parse_str(text).map_err(|_| ReaderError::syntax(SyntaxError::IllegalUuid, pos, None))
}

/// Formats `id` as the canonical lowercase hyphenated form.
pub(crate) fn format_uuid(id: uuid::Uuid, out: &mut Vec<u8>) {
    let mut buf = [0u8; 36];
    out.extend_from_slice(id.hyphenated().encode_lower(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn round_trips_canonical_form() {
        let id = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let mut out = Vec::new();
        format_uuid(id, &mut out);
        assert_eq!(out, b"67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(parse_uuid(&out, pos()).unwrap(), id);
    }

    #[test]
    fn rejects_braced_form() {
        assert!(parse_uuid(b"{67e55044-10b1-426f-9247-bb680e5fe0c8}", pos()).is_err());
    }

    #[test]
    fn rejects_missing_hyphens() {
        assert!(parse_uuid(b"67e5504410b1426f9247bb680e5fe0c8000000", pos()).is_err());
    }
}
