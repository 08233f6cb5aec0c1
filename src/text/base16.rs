//! Base16 (hex) blob decode/encode (`SPEC_FULL.md` §2 `[TEXT_ENGINE]`,
//! spec.md §4.3 "Base16 / Base64 emission").

use crate::error::{Position, ReaderError, SyntaxError};
use crate::text::strings::hex_val;

/// Decodes a base16 string body (the bytes between the surrounding quotes,
/// already unescaped) into a byte vector. An odd digit count or a
/// non-hex-digit byte fails with `HexDigit`.
pub(crate) fn decode(body: &[u8], pos: Position) -> Result<Vec<u8>, ReaderError> {
    if body.len() % 2 != 0 {
        return Err(ReaderError::syntax(SyntaxError::HexDigit, pos, None));
    }
    let mut out = Vec::with_capacity(body.len() / 2);
    for pair in body.chunks_exact(2) {
        let hi = hex_val(pair[0]).ok_or_else(|| ReaderError::syntax(SyntaxError::HexDigit, pos, None))?;
        let lo = hex_val(pair[1]).ok_or_else(|| ReaderError::syntax(SyntaxError::HexDigit, pos, None))?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

/// Encodes `bytes` as lowercase or uppercase hex, written directly to
/// `out` (the surrounding `"`…`"` quoting is added by the caller).
pub(crate) fn encode(bytes: &[u8], lower_case: bool, out: &mut Vec<u8>) {
    const LOWER: &[u8; 16] = b"0123456789abcdef";
    const UPPER: &[u8; 16] = b"0123456789ABCDEF";
    let table = if lower_case { LOWER } else { UPPER };
    for &b in bytes {
        out.push(table[usize::from(b >> 4)]);
        out.push(table[usize::from(b & 0x0F)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn round_trips() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
        let mut out = Vec::new();
        encode(&bytes, true, &mut out);
        assert_eq!(out, b"deadbeef");
        assert_eq!(decode(&out, pos()).unwrap(), bytes);
    }

    #[test]
    fn rejects_odd_length() {
        assert!(decode(b"abc", pos()).is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(decode(b"zz", pos()).is_err());
    }
}
