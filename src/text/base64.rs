//! Base64 / base64url blob decode/encode via the `base64` crate
//! (`SPEC_FULL.md` §2 `[TEXT_ENGINE]`, spec.md §4.3 "Base16 / Base64
//! emission"). The crate provides RFC 4648-exact alphabets and padding
//! control; this module only adds the reader/writer error mapping.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::{Position, ReaderError, SyntaxError};

pub(crate) fn decode_standard(body: &[u8], pos: Position) -> Result<Vec<u8>, ReaderError> {
    STANDARD
        .decode(body)
        .or_else(|_| STANDARD_NO_PAD.decode(body))
        .map_err(|_| ReaderError::syntax(SyntaxError::IllegalEscape, pos, None))
}

pub(crate) fn decode_url(body: &[u8], pos: Position) -> Result<Vec<u8>, ReaderError> {
    URL_SAFE
        .decode(body)
        .or_else(|_| URL_SAFE_NO_PAD.decode(body))
        .map_err(|_| ReaderError::syntax(SyntaxError::IllegalEscape, pos, None))
}

pub(crate) fn encode_standard(bytes: &[u8], pad: bool, out: &mut Vec<u8>) {
    let encoded = if pad {
        STANDARD.encode(bytes)
    } else {
        STANDARD_NO_PAD.encode(bytes)
    };
    out.extend_from_slice(encoded.as_bytes());
}

pub(crate) fn encode_url(bytes: &[u8], pad: bool, out: &mut Vec<u8>) {
    let encoded = if pad {
        URL_SAFE.encode(bytes)
    } else {
        URL_SAFE_NO_PAD.encode(bytes)
    };
    out.extend_from_slice(encoded.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::default()
    }

    #[test]
    fn round_trips_standard_padded() {
        let bytes = b"hello, world!";
        let mut out = Vec::new();
        encode_standard(bytes, true, &mut out);
        assert_eq!(decode_standard(&out, pos()).unwrap(), bytes);
    }

    #[test]
    fn round_trips_url_unpadded() {
        let bytes = [0xFFu8, 0xEE, 0x00, 0x11];
        let mut out = Vec::new();
        encode_url(&bytes, false, &mut out);
        assert!(!out.contains(&b'='));
        assert_eq!(decode_url(&out, pos()).unwrap(), bytes);
    }
}
