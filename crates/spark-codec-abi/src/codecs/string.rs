//! `string` 编解码：UTF-8 字节按 `bytes` 布局存放。

use bytes::BytesMut;

use super::dynamic_bytes::{decode_raw, encode_raw};
use crate::error::{AbiError, Result};
use crate::value::AbiValue;

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let AbiValue::String(text) = value else {
        return Err(AbiError::mismatch(ty, "a string"));
    };
    encode_raw(buffer, text.as_bytes());
    Ok(())
}

pub(super) fn decode(window: &[u8], ty: &str) -> Result<AbiValue> {
    let raw = decode_raw(window)?;
    let text = core::str::from_utf8(raw)
        .map_err(|err| AbiError::invalid_encoding(ty, err.to_string()))?;
    Ok(AbiValue::String(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::put_usize;

    #[test]
    fn utf8_text_round_trips() {
        let mut buffer = BytesMut::new();
        encode(&mut buffer, &AbiValue::from("héllo, 世界"), "string").expect("encodes");
        assert_eq!(buffer.len() % 32, 0);
        assert_eq!(decode(&buffer, "string"), Ok(AbiValue::from("héllo, 世界")));
    }

    #[test]
    fn malformed_utf8_is_an_invalid_encoding() {
        let mut buffer = BytesMut::new();
        put_usize(&mut buffer, 2);
        buffer.extend_from_slice(&[0xc3, 0x28]);
        buffer.extend_from_slice(&[0u8; 30]);
        let err = decode(&buffer, "string").unwrap_err();
        assert_eq!(err.code(), crate::error::codes::INVALID_ENCODING);
    }
}
