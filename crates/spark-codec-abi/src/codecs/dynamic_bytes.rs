//! `bytes` 编解码：长度字后接右侧补零的原始字节，属于动态类型。

use bytes::BytesMut;

use crate::error::{AbiError, Result};
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, put_padded_right, put_usize, read_word, window, word_to_usize};

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let AbiValue::Bytes(bytes) = value else {
        return Err(AbiError::mismatch(ty, "a byte string"));
    };
    encode_raw(buffer, bytes);
    Ok(())
}

pub(super) fn decode(window: &[u8], _ty: &str) -> Result<AbiValue> {
    decode_raw(window).map(|bytes| AbiValue::Bytes(bytes.to_vec()))
}

/// 写出长度前缀的字节串，`string` 复用同一布局。
pub(super) fn encode_raw(buffer: &mut BytesMut, bytes: &[u8]) {
    put_usize(buffer, bytes.len());
    put_padded_right(buffer, bytes);
}

/// 读取长度前缀的字节串；长度字超出窗口时返回 `OutOfRange`。
pub(super) fn decode_raw(data: &[u8]) -> Result<&[u8]> {
    let len = word_to_usize(read_word(data, 0)?)?;
    window(data, WORD_SIZE, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit";

    #[test]
    fn length_prefixed_and_word_padded() {
        let mut buffer = BytesMut::new();
        encode(&mut buffer, &AbiValue::Bytes(LOREM.as_bytes().to_vec()), "bytes")
            .expect("encodes");
        assert_eq!(
            hex::encode(&buffer),
            "0000000000000000000000000000000000000000000000000000000000000037\
             4c6f72656d20697073756d20646f6c6f722073697420616d65742c20636f6e73\
             656374657475722061646970697363696e6720656c6974000000000000000000"
        );
        assert_eq!(
            decode(&buffer, "bytes"),
            Ok(AbiValue::Bytes(LOREM.as_bytes().to_vec()))
        );
    }

    #[test]
    fn empty_bytes_is_a_single_zero_length_word() {
        let mut buffer = BytesMut::new();
        encode_raw(&mut buffer, &[]);
        assert_eq!(buffer.to_vec(), vec![0u8; WORD_SIZE]);
    }

    #[test]
    fn length_beyond_the_window_is_out_of_range() {
        let mut buffer = BytesMut::new();
        put_usize(&mut buffer, 64);
        buffer.extend_from_slice(&[0u8; WORD_SIZE]);
        assert_eq!(
            decode_raw(&buffer),
            Err(AbiError::OutOfRange {
                offset: WORD_SIZE,
                needed: 64,
                available: 2 * WORD_SIZE,
            })
        );
    }
}
