//! `address` 编解码：20 字节地址右对齐到一个字，高 12 字节为零。

use bytes::BytesMut;

use crate::error::{AbiError, Result};
use crate::value::{ADDRESS_LEN, AbiValue, Address};
use crate::word::{WORD_SIZE, put_padded_left, read_word};

const PADDING: usize = WORD_SIZE - ADDRESS_LEN;

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let AbiValue::Address(address) = value else {
        return Err(AbiError::mismatch(ty, "an address"));
    };
    put_padded_left(buffer, address.as_bytes());
    Ok(())
}

pub(super) fn decode(window: &[u8], ty: &str) -> Result<AbiValue> {
    let word = read_word(window, 0)?;
    let (padding, raw) = word.split_at(PADDING);
    if padding.iter().any(|byte| *byte != 0) {
        return Err(AbiError::invalid_encoding(ty, "address padding is not zero"));
    }
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes.copy_from_slice(raw);
    Ok(AbiValue::Address(Address::new(bytes)))
}
