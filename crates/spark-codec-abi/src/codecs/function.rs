//! `function` 编解码：20 字节地址紧跟 4 字节选择器，共 24 字节，右侧补零到一个字。

use bytes::{BufMut, BytesMut};

use crate::error::{AbiError, Result};
use crate::value::{ADDRESS_LEN, AbiValue, Address, FunctionRef, SELECTOR_LEN};
use crate::word::{WORD_SIZE, read_word};

const PACKED_LEN: usize = ADDRESS_LEN + SELECTOR_LEN;

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let AbiValue::Function(function) = value else {
        return Err(AbiError::mismatch(ty, "a function reference"));
    };
    buffer.put_slice(function.address.as_bytes());
    buffer.put_slice(&function.selector);
    buffer.put_bytes(0, WORD_SIZE - PACKED_LEN);
    Ok(())
}

pub(super) fn decode(window: &[u8], ty: &str) -> Result<AbiValue> {
    let word = read_word(window, 0)?;
    if word[PACKED_LEN..].iter().any(|byte| *byte != 0) {
        return Err(AbiError::invalid_encoding(ty, "function padding is not zero"));
    }
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&word[..ADDRESS_LEN]);
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&word[ADDRESS_LEN..PACKED_LEN]);
    Ok(AbiValue::Function(FunctionRef::new(
        Address::new(address),
        selector,
    )))
}
