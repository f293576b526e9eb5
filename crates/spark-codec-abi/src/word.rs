//! 定长字（word）缓冲工具。
//!
//! ABI 编码中一切长度、偏移与标量都占用恰好一个 32 字节字，并以大端序存储。本模块提供构造、读取、
//! 解释与补齐字的最小工具集，供引擎与各类型编解码器共享。

use bytes::{BufMut, BytesMut};

use crate::error::{AbiError, Result};

/// 字长，单位字节。
pub const WORD_SIZE: usize = 32;

/// 一个 32 字节字。
pub type Word = [u8; WORD_SIZE];

/// 全零字，用作动态元素的占位指针槽。
pub const ZERO_WORD: Word = [0; WORD_SIZE];

/// 将 `usize` 编码为大端字。
pub fn word_from_usize(value: usize) -> Word {
    word_from_u128(value as u128)
}

/// 将 `u128` 编码为大端字，高 16 字节补零。
pub fn word_from_u128(value: u128) -> Word {
    let mut word = ZERO_WORD;
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// 将 `i128` 编码为二进制补码字，高 16 字节按符号位扩展。
pub fn word_from_i128(value: i128) -> Word {
    let mut word = if value < 0 { [0xff; WORD_SIZE] } else { ZERO_WORD };
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// 读取 `offset` 处的一个完整字。
///
/// # 契约说明（What）
/// - **前置条件**：无；越界由返回值表达；
/// - **后置条件**：成功时返回借用自 `buffer` 的字引用，不复制；
/// - **错误**：`offset + 32` 超出缓冲区时返回 [`AbiError::OutOfRange`]。
pub fn read_word(buffer: &[u8], offset: usize) -> Result<&Word> {
    let window = window(buffer, offset, WORD_SIZE)?;
    window
        .try_into()
        .map_err(|_| out_of_range(buffer, offset, WORD_SIZE))
}

/// 取 `buffer[offset..offset + len]`，越界时返回 [`AbiError::OutOfRange`]。
pub fn window(buffer: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| buffer.get(offset..end))
        .ok_or_else(|| out_of_range(buffer, offset, len))
}

/// 取 `buffer[offset..]`，`offset` 超过缓冲区长度时返回 [`AbiError::OutOfRange`]。
pub fn tail(buffer: &[u8], offset: usize) -> Result<&[u8]> {
    buffer
        .get(offset..)
        .ok_or_else(|| out_of_range(buffer, offset, 0))
}

/// 把字解释为无符号偏移量或长度。
///
/// 高位非零意味着数值超出本机地址空间，此时返回 [`AbiError::OffsetOverflow`]。
pub fn word_to_usize(word: &Word) -> Result<usize> {
    const USIZE_BYTES: usize = core::mem::size_of::<usize>();
    let (high, low) = word.split_at(WORD_SIZE - USIZE_BYTES);
    if high.iter().any(|byte| *byte != 0) {
        return Err(AbiError::OffsetOverflow);
    }
    let mut raw = [0u8; USIZE_BYTES];
    raw.copy_from_slice(low);
    Ok(usize::from_be_bytes(raw))
}

/// 向上取整到字边界。
pub const fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// 左侧补零追加：`bytes` 右对齐到一个字内。调用方保证 `bytes.len() <= 32`。
pub fn put_padded_left(buffer: &mut BytesMut, bytes: &[u8]) {
    debug_assert!(bytes.len() <= WORD_SIZE);
    buffer.put_bytes(0, WORD_SIZE - bytes.len());
    buffer.put_slice(bytes);
}

/// 右侧补零追加：`bytes` 之后补零直到字边界，空切片不产生任何字节。
pub fn put_padded_right(buffer: &mut BytesMut, bytes: &[u8]) {
    buffer.put_slice(bytes);
    buffer.put_bytes(0, padded_len(bytes.len()) - bytes.len());
}

/// 以大端字追加 `usize`。
pub fn put_usize(buffer: &mut BytesMut, value: usize) {
    buffer.put_slice(&word_from_usize(value));
}

fn out_of_range(buffer: &[u8], offset: usize, needed: usize) -> AbiError {
    AbiError::OutOfRange {
        offset,
        needed,
        available: buffer.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usize_words_are_big_endian() {
        let word = word_from_usize(0xa0);
        assert_eq!(word[31], 0xa0);
        assert!(word[..31].iter().all(|byte| *byte == 0));
        assert_eq!(word_to_usize(&word), Ok(0xa0));
    }

    #[test]
    fn negative_words_are_sign_extended() {
        assert_eq!(word_from_i128(-1), [0xff; WORD_SIZE]);
        let word = word_from_i128(-2);
        assert_eq!(word[31], 0xfe);
        assert!(word[..31].iter().all(|byte| *byte == 0xff));
    }

    #[test]
    fn oversized_offsets_overflow() {
        let mut word = ZERO_WORD;
        word[0] = 1;
        assert_eq!(word_to_usize(&word), Err(AbiError::OffsetOverflow));
    }

    #[test]
    fn reads_past_the_end_are_out_of_range() {
        let buffer = [0u8; 40];
        assert!(read_word(&buffer, 8).is_ok());
        assert_eq!(
            read_word(&buffer, 9),
            Err(AbiError::OutOfRange {
                offset: 9,
                needed: WORD_SIZE,
                available: 40,
            })
        );
        assert!(window(&buffer, usize::MAX, 2).is_err());
        assert_eq!(tail(&buffer, 40).map(<[u8]>::len), Ok(0));
        assert!(tail(&buffer, 41).is_err());
    }

    #[test]
    fn padding_aligns_to_word_boundaries() {
        let mut buffer = BytesMut::new();
        put_padded_right(&mut buffer, b"foo");
        assert_eq!(buffer.len(), WORD_SIZE);
        assert_eq!(&buffer[..3], b"foo");

        put_padded_left(&mut buffer, &[0xab]);
        assert_eq!(buffer.len(), 2 * WORD_SIZE);
        assert_eq!(buffer[2 * WORD_SIZE - 1], 0xab);

        put_padded_right(&mut buffer, &[]);
        assert_eq!(buffer.len(), 2 * WORD_SIZE);
        assert_eq!(padded_len(33), 64);
    }
}
