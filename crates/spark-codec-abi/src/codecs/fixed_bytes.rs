//! `bytes1`..`bytes32` 编解码：原始字节左对齐，右侧补零到一个字。

use bytes::{BufMut, BytesMut};

use super::parse_decimal;
use crate::error::{AbiError, Result};
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, read_word};

fn width(ty: &str) -> Option<usize> {
    let width = parse_decimal(ty.strip_prefix("bytes")?)?;
    (width <= WORD_SIZE).then_some(width)
}

pub(super) fn is_type(ty: &str) -> bool {
    width(ty).is_some()
}

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let width = width(ty).ok_or_else(|| AbiError::unsupported(ty))?;
    let AbiValue::FixedBytes(bytes) = value else {
        return Err(AbiError::mismatch(ty, "fixed-size bytes"));
    };
    if bytes.len() > width {
        return Err(AbiError::value_out_of_range(ty));
    }
    // 空值同样占满一个字。
    buffer.put_slice(bytes);
    buffer.put_bytes(0, WORD_SIZE - bytes.len());
    Ok(())
}

pub(super) fn decode(window: &[u8], ty: &str) -> Result<AbiValue> {
    let width = width(ty).ok_or_else(|| AbiError::unsupported(ty))?;
    let word = read_word(window, 0)?;
    let (data, padding) = word.split_at(width);
    if padding.iter().any(|byte| *byte != 0) {
        return Err(AbiError::invalid_encoding(ty, "bytes beyond the declared width"));
    }
    Ok(AbiValue::FixedBytes(data.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_are_bounded_by_one_word() {
        assert_eq!(width("bytes1"), Some(1));
        assert_eq!(width("bytes32"), Some(32));
        assert_eq!(width("bytes33"), None);
        assert_eq!(width("bytes"), None);
        assert_eq!(width("bytes01"), None);
    }

    #[test]
    fn short_values_are_right_padded() {
        let mut buffer = BytesMut::new();
        encode(&mut buffer, &AbiValue::FixedBytes(vec![0xca, 0xfe]), "bytes4").expect("fits");
        assert_eq!(buffer.len(), WORD_SIZE);
        assert_eq!(&buffer[..4], &[0xca, 0xfe, 0, 0]);
        assert_eq!(
            decode(&buffer, "bytes4"),
            Ok(AbiValue::FixedBytes(vec![0xca, 0xfe, 0, 0]))
        );
    }

    #[test]
    fn oversized_values_and_dirty_padding_fail() {
        let mut buffer = BytesMut::new();
        assert_eq!(
            encode(&mut buffer, &AbiValue::FixedBytes(vec![1, 2, 3]), "bytes2"),
            Err(AbiError::value_out_of_range("bytes2"))
        );
        let word = [0xff; WORD_SIZE];
        assert!(decode(&word, "bytes31").is_err());
        assert_eq!(
            decode(&word, "bytes32"),
            Ok(AbiValue::FixedBytes(vec![0xff; WORD_SIZE]))
        );
    }
}
