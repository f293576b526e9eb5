//! `bool` 编解码：一个字，取值只能是 0 或 1。

use bytes::{BufMut, BytesMut};

use crate::error::{AbiError, Result};
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, read_word, word_from_usize};

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let AbiValue::Bool(flag) = value else {
        return Err(AbiError::mismatch(ty, "a boolean"));
    };
    buffer.put_slice(&word_from_usize(usize::from(*flag)));
    Ok(())
}

pub(super) fn decode(window: &[u8], ty: &str) -> Result<AbiValue> {
    let word = read_word(window, 0)?;
    let (high, last) = word.split_at(WORD_SIZE - 1);
    if high.iter().any(|byte| *byte != 0) || last[0] > 1 {
        return Err(AbiError::invalid_encoding(ty, "boolean word is neither 0 nor 1"));
    }
    Ok(AbiValue::Bool(last[0] == 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_is_a_single_trailing_one() {
        let mut buffer = BytesMut::new();
        encode(&mut buffer, &AbiValue::Bool(true), "bool").expect("encodes");
        assert_eq!(buffer.len(), WORD_SIZE);
        assert_eq!(buffer[WORD_SIZE - 1], 1);
        assert_eq!(decode(&buffer, "bool"), Ok(AbiValue::Bool(true)));
    }

    #[test]
    fn other_words_are_invalid() {
        let mut word = word_from_usize(2);
        assert!(decode(&word, "bool").is_err());
        word = word_from_usize(1);
        word[0] = 1;
        assert!(decode(&word, "bool").is_err());
    }

    #[test]
    fn non_boolean_values_are_rejected() {
        let mut buffer = BytesMut::new();
        assert_eq!(
            encode(&mut buffer, &AbiValue::uint(1), "bool"),
            Err(AbiError::mismatch("bool", "a boolean"))
        );
        assert!(buffer.is_empty());
    }
}
