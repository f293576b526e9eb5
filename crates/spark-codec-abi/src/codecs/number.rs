//! `uintN` / `intN` 编解码。
//!
//! 一个字承载一个整数：无符号数高位补零，有符号数按二进制补码做符号扩展。宽度外的位必须与规则一致，
//! 否则编码返回 `ValueOutOfRange`，解码同样拒绝。

use bytes::{BufMut, BytesMut};

use super::parse_decimal;
use crate::error::{AbiError, Result};
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, Word, read_word};

/// 解析整数类型：返回（是否有符号，位宽）。裸 `uint`/`int` 视为 256 位。
fn parse(ty: &str) -> Option<(bool, usize)> {
    let (signed, bits) = if let Some(rest) = ty.strip_prefix("uint") {
        (false, rest)
    } else if let Some(rest) = ty.strip_prefix("int") {
        (true, rest)
    } else {
        return None;
    };

    if bits.is_empty() {
        return Some((signed, 256));
    }
    let bits = parse_decimal(bits)?;
    (bits <= 256 && bits % 8 == 0).then_some((signed, bits))
}

pub(super) fn is_type(ty: &str) -> bool {
    parse(ty).is_some()
}

/// 宽度外的高位是否全部为填充值。
fn fits(word: &Word, signed: bool, bits: usize) -> bool {
    let pad = WORD_SIZE - bits / 8;
    if pad == 0 {
        return true;
    }
    let fill = if signed && word[pad] & 0x80 != 0 {
        0xff
    } else {
        0x00
    };
    word[..pad].iter().all(|byte| *byte == fill)
}

pub(super) fn encode(buffer: &mut BytesMut, value: &AbiValue, ty: &str) -> Result<()> {
    let (signed, bits) = parse(ty).ok_or_else(|| AbiError::unsupported(ty))?;
    let word = match (signed, value) {
        (false, AbiValue::Uint(word)) | (true, AbiValue::Int(word)) => word,
        (false, _) => return Err(AbiError::mismatch(ty, "an unsigned integer")),
        (true, _) => return Err(AbiError::mismatch(ty, "a signed integer")),
    };
    if !fits(word, signed, bits) {
        return Err(AbiError::value_out_of_range(ty));
    }
    buffer.put_slice(word);
    Ok(())
}

pub(super) fn decode(window: &[u8], ty: &str) -> Result<AbiValue> {
    let (signed, bits) = parse(ty).ok_or_else(|| AbiError::unsupported(ty))?;
    let word = read_word(window, 0)?;
    if !fits(word, signed, bits) {
        return Err(AbiError::value_out_of_range(ty));
    }
    Ok(if signed {
        AbiValue::Int(*word)
    } else {
        AbiValue::Uint(*word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::word_from_u128;

    fn encoded(value: &AbiValue, ty: &str) -> Result<Vec<u8>> {
        let mut buffer = BytesMut::new();
        encode(&mut buffer, value, ty)?;
        Ok(buffer.to_vec())
    }

    #[test]
    fn parses_widths() {
        assert_eq!(parse("uint"), Some((false, 256)));
        assert_eq!(parse("int"), Some((true, 256)));
        assert_eq!(parse("uint8"), Some((false, 8)));
        assert_eq!(parse("int136"), Some((true, 136)));
        assert_eq!(parse("uint12"), None);
        assert_eq!(parse("uint264"), None);
        assert_eq!(parse("number"), None);
    }

    #[test]
    fn unsigned_values_must_fit_their_width() {
        assert_eq!(
            encoded(&AbiValue::uint(255), "uint8"),
            Ok(word_from_u128(255).to_vec())
        );
        assert_eq!(
            encoded(&AbiValue::uint(256), "uint8"),
            Err(AbiError::value_out_of_range("uint8"))
        );
        assert!(encoded(&AbiValue::Uint([0xff; WORD_SIZE]), "uint256").is_ok());
    }

    #[test]
    fn signed_values_are_sign_extended() {
        let bytes = encoded(&AbiValue::int(-1), "int8").expect("fits");
        assert_eq!(bytes, vec![0xff; WORD_SIZE]);
        assert!(encoded(&AbiValue::int(-128), "int8").is_ok());
        assert_eq!(
            encoded(&AbiValue::int(-129), "int8"),
            Err(AbiError::value_out_of_range("int8"))
        );
        assert_eq!(
            encoded(&AbiValue::int(128), "int8"),
            Err(AbiError::value_out_of_range("int8"))
        );
    }

    #[test]
    fn signedness_must_match_the_value_variant() {
        assert_eq!(
            encoded(&AbiValue::int(1), "uint256"),
            Err(AbiError::mismatch("uint256", "an unsigned integer"))
        );
        assert_eq!(
            encoded(&AbiValue::Bool(true), "int256"),
            Err(AbiError::mismatch("int256", "a signed integer"))
        );
    }

    #[test]
    fn decoding_rejects_dirty_high_bits() {
        let word = word_from_u128(0x1_00);
        assert_eq!(
            decode(&word, "uint8"),
            Err(AbiError::value_out_of_range("uint8"))
        );
        assert_eq!(decode(&word, "uint16"), Ok(AbiValue::uint(0x100)));
        assert_eq!(decode(&[0xff; WORD_SIZE], "int16"), Ok(AbiValue::int(-1)));
    }
}
