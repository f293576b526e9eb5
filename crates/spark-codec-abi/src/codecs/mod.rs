//! 各类型编解码器及其在 [`CodecKind`] 上的统一分派。
//!
//! # 契约说明（What）
//! 每个种类都满足同一组约定，引擎只通过这些约定与它们交互：
//! - `encode`：把值的编码**追加**到给定缓冲之后，不修改已有字节；
//! - `decode`：从字节窗口还原值。静态元素拿到的窗口恰为其 `static_words × 32` 字节；动态元素拿到的窗口
//!   从其真实编码起点一直延伸到缓冲末尾；
//! - `dynamism`：固定布尔值或按类型字符串求值的谓词；
//! - `is_type`：认领未精确注册的参数化类型字符串；
//! - `static_words`：静态元素在静态区占用的字数，引擎据此推进游标。
//!
//! 容器种类（数组、元组）通过 [`crate::engine`] 递归编解码其元素列表，因此元素内的偏移量始终相对于
//! 该元素列表自身的起点。

mod address;
mod array;
mod boolean;
mod dynamic_bytes;
mod fixed_bytes;
mod function;
mod number;
mod string;
mod tuple;

use bytes::BytesMut;

use crate::context::{DecodeContext, EncodeContext, Nesting};
use crate::error::Result;
use crate::registry::{self, CodecKind, Dynamism, REGISTRATIONS};
use crate::value::AbiValue;

impl CodecKind {
    /// 注册表中的基础名。
    pub fn name(self) -> &'static str {
        REGISTRATIONS
            .iter()
            .find(|entry| entry.kind == self)
            .map(|entry| entry.name)
            .unwrap_or("unknown")
    }

    /// 是否认领参数化类型字符串 `ty`。只有参数化种类提供谓词，其余一律返回 `false`。
    pub fn is_type(self, ty: &str) -> bool {
        match self {
            CodecKind::Array => array::is_type(ty),
            CodecKind::FixedBytes => fixed_bytes::is_type(ty),
            CodecKind::Number => number::is_type(ty),
            CodecKind::Tuple => tuple::is_type(ty),
            CodecKind::Address
            | CodecKind::Bool
            | CodecKind::Bytes
            | CodecKind::Function
            | CodecKind::String => false,
        }
    }

    /// 动态性声明。
    pub fn dynamism(self) -> Dynamism {
        match self {
            CodecKind::Bytes | CodecKind::String => Dynamism::Fixed(true),
            CodecKind::Array => Dynamism::ByType(array::is_dynamic),
            CodecKind::Tuple => Dynamism::ByType(tuple::is_dynamic),
            CodecKind::Address
            | CodecKind::Bool
            | CodecKind::FixedBytes
            | CodecKind::Function
            | CodecKind::Number => Dynamism::Fixed(false),
        }
    }

    /// 元素在静态区占用的字数：动态元素恒为 1（指针槽），静态元素见 [`CodecKind::static_words`]。
    ///
    /// `nesting` 为 `ty` 所处层级，容器每下探一层元素类型消耗一层。
    pub fn head_words(self, ty: &str, nesting: Nesting) -> Result<usize> {
        if registry::is_dynamic(self, ty, nesting)? {
            return Ok(1);
        }
        self.static_words(ty, nesting)
    }

    /// 已判定为静态的元素内联编码的字数。标量恒为 1，静态定长数组与静态元组按成员累加。
    pub fn static_words(self, ty: &str, nesting: Nesting) -> Result<usize> {
        match self {
            CodecKind::Array => array::static_words(ty, nesting),
            CodecKind::Tuple => tuple::static_words(ty, nesting),
            _ => Ok(1),
        }
    }

    /// 把 `value` 按类型 `ty` 编码并追加到 `buffer`。
    pub fn encode(
        self,
        buffer: &mut BytesMut,
        value: &AbiValue,
        ty: &str,
        ctx: &EncodeContext<'_>,
    ) -> Result<()> {
        match self {
            CodecKind::Address => address::encode(buffer, value, ty),
            CodecKind::Array => array::encode(buffer, value, ty, ctx),
            CodecKind::Bool => boolean::encode(buffer, value, ty),
            CodecKind::Bytes => dynamic_bytes::encode(buffer, value, ty),
            CodecKind::FixedBytes => fixed_bytes::encode(buffer, value, ty),
            CodecKind::Function => function::encode(buffer, value, ty),
            CodecKind::Number => number::encode(buffer, value, ty),
            CodecKind::String => string::encode(buffer, value, ty),
            CodecKind::Tuple => tuple::encode(buffer, value, ty, ctx),
        }
    }

    /// 从 `window` 解码类型为 `ty` 的值。
    pub fn decode(self, window: &[u8], ty: &str, ctx: &DecodeContext<'_>) -> Result<AbiValue> {
        match self {
            CodecKind::Address => address::decode(window, ty),
            CodecKind::Array => array::decode(window, ty, ctx),
            CodecKind::Bool => boolean::decode(window, ty),
            CodecKind::Bytes => dynamic_bytes::decode(window, ty),
            CodecKind::FixedBytes => fixed_bytes::decode(window, ty),
            CodecKind::Function => function::decode(window, ty),
            CodecKind::Number => number::decode(window, ty),
            CodecKind::String => string::decode(window, ty),
            CodecKind::Tuple => tuple::decode(window, ty, ctx),
        }
    }
}

/// 解析无前导零的十进制参数，如 `bytes32` 中的 `32`、`T[4]` 中的 `4`。
fn parse_decimal(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_registry() {
        for registration in REGISTRATIONS {
            assert_eq!(registration.kind.name(), registration.name);
        }
    }

    #[test]
    fn decimal_parameters_reject_leading_zeros() {
        assert_eq!(parse_decimal("32"), Some(32));
        assert_eq!(parse_decimal("032"), None);
        assert_eq!(parse_decimal("0"), None);
        assert_eq!(parse_decimal("3a"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn static_widths_accumulate_through_containers() {
        let top = Nesting::default();
        assert_eq!(CodecKind::Number.head_words("uint256", top), Ok(1));
        assert_eq!(CodecKind::String.head_words("string", top), Ok(1));
        assert_eq!(CodecKind::Array.head_words("uint256[3]", top), Ok(3));
        assert_eq!(CodecKind::Array.head_words("uint256[]", top), Ok(1));
        assert_eq!(CodecKind::Tuple.head_words("(uint256,bool[2])", top), Ok(3));
        assert_eq!(CodecKind::Array.head_words("(uint256,bool)[2]", top), Ok(4));
        assert_eq!(CodecKind::Tuple.head_words("(uint256,string)", top), Ok(1));
    }

    #[test]
    fn widths_of_overly_deep_types_fail_instead_of_recursing() {
        let deep = format!("{}uint256{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(
            CodecKind::Tuple.head_words(&deep, Nesting::default()),
            Err(crate::error::AbiError::DepthExceeded { limit: 32 })
        );
        assert_eq!(
            CodecKind::Tuple.static_words("((uint256,bool))", Nesting::new(1)),
            Err(crate::error::AbiError::DepthExceeded { limit: 1 })
        );
    }
}
