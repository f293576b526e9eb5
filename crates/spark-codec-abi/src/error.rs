//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义打包/解包引擎与各类型编解码器可能返回的全部错误；
//! - 每个变体对应一个稳定错误码（见 [`codes`]），调用方可据此做分类统计，而无需解析消息文本。
//!
//! ## 设计要求（What）
//! - 引擎自身只产生 `UnsupportedType`、`LengthMismatch`、`OutOfRange`/`OffsetOverflow` 三类错误；
//! - `TypeMismatch`、`ValueOutOfRange`、`InvalidEncoding` 由具体编解码器抛出，引擎原样透传，不做包装；
//! - 所有错误均立即终止当前 `pack`/`unpack` 调用，不返回部分结果。

use thiserror::Error;

/// 稳定错误码命名空间，遵循 `<领域>.<语义>` 约定。
pub mod codes {
    /// 类型字符串无法匹配任何已注册的编解码器。
    pub const UNSUPPORTED_TYPE: &str = "abi.unsupported_type";
    /// 类型数量与值数量不一致。
    pub const LENGTH_MISMATCH: &str = "abi.length_mismatch";
    /// 读取越过缓冲区末尾，或偏移量指向缓冲区之外。
    pub const OUT_OF_RANGE: &str = "abi.out_of_range";
    /// 值的变体与声明类型不匹配。
    pub const TYPE_MISMATCH: &str = "abi.type_mismatch";
    /// 值超出声明类型可表示的范围。
    pub const VALUE_OUT_OF_RANGE: &str = "abi.value_out_of_range";
    /// 字节内容不是该类型的合法编码。
    pub const INVALID_ENCODING: &str = "abi.invalid_encoding";
    /// 嵌套层级超过配置上限。
    pub const DEPTH_EXCEEDED: &str = "abi.depth_exceeded";
    /// 编码结果或解码序列超过配置预算。
    pub const BUDGET_EXCEEDED: &str = "abi.budget_exceeded";
    /// 配置解析或校验失败。
    pub const CONFIG: &str = "abi.config";
}

/// ABI 编解码错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：以细粒度枚举区分“类型不支持”“输入越界”“值非法”等故障，便于调用方精确处理；
/// - **契约 (What)**：实现 `Clone + Eq`，测试可直接断言完整错误值；[`AbiError::code`] 返回稳定错误码；
/// - **设计权衡 (Trade-offs)**：上下文字段使用 `String` 保存类型字符串，牺牲少量分配换取可读的诊断信息。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AbiError {
    /// 类型字符串既不精确匹配注册名，也未被任何 `is_type` 谓词认领。
    #[error("type `{ty}` is not supported")]
    UnsupportedType { ty: String },

    /// 类型列表与值列表长度不一致，在产生任何字节之前抛出。
    #[error("the length of the types ({types}) and values ({values}) must be equal")]
    LengthMismatch { types: usize, values: usize },

    /// 读取窗口越过缓冲区末尾。
    ///
    /// - `offset`：尝试读取的起始字节位置；
    /// - `needed`：本次读取需要的字节数；
    /// - `available`：缓冲区实际长度。
    #[error(
        "element is out of range: {needed} bytes at offset {offset} exceed buffer of {available} bytes"
    )]
    OutOfRange {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// 偏移量或长度字无法表示为本机 `usize`，必然指向缓冲区之外。
    #[error("offset word does not fit in the address space")]
    OffsetOverflow,

    /// 值的变体与类型不符，例如向 `bool` 传入字符串。
    #[error("value for `{ty}` has the wrong shape: expected {expected}")]
    TypeMismatch { ty: String, expected: &'static str },

    /// 值超出类型宽度，例如 `uint8` 收到 256。
    #[error("value does not fit in `{ty}`")]
    ValueOutOfRange { ty: String },

    /// 字节内容不是合法编码，例如 `bool` 字为 2 或字符串不是 UTF-8。
    #[error("invalid encoding for `{ty}`: {reason}")]
    InvalidEncoding { ty: String, reason: String },

    /// 数组/元组嵌套超过 [`CodecConfig::max_depth`](crate::CodecConfig)。
    #[error("nesting depth exceeds the configured limit of {limit}")]
    DepthExceeded { limit: usize },

    /// 编码结果或解码出的序列长度超出预算。
    #[error("length {len} exceeds the configured budget of {limit}")]
    BudgetExceeded { len: usize, limit: usize },

    /// 配置解析或校验失败。
    #[error("invalid codec configuration: {0}")]
    Config(String),
}

impl AbiError {
    /// 返回与错误变体一一对应的稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            AbiError::UnsupportedType { .. } => codes::UNSUPPORTED_TYPE,
            AbiError::LengthMismatch { .. } => codes::LENGTH_MISMATCH,
            AbiError::OutOfRange { .. } | AbiError::OffsetOverflow => codes::OUT_OF_RANGE,
            AbiError::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            AbiError::ValueOutOfRange { .. } => codes::VALUE_OUT_OF_RANGE,
            AbiError::InvalidEncoding { .. } => codes::INVALID_ENCODING,
            AbiError::DepthExceeded { .. } => codes::DEPTH_EXCEEDED,
            AbiError::BudgetExceeded { .. } => codes::BUDGET_EXCEEDED,
            AbiError::Config(_) => codes::CONFIG,
        }
    }

    pub(crate) fn unsupported(ty: &str) -> Self {
        AbiError::UnsupportedType { ty: ty.to_owned() }
    }

    pub(crate) fn mismatch(ty: &str, expected: &'static str) -> Self {
        AbiError::TypeMismatch {
            ty: ty.to_owned(),
            expected,
        }
    }

    pub(crate) fn value_out_of_range(ty: &str) -> Self {
        AbiError::ValueOutOfRange { ty: ty.to_owned() }
    }

    pub(crate) fn invalid_encoding(ty: &str, reason: impl Into<String>) -> Self {
        AbiError::InvalidEncoding {
            ty: ty.to_owned(),
            reason: reason.into(),
        }
    }
}

/// crate 级结果别名。
pub type Result<T, E = AbiError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_domain_semantic_naming() {
        let samples = [
            AbiError::unsupported("madeup"),
            AbiError::LengthMismatch {
                types: 1,
                values: 0,
            },
            AbiError::OffsetOverflow,
            AbiError::mismatch("bool", "a boolean"),
            AbiError::value_out_of_range("uint8"),
            AbiError::invalid_encoding("string", "not utf-8"),
            AbiError::DepthExceeded { limit: 1 },
            AbiError::BudgetExceeded { len: 2, limit: 1 },
            AbiError::Config("bad".to_owned()),
        ];
        for err in samples {
            assert!(err.code().starts_with("abi."), "{err}");
        }
    }

    #[test]
    fn display_names_the_offending_type() {
        let err = AbiError::unsupported("madeup");
        assert_eq!(err.to_string(), "type `madeup` is not supported");
    }
}
