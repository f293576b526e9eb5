//! 解析器注册表与动态性判定。
//!
//! # 设计背景（Why）
//! - 引擎只认识类型字符串，需要一个确定性的规则把字符串映射到唯一的编解码器种类；
//! - 参数化类型（`uint256`、`bytes32`、`T[]`、`(T1,T2)`）无法穷举注册，只能由各编解码器的 `is_type`
//!   谓词认领，而多个谓词可能同时命中，因此必须以注册顺序决胜。
//!
//! # 解析顺序（What）
//! 1. 精确匹配已注册的基础名；
//! 2. 否则按注册顺序取第一个 `is_type` 返回 `true` 的编解码器；
//! 3. 否则返回 [`AbiError::UnsupportedType`]。
//!
//! 该顺序是行为契约而非优化手段。内置谓词目前互不重叠（`(uint256,bool)[]` 以 `]` 结尾，只有数组认领；
//! 元组谓词要求以 `)` 结尾），但新增谓词一旦与旧谓词重叠，胜者由注册顺序而非匹配精度决定。
//!
//! # 递归上限
//! 容器的动态性与静态宽度要递归检查元素类型。类型字符串来自调用方，可以任意深，因此这些判定都携带
//! [`Nesting`]，越过 `max_depth` 时返回 [`AbiError::DepthExceeded`] 而不是耗尽调用栈。

use crate::context::Nesting;
use crate::error::{AbiError, Result};

/// 已知的编解码器种类。
///
/// 封闭枚举替代运行时多态：所有分派都通过 `match` 完成，具体行为见 [`crate::codecs`]。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// `address`。
    Address,
    /// `T[]`、`T[N]`。
    Array,
    /// `bool`。
    Bool,
    /// `bytes`。
    Bytes,
    /// `bytes1`..`bytes32`。
    FixedBytes,
    /// `function`。
    Function,
    /// `uintN`、`intN`。
    Number,
    /// `string`。
    String,
    /// `(T1,…,Tn)`。
    Tuple,
}

/// 编解码器的动态性声明：固定布尔值，或依赖具体类型字符串的谓词。
///
/// 容器类型的动态性取决于其元素类型，因此只能在拿到实例化后的类型字符串时求值。
#[derive(Clone, Copy, Debug)]
pub enum Dynamism {
    /// 与类型参数无关的固定取值。
    Fixed(bool),
    /// 按类型字符串求值；元素类型无法解析或嵌套过深时返回错误。
    ByType(fn(&str, Nesting) -> Result<bool>),
}

/// 注册表中的一项：基础名与对应种类。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    /// 精确匹配使用的基础名。
    pub name: &'static str,
    /// 对应的编解码器种类。
    pub kind: CodecKind,
}

/// 按注册顺序排列的注册表。谓词冲突时靠前者胜出。
pub const REGISTRATIONS: [Registration; 9] = [
    Registration {
        name: "address",
        kind: CodecKind::Address,
    },
    Registration {
        name: "array",
        kind: CodecKind::Array,
    },
    Registration {
        name: "bool",
        kind: CodecKind::Bool,
    },
    Registration {
        name: "bytes",
        kind: CodecKind::Bytes,
    },
    Registration {
        name: "fixedBytes",
        kind: CodecKind::FixedBytes,
    },
    Registration {
        name: "function",
        kind: CodecKind::Function,
    },
    Registration {
        name: "number",
        kind: CodecKind::Number,
    },
    Registration {
        name: "string",
        kind: CodecKind::String,
    },
    Registration {
        name: "tuple",
        kind: CodecKind::Tuple,
    },
];

/// 将类型字符串解析为编解码器种类。
///
/// ```rust
/// use spark_codec_abi::registry::{CodecKind, resolve};
///
/// assert_eq!(resolve("bytes").unwrap(), CodecKind::Bytes);
/// assert_eq!(resolve("bytes32").unwrap(), CodecKind::FixedBytes);
/// assert_eq!(resolve("(uint256,bool)[]").unwrap(), CodecKind::Array);
/// assert!(resolve("madeup").is_err());
/// ```
pub fn resolve(ty: &str) -> Result<CodecKind> {
    resolve_in(&REGISTRATIONS, ty, CodecKind::is_type)
}

fn resolve_in(
    registrations: &[Registration],
    ty: &str,
    claims: impl Fn(CodecKind, &str) -> bool,
) -> Result<CodecKind> {
    if let Some(registration) = registrations.iter().find(|entry| entry.name == ty) {
        return Ok(registration.kind);
    }

    registrations
        .iter()
        .find(|entry| claims(entry.kind, ty))
        .map(|entry| entry.kind)
        .ok_or_else(|| AbiError::unsupported(ty))
}

/// 判定 `kind` 在具体类型 `ty` 下是否为动态元素。
///
/// `nesting` 是 `ty` 所处的层级；容器谓词每下探一层元素类型都会消耗一层。
pub fn is_dynamic(kind: CodecKind, ty: &str, nesting: Nesting) -> Result<bool> {
    match kind.dynamism() {
        Dynamism::Fixed(dynamic) => Ok(dynamic),
        Dynamism::ByType(predicate) => predicate(ty, nesting),
    }
}

/// 解析并判定动态性的便捷组合，供容器编解码器处理元素类型时使用。
pub fn resolve_dynamic(ty: &str, nesting: Nesting) -> Result<(CodecKind, bool)> {
    let kind = resolve(ty)?;
    Ok((kind, is_dynamic(kind, ty, nesting)?))
}
