//! 编解码上下文。
//!
//! 容器类型（数组、元组）在编解码时会递归回到引擎；上下文负责把生效中的 [`CodecConfig`] 与当前嵌套深度
//! 带入每一层递归，并在越过深度上限时立即失败。上下文是 `Copy` 的轻量值，不持有任何缓冲。
//!
//! # 两类递归
//! - 值递归：引擎沿着容器的元素列表下探，深度由 [`EncodeContext`]/[`DecodeContext`] 携带；
//! - 类型递归：动态性判定与静态宽度计算只看类型字符串，例如 `uint256[][]…[]`，深度由 [`Nesting`]
//!   携带。两者共用 `max_depth`，因此类型字符串再深也只会得到 [`AbiError::DepthExceeded`]。
//!
//! # 解码预算
//! 不可信缓冲可以让多个偏移量指向同一段编码，使解码结果远大于输入。[`DecodeBudget`] 在单次解包调用内
//! 累计已解码的元素数，上限为 `缓冲字数 × (max_depth + 1)`：规范编码中每个字在每一层最多充当一个元素的
//! 头部，因此合法输入永远不会触顶。

use std::cell::Cell;

use crate::config::{CodecConfig, DEFAULT_MAX_DEPTH};
use crate::error::{AbiError, Result};
use crate::word::WORD_SIZE;

/// 类型字符串递归所处的层级及其上限。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nesting {
    depth: usize,
    limit: usize,
}

impl Nesting {
    /// 以第 0 层创建，最多允许下探 `limit` 层。
    pub const fn new(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    /// 当前层级。
    pub const fn depth(self) -> usize {
        self.depth
    }

    /// 层级上限。
    pub const fn limit(self) -> usize {
        self.limit
    }

    /// 进入下一层；超过上限时返回 [`AbiError::DepthExceeded`]。
    pub fn nested(self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.limit {
            return Err(AbiError::DepthExceeded { limit: self.limit });
        }
        Ok(Self { depth, ..self })
    }
}

impl Default for Nesting {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// 编码上下文。
#[derive(Clone, Copy, Debug)]
pub struct EncodeContext<'a> {
    config: &'a CodecConfig,
    nesting: Nesting,
}

impl<'a> EncodeContext<'a> {
    /// 以顶层深度创建上下文。
    pub fn new(config: &'a CodecConfig) -> Self {
        Self {
            config,
            nesting: Nesting::new(config.max_depth),
        }
    }

    /// 当前生效的配置。
    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// 当前嵌套深度。
    pub fn depth(&self) -> usize {
        self.nesting.depth()
    }

    /// 以当前深度为起点的类型递归层级。
    pub fn nesting(&self) -> Nesting {
        self.nesting
    }

    /// 进入下一层容器；超过 `max_depth` 时返回 [`AbiError::DepthExceeded`]。
    pub fn nested(&self) -> Result<Self> {
        Ok(Self {
            nesting: self.nesting.nested()?,
            ..*self
        })
    }

    /// 待编码的 `T[]` 元素数同样受 `max_sequence_len` 约束，保证同一配置能解回自己的输出。
    pub fn check_sequence_len(&self, len: usize) -> Result<()> {
        check_sequence_len(self.config(), len)
    }
}

/// 单次解包调用内累计解码元素数的预算。
///
/// 由调用入口按缓冲长度创建，经 [`DecodeContext`] 以共享引用传入每一层递归。
#[derive(Debug)]
pub struct DecodeBudget {
    used: Cell<usize>,
    limit: usize,
}

impl DecodeBudget {
    /// 以 `limit` 个元素为上限。
    pub fn new(limit: usize) -> Self {
        Self {
            used: Cell::new(0),
            limit,
        }
    }

    /// 按缓冲长度推导上限：`buffer_len / 32 × (max_depth + 1)`。
    pub fn for_buffer(config: &CodecConfig, buffer_len: usize) -> Self {
        let levels = config.max_depth.saturating_add(1);
        Self::new((buffer_len / WORD_SIZE).saturating_mul(levels))
    }

    /// 已记账的元素数。
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// 元素数上限。
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 记账 `count` 个元素；累计值越过上限时返回 [`AbiError::BudgetExceeded`] 且不记账。
    pub fn charge(&self, count: usize) -> Result<()> {
        let len = self.used.get().saturating_add(count);
        if len > self.limit {
            return Err(AbiError::BudgetExceeded {
                len,
                limit: self.limit,
            });
        }
        self.used.set(len);
        Ok(())
    }
}

/// 解码上下文。
#[derive(Clone, Copy, Debug)]
pub struct DecodeContext<'a> {
    config: &'a CodecConfig,
    budget: &'a DecodeBudget,
    nesting: Nesting,
}

impl<'a> DecodeContext<'a> {
    /// 以顶层深度创建上下文，所有层级共用同一份 `budget`。
    pub fn new(config: &'a CodecConfig, budget: &'a DecodeBudget) -> Self {
        Self {
            config,
            budget,
            nesting: Nesting::new(config.max_depth),
        }
    }

    /// 当前生效的配置。
    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// 本次调用的累计元素预算。
    pub fn budget(&self) -> &'a DecodeBudget {
        self.budget
    }

    /// 当前嵌套深度。
    pub fn depth(&self) -> usize {
        self.nesting.depth()
    }

    /// 以当前深度为起点的类型递归层级。
    pub fn nesting(&self) -> Nesting {
        self.nesting
    }

    /// 进入下一层容器；超过 `max_depth` 时返回 [`AbiError::DepthExceeded`]。
    pub fn nested(&self) -> Result<Self> {
        Ok(Self {
            nesting: self.nesting.nested()?,
            ..*self
        })
    }

    /// 检查解码出的序列长度是否在预算之内。
    pub fn check_sequence_len(&self, len: usize) -> Result<()> {
        check_sequence_len(self.config(), len)
    }
}

fn check_sequence_len(config: &CodecConfig, len: usize) -> Result<()> {
    let limit = config.max_sequence_len;
    if len > limit {
        return Err(AbiError::BudgetExceeded { len, limit });
    }
    Ok(())
}
