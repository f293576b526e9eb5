//! 编解码资源限额配置。
//!
//! # 设计背景（Why）
//! - 引擎本身是纯函数，但解码的输入可能来自不可信方：恶意构造的长度字或深度嵌套的类型会导致巨额分配或
//!   过深递归，因此需要可配置的上限；
//! - 配置以 TOML 表达，便于宿主与其它组件配置放在同一文件中。
//!
//! # 契约说明（What）
//! - 未出现的字段取默认值，未知字段视为错误；
//! - [`CodecConfig::validate`] 拒绝 `max_depth == 0` 与 `max_sequence_len == 0` 等无法工作的取值。

use serde::{Deserialize, Serialize};

use crate::error::{AbiError, Result};

/// 默认嵌套深度上限。
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// 默认单个动态数组的元素数上限。
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 1 << 20;

/// 编解码限额。
///
/// ```rust
/// use spark_codec_abi::CodecConfig;
///
/// let config = CodecConfig::from_toml_str("max_depth = 4").expect("valid config");
/// assert_eq!(config.max_depth, 4);
/// assert_eq!(config.max_encoded_len, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// 数组/元组最大嵌套层数；顶层元素列表为第 0 层。
    pub max_depth: usize,
    /// 解码时单个 `T[]` 允许声明的最大元素数。
    pub max_sequence_len: usize,
    /// 编码结果（不含前缀）的最大字节数，`None` 表示不限。
    pub max_encoded_len: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            max_encoded_len: None,
        }
    }
}

impl CodecConfig {
    /// 从 TOML 文本解析并校验配置。
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CodecConfig =
            toml::from_str(text).map_err(|err| AbiError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验取值是否可用。
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(AbiError::Config("max_depth must be at least 1".to_owned()));
        }
        if self.max_sequence_len == 0 {
            return Err(AbiError::Config(
                "max_sequence_len must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
