//! 打包/解包引擎入口。
//!
//! # 教案式说明
//! - **意图 (Why)**：把“哪个元素内联、哪个元素搬到尾部并留下指针”的决策集中在一处，具体类型的字节布局
//!   全部委托给 [`crate::codecs`]；
//! - **契约 (What)**：[`pack`]/[`unpack`] 使用默认配置；[`AbiCodec`] 携带自定义 [`CodecConfig`]；
//!   两者都是纯计算，状态只存活于单次调用之内，可在多线程间并发调用；
//! - **执行 (How)**：打包采用两区构建加延迟指针回填，解包采用显式游标；细节分别见 `pack`、`unpack` 子模块。

mod pack;
mod unpack;

pub(crate) use pack::pack_into;
pub(crate) use unpack::unpack_with;

use bytes::{Bytes, BytesMut};

use crate::config::CodecConfig;
use crate::context::{DecodeBudget, DecodeContext, EncodeContext};
use crate::error::{AbiError, Result};
use crate::value::AbiValue;
use crate::word::WORD_SIZE;

/// 携带配置的编解码入口。
///
/// ```rust
/// use spark_codec_abi::{AbiCodec, AbiValue, CodecConfig};
///
/// let codec = AbiCodec::new(CodecConfig::default()).expect("valid config");
/// let types = ["uint256", "string"];
/// let values = [AbiValue::uint(42), AbiValue::from("spark")];
///
/// let encoded = codec.pack(&types, &values, &[]).expect("packs");
/// assert_eq!(encoded.len() % 32, 0);
/// assert_eq!(codec.unpack(&types, &encoded).expect("unpacks"), values);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbiCodec {
    config: CodecConfig,
}

impl AbiCodec {
    /// 以校验过的配置创建编解码入口。
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 当前配置。
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// 按 `types` 打包 `values`，结果拼接在 `prefix` 之后。
    ///
    /// # 契约说明（What）
    /// - **前置条件**：`types.len() == values.len()`，否则在产生任何字节前返回 `LengthMismatch`；
    /// - **后置条件**：`prefix` 原样保留在结果开头；其后的部分长度为 32 的整数倍，且与无前缀时的结果逐字节相同；
    /// - **预算**：配置了 `max_encoded_len` 时，超出预算的结果（不含前缀）返回 `BudgetExceeded`。
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(elements = types.len(), prefix_len = prefix.len())
    )]
    pub fn pack<S: AsRef<str>>(
        &self,
        types: &[S],
        values: &[AbiValue],
        prefix: &[u8],
    ) -> Result<Bytes> {
        let mut out = BytesMut::with_capacity(prefix.len() + types.len() * WORD_SIZE);
        out.extend_from_slice(prefix);
        pack_into(types, values, &mut out, &EncodeContext::new(&self.config))?;

        let encoded = out.len() - prefix.len();
        if let Some(limit) = self.config.max_encoded_len
            && encoded > limit
        {
            return Err(AbiError::BudgetExceeded {
                len: encoded,
                limit,
            });
        }
        Ok(out.freeze())
    }

    /// 按 `types` 从 `buffer` 解出值列表，顺序与类型一一对应。
    ///
    /// 容器内累计解出的元素数以 `buffer.len() / 32 × (max_depth + 1)` 为上限，超出返回
    /// `BudgetExceeded`；规范编码不会触及该上限。
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(elements = types.len(), buffer_len = buffer.len())
    )]
    pub fn unpack<S: AsRef<str>>(&self, types: &[S], buffer: &[u8]) -> Result<Vec<AbiValue>> {
        let budget = DecodeBudget::for_buffer(&self.config, buffer.len());
        unpack_with(types, buffer, &DecodeContext::new(&self.config, &budget))
    }
}

/// 使用默认配置打包。
pub fn pack<S: AsRef<str>>(types: &[S], values: &[AbiValue], prefix: &[u8]) -> Result<Bytes> {
    AbiCodec::default().pack(types, values, prefix)
}

/// 使用默认配置解包。
pub fn unpack<S: AsRef<str>>(types: &[S], buffer: &[u8]) -> Result<Vec<AbiValue>> {
    AbiCodec::default().unpack(types, buffer)
}
