//! `spark-codec-abi` 提供合约 ABI 的 32 字节字编解码：一个静态/动态两区打包引擎，加上一组按类型名注册的编解码器。
//!
//! # 教案背景（Why）
//! - 合约调用参数需要被编码为定宽字序列：定长值内联在“静态区”，变长值搬到尾部“动态区”并在原位置留下指向它的偏移量；
//! - 引擎只负责这套两区规则与指针回填，具体类型的字节布局由 [`codecs`] 中的各编解码器负责，二者通过
//!   [`registry::CodecKind`] 上的统一约定衔接。
//!
//! # 使用概览（How）
//! - 直接调用 [`pack`]/[`unpack`] 使用默认配置；
//! - 需要收紧资源上限时，用 [`CodecConfig`]（可从 TOML 读取）构造 [`AbiCodec`]；
//! - 编码结果为 [`bytes::Bytes`]，调用方传入的前缀（如函数选择器）原样保留在开头且不参与偏移量计算。
//!
//! # 合约说明（What）
//! - 所有错误均为 [`AbiError`]，并通过 [`AbiError::code`] 暴露稳定错误码；
//! - 打包与解包都是纯计算，不持有跨调用状态，可在任意线程并发使用；
//! - 诊断信息经由 `tracing` 输出：单次调用一个 `debug` span，逐元素的指针决策为 `trace` 事件。
//!
//! # 风险提示与后续（Trade-offs）
//! - 种类集合是封闭枚举，新增类型需要修改 [`registry`]；换来的是解析顺序固定、无全局可变状态；
//! - 解码只借用输入缓冲，字节型值在返回前复制为自有数据。
//!
//! ```rust
//! use spark_codec_abi::{AbiValue, pack, unpack};
//!
//! let types = ["string[]"];
//! let values = [AbiValue::Array(vec!["foo".into(), "bar".into()])];
//! let encoded = pack(&types, &values, &[]).expect("packs");
//! assert_eq!(unpack(&types, &encoded).expect("unpacks"), values);
//! ```

pub mod codecs;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod registry;
pub mod value;
pub mod word;

pub use crate::config::CodecConfig;
pub use crate::context::{DecodeBudget, DecodeContext, EncodeContext, Nesting};
pub use crate::engine::{AbiCodec, pack, unpack};
pub use crate::error::{AbiError, Result};
pub use crate::registry::CodecKind;
pub use crate::value::{AbiValue, Address, FunctionRef};
pub use crate::word::WORD_SIZE;
