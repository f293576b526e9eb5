//! ABI 值模型。
//!
//! [`AbiValue`] 是引擎与各类型编解码器之间交换的唯一数据形态：编码时由调用方构造，解码时由编解码器
//! 产出。整数以完整的 32 字节字保存，既能覆盖 `uint256`/`int256` 全值域，又无需引入大整数依赖。

use core::fmt;
use core::str::FromStr;

use crate::error::{AbiError, Result};
use crate::word::{WORD_SIZE, Word, word_from_i128, word_from_u128};

/// 地址字节长度。
pub const ADDRESS_LEN: usize = 20;

/// 函数选择器字节长度。
pub const SELECTOR_LEN: usize = 4;

/// 20 字节合约/账户地址。
///
/// 解析时接受带或不带 `0x` 前缀、任意大小写的十六进制；显示时统一输出小写，这也是地址往返时唯一的
/// 规范化差异。
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// 由原始字节构造。
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// 返回原始字节。
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AbiError;

    fn from_str(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|err| AbiError::invalid_encoding("address", err.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// `function` 类型的值：目标合约地址加 4 字节函数选择器。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    /// 目标合约地址。
    pub address: Address,
    /// 函数选择器。
    pub selector: [u8; SELECTOR_LEN],
}

impl FunctionRef {
    /// 构造函数引用。
    pub const fn new(address: Address, selector: [u8; SELECTOR_LEN]) -> Self {
        Self { address, selector }
    }
}

/// 一个可被 ABI 编解码的值。
///
/// # 契约说明（What）
/// - 每个变体只被对应种类的编解码器接受，变体与类型不符时编码返回 [`AbiError::TypeMismatch`]；
/// - `Uint`/`Int` 保存完整的大端字，`Int` 为符号扩展后的二进制补码；宽度校验由 `number` 编解码器完成；
/// - `FixedBytes` 的长度不超过类型宽度，解码结果长度恰为类型宽度。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AbiValue {
    /// `bool`。
    Bool(bool),
    /// `uintN`，大端字。
    Uint(Word),
    /// `intN`，二进制补码字。
    Int(Word),
    /// `address`。
    Address(Address),
    /// `bytes`。
    Bytes(Vec<u8>),
    /// `bytesN`。
    FixedBytes(Vec<u8>),
    /// `string`。
    String(String),
    /// `T[]` 或 `T[N]`。
    Array(Vec<AbiValue>),
    /// `(T1,…,Tn)`。
    Tuple(Vec<AbiValue>),
    /// `function`。
    Function(FunctionRef),
}

impl AbiValue {
    /// 由 `u128` 构造无符号整数值。
    pub fn uint(value: u128) -> Self {
        AbiValue::Uint(word_from_u128(value))
    }

    /// 由 `i128` 构造有符号整数值。
    pub fn int(value: i128) -> Self {
        AbiValue::Int(word_from_i128(value))
    }

    /// 若为 `Uint` 且数值可放入 `u128`，返回该数值。
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            AbiValue::Uint(word) if word[..16].iter().all(|byte| *byte == 0) => {
                Some(u128::from_be_bytes(low_half(word)))
            }
            _ => None,
        }
    }

    /// 若为 `Int` 且数值可放入 `i128`，返回该数值。
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            AbiValue::Int(word) => {
                let low = i128::from_be_bytes(low_half(word));
                let fill = if low < 0 { 0xff } else { 0x00 };
                word[..16]
                    .iter()
                    .all(|byte| *byte == fill)
                    .then_some(low)
            }
            _ => None,
        }
    }

    /// 若为 `String`，返回字符串切片。
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// 返回变体的简短名称，用于诊断。
    pub fn kind_name(&self) -> &'static str {
        match self {
            AbiValue::Bool(_) => "bool",
            AbiValue::Uint(_) => "uint",
            AbiValue::Int(_) => "int",
            AbiValue::Address(_) => "address",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::String(_) => "string",
            AbiValue::Array(_) => "array",
            AbiValue::Tuple(_) => "tuple",
            AbiValue::Function(_) => "function",
        }
    }
}

fn low_half(word: &Word) -> [u8; 16] {
    let mut raw = [0u8; 16];
    raw.copy_from_slice(&word[WORD_SIZE - 16..]);
    raw
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

impl From<u64> for AbiValue {
    fn from(value: u64) -> Self {
        AbiValue::uint(value.into())
    }
}

impl From<i64> for AbiValue {
    fn from(value: i64) -> Self {
        AbiValue::int(value.into())
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_owned())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        AbiValue::Address(value)
    }
}

impl From<FunctionRef> for AbiValue {
    fn from(value: FunctionRef) -> Self {
        AbiValue::Function(value)
    }
}

impl From<Vec<u8>> for AbiValue {
    fn from(value: Vec<u8>) -> Self {
        AbiValue::Bytes(value)
    }
}
