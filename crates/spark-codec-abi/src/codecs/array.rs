//! 数组编解码：`T[]` 与 `T[N]`。
//!
//! # 布局（What）
//! - `T[]`：元素个数字，随后是把 `n` 个 `T` 作为元素列表打包的结果；恒为动态；
//! - `T[N]`：直接打包 `N` 个 `T`，无长度字；仅当 `T` 为动态时才是动态元素，否则内联占 `N × width(T)` 字。
//!
//! 元素列表通过引擎递归打包，因此元素的偏移量相对于列表起点（即长度字之后）。对于 `["foo","bar","baz"]`
//! 这样的 `string[]`，三个偏移量依次为 `0x60`、`0xa0`、`0xe0`。
//!
//! 多维数组的最外层维度是最后一个后缀：`uint256[2][]` 是元素为 `uint256[2]` 的变长数组。

use bytes::BytesMut;

use super::parse_decimal;
use crate::context::{DecodeContext, EncodeContext, Nesting};
use crate::engine::{pack_into, unpack_with};
use crate::error::{AbiError, Result};
use crate::registry::{resolve, resolve_dynamic};
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, put_usize, read_word, tail, word_to_usize};

/// 拆分数组类型：返回（元素类型，定长）。变长数组的定长为 `None`。
fn parse(ty: &str) -> Option<(&str, Option<usize>)> {
    let inner = ty.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let (element, size) = (&inner[..open], &inner[open + 1..]);
    if element.is_empty() {
        return None;
    }
    if size.is_empty() {
        return Some((element, None));
    }
    Some((element, Some(parse_decimal(size)?)))
}

fn split(ty: &str) -> Result<(&str, Option<usize>)> {
    parse(ty).ok_or_else(|| AbiError::unsupported(ty))
}

pub(super) fn is_type(ty: &str) -> bool {
    parse(ty).is_some()
}

pub(super) fn is_dynamic(ty: &str, nesting: Nesting) -> Result<bool> {
    let (element, size) = split(ty)?;
    let (_, element_dynamic) = resolve_dynamic(element, nesting.nested()?)?;
    Ok(size.is_none() || element_dynamic)
}

pub(super) fn static_words(ty: &str, nesting: Nesting) -> Result<usize> {
    let (element, size) = split(ty)?;
    let size = size.ok_or_else(|| AbiError::unsupported(ty))?;
    let nested = nesting.nested()?;
    let element_words = resolve(element)?.head_words(element, nested)?;
    size.checked_mul(element_words)
        .ok_or_else(|| AbiError::unsupported(ty))
}

pub(super) fn encode(
    buffer: &mut BytesMut,
    value: &AbiValue,
    ty: &str,
    ctx: &EncodeContext<'_>,
) -> Result<()> {
    let (element, size) = split(ty)?;
    let AbiValue::Array(items) = value else {
        return Err(AbiError::mismatch(ty, "an array"));
    };
    let nested = ctx.nested()?;

    match size {
        Some(size) if size != items.len() => {
            return Err(AbiError::LengthMismatch {
                types: size,
                values: items.len(),
            });
        }
        Some(_) => {}
        None => {
            ctx.check_sequence_len(items.len())?;
            put_usize(buffer, items.len());
        }
    }
    pack_into(&vec![element; items.len()], items, buffer, &nested)
}

pub(super) fn decode(window: &[u8], ty: &str, ctx: &DecodeContext<'_>) -> Result<AbiValue> {
    let (element, size) = split(ty)?;
    let nested = ctx.nested()?;

    let (len, body) = match size {
        Some(size) => (size, window),
        None => {
            let len = word_to_usize(read_word(window, 0)?)?;
            ctx.check_sequence_len(len)?;
            (len, tail(window, WORD_SIZE)?)
        }
    };

    // 每个元素至少占一个头部字；先按窗口大小校验声明的长度，再分配类型列表。
    let element_words = resolve(element)?.head_words(element, nested.nesting())?;
    let needed = element_words
        .checked_mul(WORD_SIZE)
        .and_then(|width| width.checked_mul(len))
        .ok_or(AbiError::OffsetOverflow)?;
    if needed > body.len() {
        return Err(AbiError::OutOfRange {
            offset: window.len() - body.len(),
            needed,
            available: window.len(),
        });
    }

    // 偏移量可以互相重叠，窗口校验挡不住重复解码同一段编码。
    ctx.budget().charge(len)?;
    let types = vec![element; len];
    unpack_with(&types, body, &nested).map(AbiValue::Array)
}
