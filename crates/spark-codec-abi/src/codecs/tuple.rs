//! 元组编解码：`(T1,…,Tn)`。
//!
//! 元组就是一个内嵌的元素列表：成员全部静态时整体内联在外层静态区，任一成员动态时整体搬到动态区，
//! 其内部再按同样的两区规则打包。

use bytes::BytesMut;

use crate::context::{DecodeContext, EncodeContext, Nesting};
use crate::engine::{pack_into, unpack_with};
use crate::error::{AbiError, Result};
use crate::registry::{resolve, resolve_dynamic};
use crate::value::AbiValue;

/// 按顶层逗号切分成员类型；括号不配对或存在空成员时返回 `None`。
fn members(ty: &str) -> Option<Vec<&str>> {
    let inner = ty.strip_prefix('(')?.strip_suffix(')')?;
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                members.push(inner[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    members.push(inner[start..].trim());
    if members.iter().any(|member| member.is_empty()) {
        return None;
    }
    Some(members)
}

fn split(ty: &str) -> Result<Vec<&str>> {
    members(ty).ok_or_else(|| AbiError::unsupported(ty))
}

pub(super) fn is_type(ty: &str) -> bool {
    members(ty).is_some()
}

pub(super) fn is_dynamic(ty: &str, nesting: Nesting) -> Result<bool> {
    let members = split(ty)?;
    let nested = nesting.nested()?;
    let mut dynamic = false;
    for member in members {
        dynamic |= resolve_dynamic(member, nested)?.1;
    }
    Ok(dynamic)
}

pub(super) fn static_words(ty: &str, nesting: Nesting) -> Result<usize> {
    let nested = nesting.nested()?;
    split(ty)?
        .into_iter()
        .try_fold(0usize, |total, member| {
            let words = resolve(member)?.head_words(member, nested)?;
            total
                .checked_add(words)
                .ok_or_else(|| AbiError::unsupported(ty))
        })
}

pub(super) fn encode(
    buffer: &mut BytesMut,
    value: &AbiValue,
    ty: &str,
    ctx: &EncodeContext<'_>,
) -> Result<()> {
    let members = split(ty)?;
    let AbiValue::Tuple(items) = value else {
        return Err(AbiError::mismatch(ty, "a tuple"));
    };
    pack_into(&members, items, buffer, &ctx.nested()?)
}

pub(super) fn decode(window: &[u8], ty: &str, ctx: &DecodeContext<'_>) -> Result<AbiValue> {
    let members = split(ty)?;
    let nested = ctx.nested()?;
    ctx.budget().charge(members.len())?;
    unpack_with(&members, window, &nested).map(AbiValue::Tuple)
}
