//! 解包引擎：显式游标遍历静态区，动态元素跟随绝对偏移。

use crate::context::DecodeContext;
use crate::error::{AbiError, Result};
use crate::registry;
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, read_word, tail, window, word_to_usize};

/// 按类型列表从 `buffer` 解出等长的值列表。
///
/// # 契约说明（What）
/// - 游标每步先读取一个完整字，读不到即返回 `OutOfRange`，随后才解析类型；
/// - 静态元素：编解码器拿到游标处 `static_words × 32` 字节的窗口，游标前进同样宽度；
/// - 动态元素：游标处的字是偏移量，编解码器拿到 `buffer[offset..]`，游标前进一个字；
/// - 编解码器的失败原样透传。
pub(crate) fn unpack_with<S: AsRef<str>>(
    types: &[S],
    buffer: &[u8],
    ctx: &DecodeContext<'_>,
) -> Result<Vec<AbiValue>> {
    let mut cursor = 0usize;
    let mut values = Vec::with_capacity(types.len());

    for (index, ty) in types.iter().enumerate() {
        let ty = ty.as_ref();
        let head = read_word(buffer, cursor)?;
        let kind = registry::resolve(ty)?;

        if registry::is_dynamic(kind, ty, ctx.nesting())? {
            let offset = word_to_usize(head)?;
            tracing::trace!(index, ty, cursor, offset, "following dynamic offset");
            values.push(kind.decode(tail(buffer, offset)?, ty, ctx)?);
            cursor += WORD_SIZE;
        } else {
            let width = kind
                .static_words(ty, ctx.nesting())?
                .checked_mul(WORD_SIZE)
                .ok_or(AbiError::OffsetOverflow)?;
            values.push(kind.decode(window(buffer, cursor, width)?, ty, ctx)?);
            cursor += width;
        }
    }

    tracing::debug!(
        depth = ctx.depth(),
        elements = types.len(),
        consumed = cursor,
        available = buffer.len(),
        "unpacked element list"
    );
    Ok(values)
}
