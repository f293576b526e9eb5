//! 打包引擎：两区构建与延迟指针回填。
//!
//! # 行为逻辑（How）
//! 1. 单次从左到右遍历 `(type, value)`，为每个元素解析编解码器并判定动态性；
//! 2. 静态元素直接追加到静态区；
//! 3. 动态元素先记录当前静态区长度与动态区长度，向静态区写入一个全零占位字，再把真实编码追加到动态区，
//!    最后登记一条 [`PendingPatch`]；
//! 4. 遍历结束后静态区长度已固定，按登记顺序把每个占位字改写为 `静态区最终长度 + 动态区内偏移`；
//! 5. 依次输出回填后的静态区与动态区。
//!
//! # 契约说明（What）
//! - 指针是相对于本元素列表起点的绝对字节偏移，不计入输出缓冲中已有的字节（前缀或外层长度字）；
//! - 每条回填只依赖静态区的最终长度，与其它回填互不影响；按登记顺序执行保证输出可复现。

use bytes::{BufMut, BytesMut};

use crate::context::EncodeContext;
use crate::error::{AbiError, Result};
use crate::registry;
use crate::value::AbiValue;
use crate::word::{WORD_SIZE, ZERO_WORD, word_from_usize};

/// 一条待回填的指针记录。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingPatch {
    /// 占位字在静态区内的字节位置。
    static_offset: usize,
    /// 元素真实编码在动态区内的起始位置。
    dynamic_offset: usize,
}

/// 单次打包调用内的临时状态，调用结束即丢弃。
#[derive(Debug, Default)]
struct PackState {
    static_region: BytesMut,
    dynamic_region: BytesMut,
    patches: Vec<PendingPatch>,
}

impl PackState {
    fn with_capacity(elements: usize) -> Self {
        Self {
            static_region: BytesMut::with_capacity(elements * WORD_SIZE),
            dynamic_region: BytesMut::new(),
            patches: Vec::new(),
        }
    }

    /// 预留占位字并登记回填记录。
    fn reserve_pointer(&mut self) -> PendingPatch {
        let patch = PendingPatch {
            static_offset: self.static_region.len(),
            dynamic_offset: self.dynamic_region.len(),
        };
        self.static_region.put_slice(&ZERO_WORD);
        patch
    }

    /// 按登记顺序回填全部指针。
    fn apply_patches(&mut self) {
        let static_len = self.static_region.len();
        for patch in &self.patches {
            let pointer = word_from_usize(static_len + patch.dynamic_offset);
            self.static_region[patch.static_offset..patch.static_offset + WORD_SIZE]
                .copy_from_slice(&pointer);
        }
    }
}

/// 把元素列表打包并追加到 `out` 末尾。
///
/// 容器编解码器也经由此函数递归打包其元素列表，因此 `out` 中已有的字节（前缀、数组长度字）不参与
/// 指针计算。
pub(crate) fn pack_into<S: AsRef<str>>(
    types: &[S],
    values: &[AbiValue],
    out: &mut BytesMut,
    ctx: &EncodeContext<'_>,
) -> Result<()> {
    if types.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            types: types.len(),
            values: values.len(),
        });
    }

    let mut state = PackState::with_capacity(types.len());
    for (index, (ty, value)) in types.iter().zip(values).enumerate() {
        let ty = ty.as_ref();
        let kind = registry::resolve(ty)?;

        if !registry::is_dynamic(kind, ty, ctx.nesting())? {
            kind.encode(&mut state.static_region, value, ty, ctx)?;
            continue;
        }

        let patch = state.reserve_pointer();
        kind.encode(&mut state.dynamic_region, value, ty, ctx)?;
        tracing::trace!(
            index,
            ty,
            value = value.kind_name(),
            static_offset = patch.static_offset,
            dynamic_offset = patch.dynamic_offset,
            "relocating dynamic element"
        );
        state.patches.push(patch);
    }

    state.apply_patches();
    tracing::debug!(
        depth = ctx.depth(),
        elements = types.len(),
        static_len = state.static_region.len(),
        dynamic_len = state.dynamic_region.len(),
        patches = state.patches.len(),
        "packed element list"
    );

    out.reserve(state.static_region.len() + state.dynamic_region.len());
    out.put_slice(&state.static_region);
    out.put_slice(&state.dynamic_region);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use tracing_test::traced_test;

    fn pack_list(types: &[&str], values: &[AbiValue]) -> Result<BytesMut> {
        let config = CodecConfig::default();
        let mut out = BytesMut::new();
        pack_into(types, values, &mut out, &EncodeContext::new(&config))?;
        Ok(out)
    }

    #[test]
    fn patches_point_past_the_final_static_region() {
        let mut state = PackState::default();
        state.static_region.put_slice(&ZERO_WORD);
        let first = state.reserve_pointer();
        state.dynamic_region.put_slice(&[0u8; 64]);
        state.patches.push(first);
        let second = state.reserve_pointer();
        state.patches.push(second);

        state.apply_patches();
        assert_eq!(first.static_offset, WORD_SIZE);
        assert_eq!(state.static_region[2 * WORD_SIZE - 1], 0x60);
        assert_eq!(state.static_region[3 * WORD_SIZE - 1], 0x60 + 64);
    }

    #[test]
    fn static_then_dynamic_layout() {
        let out = pack_list(
            &["uint256", "string", "bool"],
            &[AbiValue::uint(5), AbiValue::from("abc"), AbiValue::Bool(true)],
        )
        .expect("packs");
        assert_eq!(
            hex::encode(&out),
            concat!(
                "0000000000000000000000000000000000000000000000000000000000000005",
                "0000000000000000000000000000000000000000000000000000000000000060",
                "0000000000000000000000000000000000000000000000000000000000000001",
                "0000000000000000000000000000000000000000000000000000000000000003",
                "6162630000000000000000000000000000000000000000000000000000000000",
            )
        );
    }

    #[test]
    fn existing_output_bytes_do_not_shift_pointers() {
        let config = CodecConfig::default();
        let mut out = BytesMut::from(&[0xaa; 4][..]);
        pack_into(
            &["bytes"],
            &[AbiValue::Bytes(vec![1])],
            &mut out,
            &EncodeContext::new(&config),
        )
        .expect("packs");
        assert_eq!(&out[..4], &[0xaa; 4]);
        assert_eq!(out[4 + WORD_SIZE - 1], 0x20);
    }

    #[test]
    fn length_mismatch_fails_before_any_output() {
        let config = CodecConfig::default();
        let mut out = BytesMut::new();
        let err = pack_into(&["uint256"], &[], &mut out, &EncodeContext::new(&config))
            .unwrap_err();
        assert_eq!(err, AbiError::LengthMismatch { types: 1, values: 0 });
        assert!(out.is_empty());
    }

    #[test]
    fn codec_failures_pass_through_unchanged() {
        assert_eq!(
            pack_list(&["bool"], &[AbiValue::from("yes")]).unwrap_err(),
            AbiError::mismatch("bool", "a boolean")
        );
        assert_eq!(
            pack_list(&["madeup"], &[AbiValue::Bool(true)]).unwrap_err(),
            AbiError::unsupported("madeup")
        );
    }

    #[test]
    fn overly_deep_element_types_fail_before_encoding() {
        let deep = format!("uint256{}", "[]".repeat(10_000));
        let mut out = BytesMut::new();
        let config = CodecConfig::default();
        assert_eq!(
            pack_into(
                &[deep.as_str()],
                &[AbiValue::Array(vec![])],
                &mut out,
                &EncodeContext::new(&config)
            ),
            Err(AbiError::DepthExceeded { limit: 32 })
        );
        assert!(out.is_empty());
    }

    #[traced_test]
    #[test]
    fn relocation_is_traced() {
        pack_list(&["string"], &[AbiValue::from("foo")]).expect("packs");
        assert!(logs_contain("relocating dynamic element"));
        assert!(logs_contain("value=\"string\""));
        assert!(logs_contain("packed element list"));
    }
}
