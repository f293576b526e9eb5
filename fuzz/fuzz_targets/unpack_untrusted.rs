#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spark_codec_abi::{AbiCodec, CodecConfig};

/// 候选类型表：覆盖标量、变长值与多层容器。
const TYPES: &[&str] = &[
    "uint256",
    "int8",
    "bool",
    "address",
    "bytes4",
    "function",
    "bytes",
    "string",
    "uint256[]",
    "string[]",
    "bytes32[3]",
    "string[2]",
    "(uint64,bytes)",
    "(uint64,bytes)[]",
    "(bool,(string,uint8[])[])",
    "uint256[][]",
];

/// Fuzz 输入：按索引挑选类型列表，再以任意字节作为待解码缓冲。
///
/// - **Why**：解码输入来自不可信方，偏移量与长度字可以指向任意位置；
/// - **What**：任何输入都只能得到 `Ok` 或 `Err`，不得 panic，不得按声明长度做巨额分配，也不得借重叠的
///   偏移量把输出放大到远超输入的规模。
#[derive(Debug, Arbitrary)]
struct UnpackCase {
    selectors: Vec<u8>,
    buffer: Vec<u8>,
}

fuzz_target!(|case: UnpackCase| {
    let types: Vec<&str> = case
        .selectors
        .iter()
        .take(8)
        .map(|index| TYPES[usize::from(*index) % TYPES.len()])
        .collect();

    let config = CodecConfig {
        max_sequence_len: 4_096,
        ..CodecConfig::default()
    };
    let Ok(codec) = AbiCodec::new(config) else {
        return;
    };

    if let Ok(values) = codec.unpack(&types, &case.buffer) {
        // 解码成功的值必须能够重新打包，且再次解码得到同一组值。
        let encoded = codec
            .pack(&types, &values, &[])
            .expect("decoded values must re-encode");
        let decoded = codec
            .unpack(&types, &encoded)
            .expect("canonical encoding must decode");
        assert_eq!(decoded, values);
    }
});
