#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spark_codec_abi::{AbiValue, Address, WORD_SIZE, pack, unpack};

/// 可由 Fuzzer 直接构造的标量值。
#[derive(Debug, Arbitrary)]
enum Scalar {
    Bool(bool),
    Uint(u128),
    Int(i64),
    Address([u8; 20]),
    Bytes(Vec<u8>),
    Text(String),
}

impl Scalar {
    fn typed(self) -> (&'static str, AbiValue) {
        match self {
            Scalar::Bool(flag) => ("bool", AbiValue::Bool(flag)),
            Scalar::Uint(n) => ("uint256", AbiValue::uint(n)),
            Scalar::Int(n) => ("int64", AbiValue::int(n.into())),
            Scalar::Address(raw) => ("address", AbiValue::Address(Address::new(raw))),
            Scalar::Bytes(raw) => ("bytes", AbiValue::Bytes(raw)),
            Scalar::Text(text) => ("string", AbiValue::String(text)),
        }
    }
}

/// Fuzz 输入：一组标量，外加一份重复若干次的字符串数组与任意前缀。
#[derive(Debug, Arbitrary)]
struct PackCase {
    scalars: Vec<Scalar>,
    texts: Vec<String>,
    prefix: Vec<u8>,
}

fuzz_target!(|case: PackCase| {
    let (mut types, mut values): (Vec<&str>, Vec<AbiValue>) =
        case.scalars.into_iter().map(Scalar::typed).unzip();
    types.push("string[]");
    values.push(AbiValue::Array(
        case.texts.into_iter().map(AbiValue::String).collect(),
    ));

    let encoded = pack(&types, &values, &case.prefix).expect("well-typed values must encode");
    let body = &encoded[case.prefix.len()..];
    assert_eq!(&encoded[..case.prefix.len()], case.prefix.as_slice());
    assert_eq!(body.len() % WORD_SIZE, 0);
    assert_eq!(unpack(&types, body).expect("own output must decode"), values);
});
