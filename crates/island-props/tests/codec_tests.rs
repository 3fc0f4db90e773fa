// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode/decode behaviour of the props codec across value kinds.

use chrono::{TimeZone, Utc};
use island_props::{
    decode, decode_serialized, serialize_props, serialize_value, CodecError, ComponentMetadata,
    HydrationMode, Pattern, PropValue, Record, Shared, TypeTag,
};
use num_bigint::BigInt;
use url::Url;

fn meta() -> ComponentMetadata {
    ComponentMetadata::new("Gallery").with_hydrate(HydrationMode::Visible)
}

fn roundtrip(props: &Shared<Record>) -> PropValue {
    let text = serialize_props(props, &meta()).expect("encode");
    decode(&text).expect("decode")
}

fn sample_props() -> Shared<Record> {
    let created = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let big: BigInt = "-98765432109876543210".parse().unwrap();

    let mut record = Record::new();
    record.insert("title".into(), "Hello".into());
    record.insert("count".into(), 3.into());
    record.insert("ratio".into(), PropValue::Number(0.25));
    record.insert("enabled".into(), true.into());
    record.insert("nothing".into(), PropValue::Null);
    record.insert("created".into(), created.into());
    record.insert("pattern".into(), Pattern::new(r"^\d{3}-\d{4}$").into());
    record.insert("big".into(), big.into());
    record.insert(
        "home".into(),
        Url::parse("https://example.com/path?q=1#frag").unwrap().into(),
    );
    record.insert("bytes".into(), PropValue::Uint8Array(vec![0, 127, 255]));
    record.insert("shorts".into(), PropValue::Uint16Array(vec![1, 65535]));
    record.insert("ints".into(), PropValue::Uint32Array(vec![7, u32::MAX]));
    record.insert(
        "tags".into(),
        PropValue::set(["a".into(), "b".into(), "c".into()]),
    );
    record.insert(
        "lookup".into(),
        PropValue::map([
            ("one".into(), 1.into()),
            (PropValue::from(2), PropValue::array(["two".into()])),
            (
                PropValue::object([("k", PropValue::from("v"))]),
                created.into(),
            ),
        ]),
    );
    record.insert(
        "items".into(),
        PropValue::array([
            PropValue::object([("id", PropValue::from(1))]),
            PropValue::array([PropValue::array([]), "deep".into()]),
            PropValue::set([PropValue::Uint8Array(vec![9])]),
        ]),
    );
    record.insert(
        "nested".into(),
        PropValue::object([(
            "inner",
            PropValue::object([("when", PropValue::from(created))]),
        )]),
    );
    Shared::new(record)
}

#[test]
fn test_full_roundtrip() {
    let props = sample_props();
    let decoded = roundtrip(&props);
    assert_eq!(decoded, PropValue::Object(props));
}

#[test]
fn test_roundtrip_preserves_key_order() {
    let props = sample_props();
    let decoded = roundtrip(&props);
    let keys: Vec<String> = decoded.as_object().unwrap().read().keys().cloned().collect();
    let expected: Vec<String> = props.read().keys().cloned().collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_set_and_map_compare_unordered() {
    let props = Shared::new(Record::new());
    props.write().insert(
        "s".into(),
        PropValue::set([3.into(), 1.into(), 2.into()]),
    );
    props.write().insert(
        "m".into(),
        PropValue::map([("b".into(), 2.into()), ("a".into(), 1.into())]),
    );
    let decoded = roundtrip(&props);
    assert_eq!(
        decoded.get_field("s"),
        Some(PropValue::set([1.into(), 2.into(), 3.into()]))
    );
    assert_eq!(
        decoded.get_field("m"),
        Some(PropValue::map([("a".into(), 1.into()), ("b".into(), 2.into())]))
    );
}

fn len_of(value: &PropValue) -> usize {
    match value {
        PropValue::Set(v) | PropValue::Array(v) => v.read().len(),
        PropValue::Map(m) => m.read().len(),
        other => panic!("Expected collection, got {:?}", other),
    }
}

#[test]
fn test_set_of_equal_records_keeps_every_member() {
    let text = r#"{"s":[5,"[[0,{\"a\":[0,1]}],[0,{\"a\":[0,1]}]]"]}"#;
    let decoded = decode(text).unwrap();
    assert_eq!(len_of(&decoded.get_field("s").unwrap()), 2);

    let props = decoded.as_object().unwrap().clone();
    assert_eq!(serialize_props(&props, &meta()).unwrap(), text);
}

#[test]
fn test_roundtrip_distinct_equal_composites() {
    let record = || PropValue::object([("a", PropValue::from(1))]);
    let props = Shared::new(Record::new());
    props.write().insert(
        "s".into(),
        PropValue::Set(Shared::new(vec![record(), record()])),
    );
    props.write().insert(
        "m".into(),
        PropValue::Map(Shared::new(vec![
            (record(), "x".into()),
            (record(), "y".into()),
        ])),
    );

    let decoded = roundtrip(&props);
    assert_eq!(len_of(&decoded.get_field("s").unwrap()), 2);
    assert_eq!(len_of(&decoded.get_field("m").unwrap()), 2);
    assert_eq!(decoded, PropValue::Object(props));
}

#[test]
fn test_roundtrip_repeated_set_elements() {
    // Repeats are accepted on the wire and kept as written.
    let text = r#"{"s":[5,"[[0,\"a\"],[0,\"a\"],[0,\"b\"]]"]}"#;
    let decoded = decode(text).unwrap();
    let set = decoded.get_field("s").unwrap();
    assert_eq!(len_of(&set), 3);
    assert_ne!(
        set,
        PropValue::Set(Shared::new(vec!["a".into(), "b".into(), "b".into()]))
    );
    let props = decoded.as_object().unwrap().clone();
    assert_eq!(serialize_props(&props, &meta()).unwrap(), text);
}

#[test]
fn test_pattern_flags_not_carried() {
    // Only the source survives; a case-insensitive group is part of the source.
    let props = Shared::new(Record::new());
    props
        .write()
        .insert("re".into(), Pattern::new("(?i)abc").into());
    let decoded = roundtrip(&props);
    let re = decoded.get_field("re").unwrap();
    match re {
        PropValue::RegExp(p) => {
            assert_eq!(p.source(), "(?i)abc");
            assert_eq!(p.is_match("ABC"), Some(true));
        }
        other => panic!("Expected RegExp, got {:?}", other),
    }
}

#[test]
fn test_undefined_decodes_as_null() {
    let props = Shared::new(Record::new());
    props.write().insert("u".into(), PropValue::Undefined);
    let decoded = roundtrip(&props);
    assert_eq!(decoded.get_field("u"), Some(PropValue::Null));
}

#[test]
fn test_tag_stability() {
    let m = meta();
    let cases: Vec<(PropValue, TypeTag)> = vec![
        ("s".into(), TypeTag::Value),
        (PropValue::array([]), TypeTag::Json),
        (Pattern::new("a").into(), TypeTag::RegExp),
        (Utc.timestamp_millis_opt(0).unwrap().into(), TypeTag::Date),
        (PropValue::map([]), TypeTag::Map),
        (PropValue::set([]), TypeTag::Set),
        (BigInt::from(5).into(), TypeTag::BigInt),
        (Url::parse("http://a.test/").unwrap().into(), TypeTag::Url),
        (PropValue::Uint8Array(vec![]), TypeTag::Uint8Array),
        (PropValue::Uint16Array(vec![]), TypeTag::Uint16Array),
        (PropValue::Uint32Array(vec![]), TypeTag::Uint32Array),
        (PropValue::object([("a", PropValue::Null)]), TypeTag::Value),
    ];
    for (value, tag) in cases {
        let text = serialize_value(&value, &m).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json[0], u64::from(tag.to_u8()), "tag for {}", value.kind_name());
        let back = decode_serialized(&text).unwrap();
        assert_eq!(back, value, "roundtrip of {}", value.kind_name());
    }
}

#[test]
fn test_self_referencing_record() {
    let a = Shared::new(Record::new());
    a.write().insert("name".into(), "a".into());
    a.write().insert("self".into(), PropValue::Object(a.clone()));

    let err = serialize_props(&a, &meta()).unwrap_err();
    match &err {
        CodecError::CyclicReference {
            display_name,
            hydrate,
        } => {
            assert_eq!(display_name, "Gallery");
            assert_eq!(*hydrate, Some(HydrationMode::Visible));
        }
        other => panic!("Expected CyclicReference, got {}", other),
    }
    assert!(err
        .to_string()
        .contains("<Gallery client:visible>"));

    a.write().clear();
}

#[test]
fn test_self_containing_array() {
    let arr = Shared::new(Vec::new());
    arr.write().push(PropValue::Array(arr.clone()));
    let props = Shared::new(Record::new());
    props
        .write()
        .insert("arr".into(), PropValue::Array(arr.clone()));

    assert!(matches!(
        serialize_props(&props, &meta()),
        Err(CodecError::CyclicReference { .. })
    ));

    arr.write().clear();
}

#[test]
fn test_indirect_cycle_through_set() {
    let outer = Shared::new(Record::new());
    let set = PropValue::set([PropValue::Object(outer.clone())]);
    outer.write().insert("members".into(), set);

    assert!(matches!(
        serialize_props(&outer, &meta()),
        Err(CodecError::CyclicReference { .. })
    ));

    outer.write().clear();
}

#[test]
fn test_shared_siblings_are_not_cycles() {
    let shared = PropValue::object([("x", PropValue::from(1))]);
    let root = Shared::new(Record::new());
    root.write().insert("a".into(), shared.clone());
    root.write().insert("b".into(), shared.clone());
    root.write()
        .insert("list".into(), PropValue::array([shared.clone(), shared.clone()]));

    let decoded = roundtrip(&root);
    assert_eq!(decoded.get_field("a"), Some(shared.clone()));
    assert_eq!(decoded.get_field("b"), Some(shared.clone()));
    assert_eq!(decoded.get_field("a"), decoded.get_field("b"));
    // Decoded branches are independent copies.
    let (a, b) = (decoded.get_field("a").unwrap(), decoded.get_field("b").unwrap());
    assert!(!a.as_object().unwrap().ptr_eq(b.as_object().unwrap()));
}

#[test]
fn test_in_place_mutation_is_seen() {
    let inner = Shared::new(Record::new());
    let props = Shared::new(Record::new());
    props
        .write()
        .insert("inner".into(), PropValue::Object(inner.clone()));
    inner.write().insert("late".into(), "added".into());

    let decoded = roundtrip(&props);
    let got = decoded.get_field("inner").unwrap();
    assert_eq!(got.get_field("late"), Some(PropValue::from("added")));
}

#[test]
fn test_unknown_tag_inside_props() {
    let decoded = decode(r#"{"ok":[0,"fine"],"odd":[99,"x"]}"#).unwrap();
    assert_eq!(decoded.get_field("ok"), Some(PropValue::from("fine")));
    assert_eq!(decoded.get_field("odd"), Some(PropValue::Unrepresentable(99)));
}

#[test]
fn test_unknown_tag_standalone() {
    assert_eq!(
        decode_serialized(r#"[99, "x"]"#).unwrap(),
        PropValue::Unrepresentable(99)
    );
}

#[test]
fn test_unrepresentable_reencodes_as_null() {
    let decoded = decode(r#"{"odd":[42,"x"]}"#).unwrap();
    let props = decoded.as_object().unwrap().clone();
    let text = serialize_props(&props, &meta()).unwrap();
    assert_eq!(text, r#"{"odd":[0,null]}"#);
}

#[test]
fn test_parallel_encoding_of_disjoint_trees() {
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let props = Shared::new(Record::new());
                    props.write().insert("i".into(), i.into());
                    props
                        .write()
                        .insert("xs".into(), PropValue::array([i.into(), (i * 2).into()]));
                    let text = serialize_props(&props, &meta()).unwrap();
                    (decode(&text).unwrap(), PropValue::Object(props))
                })
            })
            .collect();
        for handle in handles {
            let (decoded, original) = handle.join().unwrap();
            assert_eq!(decoded, original);
        }
    });
}
