use crate::*;

// ========== Utf8Assembler ==========

#[test]
fn test_utf8_ascii() {
    let mut asm = Utf8Assembler::new();
    asm.push(b"hello").unwrap();
    asm.push(b", world").unwrap();
    assert_eq!(asm.finish().unwrap(), "hello, world");
}

#[test]
fn test_utf8_split_character() {
    // "🥸" is F0 9F A5 B8.
    let bytes = "a🥸b".as_bytes();
    let mut asm = Utf8Assembler::new();
    asm.push(&bytes[..2]).unwrap();
    assert_eq!(asm.as_str(), "a");
    assert_eq!(asm.pending(), 1);
    asm.push(&bytes[2..4]).unwrap();
    assert_eq!(asm.as_str(), "a");
    assert_eq!(asm.pending(), 3);
    asm.push(&bytes[4..]).unwrap();
    assert_eq!(asm.pending(), 0);
    assert_eq!(asm.finish().unwrap(), "a🥸b");
}

#[test]
fn test_utf8_byte_at_a_time() {
    let original = "☠️✌️ ünïcödé";
    let mut asm = Utf8Assembler::new();
    for b in original.as_bytes() {
        asm.push(std::slice::from_ref(b)).unwrap();
    }
    assert_eq!(asm.finish().unwrap(), original);
}

#[test]
fn test_utf8_empty_push() {
    let mut asm = Utf8Assembler::new();
    asm.push(&[]).unwrap();
    assert_eq!(asm.finish().unwrap(), "");
}

#[test]
fn test_utf8_invalid_byte() {
    let mut asm = Utf8Assembler::new();
    asm.push(b"ok").unwrap();
    let err = asm.push(&[0xff]).unwrap_err();
    assert!(matches!(err, ZappyError::InvalidUtf8 { offset: 2 }));
}

#[test]
fn test_utf8_invalid_continuation_after_pending() {
    let mut asm = Utf8Assembler::new();
    asm.push(&[0xe2, 0x98]).unwrap();
    let err = asm.push(b"x").unwrap_err();
    assert!(matches!(err, ZappyError::InvalidUtf8 { offset: 0 }));
}

#[test]
fn test_utf8_incomplete_at_finish() {
    let mut asm = Utf8Assembler::new();
    asm.push(b"ab").unwrap();
    asm.push(&[0xf0, 0x9f]).unwrap();
    let err = asm.finish().unwrap_err();
    assert!(matches!(err, ZappyError::InvalidUtf8 { offset: 2 }));
}

// ========== Config ==========

#[test]
fn test_config_default() {
    let config = CodecConfig::default();
    assert_eq!(config.variant, Variant::ByteAligned);
    assert!(config.throw_on_decode_errors);
    assert!(config.use_default_contractions);
    assert!(config.contractions.is_empty());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "variant": "bit_packed",
        "throw_on_decode_errors": false,
        "contractions": [{"1": ["hello", "hey"], "4": ["ice cream"]}]
    }"#;
    let config = CodecConfig::from_json(json).unwrap();
    assert_eq!(config.variant, Variant::BitPacked);
    assert!(!config.throw_on_decode_errors);
    assert!(config.use_default_contractions);
    let source = &config.contractions[0];
    assert_eq!(source.get(1).unwrap(), ["hello", "hey"]);
    assert_eq!(source.get(4).unwrap(), ["ice cream"]);
    assert!(source.get(0).is_none());
}

#[test]
fn test_config_empty_json_uses_defaults() {
    let config = CodecConfig::from_json("{}").unwrap();
    assert_eq!(config, CodecConfig::default());
}

#[test]
fn test_config_bad_json() {
    let err = CodecConfig::from_json(r#"{"variant": "sideways"}"#).unwrap_err();
    assert!(matches!(err, ZappyError::Configuration(_)));
    assert!(!err.is_decode_error());
}

#[test]
fn test_config_sources_layering_order() {
    let defaults = ContractionSource::new().with(0, ["null"]);
    let mine = ContractionSource::new().with(1, ["hello"]);
    let mut config = CodecConfig::default();
    config.contractions.push(mine.clone());
    assert_eq!(config.sources(&defaults), vec![defaults.clone(), mine.clone()]);
    config.use_default_contractions = false;
    assert_eq!(config.sources(&defaults), vec![mine]);
}

#[test]
fn test_contraction_source_roundtrip_json() {
    let source: ContractionSource = [(0u8, vec!["true", "false"]), (16, vec!["localhost"])]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&source).unwrap();
    assert_eq!(json, r#"{"0":["true","false"],"16":["localhost"]}"#);
    assert_eq!(ContractionSource::from_json(&json).unwrap(), source);
    assert_eq!(source.size_classes().collect::<Vec<_>>(), vec![0, 16]);
}

// ========== Errors ==========

#[test]
fn test_error_classification() {
    assert!(ZappyError::TruncatedStream("blob".into()).is_decode_error());
    assert!(ZappyError::UnknownToken(0xd1).is_decode_error());
    assert!(ZappyError::InvalidContraction { size_class: 3, index: 9 }.is_decode_error());
    assert!(!ZappyError::InternalEncoding("x".into()).is_decode_error());
    assert_eq!(ZappyError::UnknownToken(0xd1).to_string(), "Unknown token: 0xd1");
}
