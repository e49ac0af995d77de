//! Round-trip and layering tests over synthetic JSON traffic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use uuid::Uuid;
use zp_codec::{
    build_contraction_tables, decode, decode_packed, default_contraction_source,
    default_contraction_tables, encode, encode_base64, encode_packed, Codec, CodecConfig,
    ContractionSource, Variant, ZappyError,
};

const KEYS: [&str; 12] = [
    "user", "location", "rank", "score", "target", "color", "size", "origin", "name", "track",
    "command", "time",
];

const WORDS: [&str; 10] = [
    "hello", "ice cream", "Zürich", "naïve", "🥸", "banana smoothie", "OK", "  ", "tab\tstop", "x",
];

fn uuid(rng: &mut StdRng) -> String {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

fn fake_value(rng: &mut StdRng, depth: usize) -> Value {
    match rng.gen_range(0..if depth > 2 { 7 } else { 9 }) {
        0 => Value::Null,
        1 => json!(rng.gen::<bool>()),
        2 => json!(rng.gen_range(0..100)),
        3 => json!(rng.gen::<u32>()),
        4 => json!(rng.gen::<i64>()),
        5 => json!(uuid(rng)),
        6 => json!(format!(
            "{}://{}.{}/{}",
            ["https", "http", "ws"][rng.gen_range(0..3)],
            WORDS[rng.gen_range(0..WORDS.len())].replace(' ', "-"),
            ["com", "org", "net", "io", "gg"][rng.gen_range(0..5)],
            format!("{:x}", rng.gen::<u32>()),
        )),
        7 => Value::Array((0..rng.gen_range(0..4)).map(|_| fake_value(rng, depth + 1)).collect()),
        _ => fake_object(rng, depth + 1),
    }
}

fn fake_object(rng: &mut StdRng, depth: usize) -> Value {
    let mut object = Map::new();
    for _ in 0..rng.gen_range(1..6) {
        let key = if rng.gen_bool(0.7) {
            KEYS[rng.gen_range(0..KEYS.len())].to_string()
        } else {
            WORDS[rng.gen_range(0..WORDS.len())].to_string()
        };
        object.insert(key, fake_value(rng, depth));
    }
    Value::Object(object)
}

fn fake_json(rng: &mut StdRng) -> String {
    fake_object(rng, 0).to_string()
}

fn known_keys() -> ContractionSource {
    ContractionSource::new().with(1, KEYS)
}

#[test]
fn test_random_json_roundtrip_default_tables() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let tables = default_contraction_tables();
    for _ in 0..500 {
        let text = fake_json(&mut rng);
        let encoded = encode(&text, tables).unwrap();
        assert_eq!(decode(&encoded, tables).unwrap(), text);
    }
}

#[test]
fn test_random_json_roundtrip_layered_tables() {
    let mut rng = StdRng::seed_from_u64(42);
    let tables =
        build_contraction_tables(&[default_contraction_source().clone(), known_keys()]).unwrap();
    for _ in 0..500 {
        let text = fake_json(&mut rng);
        let encoded = encode(&text, &tables).unwrap();
        assert_eq!(decode(&encoded, &tables).unwrap(), text);
    }
}

#[test]
fn test_random_json_roundtrip_packed() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let text = fake_json(&mut rng);
        let encoded = encode_packed(&text).unwrap();
        assert_eq!(decode_packed(&encoded).unwrap(), text);
    }
}

#[test]
fn test_random_bytes_of_text_roundtrip() {
    let mut rng = StdRng::seed_from_u64(1);
    let tables = default_contraction_tables();
    for _ in 0..300 {
        let len = rng.gen_range(0..64);
        let text: String = (0..len)
            .map(|_| match rng.gen_range(0..4) {
                0 => char::from(rng.gen_range(0u8..0x80)),
                1 => char::from(rng.gen_range(b'0'..=b'9')),
                2 => ['a', 'F', 'z', 'Q', 'é', '✌', '👍'][rng.gen_range(0..7)],
                _ => rng.gen::<char>(),
            })
            .collect();
        assert_eq!(decode(&encode(&text, tables).unwrap(), tables).unwrap(), text);
        assert_eq!(decode_packed(&encode_packed(&text).unwrap()).unwrap(), text);
    }
}

#[test]
fn test_json_traffic_shrinks() {
    let mut rng = StdRng::seed_from_u64(99);
    let tables =
        build_contraction_tables(&[default_contraction_source().clone(), known_keys()]).unwrap();
    let (mut plain, mut aligned, mut packed) = (0, 0, 0);
    for _ in 0..200 {
        let text = fake_json(&mut rng);
        plain += encode_base64(&text).len();
        aligned += encode(&text, &tables).unwrap().len();
        packed += encode_packed(&text).unwrap().len();
    }
    assert!(aligned < plain, "aligned {aligned} vs base64 {plain}");
    assert!(packed < plain, "packed {packed} vs base64 {plain}");
}

#[test]
fn test_layering_only_touches_overridden_classes() {
    let mut rng = StdRng::seed_from_u64(3);
    // Class 5 entries that the generator never produces.
    let overlay = ContractionSource::new().with(5, ["never-seen-1", "never-seen-2"]);
    let layered =
        build_contraction_tables(&[default_contraction_source().clone(), overlay]).unwrap();
    let defaults = default_contraction_tables();
    for _ in 0..100 {
        let text = fake_json(&mut rng);
        assert_eq!(encode(&text, &layered).unwrap(), encode(&text, defaults).unwrap());
    }
}

#[test]
fn test_mismatched_tables_fail_to_decode() {
    let tables =
        build_contraction_tables(&[default_contraction_source().clone(), known_keys()]).unwrap();
    let encoded = encode(r#"{"user":1,"score":2}"#, &tables).unwrap();
    let err = decode(&encoded, default_contraction_tables()).unwrap_err();
    assert!(matches!(err, ZappyError::InvalidContraction { size_class: 1, .. }), "{err:?}");

    let quiet = Codec::default().with_throw_on_decode_errors(false);
    assert_eq!(quiet.decode(&encoded).unwrap(), None);
}

#[test]
fn test_codec_shared_across_threads() {
    let config = CodecConfig {
        contractions: vec![known_keys()],
        ..CodecConfig::default()
    };
    let aligned = Codec::from_config(&config).unwrap();
    let packed = aligned.clone().with_variant(Variant::BitPacked);
    std::thread::scope(|scope| {
        for seed in 0..4u64 {
            let (aligned, packed) = (&aligned, &packed);
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..100 {
                    let text = fake_json(&mut rng);
                    for codec in [aligned, packed] {
                        let encoded = codec.encode(&text).unwrap();
                        assert_eq!(codec.decode(&encoded).unwrap().as_deref(), Some(text.as_str()));
                    }
                }
            });
        }
    });
}

#[test]
fn test_uuid_fragments() {
    for _ in 0..50 {
        let id = Uuid::new_v4().to_string();
        let text = format!(r#"{{"id":"{id}","compact":"{}"}}"#, id.replace('-', ""));
        let tables = default_contraction_tables();
        assert_eq!(decode(&encode(&text, tables).unwrap(), tables).unwrap(), text);
        assert_eq!(decode_packed(&encode_packed(&text).unwrap()).unwrap(), text);
    }
}

#[test]
fn test_config_file_shape() -> anyhow::Result<()> {
    let config = CodecConfig::from_json(
        r#"{
            "variant": "byte_aligned",
            "contractions": [
                {"1": ["hello", "hey"], "2": ["banana smoothie"]},
                {"4": ["ice cream"]}
            ]
        }"#,
    )?;
    let codec = Codec::from_config(&config)?;
    let text = r#"{"msg":"hello","dessert":"ice cream","drink":"banana smoothie"}"#;
    let encoded = codec.encode(text)?;
    assert!(encoded.len() < encode(text, default_contraction_tables())?.len());
    assert_eq!(codec.decode(&encoded)?.as_deref(), Some(text));
    Ok(())
}
