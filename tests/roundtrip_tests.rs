//! Documents written by the stream writers are read back with `yaml-rust`
//! and compared against what was written.

use serde::Serialize;
use serde_json::json;
use yaml_rust::{Yaml, YamlLoader};
use yaml_write_stream::{
    from_stream, from_stream_with, to_string, yaml, Emitter, Encoding, Mapping, Number,
    StatefulWriter, Value,
};

fn key_text(key: &Yaml) -> String {
    match key {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        other => panic!("unexpected key {:?}", other),
    }
}

fn to_value(doc: &Yaml) -> Value {
    match doc {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(i) => Value::Number(Number::Int(*i)),
        Yaml::Real(_) => Value::Number(Number::Float(doc.as_f64().unwrap())),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Sequence(items.iter().map(to_value).collect()),
        Yaml::Hash(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| (key_text(k), to_value(v)))
                .collect::<Mapping>(),
        ),
        other => panic!("unexpected node {:?}", other),
    }
}

fn decode(text: &str) -> Value {
    let docs = YamlLoader::load_from_str(text).unwrap();
    assert_eq!(docs.len(), 1, "{}", text);
    to_value(&docs[0])
}

fn write_value<E: Emitter>(writer: &mut StatefulWriter<E>, key: Option<&str>, value: &Value) {
    match value {
        Value::Mapping(entries) => {
            match key {
                Some(k) => writer.write_keyed_map(k).unwrap(),
                None => writer.write_map().unwrap(),
            }
            for (k, v) in entries {
                write_value(writer, Some(k), v);
            }
            writer.close_map().unwrap();
        }
        Value::Sequence(items) => {
            match key {
                Some(k) => writer.write_keyed_sequence(k).unwrap(),
                None => writer.write_sequence().unwrap(),
            }
            for item in items {
                write_value(writer, None, item);
            }
            writer.close_sequence().unwrap();
        }
        leaf => {
            let scalar = leaf.as_scalar().unwrap();
            match key {
                Some(k) => writer.write_key_value(k, scalar).unwrap(),
                None => writer.write_element(scalar).unwrap(),
            }
        }
    }
}

fn stateful_text(value: &Value) -> String {
    let mut out = Vec::new();
    {
        let mut writer = from_stream(&mut out, Encoding::Utf8).unwrap();
        write_value(&mut writer, None, value);
        writer.close().unwrap();
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn test_nested_document() {
    let doc = yaml!({
        "name": "service",
        "replicas": 3,
        "ratio": 0.75,
        "enabled": true,
        "owner": null,
        "ports": [80, 443],
        "env": {"LOG": "debug", "EMPTY": ""},
        "matrix": [[1, 2], [3], []],
        "jobs": [{"id": 1, "tags": ["a", "b"]}, {"id": 2, "tags": []}],
        "nothing": {}
    });
    let text = stateful_text(&doc);
    assert_eq!(decode(&text), doc, "{}", text);
    assert_eq!(to_string(&doc).unwrap(), text);
}

#[test]
fn test_strings_stay_strings() {
    let tricky = [
        "",
        " lead",
        "trail ",
        "a: b",
        "# not a comment",
        "- dash",
        "null",
        "~",
        "true",
        "NO",
        "123",
        "0x1F",
        "1.5",
        "1e3",
        ".inf",
        "line\nbreak",
        "carriage\rreturn",
        "quote\"inside",
        "back\\slash",
        "bell\u{7}",
        "nul\0",
        "sep\u{2028}arator",
        "tab\tstop",
        "émoji 🦀",
        "---",
        "...",
        "[flow]",
        "{x: 1}",
        "'single'",
        "@at",
        "%pct",
        "`tick",
        "*star",
        "&anchor",
        "!tag",
        "|pipe",
        ">fold",
    ];

    let doc = Value::Sequence(tricky.iter().map(|s| Value::from(*s)).collect());
    let text = stateful_text(&doc);
    assert_eq!(decode(&text), doc, "{}", text);

    let doc: Mapping = tricky
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("k{}", i), Value::from(*s)))
        .collect();
    let doc = Value::Mapping(doc);
    assert_eq!(decode(&stateful_text(&doc)), doc);
}

#[test]
fn test_plain_safe_keys() {
    let keys = ["simple", "with space", "dotted.key", "snake_case", "kebab-case", "ünïcode"];
    let doc: Mapping = keys
        .iter()
        .map(|k| (k.to_string(), Value::from(1)))
        .collect();
    let doc = Value::Mapping(doc);
    let text = stateful_text(&doc);
    assert!(!text.contains('"'), "{}", text);
    assert_eq!(decode(&text), doc);
}

#[test]
fn test_unsafe_keys_are_quoted() {
    let keys = ["", "a: b", "#hash", "- item", "[x]", "new\nline", "007"];
    let doc: Mapping = keys
        .iter()
        .map(|k| (k.to_string(), Value::from("v")))
        .collect();
    let doc = Value::Mapping(doc);
    assert_eq!(decode(&stateful_text(&doc)), doc);
}

#[test]
fn test_long_keys() {
    let long = "a".repeat(2000);
    let quoted = "x: y ".repeat(60);
    let mut inner = Mapping::new();
    inner.insert(long.clone(), Value::from("deep"));
    let mut doc = Mapping::new();
    doc.insert(long.clone(), Value::from(1));
    doc.insert(format!("{}b", long), Value::Mapping(inner.clone()));
    doc.insert(format!("{}c", long), yaml!(["x", "y"]));
    doc.insert(quoted, Value::Null);
    doc.insert(
        "items".to_string(),
        Value::Sequence(vec![Value::Mapping(inner)]),
    );
    let doc = Value::Mapping(doc);

    let text = stateful_text(&doc);
    assert!(text.starts_with("? "), "{}", text);
    assert_eq!(decode(&text), doc);
    assert_eq!(to_string(&doc).unwrap(), text);
}

#[test]
fn test_numbers() {
    let doc = Value::Sequence(vec![
        Value::from(0),
        Value::from(-1),
        Value::from(i64::MAX),
        Value::from(i64::MIN),
        Value::from(1.0),
        Value::from(-2.5),
        Value::from(1e300),
        Value::from(1e-7),
    ]);
    let text = stateful_text(&doc);
    assert_eq!(decode(&text), doc, "{}", text);
}

#[test]
fn test_non_finite_floats() {
    let doc = Value::Sequence(vec![
        Value::from(f64::INFINITY),
        Value::from(f64::NEG_INFINITY),
        Value::from(f64::NAN),
    ]);
    let text = stateful_text(&doc);
    assert_eq!(text, "- .inf\n- -.inf\n- .nan\n");
    let docs = YamlLoader::load_from_str(&text).unwrap();
    let items = docs[0].as_vec().unwrap();
    assert_eq!(items[0].as_f64(), Some(f64::INFINITY));
    assert_eq!(items[1].as_f64(), Some(f64::NEG_INFINITY));
    assert!(items[2].as_f64().unwrap().is_nan());
}

#[test]
fn test_empty_document_reads_as_null() {
    let out = from_stream_with(Vec::new(), Encoding::Utf8, |_| Ok(())).unwrap();
    assert_eq!(decode(&String::from_utf8(out).unwrap()), Value::Null);
}

#[test]
fn test_utf16_roundtrip() {
    let out = from_stream_with(Vec::new(), Encoding::Utf16Le, |writer| {
        writer.write_map(|map| {
            map.write_key_value("greeting", "héllo wörld")?;
            map.write_sequence("crabs", |seq| seq.write_element("🦀"))
        })
    })
    .unwrap();
    assert_eq!(&out[..2], &[0xFF, 0xFE]);
    let units: Vec<u16> = out[2..]
        .chunks(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16(&units).unwrap();
    assert_eq!(
        decode(&text),
        yaml!({"greeting": "héllo wörld", "crabs": ["🦀"]})
    );
}

#[derive(Serialize)]
struct Release {
    version: String,
    downloads: u64,
    yanked: bool,
    checksum: Option<String>,
    targets: Vec<Target>,
}

#[derive(Serialize)]
struct Target {
    triple: &'static str,
    size: f64,
}

fn to_json(doc: &Yaml) -> serde_json::Value {
    match doc {
        Yaml::Null => serde_json::Value::Null,
        Yaml::Boolean(b) => json!(b),
        Yaml::Integer(i) => json!(i),
        Yaml::Real(_) => json!(doc.as_f64().unwrap()),
        Yaml::String(s) => json!(s),
        Yaml::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Yaml::Hash(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (key_text(k), to_json(v)))
                .collect(),
        ),
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_serde_roundtrip() {
    let release = Release {
        version: "1.2.0".to_string(),
        downloads: 1_024,
        yanked: false,
        checksum: None,
        targets: vec![
            Target {
                triple: "x86_64-unknown-linux-gnu",
                size: 2.5,
            },
            Target {
                triple: "aarch64-apple-darwin",
                size: 2.25,
            },
        ],
    };
    let text = to_string(&release).unwrap();
    let docs = YamlLoader::load_from_str(&text).unwrap();
    assert_eq!(to_json(&docs[0]), serde_json::to_value(&release).unwrap());
}

#[test]
fn test_serde_json_value_roundtrip() {
    let original = json!({
        "users": [
            {"name": "Alice", "roles": ["admin"], "age": 30},
            {"name": "Bob", "roles": [], "age": null}
        ],
        "meta": {"total": 2, "ratio": 0.5, "ok": true, "note": ""}
    });
    let text = to_string(&original).unwrap();
    let docs = YamlLoader::load_from_str(&text).unwrap();
    assert_eq!(to_json(&docs[0]), original, "{}", text);
}
