//! Property-based tests - generated documents must read back unchanged and
//! both writer façades must agree byte for byte.

use proptest::prelude::*;
use yaml_rust::{Yaml, YamlLoader};
use yaml_write_stream::{
    from_stream, from_stream_with, to_string, Emitter, Encoding, MapWriter, Mapping, Number,
    Result, SequenceWriter, StatefulWriter, Value,
};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::Int(i))),
        prop::num::f64::NORMAL.prop_map(|f| Value::Number(Number::Float(f))),
        "\\PC{0,16}".prop_map(Value::String),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof!["k[a-z0-9_]{0,8}", "[0-9]{1,4}"]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

fn document() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec((key(), tree()), 0..6)
            .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
        prop::collection::vec(tree(), 0..6).prop_map(Value::Sequence),
    ]
}

fn to_value(doc: &Yaml) -> Value {
    match doc {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(i) => Value::Number(Number::Int(*i)),
        Yaml::Real(_) => Value::Number(Number::Float(doc.as_f64().unwrap_or(f64::NAN))),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Array(items) => Value::Sequence(items.iter().map(to_value).collect()),
        Yaml::Hash(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| {
                    let key = match k {
                        Yaml::String(s) => s.clone(),
                        other => format!("{:?}", other),
                    };
                    (key, to_value(v))
                })
                .collect::<Mapping>(),
        ),
        other => Value::String(format!("{:?}", other)),
    }
}

fn stateful(writer: &mut StatefulWriter<impl Emitter>, key: Option<&str>, value: &Value) -> Result<()> {
    match value {
        Value::Mapping(entries) => {
            match key {
                Some(k) => writer.write_keyed_map(k)?,
                None => writer.write_map()?,
            }
            for (k, v) in entries {
                stateful(writer, Some(k), v)?;
            }
            writer.close_map()
        }
        Value::Sequence(items) => {
            match key {
                Some(k) => writer.write_keyed_sequence(k)?,
                None => writer.write_sequence()?,
            }
            for item in items {
                stateful(writer, None, item)?;
            }
            writer.close_sequence()
        }
        leaf => {
            let scalar = leaf.as_scalar().unwrap_or_default();
            match key {
                Some(k) => writer.write_key_value(k, scalar),
                None => writer.write_element(scalar),
            }
        }
    }
}

fn fill_map<E: Emitter>(map: &mut MapWriter<'_, E>, entries: &Mapping) -> Result<()> {
    for (k, v) in entries {
        match v {
            Value::Mapping(inner) => map.write_map(k, |m| fill_map(m, inner))?,
            Value::Sequence(items) => map.write_sequence(k, |s| fill_sequence(s, items))?,
            leaf => map.write_key_value(k, leaf.as_scalar().unwrap_or_default())?,
        }
    }
    Ok(())
}

fn fill_sequence<E: Emitter>(seq: &mut SequenceWriter<'_, E>, items: &[Value]) -> Result<()> {
    for item in items {
        match item {
            Value::Mapping(inner) => seq.write_map(|m| fill_map(m, inner))?,
            Value::Sequence(nested) => seq.write_sequence(|s| fill_sequence(s, nested))?,
            leaf => seq.write_element(leaf.as_scalar().unwrap_or_default())?,
        }
    }
    Ok(())
}

fn stateful_text(doc: &Value) -> String {
    let mut out = Vec::new();
    {
        let mut writer = from_stream(&mut out, Encoding::Utf8).unwrap();
        stateful(&mut writer, None, doc).unwrap();
        writer.close().unwrap();
    }
    String::from_utf8(out).unwrap()
}

fn callback_text(doc: &Value) -> String {
    let out = from_stream_with(Vec::new(), Encoding::Utf8, |writer| match doc {
        Value::Mapping(entries) => writer.write_map(|m| fill_map(m, entries)),
        Value::Sequence(items) => writer.write_sequence(|s| fill_sequence(s, items)),
        _ => Ok(()),
    })
    .unwrap();
    String::from_utf8(out).unwrap()
}

proptest! {
    #[test]
    fn prop_roundtrip(doc in document()) {
        let text = stateful_text(&doc);
        let docs = YamlLoader::load_from_str(&text).unwrap();
        prop_assert_eq!(docs.len(), 1);
        prop_assert_eq!(to_value(&docs[0]), doc, "{}", text);
    }

    #[test]
    fn prop_facades_agree(doc in document()) {
        let stateful = stateful_text(&doc);
        prop_assert_eq!(&callback_text(&doc), &stateful);
        prop_assert_eq!(&to_string(&doc).unwrap(), &stateful);
    }

    #[test]
    fn prop_strings_read_back(s in "\\PC{0,32}") {
        let doc = Value::Sequence(vec![Value::String(s.clone())]);
        let text = stateful_text(&doc);
        let docs = YamlLoader::load_from_str(&text).unwrap();
        prop_assert_eq!(docs[0][0].as_str(), Some(s.as_str()));
    }

    #[test]
    fn prop_lines_end_with_newline(doc in document()) {
        let text = stateful_text(&doc);
        prop_assert!(text.ends_with('\n'));
        prop_assert!(!text.contains("\n\n"));
    }
}
