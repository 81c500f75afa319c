/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// ```rust
/// use yaml_write_stream::{yaml, Value};
///
/// let doc = yaml!({ "a": [1, null, "x"], "b": {} });
/// assert!(doc.is_mapping());
/// ```
#[macro_export]
macro_rules! yaml {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::yaml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::yaml!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Any other expression convertible into a Value
    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Number, Value};

    #[test]
    fn test_yaml_macro_primitives() {
        assert_eq!(yaml!(null), Value::Null);
        assert_eq!(yaml!(true), Value::Bool(true));
        assert_eq!(yaml!(42), Value::Number(Number::Int(42)));
        assert_eq!(yaml!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(yaml!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_yaml_macro_nested() {
        assert_eq!(yaml!({}), Value::Mapping(Mapping::new()));

        let doc = yaml!({
            "name": "Alice",
            "scores": [1, 2],
            "extra": null
        });
        match doc {
            Value::Mapping(map) => {
                let keys: Vec<_> = map.keys().cloned().collect();
                assert_eq!(keys, vec!["name", "scores", "extra"]);
                assert_eq!(
                    map.get("scores"),
                    Some(&Value::Sequence(vec![Value::from(1), Value::from(2)]))
                );
                assert_eq!(map.get("extra"), Some(&Value::Null));
            }
            _ => panic!("Expected mapping"),
        }
    }
}
