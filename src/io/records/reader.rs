use std::io::Read;

use serde_json::Value;

use crate::io::{Format, error::Error};

/// Reads a JSON records stream: a top-level array of tagged record values.
///
/// The values are returned raw so the caller can convert them one at a time
/// and report failures with the offending index intact (see
/// [`compute_stats_from_values`](crate::compute_stats_from_values)).
pub fn read<R: Read>(reader: R) -> Result<Vec<Value>, Error> {
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| Error::parse(Format::Records, e.line(), e.to_string()))?;

    match value {
        Value::Array(values) => Ok(values),
        other => Err(Error::parse(
            Format::Records,
            1,
            format!("expected a top-level array of records, found {}", type_name(&other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_an_array_of_values() {
        let input = r#"[{"kind": "atoms"}, {"kind": "system"}]"#;
        let values = read(input.as_bytes()).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["kind"], "atoms");
    }

    #[test]
    fn empty_array_is_valid() {
        let values = read("[]".as_bytes()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn top_level_object_is_rejected() {
        let err = read(r#"{"kind": "atoms"}"#.as_bytes()).unwrap_err();
        match err {
            Error::Parse { details, .. } => assert!(details.contains("top-level array")),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn syntax_errors_carry_a_line_number() {
        let input = "[\n{\"kind\": \"atoms\"},\n{broken\n]";
        let err = read(input.as_bytes()).unwrap_err();
        match err {
            Error::Parse { format: Format::Records, line, .. } => assert_eq!(line, 3),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
