use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;
use crate::records::{A, B, ComplexSegment, ComplexSegment22, MyType, Record};

const TYPENAME: &str = "__typename";

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DecodeError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(into_decode_error)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(into_decode_error)
}

pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(into_decode_error)
}

/// Decode a `__typename`-tagged record.
///
/// Dispatches on the tag first so errors carry the path inside the record
/// rather than stopping at the enum boundary.
pub fn decode_record(value: &Value) -> Result<Record, DecodeError> {
    let Some(obj) = value.as_object() else {
        return Err(DecodeError {
            path: ".".to_string(),
            message: "expected a tagged record object".to_string(),
        });
    };
    let typename = match obj.get(TYPENAME) {
        Some(Value::String(name)) => name.as_str(),
        Some(_) => {
            return Err(DecodeError {
                path: TYPENAME.to_string(),
                message: "expected a string".to_string(),
            });
        }
        None => {
            return Err(DecodeError {
                path: ".".to_string(),
                message: format!("missing field `{TYPENAME}`"),
            });
        }
    };
    let mut body = obj.clone();
    body.remove(TYPENAME);
    let body = Value::Object(body);
    let record = match typename {
        "MyType" => Record::MyType(from_value_with_path::<MyType>(&body)?),
        "ComplexSegment" => Record::ComplexSegment(from_value_with_path::<ComplexSegment>(&body)?),
        "ComplexSegment22" => Record::ComplexSegment22(from_value_with_path::<ComplexSegment22>(&body)?),
        "A" => Record::A(from_value_with_path::<A>(&body)?),
        "B" => Record::B(from_value_with_path::<B>(&body)?),
        other => {
            return Err(DecodeError {
                path: TYPENAME.to_string(),
                message: format!("unknown record type `{other}`"),
            });
        }
    };
    Ok(record)
}

fn into_decode_error(err: serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    let path = err.path().to_string();
    DecodeError { path, message: err.into_inner().to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_error_names_the_field_path() {
        let err = from_str_with_path::<B>(r#"{"a": {"a_string": 1}, "b_string": "y"}"#).unwrap_err();
        assert_eq!(err.path, "a.a_string");
        assert!(err.to_string().starts_with("at JSON path a.a_string"));
    }

    #[test]
    fn slice_and_value_decode_the_same() {
        let src = br#"{"real": 7}"#;
        let from_slice = from_slice_with_path::<MyType>(src).unwrap();
        let from_value = from_value_with_path::<MyType>(&json!({"real": 7})).unwrap();
        assert_eq!(from_slice, from_value);
        assert_eq!(from_value.real, 7);
    }

    #[test]
    fn tagged_record_decodes_from_value() {
        let r = decode_record(&json!({"__typename": "A", "a_string": "x"})).unwrap();
        assert_eq!(r, Record::A(A::new("x")));
        let same = from_value_with_path::<Record>(&json!({"__typename": "A", "a_string": "x"})).unwrap();
        assert_eq!(r, same);
    }

    #[test]
    fn tagged_record_errors_point_inside_the_record() {
        let err = decode_record(&json!({"__typename": "B", "a": {"a_string": 1}, "b_string": "y"})).unwrap_err();
        assert_eq!(err.path, "a.a_string");

        let err = decode_record(&json!({"__typename": "Z"})).unwrap_err();
        assert_eq!(err.path, "__typename");
        assert!(err.message.contains("`Z`"));

        let err = decode_record(&json!({"a_string": "x"})).unwrap_err();
        assert!(err.message.contains("__typename"));

        let err = decode_record(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, ".");

        let err = decode_record(&json!({"__typename": "A", "a_string": "x", "extra": 1})).unwrap_err();
        assert!(err.message.contains("extra"));
    }
}
