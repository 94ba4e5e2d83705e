//! # envelope
//!
//! The text form of an encoded object: a JSON array holding the declared type
//! name followed by the type's payload.
//!
//! ```text
//! ["User", {"name": "alice", "age": 30}]
//! ```
//!
//! Parsing accepts any JSON array with at least two elements whose first
//! element is a string. Elements after the payload are ignored. The payload is
//! never inspected here.

pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use encodable::Value;
use encodable::decoder::{DecodableFrom, Decoder};
use encodable::encoder::{EncodableTo, Encoder};
use error::Error;

/// Minimum number of array elements: the type name and the payload.
const MIN_ELEMENTS: usize = 2;

/// A `(type_name, payload)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    type_name: String,
    payload: Value,
}

impl Envelope {
    pub fn new(type_name: impl Into<String>, payload: Value) -> Self {
        Envelope {
            type_name: type_name.into(),
            payload,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consumes the envelope and returns the type name and the payload.
    pub fn into_parts(self) -> (String, Value) {
        (self.type_name, self.payload)
    }

    /// Checks the shape of an already parsed value.
    ///
    /// The value must be an array of at least two elements and the first
    /// element must be a string. Extra elements are dropped.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(Error::Shape(format!(
                    "expected an array, got {}",
                    value_kind(&other)
                )));
            }
        };

        let len = elements.len();
        let mut elements = elements.into_iter();
        match (elements.next(), elements.next()) {
            (Some(Value::String(type_name)), Some(payload)) => Ok(Envelope { type_name, payload }),
            (Some(other), Some(_)) => Err(Error::Shape(format!(
                "type name must be a string, got {}",
                value_kind(&other)
            ))),
            _ => Err(Error::Shape(format!(
                "expected at least {MIN_ELEMENTS} elements, got {len}"
            ))),
        }
    }
}

impl Display for Envelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text: String = self.encode().map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Envelope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s).map_err(Error::Malformed)?;
        Envelope::from_value(value)
    }
}

impl DecodableFrom<&str> for Envelope {}

impl Decoder<&str, Envelope> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Envelope, Self::Error> {
        Envelope::from_str(self)
    }
}

impl EncodableTo<Envelope> for String {}

impl Encoder<Envelope, String> for Envelope {
    type Error = serde_json::Error;

    fn encode(&self) -> Result<String, Self::Error> {
        serde_json::to_string(&(&self.type_name, &self.payload))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use crate::Envelope;
    use crate::error::Error;
    use encodable::Value;
    use encodable::decoder::Decoder;
    use encodable::encoder::Encoder;
    use std::str::FromStr;

    #[rstest(
        input,
        expected_name,
        expected_payload,
        case(r#"["User",{"name":"alice"}]"#, "User", json!({"name": "alice"})),
        case(r#"  [ "User" , { "name" : "alice" } ]  "#, "User", json!({"name": "alice"})),
        case(r#"["Count",3]"#, "Count", json!(3)),
        case(r#"["Nothing",null]"#, "Nothing", json!(null)),
        case(r#"["List",[1,[2,3]]]"#, "List", json!([1, [2, 3]])),
        case(r#"["",{}]"#, "", json!({}))
    )]
    fn test_envelope_from_str(input: &str, expected_name: &str, expected_payload: Value) {
        let envelope = Envelope::from_str(input).unwrap();
        assert_eq!(expected_name, envelope.type_name());
        assert_eq!(&expected_payload, envelope.payload());
    }

    #[rstest]
    #[case::one_extra(r#"["User",{"a":1},"extra"]"#)]
    #[case::many_extra(r#"["User",{"a":1},"extra",2,null,{"b":[]}]"#)]
    fn test_envelope_ignores_extra_elements(#[case] input: &str) {
        let with_extra = Envelope::from_str(input).unwrap();
        let exact = Envelope::from_str(r#"["User",{"a":1}]"#).unwrap();
        assert_eq!(exact, with_extra);
    }

    #[rstest]
    #[case::empty_array("[]")]
    #[case::name_only(r#"["Foo"]"#)]
    #[case::object(r#"{"Foo":{}}"#)]
    #[case::string(r#""Foo""#)]
    #[case::number("1")]
    #[case::null("null")]
    #[case::number_name(r#"[1,{}]"#)]
    #[case::null_name(r#"[null,{}]"#)]
    #[case::array_name(r#"[["Foo"],{}]"#)]
    fn test_envelope_from_str_with_shape_error(#[case] input: &str) {
        match Envelope::from_str(input) {
            Err(Error::Shape(_)) => {}
            other => panic!("expected a shape error, got {other:?}"),
        }
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::empty("")]
    #[case::unclosed("[")]
    #[case::trailing_comma(r#"["Foo",{},]"#)]
    #[case::single_quotes("['Foo', {}]")]
    fn test_envelope_from_str_with_malformed_error(#[case] input: &str) {
        match Envelope::from_str(input) {
            Err(Error::Malformed(_)) => {}
            other => panic!("expected a malformed text error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_error_keeps_parser_message() {
        let parser_err = serde_json::from_str::<Value>("not json").unwrap_err();
        let err = Envelope::from_str("not json").unwrap_err();
        assert_eq!(parser_err.to_string(), err.to_string());
        assert!(matches!(err, Error::Malformed(e) if e.is_syntax()));
    }

    #[test]
    fn test_shape_error_message() {
        let err = Envelope::from_str(r#"["Foo"]"#).unwrap_err();
        assert_eq!(
            "not a valid encoded envelope: expected at least 2 elements, got 1",
            err.to_string()
        );

        let err = Envelope::from_str("{}").unwrap_err();
        assert_eq!(
            "not a valid encoded envelope: expected an array, got object",
            err.to_string()
        );
    }

    #[test]
    fn test_envelope_display() {
        let envelope = Envelope::new("User", json!({"name": "alice", "age": 30}));
        assert_eq!(r#"["User",{"name":"alice","age":30}]"#, envelope.to_string());
        let encoded: String = envelope.encode().unwrap();
        assert_eq!(envelope.to_string(), encoded);
    }

    #[rstest]
    #[case(Envelope::new("User", json!({"name": "alice", "tags": ["a", "b"]})))]
    #[case(Envelope::new("Escaped \"name\"", json!("line\nbreak")))]
    #[case(Envelope::new("Float", json!(1.5)))]
    fn test_envelope_roundtrip(#[case] envelope: Envelope) {
        let text: String = envelope.encode().unwrap();
        let decoded: Envelope = text.as_str().decode().unwrap();
        assert_eq!(envelope, decoded);
    }

    #[test]
    fn test_into_parts() {
        let (name, payload) = Envelope::new("Count", json!(3)).into_parts();
        assert_eq!("Count", name);
        assert_eq!(json!(3), payload);
    }
}
