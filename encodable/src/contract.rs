use std::any::Any;
use std::fmt::{self, Debug, Formatter};

use serde_json::Value;

/// Boxed error returned by user-supplied conversions.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?`, and so do
/// `&str` and `String` messages.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A type that can be projected into a structured value and rebuilt from one.
///
/// `NAME` is the declared name written into every envelope. It identifies the
/// type across process boundaries and must be unique among the types
/// registered together.
///
/// Neither conversion has a default implementation.
pub trait Encodable: Sized + Send + Sync + 'static {
    /// Declared type name used as the envelope tag.
    const NAME: &'static str;

    /// Projects `self` into a structured value.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance cannot be represented. The codec
    /// reports it as an encode failure and keeps it as the source.
    fn to_structured_data(&self) -> Result<Value, BoxError>;

    /// Rebuilds an instance from a structured value.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not have the shape this type expects,
    /// for example a missing field or a wrong primitive kind.
    fn from_structured_data(data: Value) -> Result<Self, BoxError>;
}

/// Object-safe view of an [`Encodable`] instance.
///
/// Implemented for every `Encodable` type. A decoded object comes back as
/// `Box<dyn AnyEncodable>`; use [`downcast_ref`](trait.AnyEncodable.html#method.downcast_ref)
/// or [`downcast`](trait.AnyEncodable.html#method.downcast) to recover the
/// concrete type.
pub trait AnyEncodable: Any + Send + Sync {
    /// Declared name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// Projects the instance into a structured value.
    ///
    /// Same as [`Encodable::to_structured_data`], callable through a trait object.
    fn structured_data(&self) -> Result<Value, BoxError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Encodable> AnyEncodable for T {
    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn structured_data(&self) -> Result<Value, BoxError> {
        self.to_structured_data()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

impl dyn AnyEncodable {
    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: Encodable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Encodable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Converts the box into the concrete type, or `None` if it holds another type.
    pub fn downcast<T: Encodable>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

impl Debug for dyn AnyEncodable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyEncodable")
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter(u64);

    impl Encodable for Counter {
        const NAME: &'static str = "Counter";

        fn to_structured_data(&self) -> Result<Value, BoxError> {
            Ok(json!(self.0))
        }

        fn from_structured_data(data: Value) -> Result<Self, BoxError> {
            data.as_u64().map(Counter).ok_or_else(|| "expected an unsigned integer".into())
        }
    }

    #[derive(Debug, PartialEq)]
    struct Label(String);

    impl Encodable for Label {
        const NAME: &'static str = "Label";

        fn to_structured_data(&self) -> Result<Value, BoxError> {
            Ok(json!(self.0))
        }

        fn from_structured_data(data: Value) -> Result<Self, BoxError> {
            match data {
                Value::String(s) => Ok(Label(s)),
                other => Err(format!("expected a string, got {other}").into()),
            }
        }
    }

    #[rstest]
    #[case(json!(0), Counter(0))]
    #[case(json!(42), Counter(42))]
    #[case(json!(u64::MAX), Counter(u64::MAX))]
    fn test_from_structured_data(#[case] input: Value, #[case] expected: Counter) {
        let got = Counter::from_structured_data(input).unwrap();
        assert_eq!(expected, got);
    }

    #[rstest]
    #[case(json!(-1))]
    #[case(json!("42"))]
    #[case(json!(null))]
    #[case(json!({"value": 1}))]
    fn test_from_structured_data_with_error(#[case] input: Value) {
        assert!(Counter::from_structured_data(input).is_err());
    }

    #[test]
    fn test_any_encodable_reports_declared_name() {
        let boxed: Box<dyn AnyEncodable> = Box::new(Label("a".to_string()));
        assert_eq!("Label", boxed.type_name());
        assert_eq!(json!("a"), boxed.structured_data().unwrap());
    }

    #[test]
    fn test_downcast_ref() {
        let boxed: Box<dyn AnyEncodable> = Box::new(Counter(7));
        assert!(boxed.is::<Counter>());
        assert!(!boxed.is::<Label>());
        assert_eq!(Some(&Counter(7)), boxed.downcast_ref::<Counter>());
        assert_eq!(None, boxed.downcast_ref::<Label>());
    }

    #[test]
    fn test_downcast() {
        let boxed: Box<dyn AnyEncodable> = Box::new(Label("x".to_string()));
        assert_eq!(Some(Box::new(Label("x".to_string()))), boxed.downcast::<Label>());

        let boxed: Box<dyn AnyEncodable> = Box::new(Label("x".to_string()));
        assert!(boxed.downcast::<Counter>().is_none());
    }

    #[test]
    fn test_debug_shows_type_name() {
        let boxed: Box<dyn AnyEncodable> = Box::new(Counter(1));
        assert_eq!("AnyEncodable { type_name: \"Counter\", .. }", format!("{boxed:?}"));
    }
}
