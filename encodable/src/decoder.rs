//! Decoder trait for type-safe conversions.
//!
//! `Decoder<T, D>` converts a source `T` into a destination `D`. The
//! destination must opt in through the `DecodableFrom<T>` marker, so only
//! conversions that were declared explicitly compile.
//!
//! The `envelope` crate uses it for the text step of decoding:
//!
//! ```ignore
//! use encodable::decoder::Decoder;
//! use envelope::Envelope;
//!
//! let envelope: Envelope = r#"["Point", {"x": 1, "y": 2}]"#.decode()?;
//! assert_eq!("Point", envelope.type_name());
//! ```
//!
//! # Implementation Guide
//!
//! ```no_run
//! use encodable::decoder::{DecodableFrom, Decoder};
//!
//! struct Tag(String);
//!
//! #[derive(Debug)]
//! struct EmptyTag;
//!
//! impl DecodableFrom<&str> for Tag {}
//!
//! impl Decoder<&str, Tag> for &str {
//!     type Error = EmptyTag;
//!
//!     fn decode(&self) -> Result<Tag, Self::Error> {
//!         if self.is_empty() {
//!             return Err(EmptyTag);
//!         }
//!         Ok(Tag(self.to_string()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type, usually with `T = Self`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T> {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Words(Vec<String>);

    impl DecodableFrom<&str> for Words {}

    impl Decoder<&str, Words> for &str {
        type Error = ();

        fn decode(&self) -> Result<Words, Self::Error> {
            if self.trim().is_empty() {
                return Err(());
            }
            Ok(Words(self.split_whitespace().map(str::to_string).collect()))
        }
    }

    #[rstest(
        input,
        expected,
        case("a", vec!["a"]),
        case("a b", vec!["a", "b"]),
        case("  a   b ", vec!["a", "b"])
    )]
    fn test_decode(input: &str, expected: Vec<&str>) {
        let got: Words = input.decode().unwrap();
        assert_eq!(expected, got.0);
    }

    #[rstest(input, case(""), case("   "))]
    fn test_decode_with_error(input: &str) {
        let got: Result<Words, ()> = input.decode();
        assert!(got.is_err());
    }
}
