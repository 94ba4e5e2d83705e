//! Encoder trait, the reverse direction of [`Decoder`](crate::decoder::Decoder).
//!
//! `Encoder<T, E>` is implemented by the source `T` and produces `E`, which
//! must opt in through `EncodableTo<T>`. The `envelope` crate implements
//! `Encoder<Envelope, String>` for rendering envelopes as text.

/// Encoder trait for converting from type `T` to type `E`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` cannot be represented as `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be encoded from type `T`.
pub trait EncodableTo<T> {}
