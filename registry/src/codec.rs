use encodable::decoder::Decoder;
use encodable::encoder::Encoder;
use encodable::{AnyEncodable, BoxError, Encodable};
use envelope::Envelope;
use tracing::{debug, trace};

use crate::Registry;
use crate::error::{Error, Result};

impl Registry {
    /// Encodes `obj` as envelope text, `["NAME", payload]`.
    ///
    /// The type does not need to be registered to be encoded.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Encode`] if the type's projection fails or the
    /// payload cannot be rendered. The original failure is the error's source.
    pub fn dumps<T: Encodable>(&self, obj: &T) -> Result<String> {
        self.dumps_dyn(obj)
    }

    /// Same as [`dumps`](Registry::dumps) for a type-erased object.
    pub fn dumps_dyn(&self, obj: &dyn AnyEncodable) -> Result<String> {
        let type_name = obj.type_name();
        let payload = obj
            .structured_data()
            .map_err(|source| encode_failure(type_name, source))?;
        let text = Envelope::new(type_name, payload)
            .encode()
            .map_err(|e| encode_failure(type_name, e.into()))?;

        trace!(type_name, len = text.len(), "encoded object");
        Ok(text)
    }

    /// Decodes envelope text into an instance of the type it names.
    ///
    /// Elements after the payload are ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedText`] if `text` is not valid JSON.
    /// - [`Error::EnvelopeShape`] if it is not an array of at least two
    ///   elements starting with a string.
    /// - [`Error::NotRegistered`] if no type is registered under that name.
    /// - [`Error::Decode`] if the registered type rejects the payload.
    pub fn loads(&self, text: &str) -> Result<Box<dyn AnyEncodable>> {
        let envelope: Envelope = text
            .decode()
            .map_err(Error::from)
            .inspect_err(|err| debug!(error = %err, "rejected envelope"))?;
        let (type_name, payload) = envelope.into_parts();

        let descriptor = self
            .resolve(&type_name)
            .inspect_err(|_| {
                debug!(
                    type_name = type_name.as_str(),
                    "envelope names an unregistered type"
                )
            })?;

        let obj = descriptor.reconstruct(payload).map_err(|source| {
            debug!(type_name = type_name.as_str(), error = %source, "failed to decode payload");
            Error::Decode { type_name, source }
        })?;

        trace!(type_name = descriptor.name(), "decoded object");
        Ok(obj)
    }

    /// Decodes envelope text and downcasts the result to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`loads`](Registry::loads) returns, plus
    /// [`Error::UnexpectedType`] if the envelope holds a different type.
    pub fn loads_as<T: Encodable>(&self, text: &str) -> Result<T> {
        let obj = self.loads(text)?;
        let found = obj.type_name();
        obj.downcast::<T>()
            .map(|obj| *obj)
            .ok_or(Error::UnexpectedType {
                expected: T::NAME,
                found,
            })
    }
}

fn encode_failure(type_name: &str, source: BoxError) -> Error {
    debug!(type_name, error = %source, "failed to encode object");
    Error::Encode {
        type_name: type_name.to_string(),
        source,
    }
}
