use encodable::BoxError;
use thiserror::Error;

/// Errors returned by registration, `dumps` and `loads`.
///
/// Each decode failure lands in exactly one variant so callers can react per
/// kind: load the missing type and retry on [`Error::NotRegistered`], reject
/// the input on [`Error::MalformedText`] or [`Error::EnvelopeShape`], treat
/// [`Error::Decode`] and [`Error::Encode`] as a bug in the type's own
/// conversions.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not valid JSON text. Surfaces the parser's own error.
    #[error(transparent)]
    MalformedText(serde_json::Error),

    /// The input is valid JSON but not a `[name, payload, ..]` array.
    #[error("not a valid encoded envelope: {0}")]
    EnvelopeShape(String),

    /// No type is registered under the envelope's type name.
    #[error("type not registered: {0}")]
    NotRegistered(String),

    /// The registered type rejected the payload.
    #[error("failed to decode {type_name}: {source}")]
    Decode {
        type_name: String,
        #[source]
        source: BoxError,
    },

    /// The object could not be projected or rendered.
    #[error("failed to encode {type_name}: {source}")]
    Encode {
        type_name: String,
        #[source]
        source: BoxError,
    },

    /// Another type is already registered under the same name.
    #[error("type name {name} is already registered by {existing}, cannot register {incoming}")]
    NameCollision {
        name: String,
        existing: &'static str,
        incoming: &'static str,
    },

    /// The decoded object is not of the requested type.
    #[error("expected {expected}, decoded {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    pub fn is_malformed_text(&self) -> bool {
        matches!(self, Error::MalformedText(_))
    }

    pub fn is_envelope_shape(&self) -> bool {
        matches!(self, Error::EnvelopeShape(_))
    }

    pub fn is_not_registered(&self) -> bool {
        matches!(self, Error::NotRegistered(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    pub fn is_encode(&self) -> bool {
        matches!(self, Error::Encode { .. })
    }
}

impl From<envelope::error::Error> for Error {
    fn from(err: envelope::error::Error) -> Self {
        match err {
            envelope::error::Error::Malformed(e) => Error::MalformedText(e),
            envelope::error::Error::Shape(reason) => Error::EnvelopeShape(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
