use thiserror::Error;

/// Errors that can occur when parsing an envelope.
///
/// An envelope is a JSON array whose first element is the type name and
/// whose second element is the payload.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not valid JSON text. Passed through from `serde_json`.
    #[error(transparent)]
    Malformed(serde_json::Error),

    /// The input is valid JSON but not a `[name, payload, ..]` array.
    #[error("not a valid encoded envelope: {0}")]
    Shape(String),
}
