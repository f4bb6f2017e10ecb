//! Errors surfaced by editor commands.
//!
//! Geometry and history never fail; everything here comes from talking to a
//! collaborator (work store, inference service) or from user input that the
//! caller should correct.

/// Failure of a session command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad user input: blank title, blank prompt, nothing to save.
    #[error("{0}")]
    Validation(String),
    /// The store or the inference service failed.
    #[error("upstream service failed: {0}")]
    Upstream(String),
    /// The generation reply did not contain a valid block batch.
    #[error("malformed generation reply: {0}")]
    Format(String),
    /// A write or owner listing was attempted while signed out.
    #[error("sign in required")]
    AuthRequired,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}
