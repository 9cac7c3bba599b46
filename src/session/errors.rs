use thiserror::Error;
use crate::api::ApiError;

/// User-visible failures of the sign-in, sign-up and profile flows. The
/// `Display` string of each variant is the message to surface.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// The backend rejected the request with its own message.
    #[error("{0}")]
    Rejected(String),

    #[error("The server response is missing the \"{0}\" field.")]
    MalformedResponse(&'static str),

    #[error("The returned access token is already expired.")]
    ExpiredToken,

    #[error("{0}")]
    InvalidPassword(&'static str),

    #[error("Not signed in.")]
    NotLoggedIn,

    #[error("An error occurred. Please try again later.")]
    Api(#[from] ApiError),
}
