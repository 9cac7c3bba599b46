use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessTokenDecodeError {
    #[error("token has no payload segment")]
    PayloadMissing,

    #[error("token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not a claims object: {0}")]
    PayloadParse(#[from] serde_json::Error),
}
