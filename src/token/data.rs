use serde::Deserialize;

/// Claims read from an access token payload. Only `exp` is inspected
/// client-side; every other claim is opaque backend data and ignored.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Expiry as seconds since the Unix epoch.
    pub exp: Option<f64>,
}
