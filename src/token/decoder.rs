use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use errors::AccessTokenDecodeError;
use log::debug;
use time::OffsetDateTime;
use crate::lib_constants::EXPIRY_LEEWAY;
use crate::token::data::AccessClaims;

pub mod errors;

#[cfg(test)] mod tests;

/// Decode the claims of a JWT-shaped [token] without verifying its
/// signature. This is a client-side hint, not a security boundary: the
/// backend is the only party that verifies tokens.
///
/// # Errors
/// All possible error values signify [token] data this client cannot read.
pub fn decode_claims(token: &str) -> Result<AccessClaims, AccessTokenDecodeError> {
    let payload = token.split('.')
        .nth(1)
        .ok_or(AccessTokenDecodeError::PayloadMissing)?;
    let payload = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&payload)?)
}

/// Whether [token] must be treated as expired. The [EXPIRY_LEEWAY] buffer
/// absorbs client/server clock skew.
///
/// Never fails: undecodable tokens and tokens without an `exp` claim are
/// expired.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, OffsetDateTime::now_utc())
}

pub(crate) fn is_expired_at(token: &str, now: OffsetDateTime) -> bool {
    let claims = match decode_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("treating undecodable access token as expired: {e}");
            return true;
        }
    };
    match claims.exp {
        Some(exp) => {
            exp <= (now.unix_timestamp() + EXPIRY_LEEWAY.whole_seconds()) as f64
        }
        None => {
            debug!("access token carries no exp claim, treating as expired");
            true
        }
    }
}
