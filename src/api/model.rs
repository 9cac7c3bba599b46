use serde::{Deserialize, Serialize};
use crate::util::StrExt;

/// Fields the session core extracts from sign-in and sign-up responses.
/// Anything else the backend sends is ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthResponse {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub user: Option<UserProfile>,
    pub username: Option<String>,
    /// Free-form rejection payload; objects are stringified for display.
    pub error: Option<serde_json::Value>,
    /// Rejection message in the backend's usual shape.
    pub detail: Option<String>,
}

impl AuthResponse {
    /// The server's rejection message, if the response carries one:
    /// first non-blank of `detail` and `error`.
    pub fn error_message(&self) -> Option<String> {
        if let Some(message) =
            self.detail.as_deref().and_then(|d| d.nonblank_to_some())
        {
            return Some(message);
        }
        match &self.error {
            Some(serde_json::Value::String(message)) => message.nonblank_to_some(),
            Some(serde_json::Value::Null) | None => None,
            Some(value) => Some(value.to_string()),
        }
    }
}

/// Profile payload from the backend. The core reads `username` and
/// `is_staff`; the rest is carried for the embedding UI.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub customer: Option<CustomerProfile>,
}

fn default_is_active() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CustomerProfile {
    pub business: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
    pub customer: Option<CustomerSignUp>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CustomerSignUp {
    pub business: String,
    pub years: u32,
    pub phone: u64,
    pub description: String,
    pub industry: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Serialize)]
pub(super) struct SignOutRequest<'a> {
    pub refresh: &'a str,
}
