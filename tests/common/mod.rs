use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use time::OffsetDateTime;
use dashauth::api::{
    ApiError, AuthApi, AuthResponse, SignInRequest, SignUpRequest, UserProfile,
};
use dashauth::config::AuthConfig;
use dashauth::session::Navigator;
use dashauth::store::{StoreError, StoreIo};

/// Backend stub an embedder would write: one scripted sign-in response,
/// everything else rejected.
pub struct StubBackend {
    pub sign_in_response: Mutex<Option<AuthResponse>>,
    pub revoked: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn with_sign_in(response: AuthResponse) -> Arc<StubBackend> {
        Arc::new(StubBackend {
            sign_in_response: Mutex::new(Some(response)),
            revoked: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl AuthApi for StubBackend {
    async fn sign_in(
        &self,
        _request: &SignInRequest,
    ) -> Result<AuthResponse, ApiError> {
        Ok(self.sign_in_response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| AuthResponse {
                detail: Some("No active account found".into()),
                ..AuthResponse::default()
            }))
    }

    async fn sign_up(
        &self,
        _request: &SignUpRequest,
    ) -> Result<AuthResponse, ApiError> {
        Ok(AuthResponse {
            detail: Some("Sign-up is closed".into()),
            ..AuthResponse::default()
        })
    }

    async fn sign_out(&self, refresh_token: &str) -> Result<(), ApiError> {
        self.revoked.lock().unwrap().push(refresh_token.to_owned());
        Ok(())
    }

    async fn fetch_profile(
        &self,
        _access_token: &str,
    ) -> Result<UserProfile, ApiError> {
        Err(ApiError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}

/// Session storage an embedder backs with the platform store; the test
/// keeps a handle to observe and corrupt it from outside the manager.
#[derive(Clone, Default)]
pub struct SharedStoreIo {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl SharedStoreIo {
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.values.lock().unwrap().insert(key.to_owned(), value.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }
}

impl StoreIo for SharedStoreIo {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.lock().unwrap().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.values.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_owned());
    }
}

pub fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "exp": exp }).to_string());
    format!("{header}.{payload}.stub-signature")
}

pub fn fresh_token() -> String {
    token_with_exp(OffsetDateTime::now_utc().unix_timestamp() + 3600)
}

pub fn stale_token() -> String {
    token_with_exp(1_000)
}

pub fn test_user() -> UserProfile {
    UserProfile {
        id: 42,
        username: "CUS-XYZ789".into(),
        first_name: "Sam".into(),
        last_name: "Mason".into(),
        email: "sam@example.com".into(),
        is_staff: false,
        is_active: true,
        customer: None,
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        base_url: "https://api.test/".into(),
        ..AuthConfig::default()
    }
}
