use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use crate::config::AuthConfig;

mod errors;
mod model;


pub use errors::ApiError;
pub use model::{
    AuthResponse, CustomerProfile, CustomerSignUp, SignInRequest, SignUpRequest,
    UserProfile,
};

pub const SIGN_IN_ENDPOINT: &str = "users/sign-in/";
pub const SIGN_UP_ENDPOINT: &str = "users/sign-up/";
pub const SIGN_OUT_ENDPOINT: &str = "users/sign-out/";
pub const PROFILE_ENDPOINT: &str = "users/profile/";

/// The backend REST API as seen by the session core. Bodies are opaque
/// JSON; only the fields in [AuthResponse] and [UserProfile] are read.
#[async_trait]
pub trait AuthApi: Send + Sync + 'static {
    async fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> Result<AuthResponse, ApiError>;

    async fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> Result<AuthResponse, ApiError>;

    /// Revoke the session behind [refresh_token].
    async fn sign_out(&self, refresh_token: &str) -> Result<(), ApiError>;

    async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<UserProfile, ApiError>;
}

#[async_trait]
impl<T: AuthApi + ?Sized> AuthApi for Arc<T> {
    async fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> Result<AuthResponse, ApiError> {
        (**self).sign_in(request).await
    }

    async fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> Result<AuthResponse, ApiError> {
        (**self).sign_up(request).await
    }

    async fn sign_out(&self, refresh_token: &str) -> Result<(), ApiError> {
        (**self).sign_out(refresh_token).await
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<UserProfile, ApiError> {
        (**self).fetch_profile(access_token).await
    }
}

pub type ProductionAuthApi = HttpAuthApi;

pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(config: &AuthConfig) -> Result<HttpAuthApi, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(HttpAuthApi { client, base_url })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sign-in and sign-up share a response shape. Rejections with a JSON
    /// body parse into an [AuthResponse] carrying the server's message, so
    /// only transport and nonsense bodies surface as errors here.
    async fn post_auth(
        &self,
        endpoint: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<AuthResponse, ApiError> {
        let response = self.client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        debug!("{endpoint} answered {status}");
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.post_auth(SIGN_IN_ENDPOINT, request).await
    }

    async fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.post_auth(SIGN_UP_ENDPOINT, request).await
    }

    async fn sign_out(&self, refresh_token: &str) -> Result<(), ApiError> {
        let response = self.client
            .post(self.url(SIGN_OUT_ENDPOINT))
            .json(&model::SignOutRequest {
                refresh: refresh_token,
            })
            .send()
            .await?;
        let status = response.status();
        debug!("{SIGN_OUT_ENDPOINT} answered {status}");
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(())
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<UserProfile, ApiError> {
        let response = self.client
            .get(self.url(PROFILE_ENDPOINT))
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();
        debug!("{PROFILE_ENDPOINT} answered {status}");
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
