use std::path::Path;
use figment::Figment;
use serde::{Deserialize, Serialize};
use crate::config::figment::FigmentExt;
use crate::lib_constants::{
    DEFAULT_HOME_ROUTE, DEFAULT_LIVENESS_INTERVAL_SECS, DEFAULT_RATE_LIMIT_MAX_REQUESTS,
    DEFAULT_RATE_LIMIT_WINDOW_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the backend REST API, e.g. `https://api.example.com/`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub liveness_interval_secs: u64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    /// Route the UI is sent to after every sign-out.
    pub home_route: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            base_url: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            liveness_interval_secs: DEFAULT_LIVENESS_INTERVAL_SECS,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            home_route: DEFAULT_HOME_ROUTE.to_owned(),
        }
    }
}

impl AuthConfig {
    /// Load the configuration: defaults, then [config_file], then
    /// `DASHAUTH_`-prefixed environment variables.
    pub fn load(config_file: impl AsRef<Path>) -> Result<AuthConfig, ::figment::Error> {
        Figment::new()
            .setup_auth_config(config_file)
            .extract()
    }
}
