use time::Duration;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_DATA_KEY: &str = "user_data";

/// Clock-skew allowance when classifying token expiry.
pub const EXPIRY_LEEWAY: Duration = Duration::seconds(60);

pub const APP_CONFIG_ENV_PREFIX: &str = "DASHAUTH_";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LIVENESS_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: usize = 100;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_HOME_ROUTE: &str = "/";
