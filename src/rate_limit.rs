use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use log::warn;
use time::{Duration, OffsetDateTime};
use crate::config::AuthConfig;


trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

pub type RateLimiter = RateLimiterImpl<SystemClock>;

/// Fixed-window request throttle keyed by caller identifier.
///
/// Advisory only: state is process-local and resets with the process, so
/// this smooths the UI but enforces nothing. The backend keeps the
/// authoritative limits.
#[allow(private_bounds)]
pub struct RateLimiterImpl<C: Clock> {
    clock: C,
    window: Duration,
    max_requests: usize,
    requests: Mutex<HashMap<String, Vec<OffsetDateTime>>>,
}

impl RateLimiter {
    pub fn new(config: &AuthConfig) -> RateLimiter {
        RateLimiterImpl::with_clock(config, SystemClock)
    }
}

#[allow(private_bounds)]
impl<C: Clock> RateLimiterImpl<C> {
    fn with_clock(config: &AuthConfig, clock: C) -> RateLimiterImpl<C> {
        RateLimiterImpl {
            clock,
            window: Duration::seconds(config.rate_limit_window_secs as i64),
            max_requests: config.rate_limit_max_requests,
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a request for [identifier] is allowed right now. A denied
    /// request is not recorded against the window.
    pub fn check(&self, identifier: &str) -> bool {
        let now = self.clock.now();
        let mut requests = self.guard();
        let timestamps = requests.entry(identifier.to_owned()).or_default();
        timestamps.retain(|timestamp| now - *timestamp < self.window);
        if timestamps.len() >= self.max_requests {
            warn!("rate limit hit for \"{identifier}\"");
            return false;
        }
        timestamps.push(now);
        true
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<String, Vec<OffsetDateTime>>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
