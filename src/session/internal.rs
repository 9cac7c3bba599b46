use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::watch;
use crate::api::{
    AuthApi, AuthResponse, CustomerSignUp, HttpAuthApi, SignInRequest,
    SignUpRequest, UserProfile,
};
use crate::config::AuthConfig;
use crate::lib_constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY};
use crate::rate_limit::RateLimiter;
use crate::session::errors::SessionError;
use crate::session::liveness::LivenessHandle;
use crate::session::model::Session;
use crate::store::{MemoryStoreIo, SessionStore, StoreIo};
use crate::token;
use crate::validation::{sanitize_input, validate_password};


/// Where the UI shell is sent after every sign-out. Implemented by the
/// embedding application; a full navigation flushes any residual state
/// held by components outside this core.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: &str);
}

/// The injectable session service: the single owner of login state.
#[async_trait]
pub trait SessionManager: Send + Sync + 'static {
    /// Snapshot of the current session.
    fn get_session(&self) -> Session;

    /// Watch session transitions; the receiver always holds the latest
    /// state.
    fn subscribe(&self) -> watch::Receiver<Session>;

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError>;

    async fn sign_up(
        &self,
        request: SignUpRequest,
    ) -> Result<Session, SessionError>;

    /// Best-effort server-side revoke, then unconditional local cleanup.
    async fn sign_out(&self);

    /// Re-fetch the signed-in user's profile and update the session.
    async fn refresh_profile(&self) -> Result<Session, SessionError>;
}

pub type ProductionSessionManager<N> =
    SessionManagerImpl<HttpAuthApi, MemoryStoreIo, N>;

pub struct SessionManagerImpl<A: AuthApi, Io: StoreIo + 'static, N: Navigator> {
    api: A,
    store: SessionStore<Io>,
    limiter: RateLimiter,
    navigator: N,
    config: AuthConfig,
    state: watch::Sender<Session>,
}

impl<N: Navigator> ProductionSessionManager<N> {
    pub fn new(
        config: AuthConfig,
        navigator: N,
    ) -> Result<ProductionSessionManager<N>, SessionError> {
        let api = HttpAuthApi::new(&config)?;
        Ok(SessionManagerImpl::with_collaborators(
            config,
            api,
            SessionStore::new(MemoryStoreIo::default()),
            navigator,
        ))
    }
}

impl<A: AuthApi, Io: StoreIo + 'static, N: Navigator> SessionManagerImpl<A, Io, N> {
    /// Build the manager and rehydrate the session from [store] before
    /// anything can observe the state: the store reads are synchronous,
    /// so no consumer ever sees a pre-bootstrap session.
    pub fn with_collaborators(
        config: AuthConfig,
        api: A,
        store: SessionStore<Io>,
        navigator: N,
    ) -> SessionManagerImpl<A, Io, N> {
        let limiter = RateLimiter::new(&config);
        let (state, _) = watch::channel(Session::logged_out());
        let manager = SessionManagerImpl {
            api,
            store,
            limiter,
            navigator,
            config,
            state,
        };
        manager.rehydrate();
        manager
    }

    /// Start the periodic token-freshness check. The interval restarts on
    /// every transition into the logged-in state and idles while logged
    /// out. Cancel (or drop) the handle on teardown.
    pub fn spawn_liveness(self: Arc<Self>) -> LivenessHandle {
        let task = tokio::spawn(async move { self.liveness_loop().await });
        LivenessHandle::new(&task)
    }

    fn rehydrate(&self) {
        let access = self.store.get_string(ACCESS_TOKEN_KEY);
        let user = self.store.get_json::<UserProfile>(USER_DATA_KEY);
        match (access, user) {
            (None, None) => debug!("no persisted session to restore"),
            (Some(access), Some(user)) if !token::is_expired(&access) => {
                info!("restored session for user \"{}\"", user.username);
                self.set_state(Session::logged_in(user));
            }
            _ => {
                info!("discarding stale persisted session");
                self.store.clear();
            }
        }
    }

    /// One acceptance rule for every response that may carry tokens. A
    /// rejected or malformed response returns before the first store
    /// write, leaving store and state untouched.
    fn accept_auth_response(
        &self,
        response: AuthResponse,
    ) -> Result<Session, SessionError> {
        if let Some(message) = response.error_message() {
            warn!("backend rejected the request: {message}");
            return Err(SessionError::Rejected(message));
        }
        let AuthResponse {
            access,
            refresh,
            user,
            username,
            ..
        } = response;
        let access = access.ok_or(SessionError::MalformedResponse("access"))?;
        let refresh = refresh.ok_or(SessionError::MalformedResponse("refresh"))?;
        let Some(user) = user else {
            if let Some(username) = username {
                warn!("response for \"{username}\" carries no user profile");
            }
            return Err(SessionError::MalformedResponse("user"));
        };
        if token::is_expired(&access) {
            warn!("backend returned an already-expired access token");
            return Err(SessionError::ExpiredToken);
        }
        self.store.set_string(ACCESS_TOKEN_KEY, &access);
        self.store.set_string(REFRESH_TOKEN_KEY, &refresh);
        self.store.set_json(USER_DATA_KEY, &user);
        info!("signed in as \"{}\"", user.username);
        let session = Session::logged_in(user);
        self.set_state(session.clone());
        Ok(session)
    }

    /// Clear everything, everywhere, and send the UI home. Every path
    /// that ends a session converges here, so partial auth state cannot
    /// survive a failure.
    fn reset_session(&self) {
        self.store.clear();
        self.set_state(Session::logged_out());
        self.navigator.navigate(&self.config.home_route);
    }

    async fn check_stored_token(&self) {
        let fresh = self.store
            .get_string(ACCESS_TOKEN_KEY)
            .is_some_and(|access| !token::is_expired(&access));
        if !fresh {
            info!("access token missing or expired, signing out");
            self.sign_out().await;
        }
    }

    async fn liveness_loop(self: Arc<Self>) {
        let period = Duration::from_secs(self.config.liveness_interval_secs);
        let mut sessions = self.subscribe();
        loop {
            while !sessions.borrow_and_update().is_logged_in {
                if sessions.changed().await.is_err() {
                    return;
                }
            }
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // the zeroth tick fires immediately
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        self.check_stored_token().await;
                    }
                    changed = sessions.changed() => match changed {
                        Ok(()) => {
                            if !sessions.borrow_and_update().is_logged_in {
                                break;
                            }
                        }
                        Err(_) => return,
                    },
                }
            }
        }
    }

    fn set_state(&self, session: Session) {
        self.state.send_replace(session);
    }
}

#[async_trait]
impl<A: AuthApi, Io: StoreIo + 'static, N: Navigator> SessionManager
    for SessionManagerImpl<A, Io, N>
{
    fn get_session(&self) -> Session {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        let email = sanitize_input(email);
        debug!("signing in \"{email}\"");
        if !self.limiter.check(&email) {
            return Err(SessionError::RateLimited);
        }
        let request = SignInRequest {
            email,
            password: password.to_owned(),
        };
        let response = self.api.sign_in(&request).await?;
        self.accept_auth_response(response)
    }

    async fn sign_up(
        &self,
        request: SignUpRequest,
    ) -> Result<Session, SessionError> {
        let check = validate_password(&request.password);
        if !check.is_valid {
            return Err(SessionError::InvalidPassword(check.message));
        }
        let request = sanitize_sign_up(request);
        debug!("signing up \"{}\"", request.email);
        if !self.limiter.check(&request.email) {
            return Err(SessionError::RateLimited);
        }
        let response = self.api.sign_up(&request).await?;
        self.accept_auth_response(response)
    }

    async fn sign_out(&self) {
        match self.store.get_string(REFRESH_TOKEN_KEY) {
            Some(refresh) => {
                // best effort: the local session dies either way
                if let Err(e) = self.api.sign_out(&refresh).await {
                    warn!("server-side sign-out failed: {e}");
                }
            }
            None => debug!("no refresh token to revoke"),
        }
        self.reset_session();
        info!("signed out");
    }

    async fn refresh_profile(&self) -> Result<Session, SessionError> {
        if !self.get_session().is_logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        let access = self.store
            .get_string(ACCESS_TOKEN_KEY)
            .ok_or(SessionError::NotLoggedIn)?;
        let user = self.api.fetch_profile(&access).await?;
        self.store.set_json(USER_DATA_KEY, &user);
        debug!("refreshed profile for \"{}\"", user.username);
        let session = Session::logged_in(user);
        self.set_state(session.clone());
        Ok(session)
    }
}

/// Escape the free-text fields before transmission. The password stays
/// verbatim: escaping would corrupt it.
fn sanitize_sign_up(request: SignUpRequest) -> SignUpRequest {
    SignUpRequest {
        first_name: sanitize_input(&request.first_name),
        last_name: sanitize_input(&request.last_name),
        email: sanitize_input(&request.email),
        password: request.password,
        is_staff: request.is_staff,
        customer: request.customer.map(|customer| CustomerSignUp {
            business: sanitize_input(&customer.business),
            years: customer.years,
            phone: customer.phone,
            description: sanitize_input(&customer.description),
            industry: sanitize_input(&customer.industry),
            city: sanitize_input(&customer.city),
            state: sanitize_input(&customer.state),
            country: sanitize_input(&customer.country),
        }),
    }
}
