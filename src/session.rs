mod errors;
mod internal;
mod liveness;
mod model;

pub use errors::SessionError;
pub use internal::{
    Navigator, ProductionSessionManager, SessionManager, SessionManagerImpl,
};
pub use liveness::LivenessHandle;
pub use model::Session;
