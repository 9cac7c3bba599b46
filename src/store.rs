mod errors;
mod internal;

pub use errors::StoreError;
pub use internal::{MemoryStoreIo, ProductionSessionStore, SessionStore, StoreIo};
