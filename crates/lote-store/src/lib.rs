//! Persistence backends for the import pipeline.
//!
//! The pipeline talks to one [`Repository`]; what sits behind it is
//! composition: the remote API, the local durable outbox, or the remote
//! decorated with the local fallback so operator work is never silently
//! lost when the server is unreachable.

mod error;
mod fallback;
mod local;
mod memory;
mod remote;
mod repository;

pub use error::StoreError;
pub use fallback::FallbackStore;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use repository::{CommitTier, Created, Repository};
