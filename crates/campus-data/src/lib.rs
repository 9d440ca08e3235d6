//! Data store access for the campus marketplace.
//!
//! This crate provides:
//! - `DataStore` - The async store collaborator consumed by page controllers
//! - `InMemoryStore` - A process-local store sharing the client predicates
//! - `PolicyStore` - Timeout and retry around any store
//! - `FetchError` - The only hard error the listing pipeline can surface

mod error;
mod memory;
mod policy;
mod request;
mod store;

pub use error::*;
pub use memory::*;
pub use policy::*;
pub use request::*;
pub use store::*;
