//! Session state and its persistence.
//!
//! ## Session
//!
//! The authoritative aggregate: board, `won`, `over`, remaining time and the
//! unlock flag.
//!
//! ## Persistence
//!
//! `SessionStore` maps the five fields, plus the spawn RNG position, onto
//! independent keys of any `KeyValueStore`. `MemoryStore` keeps them in a map; `FileStore` keeps them
//! in one file on disk.

pub mod error;
pub mod file;
pub mod state;
pub mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use state::Session;
pub use store::{KeyValueStore, MemoryStore, SessionKeys, SessionStore};
