//! Local persistence for drafts and the access token.

pub mod factory;
mod kv;

pub use factory::{MemoryStoreFactory, StoreConfig, StoreFactory, StoreRegistry};
pub use kv::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore, StoreError, draft_key};
