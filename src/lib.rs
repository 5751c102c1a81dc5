//! modeldeck - per-provider model registry for AI coding agents
//!
//! Each agent provider (Claude, Cursor, Codex) ships a fixed list of built-in
//! models. modeldeck merges that list with the models a user adds by hand,
//! keeps the custom entries in a durable key-value store, and carries the
//! settings for routing Claude through a custom backend.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod manage;
pub mod model;
pub mod paths;
pub mod provider;
pub mod registry;
pub mod store;

pub use backend::CustomBackend;
pub use catalog::{CatalogEntry, CatalogError, ModelCatalog};
pub use config::Config;
pub use manage::{ManageModelsState, ModelRow};
pub use model::ModelOption;
pub use provider::{ParseProviderError, Provider};
pub use registry::{ModelRegistry, merge_models};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
