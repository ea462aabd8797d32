//! Infrastructure layer for Harzo Gen.
//!
//! Concrete storage adapters (in-memory and file-backed key-value stores,
//! the history repository over them), the data URI codec, path management,
//! and configuration/secret loading.

pub mod config_service;
pub mod data_uri_codec;
pub mod history_store;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::data_uri_codec::DataUriCodec;
pub use crate::history_store::KeyValueHistoryStore;
pub use crate::paths::HarzoPaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
