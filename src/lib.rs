//! Uploads a vocabulary CSV into a Firestore collection, one document per term.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parsers;
pub mod services;

pub use config::{FirestoreConfig, UploadConfig};
pub use error::{LoadError, StoreError, UploadError};
pub use model::document::{DocumentId, VocabDocument};
pub use services::firestore::FirestoreStore;
pub use services::pipeline::{run, Progress, UploadReport};
pub use services::store::{DocumentStore, MemoryStore};
