pub mod encoding;
pub mod firestore;
pub mod mapper;
pub mod pipeline;
pub mod store;
