mod gcs_store;
mod local_store;

pub use gcs_store::GcsDocumentStore;
pub use local_store::LocalDocumentStore;
