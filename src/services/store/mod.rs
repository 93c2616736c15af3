pub mod client;
pub mod memory;
pub mod postgres;

pub use client::{Collection, Document, DocumentStore, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
