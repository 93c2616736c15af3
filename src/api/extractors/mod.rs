pub mod auth_ctx;
pub mod doc_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use doc_id::DocId;
