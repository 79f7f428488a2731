//! HTTP middleware for TokoPOS Core
//!
//! Only the scope seam lives here: the extractor that resolves an
//! [`AccessScope`](crate::scope::AccessScope) per request and the
//! store-context guard. Authentication itself is owned by the HTTP layer.

pub mod scope;

pub use scope::require_store_when_needed;
