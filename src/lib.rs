//! TokoPOS Core
//!
//! Multi-tenant back office core for a retail POS platform. The heart of the
//! crate is the [`scope`] module: every read runs through
//! [`scope::apply_scope_to_sql`] and every write is stamped by
//! [`scope::resolve_for_insert`] or expanded by
//! [`scope::BulkApplyExpander`], so tenant isolation lives in exactly one
//! place. The feature services (store directory, master data, audit,
//! configuration, stock take) are its consumers.

pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod scope;
pub mod service;

pub use config::Config;
pub use error::{AppError, Result};
