//! Data access layer (Repository pattern)
//!
//! Every repository owns its SQL text and table aliases and runs it through
//! [`apply_scope_to_sql`](crate::scope::apply_scope_to_sql) before
//! execution, so tenant isolation is applied in exactly one way everywhere.

pub mod audit;
pub mod directory;
pub mod master_data;
pub mod stock_take;
pub mod system_config;

pub use audit::AuditRepository;
pub use directory::DirectoryRepository;
pub use master_data::MasterDataRepository;
pub use stock_take::StockTakeRepository;
pub use system_config::SystemConfigRepository;
