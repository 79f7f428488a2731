//! Business logic services
//!
//! Services are generic over their repository traits so unit tests can run
//! against mocks. They own validation, authorization above row level, and
//! the single-write vs broadcast branching; repositories own the SQL.

pub mod audit;
pub mod master_data;
pub mod scope;
pub mod stock_take;
pub mod store;
pub mod system_config;

pub use audit::AuditService;
pub use master_data::MasterDataService;
pub use scope::{ScopeCapabilities, ScopeService};
pub use stock_take::StockTakeService;
pub use store::StoreService;
pub use system_config::SystemConfigService;

use crate::scope::BulkWriteSummary;
use serde::Serialize;

/// Result of a create that may have been expanded by a broadcast flag.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreateOutcome<T> {
    /// One row, returned directly.
    Single(T),
    /// The write fanned out; callers wanting the rows re-query per target.
    Broadcast(BulkWriteSummary),
}

impl<T> CreateOutcome<T> {
    pub fn is_broadcast(&self) -> bool {
        matches!(self, CreateOutcome::Broadcast(_))
    }
}
