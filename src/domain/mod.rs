//! Domain models for TokoPOS Core

pub mod audit;
pub mod common;
pub mod master_data;
pub mod principal;
pub mod stock_take;
pub mod store;
pub mod system_config;
pub mod tenant;

pub use audit::*;
pub use common::*;
pub use master_data::*;
pub use principal::*;
pub use stock_take::*;
pub use store::*;
pub use system_config::*;
pub use tenant::*;
