//! Tenant domain model

use super::common::{RecordStatus, StringUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Tenant entity (`tenants` table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: StringUuid,
    pub nama: String,
    pub status: RecordStatus,
    pub dibuat_pada: DateTime<Utc>,
    pub diperbarui_pada: DateTime<Utc>,
}

impl Default for Tenant {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            nama: String::new(),
            status: RecordStatus::default(),
            dibuat_pada: now,
            diperbarui_pada: now,
        }
    }
}

/// Input for creating a new tenant
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTenantInput {
    #[validate(length(min = 1, max = 255))]
    pub nama: String,
}

/// Tenant row as seen by the scope directory, with the caller's broadcast
/// capability attached (`canApplyToAll` in the API payload).
#[derive(Debug, Clone, Serialize)]
pub struct AccessibleTenant {
    pub id: StringUuid,
    pub nama: String,
    pub status: RecordStatus,
    pub can_apply_to_all: bool,
}
