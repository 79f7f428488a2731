//! System configuration domain model (`konfigurasi_sistem` table)
//!
//! Configuration entries exist per tenant; a row with a `toko_id` overrides
//! the tenant-wide value for that store.

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConfigEntry {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub toko_id: Option<StringUuid>,
    pub kunci: String,
    pub nilai: String,
    pub deskripsi: Option<String>,
    pub dibuat_pada: DateTime<Utc>,
    pub diperbarui_pada: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertConfigInput {
    #[validate(length(min = 1, max = 100))]
    pub kunci: String,
    #[validate(length(max = 4096))]
    pub nilai: String,
    pub deskripsi: Option<String>,
}
