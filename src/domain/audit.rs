//! Audit log domain model
//!
//! Audit rows are tenant-level: queries scope by `al.tenant_id` only and
//! never by store.

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Audit log entry joined with the acting user (`audit_log` + `users`)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub user_id: Option<StringUuid>,
    pub tabel: String,
    pub record_id: String,
    pub aksi: String,
    pub data_lama: Option<serde_json::Value>,
    pub data_baru: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_nama: Option<String>,
    pub dibuat_pada: DateTime<Utc>,
}

/// Input for appending an audit log entry
#[derive(Debug, Clone)]
pub struct CreateAuditLogInput {
    pub user_id: Option<StringUuid>,
    pub tabel: String,
    pub record_id: String,
    pub aksi: String,
    pub data_lama: Option<serde_json::Value>,
    pub data_baru: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

/// Audit log search parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchAuditQuery {
    pub search: Option<String>,
    pub user_id: Option<StringUuid>,
    pub tabel: Option<String>,
    pub aksi: Option<String>,
    pub record_id: Option<String>,
    pub tanggal_dari: Option<String>,
    pub tanggal_sampai: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One row of the per-action activity summary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditActivitySummary {
    pub aksi: String,
    pub tabel: String,
    pub jumlah_aktivitas: i64,
    pub jumlah_user: i64,
}
