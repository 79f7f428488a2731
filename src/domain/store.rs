//! Store (toko) domain model

use super::common::{RecordStatus, StringUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Store entity (`toko` table); every store belongs to exactly one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Store {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub kode: String,
    pub nama: String,
    pub alamat: Option<String>,
    pub telepon: Option<String>,
    pub status: RecordStatus,
    pub dibuat_pada: DateTime<Utc>,
    pub diperbarui_pada: DateTime<Utc>,
}

impl Default for Store {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            tenant_id: StringUuid::new_v4(),
            kode: String::new(),
            nama: String::new(),
            alamat: None,
            telepon: None,
            status: RecordStatus::default(),
            dibuat_pada: now,
            diperbarui_pada: now,
        }
    }
}

/// Input for creating a new store
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoreInput {
    #[validate(length(min = 1, max = 20), custom(function = "validate_kode"))]
    pub kode: String,
    #[validate(length(min = 1, max = 255))]
    pub nama: String,
    pub alamat: Option<String>,
    pub telepon: Option<String>,
}

/// Validate store code format (uppercase alphanumeric with hyphens)
fn validate_kode(kode: &str) -> Result<(), validator::ValidationError> {
    if KODE_REGEX.is_match(kode) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_kode"))
    }
}

/// Search parameters for the store directory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchStoreQuery {
    pub search: Option<String>,
    pub status: Option<RecordStatus>,
    pub kode: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Store row as seen by the scope directory, with the caller's broadcast
/// capability attached.
#[derive(Debug, Clone, Serialize)]
pub struct AccessibleStore {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub nama: String,
    pub status: RecordStatus,
    pub can_apply_to_all: bool,
}

// Regex for store code validation
lazy_static::lazy_static! {
    pub static ref KODE_REGEX: regex::Regex = regex::Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)*$").unwrap();
}
