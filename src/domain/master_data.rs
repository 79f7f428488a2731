//! Master data domain models: categories, brands, suppliers
//!
//! These tables all carry `tenant_id` plus a nullable `toko_id`, which makes
//! them the canonical consumers of query scoping and bulk-apply expansion.

use super::common::{RecordStatus, StringUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Product category (`kategori` table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub toko_id: Option<StringUuid>,
    pub nama: String,
    pub deskripsi: Option<String>,
    pub urutan: i32,
    pub status: RecordStatus,
    pub dibuat_pada: DateTime<Utc>,
    pub diperbarui_pada: DateTime<Utc>,
}

impl Default for Category {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            tenant_id: StringUuid::new_v4(),
            toko_id: None,
            nama: String::new(),
            deskripsi: None,
            urutan: 0,
            status: RecordStatus::default(),
            dibuat_pada: now,
            diperbarui_pada: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
    pub deskripsi: Option<String>,
    pub urutan: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub nama: Option<String>,
    pub deskripsi: Option<String>,
    pub urutan: Option<i32>,
    pub status: Option<RecordStatus>,
}

/// Product brand (`brand` table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub toko_id: Option<StringUuid>,
    pub nama: String,
    pub deskripsi: Option<String>,
    pub website: Option<String>,
    pub status: RecordStatus,
    pub dibuat_pada: DateTime<Utc>,
    pub diperbarui_pada: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBrandInput {
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
    pub deskripsi: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

/// Supplier (`supplier` table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub toko_id: Option<StringUuid>,
    pub nama: String,
    pub kontak: Option<String>,
    pub telepon: Option<String>,
    pub alamat: Option<String>,
    pub status: RecordStatus,
    pub dibuat_pada: DateTime<Utc>,
    pub diperbarui_pada: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 150))]
    pub nama: String,
    pub kontak: Option<String>,
    pub telepon: Option<String>,
    pub alamat: Option<String>,
}
