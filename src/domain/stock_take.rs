//! Stock take (stok opname) domain model
//!
//! A counting session is always bound to one store; opening one without a
//! store context is the canonical `MissingStoreContext` case.

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockTakeStatus {
    #[default]
    Berjalan,
    Selesai,
    Dibatalkan,
}

impl std::str::FromStr for StockTakeStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "berjalan" => Ok(StockTakeStatus::Berjalan),
            "selesai" => Ok(StockTakeStatus::Selesai),
            "dibatalkan" => Ok(StockTakeStatus::Dibatalkan),
            _ => Err(format!("Unknown stock take status: {}", s)),
        }
    }
}

impl std::fmt::Display for StockTakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockTakeStatus::Berjalan => write!(f, "berjalan"),
            StockTakeStatus::Selesai => write!(f, "selesai"),
            StockTakeStatus::Dibatalkan => write!(f, "dibatalkan"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for StockTakeStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for StockTakeStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for StockTakeStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// Stock take session (`stok_opname` table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockTakeSession {
    pub id: StringUuid,
    pub tenant_id: StringUuid,
    pub toko_id: StringUuid,
    pub user_id: StringUuid,
    pub catatan: Option<String>,
    pub status: StockTakeStatus,
    pub dimulai_pada: DateTime<Utc>,
    pub selesai_pada: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OpenStockTakeInput {
    #[validate(length(max = 500))]
    pub catatan: Option<String>,
}
