//! Common types for domain models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// UUID stored as CHAR(36), the way the back office schema keeps its keys.
/// sqlx's `uuid` feature assumes BINARY(16), so the sqlx traits are
/// implemented by hand over the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringUuid(pub Uuid);

impl StringUuid {
    pub fn new_v4() -> Self {
        StringUuid(Uuid::new_v4())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for StringUuid {
    fn from(uuid: Uuid) -> Self {
        StringUuid(uuid)
    }
}

impl From<StringUuid> for Uuid {
    fn from(s: StringUuid) -> Self {
        s.0
    }
}

impl std::fmt::Display for StringUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for StringUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(StringUuid)
    }
}

impl sqlx::Type<sqlx::MySql> for StringUuid {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for StringUuid {
    fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::MySql>>::decode(value)?;
        Ok(StringUuid(Uuid::parse_str(&s)?))
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for StringUuid {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.0.to_string(), buf)
    }
}

/// Row status shared by tenants, stores, and master data tables.
///
/// Stored as the Indonesian string values the schema uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Aktif,
    Nonaktif,
}

impl std::str::FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aktif" => Ok(RecordStatus::Aktif),
            "nonaktif" => Ok(RecordStatus::Nonaktif),
            _ => Err(format!("Unknown record status: {}", s)),
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Aktif => write!(f, "aktif"),
            RecordStatus::Nonaktif => write!(f, "nonaktif"),
        }
    }
}

impl sqlx::Type<sqlx::MySql> for RecordStatus {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for RecordStatus {
    fn decode(
        value: sqlx::mysql::MySqlValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = sqlx::Decode::<'r, sqlx::MySql>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for RecordStatus {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.to_string(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_status_roundtrip() {
        assert_eq!("aktif".parse::<RecordStatus>().unwrap(), RecordStatus::Aktif);
        assert_eq!(RecordStatus::Nonaktif.to_string(), "nonaktif");
        assert!("deleted".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn test_string_uuid_new() {
        let uuid = StringUuid::new_v4();
        assert!(!uuid.is_nil());
    }

    #[test]
    fn test_string_uuid_from_str() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let uuid: StringUuid = uuid_str.parse().unwrap();
        assert_eq!(uuid.to_string(), uuid_str);
    }

    #[test]
    fn test_string_uuid_from_str_invalid() {
        let result: Result<StringUuid, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_string_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let string_uuid: StringUuid = uuid.into();
        let back: Uuid = string_uuid.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_string_uuid_serialization() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let uuid: StringUuid = uuid_str.parse().unwrap();

        let json = serde_json::to_string(&uuid).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));

        let deserialized: StringUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(uuid, deserialized);
    }
}
