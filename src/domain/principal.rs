//! Authenticated principal model
//!
//! A principal is what the authentication middleware hands to this crate:
//! identity plus the tenant/store binding and privilege tier needed to
//! resolve an [`AccessScope`](crate::scope::AccessScope).

use super::common::StringUuid;
use serde::{Deserialize, Serialize};

/// Privilege tier of a back office user.
///
/// Levels mirror the user hierarchy of the platform: the numeric form is
/// what the `users` table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeLevel {
    /// Platform-wide administrator (level 1)
    SuperAdmin,
    /// Tenant-wide administrator (level 2)
    Admin,
    /// Store manager, bound to a single store (level 3)
    Manager,
    /// Cashier, bound to a single store (level 4)
    Cashier,
}

impl PrivilegeLevel {
    pub fn as_level(&self) -> u8 {
        match self {
            PrivilegeLevel::SuperAdmin => 1,
            PrivilegeLevel::Admin => 2,
            PrivilegeLevel::Manager => 3,
            PrivilegeLevel::Cashier => 4,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(PrivilegeLevel::SuperAdmin),
            2 => Some(PrivilegeLevel::Admin),
            3 => Some(PrivilegeLevel::Manager),
            4 => Some(PrivilegeLevel::Cashier),
            _ => None,
        }
    }

    /// Manager tier and below always operate within a single store.
    pub fn is_store_bound(&self) -> bool {
        self.as_level() >= 3
    }

    /// Tenant-wide tiers may fan a write out to every store of their tenant.
    pub fn can_broadcast_stores(&self) -> bool {
        self.as_level() <= 2
    }
}

impl std::fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrivilegeLevel::SuperAdmin => write!(f, "super_admin"),
            PrivilegeLevel::Admin => write!(f, "admin"),
            PrivilegeLevel::Manager => write!(f, "manager"),
            PrivilegeLevel::Cashier => write!(f, "cashier"),
        }
    }
}

/// Authenticated principal as produced by the authentication middleware.
///
/// `tenant_id` is absent only for platform bypass ("god") principals; every
/// ordinary user belongs to exactly one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: StringUuid,
    pub tenant_id: Option<StringUuid>,
    pub store_id: Option<StringUuid>,
    pub level: PrivilegeLevel,
    pub is_god_bypass: bool,
}

impl AuthenticatedPrincipal {
    /// Convenience constructor for a normal tenant-bound user.
    pub fn tenant_user(
        user_id: StringUuid,
        tenant_id: StringUuid,
        store_id: Option<StringUuid>,
        level: PrivilegeLevel,
    ) -> Self {
        Self {
            user_id,
            tenant_id: Some(tenant_id),
            store_id,
            level,
            is_god_bypass: false,
        }
    }

    /// Convenience constructor for a platform bypass principal.
    pub fn god_bypass(user_id: StringUuid) -> Self {
        Self {
            user_id,
            tenant_id: None,
            store_id: None,
            level: PrivilegeLevel::SuperAdmin,
            is_god_bypass: true,
        }
    }
}
