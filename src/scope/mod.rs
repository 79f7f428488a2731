//! Access scope resolution and query scoping engine
//!
//! The one cross-cutting concern of the back office: every read is confined
//! to the caller's tenant/store visibility boundary, and every write is
//! stamped with (or fanned out across) the tenant/store targets the caller
//! is allowed to reach.
//!
//! - [`AccessScope`] — immutable per-request visibility boundary
//! - [`resolver::ScopeResolver`] — derives a scope from a principal
//! - [`sql::apply_scope_to_sql`] — appends scope predicates to hand-written SQL
//! - [`insert::resolve_for_insert`] — tenant/store stamp for single-row writes
//! - [`bulk::BulkApplyExpander`] — "apply to all tenants/stores" fan-out

pub mod bulk;
pub mod insert;
pub mod resolver;
pub mod sql;

pub use bulk::{BulkApplyExpander, BulkRowWriter, BulkTarget, BulkWriteOptions, BulkWriteSummary, TargetEnumerator};
pub use insert::{resolve_for_insert, InsertOverrides, InsertScope};
pub use resolver::{ScopeOverrides, ScopeResolver};
pub use sql::{apply_scope_to_sql, bind_params, bind_params_as, ScopedSql, SqlParam};

use crate::domain::{PrivilegeLevel, StringUuid};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Per-request data visibility boundary.
///
/// Constructed once by [`resolver::ScopeResolver`] when a request is
/// authenticated and treated as immutable afterwards; composing a query
/// never alters the scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessScope {
    /// Tenant the principal is confined to; `None` only for an unrestricted
    /// platform-bypass scope.
    pub tenant_id: Option<StringUuid>,
    /// Store the principal is bound to, when any.
    pub store_id: Option<StringUuid>,
    /// Privilege tier of the principal.
    pub level: PrivilegeLevel,
    /// Platform bypass ("god") principal.
    pub is_god_bypass: bool,
    /// Whether read/write queries must filter by tenant.
    pub enforce_tenant: bool,
    /// Whether queries must additionally filter by store.
    pub enforce_store: bool,
    /// Validated write-time tenant target, if the request selected one.
    pub target_tenant_id: Option<StringUuid>,
    /// Validated write-time store target, if the request selected one.
    pub target_store_id: Option<StringUuid>,
    /// One-shot broadcast: fan the write out to every active tenant.
    pub apply_to_all_tenants: bool,
    /// One-shot broadcast: fan the write out to every active store of the
    /// scope's tenant.
    pub apply_to_all_stores: bool,
}

impl AccessScope {
    /// Whether either broadcast flag is set.
    pub fn is_broadcast(&self) -> bool {
        self.apply_to_all_tenants || self.apply_to_all_stores
    }

    /// The store this scope operates on, failing with
    /// [`AppError::MissingStoreContext`] when the operation needs one and
    /// the principal has none assigned.
    pub fn require_store(&self) -> Result<StringUuid> {
        self.store_id.ok_or(AppError::MissingStoreContext)
    }

    /// The tenant this scope operates on; absent only for unrestricted
    /// bypass scopes, which is a fatal state for tenant-bound operations.
    pub fn require_tenant(&self) -> Result<StringUuid> {
        self.tenant_id.ok_or_else(|| {
            AppError::ScopeResolution("operation requires a tenant context".to_string())
        })
    }
}

/// Column names a specific query scopes by.
///
/// Aliases are welcome (`p.tenant_id`); a `None` column means "do not filter
/// this dimension for this query", used deliberately for queries that are
/// already unambiguous (lookups by primary key, tenant-level tables with no
/// store column).
#[derive(Debug, Clone, Default)]
pub struct ScopeColumns {
    pub tenant_column: Option<String>,
    pub store_column: Option<String>,
}

impl ScopeColumns {
    /// Filter neither dimension.
    pub fn none() -> Self {
        Self::default()
    }

    /// Filter by tenant only.
    pub fn tenant(tenant_column: impl Into<String>) -> Self {
        Self {
            tenant_column: Some(tenant_column.into()),
            store_column: None,
        }
    }

    /// Filter by tenant and store.
    pub fn tenant_store(
        tenant_column: impl Into<String>,
        store_column: impl Into<String>,
    ) -> Self {
        Self {
            tenant_column: Some(tenant_column.into()),
            store_column: Some(store_column.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant_scope() -> AccessScope {
        AccessScope {
            tenant_id: Some(StringUuid::new_v4()),
            store_id: None,
            level: PrivilegeLevel::Admin,
            is_god_bypass: false,
            enforce_tenant: true,
            enforce_store: false,
            target_tenant_id: None,
            target_store_id: None,
            apply_to_all_tenants: false,
            apply_to_all_stores: false,
        }
    }

    #[test]
    fn test_require_store_missing() {
        let scope = tenant_scope();
        assert!(matches!(
            scope.require_store(),
            Err(AppError::MissingStoreContext)
        ));
    }

    #[test]
    fn test_require_tenant_present() {
        let scope = tenant_scope();
        assert_eq!(scope.require_tenant().unwrap(), scope.tenant_id.unwrap());
    }

    #[test]
    fn test_columns_constructors() {
        assert!(ScopeColumns::none().tenant_column.is_none());
        let cols = ScopeColumns::tenant_store("p.tenant_id", "p.toko_id");
        assert_eq!(cols.tenant_column.as_deref(), Some("p.tenant_id"));
        assert_eq!(cols.store_column.as_deref(), Some("p.toko_id"));
    }
}
