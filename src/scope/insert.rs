//! Insert scope resolution
//!
//! Decides which tenant/store a newly created row is stamped with. A pure
//! projection of the scope and its validated targets; authorization of the
//! targets already happened in the resolver, and row-level permission stays
//! with the calling service.

use super::AccessScope;
use crate::error::{AppError, Result};
use crate::domain::StringUuid;

/// Tenant/store stamp for one new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertScope {
    pub tenant_id: StringUuid,
    pub store_id: Option<StringUuid>,
}

/// Call-site overrides, taking precedence over the targets carried by the
/// scope. Only administrative call sites should pass these; enforcing that
/// is the calling service's authorization check.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertOverrides {
    pub target_tenant_id: Option<StringUuid>,
    pub target_store_id: Option<StringUuid>,
}

/// Resolve the tenant/store values a new row must carry.
///
/// Calling this while a broadcast flag is set is a programming error; the
/// write belongs to [`BulkApplyExpander`](super::bulk::BulkApplyExpander)
/// in that mode.
pub fn resolve_for_insert(
    scope: &AccessScope,
    overrides: Option<&InsertOverrides>,
) -> Result<InsertScope> {
    if scope.is_broadcast() {
        return Err(AppError::InvalidScopeMode(
            "insert scope requested while a broadcast flag is set".to_string(),
        ));
    }

    let target_tenant = overrides
        .and_then(|o| o.target_tenant_id)
        .or(scope.target_tenant_id);
    let target_store = overrides
        .and_then(|o| o.target_store_id)
        .or(scope.target_store_id);

    // An explicit target addresses exactly what it names; the principal's
    // own store never leaks into a targeted write.
    if target_tenant.is_some() || target_store.is_some() {
        let tenant_id = target_tenant.or(scope.tenant_id).ok_or_else(|| {
            AppError::ScopeResolution("no tenant context for targeted insert".to_string())
        })?;
        return Ok(InsertScope {
            tenant_id,
            store_id: target_store,
        });
    }

    let tenant_id = scope.tenant_id.ok_or_else(|| {
        AppError::ScopeResolution("no tenant context for insert".to_string())
    })?;

    Ok(InsertScope {
        tenant_id,
        store_id: scope.store_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PrivilegeLevel;
    use pretty_assertions::assert_eq;

    fn scope() -> AccessScope {
        AccessScope {
            tenant_id: Some(StringUuid::new_v4()),
            store_id: Some(StringUuid::new_v4()),
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
    fn test_defaults_to_scope_tenant_and_store() {
        let scope = scope();
        let insert = resolve_for_insert(&scope, None).unwrap();
        assert_eq!(insert.tenant_id, scope.tenant_id.unwrap());
        assert_eq!(insert.store_id, scope.store_id);
    }

    #[test]
    fn test_target_store_does_not_fall_back_to_own_store() {
        let mut scope = scope();
        let target_tenant = StringUuid::new_v4();
        scope.target_tenant_id = Some(target_tenant);

        let insert = resolve_for_insert(&scope, None).unwrap();
        assert_eq!(insert.tenant_id, target_tenant);
        // targeted write: own store must not leak in
        assert_eq!(insert.store_id, None);
    }

    #[test]
    fn test_call_site_overrides_win() {
        let scope = scope();
        let target_store = StringUuid::new_v4();
        let overrides = InsertOverrides {
            target_tenant_id: None,
            target_store_id: Some(target_store),
        };
        let insert = resolve_for_insert(&scope, Some(&overrides)).unwrap();
        assert_eq!(insert.tenant_id, scope.tenant_id.unwrap());
        assert_eq!(insert.store_id, Some(target_store));
    }

    #[test]
    fn test_broadcast_mode_is_programming_error() {
        let mut scope = scope();
        scope.apply_to_all_stores = true;
        let result = resolve_for_insert(&scope, None);
        assert!(matches!(result, Err(AppError::InvalidScopeMode(_))));
    }

    #[test]
    fn test_bypass_without_tenant_needs_a_target() {
        let mut scope = scope();
        scope.tenant_id = None;
        scope.is_god_bypass = true;
        scope.enforce_tenant = false;

        let result = resolve_for_insert(&scope, None);
        assert!(matches!(result, Err(AppError::ScopeResolution(_))));

        let overrides = InsertOverrides {
            target_tenant_id: Some(StringUuid::new_v4()),
            target_store_id: None,
        };
        assert!(resolve_for_insert(&scope, Some(&overrides)).is_ok());
    }
}
