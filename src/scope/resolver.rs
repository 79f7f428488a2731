//! Access scope resolution
//!
//! Derives the per-request [`AccessScope`] from the authenticated principal
//! plus request-level overrides (selected store, write targets, broadcast
//! flags). This is the single place bypass ("god") branching lives; feature
//! services consume the resolved flags and never re-check the principal.

use super::AccessScope;
use crate::domain::{AuthenticatedPrincipal, PrivilegeLevel, StringUuid};
use crate::error::{AppError, Result};
use serde::Deserialize;

/// Request-level scope overrides, typically parsed from the query string or
/// body by the HTTP layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeOverrides {
    /// Explicit tenant context for a bypass principal. A bypass scope with
    /// a tenant behaves exactly like a normal tenant-scoped principal.
    pub tenant_id: Option<StringUuid>,
    /// Request-selected store (takes precedence over the principal's bound
    /// store, matching the param -> user priority of the HTTP layer).
    pub toko_id: Option<StringUuid>,
    /// Write-time tenant target ("create this in tenant X").
    pub target_tenant_id: Option<StringUuid>,
    /// Write-time store target ("create this in store Y").
    pub target_toko_id: Option<StringUuid>,
    /// Fan the write out to every active tenant.
    #[serde(default)]
    pub apply_to_all_tenants: bool,
    /// Fan the write out to every active store of the tenant.
    #[serde(default)]
    pub apply_to_all_stores: bool,
}

pub struct ScopeResolver;

impl ScopeResolver {
    /// Resolve the scope for one request.
    ///
    /// Fails with [`AppError::ScopeResolution`] when a non-bypass principal
    /// carries no tenant (a user must always belong to a tenant) and with
    /// [`AppError::InvalidScopeMode`] when both broadcast flags survive
    /// validation, which no privilege tier permits.
    pub fn resolve(
        principal: &AuthenticatedPrincipal,
        overrides: &ScopeOverrides,
    ) -> Result<AccessScope> {
        let scope = if principal.is_god_bypass {
            Self::resolve_bypass(principal, overrides)
        } else {
            Self::resolve_tenant_user(principal, overrides)?
        };

        if scope.apply_to_all_tenants && scope.apply_to_all_stores {
            return Err(AppError::InvalidScopeMode(
                "apply_to_all_tenants and apply_to_all_stores are mutually exclusive".to_string(),
            ));
        }

        Ok(scope)
    }

    fn resolve_tenant_user(
        principal: &AuthenticatedPrincipal,
        overrides: &ScopeOverrides,
    ) -> Result<AccessScope> {
        let tenant_id = principal.tenant_id.ok_or_else(|| {
            AppError::ScopeResolution(format!(
                "principal {} has no tenant context",
                principal.user_id
            ))
        })?;

        let level = principal.level;
        let store_id = overrides.toko_id.or(principal.store_id);

        Ok(AccessScope {
            tenant_id: Some(tenant_id),
            store_id,
            level,
            is_god_bypass: false,
            enforce_tenant: true,
            enforce_store: level.is_store_bound(),
            target_tenant_id: validate_target_tenant(
                overrides.target_tenant_id,
                Some(tenant_id),
                false,
                level,
            ),
            target_store_id: validate_target_store(
                overrides.target_toko_id,
                principal.store_id,
                false,
                level,
            ),
            apply_to_all_tenants: overrides.apply_to_all_tenants
                && level == PrivilegeLevel::SuperAdmin,
            apply_to_all_stores: overrides.apply_to_all_stores && level.can_broadcast_stores(),
        })
    }

    fn resolve_bypass(
        principal: &AuthenticatedPrincipal,
        overrides: &ScopeOverrides,
    ) -> AccessScope {
        let tenant_id = overrides.tenant_id.or(principal.tenant_id);
        let store_id = overrides.toko_id;

        if tenant_id.is_none() {
            // The one sanctioned unrestricted read path; must stay loud.
            tracing::warn!(
                user_id = %principal.user_id,
                "bypass principal resolved an unrestricted cross-tenant scope"
            );
        }

        AccessScope {
            tenant_id,
            store_id,
            level: principal.level,
            is_god_bypass: true,
            // A supplied tenant context degrades the bypass to an ordinary
            // tenant scope; it is never implicitly unscoped.
            enforce_tenant: tenant_id.is_some(),
            enforce_store: store_id.is_some(),
            target_tenant_id: overrides.target_tenant_id,
            target_store_id: overrides.target_toko_id,
            apply_to_all_tenants: overrides.apply_to_all_tenants,
            apply_to_all_stores: overrides.apply_to_all_stores,
        }
    }
}

/// Keep a requested tenant target only when the level may reach it.
fn validate_target_tenant(
    target: Option<StringUuid>,
    own_tenant: Option<StringUuid>,
    is_god: bool,
    level: PrivilegeLevel,
) -> Option<StringUuid> {
    let target = target?;
    if is_god || level == PrivilegeLevel::SuperAdmin {
        return Some(target);
    }
    // Everyone else may only target their own tenant.
    if Some(target) == own_tenant {
        Some(target)
    } else {
        None
    }
}

/// Keep a requested store target only when the level may reach it.
fn validate_target_store(
    target: Option<StringUuid>,
    own_store: Option<StringUuid>,
    is_god: bool,
    level: PrivilegeLevel,
) -> Option<StringUuid> {
    let target = target?;
    if is_god || level.can_broadcast_stores() {
        // SuperAdmin picks any store; Admin picks within their tenant,
        // which the database constraint enforces on insert.
        return Some(target);
    }
    // Store-bound tiers may only target their own store.
    if Some(target) == own_store {
        Some(target)
    } else {
        None
    }
}
