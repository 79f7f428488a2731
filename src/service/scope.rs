//! Scope capability service
//!
//! Answers "what can this caller reach": the tenants and stores visible to
//! the scope, each annotated with the caller's broadcast capability, plus a
//! flat capability summary the front end uses to render scope selectors.

use crate::domain::{AccessibleStore, AccessibleTenant, PrivilegeLevel};
use crate::error::{AppError, Result};
use crate::repository::DirectoryRepository;
use crate::scope::AccessScope;
use serde::Serialize;
use std::sync::Arc;

/// Flat capability summary for one resolved scope.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeCapabilities {
    pub can_select_tenant: bool,
    pub can_select_store: bool,
    pub can_apply_to_all_tenants: bool,
    pub can_apply_to_all_stores: bool,
    pub store_selection_required: bool,
}

pub struct ScopeService<R> {
    repo: Arc<R>,
}

impl<R: DirectoryRepository> ScopeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Tenants the scope may operate in.
    ///
    /// An unrestricted bypass sees every active tenant; everyone else sees
    /// exactly their own.
    pub async fn accessible_tenants(&self, scope: &AccessScope) -> Result<Vec<AccessibleTenant>> {
        let can_apply_to_all = Self::can_broadcast_tenants(scope);

        if scope.is_god_bypass && scope.tenant_id.is_none() {
            let tenants = self.repo.active_tenants().await?;
            return Ok(tenants
                .into_iter()
                .map(|t| AccessibleTenant {
                    id: t.id,
                    nama: t.nama,
                    status: t.status,
                    can_apply_to_all,
                })
                .collect());
        }

        let tenant_id = scope.require_tenant()?;
        let tenant = self
            .repo
            .find_tenant(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))?;

        Ok(vec![AccessibleTenant {
            id: tenant.id,
            nama: tenant.nama,
            status: tenant.status,
            can_apply_to_all,
        }])
    }

    /// Stores the scope may operate in, within its (or its target) tenant.
    /// Store-bound principals see only their own store; an unrestricted
    /// bypass with no tenant context gets the platform-wide listing.
    pub async fn accessible_stores(&self, scope: &AccessScope) -> Result<Vec<AccessibleStore>> {
        let tenant_id = match scope.target_tenant_id.or(scope.tenant_id) {
            Some(id) => Some(id),
            None if scope.is_god_bypass => None,
            None => {
                return Err(AppError::ScopeResolution(
                    "listing stores requires a tenant context".to_string(),
                ))
            }
        };

        let can_apply_to_all = Self::can_broadcast_stores(scope);
        let stores = self.repo.active_stores(tenant_id).await?;

        Ok(stores
            .into_iter()
            .filter(|s| !scope.enforce_store || scope.store_id == Some(s.id))
            .map(|s| AccessibleStore {
                id: s.id,
                tenant_id: s.tenant_id,
                nama: s.nama,
                status: s.status,
                can_apply_to_all,
            })
            .collect())
    }

    /// Capability summary for the resolved scope. Pure projection.
    pub fn capabilities(&self, scope: &AccessScope) -> ScopeCapabilities {
        ScopeCapabilities {
            can_select_tenant: scope.is_god_bypass,
            can_select_store: scope.is_god_bypass || !scope.level.is_store_bound(),
            can_apply_to_all_tenants: Self::can_broadcast_tenants(scope),
            can_apply_to_all_stores: Self::can_broadcast_stores(scope),
            store_selection_required: scope.enforce_store && scope.store_id.is_none(),
        }
    }

    fn can_broadcast_tenants(scope: &AccessScope) -> bool {
        scope.is_god_bypass || scope.level == PrivilegeLevel::SuperAdmin
    }

    fn can_broadcast_stores(scope: &AccessScope) -> bool {
        scope.is_god_bypass || scope.level.can_broadcast_stores()
    }
}
