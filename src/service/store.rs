//! Store directory service

use crate::domain::{CreateStoreInput, SearchStoreQuery, Store, StringUuid};
use crate::error::{AppError, Result};
use crate::repository::DirectoryRepository;
use crate::scope::{resolve_for_insert, AccessScope};
use std::sync::Arc;
use validator::Validate;

pub struct StoreService<R> {
    repo: Arc<R>,
}

impl<R: DirectoryRepository> StoreService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn search(
        &self,
        scope: &AccessScope,
        query: &SearchStoreQuery,
    ) -> Result<(Vec<Store>, i64)> {
        self.repo.search_stores(scope, query).await
    }

    /// A store outside the scope is indistinguishable from a missing one.
    pub async fn get(&self, scope: &AccessScope, id: StringUuid) -> Result<Store> {
        self.repo
            .find_store_by_id(scope, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
    }

    pub async fn get_by_code(&self, scope: &AccessScope, kode: &str) -> Result<Store> {
        self.repo
            .find_store_by_code(scope, kode)
            .await?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
    }

    pub async fn create(&self, scope: &AccessScope, input: &CreateStoreInput) -> Result<Store> {
        input.validate()?;

        if !scope.is_god_bypass && !scope.level.can_broadcast_stores() {
            return Err(AppError::Forbidden(
                "Only tenant administrators can create stores".to_string(),
            ));
        }

        let stamp = resolve_for_insert(scope, None)?;

        if self
            .repo
            .find_store_by_code(scope, &input.kode)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Store code '{}' already in use",
                input.kode
            )));
        }

        let store = self.repo.create_store(&stamp, input).await?;
        tracing::info!(store_id = %store.id, tenant_id = %store.tenant_id, "store created");
        Ok(store)
    }
}
