//! Stock take (stok opname) service
//!
//! Sessions are strictly store-bound: opening one without a store context is
//! rejected before any query runs, and one store can only have a single
//! running session at a time.

use crate::domain::{OpenStockTakeInput, StockTakeSession, StockTakeStatus, StringUuid};
use crate::error::{AppError, Result};
use crate::repository::StockTakeRepository;
use crate::scope::AccessScope;
use std::sync::Arc;
use validator::Validate;

pub struct StockTakeService<R> {
    repo: Arc<R>,
}

impl<R: StockTakeRepository> StockTakeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn open(
        &self,
        scope: &AccessScope,
        user_id: StringUuid,
        input: &OpenStockTakeInput,
    ) -> Result<StockTakeSession> {
        input.validate()?;

        let tenant_id = scope.require_tenant()?;
        let toko_id = scope
            .target_store_id
            .or(scope.store_id)
            .ok_or(AppError::MissingStoreContext)?;

        if self
            .repo
            .running_session(tenant_id, toko_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A stock take session is already running for this store".to_string(),
            ));
        }

        let session = self
            .repo
            .open_session(tenant_id, toko_id, user_id, input)
            .await?;
        tracing::info!(session_id = %session.id, toko_id = %toko_id, "stock take session opened");
        Ok(session)
    }

    pub async fn sessions(&self, scope: &AccessScope) -> Result<Vec<StockTakeSession>> {
        self.repo.list_sessions(scope).await
    }

    pub async fn get(&self, scope: &AccessScope, id: StringUuid) -> Result<StockTakeSession> {
        self.repo
            .find_session(scope, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stock take session not found".to_string()))
    }

    /// Close a running session as finished or cancelled.
    pub async fn close(
        &self,
        scope: &AccessScope,
        id: StringUuid,
        status: StockTakeStatus,
    ) -> Result<StockTakeSession> {
        if status == StockTakeStatus::Berjalan {
            return Err(AppError::BadRequest(
                "A session can only be closed as selesai or dibatalkan".to_string(),
            ));
        }

        if !self.repo.close_session(scope, id, status).await? {
            // missing, out of scope, or already closed
            return Err(AppError::NotFound(
                "No running stock take session found".to_string(),
            ));
        }
        self.get(scope, id).await
    }
}
