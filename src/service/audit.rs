//! Audit trail service

use crate::domain::{
    AuditActivitySummary, AuditLog, CreateAuditLogInput, SearchAuditQuery, StringUuid,
};
use crate::error::{AppError, Result};
use crate::repository::AuditRepository;
use crate::scope::{resolve_for_insert, AccessScope};
use std::sync::Arc;

pub struct AuditService<R> {
    repo: Arc<R>,
}

impl<R: AuditRepository> AuditService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Append one audit entry, stamped with the scope's tenant. Audit rows
    /// are tenant-level, so the stamp's store is ignored.
    pub async fn record(
        &self,
        scope: &AccessScope,
        input: &CreateAuditLogInput,
    ) -> Result<StringUuid> {
        let stamp = resolve_for_insert(scope, None)?;
        self.repo.create(&stamp, input).await
    }

    pub async fn search(
        &self,
        scope: &AccessScope,
        query: &SearchAuditQuery,
    ) -> Result<(Vec<AuditLog>, i64)> {
        self.repo.search(scope, query).await
    }

    pub async fn get(&self, scope: &AccessScope, id: StringUuid) -> Result<AuditLog> {
        self.repo
            .find_by_id(scope, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Audit log entry not found".to_string()))
    }

    pub async fn activity_summary(
        &self,
        scope: &AccessScope,
        tanggal_dari: &str,
        tanggal_sampai: &str,
    ) -> Result<Vec<AuditActivitySummary>> {
        if tanggal_dari.is_empty() || tanggal_sampai.is_empty() {
            return Err(AppError::BadRequest(
                "tanggal_dari and tanggal_sampai are required".to_string(),
            ));
        }
        self.repo
            .activity_summary(scope, tanggal_dari, tanggal_sampai)
            .await
    }
}
