//! Stock take repository (`stok_opname` table)

use crate::domain::{OpenStockTakeInput, StockTakeSession, StockTakeStatus, StringUuid};
use crate::error::Result;
use crate::scope::{apply_scope_to_sql, bind_params, bind_params_as, AccessScope, ScopeColumns};
use async_trait::async_trait;
use sqlx::MySqlPool;

const SESSION_COLUMNS: &str =
    "so.id, so.tenant_id, so.toko_id, so.user_id, so.catatan, so.status, so.dimulai_pada, so.selesai_pada";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockTakeRepository: Send + Sync {
    async fn open_session(
        &self,
        tenant_id: StringUuid,
        toko_id: StringUuid,
        user_id: StringUuid,
        input: &OpenStockTakeInput,
    ) -> Result<StockTakeSession>;
    async fn running_session(
        &self,
        tenant_id: StringUuid,
        toko_id: StringUuid,
    ) -> Result<Option<StockTakeSession>>;
    async fn list_sessions(&self, scope: &AccessScope) -> Result<Vec<StockTakeSession>>;
    async fn find_session(
        &self,
        scope: &AccessScope,
        id: StringUuid,
    ) -> Result<Option<StockTakeSession>>;
    async fn close_session(
        &self,
        scope: &AccessScope,
        id: StringUuid,
        status: StockTakeStatus,
    ) -> Result<bool>;
}

pub struct StockTakeRepositoryImpl {
    pool: MySqlPool,
}

impl StockTakeRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockTakeRepository for StockTakeRepositoryImpl {
    async fn open_session(
        &self,
        tenant_id: StringUuid,
        toko_id: StringUuid,
        user_id: StringUuid,
        input: &OpenStockTakeInput,
    ) -> Result<StockTakeSession> {
        let id = StringUuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO stok_opname (id, tenant_id, toko_id, user_id, catatan, status, dimulai_pada)
            VALUES (?, ?, ?, ?, ?, 'berjalan', NOW())
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(toko_id)
        .bind(user_id)
        .bind(&input.catatan)
        .execute(&self.pool)
        .await?;

        let session = sqlx::query_as::<_, StockTakeSession>(&format!(
            "SELECT {} FROM stok_opname so WHERE so.id = ?",
            SESSION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn running_session(
        &self,
        tenant_id: StringUuid,
        toko_id: StringUuid,
    ) -> Result<Option<StockTakeSession>> {
        let session = sqlx::query_as::<_, StockTakeSession>(&format!(
            "SELECT {} FROM stok_opname so WHERE so.tenant_id = ? AND so.toko_id = ? AND so.status = 'berjalan' LIMIT 1",
            SESSION_COLUMNS
        ))
        .bind(tenant_id)
        .bind(toko_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn list_sessions(&self, scope: &AccessScope) -> Result<Vec<StockTakeSession>> {
        let base = format!("SELECT {} FROM stok_opname so", SESSION_COLUMNS);
        let mut scoped = apply_scope_to_sql(
            &base,
            vec![],
            scope,
            &ScopeColumns::tenant_store("so.tenant_id", "so.toko_id"),
        );
        scoped.sql.push_str(" ORDER BY so.dimulai_pada DESC");

        let sessions =
            bind_params_as::<StockTakeSession>(sqlx::query_as(&scoped.sql), &scoped.params)
                .fetch_all(&self.pool)
                .await?;
        Ok(sessions)
    }

    async fn find_session(
        &self,
        scope: &AccessScope,
        id: StringUuid,
    ) -> Result<Option<StockTakeSession>> {
        let base = format!(
            "SELECT {} FROM stok_opname so WHERE so.id = ?",
            SESSION_COLUMNS
        );
        let scoped = apply_scope_to_sql(
            &base,
            vec![id.into()],
            scope,
            &ScopeColumns::tenant_store("so.tenant_id", "so.toko_id"),
        );
        let session =
            bind_params_as::<StockTakeSession>(sqlx::query_as(&scoped.sql), &scoped.params)
                .fetch_optional(&self.pool)
                .await?;
        Ok(session)
    }

    async fn close_session(
        &self,
        scope: &AccessScope,
        id: StringUuid,
        status: StockTakeStatus,
    ) -> Result<bool> {
        let base = "UPDATE stok_opname SET status = ?, selesai_pada = NOW() WHERE id = ? AND status = 'berjalan'";
        let scoped = apply_scope_to_sql(
            base,
            vec![status.to_string().into(), id.into()],
            scope,
            &ScopeColumns::tenant_store("tenant_id", "toko_id"),
        );
        let result = bind_params(sqlx::query(&scoped.sql), &scoped.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
