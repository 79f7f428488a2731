//! Tenant/store directory repository
//!
//! Backs both the store-directory feature and the scope capability
//! endpoints, and is the persistence side of broadcast target enumeration.

use crate::domain::{CreateStoreInput, RecordStatus, SearchStoreQuery, Store, StringUuid, Tenant};
use crate::error::Result;
use crate::scope::{
    apply_scope_to_sql, bind_params_as, AccessScope, InsertScope, ScopeColumns, SqlParam,
    TargetEnumerator,
};
use async_trait::async_trait;
use sqlx::MySqlPool;

const STORE_COLUMNS: &str =
    "t.id, t.tenant_id, t.kode, t.nama, t.alamat, t.telepon, t.status, t.dibuat_pada, t.diperbarui_pada";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn search_stores(
        &self,
        scope: &AccessScope,
        query: &SearchStoreQuery,
    ) -> Result<(Vec<Store>, i64)>;
    async fn find_store_by_id(&self, scope: &AccessScope, id: StringUuid)
        -> Result<Option<Store>>;
    async fn find_store_by_code(&self, scope: &AccessScope, kode: &str) -> Result<Option<Store>>;
    async fn create_store(&self, stamp: &InsertScope, input: &CreateStoreInput) -> Result<Store>;

    async fn active_tenants(&self) -> Result<Vec<Tenant>>;
    async fn find_tenant(&self, id: StringUuid) -> Result<Option<Tenant>>;
    async fn active_stores(&self, tenant_id: Option<StringUuid>) -> Result<Vec<Store>>;
}

pub struct DirectoryRepositoryImpl {
    pool: MySqlPool,
}

impl DirectoryRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Shared filter assembly for the store list and its count query.
    fn store_filters(query: &SearchStoreQuery) -> (String, Vec<SqlParam>) {
        let mut sql = String::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            sql.push_str(" AND (t.nama LIKE ? OR t.kode LIKE ?)");
            let pattern = format!("%{}%", search);
            params.push(pattern.clone().into());
            params.push(pattern.into());
        }
        if let Some(status) = query.status {
            sql.push_str(" AND t.status = ?");
            params.push(status.to_string().into());
        }
        if let Some(kode) = query.kode.as_deref().filter(|k| !k.is_empty()) {
            sql.push_str(" AND t.kode = ?");
            params.push(kode.into());
        }

        (sql, params)
    }
}

#[async_trait]
impl DirectoryRepository for DirectoryRepositoryImpl {
    async fn search_stores(
        &self,
        scope: &AccessScope,
        query: &SearchStoreQuery,
    ) -> Result<(Vec<Store>, i64)> {
        let (filter_sql, filter_params) = Self::store_filters(query);
        let columns = ScopeColumns::tenant("t.tenant_id");

        let count_base = format!("SELECT COUNT(*) FROM toko t WHERE 1=1{}", filter_sql);
        let counted = apply_scope_to_sql(&count_base, filter_params.clone(), scope, &columns);
        let (total,): (i64,) =
            bind_params_as(sqlx::query_as(&counted.sql), &counted.params)
                .fetch_one(&self.pool)
                .await?;

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * limit;

        let base = format!(
            "SELECT {} FROM toko t WHERE 1=1{}",
            STORE_COLUMNS, filter_sql
        );
        let mut scoped = apply_scope_to_sql(&base, filter_params, scope, &columns);
        // trailing clauses only after composition
        scoped.sql.push_str(" ORDER BY t.nama ASC LIMIT ? OFFSET ?");
        scoped.params.push(limit.into());
        scoped.params.push(offset.into());

        let stores = bind_params_as::<Store>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_all(&self.pool)
            .await?;

        Ok((stores, total))
    }

    async fn find_store_by_id(
        &self,
        scope: &AccessScope,
        id: StringUuid,
    ) -> Result<Option<Store>> {
        let base = format!("SELECT {} FROM toko t WHERE t.id = ?", STORE_COLUMNS);
        let scoped = apply_scope_to_sql(
            &base,
            vec![id.into()],
            scope,
            &ScopeColumns::tenant("t.tenant_id"),
        );
        let store = bind_params_as::<Store>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    async fn find_store_by_code(&self, scope: &AccessScope, kode: &str) -> Result<Option<Store>> {
        let base = format!("SELECT {} FROM toko t WHERE t.kode = ?", STORE_COLUMNS);
        let scoped = apply_scope_to_sql(
            &base,
            vec![kode.into()],
            scope,
            &ScopeColumns::tenant("t.tenant_id"),
        );
        let store = bind_params_as::<Store>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    async fn create_store(&self, stamp: &InsertScope, input: &CreateStoreInput) -> Result<Store> {
        let id = StringUuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO toko (id, tenant_id, kode, nama, alamat, telepon, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(stamp.tenant_id)
        .bind(&input.kode)
        .bind(&input.nama)
        .bind(&input.alamat)
        .bind(&input.telepon)
        .execute(&self.pool)
        .await?;

        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {} FROM toko t WHERE t.id = ?",
            STORE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(store)
    }

    async fn active_tenants(&self) -> Result<Vec<Tenant>> {
        let tenants = sqlx::query_as::<_, Tenant>(
            "SELECT id, nama, status, dibuat_pada, diperbarui_pada FROM tenants WHERE status = ? ORDER BY nama ASC",
        )
        .bind(RecordStatus::Aktif.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(tenants)
    }

    async fn find_tenant(&self, id: StringUuid) -> Result<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT id, nama, status, dibuat_pada, diperbarui_pada FROM tenants WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tenant)
    }

    async fn active_stores(&self, tenant_id: Option<StringUuid>) -> Result<Vec<Store>> {
        // no tenant means the platform-wide listing
        let stores = match tenant_id {
            Some(tenant_id) => {
                sqlx::query_as::<_, Store>(&format!(
                    "SELECT {} FROM toko t WHERE t.tenant_id = ? AND t.status = ? ORDER BY t.nama ASC",
                    STORE_COLUMNS
                ))
                .bind(tenant_id)
                .bind(RecordStatus::Aktif.to_string())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Store>(&format!(
                    "SELECT {} FROM toko t WHERE t.status = ? ORDER BY t.nama ASC",
                    STORE_COLUMNS
                ))
                .bind(RecordStatus::Aktif.to_string())
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(stores)
    }
}

/// Broadcast expansion enumerates targets through the same directory tables,
/// ids only and in the directory's stable name order.
#[async_trait]
impl TargetEnumerator for DirectoryRepositoryImpl {
    async fn list_active_tenants(&self) -> Result<Vec<StringUuid>> {
        let rows: Vec<(StringUuid,)> = sqlx::query_as(
            "SELECT id FROM tenants WHERE status = ? ORDER BY nama ASC",
        )
        .bind(RecordStatus::Aktif.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn list_active_stores(&self, tenant_id: StringUuid) -> Result<Vec<StringUuid>> {
        let rows: Vec<(StringUuid,)> = sqlx::query_as(
            "SELECT id FROM toko WHERE tenant_id = ? AND status = ? ORDER BY nama ASC",
        )
        .bind(tenant_id)
        .bind(RecordStatus::Aktif.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
