//! System configuration repository (`konfigurasi_sistem` table)
//!
//! Keys are unique per (tenant_id, toko_id); writes are upserts. A broadcast
//! write pushes the same key/value to every target through
//! [`ConfigBulkWriter`].

use crate::domain::{ConfigEntry, StringUuid, UpsertConfigInput};
use crate::error::Result;
use crate::scope::{
    apply_scope_to_sql, bind_params_as, AccessScope, BulkRowWriter, BulkTarget, InsertScope,
    ScopeColumns, SqlParam,
};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

const CONFIG_COLUMNS: &str =
    "c.id, c.tenant_id, c.toko_id, c.kunci, c.nilai, c.deskripsi, c.dibuat_pada, c.diperbarui_pada";

const UPSERT_SQL: &str = r#"
    INSERT INTO konfigurasi_sistem (id, tenant_id, toko_id, kunci, nilai, deskripsi, dibuat_pada, diperbarui_pada)
    VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())
    ON DUPLICATE KEY UPDATE nilai = VALUES(nilai), deskripsi = VALUES(deskripsi), diperbarui_pada = NOW()
    "#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemConfigRepository: Send + Sync {
    async fn entries(&self, scope: &AccessScope) -> Result<Vec<ConfigEntry>>;
    async fn get(&self, scope: &AccessScope, kunci: &str) -> Result<Option<ConfigEntry>>;
    async fn upsert(&self, stamp: &InsertScope, input: &UpsertConfigInput) -> Result<()>;
}

pub struct SystemConfigRepositoryImpl {
    pool: MySqlPool,
}

impl SystemConfigRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SystemConfigRepository for SystemConfigRepositoryImpl {
    async fn entries(&self, scope: &AccessScope) -> Result<Vec<ConfigEntry>> {
        let mut base = format!("SELECT {} FROM konfigurasi_sistem c", CONFIG_COLUMNS);
        let mut params: Vec<SqlParam> = Vec::new();

        // a store-bound scope sees tenant-wide rows plus its own overrides,
        // never a sibling store's
        if scope.enforce_store {
            if let Some(store_id) = scope.store_id {
                base.push_str(" WHERE (c.toko_id IS NULL OR c.toko_id = ?)");
                params.push(store_id.into());
            }
        }

        let mut scoped =
            apply_scope_to_sql(&base, params, scope, &ScopeColumns::tenant("c.tenant_id"));
        scoped.sql.push_str(" ORDER BY c.kunci ASC, c.toko_id IS NULL ASC");

        let entries = bind_params_as::<ConfigEntry>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    async fn get(&self, scope: &AccessScope, kunci: &str) -> Result<Option<ConfigEntry>> {
        let mut base = format!(
            "SELECT {} FROM konfigurasi_sistem c WHERE c.kunci = ?",
            CONFIG_COLUMNS
        );
        let mut params: Vec<SqlParam> = vec![kunci.into()];

        // resolve against the scope's store when it has one, falling back to
        // the tenant-wide row; a scope with no store only ever sees the
        // tenant-wide row
        match scope.store_id {
            Some(store_id) => {
                base.push_str(" AND (c.toko_id IS NULL OR c.toko_id = ?)");
                params.push(store_id.into());
            }
            None => base.push_str(" AND c.toko_id IS NULL"),
        }

        let mut scoped =
            apply_scope_to_sql(&base, params, scope, &ScopeColumns::tenant("c.tenant_id"));
        // the store override wins over the tenant-wide row
        scoped.sql.push_str(" ORDER BY c.toko_id IS NULL ASC LIMIT 1");

        let entry = bind_params_as::<ConfigEntry>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn upsert(&self, stamp: &InsertScope, input: &UpsertConfigInput) -> Result<()> {
        sqlx::query(UPSERT_SQL)
            .bind(StringUuid::new_v4())
            .bind(stamp.tenant_id)
            .bind(stamp.store_id)
            .bind(&input.kunci)
            .bind(&input.nilai)
            .bind(&input.deskripsi)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Upserts one configuration row per broadcast target.
pub struct ConfigBulkWriter<'a> {
    pub input: &'a UpsertConfigInput,
}

#[async_trait]
impl BulkRowWriter for ConfigBulkWriter<'_> {
    async fn insert_row(
        &self,
        tx: &mut Transaction<'_, MySql>,
        target: &BulkTarget,
    ) -> Result<()> {
        sqlx::query(UPSERT_SQL)
            .bind(target.row_id)
            .bind(target.tenant_id)
            .bind(target.store_id)
            .bind(&self.input.kunci)
            .bind(&self.input.nilai)
            .bind(&self.input.deskripsi)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
