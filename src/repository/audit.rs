//! Audit log repository
//!
//! Append-only `audit_log` table, always joined with `users` for the acting
//! user's display name. Audit rows are tenant-level, so every read scopes by
//! `al.tenant_id` and never by store.

use crate::domain::{AuditActivitySummary, AuditLog, CreateAuditLogInput, SearchAuditQuery, StringUuid};
use crate::error::Result;
use crate::scope::{
    apply_scope_to_sql, bind_params_as, AccessScope, InsertScope, ScopeColumns, SqlParam,
};
use async_trait::async_trait;
use sqlx::MySqlPool;

const AUDIT_COLUMNS: &str = "al.id, al.tenant_id, al.user_id, al.tabel, al.record_id, al.aksi, \
     al.data_lama, al.data_baru, al.ip_address, u.nama_lengkap AS user_nama, al.dibuat_pada";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn create(&self, stamp: &InsertScope, input: &CreateAuditLogInput) -> Result<StringUuid>;
    async fn search(
        &self,
        scope: &AccessScope,
        query: &SearchAuditQuery,
    ) -> Result<(Vec<AuditLog>, i64)>;
    async fn find_by_id(&self, scope: &AccessScope, id: StringUuid) -> Result<Option<AuditLog>>;
    async fn activity_summary(
        &self,
        scope: &AccessScope,
        tanggal_dari: &str,
        tanggal_sampai: &str,
    ) -> Result<Vec<AuditActivitySummary>>;
}

pub struct AuditRepositoryImpl {
    pool: MySqlPool,
}

impl AuditRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn search_filters(query: &SearchAuditQuery) -> (String, Vec<SqlParam>) {
        let mut sql = String::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            sql.push_str(" AND (al.tabel LIKE ? OR al.aksi LIKE ? OR u.nama_lengkap LIKE ?)");
            let pattern = format!("%{}%", search);
            params.push(pattern.clone().into());
            params.push(pattern.clone().into());
            params.push(pattern.into());
        }
        if let Some(user_id) = query.user_id {
            sql.push_str(" AND al.user_id = ?");
            params.push(user_id.into());
        }
        if let Some(tabel) = query.tabel.as_deref().filter(|t| !t.is_empty()) {
            sql.push_str(" AND al.tabel = ?");
            params.push(tabel.into());
        }
        if let Some(aksi) = query.aksi.as_deref().filter(|a| !a.is_empty()) {
            sql.push_str(" AND al.aksi = ?");
            params.push(aksi.into());
        }
        if let Some(record_id) = query.record_id.as_deref().filter(|r| !r.is_empty()) {
            sql.push_str(" AND al.record_id = ?");
            params.push(record_id.into());
        }
        if let Some(dari) = query.tanggal_dari.as_deref().filter(|d| !d.is_empty()) {
            sql.push_str(" AND al.dibuat_pada >= ?");
            params.push(dari.into());
        }
        if let Some(sampai) = query.tanggal_sampai.as_deref().filter(|d| !d.is_empty()) {
            sql.push_str(" AND al.dibuat_pada <= ?");
            // date-only upper bound covers the whole day
            params.push(format!("{} 23:59:59", sampai).into());
        }

        (sql, params)
    }
}

#[async_trait]
impl AuditRepository for AuditRepositoryImpl {
    async fn create(&self, stamp: &InsertScope, input: &CreateAuditLogInput) -> Result<StringUuid> {
        let id = StringUuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, tenant_id, user_id, tabel, record_id, aksi, data_lama, data_baru, ip_address, dibuat_pada)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(id)
        .bind(stamp.tenant_id)
        .bind(input.user_id)
        .bind(&input.tabel)
        .bind(&input.record_id)
        .bind(&input.aksi)
        .bind(&input.data_lama)
        .bind(&input.data_baru)
        .bind(&input.ip_address)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn search(
        &self,
        scope: &AccessScope,
        query: &SearchAuditQuery,
    ) -> Result<(Vec<AuditLog>, i64)> {
        let (filter_sql, filter_params) = Self::search_filters(query);
        let columns = ScopeColumns::tenant("al.tenant_id");

        let count_base = format!(
            "SELECT COUNT(*) FROM audit_log al LEFT JOIN users u ON al.user_id = u.id WHERE 1=1{}",
            filter_sql
        );
        let counted = apply_scope_to_sql(&count_base, filter_params.clone(), scope, &columns);
        let (total,): (i64,) = bind_params_as(sqlx::query_as(&counted.sql), &counted.params)
            .fetch_one(&self.pool)
            .await?;

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(50).clamp(1, 200);
        let offset = (page - 1) * limit;

        let base = format!(
            "SELECT {} FROM audit_log al LEFT JOIN users u ON al.user_id = u.id WHERE 1=1{}",
            AUDIT_COLUMNS, filter_sql
        );
        let mut scoped = apply_scope_to_sql(&base, filter_params, scope, &columns);
        scoped
            .sql
            .push_str(" ORDER BY al.dibuat_pada DESC LIMIT ? OFFSET ?");
        scoped.params.push(limit.into());
        scoped.params.push(offset.into());

        let logs = bind_params_as::<AuditLog>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_all(&self.pool)
            .await?;

        Ok((logs, total))
    }

    async fn find_by_id(&self, scope: &AccessScope, id: StringUuid) -> Result<Option<AuditLog>> {
        let base = format!(
            "SELECT {} FROM audit_log al LEFT JOIN users u ON al.user_id = u.id WHERE al.id = ?",
            AUDIT_COLUMNS
        );
        let scoped = apply_scope_to_sql(
            &base,
            vec![id.into()],
            scope,
            &ScopeColumns::tenant("al.tenant_id"),
        );
        let log = bind_params_as::<AuditLog>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    async fn activity_summary(
        &self,
        scope: &AccessScope,
        tanggal_dari: &str,
        tanggal_sampai: &str,
    ) -> Result<Vec<AuditActivitySummary>> {
        let base = "SELECT al.aksi, al.tabel, COUNT(*) AS jumlah_aktivitas, \
             COUNT(DISTINCT al.user_id) AS jumlah_user \
             FROM audit_log al WHERE al.dibuat_pada >= ? AND al.dibuat_pada <= ?";
        let params: Vec<SqlParam> = vec![
            tanggal_dari.into(),
            format!("{} 23:59:59", tanggal_sampai).into(),
        ];
        let mut scoped = apply_scope_to_sql(
            base,
            params,
            scope,
            &ScopeColumns::tenant("al.tenant_id"),
        );
        scoped
            .sql
            .push_str(" GROUP BY al.aksi, al.tabel ORDER BY jumlah_aktivitas DESC");

        let rows =
            bind_params_as::<AuditActivitySummary>(sqlx::query_as(&scoped.sql), &scoped.params)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}
