//! Scope-aware SQL composition
//!
//! [`apply_scope_to_sql`] appends tenant/store predicates to an arbitrary,
//! already-constructed SQL fragment. It centralizes the WHERE-vs-AND
//! decision so feature repositories never re-implement tenant isolation in
//! their hand-written queries.
//!
//! The composer works on positional `?` placeholders and appends its
//! parameters at the end of the list; callers must add trailing clauses
//! with their own placeholders (LIMIT/OFFSET and friends) only after
//! composing.

use super::{AccessScope, ScopeColumns};
use crate::domain::StringUuid;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlArguments;
use sqlx::MySql;

/// Owned positional SQL parameter.
///
/// Feature repositories collect their parameters as `SqlParam` so composed
/// queries can be carried around as plain data and bound in one pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<StringUuid> for SqlParam {
    fn from(v: StringUuid) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v as i64)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Float(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(v)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        SqlParam::DateTime(v)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlParam::Null,
        }
    }
}

/// A composed query: SQL text plus its positional parameters, in order.
#[derive(Debug, Clone)]
pub struct ScopedSql {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

lazy_static::lazy_static! {
    static ref WHERE_RE: regex::Regex = regex::Regex::new(r"(?i)\bWHERE\b").unwrap();
}

/// Append scope predicates to an existing SQL fragment.
///
/// Pure function: never executes anything and returns a fresh parameter
/// list. Appends, in stable order, the tenant predicate (when
/// `enforce_tenant` and a tenant column are both present) and then the
/// store predicate (when `enforce_store`, a store id, and a store column
/// are all present). The first appended predicate becomes `WHERE` if the
/// fragment has none yet, `AND` otherwise.
///
/// A scope with nothing to enforce returns the input unchanged; that is a
/// valid no-op, not an error.
pub fn apply_scope_to_sql(
    sql: &str,
    params: Vec<SqlParam>,
    scope: &AccessScope,
    columns: &ScopeColumns,
) -> ScopedSql {
    let mut clauses: Vec<String> = Vec::new();
    let mut extra: Vec<SqlParam> = Vec::new();

    if scope.enforce_tenant {
        if let (Some(column), Some(tenant_id)) = (&columns.tenant_column, scope.tenant_id) {
            clauses.push(format!("{} = ?", column));
            extra.push(tenant_id.into());
        }
    }

    if scope.enforce_store {
        if let (Some(column), Some(store_id)) = (&columns.store_column, scope.store_id) {
            clauses.push(format!("{} = ?", column));
            extra.push(store_id.into());
        }
    }

    if clauses.is_empty() {
        return ScopedSql { sql: sql.to_string(), params };
    }

    let glue = if WHERE_RE.is_match(sql) { " AND " } else { " WHERE " };
    let scoped_sql = format!("{}{}{}", sql, glue, clauses.join(" AND "));

    let mut all_params = params;
    all_params.extend(extra);

    ScopedSql {
        sql: scoped_sql,
        params: all_params,
    }
}

/// Bind a parameter slice onto a `sqlx::query` builder, in order.
pub fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, MySql, MySqlArguments>,
    params: &'q [SqlParam],
) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(v) => query.bind(v),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Bool(v) => query.bind(*v),
            SqlParam::DateTime(v) => query.bind(*v),
            SqlParam::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

/// Bind a parameter slice onto a `sqlx::query_as` builder, in order.
pub fn bind_params_as<'q, O>(
    mut query: sqlx::query::QueryAs<'q, MySql, O, MySqlArguments>,
    params: &'q [SqlParam],
) -> sqlx::query::QueryAs<'q, MySql, O, MySqlArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(v) => query.bind(v),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Bool(v) => query.bind(*v),
            SqlParam::DateTime(v) => query.bind(*v),
            SqlParam::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PrivilegeLevel;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scope(
        tenant: Option<&str>,
        store: Option<&str>,
        enforce_tenant: bool,
        enforce_store: bool,
    ) -> AccessScope {
        AccessScope {
            tenant_id: tenant.map(|t| t.parse().unwrap()),
            store_id: store.map(|s| s.parse().unwrap()),
            level: PrivilegeLevel::Manager,
            is_god_bypass: false,
            enforce_tenant,
            enforce_store,
            target_tenant_id: None,
            target_store_id: None,
            apply_to_all_tenants: false,
            apply_to_all_stores: false,
        }
    }

    const T1: &str = "11111111-1111-1111-1111-111111111111";
    const S1: &str = "22222222-2222-2222-2222-222222222222";

    fn placeholder_count(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn test_appends_where_when_absent() {
        let scope = scope(Some(T1), None, true, false);
        let out = apply_scope_to_sql(
            "SELECT * FROM kategori",
            vec![],
            &scope,
            &ScopeColumns::tenant("tenant_id"),
        );
        assert_eq!(out.sql, "SELECT * FROM kategori WHERE tenant_id = ?");
        assert_eq!(out.params, vec![SqlParam::Text(T1.to_string())]);
    }

    #[test]
    fn test_appends_and_when_where_present() {
        let scope = scope(Some(T1), Some(S1), true, true);
        let out = apply_scope_to_sql(
            "SELECT * FROM produk p WHERE p.kategori_id = ?",
            vec!["K1".into()],
            &scope,
            &ScopeColumns::tenant_store("p.tenant_id", "p.toko_id"),
        );
        assert_eq!(
            out.sql,
            "SELECT * FROM produk p WHERE p.kategori_id = ? AND p.tenant_id = ? AND p.toko_id = ?"
        );
        assert_eq!(
            out.params,
            vec![
                SqlParam::Text("K1".to_string()),
                SqlParam::Text(T1.to_string()),
                SqlParam::Text(S1.to_string()),
            ]
        );
    }

    #[test]
    fn test_no_duplicate_where_ever() {
        let scope = scope(Some(T1), Some(S1), true, true);
        let out = apply_scope_to_sql(
            "SELECT * FROM toko t WHERE 1=1",
            vec![],
            &scope,
            &ScopeColumns::tenant("t.tenant_id"),
        );
        assert_eq!(out.sql.to_uppercase().matches("WHERE").count(), 1);
    }

    #[test]
    fn test_where_detection_is_case_insensitive() {
        let scope = scope(Some(T1), None, true, false);
        let out = apply_scope_to_sql(
            "select * from kategori where status = ?",
            vec!["aktif".into()],
            &scope,
            &ScopeColumns::tenant("tenant_id"),
        );
        assert_eq!(
            out.sql,
            "select * from kategori where status = ? AND tenant_id = ?"
        );
    }

    #[test]
    fn test_noop_when_nothing_enforced() {
        let scope = scope(Some(T1), Some(S1), false, false);
        let out = apply_scope_to_sql(
            "SELECT * FROM kategori WHERE id = ?",
            vec!["X".into()],
            &scope,
            &ScopeColumns::tenant_store("tenant_id", "toko_id"),
        );
        assert_eq!(out.sql, "SELECT * FROM kategori WHERE id = ?");
        assert_eq!(out.params, vec![SqlParam::Text("X".to_string())]);
    }

    #[test]
    fn test_noop_when_no_columns_supplied() {
        let scope = scope(Some(T1), Some(S1), true, true);
        let out = apply_scope_to_sql(
            "SELECT * FROM kategori WHERE id = ?",
            vec!["X".into()],
            &scope,
            &ScopeColumns::none(),
        );
        assert_eq!(out.sql, "SELECT * FROM kategori WHERE id = ?");
    }

    #[test]
    fn test_store_predicate_skipped_without_store_id() {
        let scope = scope(Some(T1), None, true, true);
        let out = apply_scope_to_sql(
            "SELECT * FROM kategori",
            vec![],
            &scope,
            &ScopeColumns::tenant_store("tenant_id", "toko_id"),
        );
        assert_eq!(out.sql, "SELECT * FROM kategori WHERE tenant_id = ?");
        assert_eq!(out.params.len(), 1);
    }

    #[rstest]
    #[case(true, true)]
    #[case(true, false)]
    #[case(false, true)]
    #[case(false, false)]
    fn test_params_align_with_placeholders(#[case] enforce_tenant: bool, #[case] enforce_store: bool) {
        let scope = scope(Some(T1), Some(S1), enforce_tenant, enforce_store);
        let out = apply_scope_to_sql(
            "SELECT * FROM produk p WHERE p.kategori_id = ? AND p.status = ?",
            vec!["K1".into(), "aktif".into()],
            &scope,
            &ScopeColumns::tenant_store("p.tenant_id", "p.toko_id"),
        );
        assert_eq!(placeholder_count(&out.sql), out.params.len());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let scope = scope(Some(T1), None, true, false);
        let params: Vec<SqlParam> = vec!["K1".into()];
        let sql = "SELECT * FROM kategori WHERE x = ?";
        let out = apply_scope_to_sql(sql, params.clone(), &scope, &ScopeColumns::tenant("tenant_id"));
        // the originals are untouched; only the returned value grew
        assert_eq!(sql, "SELECT * FROM kategori WHERE x = ?");
        assert_eq!(out.params.len(), params.len() + 1);
    }

    #[test]
    fn test_option_param_conversion() {
        let present: SqlParam = Some("x").into();
        let absent: SqlParam = Option::<String>::None.into();
        assert_eq!(present, SqlParam::Text("x".to_string()));
        assert_eq!(absent, SqlParam::Null);
    }
}
