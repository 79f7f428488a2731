//! Audit repository integration tests

use tokopos_core::domain::{CreateAuditLogInput, SearchAuditQuery};
use tokopos_core::repository::audit::AuditRepositoryImpl;
use tokopos_core::repository::AuditRepository;
use tokopos_core::scope::resolve_for_insert;

mod common;

fn entry(tabel: &str, aksi: &str, user_id: Option<tokopos_core::domain::StringUuid>) -> CreateAuditLogInput {
    CreateAuditLogInput {
        user_id,
        tabel: tabel.to_string(),
        record_id: tokopos_core::domain::StringUuid::new_v4().to_string(),
        aksi: aksi.to_string(),
        data_lama: None,
        data_baru: Some(serde_json::json!({"nama": "Baru"})),
        ip_address: Some("10.0.0.1".to_string()),
    }
}

#[tokio::test]
async fn test_search_is_tenant_scoped_and_joins_user_name() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };
    common::setup_database(&pool).await.unwrap();

    let tenant_a = common::seed_tenant(&pool, "Tenant Audit A").await;
    let tenant_b = common::seed_tenant(&pool, "Tenant Audit B").await;
    let user = common::seed_user(&pool, tenant_a, "Budi Santoso", 2).await;

    let repo = AuditRepositoryImpl::new(pool);
    let scope_a = common::admin_scope(tenant_a);
    let scope_b = common::admin_scope(tenant_b);

    let stamp_a = resolve_for_insert(&scope_a, None).unwrap();
    let stamp_b = resolve_for_insert(&scope_b, None).unwrap();
    let id_a = repo
        .create(&stamp_a, &entry("kategori", "CREATE", Some(user)))
        .await
        .unwrap();
    repo.create(&stamp_b, &entry("kategori", "CREATE", None))
        .await
        .unwrap();

    let (logs, total) = repo
        .search(&scope_a, &SearchAuditQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(logs[0].id, id_a);
    assert_eq!(logs[0].user_nama.as_deref(), Some("Budi Santoso"));
    assert_eq!(
        logs[0].data_baru,
        Some(serde_json::json!({"nama": "Baru"}))
    );
}

#[tokio::test]
async fn test_search_filters_by_table_and_action() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };
    common::setup_database(&pool).await.unwrap();

    let tenant = common::seed_tenant(&pool, "Tenant Audit Filter").await;
    let repo = AuditRepositoryImpl::new(pool);
    let scope = common::admin_scope(tenant);
    let stamp = resolve_for_insert(&scope, None).unwrap();

    repo.create(&stamp, &entry("kategori", "CREATE", None)).await.unwrap();
    repo.create(&stamp, &entry("kategori", "DELETE", None)).await.unwrap();
    repo.create(&stamp, &entry("toko", "CREATE", None)).await.unwrap();

    let query = SearchAuditQuery {
        tabel: Some("kategori".to_string()),
        aksi: Some("DELETE".to_string()),
        ..Default::default()
    };
    let (logs, total) = repo.search(&scope, &query).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(logs[0].tabel, "kategori");
    assert_eq!(logs[0].aksi, "DELETE");
}

#[tokio::test]
async fn test_activity_summary_counts_per_action() {
    let pool = match common::get_test_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: could not connect to database: {}", e);
            return;
        }
    };
    common::setup_database(&pool).await.unwrap();

    let tenant = common::seed_tenant(&pool, "Tenant Audit Summary").await;
    let user = common::seed_user(&pool, tenant, "Siti Aminah", 3).await;

    let repo = AuditRepositoryImpl::new(pool);
    let scope = common::admin_scope(tenant);
    let stamp = resolve_for_insert(&scope, None).unwrap();

    repo.create(&stamp, &entry("kategori", "UPDATE", Some(user))).await.unwrap();
    repo.create(&stamp, &entry("kategori", "UPDATE", Some(user))).await.unwrap();

    let summary = repo
        .activity_summary(&scope, "2000-01-01", "2099-12-31")
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].aksi, "UPDATE");
    assert_eq!(summary[0].jumlah_aktivitas, 2);
    assert_eq!(summary[0].jumlah_user, 1);
}
