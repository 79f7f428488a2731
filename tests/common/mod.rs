//! Common test utilities
//!
//! Integration tests talk to a real MySQL instance. `get_test_pool` fails
//! fast when none is reachable so each test can skip itself instead of
//! hanging; isolation between tests comes from unique tenant ids, not from
//! truncation.

// not every test binary uses every helper
#![allow(dead_code)]

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::sync::Once;
use std::time::Duration;
use tokopos_core::domain::{PrivilegeLevel, StringUuid};
use tokopos_core::scope::AccessScope;

static ENV_INIT: Once = Once::new();

pub async fn get_test_pool() -> Result<MySqlPool, sqlx::Error> {
    ENV_INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });

    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| "mysql://root@127.0.0.1:3306/tokopos_test".to_string());

    MySqlPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&url)
        .await
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS tenants (
        id CHAR(36) PRIMARY KEY,
        nama VARCHAR(255) NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'aktif',
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        diperbarui_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS toko (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        kode VARCHAR(20) NOT NULL,
        nama VARCHAR(255) NOT NULL,
        alamat TEXT NULL,
        telepon VARCHAR(32) NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'aktif',
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        diperbarui_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        UNIQUE KEY uq_toko_kode (tenant_id, kode)
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NULL,
        nama_lengkap VARCHAR(255) NOT NULL,
        level INT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS kategori (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        toko_id CHAR(36) NULL,
        nama VARCHAR(100) NOT NULL,
        deskripsi TEXT NULL,
        urutan INT NOT NULL DEFAULT 0,
        status VARCHAR(16) NOT NULL DEFAULT 'aktif',
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        diperbarui_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS brand (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        toko_id CHAR(36) NULL,
        nama VARCHAR(100) NOT NULL,
        deskripsi TEXT NULL,
        website VARCHAR(255) NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'aktif',
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        diperbarui_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS supplier (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        toko_id CHAR(36) NULL,
        nama VARCHAR(150) NOT NULL,
        kontak VARCHAR(100) NULL,
        telepon VARCHAR(32) NULL,
        alamat TEXT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'aktif',
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        diperbarui_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS audit_log (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        user_id CHAR(36) NULL,
        tabel VARCHAR(64) NOT NULL,
        record_id VARCHAR(64) NOT NULL,
        aksi VARCHAR(32) NOT NULL,
        data_lama JSON NULL,
        data_baru JSON NULL,
        ip_address VARCHAR(45) NULL,
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS konfigurasi_sistem (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        toko_id CHAR(36) NULL,
        kunci VARCHAR(100) NOT NULL,
        nilai TEXT NOT NULL,
        deskripsi TEXT NULL,
        dibuat_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        diperbarui_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        UNIQUE KEY uq_konfigurasi (tenant_id, toko_id, kunci)
    )",
    "CREATE TABLE IF NOT EXISTS stok_opname (
        id CHAR(36) PRIMARY KEY,
        tenant_id CHAR(36) NOT NULL,
        toko_id CHAR(36) NOT NULL,
        user_id CHAR(36) NOT NULL,
        catatan TEXT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'berjalan',
        dimulai_pada TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        selesai_pada TIMESTAMP NULL
    )",
];

pub async fn setup_database(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

pub async fn seed_tenant(pool: &MySqlPool, nama: &str) -> StringUuid {
    let id = StringUuid::new_v4();
    sqlx::query("INSERT INTO tenants (id, nama, status) VALUES (?, ?, 'aktif')")
        .bind(id)
        .bind(nama)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn seed_store(pool: &MySqlPool, tenant_id: StringUuid, kode: &str, nama: &str) -> StringUuid {
    let id = StringUuid::new_v4();
    sqlx::query("INSERT INTO toko (id, tenant_id, kode, nama, status) VALUES (?, ?, ?, ?, 'aktif')")
        .bind(id)
        .bind(tenant_id)
        .bind(kode)
        .bind(nama)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn seed_user(pool: &MySqlPool, tenant_id: StringUuid, nama: &str, level: u8) -> StringUuid {
    let id = StringUuid::new_v4();
    sqlx::query("INSERT INTO users (id, tenant_id, nama_lengkap, level) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(tenant_id)
        .bind(nama)
        .bind(level as i32)
        .execute(pool)
        .await
        .unwrap();
    id
}

fn base_scope(tenant_id: StringUuid, level: PrivilegeLevel) -> AccessScope {
    AccessScope {
        tenant_id: Some(tenant_id),
        store_id: None,
        level,
        is_god_bypass: false,
        enforce_tenant: true,
        enforce_store: false,
        target_tenant_id: None,
        target_store_id: None,
        apply_to_all_tenants: false,
        apply_to_all_stores: false,
    }
}

/// Tenant-wide admin scope.
pub fn admin_scope(tenant_id: StringUuid) -> AccessScope {
    base_scope(tenant_id, PrivilegeLevel::Admin)
}

/// Store-bound manager scope.
pub fn manager_scope(tenant_id: StringUuid, store_id: StringUuid) -> AccessScope {
    let mut scope = base_scope(tenant_id, PrivilegeLevel::Manager);
    scope.store_id = Some(store_id);
    scope.enforce_store = true;
    scope
}

/// Unrestricted platform bypass scope.
pub fn bypass_scope() -> AccessScope {
    AccessScope {
        tenant_id: None,
        store_id: None,
        level: PrivilegeLevel::SuperAdmin,
        is_god_bypass: true,
        enforce_tenant: false,
        enforce_store: false,
        target_tenant_id: None,
        target_store_id: None,
        apply_to_all_tenants: false,
        apply_to_all_stores: false,
    }
}
