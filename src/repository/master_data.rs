//! Master data repository: categories, brands, suppliers
//!
//! These tables carry `tenant_id` plus a nullable `toko_id`, so their reads
//! compose both predicates and their broadcast creates go through
//! [`BulkRowWriter`] implementations defined here.

use crate::domain::{
    Brand, Category, CreateBrandInput, CreateCategoryInput, CreateSupplierInput, RecordStatus,
    StringUuid, Supplier, UpdateCategoryInput,
};
use crate::error::Result;
use crate::scope::{
    apply_scope_to_sql, bind_params, bind_params_as, AccessScope, BulkRowWriter, BulkTarget,
    InsertScope, ScopeColumns, SqlParam,
};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MasterDataRepository: Send + Sync {
    async fn list_categories(&self, scope: &AccessScope) -> Result<Vec<Category>>;
    async fn find_category(&self, scope: &AccessScope, id: StringUuid) -> Result<Option<Category>>;
    async fn create_category(
        &self,
        stamp: &InsertScope,
        input: &CreateCategoryInput,
    ) -> Result<Category>;
    async fn update_category(
        &self,
        scope: &AccessScope,
        id: StringUuid,
        input: &UpdateCategoryInput,
    ) -> Result<bool>;
    async fn delete_category(&self, scope: &AccessScope, id: StringUuid) -> Result<bool>;

    async fn list_brands(&self, scope: &AccessScope) -> Result<Vec<Brand>>;
    async fn create_brand(&self, stamp: &InsertScope, input: &CreateBrandInput) -> Result<Brand>;

    async fn list_suppliers(&self, scope: &AccessScope) -> Result<Vec<Supplier>>;
    async fn create_supplier(
        &self,
        stamp: &InsertScope,
        input: &CreateSupplierInput,
    ) -> Result<Supplier>;
}

pub struct MasterDataRepositoryImpl {
    pool: MySqlPool,
}

impl MasterDataRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MasterDataRepository for MasterDataRepositoryImpl {
    async fn list_categories(&self, scope: &AccessScope) -> Result<Vec<Category>> {
        let base = "SELECT k.id, k.tenant_id, k.toko_id, k.nama, k.deskripsi, k.urutan, k.status, \
             k.dibuat_pada, k.diperbarui_pada FROM kategori k WHERE k.status = ?";
        let mut scoped = apply_scope_to_sql(
            base,
            vec![RecordStatus::Aktif.to_string().into()],
            scope,
            &ScopeColumns::tenant_store("k.tenant_id", "k.toko_id"),
        );
        scoped.sql.push_str(" ORDER BY k.urutan ASC, k.nama ASC");

        let categories = bind_params_as::<Category>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn find_category(
        &self,
        scope: &AccessScope,
        id: StringUuid,
    ) -> Result<Option<Category>> {
        let base = "SELECT k.id, k.tenant_id, k.toko_id, k.nama, k.deskripsi, k.urutan, k.status, \
             k.dibuat_pada, k.diperbarui_pada FROM kategori k WHERE k.id = ?";
        let scoped = apply_scope_to_sql(
            base,
            vec![id.into()],
            scope,
            &ScopeColumns::tenant("k.tenant_id"),
        );
        let category = bind_params_as::<Category>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn create_category(
        &self,
        stamp: &InsertScope,
        input: &CreateCategoryInput,
    ) -> Result<Category> {
        let id = StringUuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO kategori (id, tenant_id, toko_id, nama, deskripsi, urutan, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(stamp.tenant_id)
        .bind(stamp.store_id)
        .bind(&input.nama)
        .bind(&input.deskripsi)
        .bind(input.urutan.unwrap_or(0))
        .execute(&self.pool)
        .await?;

        let category = sqlx::query_as::<_, Category>(
            "SELECT k.id, k.tenant_id, k.toko_id, k.nama, k.deskripsi, k.urutan, k.status, \
             k.dibuat_pada, k.diperbarui_pada FROM kategori k WHERE k.id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        scope: &AccessScope,
        id: StringUuid,
        input: &UpdateCategoryInput,
    ) -> Result<bool> {
        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(nama) = &input.nama {
            sets.push("nama = ?");
            params.push(nama.as_str().into());
        }
        if let Some(deskripsi) = &input.deskripsi {
            sets.push("deskripsi = ?");
            params.push(deskripsi.as_str().into());
        }
        if let Some(urutan) = input.urutan {
            sets.push("urutan = ?");
            params.push(urutan.into());
        }
        if let Some(status) = input.status {
            sets.push("status = ?");
            params.push(status.to_string().into());
        }
        if sets.is_empty() {
            return Ok(false);
        }
        sets.push("diperbarui_pada = NOW()");

        let base = format!("UPDATE kategori SET {} WHERE id = ?", sets.join(", "));
        params.push(id.into());
        let scoped = apply_scope_to_sql(
            &base,
            params,
            scope,
            &ScopeColumns::tenant_store("tenant_id", "toko_id"),
        );

        let result = bind_params(sqlx::query(&scoped.sql), &scoped.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, scope: &AccessScope, id: StringUuid) -> Result<bool> {
        // soft delete, matching the rest of master data
        let base = "UPDATE kategori SET status = 'nonaktif', diperbarui_pada = NOW() WHERE id = ?";
        let scoped = apply_scope_to_sql(
            base,
            vec![id.into()],
            scope,
            &ScopeColumns::tenant_store("tenant_id", "toko_id"),
        );
        let result = bind_params(sqlx::query(&scoped.sql), &scoped.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_brands(&self, scope: &AccessScope) -> Result<Vec<Brand>> {
        let base = "SELECT b.id, b.tenant_id, b.toko_id, b.nama, b.deskripsi, b.website, b.status, \
             b.dibuat_pada, b.diperbarui_pada FROM brand b WHERE b.status = ?";
        let mut scoped = apply_scope_to_sql(
            base,
            vec![RecordStatus::Aktif.to_string().into()],
            scope,
            &ScopeColumns::tenant_store("b.tenant_id", "b.toko_id"),
        );
        scoped.sql.push_str(" ORDER BY b.nama ASC");

        let brands = bind_params_as::<Brand>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(brands)
    }

    async fn create_brand(&self, stamp: &InsertScope, input: &CreateBrandInput) -> Result<Brand> {
        let id = StringUuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO brand (id, tenant_id, toko_id, nama, deskripsi, website, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(stamp.tenant_id)
        .bind(stamp.store_id)
        .bind(&input.nama)
        .bind(&input.deskripsi)
        .bind(&input.website)
        .execute(&self.pool)
        .await?;

        let brand = sqlx::query_as::<_, Brand>(
            "SELECT b.id, b.tenant_id, b.toko_id, b.nama, b.deskripsi, b.website, b.status, \
             b.dibuat_pada, b.diperbarui_pada FROM brand b WHERE b.id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(brand)
    }

    async fn list_suppliers(&self, scope: &AccessScope) -> Result<Vec<Supplier>> {
        let base = "SELECT s.id, s.tenant_id, s.toko_id, s.nama, s.kontak, s.telepon, s.alamat, \
             s.status, s.dibuat_pada, s.diperbarui_pada FROM supplier s WHERE s.status = ?";
        let mut scoped = apply_scope_to_sql(
            base,
            vec![RecordStatus::Aktif.to_string().into()],
            scope,
            &ScopeColumns::tenant_store("s.tenant_id", "s.toko_id"),
        );
        scoped.sql.push_str(" ORDER BY s.nama ASC");

        let suppliers = bind_params_as::<Supplier>(sqlx::query_as(&scoped.sql), &scoped.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    async fn create_supplier(
        &self,
        stamp: &InsertScope,
        input: &CreateSupplierInput,
    ) -> Result<Supplier> {
        let id = StringUuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO supplier (id, tenant_id, toko_id, nama, kontak, telepon, alamat, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(stamp.tenant_id)
        .bind(stamp.store_id)
        .bind(&input.nama)
        .bind(&input.kontak)
        .bind(&input.telepon)
        .bind(&input.alamat)
        .execute(&self.pool)
        .await?;

        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT s.id, s.tenant_id, s.toko_id, s.nama, s.kontak, s.telepon, s.alamat, \
             s.status, s.dibuat_pada, s.diperbarui_pada FROM supplier s WHERE s.id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(supplier)
    }
}

/// Inserts one category row per broadcast target.
pub struct CategoryBulkWriter<'a> {
    pub input: &'a CreateCategoryInput,
}

#[async_trait]
impl BulkRowWriter for CategoryBulkWriter<'_> {
    async fn insert_row(
        &self,
        tx: &mut Transaction<'_, MySql>,
        target: &BulkTarget,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kategori (id, tenant_id, toko_id, nama, deskripsi, urutan, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(target.row_id)
        .bind(target.tenant_id)
        .bind(target.store_id)
        .bind(&self.input.nama)
        .bind(&self.input.deskripsi)
        .bind(self.input.urutan.unwrap_or(0))
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Inserts one brand row per broadcast target.
pub struct BrandBulkWriter<'a> {
    pub input: &'a CreateBrandInput,
}

#[async_trait]
impl BulkRowWriter for BrandBulkWriter<'_> {
    async fn insert_row(
        &self,
        tx: &mut Transaction<'_, MySql>,
        target: &BulkTarget,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO brand (id, tenant_id, toko_id, nama, deskripsi, website, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(target.row_id)
        .bind(target.tenant_id)
        .bind(target.store_id)
        .bind(&self.input.nama)
        .bind(&self.input.deskripsi)
        .bind(&self.input.website)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Inserts one supplier row per broadcast target.
pub struct SupplierBulkWriter<'a> {
    pub input: &'a CreateSupplierInput,
}

#[async_trait]
impl BulkRowWriter for SupplierBulkWriter<'_> {
    async fn insert_row(
        &self,
        tx: &mut Transaction<'_, MySql>,
        target: &BulkTarget,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO supplier (id, tenant_id, toko_id, nama, kontak, telepon, alamat, status, dibuat_pada, diperbarui_pada)
            VALUES (?, ?, ?, ?, ?, ?, ?, 'aktif', NOW(), NOW())
            "#,
        )
        .bind(target.row_id)
        .bind(target.tenant_id)
        .bind(target.store_id)
        .bind(&self.input.nama)
        .bind(&self.input.kontak)
        .bind(&self.input.telepon)
        .bind(&self.input.alamat)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
