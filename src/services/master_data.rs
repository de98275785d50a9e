//! CRUD over the four reference tables. They share one row shape (amenities
//! additionally carry an icon), so a single service parameterized by table
//! covers all of them. Deleting a row that hotels still reference is not
//! guarded here; the database's foreign-key check rejects it.

use sqlx::SqlitePool;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use crate::models::master::{MasterInput, MasterRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterTable {
    Types,
    Chains,
    Areas,
    Amenities,
}

impl MasterTable {
    fn table_name(self) -> &'static str {
        match self {
            MasterTable::Types => "property_types",
            MasterTable::Chains => "chains",
            MasterTable::Areas => "areas",
            MasterTable::Amenities => "amenities",
        }
    }

    fn label(self) -> &'static str {
        match self {
            MasterTable::Types => "property type",
            MasterTable::Chains => "chain",
            MasterTable::Areas => "area",
            MasterTable::Amenities => "amenity",
        }
    }
}

#[derive(Clone)]
pub struct MasterDataService {
    pool: SqlitePool,
}

impl MasterDataService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Alphabetical by English name; `active_only` is what dropdowns use.
    pub async fn list(
        &self,
        table: MasterTable,
        active_only: bool,
    ) -> ServiceResult<Vec<MasterRecord>> {
        let mut sql = format!("SELECT * FROM {}", table.table_name());
        if active_only {
            sql.push_str(" WHERE status = 'active'");
        }
        sql.push_str(" ORDER BY name_en ASC");

        sqlx::query_as::<_, MasterRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("failed to list {}s: {e}", table.label());
                ServiceError::from(e)
            })
    }

    pub async fn create(
        &self,
        table: MasterTable,
        input: &MasterInput,
    ) -> ServiceResult<MasterRecord> {
        input.validate()?;

        let record = if table == MasterTable::Amenities {
            sqlx::query_as::<_, MasterRecord>(
                "INSERT INTO amenities (name_en, name_ar, icon, status) \
                 VALUES (?, ?, ?, ?) RETURNING *",
            )
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.icon)
            .bind(&input.status)
            .fetch_one(&self.pool)
            .await
        } else {
            let sql = format!(
                "INSERT INTO {} (name_en, name_ar, status) VALUES (?, ?, ?) RETURNING *",
                table.table_name()
            );
            sqlx::query_as::<_, MasterRecord>(&sql)
                .bind(&input.name_en)
                .bind(&input.name_ar)
                .bind(&input.status)
                .fetch_one(&self.pool)
                .await
        };

        record.map_err(|e| {
            log::error!("failed to create {}: {e}", table.label());
            ServiceError::from(e)
        })
    }

    pub async fn update(
        &self,
        table: MasterTable,
        id: i64,
        input: &MasterInput,
    ) -> ServiceResult<MasterRecord> {
        input.validate()?;

        let record = if table == MasterTable::Amenities {
            sqlx::query_as::<_, MasterRecord>(
                "UPDATE amenities SET name_en = ?, name_ar = ?, icon = ?, status = ?, \
                 updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING *",
            )
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.icon)
            .bind(&input.status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
        } else {
            let sql = format!(
                "UPDATE {} SET name_en = ?, name_ar = ?, status = ?, \
                 updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING *",
                table.table_name()
            );
            sqlx::query_as::<_, MasterRecord>(&sql)
                .bind(&input.name_en)
                .bind(&input.name_ar)
                .bind(&input.status)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
        };

        let record = record.map_err(|e| {
            log::error!("failed to update {} {id}: {e}", table.label());
            ServiceError::from(e)
        })?;

        record.ok_or(ServiceError::NotFound(table.label()))
    }

    pub async fn delete(&self, table: MasterTable, id: i64) -> ServiceResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table.table_name());
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("failed to delete {} {id}: {e}", table.label());
                ServiceError::from(e)
            })?;
        Ok(())
    }
}
