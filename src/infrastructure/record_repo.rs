use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::RecordStore;
use crate::schema::storefront_records;

use super::models::NewRecordRow;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Durable record store: one row per key in `storefront_records`.
pub struct DieselRecordStore {
    pool: DbPool,
}

impl DieselRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RecordStore for DieselRecordStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.pool.get()?;

        let value = storefront_records::table
            .find(key)
            .select(storefront_records::value)
            .first::<String>(&mut conn)
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let row = NewRecordRow {
            key,
            value,
            updated_at: Utc::now(),
        };
        diesel::insert_into(storefront_records::table)
            .values(&row)
            .on_conflict(storefront_records::key)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;
        Ok(())
    }
}
