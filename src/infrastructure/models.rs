use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::storefront_records;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = storefront_records)]
#[diesel(primary_key(key))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecordRow {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = storefront_records)]
pub struct NewRecordRow<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: DateTime<Utc>,
}
