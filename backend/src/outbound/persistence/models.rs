//! Internal Diesel row structs for the contacts table.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. They exist solely to satisfy Diesel's type requirements for
//! queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::contacts;

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub linked_id: Option<i32>,
    pub link_precedence: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating contact records; the id comes from the
/// database sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub phone_number: Option<&'a str>,
    pub email: Option<&'a str>,
    pub linked_id: Option<i32>,
    pub link_precedence: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct rewriting a primary into a secondary.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
pub(crate) struct ContactLinkUpdate<'a> {
    pub linked_id: i32,
    pub link_precedence: &'a str,
    pub updated_at: DateTime<Utc>,
}
