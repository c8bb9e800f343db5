//! PostgreSQL-backed `ContactRepository` implementation using Diesel.
//!
//! A thin adapter: translates between Diesel rows and domain contacts
//! and maps database failures onto the port's error enum. Match ordering
//! is pinned to ascending id so the resolver's oldest-first reasoning is
//! deterministic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::contact::{Contact, ContactId, NewContact};
use crate::domain::ports::{ContactRepository, ContactRepositoryError};

use super::models::{ContactLinkUpdate, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to the port's connection error.
fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to the port's error enum, logging the detail that
/// must not reach clients.
fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => ContactRepositoryError::query("database error"),
        DieselError::NotFound => ContactRepositoryError::query("record not found"),
        _ => ContactRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain contact.
///
/// An unrecognised precedence value is corrupt data and surfaces as a
/// query error rather than being coerced to a default.
fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let link_precedence = row
        .link_precedence
        .parse()
        .map_err(|err: crate::domain::UnknownLinkPrecedence| {
            ContactRepositoryError::query(err.to_string())
        })?;

    Ok(Contact {
        id: ContactId::new(row.id),
        phone_number: row.phone_number,
        email: row.email,
        linked_id: row.linked_id.map(ContactId::new),
        link_precedence,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn find_matches(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .filter(
                contacts::email
                    .eq(email)
                    .or(contacts::phone_number.eq(phone_number)),
            )
            .order(contacts::id.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn insert(&self, contact: &NewContact) -> Result<ContactId, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewContactRow {
            phone_number: contact.phone_number.as_deref(),
            email: contact.email.as_deref(),
            linked_id: contact.linked_id.map(ContactId::value),
            link_precedence: contact.link_precedence.as_str(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        };

        let id: i32 = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(contacts::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ContactId::new(id))
    }

    async fn demote_to_secondary(
        &self,
        id: ContactId,
        new_primary: ContactId,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = ContactLinkUpdate {
            linked_id: new_primary.value(),
            link_precedence: crate::domain::LinkPrecedence::Secondary.as_str(),
            updated_at,
        };

        let updated_rows = diesel::update(contacts::table.find(id.value()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(ContactRepositoryError::query(format!(
                "contact {id} not found for demotion"
            )));
        }
        Ok(())
    }
}
