//! Port for contact record persistence.
//!
//! The [`ContactRepository`] trait is the hexagonal boundary in front of
//! durable contact storage. Adapters own every SQL concern; the resolver
//! only sees domain types. No business decision lives behind this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::contact::{Contact, ContactId, NewContact};

/// Errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// A connection could not be established or checked out.
    #[error("contact repository connection failed: {message}")]
    Connection {
        /// Adapter-level description of the connectivity failure.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query {
        /// Adapter-level description of the statement failure.
        message: String,
    },
}

impl ContactRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for contact storage and retrieval.
///
/// # Ordering
///
/// [`ContactRepository::find_matches`] must return records in ascending
/// id order (creation order). The resolver's "first match is the oldest
/// primary" reasoning depends on this being deterministic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every record whose email equals `email` or whose phone number
    /// equals `phone_number`, ascending by id.
    ///
    /// An empty vec signals no prior knowledge of this person.
    async fn find_matches(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Persist a new record and return its store-assigned id.
    async fn insert(&self, contact: &NewContact) -> Result<ContactId, ContactRepositoryError>;

    /// Rewrite an existing primary into a secondary of `new_primary`,
    /// refreshing `updated_at`. Idempotent: re-applying the same rewrite
    /// leaves the row in the same state.
    async fn demote_to_secondary(
        &self,
        id: ContactId,
        new_primary: ContactId,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ContactRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups report no prior knowledge, inserts pretend the store assigned
/// id 1, and demotions succeed without effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactRepository;

#[async_trait]
impl ContactRepository for FixtureContactRepository {
    async fn find_matches(
        &self,
        _email: &str,
        _phone_number: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _contact: &NewContact) -> Result<ContactId, ContactRepositoryError> {
        Ok(ContactId::new(1))
    }

    async fn demote_to_secondary(
        &self,
        _id: ContactId,
        _new_primary: ContactId,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), ContactRepositoryError> {
        Ok(())
    }
}
