//! Identity consolidation service.
//!
//! This module implements the driving port for identity resolution:
//! matching stored contact records against an incoming (email, phone
//! number) pair, deciding primary/secondary precedence, merging two
//! previously-separate clusters when a new fact bridges them, and
//! detecting submissions that are already fully known.
//!
//! Mutations are ordered so that nothing is written before the
//! duplicate/conflict check passes, and a failed demotion aborts the
//! request rather than reporting a view the store does not hold.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::Error;
use crate::domain::contact::{Contact, LinkPrecedence, NewContact};
use crate::domain::identity::{ConsolidatedIdentity, Resolution};
use crate::domain::ports::{ContactRepository, ContactRepositoryError, IdentifyContact};

/// Identity resolver implementing the consolidation algorithm over a
/// [`ContactRepository`].
#[derive(Clone)]
pub struct IdentityResolver<R> {
    contacts: Arc<R>,
}

impl<R> IdentityResolver<R> {
    /// Create a resolver over the given repository.
    pub fn new(contacts: Arc<R>) -> Self {
        Self { contacts }
    }
}

impl<R> IdentityResolver<R>
where
    R: ContactRepository,
{
    fn map_repository_error(error: ContactRepositoryError) -> Error {
        match error {
            ContactRepositoryError::Connection { message } => {
                Error::internal(format!("contact repository unavailable: {message}"))
            }
            ContactRepositoryError::Query { message } => {
                Error::internal(format!("contact repository error: {message}"))
            }
        }
    }

    /// Duplicate-or-conflict check, run before any mutation.
    ///
    /// Fires when the exact pair is already stored, or when the first
    /// matched primary satisfying the email-or-phone match has a matched
    /// secondary linked to it that also satisfies it: both ends of the
    /// new fact are already known inside one cluster. The second branch
    /// is deliberately narrower than general duplicate detection; a
    /// secondary linked to a different primary does not trigger it.
    fn finds_duplicate_or_conflict(matches: &[Contact], email: &str, phone_number: &str) -> bool {
        let duplicate = matches.iter().any(|c| c.is_exact(email, phone_number));

        let conflict = matches
            .iter()
            .find(|c| c.is_primary() && c.matches(email, phone_number))
            .is_some_and(|primary| {
                matches.iter().any(|c| {
                    !c.is_primary()
                        && c.linked_id == Some(primary.id)
                        && c.matches(email, phone_number)
                })
            });

        duplicate || conflict
    }

    async fn create_identity(&self, email: &str, phone_number: &str) -> Result<Resolution, Error> {
        let fresh = NewContact::primary(email, phone_number, Utc::now());
        let id = self
            .contacts
            .insert(&fresh)
            .await
            .map_err(Self::map_repository_error)?;

        Ok(Resolution::Created(ConsolidatedIdentity::for_new_primary(
            id,
            email,
            phone_number,
        )))
    }

    /// Two independent primaries belong to the same person: the older
    /// one survives, the younger is rewritten into its secondary. No new
    /// row is created.
    async fn merge_clusters(
        &self,
        surviving: &Contact,
        demoting: &Contact,
        mut secondaries: Vec<Contact>,
    ) -> Result<Resolution, Error> {
        let now = Utc::now();
        self.contacts
            .demote_to_secondary(demoting.id, surviving.id, now)
            .await
            .map_err(Self::map_repository_error)?;

        let mut demoted = demoting.clone();
        demoted.linked_id = Some(surviving.id);
        demoted.link_precedence = LinkPrecedence::Secondary;
        demoted.updated_at = now;
        secondaries.push(demoted);

        Ok(Resolution::Linked(ConsolidatedIdentity::consolidate(
            surviving,
            &secondaries,
        )))
    }

    /// The pair extends one known cluster with a fact not previously
    /// seen together: record it as a secondary of that cluster's primary.
    async fn extend_cluster(
        &self,
        primary: &Contact,
        email: &str,
        phone_number: &str,
        mut secondaries: Vec<Contact>,
    ) -> Result<Resolution, Error> {
        let extension = NewContact::secondary(email, phone_number, primary.id, Utc::now());
        let id = self
            .contacts
            .insert(&extension)
            .await
            .map_err(Self::map_repository_error)?;
        secondaries.push(extension.into_contact(id));

        Ok(Resolution::Linked(ConsolidatedIdentity::consolidate(
            primary,
            &secondaries,
        )))
    }
}

#[async_trait]
impl<R> IdentifyContact for IdentityResolver<R>
where
    R: ContactRepository,
{
    async fn identify(&self, email: &str, phone_number: &str) -> Result<Resolution, Error> {
        let matches = self
            .contacts
            .find_matches(email, phone_number)
            .await
            .map_err(Self::map_repository_error)?;

        if matches.is_empty() {
            return self.create_identity(email, phone_number).await;
        }

        if Self::finds_duplicate_or_conflict(&matches, email, phone_number) {
            return Ok(Resolution::Conflict);
        }

        let secondaries: Vec<Contact> =
            matches.iter().filter(|c| !c.is_primary()).cloned().collect();

        let mut qualifying = matches
            .iter()
            .filter(|c| c.is_primary() && c.matches(email, phone_number));
        let first = qualifying.next();
        let second = qualifying.next();

        if let (Some(surviving), Some(demoting)) = (first, second) {
            return self.merge_clusters(surviving, demoting, secondaries).await;
        }

        // Matches are non-empty but may still lack a primary if the data
        // is malformed; never mutate in that state.
        let Some(primary) = matches.iter().find(|c| c.is_primary()) else {
            return Ok(Resolution::NoPrimaryFound);
        };

        self.extend_cluster(primary, email, phone_number, secondaries)
            .await
    }
}
