//! Test doubles shared by the HTTP flow suite.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use backend::domain::contact::{Contact, ContactId, LinkPrecedence, NewContact};
use backend::domain::ports::{ContactRepository, ContactRepositoryError};

/// In-memory `ContactRepository` with store-assigned sequential ids,
/// mirroring the ascending-id ordering contract of the real adapter.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    rows: Mutex<Vec<Contact>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the resolver. Returns the
    /// assigned id.
    pub fn seed(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
        link_precedence: LinkPrecedence,
        linked_id: Option<ContactId>,
    ) -> ContactId {
        let mut rows = self.rows.lock().expect("rows lock");
        let id = ContactId::new(next_id(&rows));
        rows.push(Contact {
            id,
            phone_number: phone_number.map(str::to_owned),
            email: email.map(str::to_owned),
            linked_id,
            link_precedence,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        });
        id
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }

    pub fn snapshot(&self) -> Vec<Contact> {
        self.rows.lock().expect("rows lock").clone()
    }
}

fn next_id(rows: &[Contact]) -> i32 {
    rows.iter().map(|c| c.id.value()).max().unwrap_or(0) + 1
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_matches(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        let mut matches: Vec<Contact> = rows
            .iter()
            .filter(|c| c.matches(email, phone_number))
            .cloned()
            .collect();
        matches.sort_by_key(|c| c.id);
        Ok(matches)
    }

    async fn insert(&self, contact: &NewContact) -> Result<ContactId, ContactRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let id = ContactId::new(next_id(&rows));
        rows.push(contact.clone().into_contact(id));
        Ok(id)
    }

    async fn demote_to_secondary(
        &self,
        id: ContactId,
        new_primary: ContactId,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ContactRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let Some(row) = rows.iter_mut().find(|c| c.id == id) else {
            return Err(ContactRepositoryError::query(format!(
                "contact {id} not found for demotion"
            )));
        };
        row.linked_id = Some(new_primary);
        row.link_precedence = LinkPrecedence::Secondary;
        row.updated_at = updated_at;
        Ok(())
    }
}
