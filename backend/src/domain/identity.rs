//! Consolidated identity views and resolution outcomes.
//!
//! After resolution, an identity cluster is reported as one primary
//! record plus every linked secondary, with the union of their known
//! emails and phone numbers. The union preserves first-seen order, lists
//! the primary's own value first, and removes duplicates by value
//! wherever they came from.

use serde::Serialize;

use super::contact::{Contact, ContactId};

/// One resolved identity: the cluster anchor plus everything known
/// about the person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedIdentity {
    /// Identifier of the cluster's primary record.
    pub primary_contact_id: ContactId,
    /// De-duplicated union of known emails, primary's first.
    pub emails: Vec<String>,
    /// De-duplicated union of known phone numbers, primary's first.
    pub phone_numbers: Vec<String>,
    /// Identifiers of the linked secondary records, in match order.
    pub secondary_contact_ids: Vec<ContactId>,
}

impl ConsolidatedIdentity {
    /// View for a brand-new identity: exactly the submitted pair, no
    /// secondaries.
    pub fn for_new_primary(id: ContactId, email: &str, phone_number: &str) -> Self {
        Self {
            primary_contact_id: id,
            emails: vec![email.to_owned()],
            phone_numbers: vec![phone_number.to_owned()],
            secondary_contact_ids: Vec::new(),
        }
    }

    /// Build the view for an existing cluster from its primary and the
    /// secondaries known to belong to it.
    pub fn consolidate(primary: &Contact, secondaries: &[Contact]) -> Self {
        let emails = dedup_first_seen(
            primary.email.as_deref(),
            secondaries.iter().map(|c| c.email.as_deref()),
        );
        let phone_numbers = dedup_first_seen(
            primary.phone_number.as_deref(),
            secondaries.iter().map(|c| c.phone_number.as_deref()),
        );
        Self {
            primary_contact_id: primary.id,
            emails,
            phone_numbers,
            secondary_contact_ids: secondaries.iter().map(|c| c.id).collect(),
        }
    }
}

/// Union with the primary's value first, first-seen order otherwise,
/// duplicates removed by value and missing values skipped.
fn dedup_first_seen<'a>(
    primary: Option<&'a str>,
    rest: impl Iterator<Item = Option<&'a str>>,
) -> Vec<String> {
    let mut seen = Vec::new();
    for value in std::iter::once(primary).chain(rest).flatten() {
        if !seen.iter().any(|known| known == value) {
            seen.push(value.to_owned());
        }
    }
    seen
}

/// Outcome of one resolution request.
///
/// `Conflict` and `NoPrimaryFound` are resolution outcomes, not errors:
/// the resolver reports them without raising, and the HTTP adapter maps
/// them onto the contracted status codes.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No prior record matched; a fresh primary was created.
    Created(ConsolidatedIdentity),
    /// The pair was linked into an existing cluster (extension or merge).
    Linked(ConsolidatedIdentity),
    /// The submitted pair is already fully known; nothing was mutated.
    Conflict,
    /// Matches existed but none was a primary; the data is malformed.
    NoPrimaryFound,
}
