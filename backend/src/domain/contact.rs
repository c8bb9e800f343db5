//! Contact records and their linkage model.
//!
//! A [`Contact`] is one known (email, phone number) observation about a
//! customer. Records form clusters: exactly one `primary` record anchors
//! each cluster and every other member is a `secondary` linking directly
//! to it. Link depth never exceeds one: a secondary must never point at
//! another secondary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a persisted contact record, assigned by the store on
/// creation and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    /// Wrap a store-assigned identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value as persisted.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a record anchors its cluster or extends one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPrecedence {
    /// The canonical record anchoring an identity cluster.
    Primary,
    /// An additional known fact about an already-identified person,
    /// linked to a primary.
    Secondary,
}

impl LinkPrecedence {
    /// Stable string form used in the persisted schema.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl std::str::FromStr for LinkPrecedence {
    type Err = UnknownLinkPrecedence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(UnknownLinkPrecedence {
                value: other.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for LinkPrecedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a persisted precedence value is neither `primary` nor
/// `secondary`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown link precedence value: {value}")]
pub struct UnknownLinkPrecedence {
    /// The offending persisted value.
    pub value: String,
}

/// A persisted contact record.
///
/// ## Invariants
/// - `linked_id` is `None` exactly when `link_precedence` is `Primary`.
/// - A `linked_id` always references a record currently marked primary.
/// - `deleted_at` is carried for the schema but never consulted by the
///   resolution logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier.
    pub id: ContactId,
    /// Known phone number, if this record carries one.
    pub phone_number: Option<String>,
    /// Known email address, if this record carries one.
    pub email: Option<String>,
    /// The primary this record links to; `None` for primaries.
    pub linked_id: Option<ContactId>,
    /// Primary or secondary standing within the cluster.
    pub link_precedence: LinkPrecedence,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
    /// Reserved for soft deletion; always `None` in this design.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Contact {
    /// Whether this record anchors its cluster.
    pub fn is_primary(&self) -> bool {
        self.link_precedence == LinkPrecedence::Primary
    }

    /// Whether this record shares either contact point with the input.
    pub fn matches(&self, email: &str, phone_number: &str) -> bool {
        self.email.as_deref() == Some(email) || self.phone_number.as_deref() == Some(phone_number)
    }

    /// Whether this record carries exactly the input pair.
    pub fn is_exact(&self, email: &str, phone_number: &str) -> bool {
        self.email.as_deref() == Some(email) && self.phone_number.as_deref() == Some(phone_number)
    }
}

/// Insertion payload for a record that does not yet have an identifier.
///
/// Constructed through [`NewContact::primary`] or
/// [`NewContact::secondary`] so the linkage rules cannot be violated at
/// the type level: a primary never carries a link, a secondary links
/// directly to the primary it extends.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    /// Phone number supplied by the request.
    pub phone_number: Option<String>,
    /// Email supplied by the request.
    pub email: Option<String>,
    /// Target primary for secondaries; `None` for primaries.
    pub linked_id: Option<ContactId>,
    /// Primary or secondary standing.
    pub link_precedence: LinkPrecedence,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` on insertion.
    pub updated_at: DateTime<Utc>,
}

impl NewContact {
    /// A fresh identity: no prior record matched either contact point.
    pub fn primary(email: &str, phone_number: &str, now: DateTime<Utc>) -> Self {
        Self {
            phone_number: Some(phone_number.to_owned()),
            email: Some(email.to_owned()),
            linked_id: None,
            link_precedence: LinkPrecedence::Primary,
            created_at: now,
            updated_at: now,
        }
    }

    /// A new fact extending an existing cluster, linked to its primary.
    pub fn secondary(
        email: &str,
        phone_number: &str,
        primary_id: ContactId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            phone_number: Some(phone_number.to_owned()),
            email: Some(email.to_owned()),
            linked_id: Some(primary_id),
            link_precedence: LinkPrecedence::Secondary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materialise the persisted record once the store has assigned an id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            phone_number: self.phone_number,
            email: self.email,
            linked_id: self.linked_id,
            link_precedence: self.link_precedence,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(email: Option<&str>, phone: Option<&str>) -> Contact {
        Contact {
            id: ContactId::new(1),
            phone_number: phone.map(str::to_owned),
            email: email.map(str::to_owned),
            linked_id: None,
            link_precedence: LinkPrecedence::Primary,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[rstest]
    #[case("primary", LinkPrecedence::Primary)]
    #[case("secondary", LinkPrecedence::Secondary)]
    fn link_precedence_round_trips(#[case] raw: &str, #[case] expected: LinkPrecedence) {
        let parsed: LinkPrecedence = raw.parse().expect("known value");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[rstest]
    fn link_precedence_rejects_unknown_values() {
        let err = "tertiary".parse::<LinkPrecedence>().expect_err("unknown");
        assert!(err.to_string().contains("tertiary"));
    }

    #[rstest]
    fn matches_on_either_contact_point() {
        let contact = record(Some("a@example.com"), Some("111"));
        assert!(contact.matches("a@example.com", "999"));
        assert!(contact.matches("b@example.com", "111"));
        assert!(!contact.matches("b@example.com", "999"));
    }

    #[rstest]
    fn matches_ignores_missing_fields() {
        let contact = record(None, Some("111"));
        assert!(!contact.matches("a@example.com", "999"));
        assert!(contact.matches("a@example.com", "111"));
    }

    #[rstest]
    fn is_exact_requires_both_fields() {
        let contact = record(Some("a@example.com"), Some("111"));
        assert!(contact.is_exact("a@example.com", "111"));
        assert!(!contact.is_exact("a@example.com", "999"));
        assert!(!record(None, Some("111")).is_exact("a@example.com", "111"));
    }

    #[rstest]
    fn primary_constructor_never_links() {
        let now = Utc::now();
        let fresh = NewContact::primary("a@example.com", "111", now);
        assert_eq!(fresh.link_precedence, LinkPrecedence::Primary);
        assert!(fresh.linked_id.is_none());
        assert_eq!(fresh.created_at, fresh.updated_at);
    }

    #[rstest]
    fn secondary_constructor_links_to_primary() {
        let now = Utc::now();
        let extension = NewContact::secondary("a@example.com", "111", ContactId::new(7), now);
        assert_eq!(extension.link_precedence, LinkPrecedence::Secondary);
        assert_eq!(extension.linked_id, Some(ContactId::new(7)));
    }

    #[rstest]
    fn into_contact_carries_fields_and_clears_deleted_at() {
        let now = Utc::now();
        let contact =
            NewContact::secondary("a@example.com", "111", ContactId::new(7), now)
                .into_contact(ContactId::new(9));
        assert_eq!(contact.id, ContactId::new(9));
        assert_eq!(contact.linked_id, Some(ContactId::new(7)));
        assert!(contact.deleted_at.is_none());
    }
}
