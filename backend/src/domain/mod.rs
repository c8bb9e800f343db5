//! Domain types, the consolidation algorithm, and its ports.
//!
//! Nothing in this module knows about HTTP or SQL. Inbound adapters
//! drive the domain through [`ports::IdentifyContact`]; outbound
//! adapters implement [`ports::ContactRepository`].

pub mod contact;
pub mod error;
pub mod identity;
pub mod identity_service;
pub mod ports;

pub use contact::{Contact, ContactId, LinkPrecedence, NewContact, UnknownLinkPrecedence};
pub use error::{Error, ErrorCode};
pub use identity::{ConsolidatedIdentity, Resolution};
pub use identity_service::IdentityResolver;
