//! Domain ports for the hexagonal boundary.

mod contact_repository;
mod identify_contact;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError, FixtureContactRepository};
#[cfg(test)]
pub use identify_contact::MockIdentifyContact;
pub use identify_contact::{FixtureIdentifyContact, IdentifyContact};
