//! Driving port for identity resolution.
//!
//! HTTP handlers depend on this trait rather than on the concrete
//! resolver so they stay testable without persistence.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::identity::{ConsolidatedIdentity, Resolution};

/// Resolve an incoming (email, phone number) pair into an identity
/// cluster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentifyContact: Send + Sync {
    /// Run the consolidation algorithm for one submission.
    ///
    /// `Conflict` and `NoPrimaryFound` are reported through
    /// [`Resolution`], not through `Err`; the error channel carries
    /// storage failures only.
    async fn identify(&self, email: &str, phone_number: &str) -> Result<Resolution, Error>;
}

/// Fixture implementation reporting every submission as a brand-new
/// identity with id 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentifyContact;

#[async_trait]
impl IdentifyContact for FixtureIdentifyContact {
    async fn identify(&self, email: &str, phone_number: &str) -> Result<Resolution, Error> {
        Ok(Resolution::Created(ConsolidatedIdentity::for_new_primary(
            crate::domain::contact::ContactId::new(1),
            email,
            phone_number,
        )))
    }
}
