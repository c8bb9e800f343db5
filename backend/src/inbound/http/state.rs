//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without persistence.

use std::sync::Arc;

use crate::domain::ports::IdentifyContact;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::ports::FixtureIdentifyContact;
/// use backend::inbound::http::state::HttpState;
///
/// let state = HttpState::new(Arc::new(FixtureIdentifyContact));
/// let _identify = state.identify.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Driving port resolving submissions into identity clusters.
    pub identify: Arc<dyn IdentifyContact>,
}

impl HttpState {
    /// Construct state from the identify port.
    pub fn new(identify: Arc<dyn IdentifyContact>) -> Self {
        Self { identify }
    }
}
