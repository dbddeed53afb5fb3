use crate::config::Config;
use crate::proposal::generator::ProposalGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every request is independent.
#[derive(Clone)]
pub struct AppState {
    /// Proposal pipeline around the configured model backend.
    pub proposals: ProposalGenerator,
    pub config: Config,
}
