//! Shared application state.

use std::sync::Arc;

use artjam_core::clock::Clock;
use artjam_core::notifier::Notifier;
use artjam_core::permission::PermissionCheck;
use artjam_rounds::application::RoundServices;
use artjam_rounds::domain::registry::RoundRegistry;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registry and collaborators used by the round handlers.
    pub rounds: RoundServices,
}

impl AppState {
    /// Create new application state with an empty round registry.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        permissions: Arc<dyn PermissionCheck>,
    ) -> Self {
        Self {
            rounds: RoundServices::new(
                Arc::new(RoundRegistry::new()),
                clock,
                notifier,
                permissions,
            ),
        }
    }
}
