//! Collaborators shared by every handler.

use std::fmt;
use std::sync::Arc;

use artjam_core::clock::Clock;
use artjam_core::notifier::Notifier;
use artjam_core::permission::PermissionCheck;

use crate::domain::registry::RoundRegistry;

/// Everything a handler needs besides its command. Cheap to clone; the
/// deadline task keeps its own clone for the lifetime of the round.
#[derive(Clone)]
pub struct RoundServices {
    /// Channel → round mapping.
    pub registry: Arc<RoundRegistry>,
    /// Source of timestamps.
    pub clock: Arc<dyn Clock>,
    /// Outbound announcements.
    pub notifier: Arc<dyn Notifier>,
    /// Termination rights lookup.
    pub permissions: Arc<dyn PermissionCheck>,
}

impl RoundServices {
    /// Bundles the collaborators.
    #[must_use]
    pub fn new(
        registry: Arc<RoundRegistry>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        permissions: Arc<dyn PermissionCheck>,
    ) -> Self {
        Self {
            registry,
            clock,
            notifier,
            permissions,
        }
    }
}

impl fmt::Debug for RoundServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundServices")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
