//! Query handlers for the Rounds context.
//!
//! Queries never mutate a round. Asking about a channel that has never been
//! referenced creates its (empty) round, same as any other command.

use artjam_core::error::DomainError;
use artjam_core::id::ChannelId;
use tracing::debug;

use super::services::RoundServices;
use crate::domain::events::RoundStatus;
use crate::domain::values::TimeLeft;

/// Time remaining in the channel's round.
///
/// # Errors
///
/// Returns `DomainError::NotActive` if no round is running.
pub fn get_time_left(
    channel_id: &ChannelId,
    services: &RoundServices,
) -> Result<TimeLeft, DomainError> {
    debug!(channel_id = %channel_id, "querying time left");
    services
        .registry
        .get(channel_id)
        .lock()
        .time_left(services.clock.as_ref())
}

/// Status summary of the channel's round. Never fails.
#[must_use]
pub fn get_round_status(channel_id: &ChannelId, services: &RoundServices) -> RoundStatus {
    debug!(channel_id = %channel_id, "querying round status");
    services
        .registry
        .get(channel_id)
        .lock()
        .status(services.clock.as_ref())
}
