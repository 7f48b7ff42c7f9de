//! Permission lookup abstraction.

use async_trait::async_trait;

use crate::id::{ChannelId, ParticipantId};

/// Answers whether an actor may end a round early.
///
/// A `false` answer is a routine rejection, not an error.
#[async_trait]
pub trait PermissionCheck: Send + Sync {
    /// Returns `true` if `actor` may terminate the round in `channel`.
    async fn can_terminate(&self, actor: &ParticipantId, channel: &ChannelId) -> bool;
}
