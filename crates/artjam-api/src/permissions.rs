//! Permission check backed by a configured moderator list.

use std::collections::HashSet;

use artjam_core::id::{ChannelId, ParticipantId};
use artjam_core::permission::PermissionCheck;
use async_trait::async_trait;

/// Grants termination rights to a fixed set of moderators in every channel.
/// An empty list grants nobody.
#[derive(Debug, Clone, Default)]
pub struct ModeratorList {
    moderators: HashSet<ParticipantId>,
}

impl ModeratorList {
    /// Creates a check for the given moderators.
    #[must_use]
    pub fn new(moderators: HashSet<ParticipantId>) -> Self {
        Self { moderators }
    }

    /// Number of configured moderators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moderators.len()
    }

    /// Whether no moderator is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moderators.is_empty()
    }
}

#[async_trait]
impl PermissionCheck for ModeratorList {
    async fn can_terminate(&self, actor: &ParticipantId, _channel: &ChannelId) -> bool {
        self.moderators.contains(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_listed_moderators_can_terminate() {
        let check = ModeratorList::new([ParticipantId::new("u-mod")].into_iter().collect());
        let channel = ChannelId::new("gallery");

        assert_eq!(check.len(), 1);
        assert!(check.can_terminate(&ParticipantId::new("u-mod"), &channel).await);
        assert!(!check.can_terminate(&ParticipantId::new("u-1"), &channel).await);
    }

    #[tokio::test]
    async fn test_empty_list_grants_nobody() {
        let check = ModeratorList::default();

        assert!(check.is_empty());
        assert!(
            !check
                .can_terminate(&ParticipantId::new("u-mod"), &ChannelId::new("gallery"))
                .await
        );
    }
}
