//! Test permission checks.

use artjam_core::id::{ChannelId, ParticipantId};
use artjam_core::permission::PermissionCheck;
use async_trait::async_trait;

/// Grants termination rights to everyone.
#[derive(Debug)]
pub struct AllowAll;

#[async_trait]
impl PermissionCheck for AllowAll {
    async fn can_terminate(&self, _actor: &ParticipantId, _channel: &ChannelId) -> bool {
        true
    }
}

/// Grants termination rights to no one.
#[derive(Debug)]
pub struct DenyAll;

#[async_trait]
impl PermissionCheck for DenyAll {
    async fn can_terminate(&self, _actor: &ParticipantId, _channel: &ChannelId) -> bool {
        false
    }
}
