//! Notifier that publishes announcements as structured log events.
//!
//! Stands in for a messaging platform client: every announcement becomes an
//! `info` event on the `artjam::announce` target, with the destination
//! resolved to a concrete channel name.

use artjam_core::error::DomainError;
use artjam_core::notifier::{Destination, Notifier, Payload};
use async_trait::async_trait;
use tracing::info;

/// Publishes announcements through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    results_suffix: String,
}

impl TracingNotifier {
    /// Creates a notifier that names results destinations
    /// `{channel_id}{results_suffix}`.
    #[must_use]
    pub fn new(results_suffix: impl Into<String>) -> Self {
        Self {
            results_suffix: results_suffix.into(),
        }
    }

    /// Resolves a destination to the channel name it is posted under.
    #[must_use]
    pub fn resolve(&self, destination: &Destination) -> String {
        match destination {
            Destination::Channel(channel_id) => channel_id.to_string(),
            Destination::Results(channel_id) => format!("{channel_id}{}", self.results_suffix),
        }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn announce(
        &self,
        destination: &Destination,
        payload: &Payload,
    ) -> Result<(), DomainError> {
        let target = self.resolve(destination);
        match payload {
            Payload::Message { title, body } => {
                info!(target: "artjam::announce", destination = %target, title = %title, body = %body, "message");
            }
            Payload::Image { caption, reference } => {
                info!(target: "artjam::announce", destination = %target, caption = %caption, reference = %reference, "image");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artjam_core::id::ChannelId;

    #[test]
    fn test_resolve_uses_results_suffix_for_results_destination() {
        let notifier = TracingNotifier::new("-submissions");
        let channel = ChannelId::new("gallery");

        assert_eq!(
            notifier.resolve(&Destination::Channel(channel.clone())),
            "gallery"
        );
        assert_eq!(
            notifier.resolve(&Destination::Results(channel)),
            "gallery-submissions"
        );
    }

    #[tokio::test]
    async fn test_announce_always_succeeds() {
        let notifier = TracingNotifier::new("-results");
        let result = notifier
            .announce(
                &Destination::Results(ChannelId::new("gallery")),
                &Payload::Image {
                    caption: "Submitted by Alice".into(),
                    reference: "https://cdn.example/a.png".into(),
                },
            )
            .await;

        assert!(result.is_ok());
    }
}
