//! Outbound announcement abstraction.
//!
//! The messaging platform glue implements [`Notifier`]; the rounds context
//! only decides *what* to announce and *where*.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DomainError;
use crate::id::ChannelId;

/// Where an announcement should be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "channel_id", rename_all = "snake_case")]
pub enum Destination {
    /// The channel the round runs in.
    Channel(ChannelId),
    /// The results destination associated with a channel. Resolution to a
    /// concrete location is up to the notifier implementation.
    Results(ChannelId),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(id) => write!(f, "channel {id}"),
            Self::Results(id) => write!(f, "results for channel {id}"),
        }
    }
}

/// A rendered announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// A titled text message.
    Message {
        /// Headline.
        title: String,
        /// Body text.
        body: String,
    },
    /// A reference to an image (or other attachment) with a caption.
    Image {
        /// Caption shown with the image.
        caption: String,
        /// Opaque artifact reference, typically a URL.
        reference: String,
    },
}

/// Publishes announcements to the messaging platform.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Posts `payload` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PublicationFailure` if the platform rejects the
    /// post or the destination cannot be resolved.
    async fn announce(&self, destination: &Destination, payload: &Payload)
    -> Result<(), DomainError>;
}
