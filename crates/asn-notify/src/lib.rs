//! asn-notify
//!
//! Chat-platform side of the pipeline: turn an email into a deliverable
//! recipient, then deliver block-structured messages to recipients.
//!
//! Delivery is best effort per recipient. One failed lookup or send is logged
//! and skipped; it never stops work for the remaining recipients.

pub mod fanout;

mod error;
mod message;
mod slack;

pub use error::{DeliveryError, ResolutionError};
pub use fanout::best_effort;
pub use message::{direct_message_text, Block, Message, TextObject};
pub use slack::{SlackClient, DEFAULT_SLACK_API_URL};

use std::fmt;

use tracing::{error, info};

// ---------------------------------------------------------------------------
// Channel identity
// ---------------------------------------------------------------------------

/// Opaque platform handle for a deliverable recipient (user or channel id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a bulk send. `delivered` keeps input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: Vec<ChannelId>,
}

impl DeliveryReport {
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    pub fn failed_count(&self) -> usize {
        self.attempted - self.delivered.len()
    }
}

// ---------------------------------------------------------------------------
// Resolver / dispatcher traits
// ---------------------------------------------------------------------------

/// Maps a human identity (email) to a channel identity.
///
/// Pure lookup: no caching, every call hits the platform.
#[async_trait::async_trait]
pub trait ChannelResolver: Send + Sync {
    async fn resolve(&self, email: &str) -> Result<ChannelId, ResolutionError>;
}

/// Delivers messages to resolved channels.
///
/// Only [`Dispatcher::notify`] is required; the bulk and direct-message paths
/// are built on top of it with per-recipient failure isolation.
#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    /// Deliver one message to one channel.
    async fn notify(&self, channel: &ChannelId, message: &Message) -> Result<(), DeliveryError>;

    /// Deliver the same message to every channel, skipping failures.
    ///
    /// Errors only when called with no channels at all.
    async fn notify_all(
        &self,
        channels: &[ChannelId],
        message: &Message,
    ) -> Result<DeliveryReport, DeliveryError> {
        if channels.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }

        let delivered = best_effort(
            channels,
            move |channel| async move { self.notify(channel, message).await.map(|()| channel.clone()) },
            |channel, err| {
                error!(channel = %channel, error = %err, "failed to deliver message");
            },
        )
        .await;

        Ok(DeliveryReport {
            attempted: channels.len(),
            delivered,
        })
    }

    /// Send a markdown-only direct message to each user, skipping failures.
    async fn send_direct_messages(&self, users: &[ChannelId], text: &str) -> DeliveryReport {
        let message = Message::markdown(text);
        let message = &message;

        let delivered = best_effort(
            users,
            move |user| async move { self.notify(user, message).await.map(|()| user.clone()) },
            |user, err| {
                error!(user_id = %user, error = %err, "failed to send direct message");
            },
        )
        .await;

        for user in &delivered {
            info!(user_id = %user, "successfully sent direct message");
        }

        DeliveryReport {
            attempted: users.len(),
            delivered,
        }
    }
}
