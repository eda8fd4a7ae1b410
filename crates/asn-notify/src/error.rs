use thiserror::Error;

/// An email could not be mapped to a channel identity.
///
/// Recovered by the caller: the address is dropped from the recipient list.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The platform has no account registered for this address.
    #[error("no account found for {email}")]
    NotFound { email: String },

    #[error("lookup user by email {email}: {source}")]
    Transport {
        email: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("lookup user by email {email}: unexpected status code {status}")]
    Status { email: String, status: u16 },

    /// The platform answered but refused the lookup (bad token, rate limit, ...).
    #[error("lookup user by email {email}: {error}")]
    Api { email: String, error: String },
}

impl ResolutionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionError::NotFound { .. })
    }
}

/// A message could not be delivered to one channel.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("post message to {channel}: {source}")]
    Transport {
        channel: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("post message to {channel}: unexpected status code {status}")]
    Status { channel: String, status: u16 },

    #[error("post message to {channel}: {error}")]
    Api { channel: String, error: String },

    /// Bulk delivery called with an empty recipient list.
    #[error("no recipients to deliver to")]
    NoRecipients,
}
