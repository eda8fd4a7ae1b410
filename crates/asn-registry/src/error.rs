use thiserror::Error;

/// Acquiring a registry snapshot failed. Always fatal to the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS, timeout or cancellation failure.
    #[error("{registry}: execute request: {source}")]
    Transport {
        registry: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("{registry}: unexpected status code {status}: {body}")]
    Status {
        registry: &'static str,
        status: u16,
        body: String,
    },

    /// The body was not the JSON shape we expect.
    #[error("{registry}: decode response: {source}")]
    Decode {
        registry: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// GraphQL-level errors reported alongside (or instead of) data.
    #[error("{registry}: graphql errors: {}", messages.join("; "))]
    GraphQl {
        registry: &'static str,
        messages: Vec<String>,
    },

    /// Well-formed JSON with content we refuse to interpret.
    #[error("{registry}: invalid response: {message}")]
    Invalid {
        registry: &'static str,
        message: String,
    },
}

impl FetchError {
    pub fn registry(&self) -> &'static str {
        match self {
            FetchError::Transport { registry, .. }
            | FetchError::Status { registry, .. }
            | FetchError::Decode { registry, .. }
            | FetchError::GraphQl { registry, .. }
            | FetchError::Invalid { registry, .. } => registry,
        }
    }
}
