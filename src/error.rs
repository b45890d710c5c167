use std::error::Error as StdError;

/// Errors that occurred while building or delivering a notice.
///
/// Delivery is best-effort: the [`Notifier`](crate::Notifier) entry points
/// catch and log these instead of propagating them into the host
/// application's request handling.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The configured host and port do not form a valid collector endpoint.
    /// Host and port are not validated up front, so a bad value surfaces
    /// here, at delivery time.
    #[error("invalid collector endpoint: {0}")]
    InvalidEndpoint(http::uri::InvalidUri),

    /// The notice failed to serialize into the wire body.
    ///
    /// Note: This is an error in this crate. If you spot this, please open
    /// an issue.
    #[error("serializing notice failed with {0}")]
    SerializeNotice(serde_yaml::Error),

    /// Could not complete the HTTP request to the collector. Covers
    /// connection failures as well as connect/read timeouts.
    #[error("sending notice failed with {0}")]
    Connection(Box<dyn StdError + Send + Sync + 'static>),

    /// The collector responded with a non-success status.
    #[error("collector returned {status}: {body}")]
    Upload {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, as far as one was available.
        body: String,
    },

    /// A required configuration environment variable was missing or not
    /// valid unicode.
    #[error("reading configuration from environment failed with {0}")]
    Environment(#[from] std::env::VarError),
}
