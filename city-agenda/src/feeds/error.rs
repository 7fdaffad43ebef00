//! Feed fetch error types.

/// Errors that can occur while fetching an open-data feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("{feed} feed returned {status}: {message}")]
    Api {
        feed: &'static str,
        status: u16,
        message: String,
    },

    /// Body was not the expected XML document
    #[error("{feed} feed is not valid XML: {message}")]
    Xml { feed: &'static str, message: String },
}
