use crate::ErrorMap;
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while talking to the registration server
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't reach the server or read what it sent back.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request and told us which fields were wrong.
    #[error("the server rejected {} field(s)", .0.fields().count())]
    Validation(ErrorMap),

    /// The server failed without saying which fields were wrong, for example
    /// with a 500 or an HTML error page.
    #[error("unexpected response: {0}")]
    Unexpected(reqwest::StatusCode),
}
