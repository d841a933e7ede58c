use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure of a single remote attempt.
///
/// Kept apart from [`GatewayError`] so the read path can gate its fallback
/// on a transport failure explicitly instead of catching everything.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-success status; `message` carries the response body text, or a
    /// generic `HTTP <code>` line when the body was empty.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No logical endpoint matches the requested path. Fatal to the call in
    /// either mode; distinct from a not-found data result.
    #[error("no endpoint matches {0}")]
    UnknownRoute(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("storage error: {0}")]
    Storage(#[from] engine::StoreError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),
}
