#[derive(thiserror::Error, Debug)]
pub enum MisterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Element #{0} not found in document")]
    MissingElement(String),
    #[error("Debt row {row} has {len} cells, needs at least user and total")]
    MalformedDebtRow { row: usize, len: usize },
    #[error("Debt row {row} has {found} cells, expected {expected}")]
    InconsistentDebtRow { row: usize, expected: usize, found: usize },
    #[error("Config error: {0}")]
    Config(String),
}
