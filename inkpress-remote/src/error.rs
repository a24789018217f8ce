//! Error types for remote publishing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
}
