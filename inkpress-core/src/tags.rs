//! Pluggable tag-generation capability.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("Tag backend error: {0}")]
    Backend(String),
}

/// Derives topic tags from a note body.
///
/// Implementations call out to an external text classifier. The capability
/// is non-critical: metadata generation treats any failure as "no tags".
#[async_trait]
pub trait TagGenerator: Send + Sync {
    async fn generate_tags(&self, body: &str) -> Result<Vec<String>, TagError>;
}
