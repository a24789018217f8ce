//! # inkpress-remote
//!
//! Remote backends for inkpress: the GitHub batch publisher and the
//! OpenAI-backed tag generator.

pub mod error;
pub mod github;
pub mod tagger;

pub use error::PublishError;
pub use github::{Encoding, GitApi, Publisher, RestGitApi, UploadUnit};
pub use tagger::OpenAiTagger;
