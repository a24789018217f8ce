//! CLI command implementations.

mod delete;
mod export;
mod init;

pub use delete::delete_posts;
pub use export::export_posts;
pub use init::init_config;
