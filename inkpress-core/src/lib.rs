//! # inkpress-core
//!
//! Core library for the inkpress vault-to-blog exporter.
//!
//! This crate provides the building blocks for turning vault notes into
//! blog-ready markdown: front-matter parsing, metadata generation, the
//! dialect transpiler, and local export. Remote publishing lives in
//! `inkpress-remote`; orchestration lives in the CLI.

pub mod assets;
pub mod config;
pub mod export;
pub mod filename;
pub mod frontmatter;
pub mod metadata;
pub mod models;
pub mod tags;
pub mod transpile;

pub use assets::{AssetCollector, AssetRef};
pub use config::Config;
pub use filename::format_filename;
pub use frontmatter::parse_note;
pub use metadata::MetadataGenerator;
pub use models::{MetaValue, Metadata, Post};
pub use tags::{TagError, TagGenerator};
pub use transpile::{TranspileContext, Transpiler};
