//! Front-matter parsing from raw note text.

use crate::models::{MetaValue, Metadata, Post};
use chrono::Local;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Front matter is not a key-value mapping")]
    NotAMapping,
}

static FRONT_MATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn front_matter_regex() -> &'static Regex {
    FRONT_MATTER_REGEX.get_or_init(|| Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n(.*)$").unwrap())
}

static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();

fn heading_regex() -> &'static Regex {
    HEADING_REGEX.get_or_init(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap())
}

/// Parse a raw note into a [`Post`].
///
/// Splits the leading front-matter block from the body. When the block is
/// absent, default metadata is synthesized: the title comes from the first
/// heading or the first non-blank line (truncated to 50 characters), the
/// date from the current time, and the entire input becomes the body.
///
/// # Example
///
/// ```
/// use inkpress_core::frontmatter::parse_note;
/// use std::path::Path;
///
/// let raw = "---\ntitle: \"My Post\"\ntags: [rust]\n---\nHello.";
/// let post = parse_note(raw, Path::new("notes/my-post.md")).unwrap();
///
/// assert_eq!(post.title, "My Post");
/// assert_eq!(post.content, "Hello.");
/// ```
pub fn parse_note(raw: &str, source: &Path) -> Result<Post, FrontmatterError> {
    if let Some(captures) = front_matter_regex().captures(raw) {
        let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let body = captures
            .get(2)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();

        let mut metadata = parse_metadata(yaml)?;
        if metadata.get_str("title").map_or(true, str::is_empty) {
            metadata.insert("title", MetaValue::String(default_title(&body)));
        }

        let title = metadata.get_str("title").unwrap_or_default().to_string();
        Ok(Post::new(title, metadata, body, source))
    } else {
        let body = raw.trim().to_string();
        let title = default_title(&body);

        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::String(title.clone()));
        metadata.insert(
            "date",
            MetaValue::String(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        );

        Ok(Post::new(title, metadata, body, source))
    }
}

fn parse_metadata(yaml: &str) -> Result<Metadata, FrontmatterError> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let mapping = match value {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(Metadata::new()),
        _ => return Err(FrontmatterError::NotAMapping),
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            other => yaml_to_string(&other),
        };
        metadata.insert(key, yaml_to_meta(value));
    }
    Ok(metadata)
}

fn yaml_to_meta(value: serde_yaml::Value) -> MetaValue {
    match value {
        serde_yaml::Value::Bool(b) => MetaValue::Bool(b),
        serde_yaml::Value::Number(n) => MetaValue::Number(n),
        serde_yaml::Value::String(s) => MetaValue::String(s),
        serde_yaml::Value::Sequence(items) => {
            MetaValue::List(items.iter().map(yaml_to_string).collect())
        }
        other => MetaValue::String(yaml_to_string(&other)),
    }
}

fn yaml_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
    }
}

/// Title fallback: first `#` heading, else the first non-blank line
/// truncated to 50 characters, else "Untitled".
fn default_title(body: &str) -> String {
    if let Some(captures) = heading_regex().captures(body) {
        return captures[1].trim().to_string();
    }

    if let Some(first_line) = body.lines().find(|line| !line.trim().is_empty()) {
        let trimmed = first_line.trim();
        if trimmed.chars().count() > 50 {
            let cut: String = trimmed.chars().take(50).collect();
            return format!("{}...", cut);
        }
        return trimmed.to_string();
    }

    String::from("Untitled")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_front_matter() {
        let raw = r#"---
title: "Test Post"
date: 2025-01-01
tags:
  - rust
  - blog
published: true
---

# Hello World

Body text."#;

        let post = parse_note(raw, Path::new("notes/test.md")).unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.metadata.get_str("date"), Some("2025-01-01"));
        assert_eq!(
            post.metadata.get("tags"),
            Some(&MetaValue::List(vec![
                String::from("rust"),
                String::from("blog")
            ]))
        );
        assert_eq!(post.metadata.get("published"), Some(&MetaValue::Bool(true)));
        assert!(post.content.starts_with("# Hello World"));
    }

    #[test]
    fn test_metadata_keeps_document_order() {
        let raw = "---\nzebra: 1\napple: 2\nmango: 3\n---\nBody.";
        let post = parse_note(raw, Path::new("n.md")).unwrap();
        let keys: Vec<&str> = post.metadata.iter().map(|(k, _)| k.as_str()).collect();
        // "title" is appended because the block had none
        assert_eq!(keys, vec!["zebra", "apple", "mango", "title"]);
    }

    #[test]
    fn test_no_front_matter_title_from_heading() {
        let raw = "# A Heading\n\nSome text.";
        let post = parse_note(raw, Path::new("n.md")).unwrap();
        assert_eq!(post.title, "A Heading");
        assert_eq!(post.metadata.get_str("title"), Some("A Heading"));
        assert!(post.metadata.get_str("date").is_some());
        assert_eq!(post.content, raw);
    }

    #[test]
    fn test_no_front_matter_title_from_first_line() {
        let raw = "Just a short note.\n\nMore text.";
        let post = parse_note(raw, Path::new("n.md")).unwrap();
        assert_eq!(post.title, "Just a short note.");
    }

    #[test]
    fn test_long_first_line_is_truncated() {
        let raw = "a".repeat(60);
        let post = parse_note(&raw, Path::new("n.md")).unwrap();
        assert_eq!(post.title.chars().count(), 53);
        assert!(post.title.ends_with("..."));
    }

    #[test]
    fn test_empty_note_is_untitled() {
        let post = parse_note("", Path::new("n.md")).unwrap();
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.content, "");
    }

    #[test]
    fn test_missing_title_falls_back_to_body() {
        let raw = "---\ndate: 2025-01-01\n---\n# From Body\n\nText.";
        let post = parse_note(raw, Path::new("n.md")).unwrap();
        assert_eq!(post.title, "From Body");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let raw = "---\ntitle: [unclosed\n---\nBody.";
        assert!(parse_note(raw, Path::new("n.md")).is_err());
    }

    #[test]
    fn test_scalar_front_matter_is_rejected() {
        let raw = "---\njust a string\n---\nBody.";
        assert!(matches!(
            parse_note(raw, Path::new("n.md")),
            Err(FrontmatterError::NotAMapping)
        ));
    }
}
