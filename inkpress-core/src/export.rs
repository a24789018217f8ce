//! Local export of serialized posts.

use crate::models::Post;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serialize `post` and write it to `export_dir/file_name`, overwriting
/// any existing file at that path.
pub fn export_post(post: &Post, export_dir: &Path, file_name: &str) -> Result<PathBuf, ExportError> {
    let target = export_dir.join(file_name);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target, post.to_markdown()).map_err(|source| ExportError::Write {
        path: target.clone(),
        source,
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetaValue, Metadata};

    fn sample_post(title: &str, body: &str) -> Post {
        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::from(title));
        Post::new(title, metadata, body, Path::new("notes/sample.md"))
    }

    #[test]
    fn test_export_writes_serialized_post() {
        let dir = tempfile::tempdir().unwrap();
        let post = sample_post("Hello", "Body.");

        let target = export_post(&post, dir.path(), "2024-01-02-Hello.md").unwrap();
        let written = fs::read_to_string(&target).unwrap();

        assert_eq!(written, "---\ntitle: \"Hello\"\n---\n\nBody.");
        assert_eq!(target, dir.path().join("2024-01-02-Hello.md"));
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = sample_post("Hello", "Old body.");
        let new = sample_post("Hello", "New body.");

        export_post(&old, dir.path(), "post.md").unwrap();
        export_post(&new, dir.path(), "post.md").unwrap();

        let written = fs::read_to_string(dir.path().join("post.md")).unwrap();
        assert!(written.contains("New body."));
        assert!(!written.contains("Old body."));
    }

    #[test]
    fn test_export_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let post = sample_post("Hello", "Body.");
        let nested = dir.path().join("a/b");

        let target = export_post(&post, &nested, "post.md").unwrap();
        assert!(target.exists());
    }
}
