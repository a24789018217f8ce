//! Metadata generation for exported posts.

use crate::models::{MetaValue, Metadata, Post};
use crate::tags::TagGenerator;
use chrono::{DateTime, Local};
use std::path::{Component, Path};

/// Builds the exported front matter for a post: title, creation date,
/// folder-derived categories, optionally generated tags, and the theme's
/// rendering flags.
pub struct MetadataGenerator {
    posts_dir: String,
}

impl MetadataGenerator {
    /// `posts_dir` is the vault folder holding blog posts; it is stripped
    /// from source paths before categories are derived.
    pub fn new(posts_dir: impl Into<String>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    /// Generate the full metadata for `post`.
    ///
    /// Tag generation is best-effort: a failing backend logs a warning and
    /// the post is exported without tags.
    pub async fn generate(&self, post: &Post, tagger: Option<&dyn TagGenerator>) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::String(post.title.clone()));
        metadata.insert(
            "date",
            MetaValue::String(
                creation_date(&post.source)
                    .format("%Y-%m-%d %H:%M:%S %z")
                    .to_string(),
            ),
        );
        metadata.insert("categories", MetaValue::List(self.categories_for(&post.source)));

        let tags = match tagger {
            Some(tagger) => match tagger.generate_tags(&post.content).await {
                Ok(tags) => tags,
                Err(err) => {
                    tracing::warn!("Tag generation failed for {:?}: {}", post.source, err);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        metadata.insert("tags", MetaValue::List(tags));

        metadata.insert("math", MetaValue::Bool(true));
        metadata.insert("toc", MetaValue::Bool(true));
        metadata.insert("comments", MetaValue::Bool(true));

        metadata
    }

    /// Folder path below the posts directory, minus the filename.
    ///
    /// `Blog/Posts/IT/algorithms/note.md` with posts_dir `Blog/Posts`
    /// yields `["IT", "algorithms"]`.
    fn categories_for(&self, source: &Path) -> Vec<String> {
        let relative = source.strip_prefix(&self.posts_dir).unwrap_or(source);
        let mut parts: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        parts.pop(); // drop the filename
        parts
    }
}

fn creation_date(path: &Path) -> DateTime<Local> {
    std::fs::metadata(path)
        .ok()
        .and_then(|meta| meta.created().or_else(|_| meta.modified()).ok())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(Local::now)
}
