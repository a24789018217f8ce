//! Document model: posts and their ordered metadata.

use serde_yaml::Number;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single front-matter value.
///
/// The exported metadata block is a closed set of scalar shapes; anything
/// more exotic in the source YAML is carried as its string rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    String(String),
    Number(Number),
    Bool(bool),
    List(Vec<String>),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    /// Render the value the way the serialized block carries it: strings
    /// double-quoted, lists bracketed with double-quoted elements,
    /// booleans and numbers bare.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::String(s) => write!(f, "\"{}\"", s),
            MetaValue::Number(n) => write!(f, "{}", n),
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::List(items) => {
                let quoted: Vec<String> = items.iter().map(|item| format!("\"{}\"", item)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::String(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::String(s)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items)
    }
}

/// Insertion-ordered metadata map.
///
/// Keys keep the order they were first inserted in, which makes the
/// serialized front-matter block deterministic. Re-inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, keeping the key's original position if it
    /// already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, MetaValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a delimited front-matter block, one `key: value` line
    /// per entry, in insertion order.
    pub fn to_front_matter(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.entries {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str("---\n");
        out
    }
}

/// A note on its way to becoming a blog post.
///
/// Created once by the front-matter parser, enriched once by the metadata
/// generator, rewritten once by the transpiler, then serialized and
/// discarded. `source` is only ever read.
#[derive(Debug, Clone)]
pub struct Post {
    pub title: String,
    pub metadata: Metadata,
    pub content: String,
    pub source: PathBuf,
}

impl Post {
    pub fn new(
        title: impl Into<String>,
        metadata: Metadata,
        content: impl Into<String>,
        source: &Path,
    ) -> Self {
        Self {
            title: title.into(),
            metadata,
            content: content.into(),
            source: source.to_path_buf(),
        }
    }

    /// Serialized form: front-matter block, blank line, body.
    pub fn to_markdown(&self) -> String {
        format!("{}\n{}", self.metadata.to_front_matter(), self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::from("My Post"));
        metadata.insert("date", MetaValue::from("2024-01-02"));
        metadata.insert("math", MetaValue::from(true));

        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "date", "math"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::from("Old"));
        metadata.insert("date", MetaValue::from("2024-01-02"));
        metadata.insert("title", MetaValue::from("New"));

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get_str("title"), Some("New"));
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "date"]);
    }

    #[test]
    fn test_front_matter_serialization() {
        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::from("My Post"));
        metadata.insert("date", MetaValue::from("2024-01-02 10:00:00"));
        metadata.insert(
            "tags",
            MetaValue::List(vec![String::from("rust"), String::from("blog")]),
        );
        metadata.insert("math", MetaValue::from(true));

        assert_eq!(
            metadata.to_front_matter(),
            "---\n\
             title: \"My Post\"\n\
             date: \"2024-01-02 10:00:00\"\n\
             tags: [\"rust\", \"blog\"]\n\
             math: true\n\
             ---\n"
        );
    }

    #[test]
    fn test_empty_list_serialization() {
        let mut metadata = Metadata::new();
        metadata.insert("categories", MetaValue::List(Vec::new()));
        assert_eq!(metadata.to_front_matter(), "---\ncategories: []\n---\n");
    }

    #[test]
    fn test_post_to_markdown() {
        let mut metadata = Metadata::new();
        metadata.insert("title", MetaValue::from("Hello"));

        let post = Post::new("Hello", metadata, "Body text.", Path::new("notes/hello.md"));
        assert_eq!(
            post.to_markdown(),
            "---\ntitle: \"Hello\"\n---\n\nBody text."
        );
    }
}
