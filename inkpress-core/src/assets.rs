//! Collected image references awaiting upload.

/// A single image discovered during transpilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Where the image lives in the vault
    pub local_path: String,

    /// Where the image will live in the remote repository
    pub upload_path: String,

    /// Basename of the image file
    pub name: String,
}

/// Deduplicating registry of image references.
///
/// One collector lives for exactly one export request: the transpiler adds
/// to it while rewriting embeds, the publisher reads it once at the end of
/// the batch, and the caller clears it before reuse.
#[derive(Debug, Default)]
pub struct AssetCollector {
    entries: Vec<AssetRef>,
}

impl AssetCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image. The name is the last path segment of
    /// `local_path`. Adding an equivalent entry again is a no-op.
    pub fn add(&mut self, local_path: impl Into<String>, upload_path: impl Into<String>) {
        let local_path = local_path.into();
        let upload_path = upload_path.into();
        let name = local_path
            .rsplit('/')
            .next()
            .unwrap_or(&local_path)
            .to_string();

        let entry = AssetRef {
            local_path,
            upload_path,
            name,
        };
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    /// All registered images, in insertion order.
    pub fn list(&self) -> &[AssetRef] {
        &self.entries
    }

    /// Drop every entry. The only way entries are removed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
