//! Atomic multi-file publishing against the GitHub Git data API.
//!
//! The upload protocol is strictly ordered: resolve the branch head,
//! resolve its root tree, create one blob per file (concurrently), create
//! a tree on top of the old root, create a commit whose sole parent is the
//! old head, then force-update the branch ref. Because the ref update is
//! the last step, a failure anywhere leaves the remote branch untouched.
//!
//! Deletion is different by design: one commit per file, best-effort per
//! path, so a missing remote file never blocks the rest of the batch.

use crate::error::PublishError;
use async_trait::async_trait;
use futures::future::try_join_all;
use inkpress_core::config::GithubConfig;
use serde::Deserialize;
use serde_json::json;

/// Content encoding of an upload unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Base64,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Base64 => "base64",
        }
    }
}

/// One file in an upload batch.
///
/// `path` is repository-relative, including its subdirectory; no two units
/// in the same batch may share a path.
#[derive(Debug, Clone)]
pub struct UploadUnit {
    pub path: String,
    pub content: String,
    pub encoding: Encoding,
}

/// A tree entry pairing a unit path with its created blob.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: String,
    pub sha: String,
}

/// The subset of the GitHub API the publisher drives.
///
/// Kept behind a trait so the protocol choreography can be exercised with
/// scripted failures in tests.
#[async_trait]
pub trait GitApi: Send + Sync {
    /// Current commit SHA of the target branch.
    async fn get_ref_sha(&self) -> Result<String, PublishError>;

    /// Root tree SHA of a commit.
    async fn get_commit_tree_sha(&self, commit_sha: &str) -> Result<String, PublishError>;

    async fn create_blob(&self, content: &str, encoding: Encoding) -> Result<String, PublishError>;

    async fn create_tree(
        &self,
        base_tree_sha: &str,
        entries: &[TreeEntry],
    ) -> Result<String, PublishError>;

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> Result<String, PublishError>;

    /// Force-update the branch ref to a commit.
    async fn update_ref(&self, commit_sha: &str) -> Result<(), PublishError>;

    /// Content SHA of an existing file, or `None` when the file is absent.
    async fn get_content_sha(&self, path: &str) -> Result<Option<String>, PublishError>;

    async fn put_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<(), PublishError>;

    async fn delete_file(&self, path: &str, sha: &str, message: &str)
        -> Result<(), PublishError>;
}

/// Drives the publish protocol over a [`GitApi`].
pub struct Publisher<A: GitApi> {
    api: A,
    update_message_template: String,
    delete_message_template: String,
}

impl<A: GitApi> Publisher<A> {
    pub fn new(api: A, config: &GithubConfig) -> Self {
        Self {
            api,
            update_message_template: config.update_message_template.clone(),
            delete_message_template: config.delete_message_template.clone(),
        }
    }

    /// Publish every unit as exactly one commit on the configured branch.
    ///
    /// Steps 1-2 and 4-6 are sequential; blob creation (step 3) fans out
    /// concurrently since the calls are independent. Any failure aborts
    /// the batch before the ref moves.
    pub async fn upload_batch(
        &self,
        units: &[UploadUnit],
        commit_message: &str,
    ) -> Result<(), PublishError> {
        let head_sha = self.api.get_ref_sha().await?;
        let base_tree_sha = self.api.get_commit_tree_sha(&head_sha).await?;

        let blob_shas = try_join_all(
            units
                .iter()
                .map(|unit| self.api.create_blob(&unit.content, unit.encoding)),
        )
        .await?;

        let entries: Vec<TreeEntry> = units
            .iter()
            .zip(blob_shas)
            .map(|(unit, sha)| TreeEntry {
                path: unit.path.clone(),
                sha,
            })
            .collect();

        let tree_sha = self.api.create_tree(&base_tree_sha, &entries).await?;
        let commit_sha = self
            .api
            .create_commit(commit_message, &tree_sha, &head_sha)
            .await?;

        self.api.update_ref(&commit_sha).await?;

        tracing::info!("Published {} files in one commit", units.len());
        Ok(())
    }

    /// Create or update a single file through the contents API.
    pub async fn upload_file(&self, path: &str, content_base64: &str) -> Result<(), PublishError> {
        let existing = self.api.get_content_sha(path).await?;
        let message = self
            .update_message_template
            .replace("{filename}", file_name(path));
        self.api
            .put_file(path, content_base64, &message, existing.as_deref())
            .await
    }

    /// Delete previously published files, one commit per file.
    ///
    /// A path with no remote content is skipped and the loop continues;
    /// any other failure aborts the remaining paths and propagates.
    /// Returns the number of files actually deleted.
    pub async fn delete_batch(&self, paths: &[String]) -> Result<usize, PublishError> {
        let mut deleted = 0;

        for path in paths {
            let Some(sha) = self.api.get_content_sha(path).await? else {
                tracing::warn!("Nothing to delete at {}", path);
                continue;
            };

            let message = self
                .delete_message_template
                .replace("{filename}", file_name(path));
            self.api.delete_file(path, &sha, &message).await?;
            deleted += 1;
        }

        Ok(deleted)
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("inkpress/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Deserialize)]
struct CommitResponse {
    tree: ShaResponse,
}

#[derive(Deserialize)]
struct ShaResponse {
    sha: String,
}

/// GitHub REST implementation of [`GitApi`].
pub struct RestGitApi {
    client: reqwest::Client,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

impl RestGitApi {
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        }
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/repos/{}/{}/{}", API_ROOT, self.owner, self.repo, tail)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PublishError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PublishError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl GitApi for RestGitApi {
    async fn get_ref_sha(&self) -> Result<String, PublishError> {
        let url = self.url(&format!("git/ref/heads/{}", self.branch));
        let response = Self::check(self.request(reqwest::Method::GET, url).send().await?).await?;
        let parsed: RefResponse = response.json().await?;
        Ok(parsed.object.sha)
    }

    async fn get_commit_tree_sha(&self, commit_sha: &str) -> Result<String, PublishError> {
        let url = self.url(&format!("git/commits/{}", commit_sha));
        let response = Self::check(self.request(reqwest::Method::GET, url).send().await?).await?;
        let parsed: CommitResponse = response.json().await?;
        Ok(parsed.tree.sha)
    }

    async fn create_blob(&self, content: &str, encoding: Encoding) -> Result<String, PublishError> {
        let url = self.url("git/blobs");
        let body = json!({
            "content": content,
            "encoding": encoding.as_str(),
        });
        let response = Self::check(
            self.request(reqwest::Method::POST, url)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json::<ShaResponse>().await?.sha)
    }

    async fn create_tree(
        &self,
        base_tree_sha: &str,
        entries: &[TreeEntry],
    ) -> Result<String, PublishError> {
        let url = self.url("git/trees");
        let tree: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| {
                json!({
                    "path": entry.path,
                    "mode": "100644",
                    "type": "blob",
                    "sha": entry.sha,
                })
            })
            .collect();
        let body = json!({
            "base_tree": base_tree_sha,
            "tree": tree,
        });
        let response = Self::check(
            self.request(reqwest::Method::POST, url)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json::<ShaResponse>().await?.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> Result<String, PublishError> {
        let url = self.url("git/commits");
        let body = json!({
            "message": message,
            "tree": tree_sha,
            "parents": [parent_sha],
        });
        let response = Self::check(
            self.request(reqwest::Method::POST, url)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json::<ShaResponse>().await?.sha)
    }

    async fn update_ref(&self, commit_sha: &str) -> Result<(), PublishError> {
        let url = self.url(&format!("git/refs/heads/{}", self.branch));
        let body = json!({
            "sha": commit_sha,
            "force": true,
        });
        Self::check(
            self.request(reqwest::Method::PATCH, url)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    async fn get_content_sha(&self, path: &str) -> Result<Option<String>, PublishError> {
        let url = self.url(&format!("contents/{}?ref={}", path, self.branch));
        let response = self.request(reqwest::Method::GET, url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check(response).await?;
        Ok(Some(response.json::<ShaResponse>().await?.sha))
    }

    async fn put_file(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<(), PublishError> {
        let url = self.url(&format!("contents/{}", path));
        let mut body = json!({
            "message": message,
            "content": content_base64,
            "branch": self.branch,
        });
        if let Some(sha) = sha {
            body["sha"] = json!(sha);
        }
        Self::check(
            self.request(reqwest::Method::PUT, url)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    async fn delete_file(
        &self,
        path: &str,
        sha: &str,
        message: &str,
    ) -> Result<(), PublishError> {
        let url = self.url(&format!("contents/{}", path));
        let body = json!({
            "message": message,
            "sha": sha,
            "branch": self.branch,
        });
        Self::check(
            self.request(reqwest::Method::DELETE, url)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}
