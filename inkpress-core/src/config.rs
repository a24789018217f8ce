//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the inkpress.yml schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub tagger: TaggerConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault folder holding blog posts
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// Folder the converted markdown is written to
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Vault folder images are read from
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            export_dir: default_export_dir(),
            images_dir: default_images_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Published site URL, without a trailing slash
    #[serde(default = "default_blog_url")]
    pub url: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            url: default_blog_url(),
        }
    }
}

/// Default alignment applied to converted image embeds.
///
/// An embed carrying its own `center` token overrides this per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Normal,
    Left,
    Right,
    Center,
}

impl ImagePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::Normal => "normal",
            ImagePosition::Left => "left",
            ImagePosition::Right => "right",
            ImagePosition::Center => "center",
        }
    }
}

/// Toggles and parameters for the transpiler's rewrite rules.
///
/// One flag per rule family; a disabled rule is skipped entirely, its
/// patterns never evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub callout: bool,

    #[serde(default = "default_true")]
    pub callout_auto_title: bool,

    /// Token appended after a callout title so the theme can split type
    /// from title
    #[serde(default = "default_callout_title_separator")]
    pub callout_title_separator: String,

    #[serde(default = "default_true")]
    pub image: bool,

    #[serde(default)]
    pub image_position: ImagePosition,

    #[serde(default)]
    pub image_shadow: bool,

    #[serde(default = "default_true")]
    pub doc_ref: bool,

    #[serde(default = "default_true")]
    pub doc_link: bool,

    #[serde(default = "default_true")]
    pub lowercase_code_lang: bool,

    #[serde(default = "default_true")]
    pub callout_code_escape: bool,

    #[serde(default = "default_true")]
    pub tab_to_spaces: bool,

    /// Spaces substituted per tab inside code fences
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    #[serde(default = "default_true")]
    pub raw_tag: bool,

    #[serde(default = "default_true")]
    pub matrix_line_break: bool,

    #[serde(default = "default_true")]
    pub math_notation: bool,

    #[serde(default = "default_true")]
    pub list_math_escape: bool,

    #[serde(default = "default_true")]
    pub math_pipe: bool,

    #[serde(default = "default_true")]
    pub math_line_break: bool,

    #[serde(default)]
    pub inline_to_display: bool,

    #[serde(default = "default_true")]
    pub auto_hyperlink: bool,

    #[serde(default = "default_true")]
    pub highlight: bool,

    /// String wrapped around highlighted text on both sides
    #[serde(default = "default_highlight_separator")]
    pub highlight_separator: String,
}

impl RulesConfig {
    /// A configuration with every rule switched off.
    ///
    /// Useful for selective pipelines and as the identity baseline in tests.
    pub fn disabled() -> Self {
        Self {
            callout: false,
            callout_auto_title: false,
            callout_title_separator: default_callout_title_separator(),
            image: false,
            image_position: ImagePosition::Normal,
            image_shadow: false,
            doc_ref: false,
            doc_link: false,
            lowercase_code_lang: false,
            callout_code_escape: false,
            tab_to_spaces: false,
            tab_size: default_tab_size(),
            raw_tag: false,
            matrix_line_break: false,
            math_notation: false,
            list_math_escape: false,
            math_pipe: false,
            math_line_break: false,
            inline_to_display: false,
            auto_hyperlink: false,
            highlight: false,
            highlight_separator: default_highlight_separator(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            callout: true,
            callout_auto_title: true,
            callout_title_separator: default_callout_title_separator(),
            image: true,
            image_position: ImagePosition::Normal,
            image_shadow: false,
            doc_ref: true,
            doc_link: true,
            lowercase_code_lang: true,
            callout_code_escape: true,
            tab_to_spaces: true,
            tab_size: default_tab_size(),
            raw_tag: true,
            matrix_line_break: true,
            math_notation: true,
            list_math_escape: true,
            math_pipe: true,
            math_line_break: true,
            inline_to_display: false,
            auto_hyperlink: true,
            highlight: true,
            highlight_separator: default_highlight_separator(),
        }
    }
}

/// Remote publishing configuration for the GitHub content and Git data APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub repo: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Personal access token with repo scope
    #[serde(default)]
    pub token: String,

    /// Repository directory posts are uploaded to
    #[serde(default = "default_upload_posts_dir")]
    pub upload_posts_dir: String,

    /// Repository directory images are uploaded to
    #[serde(default = "default_upload_images_dir")]
    pub upload_images_dir: String,

    /// Batch commit message; `{count}` is the number of posts
    #[serde(default = "default_commit_message_template")]
    pub commit_message_template: String,

    /// Single-file update message; `{filename}` is the file name
    #[serde(default = "default_update_message_template")]
    pub update_message_template: String,

    /// Per-file delete message; `{filename}` is the file name
    #[serde(default = "default_delete_message_template")]
    pub delete_message_template: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            owner: String::new(),
            repo: String::new(),
            branch: default_branch(),
            token: String::new(),
            upload_posts_dir: default_upload_posts_dir(),
            upload_images_dir: default_upload_images_dir(),
            commit_message_template: default_commit_message_template(),
            update_message_template: default_update_message_template(),
            delete_message_template: default_delete_message_template(),
        }
    }
}

/// Settings for the external tag-generation capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tagger_model")]
    pub model: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            model: default_tagger_model(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_posts_dir() -> String {
    String::from("Blog/Posts")
}

fn default_export_dir() -> String {
    String::from("_exported")
}

fn default_images_dir() -> String {
    String::from("assets/img")
}

fn default_blog_url() -> String {
    String::from("https://username.github.io")
}

fn default_callout_title_separator() -> String {
    String::from("{title}")
}

fn default_highlight_separator() -> String {
    String::from("**")
}

fn default_tab_size() -> usize {
    4
}

fn default_branch() -> String {
    String::from("main")
}

fn default_upload_posts_dir() -> String {
    String::from("_posts")
}

fn default_upload_images_dir() -> String {
    String::from("assets/img/posts")
}

fn default_commit_message_template() -> String {
    String::from("docs: add {count} posts")
}

fn default_update_message_template() -> String {
    String::from("docs: update {filename}")
}

fn default_delete_message_template() -> String {
    String::from("docs: delete post - {filename}")
}

fn default_tagger_model() -> String {
    String::from("gpt-4o-mini")
}
