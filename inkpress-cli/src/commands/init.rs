//! Project scaffolding command.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# inkpress configuration
vault:
  # Vault folder holding blog posts
  posts_dir: "Blog/Posts"
  # Folder converted markdown is written to
  export_dir: "_exported"
  # Vault folder images are read from
  images_dir: "assets/img"

blog:
  # Published site URL, without a trailing slash
  url: "https://username.github.io"

rules:
  callout: true
  callout_auto_title: true
  callout_title_separator: "{title}"
  image: true
  # normal, left, right, or center
  image_position: normal
  image_shadow: false
  doc_ref: true
  doc_link: true
  lowercase_code_lang: true
  callout_code_escape: true
  tab_to_spaces: true
  tab_size: 4
  raw_tag: true
  matrix_line_break: true
  math_notation: true
  list_math_escape: true
  math_pipe: true
  math_line_break: true
  inline_to_display: false
  auto_hyperlink: true
  highlight: true
  highlight_separator: "**"

github:
  enabled: false
  owner: ""
  repo: ""
  branch: "main"
  # Personal access token with repo scope
  token: ""
  upload_posts_dir: "_posts"
  upload_images_dir: "assets/img/posts"
  commit_message_template: "docs: add {count} posts"
  update_message_template: "docs: update {filename}"
  delete_message_template: "docs: delete post - {filename}"

tagger:
  enabled: false
  api_key: ""
  model: "gpt-4o-mini"
"#;

/// Write a default configuration file.
pub fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let dir = path.unwrap_or_else(|| Path::new("."));
    let config_path = dir.join("inkpress.yml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {:?}\nUse --force to overwrite",
            config_path
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!("✓ Created {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point vault.posts_dir at your notes");
    println!("  2. Fill in github.* to enable publishing");
    println!("  3. Run: inkpress export --all");

    Ok(())
}
