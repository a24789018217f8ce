//! Delete command: remove published posts from the remote repository.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use inkpress_core::config::Config;
use inkpress_core::filename::format_filename;
use inkpress_core::models::{MetaValue, Metadata};
use inkpress_remote::github::{Publisher, RestGitApi};
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Delete the published counterparts of the given notes.
pub async fn delete_posts(config_path: &Path, paths: &[PathBuf], yes: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    if !config.github.enabled {
        anyhow::bail!("GitHub publishing is disabled; nothing to delete");
    }
    if paths.is_empty() {
        anyhow::bail!("No notes given");
    }

    let mut remote_paths = Vec::new();
    for path in paths {
        let file_name = published_file_name(path)?;
        remote_paths.push(format!("{}/{}", config.github.upload_posts_dir, file_name));
    }

    if !yes && !confirm(&remote_paths)? {
        println!("Aborted");
        return Ok(());
    }

    let publisher = Publisher::new(RestGitApi::new(&config.github), &config.github);
    let deleted = publisher
        .delete_batch(&remote_paths)
        .await
        .context("Failed to delete posts from GitHub")?;

    println!("✓ Deleted {} of {} posts", deleted, remote_paths.len());
    Ok(())
}

/// Reconstruct the published filename from the note's title (its stem)
/// and creation date, with the same formatter the export path uses.
fn published_file_name(path: &Path) -> Result<String> {
    let title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("Invalid note path {:?}", path))?;

    let stat = std::fs::metadata(path).with_context(|| format!("Failed to stat {:?}", path))?;
    let created: DateTime<Local> = stat
        .created()
        .or_else(|_| stat.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now());

    let mut metadata = Metadata::new();
    metadata.insert(
        "date",
        MetaValue::String(created.format("%Y-%m-%d").to_string()),
    );

    Ok(format_filename(title, &metadata))
}

fn confirm(paths: &[String]) -> Result<bool> {
    println!("About to delete from the remote repository:");
    for path in paths {
        println!("  {}", path);
    }
    print!("Proceed? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
