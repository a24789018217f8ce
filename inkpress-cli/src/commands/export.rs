//! Export command: convert notes and publish the batch.

use anyhow::{Context, Result};
use base64::Engine as _;
use inkpress_core::assets::AssetCollector;
use inkpress_core::config::Config;
use inkpress_core::export::export_post;
use inkpress_core::filename::format_filename;
use inkpress_core::frontmatter::parse_note;
use inkpress_core::metadata::MetadataGenerator;
use inkpress_core::tags::TagGenerator;
use inkpress_core::transpile::{TranspileContext, Transpiler};
use inkpress_remote::github::{Encoding, Publisher, RestGitApi, UploadUnit};
use inkpress_remote::tagger::OpenAiTagger;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Export the given notes, or every note under the posts directory.
///
/// Each note runs parse → metadata → transpile → rename → local export;
/// when GitHub publishing is enabled the batch then goes out as a single
/// commit together with every collected image.
pub async fn export_posts(config_path: &Path, paths: &[PathBuf], all: bool) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let files = if all {
        collect_posts(Path::new(&config.vault.posts_dir))
    } else {
        validate_paths(paths, &config.vault.posts_dir)?
    };

    if files.is_empty() {
        anyhow::bail!("No notes to export under {:?}", config.vault.posts_dir);
    }

    tracing::info!("Exporting {} notes", files.len());

    let tagger = if config.tagger.enabled {
        Some(OpenAiTagger::new(
            config.tagger.api_key.clone(),
            config.tagger.model.clone(),
        ))
    } else {
        None
    };

    let generator = MetadataGenerator::new(config.vault.posts_dir.clone());
    let transpiler = Transpiler::new();
    let ctx = TranspileContext {
        rules: &config.rules,
        blog_url: &config.blog.url,
        local_image_base: &config.vault.images_dir,
        upload_image_base: &config.github.upload_images_dir,
    };

    let mut collector = AssetCollector::new();
    let mut processed: Vec<(String, String)> = Vec::new();

    for file in &files {
        let raw = fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
        let mut post =
            parse_note(&raw, file).with_context(|| format!("Failed to parse {:?}", file))?;

        post.metadata = generator
            .generate(&post, tagger.as_ref().map(|t| t as &dyn TagGenerator))
            .await;
        post.content = transpiler.transpile(&post.content, &ctx, &mut collector);

        let file_name = format_filename(&post.title, &post.metadata);
        let target = export_post(&post, Path::new(&config.vault.export_dir), &file_name)?;
        tracing::info!("Exported {:?}", target);

        processed.push((file_name, post.to_markdown()));
    }

    if config.github.enabled {
        publish_batch(&config, &processed, &collector).await?;
        collector.clear();
    }

    println!("✓ Exported {} posts", processed.len());
    Ok(())
}

/// Upload the exported posts and their collected images as one commit.
async fn publish_batch(
    config: &Config,
    posts: &[(String, String)],
    collector: &AssetCollector,
) -> Result<()> {
    let mut units: Vec<UploadUnit> = posts
        .iter()
        .map(|(name, content)| UploadUnit {
            path: format!("{}/{}", config.github.upload_posts_dir, name),
            content: content.clone(),
            encoding: Encoding::Utf8,
        })
        .collect();

    for asset in collector.list() {
        match fs::read(&asset.local_path) {
            Ok(bytes) => units.push(UploadUnit {
                path: asset.upload_path.clone(),
                content: base64::engine::general_purpose::STANDARD.encode(bytes),
                encoding: Encoding::Base64,
            }),
            Err(err) => {
                tracing::warn!("Skipping image {}: {}", asset.local_path, err);
            }
        }
    }

    let message = config
        .github
        .commit_message_template
        .replace("{count}", &posts.len().to_string());

    let publisher = Publisher::new(RestGitApi::new(&config.github), &config.github);
    publisher
        .upload_batch(&units, &message)
        .await
        .context("Failed to publish batch to GitHub")?;

    tracing::info!(
        "Published {} files to {}/{}",
        units.len(),
        config.github.owner,
        config.github.repo
    );
    Ok(())
}

fn collect_posts(posts_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(posts_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("md"))
        .map(|entry| entry.into_path())
        .collect()
}

fn validate_paths(paths: &[PathBuf], posts_dir: &str) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        anyhow::bail!("No notes given; pass paths or use --all");
    }

    for path in paths {
        if !path.starts_with(posts_dir) {
            anyhow::bail!(
                "{:?} is not under the posts directory {:?}",
                path,
                posts_dir
            );
        }
    }

    Ok(paths.to_vec())
}
