//! Image embed conversion and collection.
//!
//! Six mutually exclusive embed shapes, tried most-specific first. Every
//! match with an image extension is rewritten to standard markdown image
//! syntax pointing at the upload path and registered with the collector;
//! non-image embeds are left for the document-link rules.

use super::TranspileContext;
use crate::assets::AssetCollector;
use crate::config::ImagePosition;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static IMAGE_EXTENSIONS: OnceLock<Regex> = OnceLock::new();

fn image_extensions() -> &'static Regex {
    IMAGE_EXTENSIONS.get_or_init(|| Regex::new(r"(?i)\.(png|jpg|jpeg|gif|webp|svg)$").unwrap())
}

/// Whether a referenced file name has an image extension.
pub(super) fn is_image(name: &str) -> bool {
    image_extensions().is_match(name)
}

static CENTER_SIZED: OnceLock<Regex> = OnceLock::new();

fn center_sized() -> &'static Regex {
    CENTER_SIZED
        .get_or_init(|| Regex::new(r"!\[\[(.+?)(?:\|.+)?\|center\|(\d+)x(\d+)\]\]").unwrap())
}

static CENTER_WIDTH: OnceLock<Regex> = OnceLock::new();

fn center_width() -> &'static Regex {
    CENTER_WIDTH.get_or_init(|| Regex::new(r"!\[\[(.+?)(?:\|.+)?\|center\|(\d+)\]\]").unwrap())
}

static SIZED: OnceLock<Regex> = OnceLock::new();

fn sized() -> &'static Regex {
    SIZED.get_or_init(|| Regex::new(r"!\[\[(.+?)(?:\|.+)?\|(\d+)x(\d+)\]\]").unwrap())
}

static WIDTH: OnceLock<Regex> = OnceLock::new();

fn width_only() -> &'static Regex {
    WIDTH.get_or_init(|| Regex::new(r"!\[\[(.+?)(?:\|.+)?\|(\d+)\]\]").unwrap())
}

static CENTER: OnceLock<Regex> = OnceLock::new();

fn center_only() -> &'static Regex {
    CENTER.get_or_init(|| Regex::new(r"!\[\[(.+?)\|center\]\]").unwrap())
}

static PLAIN: OnceLock<Regex> = OnceLock::new();

fn plain() -> &'static Regex {
    PLAIN.get_or_init(|| Regex::new(r"!\[\[(.+?)(?:\|.+)?\]\]").unwrap())
}

pub(super) fn convert_embeds(
    text: &str,
    ctx: &TranspileContext,
    collector: &mut AssetCollector,
) -> String {
    let text = center_sized().replace_all(text, |c: &Captures| {
        rewrite(&c[0], &c[1], Some(&c[2]), Some(&c[3]), true, ctx, collector)
    });
    let text = center_width().replace_all(&text, |c: &Captures| {
        rewrite(&c[0], &c[1], Some(&c[2]), None, true, ctx, collector)
    });
    let text = sized().replace_all(&text, |c: &Captures| {
        rewrite(&c[0], &c[1], Some(&c[2]), Some(&c[3]), false, ctx, collector)
    });
    let text = width_only().replace_all(&text, |c: &Captures| {
        rewrite(&c[0], &c[1], Some(&c[2]), None, false, ctx, collector)
    });
    let text = center_only().replace_all(&text, |c: &Captures| {
        rewrite(&c[0], &c[1], None, None, true, ctx, collector)
    });
    plain()
        .replace_all(&text, |c: &Captures| {
            rewrite(&c[0], &c[1], None, None, false, ctx, collector)
        })
        .into_owned()
}

fn rewrite(
    whole: &str,
    filename: &str,
    width: Option<&str>,
    height: Option<&str>,
    centered: bool,
    ctx: &TranspileContext,
    collector: &mut AssetCollector,
) -> String {
    if !is_image(filename) {
        return whole.to_string();
    }

    let name = filename.rsplit('/').next().unwrap_or(filename);
    let local_path = format!("{}/{}", ctx.local_image_base, name);
    let upload_path = format!("{}/{}", ctx.upload_image_base, name);
    collector.add(local_path, upload_path.clone());

    format!(
        "![{}](/{}){}",
        name,
        upload_path,
        attribute_suffix(width, height, centered, ctx)
    )
}

/// Attribute suffix like `{: width="300" height="200" .center .shadow}`.
/// Empty when no attribute or class applies.
fn attribute_suffix(
    width: Option<&str>,
    height: Option<&str>,
    centered: bool,
    ctx: &TranspileContext,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(width) = width {
        parts.push(format!("width=\"{}\"", width));
    }
    if let Some(height) = height {
        parts.push(format!("height=\"{}\"", height));
    }

    let position = if centered {
        ImagePosition::Center
    } else {
        ctx.rules.image_position
    };
    if position != ImagePosition::Normal {
        parts.push(format!(".{}", position.as_str()));
    }
    if ctx.rules.image_shadow {
        parts.push(String::from(".shadow"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("{{: {}}}", parts.join(" "))
    }
}
