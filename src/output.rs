//! File naming and atomic PNG saving.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::designs::{ComposedImage, Design};
use crate::error::GenerateError;

/// Generate an output filename from a design and URL.
///
/// The URL, scheme stripped, is reduced to a short slug and followed by the
/// current unix timestamp.
#[must_use]
pub fn auto_filename(design: Design, url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let slug = sanitize_for_filename(without_scheme, 40);
    format!("{}-{slug}-{}.png", design.name(), chrono::Utc::now().timestamp())
}

/// Lowercase ASCII words of `input` joined by hyphens, cut to `max_len` bytes.
///
/// Falls back to `"qr"` when nothing usable is left.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut slug = input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    slug.truncate(max_len);
    match slug.trim_end_matches('-') {
        "" => "qr".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Resolve the output path inside `output_dir`.
///
/// An explicit name keeps only its file name component so every image lands
/// in the output directory, replacing any file of that name. Generated names
/// get a numeric suffix instead of replacing an earlier run's image.
#[must_use]
pub fn resolve_output_path(output_dir: &Path, explicit: Option<&str>, design: Design, url: &str) -> PathBuf {
    match explicit.and_then(|p| Path::new(p).file_name()) {
        Some(name) => output_dir.join(name),
        None => unused_path(output_dir, &auto_filename(design, url)),
    }
}

/// `dir/name`, or `dir/<stem>-N.png` for the first N from 2 that is free.
fn unused_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }
    let stem = name.strip_suffix(".png").unwrap_or(name);
    (2u32..)
        .map(|n| dir.join(format!("{stem}-{n}.png")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Save a composed image as PNG.
///
/// The image is written to a hidden sibling file first and renamed into
/// place, so a failed write never leaves a partial file at `output_path`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn save_png(image: &ComposedImage, output_path: &Path) -> Result<(), GenerateError> {
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file_name = output_path.file_name().map_or_else(|| "qr.png".into(), |n| n.to_string_lossy().into_owned());
    let temp_path = output_path.with_file_name(format!(".{file_name}.tmp"));

    let written = image
        .to_dynamic()
        .save_with_format(&temp_path, ImageFormat::Png)
        .map_err(|source| GenerateError::FileWrite { path: output_path.to_path_buf(), source })
        .and_then(|()| std::fs::rename(&temp_path, output_path).map_err(GenerateError::Io));

    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    written
}
