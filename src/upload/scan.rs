use super::mapping::{self, FileMapping};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedImage {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub mapping: FileMapping,
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lists recognised images in `input_dir`, sorted by file name.
///
/// The directory is created when missing. Files that are not images, or
/// whose stem matches no mapping, are skipped.
pub fn scan(input_dir: &Path, mappings: &[FileMapping]) -> Result<Vec<ScannedImage>> {
    if !input_dir.exists() {
        log::info!("Creating input directory: {}", input_dir.display());
        fs::create_dir_all(input_dir)
            .with_context(|| format!("Cannot create {}", input_dir.display()))?;
        return Ok(vec![]);
    }

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("Cannot read {}", input_dir.display()))?;

    let mut images = vec![];
    for entry in entries {
        let entry = entry.context("Cannot read directory entry")?;
        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                log::warn!("Skipping {}: {}", path.display(), err);
                continue;
            }
        };

        if !metadata.is_file() || !is_image(&path) {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        match mapping::find(mappings, stem) {
            Some(mapping) => images.push(ScannedImage {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_owned(),
                size: metadata.len(),
                mapping: mapping.to_owned(),
            }),
            None => log::debug!("skipping unmapped file {}", path.display()),
        }
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}
