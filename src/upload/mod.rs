mod mapping;
mod preset;
mod scan;

pub use mapping::{find, validate, FileMapping, MappingError};
pub use preset::{slug, PublicIdForm, UploadPreset};
pub use scan::{is_image, scan, ScannedImage, IMAGE_EXTENSIONS};

use crate::{
    catalog::{Catalog, Category},
    checksum::Checksum,
    cloudinary::{UploadRequest, UploadResponse, UploadSource, Uploader},
    config::UploadConfig,
    delivery::UrlBuilder,
    report,
    transform::TransformOptions,
};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::{collections::BTreeMap, fmt, path::PathBuf};

const PLATFORM: &str = "tuneatlife";
const SOURCE: &str = "upload-avatars";
const UPLOAD_FORMAT: &str = "webp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanning,
    Processing,
    CatalogUpdated,
    ReportGenerated,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scanning => "scanning",
            Stage::Processing => "processing",
            Stage::CatalogUpdated => "catalog update",
            Stage::ReportGenerated => "report",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes: u64,
    pub created_at: String,
}

impl From<&UploadResponse> for AssetMetadata {
    fn from(response: &UploadResponse) -> Self {
        AssetMetadata {
            width: response.width,
            height: response.height,
            format: response.format.to_owned(),
            bytes: response.bytes,
            created_at: response.created_at.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub key: String,
    pub name: String,
    pub specialty: String,
    pub file_name: String,
    /// Id relative to the delivery folder, as written to the catalog.
    pub catalog_id: String,
    /// Id as returned by the provider.
    pub public_id: String,
    pub secure_url: String,
    pub checksum: String,
    pub metadata: AssetMetadata,
    pub variations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpload {
    pub key: String,
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct UploadRun {
    pub category: Category,
    pub environment: String,
    pub scanned: usize,
    pub uploaded: Vec<UploadedAsset>,
    pub failures: Vec<FailedUpload>,
    pub catalog_path: PathBuf,
    /// False when nothing was uploaded or the update failed.
    pub catalog_updated: bool,
    pub catalog_backup: Option<PathBuf>,
    pub catalog_error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    /// Nothing to upload; the guide path is set when it could be written.
    NoImages { guide: Option<PathBuf> },
    Completed(UploadRun),
}

/// Runs one batch: scan, upload each file, update the catalog, report.
pub struct Orchestrator<U> {
    config: UploadConfig,
    urls: UrlBuilder,
    uploader: U,
    environment: String,
}

impl<U: Uploader> Orchestrator<U> {
    pub fn new(
        config: UploadConfig,
        urls: UrlBuilder,
        uploader: U,
        environment: impl Into<String>,
    ) -> Self {
        Orchestrator {
            config,
            urls,
            uploader,
            environment: environment.into(),
        }
    }

    /// Partial upload failures and a failed catalog update are part of a
    /// completed run and are recorded in the reports. An error is returned
    /// only for an invalid mapping table or an unreadable input directory.
    pub async fn run(&self) -> Result<Outcome> {
        validate(&self.config.mappings).context("Invalid upload mapping table")?;

        self.enter(Stage::Scanning);
        let images = scan(&self.config.input_dir, &self.config.mappings)?;

        if images.is_empty() {
            log::warn!(
                "No images found in {}",
                self.config.input_dir.display()
            );
            let guide = report::write_generation_guide(&self.config);
            return Ok(Outcome::NoImages { guide });
        }

        log::info!("Found {} images to process", images.len());

        self.enter(Stage::Processing);
        let mut run = UploadRun {
            category: self.config.category,
            environment: self.environment.to_owned(),
            scanned: images.len(),
            uploaded: vec![],
            failures: vec![],
            catalog_path: self.config.catalog.to_owned(),
            catalog_updated: false,
            catalog_backup: None,
            catalog_error: None,
        };

        for image in &images {
            log::info!("Processing {} ({})", image.mapping.name, image.file_name);

            match self.process(image).await {
                Ok(asset) => {
                    log::info!("Uploaded {}: {}", asset.name, asset.secure_url);
                    run.uploaded.push(asset);
                }
                Err(err) => {
                    log::error!("Upload failed for {}: {:#}", image.file_name, err);
                    run.failures.push(FailedUpload {
                        key: image.mapping.key.to_owned(),
                        file_name: image.file_name.to_owned(),
                        error: format!("{:#}", err),
                    });
                }
            }
        }

        log::info!(
            "Uploaded {}/{} images",
            run.uploaded.len(),
            run.scanned
        );

        self.enter(Stage::CatalogUpdated);
        if let Err(err) = self.update_catalog(&mut run) {
            log::error!("Cannot update the asset catalog: {:#}", err);
            run.catalog_error = Some(format!("{:#}", err));
        }

        self.enter(Stage::ReportGenerated);
        report::write_run_report(&self.config.output_dir, &run);

        Ok(Outcome::Completed(run))
    }

    fn enter(&self, stage: Stage) {
        log::info!("[{}] {}", self.config.category, stage);
    }

    async fn process(&self, image: &ScannedImage) -> Result<UploadedAsset> {
        let checksum = Checksum::of_path(&image.path)?;

        let category = self.config.category;
        let preset = UploadPreset::for_asset(category, &image.mapping.name);
        let name_slug = slug(&image.mapping.name);

        let request = UploadRequest::new(
            UploadSource::File(image.path.to_owned()),
            self.upload_folder(),
            preset.public_id(&image.mapping.name),
        )
        .tags([PLATFORM, category.as_str(), name_slug.as_str()])
        .transformation(preset.transformation())
        .format(UPLOAD_FORMAT)
        .context("source", SOURCE)
        .context("platform", PLATFORM)
        .context("environment", self.environment.as_str())
        .context("uploaded_at", Utc::now().to_rfc3339())
        .overwrite(true);

        let response = self
            .uploader
            .upload(&request)
            .await
            .with_context(|| format!("Cannot upload {}", image.file_name))?;

        let catalog_id = self.urls.relative_id(&response.public_id).to_owned();
        let variations = match category {
            Category::Experts | Category::Testimonials => self.urls.avatar_variations(&catalog_id),
            _ => self
                .urls
                .responsive_set(&catalog_id, &TransformOptions::new()),
        };

        Ok(UploadedAsset {
            key: image.mapping.key.to_owned(),
            name: image.mapping.name.to_owned(),
            specialty: image.mapping.specialty.to_owned(),
            file_name: image.file_name.to_owned(),
            catalog_id,
            public_id: response.public_id.to_owned(),
            secure_url: response.secure_url.to_owned(),
            checksum: checksum.value().to_owned(),
            metadata: AssetMetadata::from(&response),
            variations,
        })
    }

    fn upload_folder(&self) -> String {
        let folder = self.urls.folder();
        if folder.is_empty() {
            self.config.category.to_string()
        } else {
            format!("{}/{}", folder, self.config.category)
        }
    }

    /// Merges the uploaded assets into the catalog and records the outcome in `run`.
    fn update_catalog(&self, run: &mut UploadRun) -> Result<()> {
        if run.uploaded.is_empty() {
            log::info!("Nothing uploaded, catalog left untouched");
            return Ok(());
        }

        let path = &self.config.catalog;
        let mut catalog = Catalog::load_or_builtin(path)?;
        let backup = Catalog::backup(path, &self.config.backup_dir)?;

        let written = catalog.merge(
            self.config.category,
            run.uploaded
                .iter()
                .map(|asset| (asset.key.as_str(), asset.catalog_id.as_str())),
        );
        catalog.save(path)?;

        log::info!(
            "Updated {} {} entries in {}",
            written,
            self.config.category,
            path.display()
        );

        run.catalog_updated = true;
        run.catalog_backup = backup;

        Ok(())
    }
}
