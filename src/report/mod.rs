mod error;
pub mod template;

pub use error::{write_error_report, ErrorReport};

use crate::{
    catalog::Category,
    config::UploadConfig,
    upload::{FailedUpload, UploadRun, UploadedAsset, IMAGE_EXTENSIONS},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use template::{GENERATION_GUIDE_TEMPLATE, UPLOAD_SUMMARY_TEMPLATE, USAGE_INSTRUCTIONS_TEMPLATE};

pub const REPORT_FILE_NAME: &str = "upload-report.json";
pub const SUMMARY_FILE_NAME: &str = "UPLOAD_SUMMARY.md";
pub const USAGE_FILE_NAME: &str = "USAGE_INSTRUCTIONS.md";
pub const GUIDE_FILE_NAME: &str = "GENERATION_GUIDE.md";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_processed: usize,
    pub successful_uploads: usize,
    pub failed_uploads: usize,
    pub generated_at: DateTime<Utc>,
}

/// Ready-to-paste lookups for one uploaded asset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub catalog_entry: String,
    pub avatar: String,
    pub card: String,
    pub direct_url: String,
}

impl Usage {
    fn new(category: Category, asset: &UploadedAsset) -> Self {
        Usage {
            catalog_entry: format!("{}.{}", category, asset.key),
            avatar: format!(
                "resolver.resolve_preset(Category::{:?}, \"{}\", Preset::Avatar)",
                category, asset.key
            ),
            card: format!(
                "resolver.resolve_preset(Category::{:?}, \"{}\", Preset::CardImage)",
                category, asset.key
            ),
            direct_url: asset.secure_url.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportedAsset {
    #[serde(flatten)]
    pub asset: UploadedAsset,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub path: String,
    pub updated: bool,
    pub backup: Option<String>,
    pub error: Option<String>,
}

/// Content of `upload-report.json`, also the data the markdown documents render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub summary: Summary,
    pub category: Category,
    pub environment: String,
    pub assets: BTreeMap<String, ReportedAsset>,
    pub failures: Vec<FailedUpload>,
    pub catalog: CatalogStatus,
}

impl UploadReport {
    pub fn new(run: &UploadRun) -> Self {
        let assets = run
            .uploaded
            .iter()
            .map(|asset| {
                (
                    asset.key.to_owned(),
                    ReportedAsset {
                        asset: asset.to_owned(),
                        usage: Usage::new(run.category, asset),
                    },
                )
            })
            .collect();

        UploadReport {
            summary: Summary {
                total_processed: run.scanned,
                successful_uploads: run.uploaded.len(),
                failed_uploads: run.failures.len(),
                generated_at: Utc::now(),
            },
            category: run.category,
            environment: run.environment.to_owned(),
            assets,
            failures: run.failures.to_owned(),
            catalog: CatalogStatus {
                path: run.catalog_path.display().to_string(),
                updated: run.catalog_updated,
                backup: run
                    .catalog_backup
                    .as_ref()
                    .map(|path| path.display().to_string()),
                error: run.catalog_error.to_owned(),
            },
        }
    }
}

/// Writes the JSON report and both markdown documents into `output_dir`.
///
/// Every document is attempted independently; failures are logged and the
/// paths actually written are returned.
pub fn write_run_report(output_dir: &Path, run: &UploadRun) -> Vec<PathBuf> {
    if let Err(err) = fs::create_dir_all(output_dir) {
        log::warn!("Cannot create {}: {}", output_dir.display(), err);
        return vec![];
    }

    let report = UploadReport::new(run);

    let mut documents = vec![(
        REPORT_FILE_NAME,
        serde_json::to_string_pretty(&report).context("Cannot serialize the upload report"),
    )];

    match template::handlebars() {
        Ok(hb) => {
            documents.push((
                SUMMARY_FILE_NAME,
                hb.render(UPLOAD_SUMMARY_TEMPLATE, &report)
                    .context("Cannot render the upload summary"),
            ));
            documents.push((
                USAGE_FILE_NAME,
                hb.render(USAGE_INSTRUCTIONS_TEMPLATE, &report)
                    .context("Cannot render the usage instructions"),
            ));
        }
        Err(err) => log::warn!("Cannot load report templates: {:#}", err),
    }

    documents
        .into_iter()
        .filter_map(|(name, content)| write_best_effort(&output_dir.join(name), content))
        .collect()
}

/// Writes `GENERATION_GUIDE.md` next to the input directory, listing the
/// file names the mapping table expects.
pub fn write_generation_guide(config: &UploadConfig) -> Option<PathBuf> {
    let dir = config
        .input_dir
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let data = json!({
        "category": config.category,
        "inputDir": config.input_dir.display().to_string(),
        "extensions": IMAGE_EXTENSIONS,
        "mappings": config.mappings,
    });

    let content = template::handlebars().and_then(|hb| {
        hb.render(GENERATION_GUIDE_TEMPLATE, &data)
            .context("Cannot render the generation guide")
    });

    write_best_effort(&dir.join(GUIDE_FILE_NAME), content)
}

fn write_best_effort(path: &Path, content: Result<String>) -> Option<PathBuf> {
    let written = content.and_then(|data| {
        fs::write(path, data).with_context(|| format!("Cannot write {}", path.display()))
    });

    match written {
        Ok(()) => {
            log::info!("Wrote {}", path.display());
            Some(path.to_owned())
        }
        Err(err) => {
            log::warn!("{:#}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{AssetMetadata, FileMapping};
    use tempdir::TempDir;

    fn uploaded(key: &str, name: &str) -> UploadedAsset {
        UploadedAsset {
            key: key.to_owned(),
            name: name.to_owned(),
            specialty: "Sleep Optimization & Recovery".to_owned(),
            file_name: format!("{}.png", key),
            catalog_id: format!("experts/{}-avatar", key),
            public_id: format!("tuneatlife/experts/{}-avatar", key),
            secure_url: format!(
                "https://res.cloudinary.com/demo/image/upload/v1/tuneatlife/experts/{}-avatar.webp",
                key
            ),
            checksum: "abc123".to_owned(),
            metadata: AssetMetadata {
                width: 400,
                height: 400,
                format: "webp".to_owned(),
                bytes: 10240,
                created_at: "2026-01-01T00:00:00Z".to_owned(),
            },
            variations: BTreeMap::from([(
                "avatar_sm".to_owned(),
                "https://example.test/avatar_sm".to_owned(),
            )]),
        }
    }

    fn run() -> UploadRun {
        UploadRun {
            category: Category::Experts,
            environment: "test".to_owned(),
            scanned: 2,
            uploaded: vec![uploaded("jamesWilson", "Dr. James Wilson")],
            failures: vec![FailedUpload {
                key: "lisaPark".to_owned(),
                file_name: "lisa-park.png".to_owned(),
                error: "Upload rejected (status 400)".to_owned(),
            }],
            catalog_path: PathBuf::from("assets/catalog.yaml"),
            catalog_updated: true,
            catalog_backup: Some(PathBuf::from("config-backups/catalog.previous.yaml")),
            catalog_error: None,
        }
    }

    #[test]
    fn should_summarize_run() {
        let report = UploadReport::new(&run());

        assert_eq!(report.summary.total_processed, 2);
        assert_eq!(report.summary.successful_uploads, 1);
        assert_eq!(report.summary.failed_uploads, 1);
        assert_eq!(
            report.assets["jamesWilson"].usage.avatar,
            "resolver.resolve_preset(Category::Experts, \"jamesWilson\", Preset::Avatar)"
        );
        assert_eq!(
            report.assets["jamesWilson"].usage.catalog_entry,
            "experts.jamesWilson"
        );
    }

    #[test]
    fn should_serialize_report_in_camel_case() -> Result<(), Box<dyn std::error::Error>> {
        let value = serde_json::to_value(UploadReport::new(&run()))?;

        assert_eq!(value["summary"]["successfulUploads"], 1);
        assert_eq!(value["category"], "experts");
        assert_eq!(
            value["assets"]["jamesWilson"]["catalogId"],
            "experts/jamesWilson-avatar"
        );
        assert_eq!(value["assets"]["jamesWilson"]["metadata"]["bytes"], 10240);
        assert_eq!(value["failures"][0]["fileName"], "lisa-park.png");

        Ok(())
    }

    #[test]
    fn should_write_all_documents() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("report")?;
        let output = dir.path().join("processed");

        let written = write_run_report(&output, &run());

        assert_eq!(written.len(), 3);

        let summary = fs::read_to_string(output.join(SUMMARY_FILE_NAME))?;
        assert!(summary.contains("- **Successful Uploads**: 1"));
        assert!(summary.contains("### Dr. James Wilson"));
        assert!(summary.contains("Sleep Optimization & Recovery"));
        assert!(summary.contains("10.0 KB"));
        assert!(summary.contains("`lisa-park.png` (lisaPark): Upload rejected (status 400)"));
        assert!(summary.contains("config-backups/catalog.previous.yaml"));

        let usage = fs::read_to_string(output.join(USAGE_FILE_NAME))?;
        assert!(usage.contains("Catalog::load(\"assets/catalog.yaml\")"));
        assert!(usage.contains("Preset::CardImage"));

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_report_catalog_failure() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("report")?;
        let mut run = run();
        run.catalog_updated = false;
        run.catalog_backup = None;
        run.catalog_error = Some("Cannot replace catalog".to_owned());

        write_run_report(dir.path(), &run);

        let summary = fs::read_to_string(dir.path().join(SUMMARY_FILE_NAME))?;
        assert!(summary.contains("was not updated: Cannot replace catalog"));

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_report_untouched_catalog() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("report")?;
        let mut run = run();
        run.uploaded.clear();
        run.catalog_updated = false;
        run.catalog_backup = None;

        write_run_report(dir.path(), &run);

        let summary = fs::read_to_string(dir.path().join(SUMMARY_FILE_NAME))?;
        assert!(summary.contains("No asset was uploaded, so `assets/catalog.yaml` was left untouched."));
        assert!(!summary.contains("Updated `"));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(REPORT_FILE_NAME))?)?;
        assert_eq!(report["catalog"]["updated"], false);

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_not_fail_when_output_is_unwritable() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("report")?;
        let blocker = dir.path().join("processed");
        fs::write(&blocker, b"not a directory")?;

        assert!(write_run_report(&blocker, &run()).is_empty());

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_write_generation_guide_next_to_input() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("report")?;
        let config = UploadConfig {
            input_dir: dir.path().join("images"),
            mappings: FileMapping::default_experts(),
            ..UploadConfig::default()
        };

        let path = write_generation_guide(&config);

        assert_eq!(path, Some(dir.path().join(GUIDE_FILE_NAME)));

        let guide = fs::read_to_string(dir.path().join(GUIDE_FILE_NAME))?;
        assert!(guide.contains("`alex-rivera.jpg`"));
        assert!(guide.contains("`experts.mayaChen`"));
        assert!(guide.contains("`.jpg`, `.jpeg`, `.png`, `.webp`, `.gif`."));

        dir.close()?;
        Ok(())
    }
}
