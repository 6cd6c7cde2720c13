use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const ERROR_REPORT_FILE_NAME: &str = "error-report.json";

const RECOMMENDATIONS: [&str; 4] = [
    "Check that CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET are set",
    "Run check-cloudinary to verify the credentials and the connection",
    "Name image files after an entry of the upload mapping table",
    "Check the network connection and retry",
];

/// Written once when a run aborts.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub timestamp: DateTime<Utc>,
    pub error: String,
    pub causes: Vec<String>,
    pub recommendations: Vec<&'static str>,
}

impl ErrorReport {
    pub fn new(error: &anyhow::Error) -> Self {
        ErrorReport {
            timestamp: Utc::now(),
            error: error.to_string(),
            causes: error.chain().skip(1).map(ToString::to_string).collect(),
            recommendations: RECOMMENDATIONS.to_vec(),
        }
    }
}

pub fn write_error_report(output_dir: &Path, error: &anyhow::Error) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create {}", output_dir.display()))?;

    let path = output_dir.join(ERROR_REPORT_FILE_NAME);
    let data = serde_json::to_string_pretty(&ErrorReport::new(error))?;
    fs::write(&path, data).with_context(|| format!("Cannot write {}", path.display()))?;

    Ok(path)
}
