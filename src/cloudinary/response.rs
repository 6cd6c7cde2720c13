use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PingResponse {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageMetric {
    #[serde(default)]
    pub usage: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageResponse {
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub credits: UsageMetric,
    #[serde(default)]
    pub storage: UsageMetric,
}

impl UsageResponse {
    pub fn storage_megabytes(&self) -> u64 {
        (self.storage.usage / 1024.0 / 1024.0).round() as u64
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestroyResponse {
    pub result: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FolderResponse {
    #[serde(default)]
    pub success: bool,
    pub path: String,
}
