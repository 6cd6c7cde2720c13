use crate::{
    catalog::Category, cloudinary::CLOUD_NAME_VARS, delivery::DeliveryConfig,
    prompts::PromptConfig, upload::FileMapping,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_CONFIG_FILE_NAME: &str = "tuneatlife.yaml";
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

const DEFAULT_ENVIRONMENT: &str = "development";
const ENVIRONMENT_VARS: [&str; 2] = ["APP_ENV", "MODE"];
const TELEMETRY_DSN_VARS: [&str; 2] = ["SENTRY_DSN", "VITE_SENTRY_DSN"];

const DEFAULT_INPUT_DIR: &str = "generated-assets/expert-avatars/images";
const DEFAULT_OUTPUT_DIR: &str = "generated-assets/expert-avatars/processed";
const DEFAULT_BACKUP_DIR: &str = "generated-assets/expert-avatars/config-backups";
const DEFAULT_CATALOG_PATH: &str = "assets/catalog.yaml";

/// Loads `.env.local` then `.env`, without overriding variables already set.
pub fn load_env_files() {
    for file in ENV_FILES {
        match dotenvy::from_filename(file) {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("Cannot load {}: {}", file, err),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub prompts: PromptConfig,
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Reads `tuneatlife.yaml` when present, then applies the environment.
    pub async fn load() -> Result<Config> {
        let config = Config::load_from(DEFAULT_CONFIG_FILE_NAME).await?;

        Ok(config.with_env(|name| env::var(name).ok()))
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let config_string = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))?;

        let config = serde_yaml::from_str::<Config>(&config_string)
            .with_context(|| format!("Cannot parse {}", path.display()))?;

        Ok(config)
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(cloud_name) = first_set(&lookup, &CLOUD_NAME_VARS) {
            self.delivery.cloud_name = cloud_name;
        }

        self.runtime = RuntimeConfig {
            environment: first_set(&lookup, &ENVIRONMENT_VARS)
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned()),
            telemetry_dsn: first_set(&lookup, &TELEMETRY_DSN_VARS),
        };

        self
    }
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
}

/// Settings that only come from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub environment: String,
    pub telemetry_dsn: Option<String>,
}

impl RuntimeConfig {
    pub fn telemetry_enabled(&self) -> bool {
        self.telemetry_dsn.is_some()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            telemetry_dsn: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "UploadConfig::default_category")]
    pub category: Category,
    #[serde(default = "UploadConfig::default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "UploadConfig::default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "UploadConfig::default_backup_dir")]
    pub backup_dir: PathBuf,
    #[serde(default = "UploadConfig::default_catalog")]
    pub catalog: PathBuf,
    #[serde(default = "FileMapping::default_experts")]
    pub mappings: Vec<FileMapping>,
}

impl UploadConfig {
    fn default_category() -> Category {
        Category::Experts
    }

    fn default_input_dir() -> PathBuf {
        PathBuf::from(DEFAULT_INPUT_DIR)
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    fn default_backup_dir() -> PathBuf {
        PathBuf::from(DEFAULT_BACKUP_DIR)
    }

    fn default_catalog() -> PathBuf {
        PathBuf::from(DEFAULT_CATALOG_PATH)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            category: UploadConfig::default_category(),
            input_dir: UploadConfig::default_input_dir(),
            output_dir: UploadConfig::default_output_dir(),
            backup_dir: UploadConfig::default_backup_dir(),
            catalog: UploadConfig::default_catalog(),
            mappings: FileMapping::default_experts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, fs};
    use tempdir::TempDir;

    #[tokio::test]
    async fn should_use_defaults_without_a_file() -> Result<()> {
        let config = Config::load_from("does-not-exist.yaml").await?;

        assert_eq!(config.delivery, DeliveryConfig::default());
        assert_eq!(config.upload.category, Category::Experts);
        assert_eq!(config.upload.mappings.len(), 5);

        Ok(())
    }

    #[tokio::test]
    async fn should_load_partial_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("config")?;
        let path = dir.path().join("tuneatlife.yaml");
        fs::write(
            &path,
            r#"
delivery:
  folder: staging
upload:
  category: testimonials
  input_dir: in
  mappings:
    - file: sarah-m
      key: sarahM
      name: Sarah M.
"#,
        )?;

        let config = Config::load_from(&path).await?;

        assert_eq!(config.delivery.folder, "staging");
        assert_eq!(config.delivery.base_url, "https://res.cloudinary.com");
        assert_eq!(config.upload.category, Category::Testimonials);
        assert_eq!(config.upload.input_dir, PathBuf::from("in"));
        assert_eq!(config.upload.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.upload.mappings.len(), 1);
        assert_eq!(config.upload.mappings[0].specialty, "");
        assert_eq!(config.prompts.model, "gemini-1.5-pro");
        assert_eq!(config.prompts.output_dir, PathBuf::from("generated-assets"));

        dir.close()?;
        Ok(())
    }

    #[tokio::test]
    async fn should_reject_invalid_yaml() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("config")?;
        let path = dir.path().join("tuneatlife.yaml");
        fs::write(&path, "upload: [not, a, map]")?;

        assert!(Config::load_from(&path).await.is_err());

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_apply_environment() {
        let vars: HashMap<&str, &str> = [
            ("REACT_APP_CLOUDINARY_CLOUD_NAME", "legacy-cloud"),
            ("APP_ENV", "production"),
            ("VITE_SENTRY_DSN", "https://key@sentry.example/1"),
        ]
        .into_iter()
        .collect();

        let config = Config::default().with_env(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.delivery.cloud_name, "legacy-cloud");
        assert_eq!(config.runtime.environment, "production");
        assert!(config.runtime.telemetry_enabled());
    }

    #[test]
    fn should_default_environment() {
        let config = Config::default().with_env(|_| None);

        assert_eq!(config.runtime, RuntimeConfig::default());
        assert_eq!(config.delivery.cloud_name, DeliveryConfig::default().cloud_name);
    }
}
