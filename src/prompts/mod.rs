//! Image-generation prompts for every brand asset.
//!
//! Each subject of the static catalog is rendered through its group's
//! template. A [`PromptWriter`] may then refine the brief; when it fails the
//! template text is kept. The results go to `generated-prompts.json` and
//! every run is appended to `generation-log.json`.

mod subject;
mod template;

pub use subject::{BrandGuidelines, ColorPalette, Details, PromptGroup, Subject, BRAND, SUBJECTS};

use crate::http::Error;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

pub const PROMPTS_FILE_NAME: &str = "generated-prompts.json";
pub const GENERATION_LOG_FILE_NAME: &str = "generation-log.json";
pub const PROMPT_GUIDE_FILE_NAME: &str = "USAGE_INSTRUCTIONS.md";

const DEFAULT_OUTPUT_DIR: &str = "generated-assets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "PromptConfig::default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "PromptConfig::default_model")]
    pub model: String,
}

impl PromptConfig {
    fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    fn default_model() -> String {
        crate::gemini::DEFAULT_MODEL.to_owned()
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        PromptConfig {
            output_dir: PromptConfig::default_output_dir(),
            model: PromptConfig::default_model(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSource {
    Template,
    Gemini,
}

/// Turns a rendered brief into the final prompt.
pub trait PromptWriter {
    fn source(&self) -> PromptSource;
    async fn write(&self, brief: &str) -> Result<String, Error>;
}

/// Keeps the rendered brief as the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateWriter;

impl PromptWriter for TemplateWriter {
    fn source(&self) -> PromptSource {
        PromptSource::Template
    }

    async fn write(&self, brief: &str) -> Result<String, Error> {
        Ok(brief.to_owned())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    pub prompt: String,
    pub source: PromptSource,
    pub timestamp: DateTime<Utc>,
    pub brand_guidelines: &'static BrandGuidelines,
}

pub type PromptSet = BTreeMap<PromptGroup, BTreeMap<String, GeneratedPrompt>>;

/// One record of `generation-log.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum LogEntry {
    PromptsGenerated {
        timestamp: DateTime<Utc>,
        source: PromptSource,
        total: usize,
        fallbacks: usize,
        summary: BTreeMap<PromptGroup, usize>,
    },
    Error {
        timestamp: DateTime<Utc>,
        error: String,
        causes: Vec<String>,
    },
}

impl LogEntry {
    pub fn error(error: &anyhow::Error) -> Self {
        LogEntry::Error {
            timestamp: Utc::now(),
            error: error.to_string(),
            causes: error.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug)]
pub struct PromptRun {
    pub prompts: PromptSet,
    /// `group/key` of prompts that kept the template text.
    pub fallbacks: Vec<String>,
    pub prompts_path: PathBuf,
    pub log_path: PathBuf,
    pub guide: Option<PathBuf>,
}

impl PromptRun {
    pub fn total(&self) -> usize {
        self.prompts.values().map(BTreeMap::len).sum()
    }
}

#[derive(Serialize)]
struct BriefContext<'a> {
    brand: &'static BrandGuidelines,
    #[serde(flatten)]
    details: &'a Details,
}

#[derive(Serialize)]
struct GuideGroup {
    name: PromptGroup,
    category: &'static str,
    count: usize,
}

#[derive(Serialize)]
struct GuideContext<'a> {
    total: usize,
    model: Option<&'a str>,
    folder: &'a str,
    groups: Vec<GuideGroup>,
    brand: &'static BrandGuidelines,
    fallbacks: &'a [String],
}

pub struct PromptGenerator<W: PromptWriter> {
    config: PromptConfig,
    folder: String,
    writer: W,
}

impl<W: PromptWriter> PromptGenerator<W> {
    pub fn new(config: PromptConfig, folder: impl Into<String>, writer: W) -> Self {
        PromptGenerator {
            config,
            folder: folder.into().trim_matches('/').to_owned(),
            writer,
        }
    }

    pub async fn run(&self) -> Result<PromptRun> {
        log::info!("Generating prompts for {} assets", SUBJECTS.len());

        let hb = template::handlebars()?;
        let mut prompts = PromptSet::new();
        let mut fallbacks = vec![];

        for subject in SUBJECTS.iter() {
            let brief = hb
                .render(
                    subject.group.template(),
                    &BriefContext {
                        brand: &BRAND,
                        details: &subject.details,
                    },
                )
                .with_context(|| format!("Cannot render prompt for {}", subject.key))?;
            let brief = brief.trim();

            let (prompt, source) = match self.writer.write(brief).await {
                Ok(text) if !text.trim().is_empty() => {
                    (text.trim().to_owned(), self.writer.source())
                }
                Ok(_) => {
                    log::warn!("Empty prompt for {}, keeping the template", subject.key);
                    fallbacks.push(format!("{}/{}", subject.group.category(), subject.key));
                    (brief.to_owned(), PromptSource::Template)
                }
                Err(err) => {
                    log::warn!("Cannot refine prompt for {}: {}", subject.key, err);
                    fallbacks.push(format!("{}/{}", subject.group.category(), subject.key));
                    (brief.to_owned(), PromptSource::Template)
                }
            };

            log::debug!("prompt ready for {}/{}", subject.group.category(), subject.key);

            prompts.entry(subject.group).or_default().insert(
                subject.key.to_owned(),
                GeneratedPrompt {
                    prompt,
                    source,
                    timestamp: Utc::now(),
                    brand_guidelines: &BRAND,
                },
            );
        }

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Cannot create {}", output_dir.display()))?;

        let prompts_path = output_dir.join(PROMPTS_FILE_NAME);
        let data = serde_json::to_string_pretty(&prompts)?;
        fs::write(&prompts_path, data)
            .with_context(|| format!("Cannot write {}", prompts_path.display()))?;
        log::info!("Prompts saved to {}", prompts_path.display());

        let log_path = append_log(
            output_dir,
            &LogEntry::PromptsGenerated {
                timestamp: Utc::now(),
                source: self.writer.source(),
                total: SUBJECTS.len(),
                fallbacks: fallbacks.len(),
                summary: prompts
                    .iter()
                    .map(|(group, entries)| (*group, entries.len()))
                    .collect(),
            },
        )?;

        let guide = self.write_guide(&prompts, &fallbacks, &hb);

        Ok(PromptRun {
            prompts,
            fallbacks,
            prompts_path,
            log_path,
            guide,
        })
    }

    fn write_guide(
        &self,
        prompts: &PromptSet,
        fallbacks: &[String],
        hb: &handlebars::Handlebars,
    ) -> Option<PathBuf> {
        let context = GuideContext {
            total: prompts.values().map(BTreeMap::len).sum(),
            model: match self.writer.source() {
                PromptSource::Gemini => Some(self.config.model.as_str()),
                PromptSource::Template => None,
            },
            folder: &self.folder,
            groups: prompts
                .iter()
                .map(|(group, entries)| GuideGroup {
                    name: *group,
                    category: group.category().as_str(),
                    count: entries.len(),
                })
                .collect(),
            brand: &BRAND,
            fallbacks,
        };

        let path = self.config.output_dir.join(PROMPT_GUIDE_FILE_NAME);
        let written = hb
            .render(template::PROMPT_GUIDE_TEMPLATE, &context)
            .context("Cannot render prompt guide")
            .and_then(|content| {
                fs::write(&path, content)
                    .with_context(|| format!("Cannot write {}", path.display()))
            });

        match written {
            Ok(()) => Some(path),
            Err(err) => {
                log::warn!("{:#}", err);
                None
            }
        }
    }
}

/// Appends `entry` to the JSON array in `generation-log.json`, creating the file if needed.
pub fn append_log(output_dir: &Path, entry: &LogEntry) -> Result<PathBuf> {
    let path = output_dir.join(GENERATION_LOG_FILE_NAME);

    let mut entries = if path.exists() {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        serde_json::from_str::<Vec<serde_json::Value>>(&content)
            .with_context(|| format!("Cannot parse {}", path.display()))?
    } else {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Cannot create {}", output_dir.display()))?;
        vec![]
    };

    entries.push(serde_json::to_value(entry)?);

    fs::write(&path, serde_json::to_string_pretty(&entries)?)
        .with_context(|| format!("Cannot write {}", path.display()))?;

    Ok(path)
}
