use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declares which file stem belongs to which catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    /// File name without extension, e.g. `alex-rivera`.
    pub file: String,
    /// Catalog entry name, e.g. `alexRivera`.
    pub key: String,
    /// Display name, also the base of the public id.
    pub name: String,
    #[serde(default)]
    pub specialty: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("no file mappings configured")]
    Empty,
    #[error("mapping #{index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
    #[error("file `{0}` is mapped more than once")]
    DuplicateFile(String),
    #[error("catalog key `{0}` is mapped more than once")]
    DuplicateKey(String),
}

impl FileMapping {
    pub fn new(
        file: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        FileMapping {
            file: file.into(),
            key: key.into(),
            name: name.into(),
            specialty: specialty.into(),
        }
    }

    pub fn default_experts() -> Vec<FileMapping> {
        vec![
            FileMapping::new(
                "alex-rivera",
                "alexRivera",
                "Coach Alex Rivera",
                "Fitness & Movement Specialist",
            ),
            FileMapping::new(
                "maya-chen",
                "mayaChen",
                "Dr. Maya Chen",
                "Nutrition & Functional Medicine",
            ),
            FileMapping::new(
                "sarah-kim",
                "sarahKim",
                "Dr. Sarah Kim",
                "Mindfulness & Stress Management",
            ),
            FileMapping::new(
                "james-wilson",
                "jamesWilson",
                "Dr. James Wilson",
                "Sleep Optimization & Recovery",
            ),
            FileMapping::new(
                "lisa-park",
                "lisaPark",
                "Dr. Lisa Park",
                "Natural Supplements & Holistic Health",
            ),
        ]
    }

    fn matches(&self, stem: &str) -> bool {
        self.file.eq_ignore_ascii_case(stem)
    }
}

/// Checks the table once, before any file is looked at.
pub fn validate(mappings: &[FileMapping]) -> Result<(), MappingError> {
    if mappings.is_empty() {
        return Err(MappingError::Empty);
    }

    for (index, mapping) in mappings.iter().enumerate() {
        for (field, value) in [
            ("file", &mapping.file),
            ("key", &mapping.key),
            ("name", &mapping.name),
        ] {
            if value.trim().is_empty() {
                return Err(MappingError::EmptyField { index, field });
            }
        }
    }

    if let Some(file) = mappings
        .iter()
        .map(|mapping| mapping.file.to_lowercase())
        .duplicates()
        .next()
    {
        return Err(MappingError::DuplicateFile(file));
    }

    if let Some(key) = mappings
        .iter()
        .map(|mapping| mapping.key.as_str())
        .duplicates()
        .next()
    {
        return Err(MappingError::DuplicateKey(key.to_owned()));
    }

    Ok(())
}

pub fn find<'a>(mappings: &'a [FileMapping], stem: &str) -> Option<&'a FileMapping> {
    mappings.iter().find(|mapping| mapping.matches(stem))
}
