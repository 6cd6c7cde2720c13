use itertools::Itertools;
use std::{collections::BTreeMap, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    File(PathBuf),
    /// A `data:` URI or a remote URL the provider fetches itself.
    Remote(String),
}

/// Parameters for a single image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub source: UploadSource,
    pub folder: String,
    pub public_id: String,
    pub tags: Vec<String>,
    /// Incoming transformation, already encoded.
    pub transformation: Option<String>,
    pub format: Option<String>,
    pub context: BTreeMap<String, String>,
    pub overwrite: bool,
}

impl UploadRequest {
    pub fn new(source: UploadSource, folder: impl Into<String>, public_id: impl Into<String>) -> Self {
        UploadRequest {
            source,
            folder: folder.into(),
            public_id: public_id.into(),
            tags: vec![],
            transformation: None,
            format: None,
            context: BTreeMap::new(),
            overwrite: true,
        }
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn transformation(mut self, transformation: impl Into<String>) -> Self {
        self.transformation = Some(transformation.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Form parameters other than the file, before signing.
    pub(super) fn params(&self, timestamp: i64) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();

        params.insert("timestamp".to_owned(), timestamp.to_string());
        params.insert("public_id".to_owned(), self.public_id.to_owned());
        params.insert("overwrite".to_owned(), self.overwrite.to_string());

        if !self.folder.is_empty() {
            params.insert("folder".to_owned(), self.folder.to_owned());
        }

        if !self.tags.is_empty() {
            params.insert("tags".to_owned(), self.tags.join(","));
        }

        if let Some(transformation) = &self.transformation {
            params.insert("transformation".to_owned(), transformation.to_owned());
        }

        if let Some(format) = &self.format {
            params.insert("format".to_owned(), format.to_owned());
        }

        if !self.context.is_empty() {
            let context = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, escape_context(value)))
                .join("|");
            params.insert("context".to_owned(), context);
        }

        params
    }
}

/// `=` and `|` separate context entries, so they are escaped inside values.
fn escape_context(value: &str) -> String {
    value.replace('=', "\\=").replace('|', "\\|")
}
