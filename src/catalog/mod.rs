mod category;

pub use category::{Category, UnknownCategory};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.yaml");
const BACKUP_FILE_NAME: &str = "catalog.previous.yaml";
/// First line of every catalog file; comments do not survive a serde round trip.
const HEADER: &str = "# Stored asset ids, relative to the delivery folder.\n";

/// Maps `(category, name)` to the stored asset id used in delivery URLs.
///
/// Ids are relative to the delivery folder, e.g. `experts/alex-rivera-fitness-coach`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<Category, BTreeMap<String, String>>,
}

impl Catalog {
    /// The catalog shipped with the landing page.
    pub fn builtin() -> Result<Catalog> {
        let catalog = serde_yaml::from_str::<Catalog>(BUILTIN_CATALOG)
            .context("Cannot parse the builtin catalog")?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read catalog {}", path.display()))?;

        let catalog = serde_yaml::from_str::<Catalog>(&content)
            .with_context(|| format!("Cannot parse catalog {}", path.display()))?;

        Ok(catalog)
    }

    pub fn load_or_builtin(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        if path.exists() {
            Catalog::load(path)
        } else {
            log::info!(
                "no catalog at {}, starting from the builtin one",
                path.display()
            );
            Catalog::builtin()
        }
    }

    /// Writes the catalog through a temporary sibling file so a failed
    /// write never leaves a truncated catalog behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let data = serde_yaml::to_string(self).context("Cannot serialize the catalog")?;
        let data = format!("{}{}", HEADER, data);

        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, data).context("Cannot write the temporary catalog file")?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Cannot replace catalog {}", path.display()))?;

        Ok(())
    }

    /// Copies the catalog file into `backup_dir`, replacing the previous backup.
    /// Returns `None` when there is no catalog file yet.
    pub fn backup(path: impl AsRef<Path>, backup_dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let backup_dir = backup_dir.as_ref();
        fs::create_dir_all(backup_dir)?;

        let backup_path = backup_dir.join(BACKUP_FILE_NAME);
        fs::copy(path, &backup_path)
            .with_context(|| format!("Cannot back up catalog to {}", backup_path.display()))?;

        Ok(Some(backup_path))
    }

    /// `None` means the entry does not exist.
    pub fn lookup(&self, category: Category, name: &str) -> Option<&str> {
        self.entries
            .get(&category)
            .and_then(|names| names.get(name))
            .map(String::as_str)
    }

    /// Like [`Catalog::lookup`], for a category given by name.
    pub fn lookup_str(&self, category: &str, name: &str) -> Option<&str> {
        let category = category.parse::<Category>().ok()?;
        self.lookup(category, name)
    }

    pub fn insert(
        &mut self,
        category: Category,
        name: impl Into<String>,
        asset_id: impl Into<String>,
    ) -> Option<String> {
        self.entries
            .entry(category)
            .or_default()
            .insert(name.into(), asset_id.into())
    }

    /// Inserts or overwrites every entry, returning how many were written.
    pub fn merge<I, K, V>(&mut self, category: Category, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        entries
            .into_iter()
            .map(|(name, asset_id)| self.insert(category, name, asset_id))
            .count()
    }

    pub fn names(&self, category: Category) -> impl Iterator<Item = &str> {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|names| names.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
