use super::UrlBuilder;
use crate::{
    catalog::{Catalog, Category},
    transform::{Preset, TransformOptions},
};

/// Resolves catalog entries to delivery URLs.
///
/// A missing entry is logged and resolves to an empty string, so the page
/// renders a broken image instead of failing.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    urls: UrlBuilder,
    catalog: Catalog,
}

impl ImageResolver {
    pub fn new(urls: UrlBuilder, catalog: Catalog) -> Self {
        ImageResolver { urls, catalog }
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolve(&self, category: Category, name: &str, options: &TransformOptions) -> String {
        match self.catalog.lookup(category, name) {
            Some(asset_id) => self.urls.optimized_url(asset_id, options),
            None => {
                log::warn!("Image not found: {}.{}", category, name);
                String::new()
            }
        }
    }

    pub fn resolve_str(&self, category: &str, name: &str, options: &TransformOptions) -> String {
        match category.parse::<Category>() {
            Ok(category) => self.resolve(category, name, options),
            Err(err) => {
                log::warn!("Image not found: {}.{} ({})", category, name, err);
                String::new()
            }
        }
    }

    pub fn resolve_preset(&self, category: Category, name: &str, preset: Preset) -> String {
        self.resolve(category, name, &preset.options())
    }
}
