mod hero;
mod resolver;

pub use hero::HeroOptions;
pub use resolver::ImageResolver;

use crate::transform::{encode, Crop, Gravity, TransformOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_BASE_URL: &str = "https://res.cloudinary.com";
const DEFAULT_CLOUD_NAME: &str = "dgel7rbdd";
const DEFAULT_FOLDER: &str = "tuneatlife";

const DEFAULT_AVATAR_SIZE: u32 = 150;

/// Width and height for each responsive breakpoint. The `2x` variants double both.
const BREAKPOINTS: [(&str, u32, u32); 4] = [
    ("mobile", 400, 300),
    ("tablet", 768, 576),
    ("desktop", 1200, 900),
    ("large", 1920, 1440),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "DeliveryConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "DeliveryConfig::default_cloud_name")]
    pub cloud_name: String,
    #[serde(default = "DeliveryConfig::default_folder")]
    pub folder: String,
}

impl DeliveryConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_owned()
    }

    fn default_cloud_name() -> String {
        DEFAULT_CLOUD_NAME.to_owned()
    }

    fn default_folder() -> String {
        DEFAULT_FOLDER.to_owned()
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        DeliveryConfig {
            base_url: DeliveryConfig::default_base_url(),
            cloud_name: DeliveryConfig::default_cloud_name(),
            folder: DeliveryConfig::default_folder(),
        }
    }
}

/// Builds delivery URLs of the form
/// `{base}/{cloud}/image/upload/{transformations}/{folder}/{asset_id}`.
///
/// Nothing here touches the network, so a wrong cloud name simply yields
/// URLs that 404.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    config: DeliveryConfig,
}

impl UrlBuilder {
    pub fn new(config: DeliveryConfig) -> Self {
        UrlBuilder { config }
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    pub fn optimized_url(&self, asset_id: &str, options: &TransformOptions) -> String {
        self.url_with_segment(&encode(options), asset_id)
    }

    pub fn avatar_url(&self, asset_id: &str, size: u32) -> String {
        let options = TransformOptions::new()
            .square(size)
            .crop(Crop::Thumb)
            .gravity(Gravity::Face)
            .flags("face_center");

        self.optimized_url(asset_id, &options)
    }

    pub fn default_avatar_url(&self, asset_id: &str) -> String {
        self.avatar_url(asset_id, DEFAULT_AVATAR_SIZE)
    }

    pub fn hero_url(&self, asset_id: &str, options: &HeroOptions) -> String {
        self.url_with_segment(&options.segment(), asset_id)
    }

    /// URLs for every breakpoint plus their high density variants, with the
    /// breakpoint dimensions layered over `base`.
    pub fn responsive_set(
        &self,
        asset_id: &str,
        base: &TransformOptions,
    ) -> BTreeMap<String, String> {
        let mut urls = BTreeMap::new();

        for (name, width, height) in BREAKPOINTS {
            let standard = base.clone().width(width).height(height);
            let dense = base.clone().width(width * 2).height(height * 2);

            urls.insert(name.to_owned(), self.optimized_url(asset_id, &standard));
            urls.insert(format!("{}2x", name), self.optimized_url(asset_id, &dense));
        }

        urls
    }

    /// The size ladder published in upload reports for avatar-like assets.
    pub fn avatar_variations(&self, asset_id: &str) -> BTreeMap<String, String> {
        let circle = |size| {
            TransformOptions::new()
                .square(size)
                .crop(Crop::Thumb)
                .gravity(Gravity::Face)
                .radius("max")
        };
        let card = |size| {
            TransformOptions::new()
                .square(size)
                .crop(Crop::Fill)
                .gravity(Gravity::Face)
        };
        let hero = TransformOptions::new()
            .width(600)
            .height(400)
            .crop(Crop::Fill)
            .gravity(Gravity::Face);

        [
            ("avatar_sm", circle(64)),
            ("avatar_md", circle(128)),
            ("avatar_lg", circle(200)),
            ("card_sm", card(150)),
            ("card_md", card(300)),
            ("card_lg", card(400)),
            ("hero", hero),
        ]
        .into_iter()
        .map(|(name, options)| (name.to_owned(), self.optimized_url(asset_id, &options)))
        .collect()
    }

    /// The delivery folder without leading or trailing `/`.
    pub fn folder(&self) -> &str {
        self.config.folder.trim_matches('/')
    }

    /// Removes the delivery folder prefix from an id returned by the upload API.
    pub fn relative_id<'a>(&self, public_id: &'a str) -> &'a str {
        let folder = self.folder();
        if folder.is_empty() {
            return public_id;
        }

        public_id
            .strip_prefix(folder)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(public_id)
    }

    fn url_with_segment(&self, segment: &str, asset_id: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let folder = self.folder();

        if folder.is_empty() {
            format!(
                "{}/{}/image/upload/{}/{}",
                base, self.config.cloud_name, segment, asset_id
            )
        } else {
            format!(
                "{}/{}/image/upload/{}/{}/{}",
                base, self.config.cloud_name, segment, folder, asset_id
            )
        }
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        UrlBuilder::new(DeliveryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Format;

    fn builder() -> UrlBuilder {
        UrlBuilder::new(DeliveryConfig {
            base_url: "https://res.cloudinary.com".to_owned(),
            cloud_name: "demo".to_owned(),
            folder: "tuneatlife".to_owned(),
        })
    }

    #[test]
    fn should_build_optimized_url() {
        let options = TransformOptions::new()
            .square(80)
            .crop(Crop::Thumb)
            .format(Format::Webp);

        assert_eq!(
            builder().optimized_url("experts/alex", &options),
            "https://res.cloudinary.com/demo/image/upload/w_80,h_80,c_thumb,q_auto,f_webp,dpr_auto/tuneatlife/experts/alex"
        );
    }

    #[test]
    fn should_omit_empty_folder() {
        let builder = UrlBuilder::new(DeliveryConfig {
            folder: String::new(),
            ..DeliveryConfig::default()
        });

        let url = builder.optimized_url("logo/main", &TransformOptions::new());

        assert_eq!(
            url,
            "https://res.cloudinary.com/dgel7rbdd/image/upload/w_auto,h_auto,c_fill,q_auto,f_webp,dpr_auto/logo/main"
        );
    }

    #[test]
    fn should_build_avatar_url_for_any_id() {
        for id in ["experts/alex", "", "weird id/with?chars"] {
            let url = builder().avatar_url(id, 150);

            assert!(url.contains("w_150"));
            assert!(url.contains("h_150"));
            assert!(url.contains("g_face"));
            assert!(url.contains("c_thumb"));
            assert!(url.contains("fl_face_center"));
        }
    }

    #[test]
    fn should_build_the_full_responsive_ladder() {
        let urls = builder().responsive_set("hero/main", &TransformOptions::new().crop(Crop::Fill));

        assert_eq!(urls.len(), 8);
        assert!(urls["mobile"].contains("w_400,h_300"));
        assert!(urls["mobile2x"].contains("w_800,h_600"));
        assert!(urls["large2x"].contains("w_3840,h_2880"));
        assert_eq!(
            urls,
            builder().responsive_set("hero/main", &TransformOptions::new().crop(Crop::Fill))
        );
    }

    #[test]
    fn should_override_caller_dimensions_in_responsive_set() {
        let base = TransformOptions::new().square(10).format(Format::Avif);

        let urls = builder().responsive_set("hero/main", &base);

        assert!(urls["tablet"].contains("w_768,h_576"));
        assert!(urls["tablet"].contains("f_avif"));
    }

    #[test]
    fn should_build_avatar_variations() {
        let urls = builder().avatar_variations("experts/alex");

        assert_eq!(urls.len(), 7);
        assert!(urls["avatar_sm"].contains("w_64,h_64,c_thumb"));
        assert!(urls["avatar_sm"].contains("r_max"));
        assert!(urls["card_md"].contains("w_300,h_300,c_fill"));
        assert!(urls["hero"].contains("w_600,h_400"));
    }

    #[test]
    fn should_strip_delivery_folder_from_uploaded_ids() {
        let builder = builder();

        assert_eq!(
            builder.relative_id("tuneatlife/experts/alex-avatar"),
            "experts/alex-avatar"
        );
        assert_eq!(builder.relative_id("other/alex"), "other/alex");
        assert_eq!(builder.relative_id("tuneatlifeextra/a"), "tuneatlifeextra/a");
    }

    #[test]
    fn should_normalize_slashes_around_folder() {
        let builder = UrlBuilder::new(DeliveryConfig {
            cloud_name: "demo".to_owned(),
            folder: "/tuneatlife/".to_owned(),
            ..DeliveryConfig::default()
        });

        let asset_id = builder.relative_id("tuneatlife/experts/coach-alex-rivera-avatar");

        assert_eq!(asset_id, "experts/coach-alex-rivera-avatar");
        assert_eq!(
            builder.optimized_url(asset_id, &TransformOptions::new()),
            "https://res.cloudinary.com/demo/image/upload/w_auto,h_auto,c_fill,q_auto,f_webp,dpr_auto/tuneatlife/experts/coach-alex-rivera-avatar"
        );
    }
}
