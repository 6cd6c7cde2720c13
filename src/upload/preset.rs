use crate::{
    catalog::Category,
    transform::{Crop, Gravity},
};
use itertools::Itertools;

/// Applied to every upload after the category transformation.
const DELIVERY_DEFAULTS: &str = "q_auto,f_webp";

const LOGO_PREFIX: &str = "tuneatlife-logo";
const LOGO_ICON_VARIATION: &str = "icon";

/// How the public id is derived from the slug of a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicIdForm {
    /// `<slug>-<suffix>`, e.g. `coach-alex-rivera-avatar`.
    Suffixed(&'static str),
    /// `<prefix>-<slug>`, e.g. `tuneatlife-logo-main`.
    Prefixed(&'static str),
}

/// Incoming transformation applied by the provider when a file of a category is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPreset {
    pub width: u32,
    pub height: u32,
    pub crop: Crop,
    pub gravity: Option<Gravity>,
    pub radius: Option<&'static str>,
    pub background: Option<&'static str>,
    pub id_form: PublicIdForm,
}

impl UploadPreset {
    pub fn for_category(category: Category) -> UploadPreset {
        let preset = |width, height, crop, suffix| UploadPreset {
            width,
            height,
            crop,
            gravity: None,
            radius: None,
            background: None,
            id_form: PublicIdForm::Suffixed(suffix),
        };

        match category {
            Category::Experts => UploadPreset {
                gravity: Some(Gravity::Face),
                radius: Some("max"),
                ..preset(400, 400, Crop::Fill, "avatar")
            },
            Category::Testimonials => UploadPreset {
                gravity: Some(Gravity::Face),
                ..preset(300, 300, Crop::Fill, "testimonial")
            },
            Category::Icons => UploadPreset {
                background: Some("transparent"),
                ..preset(256, 256, Crop::Pad, "icon")
            },
            Category::Features => preset(800, 600, Crop::Fill, "demo"),
            Category::Social => preset(1200, 800, Crop::Fill, "social-proof"),
            Category::Logo => UploadPreset {
                background: Some("transparent"),
                id_form: PublicIdForm::Prefixed(LOGO_PREFIX),
                ..preset(800, 200, Crop::Fit, "logo")
            },
            Category::Hero => preset(1920, 1080, Crop::Fill, "hero"),
        }
    }

    /// Like [`UploadPreset::for_category`], but the `icon` logo variation is
    /// padded to a 512 square instead of the wide logo box.
    pub fn for_asset(category: Category, name: &str) -> UploadPreset {
        let preset = UploadPreset::for_category(category);

        if category == Category::Logo && slug(name) == LOGO_ICON_VARIATION {
            UploadPreset {
                width: 512,
                height: 512,
                crop: Crop::Pad,
                ..preset
            }
        } else {
            preset
        }
    }

    /// Only the parameters the preset sets, followed by the delivery defaults
    /// as a second group.
    pub fn transformation(&self) -> String {
        let tokens = [
            Some(format!("w_{}", self.width)),
            Some(format!("h_{}", self.height)),
            Some(format!("c_{}", self.crop)),
            self.gravity.as_ref().map(|gravity| format!("g_{}", gravity)),
            self.radius.map(|radius| format!("r_{}", radius)),
            self.background.map(|background| format!("b_{}", background)),
        ];

        format!("{}/{}", tokens.into_iter().flatten().join(","), DELIVERY_DEFAULTS)
    }

    pub fn public_id(&self, name: &str) -> String {
        match self.id_form {
            PublicIdForm::Suffixed(suffix) => format!("{}-{}", slug(name), suffix),
            PublicIdForm::Prefixed(prefix) => format!("{}-{}", prefix, slug(name)),
        }
    }
}

/// Lowercases and replaces everything outside `a-z` with `-`.
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() { c } else { '-' })
        .collect()
}
