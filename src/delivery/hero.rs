use serde::{Deserialize, Serialize};

const LAYER_APPLY: &str = "fl_layer_apply";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroOptions {
    pub width: u32,
    pub height: u32,
    /// Asset id of an image laid over the background.
    pub overlay: Option<String>,
    pub overlay_opacity: u8,
    /// Gradient descriptor, written as `l_gradient:<descriptor>`.
    pub gradient: Option<String>,
}

impl Default for HeroOptions {
    fn default() -> Self {
        HeroOptions {
            width: 1920,
            height: 1080,
            overlay: None,
            overlay_opacity: 50,
            gradient: None,
        }
    }
}

impl HeroOptions {
    pub fn overlay(mut self, overlay: impl Into<String>, opacity: u8) -> Self {
        self.overlay = Some(overlay.into());
        self.overlay_opacity = opacity;
        self
    }

    pub fn gradient(mut self, gradient: impl Into<String>) -> Self {
        self.gradient = Some(gradient.into());
        self
    }

    /// Base group first, then the overlay layer, then the gradient layer.
    /// Each layer is closed by its own `fl_layer_apply` group.
    pub(super) fn segment(&self) -> String {
        let mut groups = vec![format!(
            "w_{},h_{},c_fill,q_auto,f_webp",
            self.width, self.height
        )];

        if let Some(overlay) = self.overlay.as_deref().filter(|o| !o.is_empty()) {
            // layer ids use `:` in place of folder separators
            groups.push(format!(
                "l_{},o_{}",
                overlay.replace('/', ":"),
                self.overlay_opacity
            ));
            groups.push(LAYER_APPLY.to_owned());
        }

        if let Some(gradient) = self.gradient.as_deref().filter(|g| !g.is_empty()) {
            groups.push(format!("l_gradient:{}", gradient));
            groups.push(LAYER_APPLY.to_owned());
        }

        groups.join("/")
    }
}
