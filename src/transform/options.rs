use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

pub const AUTO: &str = "auto";

/// A transformation value that is either a number or a provider keyword such as `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Setting {
    Number(u32),
    Named(String),
}

impl Setting {
    pub fn auto() -> Self {
        Setting::Named(AUTO.to_owned())
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Number(value) => write!(f, "{}", value),
            Setting::Named(value) => f.write_str(value),
        }
    }
}

impl From<u32> for Setting {
    fn from(value: u32) -> Self {
        Setting::Number(value)
    }
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Setting::Named(value.to_owned())
    }
}

impl From<String> for Setting {
    fn from(value: String) -> Self {
        Setting::Named(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Crop {
    #[default]
    Fill,
    Fit,
    Thumb,
    Pad,
    Other(String),
}

impl From<String> for Crop {
    fn from(value: String) -> Self {
        match value.as_str() {
            "fill" => Crop::Fill,
            "fit" => Crop::Fit,
            "thumb" => Crop::Thumb,
            "pad" => Crop::Pad,
            _ => Crop::Other(value),
        }
    }
}

impl From<Crop> for String {
    fn from(value: Crop) -> Self {
        value.to_string()
    }
}

impl Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Crop::Fill => "fill",
            Crop::Fit => "fit",
            Crop::Thumb => "thumb",
            Crop::Pad => "pad",
            Crop::Other(other) => other,
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gravity {
    #[default]
    Center,
    Face,
    Other(String),
}

impl From<String> for Gravity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "center" => Gravity::Center,
            "face" => Gravity::Face,
            _ => Gravity::Other(value),
        }
    }
}

impl From<Gravity> for String {
    fn from(value: Gravity) -> Self {
        value.to_string()
    }
}

impl Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Gravity::Center => "center",
            Gravity::Face => "face",
            Gravity::Other(other) => other,
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Format {
    #[default]
    Webp,
    Auto,
    Png,
    Jpg,
    Avif,
    Other(String),
}

impl From<String> for Format {
    fn from(value: String) -> Self {
        match value.as_str() {
            "webp" => Format::Webp,
            "auto" => Format::Auto,
            "png" => Format::Png,
            "jpg" => Format::Jpg,
            "avif" => Format::Avif,
            _ => Format::Other(value),
        }
    }
}

impl From<Format> for String {
    fn from(value: Format) -> Self {
        value.to_string()
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Format::Webp => "webp",
            Format::Auto => "auto",
            Format::Png => "png",
            Format::Jpg => "jpg",
            Format::Avif => "avif",
            Format::Other(other) => other,
        };
        f.write_str(value)
    }
}

/// Resize, crop and delivery parameters for a single image URL.
///
/// Every field is optional. Absent fields fall back to the provider defaults
/// when encoded, see [`super::encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpr: Option<Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Gravity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<Setting>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Setting>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Sets width and height to the same value.
    pub fn square(self, size: u32) -> Self {
        self.width(size).height(size)
    }

    pub fn crop(mut self, crop: Crop) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn quality(mut self, quality: impl Into<Setting>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn dpr(mut self, dpr: impl Into<Setting>) -> Self {
        self.dpr = Some(dpr.into());
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn radius(mut self, radius: impl Into<Setting>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_unknown_crop_verbatim() {
        let crop = Crop::from("lfill".to_owned());

        assert_eq!(crop, Crop::Other("lfill".to_owned()));
        assert_eq!(crop.to_string(), "lfill");
    }

    #[test]
    fn should_parse_known_gravity() {
        assert_eq!(Gravity::from("face".to_owned()), Gravity::Face);
        assert_eq!(Gravity::from("center".to_owned()), Gravity::Center);
    }

    #[test]
    fn should_deserialize_options_from_yaml() -> Result<(), Box<dyn std::error::Error>> {
        let yaml = "width: 400\nheight: auto\ncrop: thumb\nquality: '80'\ngravity: face\n";

        let options = serde_yaml::from_str::<TransformOptions>(yaml)?;

        assert_eq!(options.width, Some(Setting::Number(400)));
        assert_eq!(options.height, Some(Setting::auto()));
        assert_eq!(options.crop, Some(Crop::Thumb));
        assert_eq!(options.quality, Some(Setting::from("80")));
        assert_eq!(options.gravity, Some(Gravity::Face));
        assert_eq!(options.format, None);

        Ok(())
    }
}
