mod options;
pub mod preset;

pub use options::{Crop, Format, Gravity, Setting, TransformOptions, AUTO};
pub use preset::Preset;

/// Encodes options into a single comma separated transformation segment.
///
/// Tokens are always emitted in the order `w, h, c, q, f, dpr, g, r, b, fl`.
/// Width, height, crop, quality, format and dpr are always present, falling
/// back to `auto`, `fill` and `webp`. The provider reads `auto` as a real
/// value, so it is never dropped. Gravity is omitted while it is `center`,
/// and empty flags are omitted. Values are not validated.
pub fn encode(options: &TransformOptions) -> String {
    let auto = Setting::auto();

    let mut tokens = vec![
        format!("w_{}", options.width.as_ref().unwrap_or(&auto)),
        format!("h_{}", options.height.as_ref().unwrap_or(&auto)),
        format!("c_{}", options.crop.clone().unwrap_or_default()),
        format!("q_{}", options.quality.as_ref().unwrap_or(&auto)),
        format!("f_{}", options.format.clone().unwrap_or_default()),
        format!("dpr_{}", options.dpr.as_ref().unwrap_or(&auto)),
    ];

    if let Some(gravity) = options
        .gravity
        .as_ref()
        .filter(|gravity| **gravity != Gravity::Center)
    {
        tokens.push(format!("g_{}", gravity));
    }

    if let Some(radius) = &options.radius {
        tokens.push(format!("r_{}", radius));
    }

    if let Some(background) = options.background.as_deref().filter(|b| !b.is_empty()) {
        tokens.push(format!("b_{}", background));
    }

    if let Some(flags) = options.flags.as_deref().filter(|f| !f.is_empty()) {
        tokens.push(format!("fl_{}", flags));
    }

    tokens.join(",")
}
