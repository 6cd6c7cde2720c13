use anyhow::Result;
use handlebars::{
    Context, Handlebars, Helper, Output, RenderContext, RenderError, RenderErrorReason,
};

pub const UPLOAD_SUMMARY_TEMPLATE: &str = "upload_summary";
pub const USAGE_INSTRUCTIONS_TEMPLATE: &str = "usage_instructions";
pub const GENERATION_GUIDE_TEMPLATE: &str = "generation_guide";

pub fn handlebars<'hb>() -> Result<Handlebars<'hb>> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);

    hb.register_template_string(
        UPLOAD_SUMMARY_TEMPLATE,
        include_str!("./upload_summary.hbs"),
    )?;
    hb.register_template_string(
        USAGE_INSTRUCTIONS_TEMPLATE,
        include_str!("./usage_instructions.hbs"),
    )?;
    hb.register_template_string(
        GENERATION_GUIDE_TEMPLATE,
        include_str!("./generation_guide.hbs"),
    )?;

    hb.register_helper("kib", Box::new(kib_helper));

    Ok(hb)
}

/// Renders a byte count as `12.3 KB`.
fn kib_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> Result<(), RenderError> {
    let bytes = h.param(0).and_then(|v| v.value().as_u64()).ok_or(
        RenderErrorReason::ParamTypeMismatchForName("kib", "bytes".to_owned(), "u64".to_owned()),
    )?;

    out.write(&format!("{:.1} KB", bytes as f64 / 1024.0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_register_every_template() -> Result<(), Box<dyn std::error::Error>> {
        let hb = handlebars()?;

        for name in [
            UPLOAD_SUMMARY_TEMPLATE,
            USAGE_INSTRUCTIONS_TEMPLATE,
            GENERATION_GUIDE_TEMPLATE,
        ] {
            assert!(hb.has_template(name), "missing template {}", name);
        }

        Ok(())
    }

    #[test]
    fn should_format_kilobytes() -> Result<(), Box<dyn std::error::Error>> {
        let mut hb = handlebars()?;
        hb.register_template_string("size", "{{kib bytes}}")?;

        assert_eq!(hb.render("size", &json!({ "bytes": 2048 }))?, "2.0 KB");
        assert!(hb.render("size", &json!({ "bytes": "big" })).is_err());

        Ok(())
    }

    #[test]
    fn should_not_escape_markdown() -> Result<(), Box<dyn std::error::Error>> {
        let mut hb = handlebars()?;
        hb.register_template_string("raw", "{{name}}")?;

        assert_eq!(
            hb.render("raw", &json!({ "name": "Fitness & Movement <Specialist>" }))?,
            "Fitness & Movement <Specialist>"
        );

        Ok(())
    }
}
