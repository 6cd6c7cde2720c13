use super::PromptGroup;
use anyhow::Result;
use handlebars::Handlebars;

pub const PROMPT_GUIDE_TEMPLATE: &str = "prompt_guide";

pub fn handlebars<'hb>() -> Result<Handlebars<'hb>> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb.set_strict_mode(true);

    for group in PromptGroup::ALL {
        let source = match group {
            PromptGroup::Experts => include_str!("./expert.hbs"),
            PromptGroup::Testimonials => include_str!("./testimonial.hbs"),
            PromptGroup::Icons => include_str!("./icon.hbs"),
            PromptGroup::Features => include_str!("./feature.hbs"),
            PromptGroup::SocialProof => include_str!("./social_proof.hbs"),
            PromptGroup::Logos => include_str!("./logo.hbs"),
        };
        hb.register_template_string(group.template(), source)?;
    }

    hb.register_template_string(PROMPT_GUIDE_TEMPLATE, include_str!("./prompt_guide.hbs"))?;

    Ok(hb)
}
