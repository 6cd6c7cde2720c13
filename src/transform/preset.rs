use super::{Crop, Gravity, TransformOptions};

/// Named option sets shared by the landing page components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Avatar,
    HeroMobile,
    HeroDesktop,
    Icon,
    IconLarge,
    CardImage,
    Thumbnail,
    Background,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Avatar,
        Preset::HeroMobile,
        Preset::HeroDesktop,
        Preset::Icon,
        Preset::IconLarge,
        Preset::CardImage,
        Preset::Thumbnail,
        Preset::Background,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Avatar => "avatar",
            Preset::HeroMobile => "hero_mobile",
            Preset::HeroDesktop => "hero_desktop",
            Preset::Icon => "icon",
            Preset::IconLarge => "icon_large",
            Preset::CardImage => "card_image",
            Preset::Thumbnail => "thumbnail",
            Preset::Background => "background",
        }
    }

    pub fn options(&self) -> TransformOptions {
        match self {
            Preset::Avatar => TransformOptions::new()
                .square(150)
                .crop(Crop::Thumb)
                .gravity(Gravity::Face),
            Preset::HeroMobile => TransformOptions::new().width(400).height(600).crop(Crop::Fill),
            Preset::HeroDesktop => TransformOptions::new()
                .width(1200)
                .height(800)
                .crop(Crop::Fill),
            Preset::Icon => TransformOptions::new().square(64).crop(Crop::Fit),
            Preset::IconLarge => TransformOptions::new().square(128).crop(Crop::Fit),
            Preset::CardImage => TransformOptions::new().width(400).height(250).crop(Crop::Fill),
            Preset::Thumbnail => TransformOptions::new().width(200).height(150).crop(Crop::Fill),
            Preset::Background => TransformOptions::new()
                .width(1920)
                .height(1080)
                .crop(Crop::Fill)
                .quality("80"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::encode;

    #[test]
    fn should_encode_avatar_preset() {
        assert_eq!(
            encode(&Preset::Avatar.options()),
            "w_150,h_150,c_thumb,q_auto,f_webp,dpr_auto,g_face"
        );
    }

    #[test]
    fn should_encode_background_quality() {
        assert!(encode(&Preset::Background.options()).contains("q_80"));
    }

    #[test]
    fn should_have_unique_names() {
        use itertools::Itertools;

        let unique = Preset::ALL.iter().map(Preset::name).unique().count();

        assert_eq!(unique, Preset::ALL.len());
    }
}
