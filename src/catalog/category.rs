use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Logo,
    Experts,
    Icons,
    Testimonials,
    Hero,
    Features,
    Social,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Logo,
        Category::Experts,
        Category::Icons,
        Category::Testimonials,
        Category::Hero,
        Category::Features,
        Category::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Logo => "logo",
            Category::Experts => "experts",
            Category::Icons => "icons",
            Category::Testimonials => "testimonials",
            Category::Hero => "hero",
            Category::Features => "features",
            Category::Social => "social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown asset category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_owned()))
    }
}
