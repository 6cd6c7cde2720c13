use crate::catalog::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptGroup {
    Experts,
    Testimonials,
    Icons,
    Features,
    SocialProof,
    Logos,
}

impl PromptGroup {
    pub const ALL: [PromptGroup; 6] = [
        PromptGroup::Experts,
        PromptGroup::Testimonials,
        PromptGroup::Icons,
        PromptGroup::Features,
        PromptGroup::SocialProof,
        PromptGroup::Logos,
    ];

    pub fn template(&self) -> &'static str {
        match self {
            PromptGroup::Experts => "expert",
            PromptGroup::Testimonials => "testimonial",
            PromptGroup::Icons => "icon",
            PromptGroup::Features => "feature",
            PromptGroup::SocialProof => "social_proof",
            PromptGroup::Logos => "logo",
        }
    }

    /// Where generated images of this group are uploaded.
    pub fn category(&self) -> Category {
        match self {
            PromptGroup::Experts => Category::Experts,
            PromptGroup::Testimonials => Category::Testimonials,
            PromptGroup::Icons => Category::Icons,
            PromptGroup::Features => Category::Features,
            PromptGroup::SocialProof => Category::Social,
            PromptGroup::Logos => Category::Logo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub neutral: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandGuidelines {
    pub color_palette: ColorPalette,
    pub style: &'static str,
    pub tone: &'static str,
    pub visual_themes: &'static str,
}

pub static BRAND: BrandGuidelines = BrandGuidelines {
    color_palette: ColorPalette {
        primary: "#667eea",
        secondary: "#764ba2",
        accent: "#4ade80",
        neutral: "#f8fafc",
        text: "#1e293b",
    },
    style: "modern, clean, professional, wellness-focused, diverse, inclusive",
    tone: "encouraging, supportive, non-judgmental, empowering",
    visual_themes: "health, wellness, AI technology, cultural diversity, personal growth",
};

/// Template input of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Expert {
        name: &'static str,
        specialty: &'static str,
        ethnicity: &'static str,
        gender: &'static str,
        age: u8,
    },
    Testimonial {
        name: &'static str,
        role: &'static str,
        demographic: &'static str,
        achievement: &'static str,
    },
    Brief {
        brief: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub group: PromptGroup,
    pub key: &'static str,
    pub details: Details,
}

const fn expert(
    key: &'static str,
    name: &'static str,
    specialty: &'static str,
    ethnicity: &'static str,
    gender: &'static str,
    age: u8,
) -> Subject {
    Subject {
        group: PromptGroup::Experts,
        key,
        details: Details::Expert {
            name,
            specialty,
            ethnicity,
            gender,
            age,
        },
    }
}

const fn testimonial(
    key: &'static str,
    name: &'static str,
    role: &'static str,
    demographic: &'static str,
    achievement: &'static str,
) -> Subject {
    Subject {
        group: PromptGroup::Testimonials,
        key,
        details: Details::Testimonial {
            name,
            role,
            demographic,
            achievement,
        },
    }
}

const fn brief(group: PromptGroup, key: &'static str, brief: &'static str) -> Subject {
    Subject {
        group,
        key,
        details: Details::Brief { brief },
    }
}

/// Every asset a prompt is generated for, grouped in output order.
pub static SUBJECTS: [Subject; 31] = [
    expert("alex-rivera", "Alex Rivera", "Fitness Coach", "Latino", "Male", 35),
    expert("maya-chen", "Maya Chen", "Nutritionist", "Asian", "Female", 32),
    expert("sarah-kim", "Sarah Kim", "Mindfulness Expert", "Korean", "Female", 38),
    expert("james-wilson", "James Wilson", "Sleep Specialist", "African American", "Male", 42),
    expert("lisa-park", "Lisa Park", "Supplement Advisor", "Mixed", "Female", 29),
    testimonial("sarah-m", "Sarah M.", "Working Mom", "Caucasian female, 34", "lost 28lbs"),
    testimonial("david-l", "David L.", "CEO", "African American male, 45", "improved sleep 85%"),
    testimonial("maria-g", "Maria G.", "Fitness Enthusiast", "Latina female, 28", "gained 15lbs muscle"),
    testimonial("james-k", "James K.", "Executive", "Asian male, 39", "increased energy 200%"),
    testimonial("lisa-p", "Lisa P.", "New Mom", "Caucasian female, 31", "reduced stress 70%"),
    brief(PromptGroup::Icons, "ai-brain", "Minimalist brain icon with subtle AI/tech elements like circuit patterns"),
    brief(PromptGroup::Icons, "cultural-globe", "Globe with diverse cultural symbols and patterns around it"),
    brief(PromptGroup::Icons, "camera-food", "Modern camera icon focused on healthy, diverse food"),
    brief(PromptGroup::Icons, "progress-chart", "Clean upward trending graph with wellness metrics"),
    brief(PromptGroup::Icons, "goals-target", "Target/bullseye with achievement elements"),
    brief(PromptGroup::Icons, "health-heart", "Heart symbol with wellness/vitality elements"),
    brief(PromptGroup::Icons, "fitness-dumbbell", "Modern dumbbell with energy/movement lines"),
    brief(PromptGroup::Icons, "nutrition-apple", "Stylized apple or healthy food arrangement"),
    brief(PromptGroup::Icons, "sleep-moon", "Crescent moon with peaceful, restful elements"),
    brief(PromptGroup::Icons, "mindfulness-meditation", "Zen/meditation symbol with balance elements"),
    brief(PromptGroup::Icons, "supplements-pills", "Natural supplement/vitamin representation"),
    brief(PromptGroup::Features, "food-photo-analysis", "Mobile phone screen showing food photo analysis feature.\nScreen content: Photo of diverse, healthy meal with AI analysis overlay\nUI elements: Clean, modern interface with nutrition data, suggestions\nFood: Culturally diverse, appetizing, healthy meal\nAnalysis: Calories, nutrients, personalized recommendations visible"),
    brief(PromptGroup::Features, "ai-chat-interface", "Mobile chat interface with AI wellness coach conversation.\nScreen: Clean, modern chat UI with helpful, supportive AI responses\nMessages: Encouraging, personalized wellness advice\nAvatar: Friendly AI coach representation\nUI: TuneAtLife branded interface elements"),
    brief(PromptGroup::Features, "progress-charts", "Wellness progress dashboard with beautiful data visualization.\nCharts: Weight, energy, sleep, mood tracking over time\nStyle: Clean, colorful, encouraging progress trends\nData: Realistic improvement patterns\nUI: Professional dashboard design"),
    brief(PromptGroup::Features, "cultural-meals", "Collage of diverse, healthy meals from different cultures.\nFoods: Asian, Latin, Mediterranean, African, Middle Eastern cuisine\nStyle: Vibrant, appetizing, well-composed food photography\nLayout: Artistic arrangement showing global healthy eating\nQuality: High-resolution, professional food photography"),
    brief(PromptGroup::SocialProof, "user-statistics", "Infographic showing TuneAtLife success statistics.\nData: TuneAtLife success metrics (10,000+ users, 89% see results, etc.)\nStyle: Clean, modern infographic design\nIcons: Minimalist icons representing each statistic\nLayout: Visually appealing arrangement of data points"),
    brief(PromptGroup::SocialProof, "rating-visual", "5-star rating display with user review highlights.\nRating: 4.9/5 stars prominently displayed\nReviews: Key positive quotes from users\nStyle: Trustworthy, professional presentation\nElements: Star icons, testimonial snippets"),
    brief(PromptGroup::SocialProof, "transformation-collage", "Before/after style wellness transformation showcase.\nStyle: Respectful, inspiring representation of health journeys\nFocus: Energy, confidence, wellness improvements (not just weight)\nLayout: Side-by-side or progression-style arrangement\nTone: Encouraging, celebrating personal growth"),
    brief(PromptGroup::Logos, "main", "TuneAtLife company logo design.\nText: \"TuneAtLife\" in modern, professional typography\nSymbol: Subtle wellness/target/growth icon integrated with text\nStyle: Modern, clean, memorable, professional\nColors: Primary #667eea with gradients"),
    brief(PromptGroup::Logos, "icon", "TuneAtLife app icon design.\nFormat: Square app icon, iOS/Android compatible\nSymbol: Recognizable wellness/target/AI symbol\nStyle: Modern, scalable, works at small sizes\nColors: Gradient using brand colors"),
    brief(PromptGroup::Logos, "white", "TuneAtLife logo in white/light version.\nUsage: For dark backgrounds\nStyle: Clean white text and symbol\nContrast: High contrast for readability on dark backgrounds"),
];
