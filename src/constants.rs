//! Application constants and configuration

pub const APP_NAME: &str = "AI Art Studio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const ENHANCE_PATH: &str = "/enhance-prompt";
pub const GENERATE_PATH: &str = "/generate";
pub const HEALTH_PATH: &str = "/health";

/// Generation parameter bounds accepted by the service
pub const STEPS_RANGE: std::ops::RangeInclusive<u32> = 20..=150;
pub const GUIDANCE_RANGE: std::ops::RangeInclusive<f32> = 5.0..=15.0;
pub const DIMENSION_RANGE: std::ops::RangeInclusive<u32> = 256..=1024;
pub const DIMENSION_STEP: u32 = 64;

pub const DEFAULT_STEPS: u32 = 50;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 7.5;
pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;

pub const DEFAULT_NEGATIVE_PROMPT: &str = "blurry, bad quality, distorted, ugly, low resolution, \
     pixelated, disfigured, deformed, mutated, amateur, watermark, text, signature";

pub const QUALITY_KEYWORDS: &[&str] = &[
    "highly detailed",
    "professional quality",
    "8k resolution",
    "masterpiece",
    "sharp focus",
    "trending on artstation",
    "award-winning",
    "photorealistic",
];

pub const ARTISTIC_KEYWORDS: &[&str] = &[
    "digital art",
    "concept art",
    "illustration",
    "cinematic lighting",
    "vibrant colors",
    "dramatic composition",
];

/// Prompt templates offered by the picker: (label, prompt)
pub const PROMPT_TEMPLATES: &[(&str, &str)] = &[
    ("Landscape", "A serene mountain landscape at sunset, golden hour light over a calm lake"),
    (
        "Portrait",
        "Portrait of a young woman with flowing hair, studio lighting, professional photography",
    ),
    (
        "Cyberpunk",
        "Futuristic cyberpunk city at night, neon lights, rain, highly detailed, cinematic",
    ),
    ("Fantasy", "An ancient castle floating above the clouds, dragons circling the towers"),
    ("Still life", "A bowl of fruit on a wooden table, soft window light, oil painting"),
    ("Abstract", "Abstract swirling shapes of color, fluid ink in water, high contrast"),
];

pub const DEFAULT_PORTFOLIO_NAME: &str = "My AI Art Portfolio";
