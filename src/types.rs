//! Common types and data structures

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Parameters sent to the generation service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

impl GenerationSettings {
    /// Pull every field back into the range the form sliders allow.
    pub fn clamped(self) -> Self {
        let snap = |v: u32| {
            let v = v.clamp(*DIMENSION_RANGE.start(), *DIMENSION_RANGE.end());
            (v / DIMENSION_STEP) * DIMENSION_STEP
        };
        Self {
            steps: self.steps.clamp(*STEPS_RANGE.start(), *STEPS_RANGE.end()),
            guidance_scale: self
                .guidance_scale
                .clamp(*GUIDANCE_RANGE.start(), *GUIDANCE_RANGE.end()),
            width: snap(self.width),
            height: snap(self.height),
            seed: self.seed,
        }
    }

    pub fn dimensions_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Body of `POST /enhance-prompt`
#[derive(Serialize)]
pub struct EnhanceRequest<'a> {
    pub prompt: &'a str,
}

/// Response of `POST /enhance-prompt`
#[derive(Deserialize)]
pub struct EnhanceResponse {
    pub enhanced: String,
}

/// Body of `POST /generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerateRequest {
    pub fn new(prompt: String, negative_prompt: Option<String>, settings: GenerationSettings) -> Self {
        Self {
            prompt,
            negative_prompt: negative_prompt.filter(|n| !n.trim().is_empty()),
            steps: settings.steps,
            guidance_scale: settings.guidance_scale,
            width: settings.width,
            height: settings.height,
            seed: settings.seed,
        }
    }
}

/// Settings echoed back by the service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportedSettings {
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub guidance_scale: Option<f32>,
    #[serde(default)]
    pub dimensions: Option<String>,
}

/// Response of `POST /generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub image: String,
    #[serde(default)]
    pub settings: Option<ReportedSettings>,
}

/// Error body returned by the service on rejected requests
#[derive(Deserialize)]
pub struct ServiceError {
    pub error: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub device: String,
}

/// Connection state shown in the sidebar
#[derive(Clone, PartialEq)]
pub enum ServiceStatus {
    Unknown,
    Checking,
    Online(HealthStatus),
    Offline(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_seed_and_empty_negative() {
        let req = GenerateRequest::new("a cat".into(), Some("  ".into()), GenerationSettings::default());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["prompt"], "a cat");
        assert_eq!(json["steps"], 50);
        assert_eq!(json["width"], 512);
        assert!(json.get("seed").is_none());
        assert!(json.get("negative_prompt").is_none());
    }

    #[test]
    fn request_keeps_seed_and_negative_when_set() {
        let settings = GenerationSettings { seed: Some(42), ..Default::default() };
        let req = GenerateRequest::new("a cat".into(), Some("blurry".into()), settings);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["negative_prompt"], "blurry");
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let wild = GenerationSettings {
            steps: 5,
            guidance_scale: 40.0,
            width: 5000,
            height: 300,
            seed: Some(7),
        };
        let c = wild.clamped();
        assert_eq!(c.steps, 20);
        assert_eq!(c.guidance_scale, 15.0);
        assert_eq!(c.width, 1024);
        assert_eq!(c.height, 256);
        assert_eq!(c.seed, Some(7));
    }

    #[test]
    fn generate_response_tolerates_missing_settings() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"image":"AAAA"}"#).unwrap();
        assert_eq!(resp.image, "AAAA");
        assert!(resp.settings.is_none());

        let resp: GenerateResponse = serde_json::from_str(
            r#"{"image":"AAAA","settings":{"steps":30,"guidance_scale":7.0,"dimensions":"512x512"}}"#,
        )
        .unwrap();
        let s = resp.settings.unwrap();
        assert_eq!(s.steps, Some(30));
        assert_eq!(s.dimensions.as_deref(), Some("512x512"));
    }
}
