//! Generation form state and the enhance-then-generate workflow

use crate::api::{enhance_or_original, ApiError, ArtService};
use crate::constants::DEFAULT_NEGATIVE_PROMPT;
use crate::gallery::{decode_image, NewArtwork};
use crate::types::*;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    #[error("Please enter a prompt describing your artwork")]
    EmptyPrompt,
    #[error("A generation is already in progress")]
    InFlight,
    #[error("Seed must be a non-negative whole number, or empty for random")]
    InvalidSeed,
}

/// Empty text means "let the service pick"; anything else must be a valid `u64`.
pub fn parse_seed(text: &str) -> Result<Option<u64>, SubmitError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| SubmitError::InvalidSeed)
}

/// Everything a background task needs to run one generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub enhance: bool,
    pub settings: GenerationSettings,
}

/// A generated image waiting to be added to the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub image: String,
    /// Prompt actually sent to the service (after enhancement)
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub settings: GenerationSettings,
    pub reported: Option<ReportedSettings>,
    pub timestamp: DateTime<Utc>,
}

impl Preview {
    pub fn to_artwork(&self) -> NewArtwork {
        NewArtwork {
            image: self.image.clone(),
            prompt: self.prompt.clone(),
            negative_prompt: self.negative_prompt.clone(),
            settings: self.settings,
            timestamp: self.timestamp,
        }
    }
}

pub struct GeneratorForm {
    pub prompt: String,
    pub negative_prompt: String,
    pub enhance: bool,
    pub settings: GenerationSettings,
    /// Raw seed field; parsed on submit
    pub seed_text: String,
    loading: bool,
    pub preview: Option<Preview>,
    pub validation_message: Option<String>,
    pub seed_message: Option<String>,
    /// Blocking alert raised by a failed generation
    pub alert: Option<String>,
}

impl GeneratorForm {
    pub fn new(settings: GenerationSettings, enhance: bool) -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: String::new(),
            enhance,
            settings: settings.clamped(),
            seed_text: settings.seed.map(|s| s.to_string()).unwrap_or_default(),
            loading: false,
            preview: None,
            validation_message: None,
            seed_message: None,
            alert: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate the form and mark it loading. The returned job must be passed
    /// back through [`GeneratorForm::complete`] once it finishes.
    pub fn submit(&mut self) -> Result<GenerationJob, SubmitError> {
        if self.loading {
            return Err(SubmitError::InFlight);
        }
        if self.prompt.trim().is_empty() {
            self.validation_message = Some(SubmitError::EmptyPrompt.to_string());
            return Err(SubmitError::EmptyPrompt);
        }
        self.validation_message = None;
        match parse_seed(&self.seed_text) {
            Ok(seed) => {
                self.settings.seed = seed;
                self.seed_message = None;
            }
            Err(e) => {
                self.seed_message = Some(e.to_string());
                return Err(e);
            }
        }
        self.loading = true;

        // Whitespace only matters for the emptiness check; the text goes out as typed
        let negative = self.negative_prompt.trim();
        Ok(GenerationJob {
            prompt: self.prompt.clone(),
            negative_prompt: (!negative.is_empty()).then(|| negative.to_string()),
            enhance: self.enhance,
            settings: self.settings.clamped(),
        })
    }

    pub fn complete(&mut self, result: Result<Preview, ApiError>) {
        self.loading = false;
        match result {
            Ok(preview) => {
                self.preview = Some(preview);
            }
            Err(e) => {
                warn!(error = %e, "Generation failed");
                self.alert = Some(format!("Error generating art: {}", e));
            }
        }
    }

    /// Replace the prompt text with a template, discarding edits.
    pub fn apply_template(&mut self, template: &str) {
        self.prompt = template.to_string();
        self.validation_message = None;
    }

    /// Append a style keyword unless the prompt already contains it.
    pub fn append_keyword(&mut self, keyword: &str) {
        if self.prompt.to_lowercase().contains(&keyword.to_lowercase()) {
            return;
        }
        let trimmed = self.prompt.trim_end().trim_end_matches(',');
        self.prompt = if trimmed.is_empty() {
            keyword.to_string()
        } else {
            format!("{}, {}", trimmed, keyword)
        };
    }

    pub fn use_default_negative(&mut self) {
        self.negative_prompt = DEFAULT_NEGATIVE_PROMPT.to_string();
    }

    pub fn take_preview(&mut self) -> Option<Preview> {
        self.preview.take()
    }
}

/// Run one job: optional enhancement, then generation. Enhancement always
/// finishes before the generation request is sent.
pub async fn run_generation<S: ArtService>(service: &S, job: GenerationJob) -> Result<Preview, ApiError> {
    let prompt = if job.enhance {
        enhance_or_original(service, &job.prompt).await
    } else {
        job.prompt.clone()
    };

    let request = GenerateRequest::new(prompt.clone(), job.negative_prompt.clone(), job.settings);
    let response = service.generate_image(&request).await?;

    decode_image(&response.image).map_err(|e| ApiError::InvalidImage(e.to_string()))?;
    info!(prompt = %prompt, "Image generated");

    Ok(Preview {
        image: response.image,
        prompt,
        negative_prompt: request.negative_prompt,
        settings: job.settings,
        reported: response.settings,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::Gallery;
    use std::sync::Mutex;

    const PNG_B64: &str = "iVBORw0KGgo=";

    /// Records every call; fails on demand.
    #[derive(Default)]
    struct FakeService {
        fail_enhance: bool,
        reject_generate: bool,
        garbled_image: bool,
        calls: Mutex<Vec<String>>,
        requests: Mutex<Vec<GenerateRequest>>,
    }

    impl ArtService for FakeService {
        async fn enhance_prompt(&self, prompt: &str) -> Result<String, ApiError> {
            self.calls.lock().unwrap().push("enhance".into());
            if self.fail_enhance {
                Err(ApiError::Transport("connection refused".into()))
            } else {
                Ok(format!("{}, masterpiece", prompt))
            }
        }

        async fn generate_image(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
            self.calls.lock().unwrap().push("generate".into());
            self.requests.lock().unwrap().push(request.clone());
            if self.reject_generate {
                return Err(ApiError::Rejected { status: 500, message: "CUDA out of memory".into() });
            }
            let image = if self.garbled_image { "not base64 at all!" } else { PNG_B64 };
            Ok(GenerateResponse { image: image.into(), settings: None })
        }
    }

    fn form_with(prompt: &str, enhance: bool) -> GeneratorForm {
        let mut form = GeneratorForm::new(GenerationSettings::default(), enhance);
        form.prompt = prompt.to_string();
        form
    }

    #[tokio::test]
    async fn prompt_is_sent_verbatim_without_enhancement() {
        let service = FakeService::default();
        let mut form = form_with("A lighthouse in a storm", false);

        let job = form.submit().unwrap();
        let preview = run_generation(&service, job).await.unwrap();

        let requests = service.requests.lock().unwrap();
        assert_eq!(requests[0].prompt, "A lighthouse in a storm");
        assert_eq!(preview.prompt, "A lighthouse in a storm");
        assert_eq!(*service.calls.lock().unwrap(), vec!["generate".to_string()]);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_kept_in_sent_prompt() {
        let service = FakeService::default();
        let mut form = form_with("  a red fox\n", false);

        let preview = run_generation(&service, form.submit().unwrap()).await.unwrap();

        assert_eq!(service.requests.lock().unwrap()[0].prompt, "  a red fox\n");
        assert_eq!(preview.prompt, form.prompt);
    }

    #[tokio::test]
    async fn enhancement_runs_before_generation() {
        let service = FakeService::default();
        let mut form = form_with("a cat", true);

        let preview = run_generation(&service, form.submit().unwrap()).await.unwrap();

        assert_eq!(*service.calls.lock().unwrap(), vec!["enhance".to_string(), "generate".to_string()]);
        assert_eq!(preview.prompt, "a cat, masterpiece");
    }

    #[tokio::test]
    async fn enhancement_failure_still_generates_with_original_prompt() {
        let service = FakeService { fail_enhance: true, ..Default::default() };
        let mut form = form_with("a cat", true);

        let preview = run_generation(&service, form.submit().unwrap()).await.unwrap();

        assert_eq!(service.requests.lock().unwrap()[0].prompt, "a cat");
        assert_eq!(preview.prompt, "a cat");
    }

    #[test]
    fn empty_prompt_is_rejected_without_loading() {
        let mut form = form_with("   ", false);
        assert_eq!(form.submit(), Err(SubmitError::EmptyPrompt));
        assert!(!form.is_loading());
        assert!(form.validation_message.is_some());
    }

    #[test]
    fn second_submit_while_loading_is_refused() {
        let mut form = form_with("a cat", false);
        form.submit().unwrap();
        assert!(form.is_loading());
        assert_eq!(form.submit(), Err(SubmitError::InFlight));
    }

    #[tokio::test]
    async fn rejected_generation_raises_alert_and_clears_loading() {
        let service = FakeService { reject_generate: true, ..Default::default() };
        let mut form = form_with("a cat", false);

        let job = form.submit().unwrap();
        let result = run_generation(&service, job).await;
        form.complete(result);

        assert!(!form.is_loading());
        assert!(form.preview.is_none());
        assert!(form.alert.as_deref().unwrap().contains("CUDA out of memory"));
    }

    #[tokio::test]
    async fn undecodable_image_raises_alert_and_clears_loading() {
        let service = FakeService { garbled_image: true, ..Default::default() };
        let mut form = form_with("a cat", false);

        let result = run_generation(&service, form.submit().unwrap()).await;
        assert!(matches!(result, Err(ApiError::InvalidImage(_))));

        form.complete(result);
        assert!(!form.is_loading());
        assert!(form.preview.is_none());
        assert!(form.alert.as_deref().unwrap().starts_with("Error generating art:"));
    }

    #[test]
    fn seed_text_parsing() {
        assert_eq!(parse_seed(""), Ok(None));
        assert_eq!(parse_seed(" 1234 "), Ok(Some(1234)));
        assert_eq!(parse_seed("random"), Err(SubmitError::InvalidSeed));
        assert_eq!(parse_seed("-5"), Err(SubmitError::InvalidSeed));
    }

    #[test]
    fn invalid_seed_blocks_submit_with_message() {
        let mut form = form_with("a cat", false);
        form.seed_text = "abc".into();

        assert_eq!(form.submit(), Err(SubmitError::InvalidSeed));
        assert!(!form.is_loading());
        assert!(form.seed_message.is_some());

        form.seed_text = "42".into();
        let job = form.submit().unwrap();
        assert_eq!(job.settings.seed, Some(42));
        assert!(form.seed_message.is_none());
    }

    #[test]
    fn cleared_seed_field_means_random() {
        let mut form = GeneratorForm::new(GenerationSettings { seed: Some(7), ..Default::default() }, false);
        assert_eq!(form.seed_text, "7");
        form.prompt = "a cat".into();
        form.seed_text.clear();
        assert_eq!(form.submit().unwrap().settings.seed, None);
    }

    #[tokio::test]
    async fn successful_generation_can_be_added_to_gallery() {
        let service = FakeService::default();
        let mut form = form_with("a cat", false);
        form.settings = GenerationSettings {
            steps: 50,
            guidance_scale: 7.5,
            width: 512,
            height: 512,
            seed: None,
        };

        let started = Utc::now();
        let job = form.submit().unwrap();
        let result = run_generation(&service, job).await;
        form.complete(result);
        let finished = Utc::now();

        let preview = form.take_preview().unwrap();
        assert_eq!(preview.image, PNG_B64);

        let mut gallery = Gallery::new();
        gallery.append(preview.to_artwork());
        assert_eq!(gallery.len(), 1);
        let art = &gallery.artworks()[0];
        assert_eq!(art.settings, form.settings);
        assert!(art.timestamp >= started && art.timestamp <= finished);
        assert!(service.requests.lock().unwrap()[0].seed.is_none());
    }

    #[test]
    fn negative_prompt_is_omitted_when_blank() {
        let mut form = form_with("a cat", false);
        form.negative_prompt = "  ".into();
        assert_eq!(form.submit().unwrap().negative_prompt, None);
    }

    #[test]
    fn template_overwrites_prompt() {
        let mut form = form_with("my unsaved edit", false);
        form.apply_template("A castle");
        assert_eq!(form.prompt, "A castle");
    }

    #[test]
    fn keywords_are_appended_once() {
        let mut form = form_with("a cat,", false);
        form.append_keyword("digital art");
        form.append_keyword("digital art");
        assert_eq!(form.prompt, "a cat, digital art");

        let mut empty = form_with("", false);
        empty.append_keyword("masterpiece");
        assert_eq!(empty.prompt, "masterpiece");
    }
}
