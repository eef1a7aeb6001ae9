//! Generation requests: spawn on the runtime, poll the result each frame

use super::App;
use crate::api::HttpClient;
use crate::generator::{run_generation, SubmitError};
use eframe::egui;
use tracing::{info, warn};

impl App {
    pub fn start_generation(&mut self, ctx: &egui::Context) {
        let job = match self.form.submit() {
            Ok(job) => job,
            Err(SubmitError::EmptyPrompt) => return,
            Err(SubmitError::InvalidSeed) => {
                // The message sits next to the seed field
                self.show_advanced = true;
                return;
            }
            Err(SubmitError::InFlight) => {
                warn!("Generate pressed while a request is in flight");
                return;
            }
        };

        info!(
            enhance = job.enhance,
            steps = job.settings.steps,
            guidance = job.settings.guidance_scale,
            width = job.settings.width,
            height = job.settings.height,
            "Starting generation"
        );

        let client = HttpClient::new(&self.api_url);
        let slot = self.generation_result.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = run_generation(&client, job).await;
            if let Ok(mut s) = slot.lock() {
                *s = Some(result);
            }
            ctx.request_repaint();
        });
    }

    /// Hand a finished background result to the form.
    pub fn poll_generation(&mut self, ctx: &egui::Context) {
        if !self.form.is_loading() {
            return;
        }
        let finished = match self.generation_result.lock() {
            Ok(mut s) => s.take(),
            Err(_) => None,
        };
        let Some(result) = finished else {
            // Keep the spinner animating
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
            return;
        };

        self.form.complete(result);
        self.preview_texture = self
            .form
            .preview
            .as_ref()
            .and_then(|p| Self::texture_from_base64(ctx, "preview", &p.image));
    }

    pub fn add_preview_to_gallery(&mut self) {
        let Some(preview) = self.form.take_preview() else {
            return;
        };
        let id = self.gallery.append(preview.to_artwork());
        if let Some(tex) = self.preview_texture.take() {
            self.textures.insert(id, Some(tex));
        }
        info!(id = id.0, total = self.gallery.len(), "Preview added to gallery");
        self.show_toast("Added to gallery");
    }

    pub fn discard_preview(&mut self) {
        self.form.preview = None;
        self.preview_texture = None;
    }
}
