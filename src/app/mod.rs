//! Studio state shared by every page, plus window and settings plumbing

mod export;
mod generation;
mod health;
mod modals;
pub mod pages;
mod textures;
mod views;

use crate::api::ApiError;
use crate::gallery::{ArtworkId, Gallery};
use crate::generator::{GeneratorForm, Preview};
use crate::settings::Settings;
use crate::theme;
use crate::types::ServiceStatus;
use eframe::egui;
use pages::Page;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Slot a background generation task writes its outcome into
pub(crate) type GenerationSlot = Arc<Mutex<Option<Result<Preview, ApiError>>>>;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) page: Page,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Generator
    pub(crate) form: GeneratorForm,
    pub(crate) generation_result: GenerationSlot,
    pub(crate) show_advanced: bool,
    pub(crate) preview_texture: Option<egui::TextureHandle>,
    // Gallery
    pub(crate) gallery: Gallery,
    pub(crate) textures: HashMap<ArtworkId, Option<egui::TextureHandle>>,
    pub(crate) selected_artwork: Option<ArtworkId>,
    pub(crate) portfolio_name: String,
    pub(crate) export_path: PathBuf,
    // Service
    pub(crate) api_url: String,
    pub(crate) api_url_edit: String,
    pub(crate) service_status: ServiceStatus,
    pub(crate) health_check_started: bool,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Settings modal
    pub(crate) show_settings: bool,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// SETUP & SHARED ACTIONS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let export_path = settings.export_path_or_default();

        Self {
            page: Page::from_route(&settings.last_route),
            logo_texture: None,
            form: GeneratorForm::new(settings.generation, settings.enhance_prompt),
            generation_result: Arc::new(Mutex::new(None)),
            show_advanced: settings.show_advanced,
            preview_texture: None,
            gallery: Gallery::new(),
            textures: HashMap::new(),
            selected_artwork: None,
            portfolio_name: settings.portfolio_name,
            export_path,
            api_url_edit: settings.api_url.clone(),
            api_url: settings.api_url,
            service_status: ServiceStatus::Unknown,
            health_check_started: false,
            runtime,
            show_settings: false,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            api_url: self.api_url.clone(),
            generation: self.form.settings,
            enhance_prompt: self.form.enhance,
            show_advanced: self.show_advanced,
            export_path: Some(self.export_path.to_string_lossy().to_string()),
            portfolio_name: self.portfolio_name.clone(),
            last_route: self.page.route().to_string(),
        };
        settings.save(&self.data_dir);
    }

    pub fn navigate(&mut self, route: &str) {
        self.page = Page::from_route(route);
        tracing::debug!(route, page = self.page.title(), "Navigated");
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}
