//! Modal dialogs (alert, settings, artwork detail) and toast notifications

use super::textures::fit_size;
use super::App;
use crate::api::normalize_base_url;
use crate::constants::APP_VERSION;
use crate::gallery::ArtworkId;
use crate::theme;
use crate::ui::components::{close_button, section_label, status_indicator};
use crate::utils::format_timestamp;
use eframe::egui;

impl App {
    /// Blocking alert for failed generations and exports
    pub(crate) fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.form.alert.clone() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("alert_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(360.0);
            ui.set_max_width(360.0);
            ui.vertical_centered(|ui| {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                        .size(36.0)
                        .color(theme::STATUS_ERROR),
                );
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Something went wrong").size(16.0).strong());
                ui.add_space(6.0);
                ui.label(egui::RichText::new(&message).color(theme::TEXT_MUTED));
                ui.add_space(16.0);
                if ui.add(theme::button(format!("{}  OK", egui_phosphor::regular::CHECK))).clicked() {
                    self.form.alert = None;
                }
            });
        });

        if modal_response.should_close() {
            self.form.alert = None;
        }
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(340.0);

                ui.horizontal(|ui| {
                    ui.add(egui::Label::new(egui::RichText::new("Settings").size(16.0).strong()).selectable(false));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if close_button(ui) {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // Service
                ui.add(egui::Label::new(egui::RichText::new("Art Service").size(13.0).color(theme::ACCENT)).selectable(false));
                ui.add_space(2.0);
                let url_submitted = theme::input_frame()
                    .show(ui, |ui| {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.api_url_edit)
                                .hint_text("http://127.0.0.1:5000")
                                .frame(false)
                                .desired_width(ui.available_width()),
                        );
                        resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    })
                    .inner;
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let apply = ui.add(theme::button("Apply")).clicked();
                    if apply || url_submitted {
                        self.api_url = normalize_base_url(&self.api_url_edit);
                        self.api_url_edit = self.api_url.clone();
                        self.save_settings();
                        self.check_service_health(ui.ctx());
                    }
                    if ui.add(theme::button(format!("{}  Test", egui_phosphor::regular::PLUGS))).clicked() {
                        self.check_service_health(ui.ctx());
                    }
                });
                ui.add_space(4.0);
                status_indicator(ui, &self.service_status);
                if let crate::types::ServiceStatus::Online(health) = &self.service_status {
                    if !health.model.is_empty() {
                        ui.label(egui::RichText::new(format!("Model: {}", health.model)).size(12.0).color(theme::TEXT_DIM));
                    }
                }
                if let crate::types::ServiceStatus::Offline(err) = &self.service_status {
                    ui.label(egui::RichText::new(err).size(12.0).color(theme::TEXT_DIM));
                }

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // Generator defaults
                ui.add(egui::Label::new(egui::RichText::new("Generator").size(13.0).color(theme::ACCENT)).selectable(false));
                ui.add_space(2.0);
                if theme::settings_checkbox(ui, self.form.enhance, "Enhance prompts by default", true) {
                    self.form.enhance = !self.form.enhance;
                    self.save_settings();
                }
                if theme::settings_checkbox(ui, self.show_advanced, "Show advanced settings", true) {
                    self.show_advanced = !self.show_advanced;
                    self.save_settings();
                }

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // Export
                ui.add(egui::Label::new(egui::RichText::new("Export Folder").size(13.0).color(theme::ACCENT)).selectable(false));
                ui.add_space(2.0);
                ui.label(egui::RichText::new(self.export_path.to_string_lossy()).size(12.0).color(theme::TEXT_MUTED));
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.add(theme::button(format!("{}  Change", egui_phosphor::regular::FOLDER_OPEN))).clicked() {
                        if let Some(path) = rfd::FileDialog::new().set_directory(&self.export_path).pick_folder() {
                            self.export_path = path;
                            self.save_settings();
                        }
                    }
                    if ui.add(theme::button("Open Folder")).clicked() {
                        self.open_export_folder();
                    }
                });

                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(format!("v{}", APP_VERSION)).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }

    /// Detail window for the selected gallery artwork
    pub(crate) fn render_artwork_detail(&mut self, ctx: &egui::Context) {
        let Some(id) = self.selected_artwork else {
            return;
        };
        let Some(artwork) = self.gallery.get(id).cloned() else {
            self.selected_artwork = None;
            return;
        };
        let texture = self.artwork_texture(ctx, id);
        let position = self.gallery.position(id).map(|p| p + 1).unwrap_or(0);

        let mut close = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        let mut remove: Option<ArtworkId> = None;
        let mut download: Option<ArtworkId> = None;

        let modal_response = egui::Modal::new(egui::Id::new("artwork_detail"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_max_width(560.0);
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("Artwork #{} of {}", position, self.gallery.len()))
                                .size(16.0)
                                .strong(),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if close_button(ui) {
                            close = true;
                        }
                    });
                });
                ui.add_space(theme::SPACING_SM);

                if let Some(tex) = &texture {
                    let size = fit_size(tex.size_vec2(), egui::vec2(theme::PREVIEW_MAX_SIZE, theme::PREVIEW_MAX_SIZE));
                    ui.vertical_centered(|ui| {
                        ui.image(egui::load::SizedTexture::new(tex.id(), size));
                    });
                } else {
                    ui.label(egui::RichText::new("Image could not be decoded").color(theme::STATUS_ERROR));
                }
                ui.add_space(theme::SPACING_MD);

                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    section_label(ui, "PROMPT");
                    ui.label(&artwork.prompt);
                    if let Some(negative) = &artwork.negative_prompt {
                        ui.add_space(4.0);
                        section_label(ui, "NEGATIVE PROMPT");
                        ui.label(egui::RichText::new(negative).color(theme::TEXT_MUTED));
                    }
                    ui.add_space(4.0);
                    section_label(ui, "SETTINGS");
                    let seed = artwork
                        .settings
                        .seed
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "random".to_string());
                    ui.label(
                        egui::RichText::new(format!(
                            "{} steps · guidance {:.1} · {} · seed {}",
                            artwork.settings.steps,
                            artwork.settings.guidance_scale,
                            artwork.settings.dimensions_label(),
                            seed
                        ))
                        .color(theme::TEXT_MUTED),
                    );
                    ui.add_space(4.0);
                    section_label(ui, "CREATED");
                    ui.label(egui::RichText::new(format_timestamp(&artwork.timestamp)).color(theme::TEXT_MUTED));
                });

                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    if ui
                        .add(theme::button_accent(format!("{}  Download PNG", egui_phosphor::regular::DOWNLOAD_SIMPLE)))
                        .clicked()
                    {
                        download = Some(id);
                    }
                    if ui.add(theme::button_danger(format!("{}  Remove", egui_phosphor::regular::TRASH))).clicked() {
                        remove = Some(id);
                    }
                });
            });

        if modal_response.should_close() || close {
            self.selected_artwork = None;
        }
        if let Some(id) = download {
            self.download_artwork(id);
        }
        if let Some(id) = remove {
            self.remove_artwork(id);
        }
    }

    /// Bottom-right toast, 3s visible then fade, paused on hover
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                let alpha = if elapsed > visible_duration {
                    ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(theme::BG_ELEVATED.gamma_multiply(0.92 * alpha))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(
                            theme::ACCENT.r(),
                            theme::ACCENT.g(),
                            theme::ACCENT.b(),
                            (100.0 * alpha) as u8,
                        ),
                    ))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&msg).color(egui::Color32::from_rgba_unmultiplied(
                            255,
                            255,
                            255,
                            (255.0 * alpha) as u8,
                        )));
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}
