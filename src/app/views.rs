//! Page rendering (generator, gallery, about, not found)

use super::pages::Page;
use super::textures::fit_size;
use super::App;
use crate::constants::*;
use crate::gallery::ArtworkId;
use crate::theme;
use crate::ui::components::{chip, section_label, status_indicator};
use crate::utils::truncate_prompt;
use eframe::egui;

impl App {
    pub(crate) fn render_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.page.clone() {
            Page::Generator => self.render_generator_page(ui, ctx),
            Page::Gallery => self.render_gallery_page(ui, ctx),
            Page::About => self.render_about_page(ui, ctx),
            Page::NotFound(route) => self.render_not_found(ui, &route),
        }
    }

    // ========================================================================
    // GENERATOR
    // ========================================================================

    fn render_generator_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        page_title(ui, "Create Artwork", "Describe an image and let the model paint it.");

        // Ctrl+Enter submits from anywhere on the page
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter)) {
            self.start_generation(ctx);
        }

        ui.columns(2, |cols| {
            egui::ScrollArea::vertical()
                .id_salt("generator_form")
                .auto_shrink([false, false])
                .show(&mut cols[0], |ui| {
                    self.render_generator_form(ui, ctx);
                });
            self.render_preview_panel(&mut cols[1]);
        });
    }

    fn render_generator_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let loading = self.form.is_loading();

        // Templates
        section_label(ui, "TEMPLATES");
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
            for (label, template) in PROMPT_TEMPLATES {
                let selected = self.form.prompt == *template;
                if chip(ui, label, selected) {
                    self.form.apply_template(template);
                }
            }
        });
        ui.add_space(theme::SPACING_LG);

        // Prompt
        section_label(ui, "PROMPT");
        theme::input_frame().show(ui, |ui| {
            let resp = ui.add(
                egui::TextEdit::multiline(&mut self.form.prompt)
                    .hint_text("Describe your artwork...")
                    .frame(false)
                    .desired_rows(4)
                    .desired_width(ui.available_width()),
            );
            if resp.changed() {
                self.form.validation_message = None;
            }
        });
        if let Some(msg) = &self.form.validation_message {
            ui.label(egui::RichText::new(msg).size(12.0).color(theme::STATUS_ERROR));
        }
        ui.add_space(theme::SPACING_SM);

        // Style keywords
        for (heading, keywords) in [("QUALITY", QUALITY_KEYWORDS), ("STYLE", ARTISTIC_KEYWORDS)] {
            section_label(ui, heading);
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
                for keyword in keywords {
                    let present = self.form.prompt.to_lowercase().contains(keyword);
                    if chip(ui, keyword, present) {
                        self.form.append_keyword(keyword);
                    }
                }
            });
            ui.add_space(theme::SPACING_SM);
        }
        ui.add_space(theme::SPACING_MD);

        // Negative prompt
        ui.horizontal(|ui| {
            section_label(ui, "NEGATIVE PROMPT");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(egui::Button::new(egui::RichText::new("Use recommended").size(theme::FONT_SMALL)).frame(false))
                    .clicked()
                {
                    self.form.use_default_negative();
                }
            });
        });
        theme::input_frame().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut self.form.negative_prompt)
                    .hint_text("Things to avoid (optional)")
                    .frame(false)
                    .desired_rows(2)
                    .desired_width(ui.available_width()),
            );
        });
        ui.add_space(theme::SPACING_MD);

        if theme::settings_checkbox(ui, self.form.enhance, "Enhance prompt before generating", !loading) {
            self.form.enhance = !self.form.enhance;
        }
        ui.add_space(theme::SPACING_MD);

        // Advanced settings disclosure
        let arrow = if self.show_advanced {
            egui_phosphor::regular::CARET_DOWN
        } else {
            egui_phosphor::regular::CARET_RIGHT
        };
        if ui
            .add(
                egui::Button::new(
                    egui::RichText::new(format!("{}  Advanced settings", arrow)).color(theme::TEXT_SECONDARY),
                )
                .frame(false),
            )
            .clicked()
        {
            self.show_advanced = !self.show_advanced;
        }
        if self.show_advanced {
            self.render_advanced_settings(ui);
        }
        ui.add_space(theme::SPACING_LG);

        // Generate
        let size = egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE);
        if loading {
            ui.add_sized(size, theme::button_disabled("Generating..."));
        } else if ui
            .add_sized(size, theme::button_accent(format!("{}  Generate Art", egui_phosphor::regular::SPARKLE)))
            .clicked()
        {
            self.start_generation(ctx);
        }
    }

    fn render_advanced_settings(&mut self, ui: &mut egui::Ui) {
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            let settings = &mut self.form.settings;

            egui::Grid::new("advanced_settings")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Steps");
                    ui.add(egui::Slider::new(&mut settings.steps, STEPS_RANGE));
                    ui.end_row();

                    ui.label("Guidance");
                    ui.add(egui::Slider::new(&mut settings.guidance_scale, GUIDANCE_RANGE).step_by(0.5));
                    ui.end_row();

                    ui.label("Width");
                    dimension_combo(ui, "width_combo", &mut settings.width);
                    ui.end_row();

                    ui.label("Height");
                    dimension_combo(ui, "height_combo", &mut settings.height);
                    ui.end_row();

                    ui.label("Seed");
                    ui.horizontal(|ui| {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.form.seed_text)
                                .hint_text("random")
                                .desired_width(120.0),
                        );
                        if resp.changed() {
                            self.form.seed_message = None;
                        }
                        if ui
                            .add(egui::Button::new(egui_phosphor::regular::SHUFFLE).frame(false))
                            .on_hover_text("Let the service pick a seed")
                            .clicked()
                        {
                            self.form.seed_text.clear();
                            self.form.seed_message = None;
                        }
                    });
                    ui.end_row();

                    if let Some(msg) = &self.form.seed_message {
                        ui.label("");
                        ui.label(egui::RichText::new(msg).size(12.0).color(theme::STATUS_ERROR));
                        ui.end_row();
                    }
                });

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new("More steps means better quality but slower generation.")
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        });
    }

    fn render_preview_panel(&mut self, ui: &mut egui::Ui) {
        let mut add = false;
        let mut discard = false;

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(320.0);

            if self.form.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.add(egui::Spinner::new().size(32.0).color(theme::ACCENT));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Generating... this can take a minute").color(theme::TEXT_MUTED));
                });
                return;
            }

            let Some(preview) = &self.form.preview else {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.label(egui::RichText::new(egui_phosphor::regular::IMAGE).size(40.0).color(theme::TEXT_DIM));
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new("Your artwork will appear here").color(theme::TEXT_DIM));
                });
                return;
            };

            if let Some(tex) = &self.preview_texture {
                let max = egui::vec2(ui.available_width(), theme::PREVIEW_MAX_SIZE);
                let size = fit_size(tex.size_vec2(), max);
                ui.vertical_centered(|ui| {
                    ui.image(egui::load::SizedTexture::new(tex.id(), size));
                });
            }
            ui.add_space(theme::SPACING_MD);

            if preview.prompt != self.form.prompt {
                section_label(ui, "ENHANCED PROMPT");
                ui.label(egui::RichText::new(&preview.prompt).color(theme::TEXT_MUTED));
                ui.add_space(4.0);
            }

            let reported = preview.reported.as_ref();
            let steps = reported.and_then(|r| r.steps).unwrap_or(preview.settings.steps);
            let guidance = reported
                .and_then(|r| r.guidance_scale)
                .unwrap_or(preview.settings.guidance_scale);
            let dims = reported
                .and_then(|r| r.dimensions.clone())
                .unwrap_or_else(|| preview.settings.dimensions_label());
            ui.label(
                egui::RichText::new(format!("{} steps · guidance {:.1} · {}", steps, guidance, dims))
                    .size(12.0)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(theme::SPACING_MD);

            ui.horizontal(|ui| {
                if ui
                    .add(theme::button_accent(format!("{}  Add to Gallery", egui_phosphor::regular::PLUS)))
                    .clicked()
                {
                    add = true;
                }
                if ui.add(theme::button("Discard")).clicked() {
                    discard = true;
                }
            });
        });

        if add {
            self.add_preview_to_gallery();
        } else if discard {
            self.discard_preview();
        }
    }

    // ========================================================================
    // GALLERY
    // ========================================================================

    fn render_gallery_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        page_title(
            ui,
            "Your Art Gallery",
            &format!("{} artworks this session", self.gallery.len()),
        );

        ui.horizontal(|ui| {
            section_label(ui, "PORTFOLIO NAME");
            theme::input_frame().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.portfolio_name)
                        .frame(false)
                        .desired_width(220.0),
                );
            });
            if ui
                .add(theme::button_accent(format!("{}  Export Portfolio", egui_phosphor::regular::EXPORT)))
                .clicked()
            {
                self.export_portfolio();
            }
        });
        ui.add_space(theme::SPACING_LG);

        if self.gallery.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label(egui::RichText::new(egui_phosphor::regular::IMAGES).size(48.0).color(theme::TEXT_DIM));
                ui.add_space(8.0);
                ui.label(egui::RichText::new("No artworks yet").size(theme::FONT_TITLE));
                ui.add_space(8.0);
                if ui.add(theme::button("Create your first artwork")).clicked() {
                    self.navigate(Page::Generator.route());
                }
            });
            return;
        }

        let entries: Vec<(ArtworkId, String)> = self
            .gallery
            .artworks()
            .iter()
            .map(|a| (a.id, truncate_prompt(&a.prompt, 28)))
            .collect();
        let mut clicked: Option<ArtworkId> = None;

        egui::ScrollArea::vertical()
            .id_salt("gallery_grid")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_LG, theme::SPACING_LG);
                    for (id, caption) in &entries {
                        let texture = self.artwork_texture(ctx, *id);
                        if gallery_card(ui, texture.as_ref(), caption).clicked() {
                            clicked = Some(*id);
                        }
                    }
                });
            });

        if clicked.is_some() {
            self.selected_artwork = clicked;
        }
    }

    // ========================================================================
    // STATIC PAGES
    // ========================================================================

    fn render_about_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        page_title(ui, "About", "AI art portfolio powered by Stable Diffusion.");

        theme::card_frame().show(ui, |ui| {
            ui.set_max_width(560.0);
            ui.label(
                "AI Art Studio sends your prompts to a local image generation service and keeps \
                 the results in a gallery for this session. Export the gallery as a portfolio \
                 file or save individual images as PNG before closing the app.",
            );
            ui.add_space(theme::SPACING_LG);
            section_label(ui, "SERVICE");
            ui.label(egui::RichText::new(&self.api_url).color(theme::TEXT_MUTED));
            status_indicator(ui, &self.service_status);
            ui.add_space(theme::SPACING_SM);
            if ui.add(theme::button(format!("{}  Check connection", egui_phosphor::regular::ARROW_CLOCKWISE))).clicked() {
                self.check_service_health(ctx);
            }
            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new(format!("{} v{}", APP_NAME, APP_VERSION))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        });
    }

    fn render_not_found(&mut self, ui: &mut egui::Ui, route: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(egui::RichText::new("404").size(48.0).strong().color(theme::ACCENT));
            ui.label(egui::RichText::new(format!("Nothing lives at {}", route)).color(theme::TEXT_MUTED));
            ui.add_space(theme::SPACING_LG);
            if ui.add(theme::button("Back to Create")).clicked() {
                self.navigate(Page::Generator.route());
            }
        });
    }
}

fn page_title(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.add_space(theme::SPACING_XL);
    ui.add(egui::Label::new(egui::RichText::new(title).size(22.0).strong()).selectable(false));
    ui.add(
        egui::Label::new(egui::RichText::new(subtitle).size(theme::FONT_LABEL).color(theme::TEXT_DIM))
            .selectable(false),
    );
    ui.add_space(theme::SPACING_LG);
}

fn dimension_combo(ui: &mut egui::Ui, id: &str, value: &mut u32) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(format!("{} px", value))
        .show_ui(ui, |ui| {
            for dim in DIMENSION_RANGE.step_by(DIMENSION_STEP as usize) {
                ui.selectable_value(value, dim, format!("{} px", dim));
            }
        });
}

/// Thumbnail card with a prompt caption
fn gallery_card(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>, caption: &str) -> egui::Response {
    let size = egui::vec2(theme::CARD_SIZE, theme::CARD_SIZE + theme::CARD_CAPTION_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

    let image_rect = egui::Rect::from_min_size(rect.min, egui::vec2(theme::CARD_SIZE, theme::CARD_SIZE));
    match texture {
        Some(tex) => {
            let tex_size = tex.size_vec2();
            // Cover the square: crop the longer side via UVs
            let (u, v) = if tex_size.x > tex_size.y {
                let crop = (1.0 - tex_size.y / tex_size.x) / 2.0;
                ((crop, 1.0 - crop), (0.0, 1.0))
            } else {
                let crop = (1.0 - tex_size.x / tex_size.y) / 2.0;
                ((0.0, 1.0), (crop, 1.0 - crop))
            };
            let uv = egui::Rect::from_min_max(egui::pos2(u.0, v.0), egui::pos2(u.1, v.1));
            painter.image(tex.id(), image_rect, uv, egui::Color32::WHITE);
        }
        None => {
            painter.text(
                image_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::IMAGE_BROKEN,
                egui::FontId::proportional(32.0),
                theme::TEXT_DIM,
            );
        }
    }

    painter.text(
        egui::pos2(rect.left() + 10.0, image_rect.bottom() + theme::CARD_CAPTION_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        caption,
        egui::FontId::proportional(12.0),
        theme::TEXT_SECONDARY,
    );

    let stroke_color = if response.hovered() { theme::ACCENT } else { theme::BORDER_SUBTLE };
    painter.rect_stroke(
        rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_DEFAULT, stroke_color),
        egui::StrokeKind::Inside,
    );
    response
}
