//! Decoding artwork payloads into egui textures

use super::App;
use crate::gallery::{decode_image, ArtworkId};
use eframe::egui;
use tracing::warn;

impl App {
    pub fn texture_from_base64(
        ctx: &egui::Context,
        name: &str,
        encoded: &str,
    ) -> Option<egui::TextureHandle> {
        let bytes = match decode_image(encoded) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, name, "Failed to decode image payload");
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                Some(ctx.load_texture(
                    name,
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!(error = %e, name, "Failed to decode PNG");
                None
            }
        }
    }

    /// Texture for a gallery artwork, decoded once and cached by id.
    pub fn artwork_texture(&mut self, ctx: &egui::Context, id: ArtworkId) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.get(&id) {
            return cached.clone();
        }
        let artwork = self.gallery.get(id)?;
        let texture = Self::texture_from_base64(ctx, &format!("artwork_{}", id.0), &artwork.image);
        self.textures.insert(id, texture.clone());
        texture
    }

    pub fn forget_texture(&mut self, id: ArtworkId) {
        self.textures.remove(&id);
    }
}

/// Fit an image of `size` inside `max`, never upscaling.
pub(crate) fn fit_size(size: egui::Vec2, max: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
    size * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_size_scales_down_only() {
        assert_eq!(fit_size(egui::vec2(1024.0, 512.0), egui::vec2(512.0, 512.0)), egui::vec2(512.0, 256.0));
        assert_eq!(fit_size(egui::vec2(100.0, 100.0), egui::vec2(512.0, 512.0)), egui::vec2(100.0, 100.0));
        assert_eq!(fit_size(egui::vec2(0.0, 10.0), egui::vec2(5.0, 5.0)), egui::Vec2::ZERO);
    }
}
