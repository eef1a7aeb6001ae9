//! Utility functions

use crate::constants::APP_NAME;
use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;

// Palette mark with wordmark bar, sidebar logo
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 240 160"><path fill="#fff" stroke="#09090b" stroke-width="1" d="M120 8C64 8 24 42 24 84c0 36 30 60 62 60 14 0 20-8 20-18 0-12-10-14-10-26 0-10 8-18 20-18h24c32 0 52-20 52-42C192 22 160 8 120 8z"/><circle cx="72" cy="76" r="11" fill="#2dd4bf"/><circle cx="98" cy="46" r="11" fill="#f472b6"/><circle cx="138" cy="42" r="11" fill="#fbbf24"/><circle cx="166" cy="62" r="11" fill="#38bdf8"/><path fill="#2dd4bf" stroke="#09090b" stroke-width="1" d="M226 104l-56 52c-4 4-12 4-16 0s-4-12 0-16l56-52c4-4 12-4 16 0s4 12 0 16z"/></svg>"##;

// Square viewBox without the bar, window/taskbar icon
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 240 240"><g transform="translate(0,40)"><path fill="#fff" d="M120 8C64 8 24 42 24 84c0 36 30 60 62 60 14 0 20-8 20-18 0-12-10-14-10-26 0-10 8-18 20-18h24c32 0 52-20 52-42C192 22 160 8 120 8z"/><circle cx="72" cy="76" r="11" fill="#2dd4bf"/><circle cx="98" cy="46" r="11" fill="#f472b6"/><circle cx="138" cy="42" r="11" fill="#fbbf24"/><circle cx="166" cy="62" r="11" fill="#38bdf8"/><path fill="#2dd4bf" d="M226 104l-56 52c-4 4-12 4-16 0s-4-12 0-16l56-52c4-4 12-4 16 0s4 12 0 16z"/></g></svg>"##;

/// Rasterize the logo SVG at the given width, preserving aspect ratio.
pub fn rasterize_logo(width: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).ok()?;
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), width, height))
}

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_logo_square(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Local wall-clock rendering of a creation timestamp
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten a prompt for card captions, cutting on a char boundary
pub fn truncate_prompt(prompt: &str, max_chars: usize) -> String {
    if prompt.chars().count() <= max_chars {
        prompt.to_string()
    } else {
        let cut: String = prompt.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_prompt("short", 10), "short");
        assert_eq!(truncate_prompt("a very long prompt", 8), "a very…");
        assert_eq!(truncate_prompt("ééééé", 3), "éé…");
    }

    #[test]
    fn logo_rasterizes_with_aspect_ratio() {
        let (pixels, w, h) = rasterize_logo(240).unwrap();
        assert_eq!((w, h), (240, 160));
        assert_eq!(pixels.len(), (w * h * 4) as usize);

        let (_, w, h) = rasterize_logo_square(64).unwrap();
        assert_eq!((w, h), (64, 64));
    }
}
