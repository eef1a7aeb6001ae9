//! Studio look: palette, sizes and widget helpers shared by every page

use egui::Color32;

// =============================================================================
// PALETTE - Surfaces (ink tones, cool violet cast)
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0c, 0x0b, 0x12);
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x16, 0x14, 0x20);
pub const BG_INPUT: Color32 = Color32::from_rgb(0x11, 0x10, 0x19);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x23, 0x20, 0x31);
pub const BG_HOVER: Color32 = Color32::from_rgb(0x1f, 0x1a, 0x33);
const BG_MODAL: Color32 = Color32::from_rgb(0x13, 0x11, 0x1c);
const BG_PRESSED: Color32 = Color32::from_rgb(0x2b, 0x26, 0x3d);

// =============================================================================
// PALETTE - Accent (violet paint)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xa7, 0x8b, 0xfa);
pub const ACCENT_DARK_TEXT: Color32 = Color32::from_rgb(0x1e, 0x10, 0x4a);

// =============================================================================
// PALETTE - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xf5, 0xf3, 0xff);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xdd, 0xd8, 0xec);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa2, 0x9c, 0xb8);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x6f, 0x69, 0x85);

// =============================================================================
// PALETTE - Lines
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x26, 0x23, 0x35);
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3d, 0x38, 0x52);

// =============================================================================
// PALETTE - Service / result states
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xfb, 0x71, 0x85);

// =============================================================================
// PALETTE - Keyword and template chips
// =============================================================================
pub const CHIP_SELECTED: Color32 = Color32::from_rgb(0x4c, 0x1d, 0x95);
pub const CHIP_UNSELECTED: Color32 = BG_SURFACE;

// =============================================================================
// PALETTE - Buttons
// =============================================================================
const BTN_DEFAULT: Color32 = Color32::from_rgb(0x33, 0x2e, 0x47);
const BTN_DANGER: Color32 = Color32::from_rgb(0xbe, 0x12, 0x3c);
const BTN_DISABLED: Color32 = BG_SURFACE;

// =============================================================================
// TYPE SCALE
// =============================================================================
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// LAYOUT
// =============================================================================
pub const SIDEBAR_WIDTH: f32 = 220.0;
pub const BUTTON_HEIGHT: f32 = 28.0;
pub const BUTTON_HEIGHT_LARGE: f32 = 40.0;
pub const NAV_ITEM_HEIGHT: f32 = 34.0;

/// Gallery thumbnails are square; the caption strip sits below.
pub const CARD_SIZE: f32 = 200.0;
pub const CARD_CAPTION_HEIGHT: f32 = 34.0;
/// Largest edge a full image is drawn at (preview and detail window).
pub const PREVIEW_MAX_SIZE: f32 = 512.0;

pub const RADIUS_DEFAULT: f32 = 5.0;
pub const RADIUS_MEDIUM: f32 = 7.0;
pub const RADIUS_LARGE: f32 = 10.0;

pub const STROKE_DEFAULT: f32 = 1.0;
const STROKE_FOCUS: f32 = 1.5;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 18.0;

// =============================================================================
// GLOBAL VISUALS
// =============================================================================

fn widget(bg: Color32, weak: Color32, border: Option<Color32>, fg: egui::Stroke, expansion: f32) -> egui::style::WidgetVisuals {
    egui::style::WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: weak,
        bg_stroke: border.map_or(egui::Stroke::NONE, |c| egui::Stroke::new(STROKE_DEFAULT, c)),
        fg_stroke: fg,
        corner_radius: RADIUS_DEFAULT.into(),
        expansion,
    }
}

pub fn apply_visuals(ctx: &egui::Context) {
    let text = |c: Color32| egui::Stroke::new(STROKE_DEFAULT, c);

    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_MODAL,
        extreme_bg_color: BG_INPUT,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        selection: egui::style::Selection {
            bg_fill: CHIP_SELECTED,
            stroke: egui::Stroke::new(STROKE_DEFAULT, ACCENT),
        },
        widgets: egui::style::Widgets {
            noninteractive: widget(BG_ELEVATED, BG_SURFACE, Some(BORDER_SUBTLE), text(TEXT_PRIMARY), 0.0),
            inactive: widget(BG_SURFACE, BG_ELEVATED, Some(BORDER_SUBTLE), text(TEXT_SECONDARY), 0.0),
            hovered: widget(BG_HOVER, BTN_DEFAULT, None, egui::Stroke::new(STROKE_FOCUS, TEXT_PRIMARY), 0.0),
            active: widget(BG_PRESSED, BG_PRESSED, None, text(TEXT_PRIMARY), -1.0),
            open: widget(BG_SURFACE, BG_ELEVATED, Some(BORDER_DEFAULT), text(TEXT_PRIMARY), 0.0),
        },
        // Filled track on the steps and guidance sliders
        slider_trailing_fill: true,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT),
        window_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        menu_corner_radius: egui::CornerRadius::same(RADIUS_MEDIUM as u8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(SPACING_LG, 6.0);
        style.spacing.slider_width = 220.0;
        style.spacing.combo_width = 140.0;
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    });
}

// =============================================================================
// FRAMES
// =============================================================================

fn bordered(fill: Color32, radius: f32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(radius)
}

/// Preview panel and about card
pub fn card_frame() -> egui::Frame {
    bordered(BG_ELEVATED, RADIUS_LARGE).inner_margin(egui::Margin::same(SPACING_XL as i8))
}

pub fn modal_frame() -> egui::Frame {
    bordered(BG_MODAL, RADIUS_LARGE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .inner_margin(SPACING_XL)
}

pub fn section_frame() -> egui::Frame {
    bordered(BG_INPUT, RADIUS_MEDIUM).inner_margin(egui::Margin::same(SPACING_LG as i8))
}

pub fn input_frame() -> egui::Frame {
    bordered(BG_INPUT, RADIUS_DEFAULT).inner_margin(egui::Margin::symmetric(8, 6))
}

// =============================================================================
// BUTTONS
// =============================================================================

fn filled_button(text: impl Into<String>, fill: Color32, color: Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(color))
        .fill(fill)
        .corner_radius(RADIUS_DEFAULT)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
}

pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    filled_button(text, BTN_DEFAULT, TEXT_SECONDARY)
}

/// Primary action (Generate, Add to Gallery, Export)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    filled_button(text, ACCENT, ACCENT_DARK_TEXT)
}

pub fn button_danger(text: impl Into<String>) -> egui::Button<'static> {
    filled_button(text, BTN_DANGER, TEXT_PRIMARY)
}

/// Stand-in for a primary button while its action is unavailable
pub fn button_disabled(text: impl Into<String>) -> egui::Button<'static> {
    filled_button(text, BTN_DISABLED, TEXT_DIM).sense(egui::Sense::hover())
}

/// Full-width checkbox row drawn in the accent colour. Returns true if toggled.
pub fn settings_checkbox(ui: &mut egui::Ui, checked: bool, label: &str, enabled: bool) -> bool {
    let (row, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 22.0), egui::Sense::click());
    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    let painter = ui.painter();
    let box_rect = egui::Rect::from_center_size(egui::pos2(row.min.x + 8.0, row.center().y), egui::vec2(16.0, 16.0));
    let border = if checked { ACCENT } else { BORDER_DEFAULT };
    painter.rect_stroke(box_rect, 4.0, egui::Stroke::new(STROKE_FOCUS, border), egui::StrokeKind::Inside);
    if checked {
        painter.text(
            box_rect.center(),
            egui::Align2::CENTER_CENTER,
            egui_phosphor::regular::CHECK,
            egui::FontId::proportional(12.0),
            ACCENT,
        );
    }
    painter.text(
        egui::pos2(box_rect.max.x + SPACING_MD, row.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        egui::FontId::proportional(FONT_BODY),
        if enabled { TEXT_PRIMARY } else { TEXT_DIM },
    );

    enabled && response.clicked()
}

/// Fill and rect for a hand-painted clickable: brighter on hover, pressed shrinks slightly.
pub fn button_visual(response: &egui::Response, base_fill: Color32, rect: egui::Rect) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (lighten(base_fill, 0.05), rect.shrink(1.0))
    } else if response.hovered() {
        (lighten(base_fill, 0.10), rect)
    } else {
        (base_fill, rect)
    }
}

fn lighten(c: Color32, amount: f32) -> Color32 {
    let mix = |v: u8| (v as f32 + (255.0 - v as f32) * amount) as u8;
    Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}
