//! Small hand-painted widgets: labels, chips, nav rows, service status

use crate::theme;
use crate::types::ServiceStatus;
use eframe::egui;

/// Small accent-colored heading used above form sections
pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(egui::RichText::new(text).size(theme::FONT_SMALL).color(theme::TEXT_DIM))
            .selectable(false),
    );
}

/// Rounded pill button for templates and keywords. Returns true if clicked.
pub fn chip(ui: &mut egui::Ui, label: &str, selected: bool) -> bool {
    let font = egui::FontId::proportional(12.0);
    let text_w = ui.fonts(|f| {
        f.layout_no_wrap(label.to_string(), font.clone(), theme::TEXT_PRIMARY)
            .rect
            .width()
    });
    let (rect, response) = ui.allocate_exact_size(egui::vec2(text_w + 20.0, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if ui.is_rect_visible(rect) {
        let base = if selected { theme::CHIP_SELECTED } else { theme::CHIP_UNSELECTED };
        let (fill, draw_rect) = theme::button_visual(&response, base, rect);
        ui.painter().rect_filled(draw_rect, 12.0, fill);
        ui.painter().text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            font,
            if selected { theme::TEXT_PRIMARY } else { theme::TEXT_SECONDARY },
        );
    }
    response.clicked()
}

/// Sidebar navigation entry. Returns true if clicked.
pub fn nav_item(ui: &mut egui::Ui, icon: &str, label: &str, active: bool) -> bool {
    let w = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, theme::NAV_ITEM_HEIGHT), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let painter = ui.painter();
    if active {
        painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_HOVER);
        painter.rect_filled(
            egui::Rect::from_min_size(rect.min, egui::vec2(3.0, rect.height())),
            1.0,
            theme::ACCENT,
        );
    } else if response.hovered() {
        painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_ELEVATED);
    }
    let color = if active { theme::ACCENT } else { theme::TEXT_SECONDARY };
    painter.text(
        rect.left_center() + egui::vec2(14.0, 0.0),
        egui::Align2::LEFT_CENTER,
        format!("{}   {}", icon, label),
        egui::FontId::proportional(theme::FONT_BODY),
        color,
    );
    response.clicked()
}

/// Square X button used in modal headers. Returns true if clicked.
pub fn close_button(ui: &mut egui::Ui) -> bool {
    let close_size = 24.0;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(close_size, close_size), egui::Sense::click());
    let close_color = if response.hovered() {
        ui.painter().rect_filled(rect, 4.0, theme::BG_SURFACE);
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        theme::STATUS_ERROR
    } else {
        theme::TEXT_DIM
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::X,
        egui::FontId::proportional(16.0),
        close_color,
    );
    response.clicked()
}

/// Label and color for the service connection indicator
pub fn service_status_display(status: &ServiceStatus) -> (String, egui::Color32) {
    match status {
        ServiceStatus::Unknown => ("Not checked".to_string(), theme::TEXT_DIM),
        ServiceStatus::Checking => ("Checking…".to_string(), theme::STATUS_WARNING),
        ServiceStatus::Online(health) => {
            let device = if health.device.is_empty() {
                String::new()
            } else {
                format!(" · {}", health.device.to_uppercase())
            };
            (format!("Online{}", device), theme::STATUS_SUCCESS)
        }
        ServiceStatus::Offline(_) => ("Offline".to_string(), theme::STATUS_ERROR),
    }
}

/// Colored dot followed by the connection label
pub fn status_indicator(ui: &mut egui::Ui, status: &ServiceStatus) -> egui::Response {
    let (label, color) = service_status_display(status);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 4.0, color);
        ui.add(
            egui::Label::new(egui::RichText::new(label).size(12.0).color(theme::TEXT_MUTED))
                .selectable(false),
        );
    })
    .response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HealthStatus;

    #[test]
    fn status_labels() {
        let online = ServiceStatus::Online(HealthStatus {
            status: "healthy".into(),
            model: "runwayml/stable-diffusion-v1-5".into(),
            device: "cuda".into(),
        });
        assert_eq!(service_status_display(&online).0, "Online · CUDA");
        assert_eq!(service_status_display(&ServiceStatus::Offline("refused".into())).1, theme::STATUS_ERROR);
    }
}
