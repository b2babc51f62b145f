//! Reusable UI components
//!
//! Standalone widgets and display helpers shared by the card grid and the
//! sidebar.

use crate::constants::{CARD_NAME_KEEP, CARD_NAME_MAX};
use crate::mime::MediaKind;
use crate::theme;
use eframe::egui;

/// Shorten long file names for thumbnail headers
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > CARD_NAME_MAX {
        let kept: String = name.chars().take(CARD_NAME_KEEP).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

/// Placeholder glyph for files without a decoded preview
pub fn placeholder_icon(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => egui_phosphor::regular::FILM_STRIP,
        MediaKind::Pdf => egui_phosphor::regular::FILE_PDF,
        MediaKind::Image => egui_phosphor::regular::IMAGE,
        MediaKind::Other => egui_phosphor::regular::FOLDER,
    }
}

/// Pill-shaped toggle for one format. Returns the response so callers can
/// check `clicked()`.
pub fn format_chip(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let galley_w = ui.fonts(|f| {
        f.layout_no_wrap(label.to_string(), egui::FontId::proportional(theme::FONT_LABEL), theme::TEXT_PRIMARY)
            .rect
            .width()
    });
    let size = egui::vec2(galley_w + 20.0, theme::BUTTON_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let base = if active { theme::TOGGLE_SELECTED } else { theme::TOGGLE_UNSELECTED };
        let (fill, draw_rect) = theme::button_visual(&response, base, rect);
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_MEDIUM, fill);
        if active {
            painter.rect_stroke(
                draw_rect,
                theme::RADIUS_MEDIUM,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::ACCENT),
                egui::StrokeKind::Inside,
            );
        }
        painter.text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(theme::FONT_LABEL),
            if active { theme::TEXT_PRIMARY } else { theme::TEXT_MUTED },
        );
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Small square icon button painted inside an existing rect. Returns true if clicked.
pub fn icon_button(ui: &mut egui::Ui, rect: egui::Rect, id: egui::Id, icon: &str, hover_fill: egui::Color32) -> bool {
    let response = ui.interact(rect, id, egui::Sense::click());
    let painter = ui.painter();
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        painter.rect_filled(rect, theme::RADIUS_DEFAULT, hover_fill);
    }
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(theme::FONT_BODY),
        theme::TEXT_SECONDARY,
    );
    response.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_kept() {
        assert_eq!(truncate_name("photo.png"), "photo.png");
        assert_eq!(truncate_name("exactly15chars."), "exactly15chars.");
    }

    #[test]
    fn long_names_keep_twelve_chars() {
        assert_eq!(truncate_name("holiday_in_rome_2024.heic"), "holiday_in_r...");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_name("ééééééééééééééééé.png"), "éééééééééééé...");
    }
}
