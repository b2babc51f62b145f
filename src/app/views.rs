//! View rendering (drop zone, thumbnail cards, page navigation)

use super::App;
use crate::constants::PAGE_SIZE;
use crate::mime::MediaKind;
use crate::session::{PageStep, PendingFile};
use crate::theme;
use crate::ui::components::{icon_button, placeholder_icon, truncate_name};
use crate::utils::format_bytes;
use eframe::egui;
use tracing::{info, warn};

/// Scale `size` to fit inside `bounds`, centered.
fn fit_rect(size: egui::Vec2, bounds: egui::Rect) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / size.x).min(bounds.height() / size.y);
    egui::Rect::from_center_size(bounds.center(), size * scale)
}

impl App {
    pub(crate) fn render_drop_zone(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let zone = ui.available_rect_before_wrap();

        if hovering {
            ui.painter().rect_filled(zone, theme::RADIUS_LARGE, theme::BG_DROP_ACTIVE);
        }

        if self.session.is_empty() {
            let outline = if hovering { theme::ACCENT } else { theme::BORDER_DEFAULT };
            theme::dashed_rect(ui.painter(), zone.shrink(1.0), egui::Stroke::new(theme::STROKE_DEFAULT, outline));
            ui.painter().text(
                zone.center() - egui::vec2(0.0, 40.0),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::UPLOAD_SIMPLE,
                egui::FontId::proportional(theme::FONT_GLYPH),
                theme::TEXT_DIM,
            );
            ui.painter().text(
                zone.center(),
                egui::Align2::CENTER_CENTER,
                "Drop Your Files Here",
                egui::FontId::proportional(theme::FONT_TITLE),
                theme::TEXT_SECONDARY,
            );
            ui.painter().text(
                zone.center() + egui::vec2(0.0, 26.0),
                egui::Align2::CENTER_CENTER,
                "HEIC, JPG, PNG, TIFF, WEBP, MOV, MP4 or PDF",
                egui::FontId::proportional(theme::FONT_SMALL),
                theme::TEXT_DIM,
            );

            let response = ui.allocate_rect(zone, egui::Sense::click());
            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if response.clicked() {
                self.pick_files();
            }
            return;
        }

        ui.vertical(|ui| {
            ui.add_space(theme::SPACING_MD);
            self.render_processing_row(ui, ctx);
            self.render_cards(ui, ctx);
            ui.add_space(theme::SPACING_LG);
            self.render_nav_bar(ui);
        });
    }

    fn render_processing_row(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(since) = self.processing_since else {
            ui.add_space(20.0);
            return;
        };
        if !self.is_processing() {
            self.processing_since = None;
            ui.add_space(20.0);
            return;
        }

        ui.horizontal(|ui| {
            ui.set_height(20.0);
            ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
            ui.label(
                egui::RichText::new(format!(
                    "Converting to {}...",
                    self.session.selected_format().label()
                ))
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_MUTED),
            );
        });
        ctx.request_repaint_after(crate::constants::PROCESSING_DELAY.saturating_sub(since.elapsed()));
    }

    fn render_cards(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let spacing = theme::SPACING_LG;
        let columns = PAGE_SIZE as f32;
        let available = ui.available_width();
        let card_w = ((available - spacing * (columns - 1.0)) / columns)
            .floor()
            .max(theme::CARD_MIN_WIDTH);
        let card_h = (card_w * theme::CARD_ASPECT).floor();

        // Clone page entries to avoid borrow issues (content is shared, not copied)
        let visible: Vec<(PendingFile, usize)> = self
            .session
            .visible_slice()
            .into_iter()
            .map(|(f, i)| (f.clone(), i))
            .collect();
        let dragging = self.session.dragging();

        let mut drop_target: Option<usize> = None;
        let mut remove_requested: Option<usize> = None;
        let mut export_requested: Option<usize> = None;
        let mut move_requested: Option<(usize, usize)> = None;

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);

            for (file, index) in &visible {
                let index = *index;
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(card_w, card_h), egui::Sense::click_and_drag());
                let card_id = response.id;

                if response.drag_started() {
                    if let Err(e) = self.session.begin_drag(index) {
                        warn!(error = %e, "Drag ignored");
                    }
                }

                let is_dragged = dragging == Some(index) || response.dragged();
                let is_target = dragging.is_some_and(|d| d != index) && ui.rect_contains_pointer(rect);
                if is_target {
                    drop_target = Some(index);
                }

                if ui.is_rect_visible(rect) {
                    self.paint_card(ui, ctx, rect, file, is_dragged, is_target);
                }

                // Header: remove button
                let close_rect = egui::Rect::from_min_size(
                    egui::pos2(rect.right() - theme::CARD_HEADER_HEIGHT, rect.top()),
                    egui::vec2(theme::CARD_HEADER_HEIGHT, theme::CARD_HEADER_HEIGHT),
                )
                .shrink(3.0);
                if icon_button(ui, close_rect, card_id.with("remove"), egui_phosphor::regular::X, theme::BTN_DANGER) {
                    remove_requested = Some(index);
                }

                // Footer: download button
                let footer_rect = egui::Rect::from_min_max(
                    egui::pos2(rect.left(), rect.bottom() - theme::CARD_FOOTER_HEIGHT),
                    rect.max,
                )
                .shrink(4.0);
                let download = ui.interact(footer_rect, card_id.with("download"), egui::Sense::click());
                let (fill, draw_rect) = theme::button_visual(&download, theme::BTN_ACCENT, footer_rect);
                ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
                ui.painter().text(
                    draw_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("{}  Download", egui_phosphor::regular::DOWNLOAD_SIMPLE),
                    egui::FontId::proportional(theme::FONT_SECTION),
                    theme::BTN_ACCENT_TEXT,
                );
                if download.hovered() {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if download.clicked() {
                    export_requested = Some(index);
                }

                if dragging.is_none() && response.hovered() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grab);
                }

                response.context_menu(|ui| {
                    let action = self.card_context_menu(ui, index);
                    if action.export {
                        export_requested = Some(index);
                    }
                    if action.remove {
                        remove_requested = Some(index);
                    }
                    if let Some(to) = action.move_to {
                        move_requested = Some((index, to));
                    }
                });
            }
        });

        // Resolve the drag token on release
        if self.session.dragging().is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            if ui.input(|i| i.pointer.any_released()) {
                if let Some(target) = drop_target {
                    match self.session.drop_on(target) {
                        Ok(true) => info!(to = target, "Reordered file"),
                        Ok(false) => {}
                        Err(e) => warn!(error = %e, "Drop ignored"),
                    }
                }
                self.session.end_drag();
            }
        }

        if let Some(index) = export_requested {
            self.export_one(ctx, index);
        }
        if let Some((from, to)) = move_requested {
            self.move_file(from, to);
        }
        if let Some(index) = remove_requested {
            self.remove_file(index);
        }
    }

    fn paint_card(
        &mut self,
        ui: &egui::Ui,
        ctx: &egui::Context,
        rect: egui::Rect,
        file: &PendingFile,
        is_dragged: bool,
        is_target: bool,
    ) {
        let texture = self.load_thumbnail(ctx, file);
        let painter = ui.painter();

        painter.rect_filled(rect, theme::RADIUS_MEDIUM, theme::card_frame_fill(is_dragged));
        if is_target {
            theme::dashed_rect(painter, rect, egui::Stroke::new(theme::STROKE_THICK, theme::ACCENT));
        } else {
            painter.rect_stroke(
                rect,
                theme::RADIUS_MEDIUM,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
                egui::StrokeKind::Outside,
            );
        }

        // Header: file name
        painter.text(
            rect.left_top() + egui::vec2(theme::SPACING_MD, theme::CARD_HEADER_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            truncate_name(&file.name),
            egui::FontId::proportional(theme::FONT_SECTION),
            theme::TEXT_SECONDARY,
        );

        // Content: thumbnail or placeholder glyph
        let content = egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.top() + theme::CARD_HEADER_HEIGHT),
            egui::pos2(rect.right(), rect.bottom() - theme::CARD_FOOTER_HEIGHT),
        )
        .shrink(theme::SPACING_SM);
        let alpha = if is_dragged { 128 } else { 255 };

        if let Some(tex) = texture {
            let img_rect = fit_rect(tex.size_vec2(), content);
            painter.image(
                tex.id(),
                img_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::from_white_alpha(alpha),
            );
        } else {
            painter.rect_filled(content, theme::RADIUS_DEFAULT, theme::BG_INPUT);
            painter.text(
                content.center(),
                egui::Align2::CENTER_CENTER,
                placeholder_icon(MediaKind::of(&file.mime_type)),
                egui::FontId::proportional(theme::FONT_GLYPH),
                theme::TEXT_DIM.gamma_multiply(alpha as f32 / 255.0),
            );
        }

        painter.text(
            content.right_bottom() - egui::vec2(theme::SPACING_SM, theme::SPACING_SM),
            egui::Align2::RIGHT_BOTTOM,
            format_bytes(file.size),
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_MUTED,
        );
    }

    fn render_nav_bar(&mut self, ui: &mut egui::Ui) {
        let can_prev = self.session.can_go_prev();
        let can_next = self.session.can_go_next();
        let nav_size = egui::vec2(40.0, theme::BUTTON_HEIGHT);

        ui.allocate_ui_with_layout(
            egui::vec2(ui.available_width(), theme::NAV_BAR_HEIGHT),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                let prev = if can_prev {
                    theme::button(egui_phosphor::regular::CARET_LEFT)
                } else {
                    theme::button_disabled(egui_phosphor::regular::CARET_LEFT)
                };
                if ui.add_enabled(can_prev, prev.min_size(nav_size)).clicked() {
                    self.step_page(PageStep::Prev);
                }

                ui.label(
                    egui::RichText::new(format!(
                        "Page {} of {}",
                        self.session.current_page() + 1,
                        self.session.page_count()
                    ))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
                );

                let next = if can_next {
                    theme::button(egui_phosphor::regular::CARET_RIGHT)
                } else {
                    theme::button_disabled(egui_phosphor::regular::CARET_RIGHT)
                };
                if ui.add_enabled(can_next, next.min_size(nav_size)).clicked() {
                    self.step_page(PageStep::Next);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let count = self.session.len();
                    ui.label(
                        egui::RichText::new(format!("{} file{}", count, if count == 1 { "" } else { "s" }))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_DIM),
                    );
                });
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_fits_width() {
        let bounds = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let fitted = fit_rect(egui::vec2(200.0, 100.0), bounds);
        assert_eq!(fitted.size(), egui::vec2(100.0, 50.0));
        assert_eq!(fitted.center(), bounds.center());
    }

    #[test]
    fn tall_image_fits_height() {
        let bounds = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(80.0, 40.0));
        let fitted = fit_rect(egui::vec2(50.0, 100.0), bounds);
        assert_eq!(fitted.size(), egui::vec2(20.0, 40.0));
    }

    #[test]
    fn empty_size_keeps_bounds() {
        let bounds = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(10.0, 10.0));
        assert_eq!(fit_rect(egui::Vec2::ZERO, bounds), bounds);
    }
}
