//! Context menu for thumbnail cards

use super::App;
use crate::theme;
use eframe::egui;

#[derive(Default)]
pub(crate) struct CardAction {
    pub export: bool,
    pub remove: bool,
    pub move_to: Option<usize>,
}

impl App {
    pub(crate) fn card_context_menu(&self, ui: &mut egui::Ui, index: usize) -> CardAction {
        let mut action = CardAction::default();
        ui.spacing_mut().item_spacing.y = 2.0;
        let last = self.session.len().saturating_sub(1);
        let ext = self.session.selected_format().label();

        let download_label = format!("Download as {}", ext);
        theme::set_menu_width(ui, &[&download_label, "Move to first", "Move to last", "Remove"]);

        if theme::menu_item(ui, egui_phosphor::regular::DOWNLOAD_SIMPLE, &download_label) {
            action.export = true;
            ui.close_menu();
        }
        ui.separator();
        if index > 0 && theme::menu_item(ui, egui_phosphor::regular::ARROW_LINE_LEFT, "Move to first") {
            action.move_to = Some(0);
            ui.close_menu();
        }
        if index < last && theme::menu_item(ui, egui_phosphor::regular::ARROW_LINE_RIGHT, "Move to last") {
            action.move_to = Some(last);
            ui.close_menu();
        }
        ui.separator();
        if theme::menu_item(ui, egui_phosphor::regular::TRASH, "Remove") {
            action.remove = true;
            ui.close_menu();
        }

        action
    }
}
