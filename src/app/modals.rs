//! Export log window

use super::App;
use crate::theme;
use crate::types::ExportStatus;
use eframe::egui;
use tracing::warn;

impl App {
    pub(crate) fn render_export_log(&mut self, ctx: &egui::Context) {
        if !self.show_export_log {
            return;
        }

        // Snapshot under the lock, render without it
        let (rows, written, failed, pending, started) = {
            let Ok(s) = self.export_state.lock() else {
                return;
            };
            let rows: Vec<(String, ExportStatus)> = s
                .export_order
                .iter()
                .filter_map(|(job, name)| s.exports.get(job).map(|st| (name.clone(), st.clone())))
                .collect();
            (rows, s.written_count, s.failed_count, s.pending_count(), s.started_at)
        };

        let mut close = false;
        let mut open_folder = false;

        egui::Window::new("export_log")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .frame(theme::modal_frame())
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-theme::SPACING_XL, -theme::SPACING_XL))
            .fixed_size(egui::vec2(360.0, 0.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Exports")
                            .size(theme::FONT_HEADING)
                            .color(theme::TEXT_PRIMARY),
                    );
                    if let Some(started) = started {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format!("started {}", started.format("%H:%M:%S")))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            );
                        });
                    }
                });

                ui.label(
                    egui::RichText::new(format!(
                        "{} written  •  {} failed  •  {} waiting",
                        written, failed, pending
                    ))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_MD);

                egui::ScrollArea::vertical()
                    .max_height(240.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for (name, status) in &rows {
                            let (icon, color, hint) = match status {
                                ExportStatus::Scheduled => (egui_phosphor::regular::CLOCK, theme::TEXT_DIM, None),
                                ExportStatus::Written(path) => (
                                    egui_phosphor::regular::CHECK,
                                    theme::STATUS_SUCCESS,
                                    Some(path.display().to_string()),
                                ),
                                ExportStatus::Failed(reason) => {
                                    (egui_phosphor::regular::WARNING, theme::STATUS_ERROR, Some(reason.clone()))
                                }
                            };
                            let row = ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(icon).color(color));
                                ui.label(
                                    egui::RichText::new(name)
                                        .size(theme::FONT_LABEL)
                                        .color(theme::TEXT_SECONDARY),
                                );
                            });
                            if let Some(hint) = hint {
                                row.response.on_hover_text(hint);
                            }
                        }
                    });

                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    if ui
                        .add(theme::button(format!("{}  Open Folder", egui_phosphor::regular::FOLDER_OPEN)))
                        .clicked()
                    {
                        open_folder = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = if pending > 0 { "Hide" } else { "Close" };
                        if ui.add(theme::button(label)).clicked() {
                            close = true;
                        }
                    });
                });
            });

        if open_folder {
            std::fs::create_dir_all(&self.export_path).ok();
            if let Err(e) = open::that(&self.export_path) {
                warn!(error = %e, path = %self.export_path.display(), "Failed to open export folder");
            }
        }

        if close {
            self.show_export_log = false;
            if pending == 0 {
                if let Ok(mut s) = self.export_state.lock() {
                    s.clear_finished();
                }
            }
        }
    }
}
