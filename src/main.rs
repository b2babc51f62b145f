#![windows_subsystem = "windows"]
//! Drop Converter - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod convert;
mod error;
mod mime;
mod session;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use convert::OutputFormat;
use eframe::egui;
use tracing::{error, info};
use ui::components::format_chip;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "drop-converter.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,drop_converter=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Drop Converter starting");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1180.0, 640.0)))
        .with_min_inner_size([980.0, 520.0])
        .with_title(APP_NAME)
        .with_drag_and_drop(true);

    if let Some((rgba, width, height)) = utils::rasterize_icon(256) {
        viewport = viewport.with_icon(std::sync::Arc::new(egui::IconData { rgba, width, height }));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir, runtime);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        self.render_export_log(ctx);

        // Left sidebar - format selection and actions (must be added BEFORE CentralPanel)
        egui::SidePanel::left("control_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin { left: 16, right: 0, top: 0, bottom: 16 }),
            )
            .show(ctx, |ui| {
                ui.set_max_width(theme::SIDEBAR_WIDTH - 16.0);
                ui.add_space(21.0);

                // Header with icon, centered
                ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                    if self.icon_texture.is_none() {
                        self.icon_texture = utils::rasterize_icon(128).map(|(pixels, w, h)| {
                            ctx.load_texture(
                                "app_icon",
                                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                                egui::TextureOptions::LINEAR,
                            )
                        });
                    }
                    if let Some(texture) = &self.icon_texture {
                        ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(56.0, 56.0)));
                    }
                    ui.add_space(4.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("DROP CONVERTER")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
                ui.add_space(theme::SPACING_XL);

                // Output format
                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new("OUTPUT FORMAT")
                            .size(theme::FONT_SECTION)
                            .color(theme::TEXT_MUTED),
                    );
                    ui.add_space(theme::SPACING_SM);
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
                        let selected = self.session.selected_format();
                        for format in OutputFormat::ALL {
                            if format_chip(ui, format.label(), format == selected).clicked() {
                                self.session.set_format(format);
                                info!(format = %format, "Output format selected");
                            }
                        }
                    });
                    ui.add_space(theme::SPACING_MD);
                    if theme::settings_checkbox(ui, self.remember_format, "Remember format") {
                        self.remember_format = !self.remember_format;
                        self.save_settings();
                    }
                });

                ui.add_space(theme::SPACING_LG);

                // Export folder
                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new("EXPORT FOLDER")
                            .size(theme::FONT_SECTION)
                            .color(theme::TEXT_MUTED),
                    );
                    ui.add_space(theme::SPACING_SM);
                    let path_changed = ui
                        .horizontal(|ui| {
                            let te = ui.add(
                                egui::TextEdit::singleline(&mut self.export_path_str)
                                    .desired_width(ui.available_width() - 36.0)
                                    .font(egui::FontId::proportional(theme::FONT_SMALL)),
                            );
                            let (rect, resp) =
                                ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());
                            if resp.hovered() {
                                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                                ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                            }
                            ui.painter().text(
                                rect.center(),
                                egui::Align2::CENTER_CENTER,
                                egui_phosphor::regular::FOLDER_OPEN,
                                egui::FontId::proportional(16.0),
                                theme::TEXT_SECONDARY,
                            );
                            if resp.clicked() {
                                std::fs::create_dir_all(&self.export_path).ok();
                                if let Some(path) = rfd::FileDialog::new()
                                    .set_directory(&self.export_path)
                                    .pick_folder()
                                {
                                    self.export_path = path;
                                    self.export_path_str = self.export_path.to_string_lossy().to_string();
                                    self.save_settings();
                                }
                            }
                            te.lost_focus()
                        })
                        .inner;

                    if path_changed {
                        self.export_path = std::path::PathBuf::from(&self.export_path_str);
                        self.save_settings();
                    }
                });

                ui.add_space(theme::SPACING_LG);

                // Actions
                let has_files = !self.session.is_empty();
                let full = egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE);

                let upload_label = format!("{}  Upload Files", egui_phosphor::regular::UPLOAD_SIMPLE);
                if ui.add(theme::button_accent(upload_label).min_size(full)).clicked() {
                    self.pick_files();
                }

                let download_label = format!("{}  Download All", egui_phosphor::regular::DOWNLOAD_SIMPLE);
                let download_btn = if has_files {
                    theme::button(download_label)
                } else {
                    theme::button_disabled(download_label)
                };
                if ui.add_enabled(has_files, download_btn.min_size(full)).clicked() {
                    self.export_all(ctx);
                }

                let clear_label = format!("{}  Clear All", egui_phosphor::regular::TRASH);
                let clear_btn = if has_files {
                    theme::button_danger(clear_label)
                } else {
                    theme::button_disabled(clear_label)
                };
                if ui.add_enabled(has_files, clear_btn.min_size(full)).clicked() {
                    self.clear_all();
                }

                ui.add_space(theme::SPACING_LG);
                ui.label(
                    egui::RichText::new("Esc clears  •  ← → change page  •  drag cards to reorder")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XL as i8)),
            )
            .show(ctx, |ui| {
                self.render_drop_zone(ui, ctx);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
