//! App module - contains the main application state and logic

mod context_menu;
mod exports;
mod intake;
mod modals;
mod thumbnails;
mod views;

use crate::constants::PROCESSING_DELAY;
use crate::session::{PageStep, UploadSession};
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) session: UploadSession,
    pub(crate) icon_texture: Option<egui::TextureHandle>,
    // Export state
    pub(crate) export_state: Arc<Mutex<ExportState>>,
    pub(crate) export_path: PathBuf,
    pub(crate) export_path_str: String,
    pub(crate) show_export_log: bool,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Thumbnail cache, keyed by pending file id
    pub(crate) thumbnail_cache: HashMap<u64, Option<egui::TextureHandle>>,
    pub(crate) thumbnail_loading: HashSet<u64>,
    pub(crate) decoded_thumbnails: Arc<Mutex<HashMap<u64, Option<egui::ColorImage>>>>,
    // Cosmetic "converting" indicator after files are added
    pub(crate) processing_since: Option<Instant>,
    // Settings
    pub(crate) remember_format: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let export_path = settings.export_path_or_default();

        let mut session = UploadSession::default();
        if let Some(tag) = settings.remembered_format() {
            if let Err(e) = session.set_format_tag(tag) {
                warn!(error = %e, "Ignoring remembered format");
            }
        }

        Self {
            session,
            icon_texture: None,
            export_state: Arc::new(Mutex::new(ExportState::default())),
            export_path_str: export_path.to_string_lossy().to_string(),
            export_path,
            show_export_log: false,
            runtime,
            thumbnail_cache: HashMap::new(),
            thumbnail_loading: HashSet::new(),
            decoded_thumbnails: Arc::new(Mutex::new(HashMap::new())),
            processing_since: None,
            remember_format: settings.remember_format,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            export_path: Some(self.export_path_str.clone()),
            remember_format: self.remember_format,
            last_format: self.session.selected_format().to_string(),
        };
        settings.save(&self.data_dir);
    }

    /// Drop every pending file and its cached thumbnail.
    pub fn clear_all(&mut self) {
        if !self.session.is_empty() {
            info!(count = self.session.len(), "Clearing all files");
        }
        self.session.clear();
        self.thumbnail_cache.clear();
        self.thumbnail_loading.clear();
        if let Ok(mut d) = self.decoded_thumbnails.lock() {
            d.clear();
        }
        self.processing_since = None;
    }

    pub fn remove_file(&mut self, index: usize) {
        match self.session.remove_at(index) {
            Ok(file) => {
                self.forget_thumbnail(file.id);
                info!(name = %file.name, "Removed file");
            }
            Err(e) => warn!(error = %e, "Remove ignored"),
        }
    }

    pub fn move_file(&mut self, from: usize, to: usize) {
        if let Err(e) = self.session.move_to(from, to) {
            warn!(error = %e, "Move ignored");
        }
    }

    pub fn step_page(&mut self, step: PageStep) {
        self.session.go_to_page(step);
    }

    pub fn is_processing(&self) -> bool {
        self.processing_since
            .is_some_and(|t| t.elapsed() < PROCESSING_DELAY)
    }

    /// Escape clears, arrows page. Ignored while a text field has focus.
    pub fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (escape, left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });

        match shortcut_for(&self.session, escape, left, right) {
            Some(Shortcut::Clear) => self.clear_all(),
            Some(Shortcut::Page(step)) => self.step_page(step),
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shortcut {
    Clear,
    Page(PageStep),
}

/// Map this frame's key presses to at most one action. Escape wins; an arrow
/// only counts when that direction is navigable.
pub(crate) fn shortcut_for(session: &UploadSession, escape: bool, left: bool, right: bool) -> Option<Shortcut> {
    if escape {
        Some(Shortcut::Clear)
    } else if left && session.can_go_prev() {
        Some(Shortcut::Page(PageStep::Prev))
    } else if right && session.can_go_next() {
        Some(Shortcut::Page(PageStep::Next))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RawFile;

    fn session_with(count: usize) -> UploadSession {
        let mut s = UploadSession::default();
        s.accept_files((0..count).map(|i| RawFile::in_memory(format!("f{}.png", i), "image/png", Vec::<u8>::new())));
        s
    }

    #[test]
    fn escape_clears_even_when_empty() {
        let s = UploadSession::default();
        assert_eq!(shortcut_for(&s, true, false, false), Some(Shortcut::Clear));
    }

    #[test]
    fn escape_takes_priority_over_arrows() {
        let s = session_with(12);
        assert_eq!(shortcut_for(&s, true, false, true), Some(Shortcut::Clear));
    }

    #[test]
    fn arrows_follow_navigation_state() {
        let mut s = session_with(12);
        assert_eq!(shortcut_for(&s, false, true, false), None);
        assert_eq!(
            shortcut_for(&s, false, false, true),
            Some(Shortcut::Page(PageStep::Next))
        );

        s.go_to_page(PageStep::Next);
        s.go_to_page(PageStep::Next);
        assert_eq!(shortcut_for(&s, false, false, true), None);
        assert_eq!(
            shortcut_for(&s, false, true, false),
            Some(Shortcut::Page(PageStep::Prev))
        );
    }

    #[test]
    fn arrows_do_nothing_without_files() {
        let s = UploadSession::default();
        assert_eq!(shortcut_for(&s, false, true, true), None);
    }

    #[test]
    fn no_keys_no_action() {
        assert_eq!(shortcut_for(&session_with(3), false, false, false), None);
    }
}
