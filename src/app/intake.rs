//! File intake: native file dialog and OS drag-and-drop

use super::App;
use crate::mime::{detect_mime, ACCEPTED_EXTENSIONS, SNIFF_LEN};
use crate::session::RawFile;
use eframe::egui;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Read up to `SNIFF_LEN` bytes from the start of a file.
fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut head = Vec::new();
    std::fs::File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(head)
}

/// Describe a file on disk as a candidate. Only the head is read, for MIME
/// sniffing; the rest stays on disk. Unreadable paths are skipped.
pub(crate) fn read_candidate(path: &Path) -> Option<RawFile> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta,
        Ok(_) => {
            debug!(path = %path.display(), "Skipping non-file path");
            return None;
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to stat file");
            return None;
        }
    };
    let name = path.file_name()?.to_string_lossy().to_string();
    match read_head(path) {
        Ok(head) => {
            let mime = detect_mime(&name, &head);
            Some(RawFile::on_disk(name, mime, path.to_path_buf(), meta.len()))
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to read file");
            None
        }
    }
}

/// Convert an OS drop into a candidate. Native drops carry a path; web drops
/// carry bytes and a browser-provided MIME type.
pub(crate) fn dropped_candidate(file: &egui::DroppedFile) -> Option<RawFile> {
    if let Some(bytes) = &file.bytes {
        let mime = if file.mime.is_empty() {
            detect_mime(&file.name, bytes).to_string()
        } else {
            file.mime.clone()
        };
        return Some(RawFile::in_memory(file.name.clone(), mime, bytes.clone()));
    }
    file.path.as_deref().and_then(read_candidate)
}

impl App {
    /// Hand candidates to the session and start the processing indicator.
    pub fn accept_candidates(&mut self, candidates: Vec<RawFile>) {
        let offered = candidates.len();
        let appended = self.session.accept_files(candidates);
        if appended == 0 {
            debug!(offered, "No acceptable files");
            return;
        }
        info!(offered, appended, total = self.session.len(), "Files added");
        self.processing_since = Some(Instant::now());
    }

    /// Open the multi-file picker.
    pub fn pick_files(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Select files")
            .add_filter("Images, videos and PDFs", ACCEPTED_EXTENSIONS)
            .pick_files()
        else {
            return;
        };
        let candidates: Vec<RawFile> = paths.iter().filter_map(|p| read_candidate(p)).collect();
        self.accept_candidates(candidates);
    }

    /// Collect files dropped onto the window this frame.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let candidates: Vec<RawFile> = dropped.iter().filter_map(dropped_candidate).collect();
        self.accept_candidates(candidates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FileSource;
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn reads_file_with_extension_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        fs::write(&path, b"%PDF-1.7").unwrap();

        let raw = read_candidate(&path).unwrap();
        assert_eq!(raw.name, "scan.pdf");
        assert_eq!(raw.mime_type, "application/pdf");
        assert_eq!(raw.size, 8);
        assert!(matches!(&raw.source, FileSource::Disk(p) if *p == path));
    }

    #[test]
    fn large_files_stay_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let len = SNIFF_LEN * 4;
        fs::File::create(&path).unwrap().set_len(len).unwrap();

        let raw = read_candidate(&path).unwrap();
        assert_eq!(raw.mime_type, "video/mp4");
        assert_eq!(raw.size, len);
        assert!(matches!(raw.source, FileSource::Disk(_)));
    }

    #[test]
    fn head_read_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        fs::File::create(&path).unwrap().set_len(SNIFF_LEN * 3).unwrap();
        assert_eq!(read_head(&path).unwrap().len() as u64, SNIFF_LEN);
    }

    #[test]
    fn extensionless_file_is_sniffed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan");
        fs::write(&path, b"%PDF-1.7\n%rest of document").unwrap();

        let raw = read_candidate(&path).unwrap();
        assert_eq!(raw.mime_type, "application/pdf");
    }

    #[test]
    fn directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_candidate(dir.path()).is_none());
    }

    #[test]
    fn missing_path_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_candidate(&dir.path().join("gone.png")).is_none());
    }

    #[test]
    fn native_drop_reads_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mov");
        fs::write(&path, b"....").unwrap();

        let dropped = egui::DroppedFile {
            path: Some(path),
            ..Default::default()
        };
        let raw = dropped_candidate(&dropped).unwrap();
        assert_eq!(raw.name, "clip.mov");
        assert_eq!(raw.mime_type, "video/quicktime");
    }

    #[test]
    fn web_drop_keeps_browser_mime() {
        let dropped = egui::DroppedFile {
            name: "photo".into(),
            mime: "image/heic".into(),
            bytes: Some(Arc::from(&b"abc"[..])),
            ..Default::default()
        };
        let raw = dropped_candidate(&dropped).unwrap();
        assert_eq!(raw.mime_type, "image/heic");
        assert_eq!(raw.size, 3);
        assert!(matches!(raw.source, FileSource::Memory(_)));
    }

    #[test]
    fn drop_without_path_or_bytes_is_skipped() {
        assert!(dropped_candidate(&egui::DroppedFile::default()).is_none());
    }
}
