//! Export logic: writes a placeholder file per pending file

use super::App;
use crate::constants::{EXPORT_STAGGER, MAX_NAME_ATTEMPTS};
use crate::convert::{converted_name, numbered_name, placeholder_content};
use crate::types::*;
use eframe::egui;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// One scheduled output file
struct ExportJob {
    job: u64,
    output_name: String,
}

/// Create `name` in `dir` without replacing an existing file. A taken name
/// moves on to `name (1)`, `name (2)` and so on.
async fn create_unique(dir: &Path, name: &str, content: &[u8]) -> io::Result<PathBuf> {
    for n in 0..MAX_NAME_ATTEMPTS {
        let candidate = if n == 0 { name.to_string() } else { numbered_name(name, n) };
        let path = dir.join(&candidate);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(content).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "Export name taken");
            }
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for {}", name),
    ))
}

/// Write a single placeholder artifact and record the outcome.
async fn write_export(job: ExportJob, dir: PathBuf, state: Arc<Mutex<ExportState>>, ctx: &egui::Context) {
    let content = placeholder_content(&job.output_name);
    let status = match create_unique(&dir, &job.output_name, content.as_bytes()).await {
        Ok(dest) => ExportStatus::Written(dest),
        Err(e) => {
            warn!(error = %e, name = %job.output_name, path = %dir.display(), "Failed to write export");
            ExportStatus::Failed(e.to_string())
        }
    };

    if let Ok(mut s) = state.lock() {
        s.finish(job.job, status);
    }
    ctx.request_repaint();
}

/// Spawn one timer per job, the i-th firing after `i * EXPORT_STAGGER`.
/// Nothing is awaited or cancelled; each task only reports back through `state`.
fn spawn_export_batch(
    jobs: Vec<ExportJob>,
    dir: PathBuf,
    state: Arc<Mutex<ExportState>>,
    ctx: egui::Context,
    runtime: &tokio::runtime::Runtime,
) {
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(error = %e, path = %dir.display(), "Failed to create export directory");
    }

    for (i, job) in jobs.into_iter().enumerate() {
        let dir = dir.clone();
        let state = state.clone();
        let ctx = ctx.clone();
        let delay = EXPORT_STAGGER * i as u32;

        runtime.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            write_export(job, dir, state, &ctx).await;
        });
    }
}

impl App {
    /// Export every file in list order, staggered.
    pub fn export_all(&mut self, ctx: &egui::Context) {
        if self.session.is_empty() {
            return;
        }
        let format = self.session.selected_format();
        let names: Vec<String> = self
            .session
            .files()
            .iter()
            .map(|f| converted_name(&f.name, format))
            .collect();

        info!(count = names.len(), format = %format, path = %self.export_path.display(), "Starting export batch");
        self.queue_exports(ctx, names);
    }

    /// Export the file at `index` immediately.
    pub fn export_one(&mut self, ctx: &egui::Context, index: usize) {
        let Some(file) = self.session.get(index) else {
            return;
        };
        let name = converted_name(&file.name, self.session.selected_format());
        info!(source = %file.name, output = %name, "Exporting file");
        self.queue_exports(ctx, vec![name]);
    }

    fn queue_exports(&mut self, ctx: &egui::Context, names: Vec<String>) {
        let jobs: Vec<ExportJob> = {
            let Ok(mut s) = self.export_state.lock() else {
                return;
            };
            if s.is_idle() {
                s.clear_finished();
            }
            let jobs: Vec<ExportJob> = names
                .into_iter()
                .map(|output_name| ExportJob {
                    job: s.schedule(output_name.clone()),
                    output_name,
                })
                .collect();
            jobs
        };

        self.show_export_log = true;
        spawn_export_batch(
            jobs,
            self.export_path.clone(),
            self.export_state.clone(),
            ctx.clone(),
            &self.runtime,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn schedule(state: &Arc<Mutex<ExportState>>, names: &[&str]) -> Vec<ExportJob> {
        let mut s = state.lock().unwrap();
        let jobs = names
            .iter()
            .map(|n| ExportJob {
                job: s.schedule(n.to_string()),
                output_name: n.to_string(),
            })
            .collect();
        jobs
    }

    fn wait_idle(state: &Arc<Mutex<ExportState>>, timeout: Duration) {
        let start = Instant::now();
        while !state.lock().unwrap().is_idle() {
            assert!(start.elapsed() < timeout, "exports did not finish");
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    #[tokio::test]
    async fn write_export_creates_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(Mutex::new(ExportState::default()));
        let job = schedule(&state, &["photo_converted.png"]).remove(0);

        write_export(job, dir.path().to_path_buf(), state.clone(), &egui::Context::default()).await;

        let written = std::fs::read_to_string(dir.path().join("photo_converted.png")).unwrap();
        assert_eq!(written, "This is a demo file: photo_converted.png");
        let s = state.lock().unwrap();
        assert_eq!(s.written_count, 1);
        assert!(s.is_idle());
    }

    #[tokio::test]
    async fn write_export_records_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let state = Arc::new(Mutex::new(ExportState::default()));
        let job = schedule(&state, &["a_converted.pdf"]).remove(0);

        write_export(job, missing, state.clone(), &egui::Context::default()).await;

        let s = state.lock().unwrap();
        assert_eq!(s.failed_count, 1);
        assert!(matches!(s.exports.get(&0), Some(ExportStatus::Failed(_))));
    }

    #[test]
    fn batch_is_staggered_and_writes_every_file() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(Mutex::new(ExportState::default()));
        let jobs = schedule(&state, &["a_converted.pdf", "b_converted.pdf", "c_converted.pdf"]);

        let start = Instant::now();
        spawn_export_batch(
            jobs,
            dir.path().join("out"),
            state.clone(),
            egui::Context::default(),
            &runtime,
        );
        wait_idle(&state, Duration::from_secs(10));

        assert!(start.elapsed() >= EXPORT_STAGGER * 2);
        for name in ["a_converted.pdf", "b_converted.pdf", "c_converted.pdf"] {
            assert!(dir.path().join("out").join(name).exists(), "{} missing", name);
        }
        assert_eq!(state.lock().unwrap().written_count, 3);
    }

    #[test]
    fn same_output_names_get_numbered() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(Mutex::new(ExportState::default()));
        let names: Vec<String> = ["a.png", "a.jpg"]
            .iter()
            .map(|n| converted_name(n, crate::convert::OutputFormat::Pdf))
            .collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let jobs = schedule(&state, &names);

        spawn_export_batch(jobs, dir.path().to_path_buf(), state.clone(), egui::Context::default(), &runtime);
        wait_idle(&state, Duration::from_secs(10));

        let first = std::fs::read_to_string(dir.path().join("a_converted.pdf")).unwrap();
        let second = std::fs::read_to_string(dir.path().join("a_converted (1).pdf")).unwrap();
        assert_eq!(first, "This is a demo file: a_converted.pdf");
        assert_eq!(second, "This is a demo file: a_converted.pdf");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);

        let s = state.lock().unwrap();
        assert_eq!(s.written_count, 2);
        let shown: Vec<&str> = s.export_order.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(shown, vec!["a_converted.pdf", "a_converted (1).pdf"]);
    }

    #[tokio::test]
    async fn existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scan_converted.png"), b"keep me").unwrap();
        let state = Arc::new(Mutex::new(ExportState::default()));
        let job = schedule(&state, &["scan_converted.png"]).remove(0);

        write_export(job, dir.path().to_path_buf(), state.clone(), &egui::Context::default()).await;

        assert_eq!(std::fs::read(dir.path().join("scan_converted.png")).unwrap(), b"keep me");
        assert!(dir.path().join("scan_converted (1).png").exists());
        assert!(matches!(
            state.lock().unwrap().exports.get(&0),
            Some(ExportStatus::Written(p)) if p.ends_with("scan_converted (1).png")
        ));
    }
}
