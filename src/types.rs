//! Common types and data structures

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::path::PathBuf;

/// Status of a single exported file
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Scheduled,
    Written(PathBuf),
    Failed(String),
}

/// State tracking for export batches, shared with the export tasks
#[derive(Default)]
pub struct ExportState {
    pub exports: HashMap<u64, ExportStatus>, // job id -> status
    pub export_order: Vec<(u64, String)>,    // (job id, output name) for display
    pub written_count: usize,
    pub failed_count: usize,
    pub started_at: Option<DateTime<Local>>,
    next_job: u64,
}

impl ExportState {
    /// Register a new output name and return its job id
    pub fn schedule(&mut self, output_name: String) -> u64 {
        let job = self.next_job;
        self.next_job += 1;
        self.exports.insert(job, ExportStatus::Scheduled);
        self.export_order.push((job, output_name));
        if self.started_at.is_none() {
            self.started_at = Some(Local::now());
        }
        job
    }

    /// Record a job's outcome. A file written under a numbered name is
    /// listed under that name.
    pub fn finish(&mut self, job: u64, status: ExportStatus) {
        match &status {
            ExportStatus::Written(path) => {
                self.written_count += 1;
                if let Some(written) = path.file_name().map(|n| n.to_string_lossy().to_string()) {
                    if let Some((_, name)) = self.export_order.iter_mut().find(|(j, _)| *j == job) {
                        *name = written;
                    }
                }
            }
            ExportStatus::Failed(_) => self.failed_count += 1,
            ExportStatus::Scheduled => {}
        }
        self.exports.insert(job, status);
    }

    pub fn pending_count(&self) -> usize {
        self.exports
            .values()
            .filter(|s| matches!(s, ExportStatus::Scheduled))
            .count()
    }

    pub fn is_idle(&self) -> bool {
        self.pending_count() == 0
    }

    /// Forget finished jobs. Jobs still scheduled stay listed.
    pub fn clear_finished(&mut self) {
        self.exports
            .retain(|_, s| matches!(s, ExportStatus::Scheduled));
        let exports = &self.exports;
        self.export_order.retain(|(job, _)| exports.contains_key(job));
        self.written_count = 0;
        self.failed_count = 0;
        if self.export_order.is_empty() {
            self.started_at = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_assigns_increasing_jobs() {
        let mut s = ExportState::default();
        let a = s.schedule("a_converted.pdf".into());
        let b = s.schedule("b_converted.pdf".into());
        assert!(b > a);
        assert_eq!(s.pending_count(), 2);
        assert!(s.started_at.is_some());
    }

    #[test]
    fn finish_updates_counters() {
        let mut s = ExportState::default();
        let a = s.schedule("a".into());
        let b = s.schedule("b".into());
        s.finish(a, ExportStatus::Written(PathBuf::from("/tmp/a")));
        assert!(!s.is_idle());
        s.finish(b, ExportStatus::Failed("disk full".into()));
        assert!(s.is_idle());
        assert_eq!((s.written_count, s.failed_count), (1, 1));
    }

    #[test]
    fn clear_finished_keeps_scheduled_jobs() {
        let mut s = ExportState::default();
        let a = s.schedule("a".into());
        let b = s.schedule("b".into());
        s.finish(a, ExportStatus::Written(PathBuf::from("/tmp/a")));
        s.clear_finished();
        assert_eq!(s.export_order, vec![(b, "b".to_string())]);
        assert_eq!(s.written_count, 0);
        assert!(s.started_at.is_some());

        s.finish(b, ExportStatus::Written(PathBuf::from("/tmp/b")));
        s.clear_finished();
        assert!(s.export_order.is_empty());
        assert!(s.started_at.is_none());
    }

    #[test]
    fn finish_shows_the_name_actually_written() {
        let mut state = ExportState::default();
        let job = state.schedule("a_converted.pdf".into());
        state.finish(job, ExportStatus::Written(PathBuf::from("/out/a_converted (1).pdf")));
        assert_eq!(state.export_order, vec![(job, "a_converted (1).pdf".to_string())]);
    }
}
