//! Upload session: the ordered list of pending files, its paging window,
//! drag-to-reorder state and the selected output format.
//!
//! Every method is a synchronous command. The egui adapter in `app` calls
//! them from inside the update loop, one input event at a time.

use crate::constants::PAGE_SIZE;
use crate::convert::OutputFormat;
use crate::error::{Result, SessionError};
use crate::mime;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Where the bytes of a file live
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Bytes handed over with the drop (no path available)
    Memory(Arc<[u8]>),
    /// A file on disk, read only when a preview needs it
    Disk(PathBuf),
}

impl FileSource {
    pub fn read(&self) -> std::io::Result<Arc<[u8]>> {
        match self {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Disk(path) => std::fs::read(path).map(Arc::from),
        }
    }
}

/// A candidate handed in by the file dialog or an OS drop
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub mime_type: String,
    pub source: FileSource,
    pub size: u64,
}

impl RawFile {
    pub fn in_memory(name: impl Into<String>, mime_type: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        let content: Arc<[u8]> = content.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: content.len() as u64,
            source: FileSource::Memory(content),
        }
    }

    pub fn on_disk(name: impl Into<String>, mime_type: impl Into<String>, path: PathBuf, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            source: FileSource::Disk(path),
            size,
        }
    }
}

/// An accepted upload
#[derive(Debug, Clone)]
pub struct PendingFile {
    /// Unique within a session, keys the thumbnail cache
    pub id: u64,
    pub name: String,
    pub mime_type: String,
    pub source: FileSource,
    pub size: u64,
}

/// Direction of a single page step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Prev,
    Next,
}

#[derive(Debug, Default)]
pub struct UploadSession {
    files: Vec<PendingFile>,
    // Stored as last set; reads go through `current_page()` which clamps.
    current_page: usize,
    format: OutputFormat,
    dragging: Option<usize>,
    next_id: u64,
}

impl UploadSession {
    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PendingFile> {
        self.files.get(index)
    }

    // ------------------------------------------------------------------------
    // List mutations
    // ------------------------------------------------------------------------

    /// Append every candidate with an accepted MIME type, preserving input order.
    /// Returns how many were appended; a non-zero count resets to the first page.
    pub fn accept_files<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = RawFile>,
    {
        let before = self.files.len();
        for raw in candidates {
            if !mime::is_accepted(&raw.mime_type) {
                debug!(name = %raw.name, mime = %raw.mime_type, "Rejected file type");
                continue;
            }
            let id = self.next_id;
            self.next_id += 1;
            self.files.push(PendingFile {
                id,
                name: raw.name,
                mime_type: raw.mime_type,
                source: raw.source,
                size: raw.size,
            });
        }

        let appended = self.files.len() - before;
        if appended > 0 {
            self.current_page = 0;
        }
        appended
    }

    /// Remove the file at `index`. The page is left alone; a now-empty
    /// trailing page is clamped on read.
    pub fn remove_at(&mut self, index: usize) -> Result<PendingFile> {
        self.check_index(index)?;
        let removed = self.files.remove(index);
        self.dragging = None;
        Ok(removed)
    }

    /// Splice the file at `from` out, then insert it at `to` in the shortened list.
    /// Returns false when nothing moved.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<bool> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(false);
        }
        let moved = self.files.remove(from);
        self.files.insert(to, moved);
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.current_page = 0;
        self.dragging = None;
    }

    // ------------------------------------------------------------------------
    // Drag token
    // ------------------------------------------------------------------------

    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.dragging = Some(index);
        Ok(())
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Drop the dragged file onto `target`. Dropping with no drag in
    /// progress, or onto the dragged card itself, does nothing.
    pub fn drop_on(&mut self, target: usize) -> Result<bool> {
        match self.dragging {
            Some(source) if source != target => self.move_to(source, target),
            _ => Ok(false),
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    // ------------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------------

    /// Number of pages, or 0 for an empty list (navigation disabled)
    pub fn page_count(&self) -> usize {
        self.files.len().div_ceil(PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page.min(self.page_count().saturating_sub(1))
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page() > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page_count() > 0 && self.current_page() + 1 < self.page_count()
    }

    /// Step one page in either direction. No wraparound.
    pub fn go_to_page(&mut self, step: PageStep) -> bool {
        let moved = match step {
            PageStep::Prev if self.can_go_prev() => {
                self.current_page = self.current_page() - 1;
                true
            }
            PageStep::Next if self.can_go_next() => {
                self.current_page = self.current_page() + 1;
                true
            }
            _ => false,
        };
        if moved {
            debug!(page = self.current_page, "Page changed");
        }
        moved
    }

    /// Files on the current page with their global indices
    pub fn visible_slice(&self) -> Vec<(&PendingFile, usize)> {
        let start = self.current_page() * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.files.len());
        if start >= end {
            return Vec::new();
        }
        self.files[start..end]
            .iter()
            .zip(start..end)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Format
    // ------------------------------------------------------------------------

    pub fn selected_format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        if self.format != format {
            debug!(format = %format, "Selected format");
        }
        self.format = format;
    }

    /// Select a format by its tag (`"png"`, `"MP4"`). Unknown tags leave the
    /// current format in place.
    pub fn set_format_tag(&mut self, tag: &str) -> Result<()> {
        self.set_format(tag.parse()?);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.files.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.files.len(),
            })
        }
    }
}
