//! Output formats and export naming
//!
//! No bytes are transformed here. An "export" is a placeholder text file
//! whose name tells the user which format they picked.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target format offered by the format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Jpg,
    Png,
    Webp,
    Tiff,
    Heic,
    Mp4,
    Mov,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 8] = [
        OutputFormat::Pdf,
        OutputFormat::Jpg,
        OutputFormat::Png,
        OutputFormat::Webp,
        OutputFormat::Tiff,
        OutputFormat::Heic,
        OutputFormat::Mp4,
        OutputFormat::Mov,
    ];

    /// Lowercase tag, also used as the file extension
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Heic => "heic",
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mov => "mov",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Jpg => "JPG",
            OutputFormat::Png => "PNG",
            OutputFormat::Webp => "WEBP",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Heic => "HEIC",
            OutputFormat::Mp4 => "MP4",
            OutputFormat::Mov => "MOV",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.extension() == tag)
            .ok_or_else(|| SessionError::UnknownFormat(s.to_string()))
    }
}

/// Build the exported file name: everything before the last `.` of the
/// original name, then `_converted.<format>`.
///
/// A name without a `.` contributes an empty base.
pub fn converted_name(original: &str, format: OutputFormat) -> String {
    let base = original.rfind('.').map(|i| &original[..i]).unwrap_or("");
    format!("{}_converted.{}", base, format.extension())
}

/// The `n`-th alternative for a taken file name, the way browsers number
/// downloads: `a_converted.pdf` becomes `a_converted (1).pdf`.
pub fn numbered_name(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(i) if i > 0 => format!("{} ({}){}", &name[..i], n, &name[i..]),
        _ => format!("{} ({})", name, n),
    }
}

/// Text written into every exported file
pub fn placeholder_content(file_name: &str) -> String {
    format!("This is a demo file: {}", file_name)
}
