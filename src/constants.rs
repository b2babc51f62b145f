//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "Drop Converter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Thumbnails shown per page
pub const PAGE_SIZE: usize = 5;

/// Delay between consecutive files of a "download all" export
pub const EXPORT_STAGGER: Duration = Duration::from_millis(500);

/// How long the "converting" indicator stays up after files are added
pub const PROCESSING_DELAY: Duration = Duration::from_millis(1000);

/// Names longer than this are shortened on thumbnail cards
pub const CARD_NAME_MAX: usize = 15;
pub const CARD_NAME_KEEP: usize = 12;

/// Numbered names tried before an export gives up on a crowded folder
pub const MAX_NAME_ATTEMPTS: u32 = 1000;
