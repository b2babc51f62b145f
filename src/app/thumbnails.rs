//! Thumbnail loading for pending files

use super::App;
use crate::mime::MediaKind;
use crate::session::PendingFile;
use crate::theme;
use eframe::egui;
use tracing::debug;

/// Decode an image file into a downscaled RGBA buffer.
/// Returns None for non-images and formats the decoder does not handle (HEIC).
/// Files on disk are read here, so call it off the UI thread.
pub(crate) fn decode_thumbnail(file: &PendingFile) -> Option<egui::ColorImage> {
    if MediaKind::of(&file.mime_type) != MediaKind::Image {
        return None;
    }
    let bytes = match file.source.read() {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(name = %file.name, error = %e, "Failed to read image");
            return None;
        }
    };
    let img = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            debug!(name = %file.name, error = %e, "No preview for image");
            return None;
        }
    };
    let max = theme::THUMBNAIL_MAX_PX;
    let rgba = if img.width() > max || img.height() > max {
        img.thumbnail(max, max).to_rgba8()
    } else {
        img.to_rgba8()
    };
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Some(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

impl App {
    /// Texture for a card, once decoded. The first call for an image queues
    /// the decode on the runtime and returns None until it lands.
    pub fn load_thumbnail(&mut self, ctx: &egui::Context, file: &PendingFile) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.thumbnail_cache.get(&file.id) {
            return cached.clone();
        }

        if MediaKind::of(&file.mime_type) != MediaKind::Image {
            self.thumbnail_cache.insert(file.id, None);
            return None;
        }

        let decoded = self
            .decoded_thumbnails
            .lock()
            .ok()
            .and_then(|mut d| d.remove(&file.id));
        if let Some(image) = decoded {
            self.thumbnail_loading.remove(&file.id);
            let texture = image.map(|image| {
                ctx.load_texture(
                    format!("thumb_{}", file.id),
                    image,
                    egui::TextureOptions::LINEAR,
                )
            });
            self.thumbnail_cache.insert(file.id, texture.clone());
            return texture;
        }

        if self.thumbnail_loading.insert(file.id) {
            let file = file.clone();
            let decoded = self.decoded_thumbnails.clone();
            let ctx = ctx.clone();
            self.runtime.spawn_blocking(move || {
                let image = decode_thumbnail(&file);
                if let Ok(mut d) = decoded.lock() {
                    d.insert(file.id, image);
                }
                ctx.request_repaint();
            });
        }
        None
    }

    /// Drop everything cached or in flight for a file id.
    pub(crate) fn forget_thumbnail(&mut self, id: u64) {
        self.thumbnail_cache.remove(&id);
        self.thumbnail_loading.remove(&id);
        if let Ok(mut d) = self.decoded_thumbnails.lock() {
            d.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FileSource;
    use std::io::Cursor;
    use std::sync::Arc;

    fn pending(name: &str, mime: &str, content: Vec<u8>) -> PendingFile {
        PendingFile {
            id: 1,
            name: name.into(),
            mime_type: mime.into(),
            size: content.len() as u64,
            source: FileSource::Memory(Arc::from(content)),
        }
    }

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn large_images_are_downscaled() {
        let file = pending("big.png", "image/png", png_bytes(1000, 500));
        let thumb = decode_thumbnail(&file).unwrap();
        assert_eq!(thumb.size, [320, 160]);
    }

    #[test]
    fn non_images_have_no_thumbnail() {
        let file = pending("doc.pdf", "application/pdf", png_bytes(4, 4));
        assert!(decode_thumbnail(&file).is_none());
    }

    #[test]
    fn undecodable_images_have_no_thumbnail() {
        let file = pending("IMG_1.heic", "image/heic", b"ftypheic".to_vec());
        assert!(decode_thumbnail(&file).is_none());
    }

    #[test]
    fn images_on_disk_are_read_for_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        std::fs::write(&path, png_bytes(64, 32)).unwrap();
        let file = PendingFile {
            id: 2,
            name: "wide.png".into(),
            mime_type: "image/png".into(),
            size: 0,
            source: FileSource::Disk(path),
        };
        assert_eq!(decode_thumbnail(&file).unwrap().size, [64, 32]);
    }

    #[test]
    fn missing_image_file_has_no_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let file = PendingFile {
            id: 3,
            name: "gone.png".into(),
            mime_type: "image/png".into(),
            size: 0,
            source: FileSource::Disk(dir.path().join("gone.png")),
        };
        assert!(decode_thumbnail(&file).is_none());
    }
}
