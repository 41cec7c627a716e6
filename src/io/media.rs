// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo import, decoding, cropping and export.
//!
//! This module handles turning an imported photo into compressed bytes for
//! a project, decoding those bytes for display, and cutting frames out of
//! the original.

use crate::error::MediaError;
use crate::models::crop_rect::CropRect;
use crate::util::geometry::{to_absolute, Size};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Decoded RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

/// Result of importing a photo.
#[derive(Debug, Clone)]
pub struct ImportedPhoto {
    /// JPEG bytes to store in the project.
    pub jpeg: Vec<u8>,
    /// Decoded pixels, ready for display.
    pub buffer: PixelBuffer,
}

/// Outcome of exporting a cropped frame.
#[derive(Debug)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Denied,
    Failed(MediaError),
}

/// Decode a photo in any supported format and re-compress it as JPEG.
pub fn import_photo(bytes: &[u8], quality: u8) -> Result<ImportedPhoto, MediaError> {
    let decoded = image::load_from_memory(bytes)?;
    let jpeg = compress_jpeg(&decoded, quality)?;
    log::info!(
        "Imported photo {}x{} ({} bytes as JPEG)",
        decoded.width(),
        decoded.height(),
        jpeg.len()
    );
    Ok(ImportedPhoto {
        jpeg,
        buffer: decoded.to_rgba8().into(),
    })
}

/// Read and import a photo from disk.
pub fn import_photo_file(path: &Path, quality: u8) -> Result<ImportedPhoto, MediaError> {
    let bytes = std::fs::read(path)?;
    import_photo(&bytes, quality)
}

/// Decode a project's stored original.
pub fn load_original(bytes: &[u8]) -> Result<PixelBuffer, MediaError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8().into())
}

/// Encode an image as JPEG. Alpha is dropped, since JPEG has none.
pub fn compress_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, MediaError> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).encode_image(&rgb)?;
    Ok(bytes)
}

/// Cut a normalized rectangle out of a buffer.
///
/// The rectangle is projected to pixels, rounded and clipped to the image;
/// an empty intersection is an error.
pub fn crop(buffer: &PixelBuffer, rect: &CropRect) -> Result<PixelBuffer, MediaError> {
    let px = to_absolute(rect, buffer.size());
    let x0 = px.x.max(0.0).round();
    let y0 = px.y.max(0.0).round();
    let x1 = px.right().min(buffer.width() as f64).round();
    let y1 = px.bottom().min(buffer.height() as f64).round();
    if !(x1 > x0 && y1 > y0) {
        return Err(MediaError::EmptyCrop);
    }

    let cropped = image::imageops::crop_imm(
        &buffer.image,
        x0 as u32,
        y0 as u32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    )
    .to_image();
    Ok(cropped.into())
}

/// Save a cropped frame as PNG into `dir`.
pub fn export_to_library(buffer: &PixelBuffer, dir: &Path, name: &str) -> ExportOutcome {
    match try_export(buffer, dir, name) {
        Ok(path) => {
            log::info!("Exported frame to {}", path.display());
            ExportOutcome::Saved(path)
        }
        Err(e) if is_permission_denied(&e) => {
            log::warn!("Export to {} denied", dir.display());
            ExportOutcome::Denied
        }
        Err(e) => {
            log::error!("Failed to export frame: {}", e);
            ExportOutcome::Failed(e)
        }
    }
}

fn try_export(buffer: &PixelBuffer, dir: &Path, name: &str) -> Result<PathBuf, MediaError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}.png"));
    buffer.image.save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}

fn is_permission_denied(error: &MediaError) -> bool {
    match error {
        MediaError::Io(e) => e.kind() == ErrorKind::PermissionDenied,
        MediaError::Image(image::ImageError::IoError(e)) => {
            e.kind() == ErrorKind::PermissionDenied
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 128, 255])).into()
    }

    #[test]
    fn test_crop_projects_normalized_rect() {
        let buffer = gradient(200, 100);
        let cropped = crop(&buffer, &CropRect::new(0.25, 0.5, 0.5, 0.5)).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (100, 50));
        // First pixel comes from (50, 50) in the source.
        assert_eq!(&cropped.pixels()[..4], &[50, 50, 128, 255]);
    }

    #[test]
    fn test_crop_empty_intersection_fails() {
        let buffer = gradient(10, 10);
        let outside = CropRect::new(1.2, 0.0, 0.5, 0.5);
        assert!(matches!(crop(&buffer, &outside), Err(MediaError::EmptyCrop)));
    }

    #[test]
    fn test_import_and_load_roundtrip_dimensions() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            48,
            Rgba([200, 30, 30, 255]),
        ));
        let mut png = std::io::Cursor::new(Vec::new());
        source.write_to(&mut png, ImageFormat::Png).unwrap();

        let imported = import_photo(png.get_ref(), 85).unwrap();
        assert_eq!((imported.buffer.width(), imported.buffer.height()), (64, 48));

        let loaded = load_original(&imported.jpeg).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (64, 48));
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(
            import_photo(b"not an image", 80),
            Err(MediaError::Image(_))
        ));
    }

    #[test]
    fn test_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        match export_to_library(&gradient(8, 8), &target, "frame-1") {
            ExportOutcome::Saved(path) => {
                assert!(path.exists());
                assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
