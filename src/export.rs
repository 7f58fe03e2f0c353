use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;

use crate::error::ExportError;
use crate::surface::PixelSurface;

/// Losslessly encode the surface as PNG bytes
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>, ExportError> {
    let mut out = Cursor::new(Vec::new());
    surface.image().write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Wrap the surface in a minimal SVG document: a single `<image>` element
/// holding the PNG as a data URL, stamped with the surface's pixel size.
///
/// Returns `Ok(None)` when the surface has never been sized.
pub fn export_svg(surface: &PixelSurface) -> Result<Option<String>, ExportError> {
    if !surface.is_initialized() {
        log::debug!("Export skipped, surface is not initialized");
        return Ok(None);
    }

    let png = encode_png(surface)?;
    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(&png));
    let (width, height) = (surface.width(), surface.height());

    Ok(Some(format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
  <image width="{width}" height="{height}" href="{data_url}"/>
</svg>"#
    )))
}

/// Write an exported document to disk
pub fn save_svg(path: impl AsRef<Path>, svg: &str) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, svg)?;
    log::info!("Saved {} bytes to {}", svg.len(), path.display());
    Ok(())
}
