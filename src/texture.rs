use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::PixelSurface;

/// GPU copy of the drawing surface. Re-uploaded only after the surface was
/// marked dirty.
pub struct SurfaceTexture {
    handle: Option<TextureHandle>,
    dirty: bool,
    uploads: u64,
}

impl Default for SurfaceTexture {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceTexture {
    pub fn new() -> Self {
        Self {
            handle: None,
            dirty: true,
            uploads: 0,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn upload_count(&self) -> u64 {
        self.uploads
    }

    /// Texture for this frame, uploading the surface first if needed.
    /// Returns `None` while the surface is not initialized.
    pub fn texture_id(&mut self, ctx: &Context, surface: &PixelSurface) -> Option<TextureId> {
        if !surface.is_initialized() {
            return None;
        }

        let stale_size = self
            .handle
            .as_ref()
            .is_some_and(|handle| handle.size() != [surface.width() as usize, surface.height() as usize]);

        if self.dirty || stale_size || self.handle.is_none() {
            let image = color_image(surface);
            match &mut self.handle {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => self.handle = Some(ctx.load_texture("drawing_surface", image, TextureOptions::NEAREST)),
            }
            self.dirty = false;
            self.uploads += 1;
        }

        self.handle.as_ref().map(TextureHandle::id)
    }
}

fn color_image(surface: &PixelSurface) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([surface.width() as usize, surface.height() as usize], surface.as_raw())
}
