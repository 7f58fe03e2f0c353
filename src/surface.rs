use egui::Color32;
use image::{Rgba, RgbaImage, imageops};
use log::{debug, info};

use crate::error::{PaintError, PaintResult};

/// A full, independent copy of a surface's pixels.
///
/// Snapshots never alias the live buffer, so drawing after a snapshot was
/// taken can not corrupt it.
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    image: RgbaImage,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish_non_exhaustive()
    }
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw RGBA bytes, row-major, origin top-left
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Copy of this snapshot re-laid onto a `width` x `height` background,
    /// content kept at the origin and clipped, the same way a surface resize
    /// treats its live buffer
    pub fn conformed(&self, width: u32, height: u32, background: Color32) -> Snapshot {
        if self.image.dimensions() == (width, height) {
            return self.clone();
        }
        let mut image = RgbaImage::from_pixel(width, height, to_rgba(background));
        imageops::replace(&mut image, &self.image, 0, 0);
        Snapshot { image }
    }
}

/// The addressable RGBA raster every drawing operation writes to.
///
/// Invariant: the buffer always holds exactly `width * height * 4` bytes.
pub struct PixelSurface {
    image: RgbaImage,
    background: Color32,
    initialized: bool,
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::new(Color32::WHITE)
    }
}

impl PixelSurface {
    /// Creates an empty, uninitialized surface. It becomes usable after the
    /// first `resize` to non-zero dimensions.
    pub fn new(background: Color32) -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            background,
            initialized: false,
        }
    }

    /// Creates an initialized surface filled with the background color
    pub fn with_size(width: u32, height: u32, background: Color32) -> Self {
        let mut surface = Self::new(background);
        surface.resize(width, height);
        surface
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// True once the surface has been sized at least once
    pub fn is_initialized(&self) -> bool {
        self.initialized && self.image.width() > 0 && self.image.height() > 0
    }

    /// Reallocates to the new dimensions and fills with the background. If the
    /// surface held content before, it is blitted back at the origin, clipped
    /// to the smaller of the old and new extents.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to zero-sized surface {}x{}", width, height);
            return;
        }

        let mut resized = RgbaImage::from_pixel(width, height, to_rgba(self.background));
        if self.is_initialized() {
            imageops::replace(&mut resized, &self.image, 0, 0);
        }

        info!(
            "Surface resized {}x{} -> {}x{}",
            self.image.width(),
            self.image.height(),
            width,
            height
        );
        self.image = resized;
        self.initialized = true;
    }

    /// Returns a defensive copy of the current buffer
    pub fn read(&self) -> Snapshot {
        Snapshot {
            image: self.image.clone(),
        }
    }

    /// Replaces the buffer contents byte-for-byte. The snapshot must come from
    /// a surface of identical dimensions; otherwise nothing is written.
    pub fn write(&mut self, snapshot: &Snapshot) -> PaintResult<()> {
        if snapshot.dimensions() != self.image.dimensions() {
            return Err(PaintError::SizeMismatch {
                expected: self.image.dimensions(),
                actual: snapshot.dimensions(),
            });
        }

        self.image.copy_from_slice(snapshot.as_raw());
        Ok(())
    }

    /// Paints every pixel with the given color
    pub fn fill(&mut self, color: Color32) {
        let rgba = to_rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Resets the whole surface to its background color
    pub fn clear(&mut self) {
        self.fill(self.background);
    }

    /// RGBA value at (x, y), or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Writes one pixel; coordinates outside the surface are ignored
    #[inline]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Color32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, to_rgba(color));
    }

    /// Raw RGBA bytes, row-major, origin top-left
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[inline]
pub(crate) fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}
