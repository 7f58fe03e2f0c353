//! Contiguous-region flood fill working directly on the surface's RGBA bytes.

use egui::{Color32, Pos2};
use log::debug;

use crate::surface::PixelSurface;

/// Tolerances applied by [`flood_fill`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Per-channel absolute difference (inclusive) for a pixel to join the region
    pub tolerance: u8,
    /// Seed colors closer than this (strictly) to the fill color on every RGB
    /// channel, and fully opaque, make the fill a no-op
    pub noop_tolerance: u8,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            tolerance: 32,
            noop_tolerance: 5,
        }
    }
}

/// Pixel coordinates of a seed point, if it lies on the surface
pub fn seed_pixel(surface: &PixelSurface, seed: Pos2) -> Option<(u32, u32)> {
    if !surface.is_initialized() || !seed.x.is_finite() || !seed.y.is_finite() {
        return None;
    }
    let (x, y) = (seed.x.floor(), seed.y.floor());
    if x < 0.0 || y < 0.0 || x >= surface.width() as f32 || y >= surface.height() as f32 {
        return None;
    }
    Some((x as u32, y as u32))
}

/// True when filling from `seed` would change the surface. Callers use this
/// to decide whether a history snapshot is needed before [`flood_fill`].
pub fn needs_fill(surface: &PixelSurface, seed: Pos2, color: Color32, options: FillOptions) -> bool {
    let Some((x, y)) = seed_pixel(surface, seed) else {
        return false;
    };
    let Some(reference) = surface.pixel(x, y) else {
        return false;
    };
    !already_filled(reference, color, options.noop_tolerance)
}

/// 4-connected flood fill from `seed`, replacing every pixel within
/// `options.tolerance` of the seed color by `color` at full opacity.
///
/// Iterative with an explicit stack, so large regions can not overflow the
/// call stack. Returns true when any pixel changed. History is the caller's
/// concern.
pub fn flood_fill(surface: &mut PixelSurface, seed: Pos2, color: Color32, options: FillOptions) -> bool {
    if !needs_fill(surface, seed, color, options) {
        debug!("Flood fill at {:?} is a no-op", seed);
        return false;
    }
    let Some((seed_x, seed_y)) = seed_pixel(surface, seed) else {
        return false;
    };

    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let fill = [color.r(), color.g(), color.b(), 255];
    let tolerance = options.tolerance;
    let data = surface.as_raw_mut();

    #[inline(always)]
    fn pix(data: &[u8], idx: usize) -> [u8; 4] {
        let o = idx * 4;
        [data[o], data[o + 1], data[o + 2], data[o + 3]]
    }

    #[inline(always)]
    fn matches(p: [u8; 4], reference: [u8; 4], tolerance: u8) -> bool {
        p.iter().zip(reference.iter()).all(|(a, b)| a.abs_diff(*b) <= tolerance)
    }

    let seed_idx = seed_y as usize * width + seed_x as usize;
    let reference = pix(data, seed_idx);

    // one byte per pixel, set when a pixel is queued so it is never queued twice
    let mut visited = vec![0u8; width * height];
    let mut stack: Vec<usize> = Vec::with_capacity(4096);
    visited[seed_idx] = 1;
    stack.push(seed_idx);

    let mut changed = 0usize;
    while let Some(idx) = stack.pop() {
        let o = idx * 4;
        if data[o..o + 4] != fill {
            data[o..o + 4].copy_from_slice(&fill);
            changed += 1;
        }

        let x = idx % width;
        let y = idx / width;
        let mut visit = |ni: usize, data: &[u8]| {
            if visited[ni] == 0 && matches(pix(data, ni), reference, tolerance) {
                visited[ni] = 1;
                stack.push(ni);
            }
        };

        if x > 0 {
            visit(idx - 1, data);
        }
        if x + 1 < width {
            visit(idx + 1, data);
        }
        if y > 0 {
            visit(idx - width, data);
        }
        if y + 1 < height {
            visit(idx + width, data);
        }
    }

    debug!("Flood fill at ({}, {}) changed {} pixels", seed_x, seed_y, changed);
    changed > 0
}

fn already_filled(reference: [u8; 4], color: Color32, noop_tolerance: u8) -> bool {
    reference[0].abs_diff(color.r()) < noop_tolerance
        && reference[1].abs_diff(color.g()) < noop_tolerance
        && reference[2].abs_diff(color.b()) < noop_tolerance
        && reference[3] == 255
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_seed_outside_surface_is_noop() {
        let mut surface = PixelSurface::with_size(10, 10, Color32::WHITE);
        assert!(!flood_fill(&mut surface, pos2(-1.0, 3.0), Color32::RED, FillOptions::default()));
        assert!(!flood_fill(&mut surface, pos2(3.0, 10.0), Color32::RED, FillOptions::default()));
        assert!(surface.as_raw().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_uninitialized_surface_is_noop() {
        let mut surface = PixelSurface::default();
        assert!(!flood_fill(&mut surface, pos2(0.0, 0.0), Color32::RED, FillOptions::default()));
    }

    #[test]
    fn test_near_match_short_circuits() {
        let mut surface = PixelSurface::with_size(4, 4, Color32::from_rgb(252, 2, 1));
        surface.clear();
        assert!(!needs_fill(&surface, pos2(1.0, 1.0), Color32::RED, FillOptions::default()));
        assert!(needs_fill(&surface, pos2(1.0, 1.0), Color32::BLUE, FillOptions::default()));
    }

    #[test]
    fn test_noop_threshold_is_strict() {
        let surface = PixelSurface::with_size(4, 4, Color32::from_rgb(255, 5, 0));
        assert!(needs_fill(&surface, pos2(1.0, 1.0), Color32::RED, FillOptions::default()));

        let surface = PixelSurface::with_size(4, 4, Color32::from_rgb(255, 4, 0));
        assert!(!needs_fill(&surface, pos2(1.0, 1.0), Color32::RED, FillOptions::default()));
    }

    #[test]
    fn test_translucent_seed_is_never_already_filled() {
        let mut surface = PixelSurface::with_size(4, 4, Color32::WHITE);
        let o = (1 * 4 + 1) * 4;
        surface.as_raw_mut()[o..o + 4].copy_from_slice(&[255, 0, 0, 128]);
        assert_eq!(surface.pixel(1, 1), Some([255, 0, 0, 128]));
        assert!(needs_fill(&surface, pos2(1.0, 1.0), Color32::RED, FillOptions::default()));
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        // row 0: seed, then a pixel 32 away on one channel, then one 33 away
        let mut surface = PixelSurface::with_size(3, 1, Color32::WHITE);
        surface.put_pixel(0, 0, Color32::from_rgb(100, 100, 100));
        surface.put_pixel(1, 0, Color32::from_rgb(132, 100, 100));
        surface.put_pixel(2, 0, Color32::from_rgb(100, 100, 133));

        assert!(flood_fill(&mut surface, pos2(0.0, 0.0), Color32::BLACK, FillOptions::default()));
        assert_eq!(surface.pixel(1, 0), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 0), Some([100, 100, 133, 255]));
    }

    #[test]
    fn test_tolerance_absorbs_noisy_pixels() {
        let mut surface = PixelSurface::with_size(8, 8, Color32::WHITE);
        surface.put_pixel(3, 3, Color32::from_rgb(230, 240, 250));
        surface.put_pixel(5, 5, Color32::from_rgb(100, 100, 100));

        assert!(flood_fill(&mut surface, pos2(0.5, 0.5), Color32::RED, FillOptions::default()));
        assert_eq!(surface.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(5, 5), Some([100, 100, 100, 255]));
    }

    #[test]
    fn test_zero_tolerance_requires_exact_match() {
        let mut surface = PixelSurface::with_size(8, 8, Color32::WHITE);
        surface.put_pixel(3, 3, Color32::from_rgb(254, 255, 255));
        let options = FillOptions {
            tolerance: 0,
            ..FillOptions::default()
        };
        assert!(flood_fill(&mut surface, pos2(0.0, 0.0), Color32::BLACK, options));
        assert_eq!(surface.pixel(3, 3), Some([254, 255, 255, 255]));
        assert_eq!(surface.pixel(4, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_is_four_connected() {
        // a diagonal wall does not stop an 8-connected fill but does stop this one
        let mut surface = PixelSurface::with_size(6, 6, Color32::WHITE);
        for i in 0..6 {
            surface.put_pixel(i, 5 - i, Color32::BLACK);
        }
        assert!(flood_fill(&mut surface, pos2(0.0, 0.0), Color32::RED, FillOptions::default()));
        assert_eq!(surface.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_large_region_does_not_overflow() {
        let mut surface = PixelSurface::with_size(1000, 1000, Color32::WHITE);
        assert!(flood_fill(&mut surface, pos2(500.0, 500.0), Color32::BLUE, FillOptions::default()));
        assert_eq!(surface.pixel(999, 0), Some([0, 0, 255, 255]));
    }
}
