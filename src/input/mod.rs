use egui::{Context, Pos2, Rect};

mod gestures;
mod router;

pub use gestures::{GestureSession, GestureState};
pub use router::route_event;

/// Pointer input already converted into surface pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed on the surface
    PointerDown { position: Pos2 },
    /// Pointer moved while the button is held
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
    /// Pointer left the surface
    PointerLeave,
}

/// Maps display coordinates (where the surface is shown, possibly scaled)
/// onto surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    /// Where the surface is drawn on screen
    pub display: Rect,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl SurfaceMapping {
    pub fn new(display: Rect, surface_width: u32, surface_height: u32) -> Self {
        Self {
            display,
            surface_width,
            surface_height,
        }
    }

    pub fn scale(&self) -> (f32, f32) {
        if self.display.width() <= 0.0 || self.display.height() <= 0.0 {
            return (1.0, 1.0);
        }
        (
            self.surface_width as f32 / self.display.width(),
            self.surface_height as f32 / self.display.height(),
        )
    }

    pub fn to_surface(&self, pos: Pos2) -> Pos2 {
        let (scale_x, scale_y) = self.scale();
        Pos2::new(
            (pos.x - self.display.min.x) * scale_x,
            (pos.y - self.display.min.y) * scale_y,
        )
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.display.contains(pos)
    }
}

/// Turns raw egui pointer state into [`InputEvent`]s for one canvas
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    active: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's pointer input for the canvas at `mapping`
    pub fn process_input(&mut self, ctx: &Context, mapping: &SurfaceMapping) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let (hover, pressed, released, down) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
            )
        });
        let inside = hover.is_some_and(|pos| mapping.contains(pos));

        if !self.active {
            if let (true, true, Some(pos)) = (pressed, inside, hover) {
                events.push(InputEvent::PointerDown {
                    position: mapping.to_surface(pos),
                });
                self.active = true;
            }
        } else if !inside {
            events.push(InputEvent::PointerLeave);
            self.active = false;
        } else if released || !down {
            let pos = hover.or(self.last_pointer_pos).unwrap_or_default();
            events.push(InputEvent::PointerUp {
                position: mapping.to_surface(pos),
            });
            self.active = false;
        } else if let Some(pos) = hover {
            if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove {
                    position: mapping.to_surface(pos),
                });
            }
        }

        self.last_pointer_pos = hover;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_mapping_scales_into_surface_space() {
        let mapping = SurfaceMapping::new(Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(200.0, 100.0)), 400, 400);
        assert_eq!(mapping.scale(), (2.0, 4.0));
        assert_eq!(mapping.to_surface(pos2(100.0, 50.0)), pos2(0.0, 0.0));
        assert_eq!(mapping.to_surface(pos2(150.0, 75.0)), pos2(100.0, 100.0));
    }

    #[test]
    fn test_degenerate_display_does_not_divide_by_zero() {
        let mapping = SurfaceMapping::new(Rect::from_min_size(pos2(10.0, 10.0), egui::Vec2::ZERO), 100, 100);
        assert_eq!(mapping.to_surface(pos2(12.0, 13.0)), pos2(2.0, 3.0));
    }
}
