//! Viewport Transform
//!
//! Pan/zoom state of the chart canvas and placement of the floating node form.
//! Screen = canvas * scale + (x, y).

use super::CanvasExtent;
use serde::{Deserialize, Serialize};

pub const ZOOM_STEP: f64 = 0.15;
pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 2.0;

/// Margin kept around the chart by `fit_to`, summed over both sides
const FIT_MARGIN: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Translation plus uniform scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 40.0,
            y: 40.0,
            scale: 1.0,
        }
    }
}

fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

impl Viewport {
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn zoom_in(&mut self) {
        self.scale = clamp_scale(self.scale + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.scale = clamp_scale(self.scale - ZOOM_STEP);
    }

    /// Mouse wheel: scrolling up (negative delta) zooms in
    pub fn zoom_wheel(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.zoom_in();
        } else {
            self.zoom_out();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale the whole canvas into the container and centre it
    pub fn fit_to(&mut self, container_width: f64, container_height: f64, extent: CanvasExtent) {
        let scale_x = (container_width - FIT_MARGIN) / extent.width;
        let scale_y = (container_height - FIT_MARGIN) / extent.height;
        let scale = clamp_scale(scale_x.min(scale_y).min(MAX_SCALE));
        self.scale = scale;
        self.x = (container_width - extent.width * scale) / 2.0;
        self.y = (container_height - extent.height * scale) / 2.0;
    }

    pub fn canvas_to_screen(&self, point: Point) -> Point {
        Point::new(point.x * self.scale + self.x, point.y * self.scale + self.y)
    }

    pub fn screen_to_canvas(&self, point: Point) -> Point {
        Point::new((point.x - self.x) / self.scale, (point.y - self.y) / self.scale)
    }
}

/// Bounding box of a clicked card control, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ScreenRect {
    /// The form opens just right of the control, level with its top edge
    pub fn form_anchor(&self) -> Point {
        Point::new(self.right + 12.0, self.top)
    }
}

/// Floating form dimensions used to keep it inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormPlacement {
    pub width: f64,
    /// Estimated; the real height depends on the chosen mode
    pub height: f64,
    pub margin: f64,
}

impl Default for FormPlacement {
    fn default() -> Self {
        Self {
            width: 340.0,
            height: 500.0,
            margin: 8.0,
        }
    }
}

impl FormPlacement {
    /// Top-left corner for the form so it stays on screen
    pub fn clamp(&self, anchor: Point, viewport_width: f64, viewport_height: f64) -> Point {
        let left = anchor
            .x
            .max(self.margin)
            .min(viewport_width - self.width - self.margin);
        let top = (anchor.y - 20.0)
            .max(self.margin)
            .min(viewport_height - self.height);
        Point::new(left, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.scale, MAX_SCALE);
        for _ in 0..20 {
            viewport.zoom_wheel(120.0);
        }
        assert_eq!(viewport.scale, MIN_SCALE);

        viewport.zoom_wheel(-1.0);
        assert!(approx(viewport.scale, MIN_SCALE + ZOOM_STEP));
    }

    #[test]
    fn test_pan_and_reset() {
        let mut viewport = Viewport::default();
        viewport.pan_by(15.0, -5.0);
        viewport.zoom_out();
        assert_eq!((viewport.x, viewport.y), (55.0, 35.0));

        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_fit_to_centres_canvas() {
        let mut viewport = Viewport::default();
        let extent = CanvasExtent {
            width: 1000.0,
            height: 500.0,
        };
        viewport.fit_to(580.0, 1080.0, extent);
        assert!(approx(viewport.scale, 0.5));
        assert!(approx(viewport.x, 40.0));
        assert!(approx(viewport.y, 415.0));
    }

    #[test]
    fn test_fit_to_never_leaves_scale_range() {
        let mut viewport = Viewport::default();
        let tiny = CanvasExtent {
            width: 10.0,
            height: 10.0,
        };
        viewport.fit_to(1000.0, 1000.0, tiny);
        assert_eq!(viewport.scale, MAX_SCALE);

        let huge = CanvasExtent {
            width: 100_000.0,
            height: 100_000.0,
        };
        viewport.fit_to(1000.0, 1000.0, huge);
        assert_eq!(viewport.scale, MIN_SCALE);
    }

    #[test]
    fn test_screen_canvas_round_trip() {
        let viewport = Viewport {
            x: 12.0,
            y: -30.0,
            scale: 1.45,
        };
        let point = Point::new(321.0, 77.5);
        let back = viewport.screen_to_canvas(viewport.canvas_to_screen(point));
        assert!(approx(back.x, point.x));
        assert!(approx(back.y, point.y));
    }

    #[test]
    fn test_form_anchor_and_clamp() {
        let rect = ScreenRect {
            left: 900.0,
            top: 10.0,
            right: 920.0,
            bottom: 30.0,
        };
        let anchor = rect.form_anchor();
        assert_eq!(anchor, Point::new(932.0, 10.0));

        let placed = FormPlacement::default().clamp(anchor, 1024.0, 768.0);
        assert_eq!(placed, Point::new(676.0, 8.0));

        let low = FormPlacement::default().clamp(Point::new(2.0, 700.0), 1024.0, 768.0);
        assert_eq!(low, Point::new(8.0, 268.0));
    }
}
