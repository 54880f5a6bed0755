use crate::foundation::error::{GeoLayerError, GeoLayerResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Numeric span a time animation steps through, from `start` towards `end`.
///
/// `start > end` is allowed and steps backwards.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepRange {
    pub start: f64,
    pub end: f64,
}

impl StepRange {
    pub fn new(start: f64, end: f64) -> GeoLayerResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(GeoLayerError::validation("StepRange bounds must be finite"));
        }
        Ok(Self { start, end })
    }

    pub fn span(self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.span() == 0.0
    }

    /// Step at normalized position `t` (not clamped).
    pub fn lerp(self, t: f64) -> f64 {
        self.start + self.span() * t
    }

    /// Normalized position of `step` in the range, clamped to `[0, 1]`.
    pub fn phase_of(self, step: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        ((step - self.start) / self.span()).clamp(0.0, 1.0)
    }
}

/// Scale a CSS pixel into device pixels.
pub fn to_device_pixel(pixel: Point, device_pixel_ratio: f64) -> Point {
    Point::new(pixel.x * device_pixel_ratio, pixel.y * device_pixel_ratio)
}
