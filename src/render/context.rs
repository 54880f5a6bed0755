use kurbo::{Affine, BezPath, Circle, ParamCurveNearest, Point, Shape};

/// Canvas state the layer restores before a full redraw.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    pub global_alpha: f64,
    pub global_composite_operation: String,
    pub image_smoothing_enabled: bool,
    pub stroke_style: String,
    pub fill_style: String,
    pub shadow_offset_x: f64,
    pub shadow_offset_y: f64,
    pub shadow_blur: f64,
    pub shadow_color: String,
    pub line_width: f64,
    pub line_cap: String,
    pub line_join: String,
    pub miter_limit: f64,
    pub line_dash_offset: f64,
    pub font: String,
    pub text_align: String,
    pub text_baseline: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            global_composite_operation: "source-over".to_owned(),
            image_smoothing_enabled: true,
            stroke_style: "#000000".to_owned(),
            fill_style: "#000000".to_owned(),
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            shadow_blur: 0.0,
            shadow_color: "rgba(0, 0, 0, 0)".to_owned(),
            line_width: 1.0,
            line_cap: "butt".to_owned(),
            line_join: "miter".to_owned(),
            miter_limit: 10.0,
            line_dash_offset: 0.0,
            font: "10px sans-serif".to_owned(),
            text_align: "start".to_owned(),
            text_baseline: "alphabetic".to_owned(),
        }
    }
}

/// The 2D drawing surface the layer, its path renderer and the hit tester share.
///
/// Coordinates passed to the path-building methods are in CSS pixels; hit queries take
/// device pixels, like a browser canvas scaled by its device pixel ratio.
pub trait RenderContext {
    /// Discard the current path.
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    /// Add a full circle as its own subpath.
    fn arc(&mut self, center: Point, radius: f64);
    fn set_line_width(&mut self, width: f64);

    /// Nonzero-winding fill test against the current path.
    fn is_point_in_path(&self, device_pt: Point) -> bool;

    /// Stroke test against the current path. `None` when the surface cannot answer it.
    fn is_point_in_stroke(&self, _device_pt: Point) -> Option<bool> {
        None
    }

    /// Restore drawing state to `config`.
    fn reset(&mut self, config: &ContextConfig);
}

const CIRCLE_TOLERANCE: f64 = 0.1;
const NEAREST_ACCURACY: f64 = 1e-6;

/// Offscreen path context backed by kurbo geometry.
#[derive(Clone, Debug)]
pub struct PathContext {
    path: BezPath,
    transform: Affine,
    config: ContextConfig,
    stroke_hit_testing: bool,
}

impl PathContext {
    pub fn new(device_pixel_ratio: f64) -> Self {
        Self {
            path: BezPath::new(),
            transform: Affine::scale(device_pixel_ratio),
            config: ContextConfig::default(),
            stroke_hit_testing: true,
        }
    }

    /// Model a surface without `isPointInStroke`.
    pub fn without_stroke_hit_testing(mut self) -> Self {
        self.stroke_hit_testing = false;
        self
    }

    /// Current path in device pixels.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    fn device_line_width(&self) -> f64 {
        // Uniform scale: the x basis length is the scale factor.
        let [a, b, ..] = self.transform.as_coeffs();
        self.config.line_width * a.hypot(b)
    }
}

impl RenderContext for PathContext {
    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(self.transform * p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(self.transform * p);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn arc(&mut self, center: Point, radius: f64) {
        let circle = self.transform * Circle::new(center, radius);
        self.path.extend(circle.path_elements(CIRCLE_TOLERANCE));
    }

    fn set_line_width(&mut self, width: f64) {
        self.config.line_width = width;
    }

    fn is_point_in_path(&self, device_pt: Point) -> bool {
        self.path.contains(device_pt)
    }

    fn is_point_in_stroke(&self, device_pt: Point) -> Option<bool> {
        if !self.stroke_hit_testing {
            return None;
        }
        let half = self.device_line_width() / 2.0;
        let hit = self
            .path
            .segments()
            .any(|seg| seg.nearest(device_pt, NEAREST_ACCURACY).distance_sq <= half * half);
        Some(hit)
    }

    fn reset(&mut self, config: &ContextConfig) {
        self.config = config.clone();
        self.path = BezPath::new();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
