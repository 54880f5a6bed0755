use super::*;
use crate::render::context::{ContextConfig, PathContext};

#[derive(Debug, Default)]
struct Recorder {
    ops: Vec<String>,
}

impl RenderContext for Recorder {
    fn begin_path(&mut self) {
        self.ops.push("begin".into());
    }
    fn move_to(&mut self, p: Point) {
        self.ops.push(format!("M {} {}", p.x, p.y));
    }
    fn line_to(&mut self, p: Point) {
        self.ops.push(format!("L {} {}", p.x, p.y));
    }
    fn close_path(&mut self) {
        self.ops.push("Z".into());
    }
    fn arc(&mut self, center: Point, radius: f64) {
        self.ops.push(format!("A {} {} {radius}", center.x, center.y));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(format!("W {width}"));
    }
    fn is_point_in_path(&self, _device_pt: Point) -> bool {
        false
    }
    fn reset(&mut self, _config: &ContextConfig) {
        self.ops.clear();
    }
}

fn draw(feature: &Feature, options: &LayerOptions) -> Vec<String> {
    let mut rec = Recorder::default();
    SimplePath::new(PixelSpace).draw(&mut rec, feature, options);
    rec.ops
}

#[test]
fn point_uses_option_size_without_derived_size() {
    let f = Feature::new(Geometry::Point([10.0, 20.0]), Some(1.0));
    let ops = draw(&f, &LayerOptions::default());
    assert_eq!(ops, ["W 1", "M 15 20", "A 10 20 5"]);
}

#[test]
fn point_prefers_derived_size() {
    let mut f = Feature::new(Geometry::Point([0.0, 0.0]), Some(1.0));
    f.size = Some(12.0);
    let ops = draw(&f, &LayerOptions::default());
    assert_eq!(ops.last().map(String::as_str), Some("A 0 0 12"));
}

#[test]
fn polygon_rings_are_closed() {
    let ring = vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]];
    let f = Feature::new(Geometry::Polygon(vec![ring.clone(), ring]), None);
    let ops = draw(&f, &LayerOptions::default());
    assert_eq!(ops.iter().filter(|o| *o == "Z").count(), 2);
}

#[test]
fn line_string_stays_open_and_sets_width() {
    let f = Feature::new(Geometry::LineString(vec![[0.0, 0.0], [3.0, 4.0]]), None);
    let options = LayerOptions {
        line_width: 3.0,
        ..LayerOptions::default()
    };
    let ops = draw(&f, &options);
    assert_eq!(ops, ["W 3", "M 0 0", "L 3 4"]);
}

#[test]
fn empty_parts_draw_nothing() {
    let f = Feature::new(Geometry::MultiLineString(vec![vec![]]), None);
    assert_eq!(draw(&f, &LayerOptions::default()), ["W 1"]);
}

#[test]
fn closure_projection_is_applied() {
    let renderer = SimplePath::new(|[x, y]: Position| Point::new(x * 2.0, y + 1.0));
    let f = Feature::new(Geometry::LineString(vec![[1.0, 1.0], [2.0, 2.0]]), None);
    let mut rec = Recorder::default();
    renderer.draw(&mut rec, &f, &LayerOptions::default());
    assert_eq!(rec.ops, ["W 1", "M 2 2", "L 4 3"]);
}

#[test]
fn drawn_polygon_is_hit_on_a_path_context() {
    let ring = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
    let f = Feature::new(Geometry::Polygon(vec![ring]), None);
    let mut ctx = PathContext::new(1.0);
    SimplePath::new(PixelSpace).draw(&mut ctx, &f, &LayerOptions::default());
    assert!(ctx.is_point_in_path(Point::new(5.0, 5.0)));
}
