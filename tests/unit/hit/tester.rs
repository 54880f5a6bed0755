use super::*;
use crate::{
    data::geometry::Geometry,
    render::{
        context::PathContext,
        path::{PixelSpace, SimplePath},
    },
};

fn square(x0: f64, y0: f64, side: f64, count: f64) -> Feature {
    let ring = vec![
        [x0, y0],
        [x0 + side, y0],
        [x0 + side, y0 + side],
        [x0, y0 + side],
    ];
    Feature::new(Geometry::Polygon(vec![ring]), Some(count))
}

fn hit(ctx: &mut PathContext, ds: &Dataset, pixel: Point, dpr: f64) -> Option<usize> {
    hit_test_index(
        ctx,
        &SimplePath::new(PixelSpace),
        ds,
        &LayerOptions::default(),
        pixel,
        dpr,
    )
}

#[test]
fn earliest_overlapping_polygon_wins() {
    let ds = Dataset::new(vec![square(0.0, 0.0, 10.0, 1.0), square(5.0, 5.0, 10.0, 2.0)]);
    let mut ctx = PathContext::new(1.0);
    assert_eq!(hit(&mut ctx, &ds, Point::new(7.0, 7.0), 1.0), Some(0));
    assert_eq!(hit(&mut ctx, &ds, Point::new(12.0, 12.0), 1.0), Some(1));
}

#[test]
fn miss_returns_none() {
    let ds = Dataset::new(vec![square(0.0, 0.0, 10.0, 1.0)]);
    let mut ctx = PathContext::new(1.0);
    assert_eq!(hit(&mut ctx, &ds, Point::new(50.0, 50.0), 1.0), None);
    let empty = Dataset::default();
    assert_eq!(hit(&mut ctx, &empty, Point::new(1.0, 1.0), 1.0), None);
}

#[test]
fn pixel_is_scaled_by_device_pixel_ratio() {
    let ds = Dataset::new(vec![square(0.0, 0.0, 10.0, 1.0)]);
    let mut ctx = PathContext::new(2.0);
    assert_eq!(hit(&mut ctx, &ds, Point::new(9.0, 9.0), 2.0), Some(0));
    assert_eq!(hit(&mut ctx, &ds, Point::new(11.0, 11.0), 2.0), None);
}

#[test]
fn lines_and_points_use_the_stroke() {
    let line = Feature::new(Geometry::LineString(vec![[0.0, 20.0], [40.0, 20.0]]), None);
    let point = Feature::new(Geometry::Point([100.0, 100.0]), None);
    let ds = Dataset::new(vec![line, point]);
    let mut ctx = PathContext::new(1.0);
    assert_eq!(hit(&mut ctx, &ds, Point::new(20.0, 20.2), 1.0), Some(0));
    assert_eq!(hit(&mut ctx, &ds, Point::new(105.0, 100.0), 1.0), Some(1));
    // Inside the circle but away from its outline.
    assert_eq!(hit(&mut ctx, &ds, Point::new(100.0, 100.0), 1.0), None);
}

#[test]
fn no_stroke_support_never_matches_lines() {
    let line = Feature::new(Geometry::LineString(vec![[0.0, 5.0], [10.0, 5.0]]), None);
    let ds = Dataset::new(vec![line, square(0.0, 0.0, 10.0, 1.0)]);
    let mut ctx = PathContext::new(1.0).without_stroke_hit_testing();
    assert_eq!(hit(&mut ctx, &ds, Point::new(5.0, 5.0), 1.0), Some(1));
}

#[test]
fn hit_test_returns_the_feature() {
    let ds = Dataset::new(vec![square(0.0, 0.0, 10.0, 7.0)]);
    let mut ctx = PathContext::new(1.0);
    let f = hit_test(
        &mut ctx,
        &SimplePath::new(PixelSpace),
        &ds,
        &LayerOptions::default(),
        Point::new(1.0, 1.0),
        1.0,
    );
    assert_eq!(f.and_then(|f| f.count), Some(7.0));
}
