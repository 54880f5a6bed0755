use crate::{
    data::dataset::{Dataset, Feature},
    foundation::core::{Point, to_device_pixel},
    layer::options::LayerOptions,
    render::{context::RenderContext, path::PathRenderer},
};

/// Index of the first feature whose drawn path contains `pixel`.
///
/// `pixel` is in CSS pixels and is scaled by `device_pixel_ratio` before testing. Area
/// geometries are tested against their fill; everything else against the stroke, which a
/// context without stroke support never matches. Features are visited in dataset order,
/// so the earliest overlapping feature wins.
#[tracing::instrument(
    level = "debug",
    skip(ctx, renderer, dataset, options),
    fields(features = dataset.len())
)]
pub fn hit_test_index(
    ctx: &mut dyn RenderContext,
    renderer: &dyn PathRenderer,
    dataset: &Dataset,
    options: &LayerOptions,
    pixel: Point,
    device_pixel_ratio: f64,
) -> Option<usize> {
    let device_pt = to_device_pixel(pixel, device_pixel_ratio);
    dataset.get().iter().position(|feature| {
        ctx.begin_path();
        renderer.draw(ctx, feature, options);
        if feature.geometry.is_polygonal() {
            ctx.is_point_in_path(device_pt)
        } else {
            ctx.is_point_in_stroke(device_pt).unwrap_or(false)
        }
    })
}

pub fn hit_test<'a>(
    ctx: &mut dyn RenderContext,
    renderer: &dyn PathRenderer,
    dataset: &'a Dataset,
    options: &LayerOptions,
    pixel: Point,
    device_pixel_ratio: f64,
) -> Option<&'a Feature> {
    hit_test_index(ctx, renderer, dataset, options, pixel, device_pixel_ratio)
        .and_then(|i| dataset.get().get(i))
}

#[cfg(test)]
#[path = "../../tests/unit/hit/tester.rs"]
mod tests;
