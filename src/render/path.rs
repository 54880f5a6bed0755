use crate::{
    data::dataset::{Dataset, Feature},
    data::geometry::{Geometry, Position},
    foundation::core::Point,
    layer::options::LayerOptions,
    render::context::RenderContext,
};

/// Draws one feature's geometry into the context's current path.
///
/// The main draw pass and the hit tester use the same renderer, so what is hit is what
/// was drawn.
pub trait PathRenderer {
    fn draw(&self, ctx: &mut dyn RenderContext, feature: &Feature, options: &LayerOptions);
}

/// Options handed to a [`GridRenderer`] for one draw cycle.
#[derive(Clone, Copy, Debug)]
pub struct DrawOptions<'a> {
    pub layer: &'a LayerOptions,
    /// Pixel origin of the dataset's viewport.
    pub offset: Point,
    /// Animation step being drawn, for time-windowed renderers.
    pub step: Option<f64>,
}

/// Bulk renderer for a whole annotated dataset.
pub trait GridRenderer {
    fn draw(&mut self, ctx: &mut dyn RenderContext, dataset: &Dataset, options: &DrawOptions<'_>);
}

/// Maps dataset coordinates to CSS pixels.
pub trait Projection {
    fn project(&self, position: Position) -> Point;
}

/// Coordinates are already pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelSpace;

impl Projection for PixelSpace {
    fn project(&self, [x, y]: Position) -> Point {
        Point::new(x, y)
    }
}

impl<F> Projection for F
where
    F: Fn(Position) -> Point,
{
    fn project(&self, position: Position) -> Point {
        self(position)
    }
}

/// Default path renderer: points as circles, lines as polylines, polygons as closed rings.
#[derive(Clone, Debug, Default)]
pub struct SimplePath<P = PixelSpace> {
    projection: P,
}

impl<P: Projection> SimplePath<P> {
    pub fn new(projection: P) -> Self {
        Self { projection }
    }

    fn point(&self, ctx: &mut dyn RenderContext, p: Position, radius: f64) {
        let c = self.projection.project(p);
        ctx.move_to(Point::new(c.x + radius, c.y));
        ctx.arc(c, radius);
    }

    fn polyline(&self, ctx: &mut dyn RenderContext, positions: &[Position], close: bool) {
        let Some((first, rest)) = positions.split_first() else {
            return;
        };
        ctx.move_to(self.projection.project(*first));
        for p in rest {
            ctx.line_to(self.projection.project(*p));
        }
        if close {
            ctx.close_path();
        }
    }
}

impl<P: Projection> PathRenderer for SimplePath<P> {
    fn draw(&self, ctx: &mut dyn RenderContext, feature: &Feature, options: &LayerOptions) {
        ctx.set_line_width(options.line_width);
        let radius = feature.size.unwrap_or(options.size);
        match &feature.geometry {
            Geometry::Point(p) => self.point(ctx, *p, radius),
            Geometry::MultiPoint(ps) => {
                for p in ps {
                    self.point(ctx, *p, radius);
                }
            }
            Geometry::LineString(line) => self.polyline(ctx, line, false),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.polyline(ctx, line, false);
                }
            }
            Geometry::Polygon(rings) => {
                for ring in rings {
                    self.polyline(ctx, ring, true);
                }
            }
            Geometry::MultiPolygon(polys) => {
                for ring in polys.iter().flatten() {
                    self.polyline(ctx, ring, true);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/path.rs"]
mod tests;
