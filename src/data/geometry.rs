use serde::{Deserialize, Serialize};

/// `[lng, lat]` in source space, or `[x, y]` once projected.
pub type Position = [f64; 2];

/// GeoJSON-style geometry, tagged by `type` with its `coordinates`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Single position.
    Point(Position),
    /// Unconnected positions.
    MultiPoint(Vec<Position>),
    /// Open polyline.
    LineString(Vec<Position>),
    /// Several open polylines.
    MultiLineString(Vec<Vec<Position>>),
    /// Outer ring followed by holes.
    Polygon(Vec<Vec<Position>>),
    /// Several polygons.
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// The GeoJSON `type` string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::MultiPoint(_) => "MultiPoint",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// True for area geometries, which hit-test against their fill.
    pub fn is_polygonal(&self) -> bool {
        self.type_name().contains("Polygon")
    }

    /// True for `LineString`, which is styled through the stroke slot.
    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineString(_))
    }

    /// Every position in the geometry, rings and parts flattened in order.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            Self::Point(p) => vec![*p],
            Self::MultiPoint(ps) | Self::LineString(ps) => ps.clone(),
            Self::MultiLineString(parts) | Self::Polygon(parts) => {
                parts.iter().flatten().copied().collect()
            }
            Self::MultiPolygon(polys) => polys.iter().flatten().flatten().copied().collect(),
        }
    }
}
