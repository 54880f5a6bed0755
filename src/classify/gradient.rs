use std::collections::BTreeMap;

use crate::foundation::{
    color::Rgba8,
    error::{GeoLayerError, GeoLayerResult},
};

/// One color stop of a continuous gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f64,
    pub color: Rgba8,
}

/// Continuous color ramp sampled by normalized position.
///
/// Serialized the way layer options spell it: an object mapping offsets to CSS colors,
/// e.g. `{"0.25": "rgba(0, 0, 255, 1)", "1.0": "#ff0000"}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Rgba8>",
    into = "BTreeMap<String, Rgba8>"
)]
pub struct Gradient {
    stops: Vec<GradientStop>, // sorted by offset
}

impl Gradient {
    pub fn new(mut stops: Vec<GradientStop>) -> GeoLayerResult<Self> {
        if stops.is_empty() {
            return Err(GeoLayerError::validation("gradient needs at least one stop"));
        }
        if let Some(bad) = stops
            .iter()
            .find(|s| !s.offset.is_finite() || !(0.0..=1.0).contains(&s.offset))
        {
            return Err(GeoLayerError::validation(format!(
                "gradient offset {} is outside [0, 1]",
                bad.offset
            )));
        }
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at normalized position `t`.
    ///
    /// Positions before the first stop take the first stop's color, positions after the last
    /// take the last stop's color; in between, RGBA is interpolated channel-wise between the
    /// two bracketing stops.
    pub fn sample(&self, t: f64) -> Rgba8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        let idx = self.stops.partition_point(|s| s.offset <= t);
        let a = self.stops[idx - 1];
        let b = self.stops[idx];
        let denom = b.offset - a.offset;
        if denom <= 0.0 {
            return b.color;
        }
        Rgba8::lerp(a.color, b.color, (t - a.offset) / denom)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            stops: vec![
                GradientStop {
                    offset: 0.25,
                    color: Rgba8::new(0, 0, 255, 255),
                },
                GradientStop {
                    offset: 0.55,
                    color: Rgba8::new(0, 255, 0, 255),
                },
                GradientStop {
                    offset: 0.85,
                    color: Rgba8::new(255, 255, 0, 255),
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgba8::new(255, 0, 0, 255),
                },
            ],
        }
    }
}

impl TryFrom<BTreeMap<String, Rgba8>> for Gradient {
    type Error = GeoLayerError;

    fn try_from(map: BTreeMap<String, Rgba8>) -> Result<Self, Self::Error> {
        let stops = map
            .into_iter()
            .map(|(k, color)| {
                let offset = k.trim().parse::<f64>().map_err(|_| {
                    GeoLayerError::validation(format!("gradient key \"{k}\" is not a number"))
                })?;
                Ok(GradientStop { offset, color })
            })
            .collect::<GeoLayerResult<Vec<_>>>()?;
        Self::new(stops)
    }
}

impl From<Gradient> for BTreeMap<String, Rgba8> {
    fn from(g: Gradient) -> Self {
        g.stops
            .into_iter()
            .map(|s| (s.offset.to_string(), s.color))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/gradient.rs"]
mod tests;
