use crate::{
    classify::gradient::Gradient,
    data::dataset::Paint,
    foundation::error::{GeoLayerError, GeoLayerResult},
};

/// Palette used for generated buckets when no gradient is configured.
pub const DEFAULT_CHOROPLETH_PALETTE: [&str; 7] = [
    "rgba(255, 255, 0, 0.8)",
    "rgba(253, 98, 104, 0.8)",
    "rgba(255, 146, 149, 0.8)",
    "rgba(255, 241, 193, 0.8)",
    "rgba(110, 176, 253, 0.8)",
    "rgba(52, 139, 251, 0.8)",
    "rgba(17, 102, 252, 0.8)",
];

/// Upper bound (inclusive) of one bucket and the color it maps to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    pub end: f64,
    #[serde(alias = "value")]
    pub color: String,
}

/// Ordered-breakpoint classifier.
///
/// A value belongs to the first bucket whose `end` is `>= value`; values past the last
/// breakpoint fall into the last bucket. A value equal to a breakpoint therefore belongs
/// to the lower bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Choropleth {
    breakpoints: Vec<Breakpoint>, // ascending by end
}

impl Choropleth {
    pub fn new(breakpoints: Vec<Breakpoint>) -> GeoLayerResult<Self> {
        if breakpoints.iter().any(|b| !b.end.is_finite()) {
            return Err(GeoLayerError::validation(
                "choropleth breakpoints must be finite",
            ));
        }
        if !breakpoints.windows(2).all(|w| w[0].end < w[1].end) {
            return Err(GeoLayerError::validation(
                "choropleth breakpoints must be strictly ascending",
            ));
        }
        Ok(Self { breakpoints })
    }

    /// Seven evenly sized buckets over `[min, max]`. Colors come from `gradient` when given,
    /// otherwise from [`DEFAULT_CHOROPLETH_PALETTE`].
    pub fn generate_by_min_max(min: f64, max: f64, gradient: Option<&Gradient>) -> Self {
        let n = DEFAULT_CHOROPLETH_PALETTE.len();
        let color_at = |i: usize| -> String {
            match gradient {
                Some(g) => {
                    let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 1.0 };
                    g.sample(t).to_string()
                }
                None => DEFAULT_CHOROPLETH_PALETTE[i].to_owned(),
            }
        };

        if !min.is_finite() || !max.is_finite() {
            tracing::warn!(min, max, "non-finite choropleth range; leaving unconfigured");
            return Self::default();
        }
        if max <= min {
            return Self {
                breakpoints: vec![Breakpoint {
                    end: max,
                    color: color_at(0),
                }],
            };
        }

        let step = (max - min) / n as f64;
        let breakpoints = (0..n)
            .map(|i| Breakpoint {
                end: if i + 1 == n {
                    max
                } else {
                    min + step * (i + 1) as f64
                },
                color: color_at(i),
            })
            .collect();

        tracing::debug!(min, max, buckets = n, "generated choropleth breakpoints");
        Self { breakpoints }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn is_configured(&self) -> bool {
        !self.breakpoints.is_empty()
    }

    /// Index of the bucket `value` falls into.
    pub fn bucket_index(&self, value: f64) -> Option<usize> {
        if self.breakpoints.is_empty() || value.is_nan() {
            return None;
        }
        let idx = self.breakpoints.partition_point(|b| b.end < value);
        Some(idx.min(self.breakpoints.len() - 1))
    }

    pub fn get(&self, value: Option<f64>) -> Paint {
        value
            .and_then(|v| self.bucket_index(v))
            .map_or(Paint::Unstyled, |i| {
                Paint::Color(self.breakpoints[i].color.clone())
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/choropleth.rs"]
mod tests;
