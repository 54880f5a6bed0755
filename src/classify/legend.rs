use crate::classify::gradient::GradientStop;

/// Size hints for gradient legends.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegendOptions {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Legend swatch for a discrete class.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Renderer-agnostic legend description. Turning it into UI is the host's job.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LegendDescriptor {
    /// Continuous ramp over `[min, max]`.
    Gradient {
        stops: Vec<GradientStop>,
        min: f64,
        max: f64,
        width: f64,
        height: f64,
    },
    /// Discrete swatches in classification order.
    Swatches { entries: Vec<LegendEntry> },
    /// The active draw mode has no legend.
    Unsupported { mode: String },
}

impl LegendDescriptor {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}
