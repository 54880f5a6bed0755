use crate::{
    classify::{
        category::CategoryEntry,
        choropleth::{Breakpoint, Choropleth},
        gradient::Gradient,
    },
    data::binder::BindOptions,
    foundation::core::StepRange,
    foundation::error::{GeoLayerError, GeoLayerResult},
};

const DEFAULT_DURATION_MS: f64 = 5000.0;

/// How a layer turns data into visuals. Closed set; every consumer matches exhaustively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Unstyled geometry.
    #[default]
    Simple,
    /// Point size from value.
    Bubble,
    /// Gradient color from value.
    Intensity,
    /// Discrete color per value.
    Category,
    /// Color per numeric bucket.
    Choropleth,
    /// Density surface, styled by the grid renderer.
    Heatmap,
    /// Time-animated draw.
    Time,
}

impl DrawMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Bubble => "bubble",
            Self::Intensity => "intensity",
            Self::Category => "category",
            Self::Choropleth => "choropleth",
            Self::Heatmap => "heatmap",
            Self::Time => "time",
        }
    }
}

/// Which style slot classification writes when geometry does not force one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    #[default]
    Fill,
    Stroke,
}

/// Explicit classes for category or choropleth modes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SplitList {
    /// Ascending `{end, color}` buckets (choropleth).
    Breakpoints(Vec<Breakpoint>),
    /// `{value, color}` entries (category).
    Categories(Vec<CategoryEntry>),
}

impl SplitList {
    pub fn as_categories(&self) -> Option<&[CategoryEntry]> {
        match self {
            Self::Categories(c) => Some(c),
            Self::Breakpoints(b) if b.is_empty() => Some(&[]),
            Self::Breakpoints(_) => None,
        }
    }

    pub fn as_breakpoints(&self) -> Option<&[Breakpoint]> {
        match self {
            Self::Breakpoints(b) => Some(b),
            Self::Categories(c) if c.is_empty() => Some(&[]),
            Self::Categories(_) => None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_trails() -> f64 {
    10.0
}

/// Time-animation settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationOptions {
    /// `false` turns animation off even when the block is present.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Step span; derived from the dataset's `time` field when absent.
    #[serde(default)]
    pub steps_range: Option<StepRange>,
    /// Cycle length in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Width of the visible time window behind the current step.
    #[serde(default = "default_trails")]
    pub trails: f64,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            steps_range: None,
            duration: None,
            trails: default_trails(),
        }
    }
}

impl AnimationOptions {
    /// Cycle length in milliseconds; unset or non-positive durations fall back to 5s.
    pub fn duration_ms(&self) -> f64 {
        self.duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map_or(DEFAULT_DURATION_MS, |d| d * 1000.0)
    }
}

/// Validated layer configuration. JSON keys follow the camelCase option names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerOptions {
    pub draw: DrawMode,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub split_list: Option<SplitList>,
    pub gradient: Option<Gradient>,
    pub min_size: f64,
    pub max_size: f64,
    /// Point radius for modes that do not size points.
    pub size: f64,
    /// Palette for generated categories.
    pub color: Option<Vec<String>>,
    pub style_type: StyleType,
    pub stroke_style: Option<String>,
    pub line_width: f64,
    /// Heatmap strength, consumed by the grid renderer.
    pub strength: Option<f64>,
    pub animation: Option<AnimationOptions>,
    pub count_field: String,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            draw: DrawMode::Simple,
            min: None,
            max: None,
            split_list: None,
            gradient: None,
            min_size: 0.0,
            max_size: 35.0,
            size: 5.0,
            color: None,
            style_type: StyleType::Fill,
            stroke_style: None,
            line_width: 1.0,
            strength: None,
            animation: None,
            count_field: "count".to_owned(),
        }
    }
}

/// Overrides applied on top of existing options. Absent fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub draw: Option<DrawMode>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub split_list: Option<SplitList>,
    pub gradient: Option<Gradient>,
    pub min_size: Option<f64>,
    pub max_size: Option<f64>,
    pub size: Option<f64>,
    pub color: Option<Vec<String>>,
    pub style_type: Option<StyleType>,
    pub stroke_style: Option<String>,
    pub line_width: Option<f64>,
    pub strength: Option<f64>,
    pub animation: Option<AnimationOptions>,
    pub count_field: Option<String>,
}

impl LayerOptions {
    /// Parse and validate options from JSON.
    pub fn from_json(s: &str) -> GeoLayerResult<Self> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// New options with `patch` applied on top of `self`, validated as a whole.
    pub fn merged(&self, patch: &OptionsPatch) -> GeoLayerResult<Self> {
        let p = patch.clone();
        let out = Self {
            draw: p.draw.unwrap_or(self.draw),
            min: p.min.or(self.min),
            max: p.max.or(self.max),
            split_list: p.split_list.or_else(|| self.split_list.clone()),
            gradient: p.gradient.or_else(|| self.gradient.clone()),
            min_size: p.min_size.unwrap_or(self.min_size),
            max_size: p.max_size.unwrap_or(self.max_size),
            size: p.size.unwrap_or(self.size),
            color: p.color.or_else(|| self.color.clone()),
            style_type: p.style_type.unwrap_or(self.style_type),
            stroke_style: p.stroke_style.or_else(|| self.stroke_style.clone()),
            line_width: p.line_width.unwrap_or(self.line_width),
            strength: p.strength.or(self.strength),
            animation: p.animation.or_else(|| self.animation.clone()),
            count_field: p.count_field.unwrap_or_else(|| self.count_field.clone()),
        };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> GeoLayerResult<()> {
        let finite_non_negative = |name: &str, v: f64| -> GeoLayerResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(GeoLayerError::validation(format!(
                    "{name} must be a finite, non-negative number"
                )));
            }
            Ok(())
        };
        finite_non_negative("minSize", self.min_size)?;
        finite_non_negative("maxSize", self.max_size)?;
        finite_non_negative("size", self.size)?;
        if self.max_size < self.min_size {
            return Err(GeoLayerError::validation("maxSize must be >= minSize"));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(GeoLayerError::validation("lineWidth must be > 0"));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(GeoLayerError::validation("min must be <= max"));
            }
        }
        if self.count_field.is_empty() {
            return Err(GeoLayerError::validation("countField must not be empty"));
        }

        if let Some(split) = &self.split_list {
            match self.draw {
                DrawMode::Category if split.as_categories().is_none() => {
                    return Err(GeoLayerError::validation(
                        "category splitList entries must be {value, color}",
                    ));
                }
                DrawMode::Choropleth => {
                    let breakpoints = split.as_breakpoints().ok_or_else(|| {
                        GeoLayerError::validation(
                            "choropleth splitList entries must be {end, color}",
                        )
                    })?;
                    Choropleth::new(breakpoints.to_vec())?;
                }
                _ => {}
            }
        }

        if let Some(anim) = &self.animation {
            if let Some(d) = anim.duration {
                if !d.is_finite() || d <= 0.0 {
                    return Err(GeoLayerError::animation("animation duration must be > 0"));
                }
            }
            if !anim.trails.is_finite() || anim.trails < 0.0 {
                return Err(GeoLayerError::animation("animation trails must be >= 0"));
            }
            if let Some(r) = anim.steps_range {
                StepRange::new(r.start, r.end)
                    .map_err(|e| GeoLayerError::animation(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// True when an animation block is present and not switched off.
    pub fn is_enabled_time(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.enabled)
    }

    /// True when this configuration asks for a time animator.
    pub fn wants_animator(&self) -> bool {
        let disabled = self.animation.as_ref().is_some_and(|a| !a.enabled);
        !disabled && (self.draw == DrawMode::Time || self.is_enabled_time())
    }

    pub fn bind_options(&self) -> BindOptions {
        BindOptions {
            count_field: self.count_field.clone(),
        }
    }

    /// Non-fatal misuse warnings. Each is also logged.
    pub fn arg_check(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.draw == DrawMode::Heatmap && self.stroke_style.is_some() {
            warnings.push(
                "[heatmap] options.strokeStyle is discarded, use options.strength instead"
                    .to_owned(),
            );
        }
        for w in &warnings {
            tracing::warn!("{w}");
        }
        warnings
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/options.rs"]
mod tests;
