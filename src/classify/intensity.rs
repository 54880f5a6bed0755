use crate::{
    classify::gradient::Gradient,
    classify::legend::{LegendDescriptor, LegendOptions},
    data::dataset::Paint,
};

const DEFAULT_LEGEND_WIDTH: f64 = 20.0;
const DEFAULT_LEGEND_HEIGHT: f64 = 180.0;

/// Continuous classifier: value to size and value to gradient color.
#[derive(Clone, Debug, PartialEq)]
pub struct Intensity {
    gradient: Gradient,
    min_size: f64,
    max_size: f64,
    min: f64,
    max: f64,
}

/// Construction parameters for [`Intensity`].
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityConfig {
    pub gradient: Gradient,
    pub min_size: f64,
    pub max_size: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            min_size: 0.0,
            max_size: 35.0,
            min: 0.0,
            max: 100.0,
        }
    }
}

impl Intensity {
    pub fn new(config: IntensityConfig) -> Self {
        Self {
            gradient: config.gradient,
            min_size: config.min_size,
            max_size: config.max_size,
            min: config.min,
            max: config.max,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Normalized position of `value` in `[min, max]`, clamped. A degenerate range puts
    /// every value at the top.
    fn position(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 1.0;
        }
        ((value.clamp(self.min, self.max) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Linear size for `value`; missing values get `min_size`.
    pub fn get_size(&self, value: Option<f64>) -> f64 {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            return self.min_size;
        };
        if self.max <= self.min {
            return self.max_size;
        }
        self.min_size + self.position(v) * (self.max_size - self.min_size)
    }

    /// Gradient color for `value`; missing values are unstyled.
    pub fn get_color(&self, value: Option<f64>) -> Paint {
        match value.filter(|v| !v.is_nan()) {
            Some(v) => Paint::Color(self.gradient.sample(self.position(v)).to_string()),
            None => Paint::Unstyled,
        }
    }

    pub fn legend(&self, options: &LegendOptions) -> LegendDescriptor {
        LegendDescriptor::Gradient {
            stops: self.gradient.stops().to_vec(),
            min: self.min,
            max: self.max,
            width: options.width.unwrap_or(DEFAULT_LEGEND_WIDTH),
            height: options.height.unwrap_or(DEFAULT_LEGEND_HEIGHT),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/intensity.rs"]
mod tests;
