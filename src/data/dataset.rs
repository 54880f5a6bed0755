use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::geometry::Geometry;

/// Resolved style for one style slot.
///
/// Classifiers never fail mid-draw: a value they cannot place (no matching category, no
/// configured breakpoints, missing count) resolves to [`Paint::Unstyled`] so callers can
/// branch on it instead of probing for an absent field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    /// CSS color string handed to the renderer.
    Color(String),
    /// No style applies.
    Unstyled,
}

impl Paint {
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Color(c) => Some(c),
            Self::Unstyled => None,
        }
    }

    pub fn is_unstyled(&self) -> bool {
        matches!(self, Self::Unstyled)
    }
}

/// One geographic record.
///
/// `size`, `fill_style` and `stroke_style` are derived by
/// [`crate::process`] on every pass and are never read from input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, serde_json::Value>,

    #[serde(rename = "_size", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(
        rename = "_fillStyle",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_style: Option<Paint>,
    #[serde(
        rename = "_strokeStyle",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_style: Option<Paint>,
}

impl Feature {
    pub fn new(geometry: Geometry, count: Option<f64>) -> Self {
        Self {
            geometry,
            count,
            time: None,
            properties: BTreeMap::new(),
            size: None,
            fill_style: None,
            stroke_style: None,
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    /// Finite numeric value of `field`, if the feature carries one.
    pub fn value(&self, field: &str) -> Option<f64> {
        let v = match field {
            "count" => self.count,
            "time" => self.time,
            other => self.properties.get(other).and_then(serde_json::Value::as_f64),
        };
        v.filter(|v| v.is_finite())
    }

    pub(crate) fn clear_derived(&mut self) {
        self.size = None;
        self.fill_style = None;
        self.stroke_style = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FieldRange {
    min: f64,
    max: f64,
}

/// Ordered features with cached per-field numeric ranges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Feature>", into = "Vec<Feature>")]
pub struct Dataset {
    features: Vec<Feature>,
    ranges: BTreeMap<String, FieldRange>,
}

impl Dataset {
    pub fn new(mut features: Vec<Feature>) -> Self {
        for f in &mut features {
            // Derived attributes are owned by the processor, never by input.
            f.properties.retain(|k, _| !k.starts_with('_'));
        }
        let mut out = Self {
            features,
            ranges: BTreeMap::new(),
        };
        out.reset();
        out
    }

    pub fn get(&self) -> &[Feature] {
        &self.features
    }

    /// Mutable access to the features. Call [`Dataset::reset`] afterwards if source fields
    /// changed so min/max queries see the new values.
    pub fn get_mut(&mut self) -> &mut [Feature] {
        &mut self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get_min(&self, field: &str) -> Option<f64> {
        self.ranges.get(field).map(|r| r.min)
    }

    pub fn get_max(&self, field: &str) -> Option<f64> {
        self.ranges.get(field).map(|r| r.max)
    }

    /// True when at least one feature carries a finite value for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.ranges.contains_key(field)
    }

    /// Re-derive cached ranges from the current features.
    pub fn reset(&mut self) {
        let mut ranges: BTreeMap<String, FieldRange> = BTreeMap::new();
        let mut note = |name: &str, v: f64| {
            ranges
                .entry(name.to_owned())
                .and_modify(|r| {
                    r.min = r.min.min(v);
                    r.max = r.max.max(v);
                })
                .or_insert(FieldRange { min: v, max: v });
        };

        for f in &self.features {
            if let Some(v) = f.value("count") {
                note("count", v);
            }
            if let Some(v) = f.value("time") {
                note("time", v);
            }
            for (k, v) in &f.properties {
                if let Some(v) = v.as_f64().filter(|v| v.is_finite()) {
                    note(k, v);
                }
            }
        }
        self.ranges = ranges;
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }
}

impl From<Vec<Feature>> for Dataset {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

impl From<Dataset> for Vec<Feature> {
    fn from(ds: Dataset) -> Self {
        ds.features
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
