use std::fmt;

use crate::{
    classify::legend::{LegendDescriptor, LegendEntry},
    data::dataset::{Dataset, Paint},
};

/// Label of the catch-all entry in a category split list.
pub const OTHER_LABEL: &str = "other";

/// Palette used when categories are generated from data and no `color` option is set.
pub const DEFAULT_CATEGORY_PALETTE: [&str; 7] = [
    "rgba(255, 255, 0, 0.8)",
    "rgba(253, 98, 104, 0.8)",
    "rgba(255, 146, 149, 0.8)",
    "rgba(255, 241, 193, 0.8)",
    "rgba(110, 176, 253, 0.8)",
    "rgba(52, 139, 251, 0.8)",
    "rgba(17, 102, 252)",
];

/// Key of a category entry: a numeric value, or a label such as `"other"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CategoryKey {
    Value(f64),
    Label(String),
}

impl CategoryKey {
    fn matches(&self, v: f64) -> bool {
        match self {
            Self::Value(k) => *k == v,
            // Numeric labels ("10") compare by value.
            Self::Label(l) => l.trim().parse::<f64>().is_ok_and(|k| k == v),
        }
    }

    fn is_other(&self) -> bool {
        matches!(self, Self::Label(l) if l == OTHER_LABEL)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Label(l) => f.write_str(l),
        }
    }
}

/// One `value -> color` entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryEntry {
    pub value: CategoryKey,
    pub color: String,
}

/// Discrete classifier: exact-match lookup from value to color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Category {
    entries: Vec<CategoryEntry>,
    other: Option<String>,
}

impl Category {
    /// Build from an explicit split list. An entry keyed `"other"` becomes the fallback for
    /// unmatched values.
    pub fn new(split_list: Vec<CategoryEntry>) -> Self {
        let mut out = Self::default();
        for entry in split_list {
            if entry.value.is_other() {
                out.other = Some(entry.color);
            } else {
                out.entries.push(entry);
            }
        }
        out
    }

    /// Assign palette colors to the dataset's distinct counts in first-seen order, keeping
    /// the last palette color for `"other"`.
    pub fn generate_by_dataset(dataset: &Dataset, palette: Option<&[String]>) -> Self {
        let colors: Vec<String> = match palette {
            Some(p) => p.to_vec(),
            None => DEFAULT_CATEGORY_PALETTE
                .iter()
                .map(|c| (*c).to_owned())
                .collect(),
        };
        let Some(last) = colors.last().cloned() else {
            tracing::warn!("empty category palette; category colors stay unconfigured");
            return Self::default();
        };

        let mut entries: Vec<CategoryEntry> = Vec::new();
        for v in dataset.get().iter().filter_map(|f| f.value("count")) {
            if entries.len() + 1 >= colors.len() {
                break;
            }
            if !entries.iter().any(|e| e.value.matches(v)) {
                entries.push(CategoryEntry {
                    value: CategoryKey::Value(v),
                    color: colors[entries.len()].clone(),
                });
            }
        }

        tracing::debug!(categories = entries.len(), "generated categories from dataset");
        Self {
            entries,
            other: Some(last),
        }
    }

    /// True when at least one entry or a fallback exists.
    pub fn is_configured(&self) -> bool {
        !self.entries.is_empty() || self.other.is_some()
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn other(&self) -> Option<&str> {
        self.other.as_deref()
    }

    /// Color for `value`: exact match first, then the `"other"` fallback, else unstyled.
    pub fn get(&self, value: Option<f64>) -> Paint {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            return Paint::Unstyled;
        };
        self.entries
            .iter()
            .find(|e| e.value.matches(v))
            .map(|e| e.color.clone())
            .or_else(|| self.other.clone())
            .map_or(Paint::Unstyled, Paint::Color)
    }

    pub fn legend(&self) -> LegendDescriptor {
        let mut entries: Vec<LegendEntry> = self
            .entries
            .iter()
            .map(|e| LegendEntry {
                label: e.value.to_string(),
                color: e.color.clone(),
            })
            .collect();
        if let Some(other) = &self.other {
            entries.push(LegendEntry {
                label: OTHER_LABEL.to_owned(),
                color: other.clone(),
            });
        }
        LegendDescriptor::Swatches { entries }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/category.rs"]
mod tests;
