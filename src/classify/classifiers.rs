use crate::{
    classify::category::Category,
    classify::choropleth::Choropleth,
    classify::intensity::{Intensity, IntensityConfig},
    classify::legend::{LegendDescriptor, LegendOptions},
    data::dataset::Dataset,
    layer::options::{DrawMode, LayerOptions},
};

/// The three classifiers a layer carries, built from its options and data.
#[derive(Clone, Debug, PartialEq)]
pub struct Classifiers {
    pub intensity: Intensity,
    pub category: Category,
    pub choropleth: Choropleth,
}

impl Classifiers {
    /// Build every classifier.
    ///
    /// Intensity always spans `[0, max]`; `min` only seeds choropleth generation. Without a
    /// `splitList`, categories are generated from the dataset's distinct counts and choropleth
    /// buckets from `min`/`max` (falling back to the dataset's count range).
    pub fn from_options(options: &LayerOptions, dataset: &Dataset) -> Self {
        let defaults = IntensityConfig::default();
        let intensity = Intensity::new(IntensityConfig {
            gradient: options.gradient.clone().unwrap_or(defaults.gradient),
            min_size: options.min_size,
            max_size: options.max_size,
            min: defaults.min,
            max: options
                .max
                .or_else(|| dataset.get_max("count"))
                .unwrap_or(defaults.max),
        });

        let category = match &options.split_list {
            None => Category::generate_by_dataset(dataset, options.color.as_deref()),
            Some(split) => split
                .as_categories()
                .map(|entries| Category::new(entries.to_vec()))
                .unwrap_or_default(),
        };

        let choropleth = match &options.split_list {
            None => {
                let min = options.min.or_else(|| dataset.get_min("count"));
                let max = options.max.or_else(|| dataset.get_max("count"));
                match (min, max) {
                    (Some(min), Some(max)) => {
                        Choropleth::generate_by_min_max(min, max, options.gradient.as_ref())
                    }
                    _ => Choropleth::default(),
                }
            }
            Some(split) => split
                .as_breakpoints()
                .and_then(|b| Choropleth::new(b.to_vec()).ok())
                .unwrap_or_default(),
        };

        Self {
            intensity,
            category,
            choropleth,
        }
    }

    /// Legend for `mode`. Modes without a legend path, choropleth included, report
    /// [`LegendDescriptor::Unsupported`].
    pub fn legend(&self, mode: DrawMode, options: &LegendOptions) -> LegendDescriptor {
        match mode {
            DrawMode::Intensity | DrawMode::Heatmap => self.intensity.legend(options),
            DrawMode::Category => self.category.legend(),
            DrawMode::Choropleth
            | DrawMode::Simple
            | DrawMode::Bubble
            | DrawMode::Time => LegendDescriptor::Unsupported {
                mode: mode.as_str().to_owned(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/classifiers.rs"]
mod tests;
