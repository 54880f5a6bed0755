use serde_json::Value;

use crate::{
    data::dataset::{Dataset, Feature},
    data::geometry::Geometry,
    foundation::error::{GeoLayerError, GeoLayerResult},
};

/// Data handed to a layer: either a ready dataset or raw point records.
#[derive(Clone, Debug)]
pub enum DataInput {
    /// Used as-is; ownership moves to the layer.
    Dataset(Dataset),
    /// Ordered records shaped `{lng, lat, [count_field]: number, ...}`.
    Records(Vec<Value>),
}

impl From<Dataset> for DataInput {
    fn from(ds: Dataset) -> Self {
        Self::Dataset(ds)
    }
}

impl From<Vec<Value>> for DataInput {
    fn from(records: Vec<Value>) -> Self {
        Self::Records(records)
    }
}

/// Options consulted while binding raw records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindOptions {
    /// Record key whose numeric value becomes [`Feature::count`].
    pub count_field: String,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            count_field: "count".to_owned(),
        }
    }
}

/// Normalize `input` into a [`Dataset`].
///
/// Records must carry finite numeric `lng`/`lat`. A missing or non-numeric count is not an
/// error: the feature gets `count = None` and classifies as no-data.
pub fn bind(input: DataInput, options: &BindOptions) -> GeoLayerResult<Dataset> {
    let records = match input {
        DataInput::Dataset(ds) => return Ok(ds),
        DataInput::Records(records) => records,
    };

    let features = records
        .iter()
        .enumerate()
        .map(|(i, record)| bind_record(i, record, &options.count_field))
        .collect::<GeoLayerResult<Vec<_>>>()?;

    tracing::debug!(features = features.len(), "bound raw records");
    Ok(Dataset::new(features))
}

fn bind_record(index: usize, record: &Value, count_field: &str) -> GeoLayerResult<Feature> {
    let obj = record
        .as_object()
        .ok_or_else(|| GeoLayerError::invalid_feature(index, "record is not an object"))?;

    let coord = |key: &str| -> GeoLayerResult<f64> {
        obj.get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                GeoLayerError::invalid_feature(index, format!("missing or non-finite \"{key}\""))
            })
    };
    let lng = coord("lng")?;
    let lat = coord("lat")?;

    let count = obj.get(count_field).and_then(Value::as_f64);
    let mut feature = Feature::new(Geometry::Point([lng, lat]), count);
    feature.time = obj.get("time").and_then(Value::as_f64);
    Ok(feature)
}

#[cfg(test)]
#[path = "../../tests/unit/data/binder.rs"]
mod tests;
