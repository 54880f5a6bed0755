use crate::{
    classify::classifiers::Classifiers,
    data::dataset::{Feature, Paint},
    layer::options::{DrawMode, StyleType},
};

/// Recompute derived `size` / style attributes for every feature, in place.
///
/// Applies to `bubble`, `intensity`, `category`, `choropleth` and `simple`; `heatmap` and
/// `time` are styled by the grid renderer and leave features untouched. Each pass starts
/// from cleared derived fields, so size and color classification never coexist on a feature
/// and repeated passes over the same input produce the same output.
#[tracing::instrument(level = "debug", skip(data, classifiers), fields(features = data.len()))]
pub fn process(
    data: &mut [Feature],
    draw: DrawMode,
    style_type: StyleType,
    classifiers: &Classifiers,
) {
    let classify: fn(&Classifiers, Option<f64>) -> Option<Paint> = match draw {
        DrawMode::Heatmap | DrawMode::Time => return,
        DrawMode::Bubble | DrawMode::Simple => |_, _| None,
        DrawMode::Intensity => |c, v| Some(c.intensity.get_color(v)),
        DrawMode::Category => |c, v| Some(c.category.get(v)),
        DrawMode::Choropleth => |c, v| Some(c.choropleth.get(v)),
    };

    for feature in data.iter_mut() {
        feature.clear_derived();

        if draw == DrawMode::Bubble {
            feature.size = Some(classifiers.intensity.get_size(feature.count));
        }

        let Some(paint) = classify(classifiers, feature.count) else {
            continue;
        };
        if feature.geometry.is_line() || style_type == StyleType::Stroke {
            feature.stroke_style = Some(paint);
        } else {
            feature.fill_style = Some(paint);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/processor.rs"]
mod tests;
