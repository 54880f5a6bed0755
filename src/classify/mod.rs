pub(crate) mod category;
pub(crate) mod choropleth;
pub(crate) mod classifiers;
pub(crate) mod gradient;
pub(crate) mod intensity;
pub(crate) mod legend;
