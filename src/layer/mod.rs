#[allow(clippy::module_inception)]
pub(crate) mod layer;
pub(crate) mod options;
