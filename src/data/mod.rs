pub(crate) mod binder;
pub(crate) mod dataset;
pub(crate) mod geometry;
