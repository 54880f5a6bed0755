//! Geolayer is the rendering-orchestration core of a map data layer.
//!
//! It binds a geographic dataset to visual attributes through pluggable classifiers, steps
//! the dataset through time with an explicit animation scheduler, and resolves pointer
//! input against the rendered geometry.
//!
//! # Pipeline overview
//!
//! 1. **Bind**: raw `{lng, lat, count}` records or a ready [`Dataset`] become a [`Dataset`]
//!    with cached per-field ranges ([`bind`]).
//! 2. **Classify**: [`Classifiers`] built from [`LayerOptions`] map each feature's count to
//!    a size or a [`Paint`] ([`Intensity`], [`Category`], [`Choropleth`]).
//! 3. **Process**: [`process`] writes the derived `_size` / `_fillStyle` / `_strokeStyle`
//!    attributes in place for the active [`DrawMode`].
//! 4. **Draw**: a host [`GridRenderer`] receives the annotated dataset; a [`PathRenderer`]
//!    draws single features for both painting and [`hit_test`].
//!
//! Time animation is driven by a [`Scheduler`] the application owns and advances once per
//! frame. [`Layer`] ties everything together.
//!
//! Classifier misses and no-data values never fail a draw: they produce
//! [`Paint::Unstyled`].
#![forbid(unsafe_code)]

mod animation;
mod classify;
mod data;
mod foundation;
mod hit;
mod layer;
mod render;
mod style;

pub use animation::scheduler::{AnimatorId, Scheduler};
pub use animation::tween::{AnimationState, Tween, TweenStatus};
pub use classify::category::{
    Category, CategoryEntry, CategoryKey, DEFAULT_CATEGORY_PALETTE, OTHER_LABEL,
};
pub use classify::choropleth::{Breakpoint, Choropleth, DEFAULT_CHOROPLETH_PALETTE};
pub use classify::classifiers::Classifiers;
pub use classify::gradient::{Gradient, GradientStop};
pub use classify::intensity::{Intensity, IntensityConfig};
pub use classify::legend::{LegendDescriptor, LegendEntry, LegendOptions};
pub use data::binder::{BindOptions, DataInput, bind};
pub use data::dataset::{Dataset, Feature, Paint};
pub use data::geometry::{Geometry, Position};
pub use foundation::color::Rgba8;
pub use foundation::core::{BezPath, Point, Rect, StepRange, Vec2, to_device_pixel};
pub use foundation::error::{GeoLayerError, GeoLayerResult};
pub use hit::tester::{hit_test, hit_test_index};
pub use layer::layer::{InteractionHandler, Layer, PointerEvent};
pub use layer::options::{
    AnimationOptions, DrawMode, LayerOptions, OptionsPatch, SplitList, StyleType,
};
pub use render::context::{ContextConfig, PathContext, RenderContext};
pub use render::path::{
    DrawOptions, GridRenderer, PathRenderer, PixelSpace, Projection, SimplePath,
};
pub use style::processor::process;
