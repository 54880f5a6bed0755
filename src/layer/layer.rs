use std::fmt;

use crate::{
    animation::{
        scheduler::{AnimatorId, Scheduler},
        tween::{AnimationState, Tween},
    },
    classify::{
        classifiers::Classifiers,
        legend::{LegendDescriptor, LegendOptions},
    },
    data::{
        binder::{DataInput, bind},
        dataset::{Dataset, Feature},
    },
    foundation::{
        core::{Point, StepRange},
        error::GeoLayerResult,
    },
    hit::tester::hit_test,
    layer::options::{LayerOptions, OptionsPatch},
    render::{
        context::{ContextConfig, RenderContext},
        path::{DrawOptions, GridRenderer, PathRenderer},
    },
    style::processor::process,
};

/// Pointer input forwarded by the host, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pixel: Point,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pixel: Point::new(x, y),
        }
    }
}

/// Host callbacks for pointer interaction. `feature` is `None` when nothing was hit.
pub trait InteractionHandler {
    fn click(&mut self, _feature: Option<&Feature>, _event: &PointerEvent) {}
    fn mousemove(&mut self, _feature: Option<&Feature>, _event: &PointerEvent) {}
}

/// One data layer: a bound dataset, its configuration and the classifiers built from them.
///
/// The layer does not own its animator. The tween lives in the application's
/// [`Scheduler`]; the layer keeps its [`AnimatorId`] and takes the scheduler by reference
/// in every lifecycle call that touches animation.
pub struct Layer {
    dataset: Dataset,
    options: LayerOptions,
    classifiers: Classifiers,
    animator: Option<AnimatorId>,
    step: Option<f64>,
    handler: Option<Box<dyn InteractionHandler>>,
    device_pixel_ratio: f64,
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("features", &self.dataset.len())
            .field("draw", &self.options.draw)
            .field("animator", &self.animator)
            .field("step", &self.step)
            .field("handler", &self.handler.is_some())
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .finish_non_exhaustive()
    }
}

impl Layer {
    /// Bind `input` and build classifiers. Animation starts at [`Layer::init`].
    pub fn new(input: impl Into<DataInput>, options: LayerOptions) -> GeoLayerResult<Self> {
        options.validate()?;
        let dataset = bind(input.into(), &options.bind_options())?;
        options.arg_check();
        let classifiers = Classifiers::from_options(&options, &dataset);
        Ok(Self {
            dataset,
            options,
            classifiers,
            animator: None,
            step: None,
            handler: None,
            device_pixel_ratio: 1.0,
        })
    }

    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    pub fn with_handler(mut self, handler: impl InteractionHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn set_handler(&mut self, handler: Option<Box<dyn InteractionHandler>>) {
        self.handler = handler;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn classifiers(&self) -> &Classifiers {
        &self.classifiers
    }

    pub fn animator(&self) -> Option<AnimatorId> {
        self.animator
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Rebuild classifiers and (re)start or drop the animator to match the options.
    pub fn init(&mut self, scheduler: &mut Scheduler) -> GeoLayerResult<()> {
        self.classifiers = Classifiers::from_options(&self.options, &self.dataset);
        self.init_animator(scheduler)
    }

    fn init_animator(&mut self, scheduler: &mut Scheduler) -> GeoLayerResult<()> {
        let range = if self.options.wants_animator() {
            self.step_range()?
        } else {
            None
        };

        if let Some(id) = self.animator.take() {
            scheduler.unregister(id);
        }
        let Some(range) = range else {
            self.step = None;
            return Ok(());
        };

        let anim = self.options.animation.clone().unwrap_or_default();
        let mut tween = Tween::new(range, anim.duration_ms())?;
        tween.start();
        let id = scheduler.register(tween);
        tracing::debug!(
            id = id.0,
            start = range.start,
            end = range.end,
            "time animation started"
        );
        self.animator = Some(id);
        self.step = Some(range.start);
        Ok(())
    }

    /// Configured `stepsRange`, else the dataset's `time` span. `None` while no feature
    /// carries a `time`, even with a configured range.
    fn step_range(&self) -> GeoLayerResult<Option<StepRange>> {
        if !self.dataset.has_field("time") {
            return Ok(None);
        }
        if let Some(r) = self.options.animation.as_ref().and_then(|a| a.steps_range) {
            return StepRange::new(r.start, r.end).map(Some);
        }
        match (self.dataset.get_min("time"), self.dataset.get_max("time")) {
            (Some(start), Some(end)) => StepRange::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    /// Apply `patch` over the current options. Nothing changes if the result is invalid.
    pub fn update(&mut self, patch: &OptionsPatch, scheduler: &mut Scheduler) -> GeoLayerResult<()> {
        let options = self.options.merged(patch)?;
        options.arg_check();
        self.options = options;
        self.init(scheduler)
    }

    /// Replace the options wholesale and re-derive the dataset's cached ranges.
    pub fn set_options(
        &mut self,
        options: LayerOptions,
        scheduler: &mut Scheduler,
    ) -> GeoLayerResult<()> {
        options.validate()?;
        options.arg_check();
        self.options = options;
        self.dataset.reset();
        self.init(scheduler)
    }

    /// Restore the drawing surface to canvas defaults.
    pub fn reset_context(&self, ctx: &mut dyn RenderContext) {
        ctx.reset(&ContextConfig::default());
    }

    pub fn arg_check(&self) -> Vec<String> {
        self.options.arg_check()
    }

    pub fn legend(&self, options: &LegendOptions) -> LegendDescriptor {
        self.classifiers.legend(self.options.draw, options)
    }

    /// Recompute derived size/style attributes for the whole dataset.
    pub fn process_data(&mut self) {
        process(
            self.dataset.get_mut(),
            self.options.draw,
            self.options.style_type,
            &self.classifiers,
        );
    }

    /// One draw cycle: reset the surface, classify, then hand the dataset to `grid`.
    pub fn draw_context(
        &mut self,
        ctx: &mut dyn RenderContext,
        grid: &mut dyn GridRenderer,
        offset: Point,
    ) {
        self.reset_context(ctx);
        self.process_data();
        let options = DrawOptions {
            layer: &self.options,
            offset,
            step: self.step,
        };
        grid.draw(ctx, &self.dataset, &options);
    }

    pub fn hit_test(
        &self,
        ctx: &mut dyn RenderContext,
        renderer: &dyn PathRenderer,
        pixel: Point,
    ) -> Option<&Feature> {
        hit_test(
            ctx,
            renderer,
            &self.dataset,
            &self.options,
            pixel,
            self.device_pixel_ratio,
        )
    }

    /// Resolve `event` and call the handler's `click`. No-op without a handler.
    pub fn click(
        &mut self,
        ctx: &mut dyn RenderContext,
        renderer: &dyn PathRenderer,
        event: &PointerEvent,
    ) {
        let Some(handler) = self.handler.as_mut() else {
            return;
        };
        let hit = hit_test(
            ctx,
            renderer,
            &self.dataset,
            &self.options,
            event.pixel,
            self.device_pixel_ratio,
        );
        handler.click(hit, event);
    }

    /// Resolve `event` and call the handler's `mousemove`. No-op without a handler.
    pub fn mousemove(
        &mut self,
        ctx: &mut dyn RenderContext,
        renderer: &dyn PathRenderer,
        event: &PointerEvent,
    ) {
        let Some(handler) = self.handler.as_mut() else {
            return;
        };
        let hit = hit_test(
            ctx,
            renderer,
            &self.dataset,
            &self.options,
            event.pixel,
            self.device_pixel_ratio,
        );
        handler.mousemove(hit, event);
    }

    /// Map interaction began: rewind to the range start and pause.
    pub fn on_movement_start(&mut self, scheduler: &mut Scheduler) {
        let Some(tween) = self.animator.and_then(|id| scheduler.get_mut(id)) else {
            return;
        };
        tween.pause_at_start();
        self.step = Some(tween.current_step());
        tracing::debug!(step = tween.current_step(), "time animation paused");
    }

    /// Map interaction ended: resume from the paused step.
    pub fn on_movement_end(&mut self, scheduler: &mut Scheduler) {
        let Some(tween) = self.animator.and_then(|id| scheduler.get_mut(id)) else {
            return;
        };
        tween.start();
        tracing::debug!(step = tween.current_step(), "time animation resumed");
    }

    /// Record the step the scheduler produced for this layer's animator.
    pub fn on_animation_step(&mut self, step: f64) {
        self.step = Some(step);
    }

    /// Last step seen by this layer, if it animates.
    pub fn current_step(&self) -> Option<f64> {
        self.step
    }

    pub fn animation_state<'s>(&self, scheduler: &'s Scheduler) -> Option<&'s AnimationState> {
        self.animator
            .and_then(|id| scheduler.get(id))
            .map(Tween::state)
    }

    /// Features whose `time` lies in `(step - trails, step]`.
    pub fn visible_features(&self, step: f64) -> impl Iterator<Item = &Feature> + '_ {
        let trails = self
            .options
            .animation
            .as_ref()
            .map_or(10.0, |a| a.trails);
        self.dataset
            .get()
            .iter()
            .filter(move |f| f.time.is_some_and(|t| t > step - trails && t <= step))
    }

    /// Stop and unregister the animator. Safe to call more than once.
    pub fn destroy(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.animator.take() {
            scheduler.unregister(id);
            tracing::debug!(id = id.0, "time animation stopped");
        }
        self.step = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/layer.rs"]
mod tests;
