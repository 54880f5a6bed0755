use std::{cell::RefCell, rc::Rc};

use serde_json::json;

use super::*;
use crate::{
    animation::tween::TweenStatus,
    data::geometry::Geometry,
    foundation::error::GeoLayerError,
    layer::options::{AnimationOptions, DrawMode},
    render::{
        context::PathContext,
        path::{PixelSpace, SimplePath},
    },
};

fn records() -> Vec<serde_json::Value> {
    vec![
        json!({"lng": 1.0, "lat": 2.0, "value": 10.0, "time": 0.0}),
        json!({"lng": 3.0, "lat": 4.0, "value": 20.0, "time": 5.0}),
        json!({"lng": 5.0, "lat": 6.0, "value": 30.0, "time": 20.0}),
    ]
}

fn animated(duration_s: f64) -> LayerOptions {
    LayerOptions {
        draw: DrawMode::Time,
        count_field: "value".into(),
        animation: Some(AnimationOptions {
            steps_range: Some(StepRange::new(0.0, 100.0).unwrap()),
            duration: Some(duration_s),
            ..AnimationOptions::default()
        }),
        ..LayerOptions::default()
    }
}

fn square(x0: f64, count: f64) -> Feature {
    let ring = vec![[x0, 0.0], [x0 + 10.0, 0.0], [x0 + 10.0, 10.0], [x0, 10.0]];
    Feature::new(Geometry::Polygon(vec![ring]), Some(count))
}

#[derive(Clone, Default)]
struct Calls(Rc<RefCell<Vec<(String, Option<f64>)>>>);

impl InteractionHandler for Calls {
    fn click(&mut self, feature: Option<&Feature>, _event: &PointerEvent) {
        self.0
            .borrow_mut()
            .push(("click".into(), feature.and_then(|f| f.count)));
    }

    fn mousemove(&mut self, feature: Option<&Feature>, _event: &PointerEvent) {
        self.0
            .borrow_mut()
            .push(("mousemove".into(), feature.and_then(|f| f.count)));
    }
}

#[derive(Default)]
struct CountingGrid {
    draws: usize,
    styled: usize,
    offset: Option<Point>,
}

impl GridRenderer for CountingGrid {
    fn draw(&mut self, _ctx: &mut dyn RenderContext, dataset: &Dataset, options: &DrawOptions<'_>) {
        self.draws += 1;
        self.styled = dataset.get().iter().filter(|f| f.fill_style.is_some()).count();
        self.offset = Some(options.offset);
    }
}

#[test]
fn new_binds_records_with_count_field() {
    let options = LayerOptions {
        count_field: "value".into(),
        ..LayerOptions::default()
    };
    let layer = Layer::new(vec![json!({"lng": 1, "lat": 2, "value": 10})], options).unwrap();
    let f = &layer.dataset().get()[0];
    assert_eq!(f.geometry, Geometry::Point([1.0, 2.0]));
    assert_eq!(f.count, Some(10.0));
    assert!(layer.animator().is_none());
}

#[test]
fn new_rejects_invalid_records_and_options() {
    let err = Layer::new(vec![json!({"lat": 2})], LayerOptions::default()).unwrap_err();
    assert!(matches!(err, GeoLayerError::InvalidFeature { index: 0, .. }));

    let bad = LayerOptions {
        line_width: 0.0,
        ..LayerOptions::default()
    };
    assert!(Layer::new(Dataset::default(), bad).is_err());
}

#[test]
fn init_without_time_or_range_has_no_animator() {
    let mut sched = Scheduler::new();
    let options = LayerOptions {
        draw: DrawMode::Time,
        ..LayerOptions::default()
    };
    let mut layer = Layer::new(vec![json!({"lng": 0, "lat": 0})], options).unwrap();
    layer.init(&mut sched).unwrap();
    assert!(layer.animator().is_none());
    assert!(sched.is_empty());
}

#[test]
fn steps_range_without_time_features_has_no_animator() {
    let mut sched = Scheduler::new();
    let untimed = vec![json!({"lng": 0, "lat": 0, "value": 1})];
    let mut layer = Layer::new(untimed, animated(1.0)).unwrap();
    layer.init(&mut sched).unwrap();
    assert!(layer.animator().is_none());
    assert!(layer.current_step().is_none());
    assert!(sched.is_empty());
}

#[test]
fn bubble_size_follows_custom_count_field() {
    let options = LayerOptions {
        draw: DrawMode::Bubble,
        count_field: "value".into(),
        max: Some(100.0),
        min_size: 0.0,
        max_size: 100.0,
        ..LayerOptions::default()
    };
    let mut layer = Layer::new(vec![json!({"lng": 0, "lat": 0, "value": 50})], options).unwrap();
    layer.process_data();
    assert_eq!(layer.dataset().get()[0].count, Some(50.0));
    assert_eq!(layer.dataset().get()[0].size, Some(50.0));
}

#[test]
fn init_takes_range_from_dataset_time() {
    let mut sched = Scheduler::new();
    let options = LayerOptions {
        draw: DrawMode::Time,
        ..LayerOptions::default()
    };
    let mut layer = Layer::new(records(), options).unwrap();
    layer.init(&mut sched).unwrap();
    let state = layer.animation_state(&sched).unwrap();
    assert_eq!(state.range, StepRange::new(0.0, 20.0).unwrap());
    assert_eq!(state.duration_ms, 5000.0);
    assert_eq!(layer.current_step(), Some(0.0));
}

#[test]
fn scheduler_drives_the_layer_through_its_range() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), animated(1.0)).unwrap();
    layer.init(&mut sched).unwrap();
    let id = layer.animator().unwrap();

    let mut steps = Vec::new();
    for now in [0.0, 500.0, 1010.0] {
        sched.advance(now, |got, step| {
            assert_eq!(got, id);
            steps.push(step);
        });
    }
    assert_eq!(steps[0], 0.0);
    assert!((steps[1] - 50.0).abs() < 1e-9);
    assert!(steps[2] < 5.0);

    layer.on_animation_step(steps[1]);
    assert_eq!(layer.current_step(), Some(steps[1]));
}

#[test]
fn movement_pauses_at_start_and_resumes_from_there() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), animated(1.0)).unwrap();
    layer.init(&mut sched).unwrap();
    sched.advance(0.0, |_, _| {});
    sched.advance(500.0, |_, _| {});

    layer.on_movement_start(&mut sched);
    let state = layer.animation_state(&sched).unwrap();
    assert_eq!(state.current_step, 0.0);
    assert_eq!(layer.current_step(), Some(0.0));
    assert_eq!(sched.advance(600.0, |_, _| {}), 0);

    layer.on_movement_end(&mut sched);
    let mut steps = Vec::new();
    sched.advance(700.0, |_, s| steps.push(s));
    sched.advance(800.0, |_, s| steps.push(s));
    assert_eq!(steps[0], 0.0);
    assert!((steps[1] - 10.0).abs() < 1e-9);
}

#[test]
fn disabling_animation_through_update_unregisters() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), animated(1.0)).unwrap();
    layer.init(&mut sched).unwrap();
    assert_eq!(sched.len(), 1);

    let patch = OptionsPatch {
        animation: Some(AnimationOptions {
            enabled: false,
            ..AnimationOptions::default()
        }),
        ..OptionsPatch::default()
    };
    layer.update(&patch, &mut sched).unwrap();
    assert!(layer.animator().is_none());
    assert!(sched.is_empty());
}

#[test]
fn reinit_replaces_the_animator() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), animated(1.0)).unwrap();
    layer.init(&mut sched).unwrap();
    let first = layer.animator();
    layer.init(&mut sched).unwrap();
    assert_ne!(layer.animator(), first);
    assert_eq!(sched.len(), 1);
}

#[test]
fn invalid_update_keeps_previous_options() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), LayerOptions::default()).unwrap();
    let patch = OptionsPatch {
        min_size: Some(50.0),
        max_size: Some(10.0),
        ..OptionsPatch::default()
    };
    assert!(layer.update(&patch, &mut sched).is_err());
    assert_eq!(layer.options(), &LayerOptions::default());
}

#[test]
fn set_options_rebuilds_classifiers() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(Dataset::new(vec![square(0.0, 40.0)]), LayerOptions::default())
        .unwrap();
    let options = LayerOptions {
        draw: DrawMode::Intensity,
        max: Some(80.0),
        ..LayerOptions::default()
    };
    layer.set_options(options, &mut sched).unwrap();
    assert_eq!(layer.classifiers().intensity.max(), 80.0);
}

#[test]
fn destroy_is_idempotent() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), animated(1.0)).unwrap();
    layer.init(&mut sched).unwrap();
    layer.destroy(&mut sched);
    layer.destroy(&mut sched);
    assert!(sched.is_empty());
    assert!(layer.animation_state(&sched).is_none());
    assert_eq!(layer.current_step(), None);
}

#[test]
fn paused_tween_is_stopped() {
    let mut sched = Scheduler::new();
    let mut layer = Layer::new(records(), animated(2.0)).unwrap();
    layer.init(&mut sched).unwrap();
    layer.on_movement_start(&mut sched);
    let id = layer.animator().unwrap();
    assert_eq!(sched.get(id).unwrap().status(), TweenStatus::Stopped);
}

#[test]
fn visible_features_use_the_trailing_window() {
    let mut options = animated(1.0);
    if let Some(anim) = options.animation.as_mut() {
        anim.trails = 10.0;
    }
    let layer = Layer::new(records(), options).unwrap();
    let times: Vec<f64> = layer.visible_features(14.0).filter_map(|f| f.time).collect();
    assert_eq!(times, [5.0]);
    let times: Vec<f64> = layer.visible_features(20.0).filter_map(|f| f.time).collect();
    assert_eq!(times, [20.0]);
}

#[test]
fn draw_context_processes_then_draws() {
    let options = LayerOptions {
        draw: DrawMode::Intensity,
        ..LayerOptions::default()
    };
    let mut layer = Layer::new(Dataset::new(vec![square(0.0, 5.0)]), options).unwrap();
    let mut ctx = PathContext::new(1.0);
    ctx.set_line_width(7.0);
    let mut grid = CountingGrid::default();
    layer.draw_context(&mut ctx, &mut grid, Point::new(3.0, 4.0));
    assert_eq!(grid.draws, 1);
    assert_eq!(grid.styled, 1);
    assert_eq!(grid.offset, Some(Point::new(3.0, 4.0)));
    assert_eq!(ctx.config().line_width, 1.0);
}

#[test]
fn legend_dispatches_by_mode() {
    let options = LayerOptions {
        draw: DrawMode::Choropleth,
        ..LayerOptions::default()
    };
    let layer = Layer::new(Dataset::new(vec![square(0.0, 5.0)]), options).unwrap();
    assert!(!layer.legend(&LegendOptions::default()).is_supported());
}

#[test]
fn click_and_mousemove_reach_the_handler() {
    let calls = Calls::default();
    let ds = Dataset::new(vec![square(0.0, 1.0), square(20.0, 2.0)]);
    let mut layer = Layer::new(ds, LayerOptions::default())
        .unwrap()
        .with_handler(calls.clone())
        .with_device_pixel_ratio(2.0);
    let mut ctx = PathContext::new(2.0);
    let renderer = SimplePath::new(PixelSpace);

    layer.click(&mut ctx, &renderer, &PointerEvent::new(25.0, 5.0));
    layer.mousemove(&mut ctx, &renderer, &PointerEvent::new(100.0, 100.0));

    let got = calls.0.borrow().clone();
    assert_eq!(
        got,
        [("click".to_owned(), Some(2.0)), ("mousemove".to_owned(), None)]
    );
}

#[test]
fn interaction_without_handler_is_a_no_op() {
    let mut layer = Layer::new(Dataset::new(vec![square(0.0, 1.0)]), LayerOptions::default())
        .unwrap();
    let mut ctx = PathContext::new(1.0);
    let renderer = SimplePath::new(PixelSpace);
    layer.click(&mut ctx, &renderer, &PointerEvent::new(5.0, 5.0));
    assert!(ctx.path().elements().is_empty());
    assert_eq!(
        layer
            .hit_test(&mut ctx, &renderer, Point::new(5.0, 5.0))
            .and_then(|f| f.count),
        Some(1.0)
    );
}
