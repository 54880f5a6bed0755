use crate::{
    foundation::core::StepRange,
    foundation::error::{GeoLayerError, GeoLayerResult},
};

/// Running/stopped state of a tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TweenStatus {
    Stopped,
    Running,
}

/// Observable animation state of one layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationState {
    pub current_step: f64,
    pub range: StepRange,
    pub duration_ms: f64,
    /// Always true: cycles repeat until the tween is stopped.
    pub repeating: bool,
}

/// Repeating interpolation of a step value from `range.start` to `range.end`.
///
/// Time only enters through [`Tween::sample`]; the cycle is anchored on the first sample
/// after a (re)start, so a resumed tween continues from the phase it was stopped at.
#[derive(Clone, Debug)]
pub struct Tween {
    state: AnimationState,
    status: TweenStatus,
    phase: f64,              // linear progress of the current cycle, [0, 1)
    anchor_ms: Option<f64>, // timestamp of phase 0 of the current cycle
}

impl Tween {
    /// A stopped tween positioned at `range.start`.
    pub fn new(range: StepRange, duration_ms: f64) -> GeoLayerResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(GeoLayerError::animation("tween duration must be > 0"));
        }
        Ok(Self {
            state: AnimationState {
                current_step: range.start,
                range,
                duration_ms,
                repeating: true,
            },
            status: TweenStatus::Stopped,
            phase: 0.0,
            anchor_ms: None,
        })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn current_step(&self) -> f64 {
        self.state.current_step
    }

    pub fn status(&self) -> TweenStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TweenStatus::Running
    }

    /// Enter `Running`, continuing from the current phase.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.status = TweenStatus::Running;
        self.anchor_ms = None;
    }

    /// Enter `Stopped`. Stopping a stopped tween does nothing.
    pub fn stop(&mut self) {
        self.status = TweenStatus::Stopped;
        self.anchor_ms = None;
    }

    /// Rewind to `range.start` and stop.
    pub fn pause_at_start(&mut self) {
        self.stop();
        self.phase = 0.0;
        self.state.current_step = self.state.range.start;
    }

    /// Advance to `now_ms`, returning the new step while running.
    pub fn sample(&mut self, now_ms: f64) -> Option<f64> {
        if !self.is_running() || !now_ms.is_finite() {
            return None;
        }
        let duration = self.state.duration_ms;
        let anchor = *self
            .anchor_ms
            .get_or_insert(now_ms - self.phase * duration);

        let mut elapsed = (now_ms - anchor).max(0.0);
        if elapsed >= duration {
            let cycles = (elapsed / duration).floor();
            self.anchor_ms = Some(anchor + cycles * duration);
            elapsed -= cycles * duration;
        }

        self.phase = (elapsed / duration).clamp(0.0, 1.0);
        let step = self.state.range.lerp(self.phase);
        self.state.current_step = step;
        Some(step)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
