//! Dual-handle price range with pending and committed values.
//!
//! Dragging moves only the pending pair. [`RangeSliderController::apply`]
//! copies pending to committed, which is the point where the host writes the
//! price into the filter and refetches.
//!
//! Global move/end listeners are modelled by [`GestureListeners`]: they are
//! attached on pointer-down and detached on pointer-up or teardown, for mouse
//! and touch alike.

use serde::Serialize;
use tracing::debug;

use crate::config::SliderConfig;
use crate::facets::PriceBounds;

/// Which thumb is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Min,
    Max,
}

/// Input device that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Horizontal geometry of the track, measured when the move happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

impl TrackBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Position of `x` along the track in `[0, 100]`, or `None` for a track
    /// with no usable width.
    pub fn percentage(&self, x: f64) -> Option<f64> {
        if !self.width.is_finite() || self.width <= 0.0 || !x.is_finite() {
            return None;
        }
        Some(((x - self.left) / self.width * 100.0).clamp(0.0, 100.0))
    }
}

/// Attachment point for the global move/end listeners of a drag.
pub trait GestureListeners: Send {
    fn attach(&mut self, source: PointerSource);
    fn detach(&mut self, source: PointerSource);
}

/// Listener sink for headless use.
#[derive(Debug, Default)]
pub struct NoopListeners;

impl GestureListeners for NoopListeners {
    fn attach(&mut self, _source: PointerSource) {}
    fn detach(&mut self, _source: PointerSource) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "handle")]
pub enum SliderPhase {
    Idle,
    Dragging(Handle),
}

/// Snapshot of the slider's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderState {
    pub global_min: i64,
    pub global_max: i64,
    pub committed_min: i64,
    pub committed_max: i64,
    pub pending_min: i64,
    pub pending_max: i64,
    pub active_handle: Option<Handle>,
}

/// Price bounds to write into the filter after apply. A bound equal to the
/// global bound is `None`, meaning "unbounded".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSelection {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub struct RangeSliderController {
    global_min: i64,
    global_max: i64,
    committed_min: i64,
    committed_max: i64,
    pending_min: i64,
    pending_max: i64,
    phase: SliderPhase,
    source: Option<PointerSource>,
    min_gap: i64,
    listeners: Box<dyn GestureListeners>,
}

impl std::fmt::Debug for RangeSliderController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSliderController")
            .field("state", &self.state())
            .field("phase", &self.phase)
            .finish()
    }
}

impl RangeSliderController {
    /// A slider spanning `bounds`, committed to the full range.
    pub fn new(bounds: PriceBounds, config: &SliderConfig) -> Self {
        Self::with_listeners(bounds, config, Box::new(NoopListeners))
    }

    pub fn with_listeners(
        bounds: PriceBounds,
        config: &SliderConfig,
        listeners: Box<dyn GestureListeners>,
    ) -> Self {
        let (global_min, global_max) = integer_bounds(bounds);
        Self {
            global_min,
            global_max,
            committed_min: global_min,
            committed_max: global_max,
            pending_min: global_min,
            pending_max: global_max,
            phase: SliderPhase::Idle,
            source: None,
            min_gap: config.min_gap.max(0),
            listeners,
        }
    }

    pub fn state(&self) -> SliderState {
        SliderState {
            global_min: self.global_min,
            global_max: self.global_max,
            committed_min: self.committed_min,
            committed_max: self.committed_max,
            pending_min: self.pending_min,
            pending_max: self.pending_max,
            active_handle: match self.phase {
                SliderPhase::Idle => None,
                SliderPhase::Dragging(handle) => Some(handle),
            },
        }
    }

    pub fn phase(&self) -> SliderPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SliderPhase::Dragging(_))
    }

    /// Start dragging `handle`. A second pointer-down during a drag is
    /// ignored.
    pub fn pointer_down(&mut self, handle: Handle, source: PointerSource) {
        if self.is_dragging() {
            return;
        }
        self.phase = SliderPhase::Dragging(handle);
        self.source = Some(source);
        self.listeners.attach(source);
        debug!(?handle, ?source, "slider drag started");
    }

    /// Move the active handle to horizontal position `x`. Returns the new
    /// pending value, or `None` when idle or the track has no width.
    pub fn pointer_move(&mut self, x: f64, track: TrackBounds) -> Option<i64> {
        let SliderPhase::Dragging(handle) = self.phase else {
            return None;
        };
        let percentage = track.percentage(x)?;
        let span = self.global_max.saturating_sub(self.global_min) as f64;
        let value = self
            .global_min
            .saturating_add((percentage / 100.0 * span).round() as i64);
        Some(self.set_pending(handle, value))
    }

    /// End the drag without committing.
    pub fn pointer_up(&mut self) {
        if let Some(source) = self.source.take() {
            self.listeners.detach(source);
        }
        if let SliderPhase::Dragging(handle) = self.phase {
            debug!(?handle, pending_min = self.pending_min, pending_max = self.pending_max, "slider drag ended");
        }
        self.phase = SliderPhase::Idle;
    }

    /// Release any listeners still attached.
    pub fn teardown(&mut self) {
        self.pointer_up();
    }

    /// Text-input entry for the lower bound, under the same clamp rules.
    pub fn set_pending_min(&mut self, value: i64) -> i64 {
        self.set_pending(Handle::Min, value)
    }

    /// Text-input entry for the upper bound, under the same clamp rules.
    pub fn set_pending_max(&mut self, value: i64) -> i64 {
        self.set_pending(Handle::Max, value)
    }

    fn set_pending(&mut self, handle: Handle, value: i64) -> i64 {
        match handle {
            Handle::Min => {
                let upper = self.pending_max.saturating_sub(self.min_gap).max(self.global_min);
                self.pending_min = value.clamp(self.global_min, upper);
                self.pending_min
            }
            Handle::Max => {
                let lower = self.pending_min.saturating_add(self.min_gap).min(self.global_max);
                self.pending_max = value.clamp(lower, self.global_max);
                self.pending_max
            }
        }
    }

    /// Commit the pending pair.
    pub fn apply(&mut self) -> PriceSelection {
        self.committed_min = self.pending_min;
        self.committed_max = self.pending_max;
        debug!(min = self.committed_min, max = self.committed_max, "slider applied");
        self.selection()
    }

    /// Committed range as filter values.
    pub fn selection(&self) -> PriceSelection {
        PriceSelection {
            min: (self.committed_min > self.global_min).then_some(self.committed_min as f64),
            max: (self.committed_max < self.global_max).then_some(self.committed_max as f64),
        }
    }

    /// Discard pending edits.
    pub fn revert(&mut self) {
        self.pending_min = self.committed_min;
        self.pending_max = self.committed_max;
    }

    /// Adopt new global bounds. The committed pair is set from the filter's
    /// prices (clamped; `None` means the global bound) and the pending pair
    /// is reset to it. Any drag in progress is ended.
    pub fn reset_bounds(&mut self, bounds: PriceBounds, min: Option<f64>, max: Option<f64>) {
        self.pointer_up();
        let (global_min, global_max) = integer_bounds(bounds);
        self.global_min = global_min;
        self.global_max = global_max;
        self.sync_committed(min, max);
    }

    /// Set the committed pair from filter prices without touching bounds.
    pub fn sync_committed(&mut self, min: Option<f64>, max: Option<f64>) {
        let to_value = |v: f64| v.round() as i64;
        let lo = min
            .filter(|v| v.is_finite())
            .map_or(self.global_min, to_value)
            .clamp(self.global_min, self.global_max);
        let hi = max
            .filter(|v| v.is_finite())
            .map_or(self.global_max, to_value)
            .clamp(lo, self.global_max);
        self.committed_min = lo;
        self.committed_max = hi;
        self.revert();
    }

    /// Pending handle positions as track percentages.
    pub fn percentages(&self) -> (f64, f64) {
        let span = self.global_max.saturating_sub(self.global_min) as f64;
        let pct = |v: i64| v.saturating_sub(self.global_min) as f64 / span * 100.0;
        (pct(self.pending_min), pct(self.pending_max))
    }

    /// Pending differs from committed.
    pub fn has_pending_changes(&self) -> bool {
        self.pending_min != self.committed_min || self.pending_max != self.committed_max
    }
}

impl Drop for RangeSliderController {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Integer slider range covering `bounds`, at least one unit wide. Values
/// beyond `i64` saturate.
fn integer_bounds(bounds: PriceBounds) -> (i64, i64) {
    let min = (bounds.min.floor() as i64).min(i64::MAX - 1);
    let max = (bounds.max.ceil() as i64).max(min.saturating_add(1));
    (min, max)
}
