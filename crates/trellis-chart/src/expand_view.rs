//! Expand-gesture view glue.
//!
//! Turns raw pointer events into `ParallelAxisExpand` actions. The
//! click trigger dispatches on a stationary press/release pair; the
//! mousemove trigger streams slide results through a throttle gate so
//! dispatch stays at `axis_expand_rate`, with a one-shot debounce
//! after every jump so the jump is not immediately overridden by the
//! next slide recalculation.

use std::sync::Arc;

use tracing::trace;

use trellis_coord::{ExpandTriggerOn, Parallel, SlideBehavior};
use trellis_core::interaction::GLOBAL_PAN;
use trellis_core::{Action, InteractionMutex, PointerEvent, PointerEventKind, ThrottleGate};

/// Squared pointer travel above which a press/release pair is a drag,
/// not a click.
const CLICK_SLOP_SQ: f64 = 5.0;

/// Drives expand-window updates from pointer events.
pub struct ExpandSlideController {
    holder: String,
    trigger_on: ExpandTriggerOn,
    debounce_ms: u64,
    gate: ThrottleGate<Action>,
    mutex: Arc<InteractionMutex>,
    down_point: Option<[f64; 2]>,
}

impl ExpandSlideController {
    /// `holder` identifies this controller in the interaction mutex.
    pub fn new(holder: impl Into<String>, coord: &Parallel, mutex: Arc<InteractionMutex>) -> Self {
        let config = coord.config();
        Self {
            holder: holder.into(),
            trigger_on: config.axis_expand_trigger_on,
            debounce_ms: config.axis_expand_debounce,
            gate: ThrottleGate::new(config.axis_expand_rate),
            mutex,
            down_point: None,
        }
    }

    /// Feed one pointer event; returns an action when one may
    /// dispatch now. Throttled actions surface later via [`Self::tick`].
    pub fn on_pointer_event(
        &mut self,
        coord: &Parallel,
        event: PointerEvent,
        now_ms: u64,
    ) -> Option<Action> {
        match event.kind {
            PointerEventKind::Down => {
                self.down_point = None;
                if coord.contain_point(event.point())
                    && self.mutex.take(GLOBAL_PAN, &self.holder)
                {
                    self.down_point = Some(event.point());
                }
                None
            }
            PointerEventKind::Move => {
                if self.trigger_on != ExpandTriggerOn::Mousemove
                    || self.mutex.is_taken_by_other(GLOBAL_PAN, &self.holder)
                {
                    return None;
                }
                self.slide(coord, event.point(), now_ms)
            }
            PointerEventKind::Up => {
                let down = self.down_point.take();
                self.mutex.release(GLOBAL_PAN, &self.holder);
                if self.trigger_on != ExpandTriggerOn::Click {
                    return None;
                }
                let down = down?;
                let point = event.point();
                let travel_sq =
                    (point[0] - down[0]).powi(2) + (point[1] - down[1]).powi(2);
                if travel_sq > CLICK_SLOP_SQ {
                    return None;
                }
                // Clicks dispatch immediately, bypassing the gate.
                let result = coord.get_slided_axis_expand_window(point);
                if result.behavior == SlideBehavior::None {
                    return None;
                }
                Some(Action::ParallelAxisExpand {
                    axis_expand_window: Some(result.axis_expand_window),
                    animation: result.behavior == SlideBehavior::Jump,
                })
            }
        }
    }

    /// Flush a throttled action once its time has come.
    pub fn tick(&mut self, now_ms: u64) -> Option<Action> {
        self.gate.tick(now_ms)
    }

    /// Release the gesture and drop pending dispatch, for gesture
    /// cancellation and disposal.
    pub fn dispose(&mut self) {
        self.mutex.release(GLOBAL_PAN, &self.holder);
        self.gate.clear();
        self.down_point = None;
    }

    fn slide(&mut self, coord: &Parallel, point: [f64; 2], now_ms: u64) -> Option<Action> {
        let result = coord.get_slided_axis_expand_window(point);
        if result.behavior == SlideBehavior::None {
            return None;
        }
        if result.behavior == SlideBehavior::Jump {
            self.gate.debounce_next(self.debounce_ms, now_ms);
        }
        trace!(behavior = ?result.behavior, window = ?result.axis_expand_window, "expand slide");
        self.gate.submit(
            Action::ParallelAxisExpand {
                axis_expand_window: Some(result.axis_expand_window),
                animation: result.behavior == SlideBehavior::Jump,
            },
            now_ms,
        )
    }
}
