use serde::{Deserialize, Serialize};

/// Actions dispatched from interaction controllers to the embedding
/// application, which is expected to feed them back into the relevant
/// models (expand window, axis active intervals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// The axis expand window moved via a slide or jump gesture.
    ParallelAxisExpand {
        axis_expand_window: Option<[f64; 2]>,
        /// Jumps are animated, slides move synchronously with the pointer.
        animation: bool,
    },

    /// A brush gesture on one parallel axis completed.
    AxisAreaSelect {
        parallel_axis_id: String,
        intervals: Vec<[f64; 2]>,
    },
}

/// Raw pointer event kinds consumed by the interaction glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// One pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, offset_x: f64, offset_y: f64) -> Self {
        Self {
            kind,
            offset_x,
            offset_y,
        }
    }

    pub fn point(&self) -> [f64; 2] {
        [self.offset_x, self.offset_y]
    }
}
