//! Core functionality for the trellis charting library
//!
//! This crate provides the pieces shared by every chart subsystem:
//! actions and pointer events, the throttle/debounce gate used for
//! rate-limited dispatch, the global interaction mutex, and box-layout
//! rectangle resolution.

pub mod action;
pub mod interaction;
pub mod layout;
pub mod throttle;

// Re-export commonly used types
pub use action::{Action, PointerEvent, PointerEventKind};
pub use interaction::InteractionMutex;
pub use layout::{layout_rect, BoxLayoutParams, LayoutValue, Rect};
pub use throttle::ThrottleGate;

use thiserror::Error;

/// Errors raised by core utilities.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid percent value: {0:?}")]
    InvalidPercent(String),

    #[error("layout produced a non-finite rect")]
    DegenerateLayout,
}
