//! Rendering abstraction layer
//!
//! Retained scene elements for chart renderers: polylines with a point
//! shape, a display group that owns them, and recorded shape
//! transitions. Interpolation and rasterization belong to the
//! embedding renderer; this layer only tracks what should be drawn and
//! what should animate.

pub mod element;
pub mod group;

pub use element::{ElementId, LineStyle, Polyline, PolylineShape, ShapeTransition};
pub use group::Group;
