//! Parallel series chart layer
//!
//! Everything that sits between the coordinate system and the
//! embedding renderer: the series model with resolved style scope, the
//! diff-driven polyline renderer with a progressive path, the
//! activation-to-opacity visual pass, and the interaction glue that
//! turns pointer events into expand and brush actions.

pub mod brush;
pub mod expand_view;
pub mod renderer;
pub mod series;
pub mod visual;

pub use brush::{apply_axis_area_select, BrushSelection};
pub use expand_view::ExpandSlideController;
pub use renderer::{ParallelSeriesRenderer, RenderStats};
pub use series::{ParallelSeriesOptions, ParallelSeriesScope, Smooth};
pub use visual::apply_activation_visual;

use thiserror::Error;

/// Errors raised by the chart layer. Configuration-class only; bad
/// data cells are recovered during rendering instead.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("series table has no mapping for axis dimension {0}")]
    MissingDimension(String),

    #[error("series references unknown opacity column: {0}")]
    UnknownOpacityColumn(String),

    #[error(transparent)]
    Coord(#[from] trellis_coord::CoordError),
}
