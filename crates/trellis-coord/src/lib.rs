//! Coordinate systems for the trellis charting library
//!
//! The parallel coordinate system is the main inhabitant: N scaled
//! axes laid out side by side, a focus+context expand window over
//! them, data-tuple to screen-point mapping, and brush-driven
//! activation classification.

pub mod axis;
pub mod axis_model;
pub mod config;
pub mod parallel;
pub mod scale;

pub use axis::Axis;
pub use axis_model::{ActiveState, ParallelAxisModel};
pub use config::{
    AxisKind, AxisOptions, ExpandTriggerOn, LayoutDirection, ParallelConfig, ParallelOptions,
    SlideTriggerArea, DEFAULT_SLIDE_TRIGGER_AREA,
};
pub use parallel::{AxisLayout, Parallel, SlideBehavior, SlideResult};
pub use scale::{CategoryScale, Scale, ValueScale};

use glam::DVec2;
use thiserror::Error;
use trellis_data::DataTable;

/// Errors raised by coordinate-system construction and update.
///
/// All of these are configuration-class failures: they are returned
/// before any partial layout is visible, never recovered silently.
#[derive(Error, Debug)]
pub enum CoordError {
    #[error("duplicate axis dimension: {0}")]
    DuplicateDimension(String),

    #[error("coordinate system declares no axes")]
    NoAxes,

    #[error("unknown axis dimension: {0}")]
    UnknownAxis(String),

    #[error("series data has no mapping for axis dimension {0}")]
    MissingDimension(String),

    #[error("axis {dim} is declared {axis:?} but the data dimension is {data:?}")]
    AxisKindMismatch {
        dim: String,
        axis: AxisKind,
        data: trellis_data::DimensionKind,
    },

    #[error(transparent)]
    Layout(#[from] trellis_core::CoreError),
}

/// Closed set of coordinate-system kinds.
///
/// Selection happens by pattern match, not by string-keyed registry;
/// new coordinate systems are new variants.
pub enum CoordSys {
    Parallel(Parallel),
}

impl CoordSys {
    pub fn data_to_point(&self, value: f64, dim: &str) -> Result<DVec2, CoordError> {
        match self {
            CoordSys::Parallel(parallel) => parallel.data_to_point(value, dim),
        }
    }

    pub fn contain_point(&self, point: [f64; 2]) -> bool {
        match self {
            CoordSys::Parallel(parallel) => parallel.contain_point(point),
        }
    }

    pub fn update(&mut self, tables: &[&DataTable]) -> Result<(), CoordError> {
        match self {
            CoordSys::Parallel(parallel) => parallel.update(tables),
        }
    }

    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) -> Result<(), CoordError> {
        match self {
            CoordSys::Parallel(parallel) => parallel.resize(canvas_width, canvas_height),
        }
    }
}
