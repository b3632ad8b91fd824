//! Brush-selection glue.
//!
//! A finished brush gesture on one axis becomes an `AxisAreaSelect`
//! action addressed by axis id; `apply_axis_area_select` routes a
//! received action back onto the coordinate system's axis model.

use tracing::debug;

use trellis_coord::{CoordError, Parallel};
use trellis_core::Action;

use crate::ChartError;

/// One axis brush result, intervals in data space.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSelection {
    pub axis_dim: String,
    pub batch: Vec<[f64; 2]>,
}

impl BrushSelection {
    /// Build a selection from pixel intervals along the axis, mapping
    /// each end through the axis scale. An empty batch clears the
    /// brush on this axis.
    pub fn from_axis_coords(
        coord: &Parallel,
        axis_dim: impl Into<String>,
        coord_ranges: &[[f64; 2]],
    ) -> Result<Self, ChartError> {
        let axis_dim = axis_dim.into();
        let axis = coord
            .get_axis(&axis_dim)
            .ok_or_else(|| CoordError::UnknownAxis(axis_dim.clone()))?;
        let batch = coord_ranges
            .iter()
            .map(|&[lo, hi]| [axis.coord_to_data(lo), axis.coord_to_data(hi)])
            .collect();
        Ok(Self { axis_dim, batch })
    }

    /// Convert to the dispatched action, addressed by the axis id and
    /// with each interval normalized to `min <= max` order.
    pub fn into_action(self, coord: &Parallel) -> Result<Action, ChartError> {
        let model = coord
            .axis_model(&self.axis_dim)
            .ok_or_else(|| CoordError::UnknownAxis(self.axis_dim.clone()))?;
        let intervals = self
            .batch
            .into_iter()
            .map(|[lo, hi]| if lo <= hi { [lo, hi] } else { [hi, lo] })
            .collect();
        Ok(Action::AxisAreaSelect {
            parallel_axis_id: model.axis_id().to_string(),
            intervals,
        })
    }
}

/// Route a received `AxisAreaSelect` into the coordinate system.
/// Returns whether the action applied; non-brush actions pass through
/// untouched, an unknown axis id is a configuration error.
pub fn apply_axis_area_select(coord: &mut Parallel, action: &Action) -> Result<bool, ChartError> {
    let Action::AxisAreaSelect {
        parallel_axis_id,
        intervals,
    } = action
    else {
        return Ok(false);
    };

    let dim = coord
        .dimensions()
        .iter()
        .find(|dim| {
            coord
                .axis_model(dim)
                .map_or(false, |m| m.axis_id() == parallel_axis_id)
        })
        .cloned()
        .ok_or_else(|| CoordError::UnknownAxis(parallel_axis_id.clone()))?;

    coord.set_axis_active_intervals(&dim, intervals.clone())?;
    debug!(axis = %parallel_axis_id, count = intervals.len(), "axis area select applied");
    Ok(true)
}
