//! The parallel coordinate system.
//!
//! Owns one scaled axis per declared dimension, computes the global
//! layout (axis positions and the focus+context expand window), maps
//! data tuples to screen points, and classifies rows against the
//! brushed intervals of every axis.

use std::f64::consts::FRAC_PI_2;

use glam::{DAffine2, DVec2};
use indexmap::IndexMap;
use tracing::debug;

use trellis_core::{layout_rect, Rect};
use trellis_data::{DataTable, DimensionKind};

use crate::axis::Axis;
use crate::axis_model::{ActiveState, ParallelAxisModel};
use crate::config::{AxisKind, LayoutDirection, ParallelConfig, DEFAULT_SLIDE_TRIGGER_AREA};
use crate::scale::{CategoryScale, Scale, ValueScale, DEFAULT_SPLIT_NUMBER};
use crate::CoordError;

/// Layout data for one axis, one entry per dimension, replaced
/// wholesale on every layout pass.
#[derive(Debug, Clone)]
pub struct AxisLayout {
    pub position: DVec2,
    pub rotation: f64,
    pub transform: DAffine2,
    pub axis_name_available_width: f64,
    pub axis_label_show: bool,
    pub name_truncate_max_width: Option<f64>,
}

/// How the expand window reacted to a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideBehavior {
    None,
    Slide,
    Jump,
}

/// Result of [`Parallel::get_slided_axis_expand_window`].
#[derive(Debug, Clone, PartialEq)]
pub struct SlideResult {
    pub axis_expand_window: [f64; 2],
    pub behavior: SlideBehavior,
}

/// Everything the layout pass derives from the rect and the config.
/// Recomputed per pass; no independent identity.
#[derive(Debug, Clone)]
struct LayoutInfo {
    layout: LayoutDirection,
    pixel_dim_index: usize,
    layout_base: f64,
    layout_length: f64,
    axis_base: f64,
    axis_length: f64,
    axis_expandable: bool,
    axis_expand_width: f64,
    axis_collapse_width: f64,
    axis_expand_window: [f64; 2],
    axis_count: usize,
    win_inner_indices: [i64; 2],
    axis_expand_window_0_pos: f64,
}

struct AxisPositionInfo {
    position: f64,
    axis_name_available_width: f64,
    axis_label_show: bool,
    name_truncate_max_width: Option<f64>,
}

/// The parallel coordinate system.
pub struct Parallel {
    config: ParallelConfig,
    /// Axis dimension names, in declaration order.
    dimensions: Vec<String>,
    axes: IndexMap<String, Axis>,
    axis_models: IndexMap<String, ParallelAxisModel>,
    /// Current expand window; starts from config, moved by expand
    /// actions.
    axis_expand_window: Option<[f64; 2]>,
    rect: Rect,
    axes_layout: IndexMap<String, AxisLayout>,
}

impl Parallel {
    /// Build the coordinate system from a resolved config. Fails fast
    /// on an empty or duplicated axis declaration.
    pub fn new(config: ParallelConfig) -> Result<Self, CoordError> {
        if config.axes.is_empty() {
            return Err(CoordError::NoAxes);
        }

        let mut axes = IndexMap::with_capacity(config.axes.len());
        let mut axis_models = IndexMap::with_capacity(config.axes.len());
        for axis_options in &config.axes {
            if axes.contains_key(&axis_options.dim) {
                return Err(CoordError::DuplicateDimension(axis_options.dim.clone()));
            }
            let scale = match axis_options.kind {
                AxisKind::Value => {
                    Scale::Value(ValueScale::new(axis_options.min, axis_options.max))
                }
                AxisKind::Category => Scale::Category(CategoryScale::new()),
            };
            axes.insert(
                axis_options.dim.clone(),
                Axis::new(&axis_options.dim, scale, axis_options.inverse),
            );
            let axis_id = axis_options
                .id
                .clone()
                .unwrap_or_else(|| axis_options.dim.clone());
            axis_models.insert(
                axis_options.dim.clone(),
                ParallelAxisModel::new(axis_id),
            );
        }

        let dimensions = config.axes.iter().map(|a| a.dim.clone()).collect();
        let axis_expand_window = config.axis_expand_window;
        Ok(Self {
            config,
            dimensions,
            axes,
            axis_models,
            axis_expand_window,
            rect: Rect::default(),
            axes_layout: IndexMap::new(),
        })
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn get_axis(&self, dim: &str) -> Option<&Axis> {
        self.axes.get(dim)
    }

    pub fn axis_model(&self, dim: &str) -> Option<&ParallelAxisModel> {
        self.axis_models.get(dim)
    }

    pub fn get_axis_layout(&self, dim: &str) -> Option<&AxisLayout> {
        self.axes_layout.get(dim)
    }

    pub fn axis_expand_window(&self) -> Option<[f64; 2]> {
        self.axis_expand_window
    }

    /// Apply an expand action and re-run axis layout.
    pub fn set_axis_expand_window(&mut self, window: [f64; 2]) {
        self.axis_expand_window = Some(window);
        self.layout_axes();
    }

    /// Route a brush result onto the matching axis model.
    pub fn set_axis_active_intervals(
        &mut self,
        dim: &str,
        intervals: Vec<[f64; 2]>,
    ) -> Result<(), CoordError> {
        let model = self
            .axis_models
            .get_mut(dim)
            .ok_or_else(|| CoordError::UnknownAxis(dim.to_string()))?;
        model.set_active_intervals(intervals);
        Ok(())
    }

    /// Union every axis scale extent from all bound series tables,
    /// then round to nice extents. Must run after data is available
    /// and before layout.
    pub fn update(&mut self, tables: &[&DataTable]) -> Result<(), CoordError> {
        for (dim, axis) in self.axes.iter_mut() {
            for table in tables {
                let info = table
                    .map_dimension(dim)
                    .ok_or_else(|| CoordError::MissingDimension(dim.clone()))?;
                match (&mut axis.scale, info.kind) {
                    (Scale::Value(scale), DimensionKind::Value) => {
                        for row in 0..table.count() {
                            if let Some(value) = table.get(dim, row) {
                                scale.union_value(value);
                            }
                        }
                    }
                    (Scale::Category(scale), DimensionKind::Category) => {
                        scale.union_count(table.category_count(&info.column));
                    }
                    (Scale::Value(_), data) => {
                        return Err(CoordError::AxisKindMismatch {
                            dim: dim.clone(),
                            axis: AxisKind::Value,
                            data,
                        });
                    }
                    (Scale::Category(_), data) => {
                        return Err(CoordError::AxisKindMismatch {
                            dim: dim.clone(),
                            axis: AxisKind::Category,
                            data,
                        });
                    }
                }
            }
            if let Scale::Value(scale) = &mut axis.scale {
                scale.nice_extent(DEFAULT_SPLIT_NUMBER);
            }
        }
        Ok(())
    }

    /// Recompute the rect from the box-layout parameters and lay out
    /// the axes.
    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) -> Result<(), CoordError> {
        self.rect = layout_rect(&self.config.box_layout, canvas_width, canvas_height)?;
        self.layout_axes();
        Ok(())
    }

    /// Whether the point lies inside the coordinate-system bounds.
    /// Expand-window interactions ignore out-of-bounds pointers.
    pub fn contain_point(&self, point: [f64; 2]) -> bool {
        let info = self.make_layout_info();
        let p_axis = point[1 - info.pixel_dim_index];
        let p_layout = point[info.pixel_dim_index];

        p_axis >= info.axis_base
            && p_axis <= info.axis_base + info.axis_length
            && p_layout >= info.layout_base
            && p_layout <= info.layout_base + info.layout_length
    }

    /// Convert one dimension value of a data item to a screen point.
    pub fn data_to_point(&self, value: f64, dim: &str) -> Result<DVec2, CoordError> {
        let axis = self
            .axes
            .get(dim)
            .ok_or_else(|| CoordError::UnknownAxis(dim.to_string()))?;
        self.axis_coord_to_point(axis.data_to_coord(value), dim)
    }

    /// Apply the cached per-axis transform to a 1-D axis coordinate.
    pub fn axis_coord_to_point(&self, coord: f64, dim: &str) -> Result<DVec2, CoordError> {
        let layout = self
            .axes_layout
            .get(dim)
            .ok_or_else(|| CoordError::UnknownAxis(dim.to_string()))?;
        Ok(layout.transform.transform_point2(DVec2::new(coord, 0.0)))
    }

    /// Whether any axis currently carries active intervals.
    pub fn has_axis_brushed(&self) -> bool {
        self.axis_models
            .values()
            .any(|model| model.active_state(None) != ActiveState::Normal)
    }

    /// Travel rows `[start, end)` (defaulting to the whole table) and
    /// report each row's activation state.
    ///
    /// With no brushing anywhere, every row is `Normal` without
    /// touching values. Otherwise a row is `Active` only if every axis
    /// classifies it active; the first `Inactive` axis wins, in
    /// declaration order.
    pub fn each_active_state<F>(
        &self,
        data: &DataTable,
        mut callback: F,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<(), CoordError>
    where
        F: FnMut(ActiveState, usize),
    {
        for dim in &self.dimensions {
            if data.map_dimension(dim).is_none() {
                return Err(CoordError::MissingDimension(dim.clone()));
            }
        }

        let start = start.unwrap_or(0);
        let end = end.unwrap_or_else(|| data.count()).min(data.count());
        let has_active = self.has_axis_brushed();
        let dims: Vec<&str> = self.dimensions.iter().map(String::as_str).collect();

        for row in start..end {
            let state = if !has_active {
                ActiveState::Normal
            } else {
                let values = data.get_values(&dims, row);
                let mut state = ActiveState::Active;
                for (model, value) in self.axis_models.values().zip(&values) {
                    if model.active_state(*value) == ActiveState::Inactive {
                        state = ActiveState::Inactive;
                        break;
                    }
                }
                state
            };
            callback(state, row);
        }
        Ok(())
    }

    /// Decide how the expand window reacts to a pointer position:
    /// stay (`None`), `Slide` proportionally, or `Jump` when the
    /// pointer is past the configured jump threshold. The returned
    /// window is clamped to `[0, width * (count - 1)]`.
    pub fn get_slided_axis_expand_window(&self, point: [f64; 2]) -> SlideResult {
        let info = self.make_layout_info();
        let mut window = info.axis_expand_window;
        let win_size = window[1] - window[0];
        let extent = [
            0.0,
            info.axis_expand_width * info.axis_count.saturating_sub(1) as f64,
        ];

        if !info.axis_expandable || !self.contain_point(point) {
            return SlideResult {
                axis_expand_window: window,
                behavior: SlideBehavior::None,
            };
        }

        // Pointer position in window-local coordinates.
        let point_coord =
            point[info.pixel_dim_index] - info.layout_base - info.axis_expand_window_0_pos;

        let mut behavior = SlideBehavior::Slide;
        let trigger_area = self.config.axis_expand_slide_trigger_area;

        // A null trigger area turns jumping off altogether; slides
        // then keep the stock dead zone.
        let deadzone = trigger_area.map_or(DEFAULT_SLIDE_TRIGGER_AREA[1], |area| area[1]);

        if info.axis_collapse_width > 0.0 {
            let mut delta;
            if let Some(area) = trigger_area.filter(|area| point_coord < win_size * area[0]) {
                behavior = SlideBehavior::Jump;
                delta = point_coord - win_size * area[2];
            } else if let Some(area) =
                trigger_area.filter(|area| point_coord > win_size * (1.0 - area[0]))
            {
                behavior = SlideBehavior::Jump;
                delta = point_coord - win_size * (1.0 - area[2]);
            } else {
                // Dead zone in the window center so small pointer
                // movements don't jitter the window.
                delta = point_coord - win_size * deadzone;
                if delta >= 0.0 {
                    delta = point_coord - win_size * (1.0 - deadzone);
                    if delta <= 0.0 {
                        delta = 0.0;
                    }
                }
            }
            // Screen pixels to window coordinate space.
            delta *= info.axis_expand_width / info.axis_collapse_width;
            if delta != 0.0 {
                slider_move(delta, &mut window, extent);
            } else {
                behavior = SlideBehavior::None;
            }
        } else {
            // Screen too narrow for distinct collapsed axes: recenter
            // the window under the pointer. Tagged `Slide` so callers
            // treat it like any other synchronous move.
            let mut pos = extent[1] * point_coord / win_size;
            if !pos.is_finite() {
                pos = 0.0;
            }
            window[0] = (pos - win_size / 2.0).max(0.0);
            window[1] = (window[0] + win_size).min(extent[1]);
            window[0] = window[1] - win_size;
        }

        SlideResult {
            axis_expand_window: window,
            behavior,
        }
    }

    fn make_layout_info(&self) -> LayoutInfo {
        let rect = self.rect;
        let layout = self.config.layout;
        let (pixel_dim_index, layout_base, layout_length, axis_base, axis_length) = match layout {
            LayoutDirection::Horizontal => (0, rect.x, rect.width, rect.y, rect.height),
            LayoutDirection::Vertical => (1, rect.y, rect.height, rect.x, rect.width),
        };
        let layout_extent = [0.0, layout_length];
        let axis_count = self.dimensions.len();

        let axis_expand_width = restrict(self.config.axis_expand_width, layout_extent);
        let axis_expand_count = self.config.axis_expand_count.min(axis_count);
        let axis_expandable = self.config.axis_expandable
            && axis_count > 3
            && axis_count > axis_expand_count
            && axis_expand_count > 1
            && axis_expand_width > 0.0
            && layout_length > 0.0;

        // Window coordinates run over [0, width * (count - 1)] so the
        // narrow-screen case (collapse width 0) still has a meaningful
        // window even though collapsed axes fully overlap.
        let win_size;
        let axis_expand_window = match self.axis_expand_window {
            None => {
                win_size = restrict(
                    axis_expand_width * axis_expand_count.saturating_sub(1) as f64,
                    layout_extent,
                );
                let center = self
                    .config
                    .axis_expand_center
                    .unwrap_or(axis_count / 2) as f64;
                let start = axis_expand_width * center - win_size / 2.0;
                [start, start + win_size]
            }
            Some(window) => {
                win_size = restrict(window[1] - window[0], layout_extent);
                [window[0], window[0] + win_size]
            }
        };

        let mut axis_collapse_width = if axis_count > axis_expand_count {
            (layout_length - win_size) / (axis_count - axis_expand_count) as f64
        } else {
            0.0
        };
        // A sliver thinner than 3px reads as noise; overlap instead.
        if axis_collapse_width < 3.0 {
            axis_collapse_width = 0.0;
        }

        // First and last axis indices inside the expanded zone.
        let win_inner_indices = if axis_expand_width > 0.0 {
            [
                round1(axis_expand_window[0] / axis_expand_width).floor() as i64 + 1,
                round1(axis_expand_window[1] / axis_expand_width).ceil() as i64 - 1,
            ]
        } else {
            [0, 0]
        };

        let axis_expand_window_0_pos = if axis_expand_width > 0.0 {
            axis_collapse_width / axis_expand_width * axis_expand_window[0]
        } else {
            0.0
        };

        LayoutInfo {
            layout,
            pixel_dim_index,
            layout_base,
            layout_length,
            axis_base,
            axis_length,
            axis_expandable,
            axis_expand_width,
            axis_collapse_width,
            axis_expand_window,
            axis_count,
            win_inner_indices,
            axis_expand_window_0_pos,
        }
    }

    fn layout_axes(&mut self) {
        let rect = self.rect;
        let info = self.make_layout_info();

        for axis in self.axes.values_mut() {
            axis.set_extent(0.0, info.axis_length);
        }

        self.axes_layout.clear();
        for (index, dim) in self.dimensions.iter().enumerate() {
            let position_info = if info.axis_expandable {
                layout_axis_with_expand(index, &info)
            } else {
                layout_axis_without_expand(index, &info)
            };

            let (position, rotation) = match info.layout {
                LayoutDirection::Horizontal => (
                    DVec2::new(
                        rect.x + position_info.position,
                        rect.y + info.axis_length,
                    ),
                    // Axis coordinates grow upward on a y-down screen.
                    -FRAC_PI_2,
                ),
                LayoutDirection::Vertical => {
                    (DVec2::new(rect.x, rect.y + position_info.position), 0.0)
                }
            };
            let transform = DAffine2::from_translation(position) * DAffine2::from_angle(rotation);

            self.axes_layout.insert(
                dim.clone(),
                AxisLayout {
                    position,
                    rotation,
                    transform,
                    axis_name_available_width: position_info.axis_name_available_width,
                    axis_label_show: position_info.axis_label_show,
                    name_truncate_max_width: position_info.name_truncate_max_width,
                },
            );
        }

        debug!(
            axes = self.axes_layout.len(),
            expandable = info.axis_expandable,
            "axis layout pass"
        );
        debug_assert_eq!(self.axes_layout.len(), self.dimensions.len());
    }
}

fn layout_axis_without_expand(axis_index: usize, info: &LayoutInfo) -> AxisPositionInfo {
    let step = if info.axis_count > 1 {
        info.layout_length / (info.axis_count - 1) as f64
    } else {
        0.0
    };
    AxisPositionInfo {
        position: step * axis_index as f64,
        axis_name_available_width: step,
        axis_label_show: true,
        name_truncate_max_width: None,
    }
}

fn layout_axis_with_expand(axis_index: usize, info: &LayoutInfo) -> AxisPositionInfo {
    let index = axis_index as i64;
    let collapse = info.axis_collapse_width;

    if index < info.win_inner_indices[0] {
        AxisPositionInfo {
            position: axis_index as f64 * collapse,
            axis_name_available_width: collapse,
            axis_label_show: false,
            name_truncate_max_width: Some(collapse),
        }
    } else if index <= info.win_inner_indices[1] {
        AxisPositionInfo {
            position: info.axis_expand_window_0_pos + axis_index as f64 * info.axis_expand_width
                - info.axis_expand_window[0],
            axis_name_available_width: info.axis_expand_width,
            axis_label_show: true,
            name_truncate_max_width: None,
        }
    } else {
        AxisPositionInfo {
            position: info.layout_length
                - (info.axis_count - 1 - axis_index) as f64 * collapse,
            axis_name_available_width: collapse,
            axis_label_show: false,
            name_truncate_max_width: Some(collapse),
        }
    }
}

/// Move a window by `delta`, clamped so it stays inside `extent`
/// without changing size.
fn slider_move(delta: f64, window: &mut [f64; 2], extent: [f64; 2]) {
    let delta = delta
        .max(extent[0] - window[0])
        .min(extent[1] - window[1]);
    window[0] += delta;
    window[1] += delta;
}

fn restrict(value: f64, extent: [f64; 2]) -> f64 {
    value.max(extent[0]).min(extent[1])
}

/// Round to one decimal place, the tolerance used when snapping
/// window edges to axis indices.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
