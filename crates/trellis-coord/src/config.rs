//! Parallel coordinate-system options.
//!
//! User options are plain serde structs with everything optional;
//! `ParallelOptions::resolve` produces the immutable resolved config
//! the coordinate system actually runs on. Resolution is a pure
//! function — defaults are never merged back into user option trees.

use serde::{Deserialize, Serialize};
use trellis_core::{BoxLayoutParams, LayoutValue};

/// Primary layout direction of the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Which pointer gesture drives expand-window changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandTriggerOn {
    #[default]
    Click,
    Mousemove,
}

/// Default `[jump_threshold, slide_deadzone, jump_target]` fractions.
pub const DEFAULT_SLIDE_TRIGGER_AREA: [f64; 3] = [-0.15, 0.05, 0.4];

/// Slide trigger-area option. `Auto` takes the stock fractions; an
/// explicit `null` disables the jump branches so the window only ever
/// slides continuously.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideTriggerArea {
    /// `[jump_threshold, slide_deadzone, jump_target]`, fractions of
    /// the window size.
    Area([f64; 3]),
    Disabled,
    #[default]
    Auto,
}

impl SlideTriggerArea {
    fn resolve(self) -> Option<[f64; 3]> {
        match self {
            SlideTriggerArea::Area(area) => Some(area),
            SlideTriggerArea::Disabled => None,
            SlideTriggerArea::Auto => Some(DEFAULT_SLIDE_TRIGGER_AREA),
        }
    }
}

/// Axis value interpretation, mirroring the data dimension kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[default]
    Value,
    Category,
}

/// One axis declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    /// Axis dimension name (`dim0`, ...), also the data-table lookup key.
    pub dim: String,
    #[serde(default)]
    pub kind: AxisKind,
    /// Optional id used in brush-select action payloads; defaults to
    /// the dimension name.
    #[serde(default)]
    pub id: Option<String>,
    /// Pin the lower/upper end of the value domain.
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub inverse: bool,
}

impl AxisOptions {
    pub fn value(dim: impl Into<String>) -> Self {
        Self {
            dim: dim.into(),
            kind: AxisKind::Value,
            id: None,
            min: None,
            max: None,
            inverse: false,
        }
    }

    pub fn category(dim: impl Into<String>) -> Self {
        Self {
            kind: AxisKind::Category,
            ..Self::value(dim)
        }
    }

    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// User-facing parallel coordinate-system options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParallelOptions {
    pub layout: Option<LayoutDirection>,
    pub axis_expandable: Option<bool>,
    pub axis_expand_center: Option<usize>,
    pub axis_expand_count: Option<usize>,
    pub axis_expand_width: Option<f64>,
    /// Throttle cadence for slide dispatch, in milliseconds.
    pub axis_expand_rate: Option<u64>,
    /// Dispatch delay armed after a jump, in milliseconds.
    pub axis_expand_debounce: Option<u64>,
    pub axis_expand_trigger_on: Option<ExpandTriggerOn>,
    #[serde(default)]
    pub axis_expand_slide_trigger_area: SlideTriggerArea,
    pub axis_expand_window: Option<[f64; 2]>,
    #[serde(default)]
    pub box_layout: BoxLayoutParams,
    #[serde(default)]
    pub axes: Vec<AxisOptions>,
}

impl ParallelOptions {
    /// Resolve against defaults into an immutable config.
    pub fn resolve(&self) -> ParallelConfig {
        let box_layout = BoxLayoutParams {
            left: self
                .box_layout
                .left
                .clone()
                .or(Some(LayoutValue::Px(80.0))),
            top: self.box_layout.top.clone().or(Some(LayoutValue::Px(60.0))),
            right: self
                .box_layout
                .right
                .clone()
                .or(Some(LayoutValue::Px(80.0))),
            bottom: self
                .box_layout
                .bottom
                .clone()
                .or(Some(LayoutValue::Px(60.0))),
            width: self.box_layout.width.clone(),
            height: self.box_layout.height.clone(),
        };

        ParallelConfig {
            layout: self.layout.unwrap_or_default(),
            axis_expandable: self.axis_expandable.unwrap_or(false),
            axis_expand_center: self.axis_expand_center,
            axis_expand_count: self.axis_expand_count.unwrap_or(0),
            axis_expand_width: self.axis_expand_width.unwrap_or(50.0),
            axis_expand_rate: self.axis_expand_rate.unwrap_or(17),
            axis_expand_debounce: self.axis_expand_debounce.unwrap_or(50),
            axis_expand_trigger_on: self.axis_expand_trigger_on.unwrap_or_default(),
            axis_expand_slide_trigger_area: self.axis_expand_slide_trigger_area.resolve(),
            axis_expand_window: self.axis_expand_window,
            box_layout,
            axes: self.axes.clone(),
        }
    }
}

/// Resolved, immutable configuration the coordinate system runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelConfig {
    pub layout: LayoutDirection,
    pub axis_expandable: bool,
    pub axis_expand_center: Option<usize>,
    pub axis_expand_count: usize,
    pub axis_expand_width: f64,
    pub axis_expand_rate: u64,
    pub axis_expand_debounce: u64,
    pub axis_expand_trigger_on: ExpandTriggerOn,
    /// `None` disables the jump branches entirely.
    pub axis_expand_slide_trigger_area: Option<[f64; 3]>,
    pub axis_expand_window: Option<[f64; 2]>,
    pub box_layout: BoxLayoutParams,
    pub axes: Vec<AxisOptions>,
}
