//! Per-axis brush state and activation classification.

use serde::{Deserialize, Serialize};

/// Classification of one value (or one data row) against the brushed
/// intervals. `Normal` means no brushing applies anywhere; once any
/// axis is brushed, every value is either `Active` or `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveState {
    Normal,
    Active,
    Inactive,
}

/// Holds the active (brushed) intervals for one parallel axis.
#[derive(Debug, Clone)]
pub struct ParallelAxisModel {
    axis_id: String,
    active_intervals: Vec<[f64; 2]>,
}

impl ParallelAxisModel {
    pub fn new(axis_id: impl Into<String>) -> Self {
        Self {
            axis_id: axis_id.into(),
            active_intervals: Vec::new(),
        }
    }

    pub fn axis_id(&self) -> &str {
        &self.axis_id
    }

    /// Replace the interval list wholesale; reversed pairs are swapped
    /// into `min <= max` order. An empty list clears brushing on this
    /// axis.
    pub fn set_active_intervals(&mut self, intervals: Vec<[f64; 2]>) {
        self.active_intervals = intervals
            .into_iter()
            .map(|[lo, hi]| if lo <= hi { [lo, hi] } else { [hi, lo] })
            .collect();
    }

    pub fn active_intervals(&self) -> &[[f64; 2]] {
        &self.active_intervals
    }

    /// Classify a value. `None` or non-finite values never match an
    /// interval; with no intervals at all every value is `Normal`,
    /// which lets callers skip classification entirely.
    pub fn active_state(&self, value: Option<f64>) -> ActiveState {
        if self.active_intervals.is_empty() {
            return ActiveState::Normal;
        }
        let value = match value {
            Some(v) if v.is_finite() => v,
            _ => return ActiveState::Inactive,
        };
        for [lo, hi] in &self.active_intervals {
            if *lo <= value && value <= *hi {
                return ActiveState::Active;
            }
        }
        ActiveState::Inactive
    }
}
