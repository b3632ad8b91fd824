//! Parallel series model.
//!
//! User options are an all-optional serde struct; `resolve` produces
//! the immutable scope the renderer and visual pass run on.

use serde::{Deserialize, Serialize};
use tracing::warn;
use trellis_render::LineStyle;

/// Smoothing as users write it: a flag or an explicit factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Smooth {
    Flag(bool),
    Factor(f64),
}

impl Smooth {
    /// Coerce to a factor: `true` means the stock curve, `false` and
    /// anything non-finite mean straight segments.
    pub fn factor(self) -> f64 {
        match self {
            Smooth::Flag(true) => DEFAULT_SMOOTH,
            Smooth::Flag(false) => 0.0,
            Smooth::Factor(f) if f.is_finite() => f,
            Smooth::Factor(f) => {
                warn!(value = f, "non-finite smooth factor, using 0");
                0.0
            }
        }
    }
}

const DEFAULT_SMOOTH: f64 = 0.3;

/// User-facing parallel series options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParallelSeriesOptions {
    pub smooth: Option<Smooth>,
    /// RGBA stroke, each channel in `[0, 1]`.
    pub stroke: Option<[f32; 4]>,
    pub line_width: Option<f32>,
    pub opacity: Option<f32>,
    pub active_opacity: Option<f32>,
    pub inactive_opacity: Option<f32>,
    /// Row count above which rendering goes progressive.
    pub progressive_threshold: Option<usize>,
    pub animation: Option<bool>,
    pub animation_duration_ms: Option<u64>,
    /// Column holding a per-row opacity override, honored only while
    /// no axis is brushed.
    pub opacity_column: Option<String>,
}

impl ParallelSeriesOptions {
    /// Resolve against defaults into an immutable scope.
    pub fn resolve(&self) -> ParallelSeriesScope {
        let mut line_style = LineStyle::default();
        if let Some(stroke) = self.stroke {
            line_style.stroke = stroke;
        }
        if let Some(width) = self.line_width {
            line_style.width = width;
        }
        line_style.opacity = self.opacity.unwrap_or(0.45);

        ParallelSeriesScope {
            smooth: self.smooth.map_or(0.0, Smooth::factor),
            line_style,
            active_opacity: self.active_opacity.unwrap_or(1.0),
            inactive_opacity: self.inactive_opacity.unwrap_or(0.05),
            progressive_threshold: self.progressive_threshold.unwrap_or(500),
            animation: self.animation.unwrap_or(true),
            animation_duration_ms: self.animation_duration_ms.unwrap_or(1000),
            opacity_column: self.opacity_column.clone(),
        }
    }
}

/// Resolved series scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelSeriesScope {
    pub smooth: f64,
    pub line_style: LineStyle,
    pub active_opacity: f32,
    pub inactive_opacity: f32,
    pub progressive_threshold: usize,
    pub animation: bool,
    pub animation_duration_ms: u64,
    pub opacity_column: Option<String>,
}

impl ParallelSeriesScope {
    /// Whether `row_count` rows should render through the progressive
    /// path instead of the diff path.
    pub fn is_progressive(&self, row_count: usize) -> bool {
        row_count > self.progressive_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let scope = ParallelSeriesOptions::default().resolve();
        assert_eq!(scope.smooth, 0.0);
        assert_eq!(scope.line_style.opacity, 0.45);
        assert_eq!(scope.active_opacity, 1.0);
        assert_eq!(scope.inactive_opacity, 0.05);
        assert_eq!(scope.progressive_threshold, 500);
        assert!(scope.animation);
    }

    #[test]
    fn test_smooth_coercion() {
        assert_eq!(Smooth::Flag(true).factor(), 0.3);
        assert_eq!(Smooth::Flag(false).factor(), 0.0);
        assert_eq!(Smooth::Factor(0.7).factor(), 0.7);
        assert_eq!(Smooth::Factor(f64::NAN).factor(), 0.0);
        assert_eq!(Smooth::Factor(f64::INFINITY).factor(), 0.0);
    }

    #[test]
    fn test_smooth_deserializes_from_bool_or_number() {
        let options: ParallelSeriesOptions =
            serde_json::from_str(r#"{ "smooth": true }"#).unwrap();
        assert_eq!(options.resolve().smooth, 0.3);
        let options: ParallelSeriesOptions =
            serde_json::from_str(r#"{ "smooth": 0.5 }"#).unwrap();
        assert_eq!(options.resolve().smooth, 0.5);
    }

    #[test]
    fn test_progressive_gate() {
        let scope = ParallelSeriesOptions {
            progressive_threshold: Some(100),
            ..Default::default()
        }
        .resolve();
        assert!(!scope.is_progressive(100));
        assert!(scope.is_progressive(101));
    }
}
