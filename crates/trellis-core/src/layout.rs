//! Box-layout rectangle resolution.
//!
//! Components position themselves with the usual left/top/right/bottom
//! plus optional explicit width/height, each given either as pixels or
//! as a percent of the canvas.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: [f64; 2]) -> bool {
        point[0] >= self.x
            && point[0] <= self.x + self.width
            && point[1] >= self.y
            && point[1] <= self.y + self.height
    }
}

/// One box-layout edge or size: absolute pixels or a percent string
/// such as `"80%"` resolved against the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutValue {
    Px(f64),
    Percent(String),
}

impl LayoutValue {
    fn resolve(&self, total: f64) -> Result<f64, CoreError> {
        match self {
            LayoutValue::Px(v) => Ok(*v),
            LayoutValue::Percent(s) => {
                let digits = s
                    .strip_suffix('%')
                    .ok_or_else(|| CoreError::InvalidPercent(s.clone()))?;
                let ratio: f64 = digits
                    .trim()
                    .parse()
                    .map_err(|_| CoreError::InvalidPercent(s.clone()))?;
                Ok(ratio / 100.0 * total)
            }
        }
    }
}

impl From<f64> for LayoutValue {
    fn from(v: f64) -> Self {
        LayoutValue::Px(v)
    }
}

/// Box-layout parameters as they appear in user options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxLayoutParams {
    pub left: Option<LayoutValue>,
    pub top: Option<LayoutValue>,
    pub right: Option<LayoutValue>,
    pub bottom: Option<LayoutValue>,
    pub width: Option<LayoutValue>,
    pub height: Option<LayoutValue>,
}

/// Resolve box-layout parameters against the canvas size.
///
/// Explicit width/height win; otherwise the size is what the opposing
/// edge pair leaves over. Sizes are clamped to be non-negative.
pub fn layout_rect(
    params: &BoxLayoutParams,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Rect, CoreError> {
    let resolve = |v: &Option<LayoutValue>, total: f64| -> Result<Option<f64>, CoreError> {
        v.as_ref().map(|v| v.resolve(total)).transpose()
    };

    let left = resolve(&params.left, canvas_width)?;
    let right = resolve(&params.right, canvas_width)?;
    let top = resolve(&params.top, canvas_height)?;
    let bottom = resolve(&params.bottom, canvas_height)?;

    let width = match resolve(&params.width, canvas_width)? {
        Some(w) => w,
        None => canvas_width - left.unwrap_or(0.0) - right.unwrap_or(0.0),
    };
    let height = match resolve(&params.height, canvas_height)? {
        Some(h) => h,
        None => canvas_height - top.unwrap_or(0.0) - bottom.unwrap_or(0.0),
    };

    let x = match left {
        Some(l) => l,
        None => right.map_or(0.0, |r| canvas_width - r - width),
    };
    let y = match top {
        Some(t) => t,
        None => bottom.map_or(0.0, |b| canvas_height - b - height),
    };

    let rect = Rect::new(x, y, width.max(0.0), height.max(0.0));
    if !(rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite())
    {
        return Err(CoreError::DegenerateLayout);
    }
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: f64) -> Option<LayoutValue> {
        Some(LayoutValue::Px(v))
    }

    #[test]
    fn test_edges_only() {
        let params = BoxLayoutParams {
            left: px(80.0),
            top: px(60.0),
            right: px(80.0),
            bottom: px(60.0),
            ..Default::default()
        };
        let rect = layout_rect(&params, 800.0, 600.0).unwrap();
        assert_eq!(rect, Rect::new(80.0, 60.0, 640.0, 480.0));
    }

    #[test]
    fn test_explicit_size_with_right_anchor() {
        let params = BoxLayoutParams {
            right: px(10.0),
            bottom: px(20.0),
            width: px(100.0),
            height: px(50.0),
            ..Default::default()
        };
        let rect = layout_rect(&params, 800.0, 600.0).unwrap();
        assert_eq!(rect, Rect::new(690.0, 530.0, 100.0, 50.0));
    }

    #[test]
    fn test_percent_values() {
        let params = BoxLayoutParams {
            left: Some(LayoutValue::Percent("10%".to_string())),
            top: px(0.0),
            width: Some(LayoutValue::Percent("50%".to_string())),
            height: px(100.0),
            ..Default::default()
        };
        let rect = layout_rect(&params, 400.0, 300.0).unwrap();
        assert_eq!(rect, Rect::new(40.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_bad_percent_is_an_error() {
        let params = BoxLayoutParams {
            left: Some(LayoutValue::Percent("80px".to_string())),
            ..Default::default()
        };
        assert!(layout_rect(&params, 400.0, 300.0).is_err());
    }

    #[test]
    fn test_oversized_edges_clamp_to_empty() {
        let params = BoxLayoutParams {
            left: px(300.0),
            right: px(300.0),
            ..Default::default()
        };
        let rect = layout_rect(&params, 400.0, 300.0).unwrap();
        assert_eq!(rect.width, 0.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains([10.0, 10.0]));
        assert!(rect.contains([110.0, 60.0]));
        assert!(!rect.contains([111.0, 30.0]));
        assert!(!rect.contains([50.0, 5.0]));
    }
}
