use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identifier for an element within its owning group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Stroke style applied to a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// RGBA, each channel in `[0, 1]`.
    pub stroke: [f32; 4],
    pub width: f32,
    pub opacity: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke: [0.2, 0.4, 0.8, 1.0],
            width: 1.0,
            opacity: 1.0,
        }
    }
}

/// The drawable shape of a polyline: one 2D point per defined axis
/// value, plus an optional smoothing factor in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolylineShape {
    pub points: Vec<DVec2>,
    pub smooth: f64,
}

/// A recorded shape transition. Fire-and-forget: the embedding
/// renderer interpolates `from` to `to`; a newer transition on the
/// same element supersedes this one.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTransition {
    pub from: Vec<DVec2>,
    pub to: Vec<DVec2>,
    pub duration_ms: u64,
}

/// One rendered polyline element.
#[derive(Debug, Clone)]
pub struct Polyline {
    id: ElementId,
    pub shape: PolylineShape,
    pub style: LineStyle,
    /// Set for elements produced by progressive rendering; such
    /// elements never animate.
    pub incremental: bool,
    transition: Option<ShapeTransition>,
}

impl Polyline {
    pub fn new(id: ElementId, points: Vec<DVec2>) -> Self {
        Self {
            id,
            shape: PolylineShape {
                points,
                smooth: 0.0,
            },
            style: LineStyle::default(),
            incremental: false,
            transition: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Replace the point shape. With `animation_ms` a transition from
    /// the current points is recorded; updating to identical points is
    /// a no-op either way. Returns whether the shape actually changed.
    pub fn update_shape(&mut self, points: Vec<DVec2>, animation_ms: Option<u64>) -> bool {
        if points == self.shape.points {
            return false;
        }
        match animation_ms {
            Some(duration_ms) if !self.incremental => {
                self.transition = Some(ShapeTransition {
                    from: std::mem::replace(&mut self.shape.points, points.clone()),
                    to: points,
                    duration_ms,
                });
            }
            _ => {
                self.shape.points = points;
                self.transition = None;
            }
        }
        true
    }

    /// The currently recorded transition, if any.
    pub fn transition(&self) -> Option<&ShapeTransition> {
        self.transition.as_ref()
    }

    /// Consume the recorded transition (called by the driving renderer
    /// once it has scheduled the animation).
    pub fn take_transition(&mut self) -> Option<ShapeTransition> {
        self.transition.take()
    }
}
