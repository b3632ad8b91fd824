use crate::scale::Scale;

/// One scaled dimension in the parallel coordinate system.
///
/// Owned exclusively by the coordinate system; rebuilt on option or
/// resize changes.
#[derive(Debug, Clone)]
pub struct Axis {
    dim: String,
    pub scale: Scale,
    extent: [f64; 2],
    pub inverse: bool,
}

impl Axis {
    pub fn new(dim: impl Into<String>, scale: Scale, inverse: bool) -> Self {
        Self {
            dim: dim.into(),
            scale,
            extent: [0.0, 0.0],
            inverse,
        }
    }

    pub fn dim(&self) -> &str {
        &self.dim
    }

    /// Pixel extent along the axis's own direction.
    pub fn set_extent(&mut self, start: f64, end: f64) {
        self.extent = [start, end];
    }

    pub fn extent(&self) -> [f64; 2] {
        self.extent
    }

    /// Map a data value to a 1-D pixel coordinate along this axis.
    pub fn data_to_coord(&self, value: f64) -> f64 {
        let mut t = self.scale.normalize(value);
        if self.inverse {
            t = 1.0 - t;
        }
        self.extent[0] + t * (self.extent[1] - self.extent[0])
    }

    /// Inverse of [`Axis::data_to_coord`].
    pub fn coord_to_data(&self, coord: f64) -> f64 {
        let span = self.extent[1] - self.extent[0];
        let mut t = if span == 0.0 {
            0.5
        } else {
            (coord - self.extent[0]) / span
        };
        if self.inverse {
            t = 1.0 - t;
        }
        self.scale.denormalize(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{ValueScale, DEFAULT_SPLIT_NUMBER};

    fn value_axis(min: f64, max: f64, inverse: bool) -> Axis {
        let mut scale = ValueScale::new(Some(min), Some(max));
        scale.nice_extent(DEFAULT_SPLIT_NUMBER);
        let mut axis = Axis::new("dim0", Scale::Value(scale), inverse);
        axis.set_extent(0.0, 100.0);
        axis
    }

    #[test]
    fn test_data_to_coord_linear() {
        let axis = value_axis(0.0, 10.0, false);
        assert_eq!(axis.data_to_coord(0.0), 0.0);
        assert_eq!(axis.data_to_coord(5.0), 50.0);
        assert_eq!(axis.data_to_coord(10.0), 100.0);
    }

    #[test]
    fn test_inverse_flips_direction() {
        let axis = value_axis(0.0, 10.0, true);
        assert_eq!(axis.data_to_coord(0.0), 100.0);
        assert_eq!(axis.data_to_coord(10.0), 0.0);
    }

    #[test]
    fn test_coord_round_trip() {
        let axis = value_axis(0.0, 10.0, false);
        assert!((axis.coord_to_data(axis.data_to_coord(3.7)) - 3.7).abs() < 1e-12);
        let inverse = value_axis(0.0, 10.0, true);
        assert!((inverse.coord_to_data(inverse.data_to_coord(3.7)) - 3.7).abs() < 1e-12);
    }
}
