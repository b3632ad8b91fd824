//! Data-to-normalized scale mappings.
//!
//! A scale maps raw data values onto `[0, 1]`; the owning axis then
//! lerps across its pixel extent. Value scales carry a numeric extent
//! unioned from series data and rounded to nice bounds; category
//! scales map ordinal indices.

/// Default split count used when rounding a value extent.
pub const DEFAULT_SPLIT_NUMBER: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Value(ValueScale),
    Category(CategoryScale),
}

impl Scale {
    /// Normalize a data value into `[0, 1]` (unclamped for value
    /// scales; out-of-domain values map outside the unit range).
    pub fn normalize(&self, value: f64) -> f64 {
        match self {
            Scale::Value(scale) => scale.normalize(value),
            Scale::Category(scale) => scale.normalize(value),
        }
    }

    /// Map a normalized position back to a data value.
    pub fn denormalize(&self, t: f64) -> f64 {
        match self {
            Scale::Value(scale) => scale.denormalize(t),
            Scale::Category(scale) => scale.denormalize(t),
        }
    }

    pub fn extent(&self) -> [f64; 2] {
        match self {
            Scale::Value(scale) => scale.extent(),
            Scale::Category(scale) => scale.extent(),
        }
    }
}

/// Linear scale over a numeric data extent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueScale {
    data_min: f64,
    data_max: f64,
    min_override: Option<f64>,
    max_override: Option<f64>,
    extent: [f64; 2],
}

impl ValueScale {
    pub fn new(min_override: Option<f64>, max_override: Option<f64>) -> Self {
        Self {
            data_min: f64::INFINITY,
            data_max: f64::NEG_INFINITY,
            min_override,
            max_override,
            // Degenerate default until data arrives.
            extent: [0.0, 1.0],
        }
    }

    /// Fold one data value into the raw extent. Non-finite values are
    /// skipped (data error, recovered locally).
    pub fn union_value(&mut self, value: f64) {
        if value.is_finite() {
            self.data_min = self.data_min.min(value);
            self.data_max = self.data_max.max(value);
        }
    }

    /// Resolve the working extent: apply overrides, widen degenerate
    /// extents, and round free ends outward to a nice step.
    pub fn nice_extent(&mut self, split_number: usize) {
        let mut min = self.min_override.unwrap_or(self.data_min);
        let mut max = self.max_override.unwrap_or(self.data_max);

        if !min.is_finite() || !max.is_finite() {
            self.extent = [0.0, 1.0];
            return;
        }
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let interval = nice_interval((max - min) / split_number.max(1) as f64);
        if interval > 0.0 {
            if self.min_override.is_none() {
                min = (min / interval).floor() * interval;
            }
            if self.max_override.is_none() {
                max = (max / interval).ceil() * interval;
            }
        }
        self.extent = [min, max];
    }

    pub fn extent(&self) -> [f64; 2] {
        self.extent
    }

    pub fn normalize(&self, value: f64) -> f64 {
        let [min, max] = self.extent;
        if max == min {
            return 0.5;
        }
        (value - min) / (max - min)
    }

    pub fn denormalize(&self, t: f64) -> f64 {
        let [min, max] = self.extent;
        min + t * (max - min)
    }
}

/// Ordinal scale over `count` categories, extent `[0, count - 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryScale {
    count: usize,
}

impl CategoryScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn union_count(&mut self, count: usize) {
        self.count = self.count.max(count);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn extent(&self) -> [f64; 2] {
        if self.count == 0 {
            [0.0, 0.0]
        } else {
            [0.0, (self.count - 1) as f64]
        }
    }

    pub fn normalize(&self, ordinal: f64) -> f64 {
        let [min, max] = self.extent();
        if max == min {
            return 0.5;
        }
        (ordinal - min) / (max - min)
    }

    pub fn denormalize(&self, t: f64) -> f64 {
        let [min, max] = self.extent();
        (min + t * (max - min)).round()
    }
}

/// Round a raw interval to the nearest "nice" step (1/2/3/5 times a
/// power of ten).
fn nice_interval(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 0.0;
    }
    let exponent = raw.log10().floor();
    let exp10 = 10f64.powf(exponent);
    let fraction = raw / exp10;
    let nice_fraction = if fraction < 1.5 {
        1.0
    } else if fraction < 2.5 {
        2.0
    } else if fraction < 4.0 {
        3.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice_fraction * exp10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_nice_rounds_outward() {
        let mut scale = ValueScale::new(None, None);
        for v in [1.0, 4.0, 9.0] {
            scale.union_value(v);
        }
        scale.nice_extent(DEFAULT_SPLIT_NUMBER);
        assert_eq!(scale.extent(), [0.0, 10.0]);
    }

    #[test]
    fn test_overrides_pin_ends() {
        let mut scale = ValueScale::new(Some(0.0), Some(10.0));
        scale.union_value(123.0);
        scale.nice_extent(DEFAULT_SPLIT_NUMBER);
        assert_eq!(scale.extent(), [0.0, 10.0]);
        assert_eq!(scale.normalize(5.0), 0.5);
    }

    #[test]
    fn test_no_data_defaults_to_unit_extent() {
        let mut scale = ValueScale::new(None, None);
        scale.nice_extent(DEFAULT_SPLIT_NUMBER);
        assert_eq!(scale.extent(), [0.0, 1.0]);
    }

    #[test]
    fn test_degenerate_extent_widens() {
        let mut scale = ValueScale::new(None, None);
        scale.union_value(5.0);
        scale.nice_extent(DEFAULT_SPLIT_NUMBER);
        let [min, max] = scale.extent();
        assert!(min < 5.0 && max > 5.0);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let mut scale = ValueScale::new(None, None);
        scale.union_value(f64::NAN);
        scale.union_value(2.0);
        scale.union_value(f64::INFINITY);
        scale.union_value(8.0);
        scale.nice_extent(DEFAULT_SPLIT_NUMBER);
        assert_eq!(scale.extent(), [2.0, 8.0]);
    }

    #[test]
    fn test_category_normalize() {
        let mut scale = CategoryScale::new();
        scale.union_count(5);
        assert_eq!(scale.extent(), [0.0, 4.0]);
        assert_eq!(scale.normalize(2.0), 0.5);
        // Single category degenerates to the midpoint.
        let mut single = CategoryScale::new();
        single.union_count(1);
        assert_eq!(single.normalize(0.0), 0.5);
    }
}
