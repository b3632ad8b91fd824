//! Activation-to-opacity visual pass.
//!
//! Runs after rendering (and after every brush change): classifies
//! each row against the brushed axis intervals and writes the
//! resulting opacity onto the row's element style.

use trellis_coord::{ActiveState, Parallel};
use trellis_data::DataTable;
use trellis_render::{ElementId, Group};

use crate::series::ParallelSeriesScope;
use crate::renderer::ParallelSeriesRenderer;
use crate::ChartError;

/// Apply activation opacities to the elements backing rows
/// `[start, end)` (the whole table when `range` is `None`).
///
/// `Normal` rows take the series line opacity, or the per-item
/// opacity column value when one is configured and the cell is
/// defined. `Active` and `Inactive` rows always take the series-level
/// opacities; per-item overrides do not apply while brushing is live.
pub fn apply_activation_visual(
    data: &DataTable,
    coord: &Parallel,
    scope: &ParallelSeriesScope,
    group: &mut Group,
    row_elements: &[Option<ElementId>],
    range: Option<(usize, usize)>,
) -> Result<(), ChartError> {
    let (start, end) = range.unwrap_or((0, data.count()));

    coord.each_active_state(
        data,
        |state, row| {
            let Some(id) = row_elements.get(row).copied().flatten() else {
                return;
            };
            let Some(line) = group.get_mut(id) else {
                return;
            };
            line.style.opacity = match state {
                ActiveState::Normal => per_item_opacity(data, scope, row)
                    .unwrap_or(scope.line_style.opacity),
                ActiveState::Active => scope.active_opacity,
                ActiveState::Inactive => scope.inactive_opacity,
            };
        },
        Some(start),
        Some(end),
    )?;
    Ok(())
}

fn per_item_opacity(data: &DataTable, scope: &ParallelSeriesScope, row: usize) -> Option<f32> {
    let column = scope.opacity_column.as_deref()?;
    let value = data.get_column_f64(column, row)?;
    value.is_finite().then_some(value as f32)
}

impl ParallelSeriesRenderer {
    /// Convenience wrapper over [`apply_activation_visual`] using this
    /// renderer's own group and row mapping.
    pub fn apply_activation(
        &mut self,
        data: &DataTable,
        coord: &Parallel,
        range: Option<(usize, usize)>,
    ) -> Result<(), ChartError> {
        let scope = self.scope().clone();
        // Split borrows: mapping is read-only while the group mutates.
        let (group, rows) = self.group_and_rows_mut();
        apply_activation_visual(data, coord, &scope, group, rows, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ParallelSeriesOptions;
    use arrow::array::Float64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;
    use trellis_coord::{AxisOptions, ParallelOptions};
    use trellis_core::{BoxLayoutParams, LayoutValue};
    use trellis_data::DimensionInfo;

    fn coord() -> Parallel {
        let options = ParallelOptions {
            box_layout: BoxLayoutParams {
                left: Some(LayoutValue::Px(0.0)),
                top: Some(LayoutValue::Px(0.0)),
                right: Some(LayoutValue::Px(0.0)),
                bottom: Some(LayoutValue::Px(0.0)),
                ..Default::default()
            },
            axes: vec![
                AxisOptions::value("dim0").with_domain(0.0, 10.0),
                AxisOptions::value("dim1").with_domain(0.0, 10.0),
            ],
            ..Default::default()
        };
        let mut coord = Parallel::new(options.resolve()).unwrap();
        coord.update(&[]).unwrap();
        coord.resize(100.0, 100.0).unwrap();
        coord
    }

    fn table(a: &[f64], b: &[f64], alpha: Option<&[f64]>) -> DataTable {
        let mut fields = vec![
            Field::new("a", DataType::Float64, false),
            Field::new("b", DataType::Float64, false),
        ];
        let mut columns: Vec<arrow::array::ArrayRef> = vec![
            Arc::new(Float64Array::from(a.to_vec())),
            Arc::new(Float64Array::from(b.to_vec())),
        ];
        if let Some(alpha) = alpha {
            fields.push(Field::new("alpha", DataType::Float64, false));
            columns.push(Arc::new(Float64Array::from(alpha.to_vec())));
        }
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap();
        DataTable::new(
            batch,
            vec![
                DimensionInfo::value("dim0", "a"),
                DimensionInfo::value("dim1", "b"),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_brush_splits_active_and_inactive() {
        let mut coord = coord();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], None);
        let mut renderer =
            ParallelSeriesRenderer::new(ParallelSeriesOptions::default().resolve());
        renderer.render(data, &coord).unwrap();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], None);

        coord
            .set_axis_active_intervals("dim0", vec![[0.0, 4.0]])
            .unwrap();
        renderer.apply_activation(&data, &coord, None).unwrap();

        let opacities: Vec<f32> = renderer.group().iter().map(|l| l.style.opacity).collect();
        assert_eq!(opacities, vec![1.0, 0.05]);
    }

    #[test]
    fn test_no_brush_restores_normal_opacity() {
        let mut coord = coord();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], None);
        let mut renderer =
            ParallelSeriesRenderer::new(ParallelSeriesOptions::default().resolve());
        renderer.render(data, &coord).unwrap();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], None);

        coord
            .set_axis_active_intervals("dim0", vec![[0.0, 4.0]])
            .unwrap();
        renderer.apply_activation(&data, &coord, None).unwrap();
        coord.set_axis_active_intervals("dim0", Vec::new()).unwrap();
        renderer.apply_activation(&data, &coord, None).unwrap();

        let opacities: Vec<f32> = renderer.group().iter().map(|l| l.style.opacity).collect();
        assert_eq!(opacities, vec![0.45, 0.45]);
    }

    // The per-item opacity column only applies while nothing is
    // brushed; a live brush overrides it with the series opacities.
    #[test]
    fn test_per_item_opacity_only_for_normal_rows() {
        let mut coord = coord();
        let scope = ParallelSeriesOptions {
            opacity_column: Some("alpha".into()),
            ..Default::default()
        }
        .resolve();
        let mut renderer = ParallelSeriesRenderer::new(scope);
        renderer
            .render(table(&[1.0, 9.0], &[5.0, 5.0], Some(&[0.8, 0.2])), &coord)
            .unwrap();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], Some(&[0.8, 0.2]));

        renderer.apply_activation(&data, &coord, None).unwrap();
        let opacities: Vec<f32> = renderer.group().iter().map(|l| l.style.opacity).collect();
        assert_eq!(opacities, vec![0.8, 0.2]);

        coord
            .set_axis_active_intervals("dim0", vec![[0.0, 4.0]])
            .unwrap();
        renderer.apply_activation(&data, &coord, None).unwrap();
        let opacities: Vec<f32> = renderer.group().iter().map(|l| l.style.opacity).collect();
        assert_eq!(opacities, vec![1.0, 0.05]);
    }

    #[test]
    fn test_range_limits_the_pass() {
        let mut coord = coord();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], None);
        let mut renderer =
            ParallelSeriesRenderer::new(ParallelSeriesOptions::default().resolve());
        renderer.render(data, &coord).unwrap();
        let data = table(&[1.0, 9.0], &[5.0, 5.0], None);

        coord
            .set_axis_active_intervals("dim0", vec![[0.0, 4.0]])
            .unwrap();
        renderer.apply_activation(&data, &coord, Some((0, 1))).unwrap();
        let opacities: Vec<f32> = renderer.group().iter().map(|l| l.style.opacity).collect();
        // Row 1 is outside the range and keeps its render-time style.
        assert_eq!(opacities, vec![1.0, 0.45]);
    }
}
