//! Diff-driven parallel series renderer.
//!
//! Owns the display group and the previously rendered table. Normal
//! renders walk the row diff and add, update, or remove one polyline
//! per row; large tables go through the progressive path, which draws
//! chunks directly with no diff and no animation.

use glam::DVec2;
use tracing::{debug, trace};

use trellis_coord::Parallel;
use trellis_data::DataTable;
use trellis_render::{ElementId, Group, Polyline};

use crate::series::ParallelSeriesScope;
use crate::ChartError;

/// What one render pass did to the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Renders one parallel series into a display group.
pub struct ParallelSeriesRenderer {
    scope: ParallelSeriesScope,
    group: Group,
    /// Element per row of the most recently rendered table.
    row_elements: Vec<Option<ElementId>>,
    last: Option<DataTable>,
}

impl ParallelSeriesRenderer {
    pub fn new(scope: ParallelSeriesScope) -> Self {
        Self {
            scope,
            group: Group::new(),
            row_elements: Vec::new(),
            last: None,
        }
    }

    pub fn scope(&self) -> &ParallelSeriesScope {
        &self.scope
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut Group {
        &mut self.group
    }

    /// Element ids indexed by current-table row.
    pub fn row_elements(&self) -> &[Option<ElementId>] {
        &self.row_elements
    }

    /// Mutable group access alongside the row mapping, for callers
    /// that restyle elements per row.
    pub fn group_and_rows_mut(&mut self) -> (&mut Group, &[Option<ElementId>]) {
        (&mut self.group, &self.row_elements)
    }

    /// Render `data` by diffing against the previous table.
    ///
    /// Added rows get a fresh polyline, updated rows keep their
    /// element and animate to the new points (identical points are a
    /// no-op), removed rows drop out of the group.
    pub fn render(&mut self, data: DataTable, coord: &Parallel) -> Result<RenderStats, ChartError> {
        self.validate(coord, &data)?;

        let diff = data.diff(self.last.as_ref());
        let mut stats = RenderStats::default();
        let mut new_elements: Vec<Option<ElementId>> = vec![None; data.count()];
        let animation = self
            .scope
            .animation
            .then_some(self.scope.animation_duration_ms);

        for &row in &diff.added {
            let points = line_points(coord, &data, row)?;
            let id = self.group.next_id();
            let mut line = Polyline::new(id, points);
            line.shape.smooth = self.scope.smooth;
            line.style = self.scope.line_style;
            self.group.add(line);
            new_elements[row] = Some(id);
            stats.added += 1;
        }

        for &(new_row, old_row) in &diff.updated {
            let id = match self.row_elements.get(old_row).copied().flatten() {
                Some(id) => id,
                None => continue,
            };
            let points = line_points(coord, &data, new_row)?;
            if let Some(line) = self.group.get_mut(id) {
                line.update_shape(points, animation);
                line.shape.smooth = self.scope.smooth;
                stats.updated += 1;
            }
            new_elements[new_row] = Some(id);
        }

        for &old_row in &diff.removed {
            if let Some(id) = self.row_elements.get(old_row).copied().flatten() {
                self.group.remove(id);
                stats.removed += 1;
            }
        }

        self.row_elements = new_elements;
        self.last = Some(data);
        debug!(?stats, elements = self.group.len(), "parallel series render");
        Ok(stats)
    }

    /// Reset for a progressive render: drop every element and forget
    /// the previous table, so the chunks that follow start clean.
    pub fn incremental_prepare(&mut self) {
        self.group.remove_all();
        self.row_elements.clear();
        self.last = None;
    }

    /// Render rows `[start, end)` directly, no diff, no animation.
    /// Returns the number of elements added.
    pub fn incremental_render(
        &mut self,
        data: &DataTable,
        coord: &Parallel,
        start: usize,
        end: usize,
    ) -> Result<usize, ChartError> {
        self.validate(coord, data)?;

        let end = end.min(data.count());
        if self.row_elements.len() < end {
            self.row_elements.resize(end, None);
        }

        let mut added = 0;
        for row in start..end {
            let points = line_points(coord, data, row)?;
            let id = self.group.next_id();
            let mut line = Polyline::new(id, points);
            line.shape.smooth = self.scope.smooth;
            line.style = self.scope.line_style;
            line.incremental = true;
            self.group.add(line);
            self.row_elements[row] = Some(id);
            added += 1;
        }
        trace!(start, end, added, "incremental chunk");
        Ok(added)
    }

    fn validate(&self, coord: &Parallel, data: &DataTable) -> Result<(), ChartError> {
        for dim in coord.dimensions() {
            if data.map_dimension(dim).is_none() {
                return Err(ChartError::MissingDimension(dim.clone()));
            }
        }
        if let Some(column) = &self.scope.opacity_column {
            if !data.has_column(column) {
                return Err(ChartError::UnknownOpacityColumn(column.clone()));
            }
        }
        Ok(())
    }
}

/// Build the polyline points for one row: one point per axis with a
/// defined value, in axis order. Null and non-finite cells contribute
/// no point, so the count may be below the axis count.
fn line_points(coord: &Parallel, data: &DataTable, row: usize) -> Result<Vec<DVec2>, ChartError> {
    let mut points = Vec::with_capacity(coord.dimensions().len());
    for dim in coord.dimensions() {
        match data.get(dim, row) {
            Some(value) if value.is_finite() => points.push(coord.data_to_point(value, dim)?),
            _ => {}
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ParallelSeriesOptions;
    use arrow::array::{Float64Array, StringArray};
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

    fn table(ids: &[&str], a: &[f64], b: &[f64]) -> DataTable {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("a", DataType::Float64, true),
            Field::new("b", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(ids.to_vec())),
                Arc::new(Float64Array::from(a.to_vec())),
                Arc::new(Float64Array::from(b.to_vec())),
            ],
        )
        .unwrap();
        DataTable::new(
            batch,
            vec![
                DimensionInfo::category("name", "id"),
                DimensionInfo::value("dim0", "a"),
                DimensionInfo::value("dim1", "b"),
            ],
            Some("name".into()),
        )
        .unwrap()
    }

    fn renderer() -> ParallelSeriesRenderer {
        ParallelSeriesRenderer::new(ParallelSeriesOptions::default().resolve())
    }

    #[test]
    fn test_first_render_adds_every_row() {
        let coord = coord();
        let mut renderer = renderer();
        let stats = renderer
            .render(table(&["x", "y"], &[1.0, 2.0], &[3.0, 4.0]), &coord)
            .unwrap();
        assert_eq!(
            stats,
            RenderStats {
                added: 2,
                updated: 0,
                removed: 0
            }
        );
        assert_eq!(renderer.group().len(), 2);
        assert!(renderer.row_elements().iter().all(Option::is_some));
    }

    // Rendering the same table twice must leave the group untouched:
    // every row diffs as an update onto identical points, which the
    // element treats as a no-op.
    #[test]
    fn test_rerender_same_table_is_idempotent() {
        let coord = coord();
        let mut renderer = renderer();
        renderer
            .render(table(&["x", "y"], &[1.0, 2.0], &[3.0, 4.0]), &coord)
            .unwrap();
        let ids: Vec<_> = renderer.group().iter().map(|l| l.id()).collect();

        let stats = renderer
            .render(table(&["x", "y"], &[1.0, 2.0], &[3.0, 4.0]), &coord)
            .unwrap();
        assert_eq!(
            stats,
            RenderStats {
                added: 0,
                updated: 2,
                removed: 0
            }
        );
        assert_eq!(renderer.group().len(), 2);
        let ids_after: Vec<_> = renderer.group().iter().map(|l| l.id()).collect();
        assert_eq!(ids, ids_after);
        assert!(renderer.group().iter().all(|l| l.transition().is_none()));
    }

    #[test]
    fn test_identity_diff_add_update_remove() {
        let coord = coord();
        let mut renderer = renderer();
        renderer
            .render(table(&["x", "y"], &[1.0, 2.0], &[3.0, 4.0]), &coord)
            .unwrap();
        // "y" changes, "x" disappears, "z" arrives.
        let stats = renderer
            .render(table(&["y", "z"], &[5.0, 6.0], &[4.0, 7.0]), &coord)
            .unwrap();
        assert_eq!(
            stats,
            RenderStats {
                added: 1,
                updated: 1,
                removed: 1
            }
        );
        assert_eq!(renderer.group().len(), 2);
        // The moved row carries a recorded transition.
        assert_eq!(
            renderer
                .group()
                .iter()
                .filter(|l| l.transition().is_some())
                .count(),
            1
        );
    }

    #[test]
    fn test_null_cells_drop_points() {
        let coord = coord();
        let mut renderer = renderer();
        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Float64, true),
            Field::new("b", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(1.0)])),
                Arc::new(Float64Array::from(vec![None::<f64>])),
            ],
        )
        .unwrap();
        let data = DataTable::new(
            batch,
            vec![
                DimensionInfo::value("dim0", "a"),
                DimensionInfo::value("dim1", "b"),
            ],
            None,
        )
        .unwrap();
        renderer.render(data, &coord).unwrap();
        let line = renderer.group().iter().next().unwrap();
        assert_eq!(line.shape.points.len(), 1);
    }

    #[test]
    fn test_missing_dimension_fails_fast() {
        let coord = coord();
        let mut renderer = renderer();
        let schema = Arc::new(Schema::new(vec![Field::new(
            "a",
            DataType::Float64,
            false,
        )]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(Float64Array::from(vec![1.0]))],
        )
        .unwrap();
        let data =
            DataTable::new(batch, vec![DimensionInfo::value("dim0", "a")], None).unwrap();
        assert!(matches!(
            renderer.render(data, &coord),
            Err(ChartError::MissingDimension(_))
        ));
        assert!(renderer.group().is_empty());
    }

    #[test]
    fn test_incremental_render_skips_diff_and_animation() {
        let coord = coord();
        let mut renderer = renderer();
        renderer
            .render(table(&["x"], &[1.0], &[2.0]), &coord)
            .unwrap();

        renderer.incremental_prepare();
        assert!(renderer.group().is_empty());

        let data = table(&["x", "y", "z"], &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert_eq!(renderer.incremental_render(&data, &coord, 0, 2).unwrap(), 2);
        assert_eq!(renderer.incremental_render(&data, &coord, 2, 9).unwrap(), 1);
        assert_eq!(renderer.group().len(), 3);
        assert!(renderer.group().iter().all(|l| l.incremental));
        assert!(renderer.group().iter().all(|l| l.transition().is_none()));
    }
}
