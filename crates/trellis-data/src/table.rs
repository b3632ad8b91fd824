use ahash::AHashMap;
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use indexmap::IndexSet;
use tracing::trace;

use crate::DataError;

/// How a dimension's values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    /// Numeric values on a continuous scale.
    Value,
    /// String values on an ordinal scale.
    Category,
}

/// Maps an axis dimension name (`dim0`, ...) to a concrete column.
#[derive(Debug, Clone)]
pub struct DimensionInfo {
    pub name: String,
    pub kind: DimensionKind,
    pub column: String,
}

impl DimensionInfo {
    pub fn value(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::Value,
            column: column.into(),
        }
    }

    pub fn category(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::Category,
            column: column.into(),
        }
    }
}

/// A chart-facing view over one Arrow record batch.
///
/// Category columns get an ordinal registry (first-appearance order)
/// built at construction; `get` resolves category cells to their
/// ordinal index so axes only ever see numbers.
pub struct DataTable {
    batch: RecordBatch,
    dimensions: Vec<DimensionInfo>,
    dim_lookup: AHashMap<String, usize>,
    column_lookup: AHashMap<String, usize>,
    categories: AHashMap<String, IndexSet<String>>,
    identity_dim: Option<String>,
}

impl DataTable {
    /// Build a table over `batch`. Fails fast on unknown columns or
    /// column/kind mismatches (misconfigured option, not a data error).
    pub fn new(
        batch: RecordBatch,
        dimensions: Vec<DimensionInfo>,
        identity_dim: Option<String>,
    ) -> Result<Self, DataError> {
        let mut column_lookup = AHashMap::new();
        for (idx, field) in batch.schema().fields().iter().enumerate() {
            column_lookup.insert(field.name().clone(), idx);
        }

        let mut dim_lookup = AHashMap::new();
        let mut categories: AHashMap<String, IndexSet<String>> = AHashMap::new();

        for (idx, dim) in dimensions.iter().enumerate() {
            let col_idx = *column_lookup
                .get(&dim.column)
                .ok_or_else(|| DataError::UnknownColumn(dim.column.clone()))?;
            let data_type = batch.schema().field(col_idx).data_type().clone();

            match dim.kind {
                DimensionKind::Value => {
                    if !matches!(data_type, DataType::Float64 | DataType::Int64) {
                        return Err(DataError::ColumnType {
                            column: dim.column.clone(),
                            expected: "Float64 or Int64",
                            actual: data_type.to_string(),
                        });
                    }
                }
                DimensionKind::Category => {
                    if data_type != DataType::Utf8 {
                        return Err(DataError::ColumnType {
                            column: dim.column.clone(),
                            expected: "Utf8",
                            actual: data_type.to_string(),
                        });
                    }
                    if let Some(array) =
                        batch.column(col_idx).as_any().downcast_ref::<StringArray>()
                    {
                        let registry = categories.entry(dim.column.clone()).or_default();
                        for row in 0..array.len() {
                            if !array.is_null(row) {
                                registry.insert(array.value(row).to_string());
                            }
                        }
                    }
                }
            }
            dim_lookup.insert(dim.name.clone(), idx);
        }

        if let Some(id_dim) = &identity_dim {
            if !dim_lookup.contains_key(id_dim) {
                return Err(DataError::UnknownDimension(id_dim.clone()));
            }
        }

        trace!(
            rows = batch.num_rows(),
            dims = dimensions.len(),
            "data table constructed"
        );

        Ok(Self {
            batch,
            dimensions,
            dim_lookup,
            column_lookup,
            categories,
            identity_dim,
        })
    }

    pub fn count(&self) -> usize {
        self.batch.num_rows()
    }

    /// All declared dimensions, in declaration order.
    pub fn dimensions(&self) -> &[DimensionInfo] {
        &self.dimensions
    }

    pub fn identity_dimension(&self) -> Option<&str> {
        self.identity_dim.as_deref()
    }

    /// Resolve an axis dimension name to its dimension info.
    pub fn map_dimension(&self, axis_dim: &str) -> Option<&DimensionInfo> {
        self.dim_lookup.get(axis_dim).map(|&idx| &self.dimensions[idx])
    }

    /// Read one cell by dimension name.
    ///
    /// Value dimensions return the numeric cell (`None` for null, NaN
    /// passes through); category dimensions return the ordinal index,
    /// `None` for null or unregistered categories.
    pub fn get(&self, dim: &str, row: usize) -> Option<f64> {
        let info = self.map_dimension(dim)?;
        if row >= self.count() {
            return None;
        }
        match info.kind {
            DimensionKind::Value => self.read_numeric(&info.column, row),
            DimensionKind::Category => {
                let col_idx = *self.column_lookup.get(&info.column)?;
                let array = self
                    .batch
                    .column(col_idx)
                    .as_any()
                    .downcast_ref::<StringArray>()?;
                if array.is_null(row) {
                    return None;
                }
                let registry = self.categories.get(&info.column)?;
                registry
                    .get_index_of(array.value(row))
                    .map(|idx| idx as f64)
            }
        }
    }

    /// Read one row across several dimensions.
    pub fn get_values(&self, dims: &[&str], row: usize) -> Vec<Option<f64>> {
        dims.iter().map(|dim| self.get(dim, row)).collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_lookup.contains_key(column)
    }

    /// Read a numeric column by name, independent of any dimension
    /// declaration (used for per-item style data).
    pub fn get_column_f64(&self, column: &str, row: usize) -> Option<f64> {
        if row >= self.count() {
            return None;
        }
        self.read_numeric(column, row)
    }

    /// Number of distinct categories registered for a category column.
    pub fn category_count(&self, column: &str) -> usize {
        self.categories.get(column).map_or(0, |r| r.len())
    }

    /// Stable identity for one row, from the declared identity
    /// dimension's cell. `None` when no identity dimension is declared
    /// or the cell is null.
    pub fn identity(&self, row: usize) -> Option<String> {
        let id_dim = self.identity_dim.as_deref()?;
        let info = self.map_dimension(id_dim)?;
        let col_idx = *self.column_lookup.get(&info.column)?;
        let column = self.batch.column(col_idx);

        if column.is_null(row) {
            return None;
        }
        if let Some(array) = column.as_any().downcast_ref::<StringArray>() {
            return Some(array.value(row).to_string());
        }
        if let Some(array) = column.as_any().downcast_ref::<Int64Array>() {
            return Some(array.value(row).to_string());
        }
        if let Some(array) = column.as_any().downcast_ref::<Float64Array>() {
            return Some(array.value(row).to_string());
        }
        None
    }

    fn read_numeric(&self, column: &str, row: usize) -> Option<f64> {
        let col_idx = *self.column_lookup.get(column)?;
        let array = self.batch.column(col_idx);
        if array.is_null(row) {
            return None;
        }
        if let Some(floats) = array.as_any().downcast_ref::<Float64Array>() {
            return Some(floats.value(row));
        }
        if let Some(ints) = array.as_any().downcast_ref::<Int64Array>() {
            return Some(ints.value(row) as f64);
        }
        None
    }
}
