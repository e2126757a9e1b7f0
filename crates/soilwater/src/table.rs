//! Layered measurement tables: soil-layer rows by measurement-date columns.

use std::collections::BTreeMap;

use crate::date::DateKey;
use crate::error::SoilWaterError;

/// A 2-D table of per-layer measurements.
///
/// Rows are keyed by soil-layer bottom depth (cm, ascending, unique) and
/// columns by measurement date. Values are dimensionless volumetric
/// fractions; missing measurements are `NaN`.
#[derive(Debug, Clone, Default)]
pub struct LayerTable {
    dates: Vec<DateKey>,
    rows: BTreeMap<u32, Vec<f64>>,
}

impl LayerTable {
    /// Create an empty table with no date columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given date columns.
    pub fn with_dates(dates: Vec<DateKey>) -> Self {
        Self {
            dates,
            rows: BTreeMap::new(),
        }
    }

    /// True if the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.rows.is_empty()
    }

    /// The date columns, in file order.
    pub fn dates(&self) -> &[DateKey] {
        &self.dates
    }

    /// Layer bottom depths (cm), ascending.
    pub fn depths(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    /// Bottom depth of the deepest layer (cm), if any.
    pub fn deepest(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    /// Number of layer rows.
    pub fn n_layers(&self) -> usize {
        self.rows.len()
    }

    /// Insert or replace the row for a layer.
    ///
    /// # Errors
    ///
    /// Returns [`SoilWaterError::RowLength`] if `values` does not have one
    /// entry per date column.
    pub fn insert_row(&mut self, depth: u32, values: Vec<f64>) -> Result<(), SoilWaterError> {
        if values.len() != self.dates.len() {
            return Err(SoilWaterError::RowLength {
                depth,
                got: values.len(),
                expected: self.dates.len(),
            });
        }
        self.rows.insert(depth, values);
        Ok(())
    }

    /// Value for a (layer, date) cell, if both exist.
    pub fn value(&self, depth: u32, date: &DateKey) -> Option<f64> {
        let col = self.dates.iter().position(|d| d == date)?;
        self.rows.get(&depth).map(|row| row[col])
    }

    /// Iterate over `(depth, values)` rows in ascending depth order. Each
    /// values slice is parallel to [`dates`](Self::dates).
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[f64])> {
        self.rows.iter().map(|(&d, v)| (d, v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(tokens: &[&str]) -> Vec<DateKey> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_empty() {
        let table = LayerTable::new();
        assert!(table.is_empty());
        assert_eq!(table.deepest(), None);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = LayerTable::with_dates(dates(&["2022-158", "2022-172"]));
        table.insert_row(30, vec![0.25, 0.27]).unwrap();
        table.insert_row(15, vec![0.31, 0.29]).unwrap();

        let d = "2022-172".parse().unwrap();
        assert_eq!(table.value(15, &d), Some(0.29));
        assert_eq!(table.value(30, &d), Some(0.27));
        assert_eq!(table.value(60, &d), None);
        assert_eq!(table.deepest(), Some(30));

        // Rows come back in ascending depth order regardless of insertion.
        let depths: Vec<u32> = table.depths().collect();
        assert_eq!(depths, vec![15, 30]);
    }

    #[test]
    fn test_row_length_mismatch() {
        let mut table = LayerTable::with_dates(dates(&["2022-158", "2022-172"]));
        let result = table.insert_row(15, vec![0.31]);
        assert!(matches!(
            result,
            Err(SoilWaterError::RowLength {
                depth: 15,
                got: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_missing_date_column() {
        let mut table = LayerTable::with_dates(dates(&["2022-158"]));
        table.insert_row(15, vec![0.31]).unwrap();
        let other = "2022-200".parse().unwrap();
        assert_eq!(table.value(15, &other), None);
    }
}
