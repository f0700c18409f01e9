//! Roster table
//!
//! A [`Roster`] is an ordered list of shared records. Filtering never touches
//! the records themselves: it produces a new roster holding the surviving
//! rows by reference count.

use crate::column::{Cell, Column};
use crate::error::{Result, SchemaMismatchError};
use crate::record::PractitionerRecord;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Read-only practitioner table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    rows: Vec<Arc<PractitionerRecord>>,
}

impl Roster {
    /// Create roster from owned records
    #[must_use]
    pub fn new(records: Vec<PractitionerRecord>) -> Self {
        records.into_iter().collect()
    }

    /// Create roster from already shared rows
    #[inline]
    #[must_use]
    pub fn from_shared(rows: Vec<Arc<PractitionerRecord>>) -> Self {
        Self { rows }
    }

    /// Rows in order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Arc<PractitionerRecord>] {
        &self.rows
    }

    /// Row by position
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<PractitionerRecord>> {
        self.rows.get(index)
    }

    /// Iterator over records
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PractitionerRecord> {
        self.rows.iter().map(AsRef::as_ref)
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if roster has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep rows matching `keep`, preserving order
    #[must_use]
    pub fn filter(&self, mut keep: impl FnMut(&PractitionerRecord) -> bool) -> Self {
        Self {
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }

    /// Rows at the given positions, in the order given
    ///
    /// Returns `None` if any position is out of range.
    #[must_use]
    pub fn select(&self, positions: &[usize]) -> Option<Self> {
        positions
            .iter()
            .map(|&i| self.rows.get(i).cloned())
            .collect::<Option<Vec<_>>>()
            .map(Self::from_shared)
    }

    /// Sorted distinct non-null values of a column, rendered as text
    #[must_use]
    pub fn distinct_values(&self, column: Column) -> Vec<String> {
        self.iter()
            .map(|record| record.cell(column))
            .filter(|cell| !cell.is_null())
            .map(|cell| cell.render())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Smallest and largest non-null value of a numeric column
    ///
    /// `Ok(None)` when every value is null or the roster is empty.
    ///
    /// # Errors
    /// Returns [`SchemaMismatchError::WrongKind`] for non-numeric columns.
    pub fn numeric_bounds(&self, column: Column) -> Result<Option<(f64, f64)>> {
        if !column.kind().is_numeric() {
            return Err(SchemaMismatchError::WrongKind {
                column,
                expected: "numbers",
                found: column.kind(),
            });
        }

        Ok(self
            .iter()
            .filter_map(|record| record.cell(column).as_f64())
            .fold(None, |bounds, value| match bounds {
                None => Some((value, value)),
                Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
            }))
    }

    /// Cells of one row for the given columns
    #[must_use]
    pub fn cells<'a>(record: &'a PractitionerRecord, columns: &[Column]) -> Vec<Cell<'a>> {
        columns.iter().map(|&column| record.cell(column)).collect()
    }
}

impl FromIterator<PractitionerRecord> for Roster {
    fn from_iter<I: IntoIterator<Item = PractitionerRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl FromIterator<Arc<PractitionerRecord>> for Roster {
    fn from_iter<I: IntoIterator<Item = Arc<PractitionerRecord>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
