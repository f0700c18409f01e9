//! Delimited export of a selection
//!
//! Header row is the display names of the chosen columns (defaults first,
//! then extras); rows follow in accumulation order.

use crate::error::{Result, SelectionError};
use golem_roster::{Column, PractitionerRecord, Roster};
use std::collections::HashSet;
use std::sync::Arc;

/// What to export and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    default_columns: Vec<Column>,
    extra_columns: Vec<Column>,
    indices: Option<Vec<usize>>,
    delimiter: u8,
    clear: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            default_columns: Column::DEFAULT_DISPLAY.to_vec(),
            extra_columns: Vec::new(),
            indices: None,
            delimiter: b',',
            clear: false,
        }
    }
}

impl ExportOptions {
    /// Default columns, every row, comma separated
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default columns
    #[must_use]
    pub fn with_default_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.default_columns = columns.into_iter().collect();
        self
    }

    /// Append user-chosen columns after the defaults
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.extra_columns.extend(columns);
        self
    }

    /// Export only these positions of the selection, in this order
    #[must_use]
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices = Some(indices.into_iter().collect());
        self
    }

    /// Field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Empty the selection once it has been written
    #[must_use]
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Field delimiter
    #[inline]
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Whether exporting empties the selection
    #[inline]
    #[must_use]
    pub fn clears(&self) -> bool {
        self.clear
    }

    /// Exported columns, first occurrence kept
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        let mut seen = HashSet::new();
        self.default_columns
            .iter()
            .chain(&self.extra_columns)
            .copied()
            .filter(|column| seen.insert(*column))
            .collect()
    }

    /// Rows to export from `rows`
    ///
    /// # Errors
    /// Returns [`SelectionError::IndexOutOfRange`] for the first bad index.
    pub fn pick(&self, rows: &[Arc<PractitionerRecord>]) -> Result<Vec<Arc<PractitionerRecord>>> {
        let Some(indices) = &self.indices else {
            return Ok(rows.to_vec());
        };
        indices
            .iter()
            .map(|&index| {
                rows.get(index).cloned().ok_or(SelectionError::IndexOutOfRange {
                    index,
                    len: rows.len(),
                })
            })
            .collect()
    }
}

/// Serialize rows with the given options
///
/// # Errors
/// Returns [`SelectionError`] on a bad index or a write failure.
pub fn write_rows(rows: &[Arc<PractitionerRecord>], options: &ExportOptions) -> Result<Vec<u8>> {
    let picked = options.pick(rows)?;
    let columns = options.columns();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.display_name()))?;
    for record in &picked {
        writer.write_record(Roster::cells(record, &columns).iter().map(|cell| cell.render()))?;
    }

    writer
        .into_inner()
        .map_err(|err| SelectionError::Export(err.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Arc<PractitionerRecord>> {
        ["Ann Lee", "Bo, Park"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                Arc::new(PractitionerRecord {
                    full_name: Some(name.into()),
                    tenure: i64::try_from(i).ok(),
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn header_then_rows() {
        let options = ExportOptions::new()
            .with_default_columns([Column::FullName])
            .with_columns([Column::Tenure, Column::FullName]);
        let bytes = write_rows(&rows(), &options).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Full Name,Tenure\nAnn Lee,0\n\"Bo, Park\",1\n"
        );
    }

    #[test]
    fn subset_and_delimiter() {
        let options = ExportOptions::new()
            .with_default_columns([Column::FullName])
            .with_indices([1])
            .with_delimiter(b';');
        let bytes = write_rows(&rows(), &options).unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), "Full Name\nBo, Park\n");
    }

    #[test]
    fn bad_index() {
        let options = ExportOptions::new().with_indices([0, 5]);
        let err = write_rows(&rows(), &options).unwrap_err();
        assert!(matches!(err, SelectionError::IndexOutOfRange { index: 5, len: 2 }));
    }

    #[test]
    fn default_header() {
        let bytes = write_rows(&[], &ExportOptions::new()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Full Name,License State,NUCC Group,NUCC Classification,NUCC Specialization\n"
        );
    }
}
