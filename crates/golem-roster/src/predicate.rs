//! Secondary row filters
//!
//! A [`FilterPredicate`] is a pure row test. Predicates compose by AND, so
//! applying a set of them gives the same rows in any order.

use crate::column::{Cell, Column, ColumnKind};
use crate::error::{Result, SchemaMismatchError};
use crate::record::PractitionerRecord;
use std::fmt::{self, Display, Formatter};

/// Named secondary filter on one column
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    /// Text cell equals `value` exactly
    Equals {
        /// Text column
        column: Column,
        /// Required value
        value: String,
    },
    /// Flag cell is true
    FlagTrue {
        /// Flag column
        column: Column,
    },
    /// Cell holds any value
    NotNull {
        /// Any column
        column: Column,
    },
    /// Text cell contains `needle`, ignoring case; an empty needle keeps
    /// every row
    Contains {
        /// Text column
        column: Column,
        /// Lower-cased search text
        needle: String,
    },
    /// Numeric cell lies in `[min, max]`; nulls never match
    Range {
        /// Integer or float column
        column: Column,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
}

impl FilterPredicate {
    /// Exact match on a text column
    #[inline]
    #[must_use]
    pub fn equals(column: Column, value: impl Into<String>) -> Self {
        Self::Equals {
            column,
            value: value.into(),
        }
    }

    /// Flag column must be true
    #[inline]
    #[must_use]
    pub fn flag_true(column: Column) -> Self {
        Self::FlagTrue { column }
    }

    /// Column must hold a value
    #[inline]
    #[must_use]
    pub fn not_null(column: Column) -> Self {
        Self::NotNull { column }
    }

    /// Case-insensitive substring match on a text column
    #[inline]
    #[must_use]
    pub fn contains(column: Column, needle: &str) -> Self {
        Self::Contains {
            column,
            needle: needle.to_lowercase(),
        }
    }

    /// Inclusive numeric range; bounds may be given in either order
    ///
    /// `min == max` is a valid zero-width range.
    #[inline]
    #[must_use]
    pub fn range(column: Column, a: f64, b: f64) -> Self {
        Self::Range {
            column,
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Column the predicate reads
    #[must_use]
    pub fn column(&self) -> Column {
        match self {
            Self::Equals { column, .. }
            | Self::FlagTrue { column }
            | Self::NotNull { column }
            | Self::Contains { column, .. }
            | Self::Range { column, .. } => *column,
        }
    }

    /// Check the predicate against its column's kind
    ///
    /// # Errors
    /// Returns [`SchemaMismatchError::WrongKind`] when the column cannot be
    /// tested this way.
    pub fn check(&self) -> Result<()> {
        let column = self.column();
        let found = column.kind();
        let expected = match self {
            Self::NotNull { .. } => return Ok(()),
            Self::Equals { .. } | Self::Contains { .. } if found == ColumnKind::Text => return Ok(()),
            Self::FlagTrue { .. } if found == ColumnKind::Flag => return Ok(()),
            Self::Range { .. } if found.is_numeric() => return Ok(()),
            Self::Equals { .. } | Self::Contains { .. } => "text",
            Self::FlagTrue { .. } => "flags",
            Self::Range { .. } => "numbers",
        };
        Err(SchemaMismatchError::WrongKind {
            column,
            expected,
            found,
        })
    }

    /// Test one record
    ///
    /// Assumes [`check`](Self::check) passed; a kind mismatch never matches.
    #[must_use]
    pub fn matches(&self, record: &PractitionerRecord) -> bool {
        let cell = record.cell(self.column());
        match self {
            Self::Equals { value, .. } => matches!(cell, Cell::Text(Some(v)) if v == value),
            Self::FlagTrue { .. } => matches!(cell, Cell::Flag(Some(true))),
            Self::NotNull { .. } => !cell.is_null(),
            Self::Contains { needle, .. } => {
                needle.is_empty()
                    || matches!(cell, Cell::Text(Some(v)) if v.to_lowercase().contains(needle.as_str()))
            }
            Self::Range { min, max, .. } => cell
                .as_f64()
                .is_some_and(|value| *min <= value && value <= *max),
        }
    }
}

impl Display for FilterPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { column, value } => write!(f, "{column} = {value:?}"),
            Self::FlagTrue { column } => write!(f, "{column} is set"),
            Self::NotNull { column } => write!(f, "{column} is present"),
            Self::Contains { column, needle } => write!(f, "{column} contains {needle:?}"),
            Self::Range { column, min, max } => write!(f, "{column} in [{min}, {max}]"),
        }
    }
}
