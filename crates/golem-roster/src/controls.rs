//! Optional filter catalogue
//!
//! Each [`FilterKind`] knows its column, the control it needs given the
//! current rows, and how a user's choice on that control becomes a
//! [`FilterPredicate`].

use crate::column::Column;
use crate::predicate::FilterPredicate;
use crate::table::Roster;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Optional secondary filter offered next to the taxonomy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Name contains text
    FullName,
    /// Tenure within a range
    Tenure,
    /// Gender equals
    Gender,
    /// Practice place equals
    IndividualLocation,
    /// Practice state equals
    IndividualState,
    /// Practice county equals
    IndividualCounty,
    /// Practice postcode equals
    IndividualZip,
    /// Sole proprietor flag set
    SoleProprietor,
    /// Telehealth flag set
    Telehealth,
    /// Has a Medicare id
    Medicare,
}

/// Control a filter needs, derived from the rows on screen
#[derive(Debug, Clone, PartialEq)]
pub enum FilterControl {
    /// Pick one of the sorted distinct values
    Select {
        /// Options in sort order
        options: Vec<String>,
    },
    /// On/off toggle
    Checkbox,
    /// Free text
    TextInput,
    /// Inclusive numeric range
    Slider {
        /// Smallest value present
        min: f64,
        /// Largest value present
        max: f64,
    },
    /// Every row holds the same value; shown, not filterable
    Fixed {
        /// The single value
        value: String,
    },
}

/// User input on a control
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChoice {
    /// Selected option
    Value(String),
    /// Checkbox state
    Checked(bool),
    /// Typed text
    Text(String),
    /// Slider position
    Range(f64, f64),
}

impl FilterKind {
    /// Catalogue in display order
    pub const ALL: [Self; 10] = [
        Self::FullName,
        Self::Tenure,
        Self::Gender,
        Self::IndividualLocation,
        Self::IndividualState,
        Self::IndividualCounty,
        Self::IndividualZip,
        Self::SoleProprietor,
        Self::Telehealth,
        Self::Medicare,
    ];

    /// Label shown next to the control
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Tenure => "Tenure",
            Self::Gender => "Gender",
            Self::IndividualLocation => "Individual Location",
            Self::IndividualState => "Individual State",
            Self::IndividualCounty => "Individual County",
            Self::IndividualZip => "Individual ZIP Code",
            Self::SoleProprietor => "Sole Proprietor",
            Self::Telehealth => "Telehealth",
            Self::Medicare => "Medicare",
        }
    }

    /// Column the filter reads
    #[must_use]
    pub fn column(self) -> Column {
        match self {
            Self::FullName => Column::FullName,
            Self::Tenure => Column::Tenure,
            Self::Gender => Column::Gender,
            Self::IndividualLocation => Column::IndividualPlace,
            Self::IndividualState => Column::IndividualState,
            Self::IndividualCounty => Column::IndividualCounty,
            Self::IndividualZip => Column::IndividualZip5,
            Self::SoleProprietor => Column::SoleProprietor,
            Self::Telehealth => Column::Telehealth,
            Self::Medicare => Column::MedicareId,
        }
    }

    /// Control for this filter over `rows`
    ///
    /// `None` when a select or range filter has no values to offer.
    #[must_use]
    pub fn control(self, rows: &Roster) -> Option<FilterControl> {
        let column = self.column();
        match self {
            Self::FullName => Some(FilterControl::TextInput),
            Self::SoleProprietor | Self::Telehealth | Self::Medicare => Some(FilterControl::Checkbox),
            Self::Tenure => match rows.numeric_bounds(column).ok().flatten()? {
                (min, max) if min < max => Some(FilterControl::Slider { min, max }),
                (value, _) => Some(FilterControl::Fixed {
                    value: value.to_string(),
                }),
            },
            Self::Gender
            | Self::IndividualLocation
            | Self::IndividualState
            | Self::IndividualCounty
            | Self::IndividualZip => {
                let options = rows.distinct_values(column);
                (!options.is_empty()).then_some(FilterControl::Select { options })
            }
        }
    }

    /// Predicate for a choice on this filter's control
    ///
    /// `None` when the choice filters nothing (unchecked box, blank text) or
    /// does not fit the control.
    #[must_use]
    pub fn predicate(self, choice: &FilterChoice) -> Option<FilterPredicate> {
        let column = self.column();
        match (self, choice) {
            (Self::FullName, FilterChoice::Text(text)) if !text.trim().is_empty() => {
                Some(FilterPredicate::contains(column, text.trim()))
            }
            (Self::Tenure, FilterChoice::Range(a, b)) => Some(FilterPredicate::range(column, *a, *b)),
            (Self::SoleProprietor | Self::Telehealth, FilterChoice::Checked(true)) => {
                Some(FilterPredicate::flag_true(column))
            }
            (Self::Medicare, FilterChoice::Checked(true)) => Some(FilterPredicate::not_null(column)),
            (
                Self::Gender
                | Self::IndividualLocation
                | Self::IndividualState
                | Self::IndividualCounty
                | Self::IndividualZip,
                FilterChoice::Value(value),
            ) => Some(FilterPredicate::equals(column, value.clone())),
            _ => None,
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Controls for the given filters over `rows`, skipping filters with nothing
/// to offer
#[must_use]
pub fn controls(rows: &Roster, kinds: &[FilterKind]) -> Vec<(FilterKind, FilterControl)> {
    kinds
        .iter()
        .filter_map(|&kind| kind.control(rows).map(|control| (kind, control)))
        .collect()
}
