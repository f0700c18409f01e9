//! Practitioner records
//!
//! One [`PractitionerRecord`] per roster row. Field names follow the roster
//! file headers so records deserialize straight from CSV; every cell is
//! nullable.

use crate::column::{Cell, CellKey, Column};
use serde::{Deserialize, Deserializer};

/// One row of the practitioner roster
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PractitionerRecord {
    pub full_name: Option<String>,
    pub taxon_code: Option<String>,
    pub taxon_state: Option<String>,
    pub nucc_group: Option<String>,
    pub nucc_classification: Option<String>,
    pub nucc_specialization: Option<String>,
    pub individual_place: Option<String>,
    pub individual_zip5: Option<String>,
    pub individual_county: Option<String>,
    pub individual_state: Option<String>,
    pub facility_name: Option<String>,
    pub facility_place: Option<String>,
    pub facility_zip5: Option<String>,
    pub facility_state: Option<String>,
    pub medical_school: Option<String>,
    #[serde(deserialize_with = "coerce::integer")]
    pub tenure: Option<i64>,
    pub enumeration_date: Option<String>,
    pub graduation_year: Option<String>,
    pub gender: Option<String>,
    pub full_name_other: Option<String>,
    pub npi: Option<String>,
    pub npi_replacement: Option<String>,
    pub medicare_id: Option<String>,
    #[serde(deserialize_with = "coerce::flag")]
    pub sole_proprietor: Option<bool>,
    #[serde(deserialize_with = "coerce::flag")]
    pub telehealth: Option<bool>,
    pub medicare_specialty: Option<String>,
    pub county_code: Option<String>,
    pub geo_id: Option<String>,
    #[serde(deserialize_with = "coerce::float")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "coerce::float")]
    pub long: Option<f64>,
    pub dni: Option<String>,
    pub last_update_date: Option<String>,
}

impl PractitionerRecord {
    /// Typed view of one cell
    #[must_use]
    pub fn cell(&self, column: Column) -> Cell<'_> {
        fn text(value: &Option<String>) -> Cell<'_> {
            Cell::Text(value.as_deref())
        }

        match column {
            Column::FullName => text(&self.full_name),
            Column::TaxonCode => text(&self.taxon_code),
            Column::TaxonState => text(&self.taxon_state),
            Column::NuccGroup => text(&self.nucc_group),
            Column::NuccClassification => text(&self.nucc_classification),
            Column::NuccSpecialization => text(&self.nucc_specialization),
            Column::IndividualPlace => text(&self.individual_place),
            Column::IndividualZip5 => text(&self.individual_zip5),
            Column::IndividualCounty => text(&self.individual_county),
            Column::IndividualState => text(&self.individual_state),
            Column::FacilityName => text(&self.facility_name),
            Column::FacilityPlace => text(&self.facility_place),
            Column::FacilityZip5 => text(&self.facility_zip5),
            Column::FacilityState => text(&self.facility_state),
            Column::MedicalSchool => text(&self.medical_school),
            Column::Tenure => Cell::Integer(self.tenure),
            Column::EnumerationDate => text(&self.enumeration_date),
            Column::GraduationYear => text(&self.graduation_year),
            Column::Gender => text(&self.gender),
            Column::FullNameOther => text(&self.full_name_other),
            Column::Npi => text(&self.npi),
            Column::NpiReplacement => text(&self.npi_replacement),
            Column::MedicareId => text(&self.medicare_id),
            Column::SoleProprietor => Cell::Flag(self.sole_proprietor),
            Column::Telehealth => Cell::Flag(self.telehealth),
            Column::MedicareSpecialty => text(&self.medicare_specialty),
            Column::CountyCode => text(&self.county_code),
            Column::GeoId => text(&self.geo_id),
            Column::Lat => Cell::Float(self.lat),
            Column::Long => Cell::Float(self.long),
            Column::Dni => text(&self.dni),
            Column::LastUpdateDate => text(&self.last_update_date),
        }
    }

    /// Grouping key over the given columns
    #[must_use]
    pub fn key(&self, columns: &[Column]) -> Vec<CellKey> {
        columns.iter().map(|&column| self.cell(column).key()).collect()
    }

    /// Grouping key over every column (full-row identity)
    #[must_use]
    pub fn full_key(&self) -> Vec<CellKey> {
        self.key(&Column::ALL)
    }
}

/// Lenient cell coercion for roster files
///
/// Blank cells become `None`; anything else must parse.
pub mod coerce {
    use super::{Deserialize, Deserializer};
    use serde::de::Error;

    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    /// Parse a boolean flag written in any of the usual spellings
    #[must_use]
    pub fn parse_flag(value: &str) -> Option<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        }
    }

    /// Deserialize an optional flag
    ///
    /// # Errors
    /// Fails on a non-blank value that is not a recognizable boolean.
    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        match raw(deserializer)? {
            None => Ok(None),
            Some(s) => parse_flag(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid boolean: {s:?}"))),
        }
    }

    /// Deserialize an optional integer, accepting a zero fraction ("12.0")
    ///
    /// # Errors
    /// Fails on a non-blank value that is not a whole number.
    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let Some(s) = raw(deserializer)? else {
            return Ok(None);
        };
        let whole = s.strip_suffix(".0").unwrap_or(&s);
        whole
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: {s:?}")))
    }

    /// Deserialize an optional float
    ///
    /// # Errors
    /// Fails on a non-blank value that is not a number.
    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let Some(s) = raw(deserializer)? else {
            return Ok(None);
        };
        s.parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid number: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_exposes_typed_values() {
        let record = PractitionerRecord {
            full_name: Some("Ada Lovelace".into()),
            tenure: Some(12),
            telehealth: Some(true),
            lat: Some(40.7),
            ..Default::default()
        };

        assert_eq!(record.cell(Column::FullName), Cell::Text(Some("Ada Lovelace")));
        assert_eq!(record.cell(Column::Tenure), Cell::Integer(Some(12)));
        assert_eq!(record.cell(Column::Telehealth), Cell::Flag(Some(true)));
        assert_eq!(record.cell(Column::Lat), Cell::Float(Some(40.7)));
        assert!(record.cell(Column::MedicareId).is_null());
    }

    #[test]
    fn cell_kind_matches_column_kind() {
        let record = PractitionerRecord::default();
        for column in Column::ALL {
            let kind = match record.cell(column) {
                Cell::Text(_) => crate::ColumnKind::Text,
                Cell::Flag(_) => crate::ColumnKind::Flag,
                Cell::Integer(_) => crate::ColumnKind::Integer,
                Cell::Float(_) => crate::ColumnKind::Float,
            };
            assert_eq!(kind, column.kind(), "{column}");
        }
    }

    #[test]
    fn full_key_distinguishes_rows() {
        let a = PractitionerRecord {
            npi: Some("1".into()),
            ..Default::default()
        };
        let b = PractitionerRecord {
            npi: Some("2".into()),
            ..Default::default()
        };
        assert_ne!(a.full_key(), b.full_key());
        assert_eq!(a.full_key(), a.clone().full_key());
        assert_eq!(a.key(&[Column::Gender]), b.key(&[Column::Gender]));
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(coerce::parse_flag("True"), Some(true));
        assert_eq!(coerce::parse_flag(" n "), Some(false));
        assert_eq!(coerce::parse_flag("0"), Some(false));
        assert_eq!(coerce::parse_flag("maybe"), None);
    }
}
