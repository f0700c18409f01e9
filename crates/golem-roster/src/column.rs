//! Roster columns and cell values
//!
//! Every roster column has a source name (the CSV header), a display name
//! (the table heading) and a kind. Cells are borrowed, typed views into a
//! record.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Value kind stored in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Free text or identifier
    Text,
    /// Boolean certification flag
    Flag,
    /// Whole number
    Integer,
    /// Floating point number
    Float,
}

impl ColumnKind {
    /// Check if values of this kind can be range-compared
    #[inline]
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Lower-case kind name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Flag => "flag",
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }
}

impl Display for ColumnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Roster column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Column {
    FullName,
    TaxonCode,
    TaxonState,
    NuccGroup,
    NuccClassification,
    NuccSpecialization,
    IndividualPlace,
    IndividualZip5,
    IndividualCounty,
    IndividualState,
    FacilityName,
    FacilityPlace,
    FacilityZip5,
    FacilityState,
    MedicalSchool,
    Tenure,
    EnumerationDate,
    GraduationYear,
    Gender,
    FullNameOther,
    Npi,
    NpiReplacement,
    MedicareId,
    SoleProprietor,
    Telehealth,
    MedicareSpecialty,
    CountyCode,
    GeoId,
    Lat,
    Long,
    Dni,
    LastUpdateDate,
}

impl Column {
    /// Every column in roster file order
    pub const ALL: [Self; 32] = [
        Self::FullName,
        Self::TaxonCode,
        Self::TaxonState,
        Self::NuccGroup,
        Self::NuccClassification,
        Self::NuccSpecialization,
        Self::IndividualPlace,
        Self::IndividualZip5,
        Self::IndividualCounty,
        Self::IndividualState,
        Self::FacilityName,
        Self::FacilityPlace,
        Self::FacilityZip5,
        Self::FacilityState,
        Self::MedicalSchool,
        Self::Tenure,
        Self::EnumerationDate,
        Self::GraduationYear,
        Self::Gender,
        Self::FullNameOther,
        Self::Npi,
        Self::NpiReplacement,
        Self::MedicareId,
        Self::SoleProprietor,
        Self::Telehealth,
        Self::MedicareSpecialty,
        Self::CountyCode,
        Self::GeoId,
        Self::Lat,
        Self::Long,
        Self::Dni,
        Self::LastUpdateDate,
    ];

    /// Identity and location columns shown before any user-chosen column
    pub const DEFAULT_DISPLAY: [Self; 5] = [
        Self::FullName,
        Self::TaxonState,
        Self::NuccGroup,
        Self::NuccClassification,
        Self::NuccSpecialization,
    ];

    /// Header name in the roster file
    #[must_use]
    pub fn source_name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::TaxonCode => "taxon_code",
            Self::TaxonState => "taxon_state",
            Self::NuccGroup => "nucc_group",
            Self::NuccClassification => "nucc_classification",
            Self::NuccSpecialization => "nucc_specialization",
            Self::IndividualPlace => "individual_place",
            Self::IndividualZip5 => "individual_zip5",
            Self::IndividualCounty => "individual_county",
            Self::IndividualState => "individual_state",
            Self::FacilityName => "facility_name",
            Self::FacilityPlace => "facility_place",
            Self::FacilityZip5 => "facility_zip5",
            Self::FacilityState => "facility_state",
            Self::MedicalSchool => "medical_school",
            Self::Tenure => "tenure",
            Self::EnumerationDate => "enumeration_date",
            Self::GraduationYear => "graduation_year",
            Self::Gender => "gender",
            Self::FullNameOther => "full_name_other",
            Self::Npi => "npi",
            Self::NpiReplacement => "npi_replacement",
            Self::MedicareId => "medicare_id",
            Self::SoleProprietor => "sole_proprietor",
            Self::Telehealth => "telehealth",
            Self::MedicareSpecialty => "medicare_specialty",
            Self::CountyCode => "county_code",
            Self::GeoId => "geo_id",
            Self::Lat => "lat",
            Self::Long => "long",
            Self::Dni => "dni",
            Self::LastUpdateDate => "last_update_date",
        }
    }

    /// Table heading
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::TaxonCode => "Taxon Code",
            Self::TaxonState => "License State",
            Self::NuccGroup => "NUCC Group",
            Self::NuccClassification => "NUCC Classification",
            Self::NuccSpecialization => "NUCC Specialization",
            Self::IndividualPlace => "Individual Place",
            Self::IndividualZip5 => "Individual Post Code",
            Self::IndividualCounty => "Individual County",
            Self::IndividualState => "Individual State",
            Self::FacilityName => "Facility Name",
            Self::FacilityPlace => "Facility Place",
            Self::FacilityZip5 => "Facility Postcode",
            Self::FacilityState => "Facility State",
            Self::MedicalSchool => "Medical School",
            Self::Tenure => "Tenure",
            Self::EnumerationDate => "Enumeration Date",
            Self::GraduationYear => "Graduation Year",
            Self::Gender => "Gender",
            Self::FullNameOther => "Full Name, other",
            Self::Npi => "NPI",
            Self::NpiReplacement => "NPI, other",
            Self::MedicareId => "Medicare ID",
            Self::SoleProprietor => "Sole Proprietor",
            Self::Telehealth => "Telehealth",
            Self::MedicareSpecialty => "Medicare Specialty",
            Self::CountyCode => "County Code",
            Self::GeoId => "Geo ID",
            Self::Lat => "Latitude",
            Self::Long => "Longitude",
            Self::Dni => "DNI",
            Self::LastUpdateDate => "Last Update Date",
        }
    }

    /// Value kind
    #[must_use]
    pub fn kind(self) -> ColumnKind {
        match self {
            Self::Tenure => ColumnKind::Integer,
            Self::SoleProprietor | Self::Telehealth => ColumnKind::Flag,
            Self::Lat | Self::Long => ColumnKind::Float,
            _ => ColumnKind::Text,
        }
    }

    /// Look up a column by source or display name
    ///
    /// Display names match case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|column| {
            column.source_name() == name || column.display_name().eq_ignore_ascii_case(name)
        })
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Borrowed, typed view of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Text cell
    Text(Option<&'a str>),
    /// Flag cell
    Flag(Option<bool>),
    /// Integer cell
    Integer(Option<i64>),
    /// Float cell
    Float(Option<f64>),
}

impl Cell<'_> {
    /// Check if the cell holds no value
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Text(v) => v.is_none(),
            Self::Flag(v) => v.is_none(),
            Self::Integer(v) => v.is_none(),
            Self::Float(v) => v.is_none(),
        }
    }

    /// Numeric value of integer and float cells
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Integer(v) => v.map(|v| v as f64),
            Self::Float(v) => v,
            Self::Text(_) | Self::Flag(_) => None,
        }
    }

    /// Text rendering used for option lists and export; null renders empty
    #[must_use]
    pub fn render(&self) -> String {
        match *self {
            Self::Text(v) => v.unwrap_or_default().to_string(),
            Self::Flag(v) => v.map(|b| b.to_string()).unwrap_or_default(),
            Self::Integer(v) => v.map(|n| n.to_string()).unwrap_or_default(),
            Self::Float(v) => v.map(|n| n.to_string()).unwrap_or_default(),
        }
    }

    /// Owned, hashable key for grouping and equality
    #[must_use]
    pub fn key(&self) -> CellKey {
        match *self {
            Self::Text(Some(v)) => CellKey::Text(v.to_string()),
            Self::Flag(Some(v)) => CellKey::Flag(v),
            Self::Integer(Some(v)) => CellKey::Integer(v),
            // -0.0 and 0.0 group together
            Self::Float(Some(v)) => CellKey::Float(if v == 0.0 { 0 } else { v.to_bits() }),
            _ => CellKey::Null,
        }
    }
}

/// Hashable form of a cell value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    /// No value
    Null,
    /// Text value
    Text(String),
    /// Flag value
    Flag(bool),
    /// Integer value
    Integer(i64),
    /// Float value by bit pattern
    Float(u64),
}
