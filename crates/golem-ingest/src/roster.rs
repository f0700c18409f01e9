//! Practitioner roster CSV loader
//!
//! Headers are matched by name; unknown columns are ignored and missing ones
//! read as null. Cells are trimmed and blanks become null.

use crate::error::{IngestError, Result};
use golem_roster::{PractitionerRecord, Roster};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a roster from any CSV source
///
/// # Errors
/// Returns [`IngestError::Csv`] for malformed CSV or a cell that does not
/// coerce to its column's type; the error names the record.
pub fn read_roster(reader: impl Read) -> Result<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let records = reader
        .deserialize::<PractitionerRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Roster::new(records))
}

/// Read a roster file
///
/// # Errors
/// Returns [`IngestError::Io`] if the file cannot be opened, otherwise as
/// [`read_roster`].
pub fn load_roster(path: impl AsRef<Path>) -> Result<Roster> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IngestError::io_error(path, e))?;
    let roster = read_roster(file)?;
    tracing::info!("Roster {} loaded ({} rows)", path.display(), roster.len());
    Ok(roster)
}
