//! Testing utilities for FastGolem workspace
//!
//! Shared fixtures: a small NUCC-style taxonomy and a matching roster, as
//! in-memory values and as files.

#![allow(missing_docs)]

use golem_core::{Golem, GolemConfig};
use golem_roster::{PractitionerRecord, Roster};
use golem_taxonomy::TaxonomyNode;
use std::path::PathBuf;
use tempfile::TempDir;

/// Taxonomy document with
/// - a three-level branch (Physicians > Surgery > Hand Surgery)
/// - a Classification that carries its own code and has children
/// - a Group with no codes at all (literal fallback)
pub const TREE_JSON: &str = r#"{
    "Allopathic & Osteopathic Physicians": {
        "Surgery": {
            "value": { "nucc_code": "208600000X", "nucc_definition": "General surgery" },
            "Hand Surgery": { "value": { "nucc_code": "2086S0105X", "nucc_definition": "Hand" } },
            "Trauma Surgery": { "value": { "nucc_code": "2086S0127X" } }
        },
        "Pediatrics": {
            "value": { "nucc_code": "208000000X" }
        }
    },
    "Dental Providers": {
        "Dentist": {
            "General Practice": { "value": { "nucc_code": "1223G0001X" } }
        }
    },
    "Student Health Care": {}
}"#;

/// Roster rows for [`TREE_JSON`]
///
/// Rows 0 and 1 differ only in NPI so they collapse under the default
/// display columns.
pub const ROSTER_CSV: &str = "\
full_name,taxon_code,taxon_state,nucc_group,nucc_classification,nucc_specialization,individual_place,individual_zip5,individual_county,individual_state,gender,tenure,npi,medicare_id,sole_proprietor,telehealth,lat,long
Ann Lee,2086S0105X,NY,Allopathic & Osteopathic Physicians,Surgery,Hand Surgery,Albany,12207,Albany,NY,F,12,1000000001,M1,false,true,42.65,-73.75
Ann Lee,2086S0105X,NY,Allopathic & Osteopathic Physicians,Surgery,Hand Surgery,Albany,12207,Albany,NY,F,12,1000000002,,false,true,42.65,-73.75
Bo Park,208600000X,NJ,Allopathic & Osteopathic Physicians,Surgery,,Newark,07102,Essex,NJ,M,5,1000000003,,true,false,40.73,-74.17
Cy Ng,2086S0127X,NY,Allopathic & Osteopathic Physicians,Surgery,Trauma Surgery,Buffalo,14201,Erie,NY,M,30,1000000004,M4,false,false,42.89,-78.87
Di Roy,208000000X,CA,Allopathic & Osteopathic Physicians,Pediatrics,,Fresno,93650,Fresno,CA,F,,1000000005,,,yes,,
Ed Fox,1223G0001X,NY,Dental Providers,Dentist,General Practice,Albany,12207,Albany,NY,M,8,1000000006,,no,no,42.65,-73.75
Flo Kim,Student Health Care,TX,Student Health Care,,,Austin,78701,Travis,TX,F,1,1000000007,,,,30.27,-97.74
";

pub fn sample_tree() -> TaxonomyNode {
    golem_ingest::parse_tree(TREE_JSON).unwrap().root
}

pub fn sample_roster() -> Roster {
    golem_ingest::read_roster(ROSTER_CSV.as_bytes()).unwrap()
}

pub fn record(name: &str, code: &str) -> PractitionerRecord {
    PractitionerRecord {
        full_name: Some(name.to_string()),
        taxon_code: Some(code.to_string()),
        ..Default::default()
    }
}

/// Fixture files in a temporary directory; removed on drop
pub struct FixtureFiles {
    pub dir: TempDir,
    pub tree: PathBuf,
    pub roster: PathBuf,
}

impl FixtureFiles {
    pub fn config(&self) -> GolemConfig {
        GolemConfig::new()
            .with_tree_path(&self.tree)
            .with_roster_path(&self.roster)
    }
}

pub fn write_fixture_files() -> FixtureFiles {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("nucc_tree.json");
    let roster = dir.path().join("hcp_data.csv");
    std::fs::write(&tree, TREE_JSON).unwrap();
    std::fs::write(&roster, ROSTER_CSV).unwrap();
    FixtureFiles { dir, tree, roster }
}

pub fn setup_test_golem() -> Golem {
    Golem::new(&sample_tree(), sample_roster(), GolemConfig::new()).unwrap()
}
