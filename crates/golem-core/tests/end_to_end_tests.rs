//! Load fixture files, browse, filter, select and export

use golem_core::prelude::*;
use golem_roster::FilterEngine;
use golem_test_utils::{setup_test_golem, write_fixture_files};
use pretty_assertions::assert_eq;

const PHYSICIANS: &str = "Allopathic & Osteopathic Physicians";

fn path(names: &[&str]) -> SelectionPath {
    SelectionPath::new(names.iter().copied()).unwrap()
}

fn names(view: &FilterView) -> Vec<String> {
    view.rows().iter().filter_map(|r| r.full_name.clone()).collect()
}

#[test]
fn loads_configured_files() {
    let files = write_fixture_files();
    let golem = Golem::load(files.config()).unwrap();

    assert_eq!(golem.roster().len(), 7);
    assert!(golem.skipped().is_empty());
    assert_eq!(
        golem.list_groups(),
        [PHYSICIANS, "Dental Providers", "Student Health Care"]
    );
    assert_eq!(golem.list_children(&path(&[PHYSICIANS])), ["Pediatrics", "Surgery"]);
}

#[test]
fn missing_input_path_is_reported() {
    let err = Golem::load(GolemConfig::new()).unwrap_err();
    assert!(matches!(err, GolemError::MissingInput("taxonomy")));
}

#[test]
fn classification_with_own_code_includes_children() {
    let golem = setup_test_golem();
    let resolution = golem.resolve_codes(&path(&[PHYSICIANS, "Surgery"])).unwrap();

    assert_eq!(resolution.kind, ResolutionKind::Structural);
    assert_eq!(
        resolution.codes.into_iter().collect::<Vec<_>>(),
        ["208600000X", "2086S0105X", "2086S0127X"]
    );
}

#[test]
fn surgery_view_collapses_duplicate_rows() {
    let golem = setup_test_golem();
    let mut session = golem.session("ann");

    let outcome = session.run(&golem.request(&path(&[PHYSICIANS, "Surgery"])).unwrap());
    assert_eq!(outcome.view.matched(), 4);
    assert_eq!(names(&outcome.view), ["Ann Lee", "Bo Park", "Cy Ng"]);
}

#[test]
fn optional_filters_narrow_the_view() {
    let golem = setup_test_golem();
    let base = golem.request(&path(&[PHYSICIANS, "Surgery"])).unwrap();
    let run = |request: FilterRequest| names(&golem.filter(&request).unwrap());

    let men = FilterKind::Gender.predicate(&FilterChoice::Value("M".into())).unwrap();
    let senior = FilterKind::Tenure.predicate(&FilterChoice::Range(40.0, 10.0)).unwrap();
    let telehealth = FilterKind::Telehealth.predicate(&FilterChoice::Checked(true)).unwrap();
    let medicare = FilterKind::Medicare.predicate(&FilterChoice::Checked(true)).unwrap();
    let name = FilterKind::FullName.predicate(&FilterChoice::Text("NG".into())).unwrap();

    assert_eq!(run(base.clone().with_predicate(men.clone())), ["Bo Park", "Cy Ng"]);
    assert_eq!(run(base.clone().with_predicates([men, senior])), ["Cy Ng"]);
    assert_eq!(run(base.clone().with_predicate(telehealth)), ["Ann Lee"]);
    assert_eq!(run(base.clone().with_predicate(medicare)), ["Ann Lee", "Cy Ng"]);
    assert_eq!(run(base.with_predicate(name)), ["Cy Ng"]);
}

#[test]
fn controls_follow_the_current_view() {
    let golem = setup_test_golem();
    let mut session = golem.session("ann");
    session.run(&golem.request(&path(&[PHYSICIANS, "Surgery"])).unwrap());

    let controls = session.controls(&[FilterKind::Gender, FilterKind::Tenure, FilterKind::IndividualState]);
    assert_eq!(
        controls,
        [
            (
                FilterKind::Gender,
                FilterControl::Select {
                    options: vec!["F".into(), "M".into()]
                }
            ),
            (FilterKind::Tenure, FilterControl::Slider { min: 5.0, max: 30.0 }),
            (
                FilterKind::IndividualState,
                FilterControl::Select {
                    options: vec!["NJ".into(), "NY".into()]
                }
            ),
        ]
    );

    session.run(&golem.request(&path(&[PHYSICIANS, "Pediatrics"])).unwrap());
    assert!(session.controls(&[FilterKind::Tenure]).is_empty());
}

#[test]
fn group_without_codes_falls_back_to_its_name() {
    let golem = setup_test_golem();
    let group = path(&["Student Health Care"]);

    let resolution = golem.resolve_codes(&group).unwrap();
    assert!(resolution.is_fallback());

    let view = golem.filter(&golem.request(&group).unwrap()).unwrap();
    assert_eq!(names(&view), ["Flo Kim"]);
}

#[test]
fn export_selected_rows() {
    let golem = setup_test_golem();
    let mut session = golem.session("ann");
    session.run(
        &golem
            .request(&path(&[PHYSICIANS, "Surgery"]))
            .unwrap()
            .with_column("Tenure"),
    );
    assert_eq!(session.select_all(), 3);

    let bytes = golem.export(session.user(), &[Column::Tenure], None).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "Full Name,License State,NUCC Group,NUCC Classification,NUCC Specialization,Tenure\n\
         Ann Lee,NY,Allopathic & Osteopathic Physicians,Surgery,Hand Surgery,12\n\
         Bo Park,NJ,Allopathic & Osteopathic Physicians,Surgery,,5\n\
         Cy Ng,NY,Allopathic & Osteopathic Physicians,Surgery,Trauma Surgery,30\n"
    );

    let subset = golem.export(session.user(), &[], Some(&[2, 0])).unwrap();
    let text = String::from_utf8(subset).unwrap();
    let first_cells: Vec<_> = text.lines().skip(1).map(|l| l.split(',').next().unwrap_or_default()).collect();
    assert_eq!(first_cells, ["Cy Ng", "Ann Lee"]);

    assert!(golem.export(session.user(), &[], Some(&[3])).is_err());
}

#[test]
fn configured_delimiter_and_columns_apply_to_export() {
    let files = write_fixture_files();
    let config = files
        .config()
        .with_default_columns(["Full Name", "NPI"])
        .with_export_delimiter(';');
    let golem = Golem::load(config).unwrap();

    let mut session = golem.session("bo");
    let outcome = session.run(&golem.request(&path(&["Dental Providers"])).unwrap());
    assert_eq!(outcome.view.headers(), ["Full Name", "NPI"]);

    session.select(&[0]).unwrap();
    let bytes = golem.export(session.user(), &[], None).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "Full Name;NPI\nEd Fox;1000000006\n");
}

#[test]
fn reverse_lookup_by_code() {
    let golem = setup_test_golem();
    let paths = golem.index().paths_for_code("2086S0105X");
    assert_eq!(paths, [path(&[PHYSICIANS, "Surgery", "Hand Surgery"])]);
}

#[test]
fn every_flattened_code_is_reachable_from_the_root() {
    let golem = setup_test_golem();
    let all = golem.resolve_codes(&SelectionPath::root()).unwrap().codes;

    for row in golem.index().flattened() {
        assert!(all.contains(&row.code), "{}", row.code);
    }
    assert_eq!(all.len(), golem.index().flattened().len());

    let engine = FilterEngine::new(std::sync::Arc::new(golem.roster().clone()));
    assert_eq!(engine.apply_code_filter(golem.roster(), &all).len(), 6);
}
