//! Hierarchical filter engine
//!
//! Pipeline per run:
//! 1. keep rows whose taxon code is in the resolved code set
//! 2. AND every secondary predicate
//! 3. collapse rows identical across the displayed columns
//!
//! The engine belongs to one session. It remembers the last view that ran
//! cleanly and serves it again when a later run fails on a schema mismatch.

use crate::column::{Cell, Column};
use crate::error::{Result, SchemaMismatchError};
use crate::predicate::FilterPredicate;
use crate::table::Roster;
use golem_taxonomy::CodeSet;
use std::collections::HashSet;
use std::sync::Arc;

/// One filter run's configuration
///
/// Display columns are the defaults followed by caller extras, with
/// duplicates removed. Names are resolved when the request runs so an
/// unknown name surfaces as a [`SchemaMismatchError`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    codes: CodeSet,
    predicates: Vec<FilterPredicate>,
    default_columns: Vec<String>,
    extra_columns: Vec<String>,
}

impl FilterRequest {
    /// Request filtering by `codes` with no secondary predicates
    #[must_use]
    pub fn new(codes: CodeSet) -> Self {
        Self {
            codes,
            predicates: Vec::new(),
            default_columns: Column::DEFAULT_DISPLAY
                .iter()
                .map(|c| c.display_name().to_string())
                .collect(),
            extra_columns: Vec::new(),
        }
    }

    /// Add a secondary predicate
    #[must_use]
    pub fn with_predicate(mut self, predicate: FilterPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add several secondary predicates
    #[must_use]
    pub fn with_predicates(mut self, predicates: impl IntoIterator<Item = FilterPredicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    /// Add a user-chosen display column
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>) -> Self {
        self.extra_columns.push(name.into());
        self
    }

    /// Add several user-chosen display columns
    #[must_use]
    pub fn with_columns<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.extra_columns.extend(names.into_iter().map(Into::into));
        self
    }

    /// Replace the default display columns
    #[must_use]
    pub fn with_default_columns<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.default_columns = names.into_iter().map(Into::into).collect();
        self
    }

    /// Code set
    #[inline]
    #[must_use]
    pub fn codes(&self) -> &CodeSet {
        &self.codes
    }

    /// Secondary predicates in the order added
    #[inline]
    #[must_use]
    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    /// Display column names: defaults, then extras, first occurrence kept
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.default_columns
            .iter()
            .chain(&self.extra_columns)
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Filtered, grouped rows ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct FilterView {
    rows: Roster,
    columns: Vec<Column>,
    matched: usize,
}

impl FilterView {
    /// Empty view over the given columns
    #[must_use]
    pub fn empty(columns: Vec<Column>) -> Self {
        Self {
            rows: Roster::default(),
            columns,
            matched: 0,
        }
    }

    /// Displayed rows
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &Roster {
        &self.rows
    }

    /// Displayed columns
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of displayed rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows that passed every filter, before grouping
    #[inline]
    #[must_use]
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Column headings
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.display_name()).collect()
    }

    /// Displayed cells rendered as text, row by row
    #[must_use]
    pub fn render(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|record| {
                Roster::cells(record, &self.columns)
                    .iter()
                    .map(Cell::render)
                    .collect()
            })
            .collect()
    }
}

/// Result of [`FilterEngine::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// View to display
    pub view: FilterView,
    /// Set when the run failed and `view` is the previous good view
    pub reverted: Option<SchemaMismatchError>,
}

impl FilterOutcome {
    /// Number of displayed rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.view.row_count()
    }

    /// Check if the run was reverted
    #[inline]
    #[must_use]
    pub fn is_reverted(&self) -> bool {
        self.reverted.is_some()
    }
}

/// Per-session filter engine over a shared roster snapshot
#[derive(Debug, Clone)]
pub struct FilterEngine {
    roster: Arc<Roster>,
    code_column: Column,
    last_good: Option<FilterView>,
}

impl FilterEngine {
    /// Create engine filtering codes on the taxon code column
    #[must_use]
    pub fn new(roster: Arc<Roster>) -> Self {
        Self {
            roster,
            code_column: Column::TaxonCode,
            last_good: None,
        }
    }

    /// Filter codes on another column
    #[must_use]
    pub fn with_code_column(mut self, column: Column) -> Self {
        self.code_column = column;
        self
    }

    /// Roster snapshot
    #[inline]
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Last view produced without error
    #[inline]
    #[must_use]
    pub fn last_good(&self) -> Option<&FilterView> {
        self.last_good.as_ref()
    }

    /// Keep rows whose code cell is in `codes`, preserving order
    #[must_use]
    pub fn apply_code_filter(&self, table: &Roster, codes: &CodeSet) -> Roster {
        let column = self.code_column;
        table.filter(|record| match record.cell(column) {
            Cell::Text(Some(code)) => codes.contains(code),
            _ => false,
        })
    }

    /// Keep rows matching one predicate
    ///
    /// # Errors
    /// Returns [`SchemaMismatchError`] if the predicate does not fit its column.
    pub fn apply_predicate(table: &Roster, predicate: &FilterPredicate) -> Result<Roster> {
        predicate.check()?;
        Ok(table.filter(|record| predicate.matches(record)))
    }

    /// Keep rows matching every predicate
    ///
    /// All predicates are checked before any row is touched.
    ///
    /// # Errors
    /// Returns the first [`SchemaMismatchError`] raised by a predicate.
    pub fn apply_predicates(table: &Roster, predicates: &[FilterPredicate]) -> Result<Roster> {
        for predicate in predicates {
            predicate.check()?;
        }
        Ok(table.filter(|record| predicates.iter().all(|p| p.matches(record))))
    }

    /// Look up columns by name
    ///
    /// # Errors
    /// Returns [`SchemaMismatchError::UnknownColumn`] for the first unknown name.
    pub fn resolve_columns<S: AsRef<str>>(names: &[S]) -> Result<Vec<Column>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Column::from_name(name).ok_or_else(|| SchemaMismatchError::UnknownColumn(name.to_string()))
            })
            .collect()
    }

    /// One row per distinct tuple over `columns`, first encountered wins
    ///
    /// Nulls group together. An empty column list leaves the table as is.
    #[must_use]
    pub fn group_and_deduplicate(table: &Roster, columns: &[Column]) -> Roster {
        if columns.is_empty() {
            return table.clone();
        }
        let mut seen = HashSet::new();
        table.filter(|record| seen.insert(record.key(columns)))
    }

    /// Run the full pipeline over `table`
    ///
    /// # Errors
    /// Returns [`SchemaMismatchError`] from column lookup or a predicate.
    pub fn filter(&self, table: &Roster, request: &FilterRequest) -> Result<FilterView> {
        let columns = Self::resolve_columns(&request.column_names())?;

        let coded = self.apply_code_filter(table, request.codes());
        tracing::debug!("Code filter kept {} of {} rows", coded.len(), table.len());

        let matched = Self::apply_predicates(&coded, request.predicates())?;
        tracing::debug!(
            "{} predicates kept {} rows",
            request.predicates().len(),
            matched.len()
        );

        let rows = Self::group_and_deduplicate(&matched, &columns);
        tracing::debug!("Grouped into {} displayed rows", rows.len());

        Ok(FilterView {
            matched: matched.len(),
            rows,
            columns,
        })
    }

    /// Run `request` against the session roster
    ///
    /// On failure the previous good view is returned with the error, or an
    /// empty view over the default columns if nothing has run yet.
    pub fn run(&mut self, request: &FilterRequest) -> FilterOutcome {
        match self.filter(&self.roster, request) {
            Ok(view) => {
                self.last_good = Some(view.clone());
                FilterOutcome { view, reverted: None }
            }
            Err(err) => {
                tracing::warn!(column = err.column_name(), "Filter run reverted: {}", err);
                let view = self
                    .last_good
                    .clone()
                    .unwrap_or_else(|| FilterView::empty(Column::DEFAULT_DISPLAY.to_vec()));
                FilterOutcome {
                    view,
                    reverted: Some(err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PractitionerRecord;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn row(code: &str, name: &str, tenure: Option<i64>) -> PractitionerRecord {
        PractitionerRecord {
            taxon_code: Some(code.into()),
            full_name: Some(name.into()),
            tenure,
            ..Default::default()
        }
    }

    fn codes(items: &[&str]) -> CodeSet {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn engine(rows: Vec<PractitionerRecord>) -> FilterEngine {
        FilterEngine::new(Arc::new(Roster::new(rows)))
    }

    #[test]
    fn code_filter_is_stable() {
        let engine = engine(vec![row("1", "a", None), row("2", "b", None), row("1", "c", None)]);

        let all = engine.apply_code_filter(engine.roster(), &codes(&["1", "2"]));
        assert_eq!(all.len(), 3);

        let ones = engine.apply_code_filter(engine.roster(), &codes(&["1"]));
        let names: Vec<_> = ones.iter().filter_map(|r| r.full_name.as_deref()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn code_filter_on_other_column() {
        let mut record = row("1", "a", None);
        record.medicare_specialty = Some("X".into());
        let engine = engine(vec![record, row("1", "b", None)]).with_code_column(Column::MedicareSpecialty);

        assert_eq!(engine.apply_code_filter(engine.roster(), &codes(&["X"])).len(), 1);
    }

    #[test]
    fn zero_width_range_keeps_matching_rows() {
        let engine = engine(vec![row("1", "a", Some(5)), row("1", "b", Some(5))]);
        let kept = FilterEngine::apply_predicate(
            engine.roster(),
            &FilterPredicate::range(Column::Tenure, 5.0, 5.0),
        )
        .unwrap();
        assert_eq!(&kept, engine.roster());
    }

    #[test]
    fn grouping_keeps_first_per_tuple() {
        let mut second = row("1", "a", Some(9));
        second.npi = Some("other".into());
        let table = Roster::new(vec![row("1", "a", Some(1)), second, row("2", "b", None)]);

        let grouped = FilterEngine::group_and_deduplicate(&table, &[Column::FullName]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.rows()[0].tenure, Some(1));
        assert_eq!(FilterEngine::group_and_deduplicate(&table, &[]).len(), 3);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = FilterEngine::resolve_columns(&["Full Name", "Shoe Size"]).unwrap_err();
        assert_eq!(err, SchemaMismatchError::UnknownColumn("Shoe Size".into()));
    }

    #[test]
    fn request_columns_defaults_then_extras() {
        let request = FilterRequest::new(CodeSet::new())
            .with_columns(["Tenure", "Full Name", "Tenure"])
            .with_column("Gender");
        assert_eq!(
            request.column_names(),
            [
                "Full Name",
                "License State",
                "NUCC Group",
                "NUCC Classification",
                "NUCC Specialization",
                "Tenure",
                "Gender",
            ]
        );
    }

    #[test]
    fn run_groups_on_displayed_columns() {
        let mut engine = engine(vec![
            row("1", "a", Some(1)),
            row("1", "a", Some(2)),
            row("2", "b", Some(3)),
        ]);

        let outcome = engine.run(&FilterRequest::new(codes(&["1", "2"])));
        assert!(!outcome.is_reverted());
        assert_eq!(outcome.row_count(), 2);
        assert_eq!(outcome.view.matched(), 3);

        let outcome = engine.run(&FilterRequest::new(codes(&["1", "2"])).with_column("Tenure"));
        assert_eq!(outcome.row_count(), 3);
        assert_eq!(outcome.view.headers().last(), Some(&"Tenure"));
    }

    #[test]
    fn schema_mismatch_reverts_to_last_good() {
        let mut engine = engine(vec![row("1", "a", Some(1)), row("2", "b", Some(3))]);

        let good = engine.run(&FilterRequest::new(codes(&["1"])));
        assert_eq!(good.row_count(), 1);

        let bad = engine.run(
            &FilterRequest::new(codes(&["1", "2"]))
                .with_predicate(FilterPredicate::range(Column::FullName, 0.0, 1.0)),
        );
        assert!(matches!(
            bad.reverted,
            Some(SchemaMismatchError::WrongKind { column: Column::FullName, .. })
        ));
        assert_eq!(bad.reverted.as_ref().map(SchemaMismatchError::column_name), Some("Full Name"));
        assert_eq!(bad.view, good.view);
        assert_eq!(engine.last_good(), Some(&good.view));
    }

    #[test]
    fn first_failure_yields_empty_view() {
        let mut engine = engine(vec![row("1", "a", None)]);
        let outcome = engine.run(&FilterRequest::new(codes(&["1"])).with_column("Nope"));

        assert!(outcome.is_reverted());
        assert_eq!(outcome.reverted.as_ref().map(SchemaMismatchError::column_name), Some("Nope"));
        assert_eq!(outcome.row_count(), 0);
        assert_eq!(outcome.view.columns(), Column::DEFAULT_DISPLAY);
        assert!(engine.last_good().is_none());
    }

    #[test]
    fn render_uses_displayed_columns() {
        let mut engine = engine(vec![row("1", "a", Some(4))]);
        let outcome = engine.run(
            &FilterRequest::new(codes(&["1"]))
                .with_default_columns(["Full Name"])
                .with_column("Tenure"),
        );
        assert_eq!(outcome.view.render(), vec![vec!["a".to_string(), "4".to_string()]]);
    }

    fn arb_record() -> impl Strategy<Value = PractitionerRecord> {
        (
            prop::option::of(prop::sample::select(vec!["M", "F"])),
            prop::option::of(0i64..10),
            prop::option::of(any::<bool>()),
            prop::option::of(prop::sample::select(vec!["Ann Lee", "Bo Park", "Cy Ng"])),
        )
            .prop_map(|(gender, tenure, telehealth, name)| PractitionerRecord {
                taxon_code: Some("1".into()),
                gender: gender.map(str::to_string),
                tenure,
                telehealth,
                full_name: name.map(str::to_string),
                ..Default::default()
            })
    }

    fn arb_predicate() -> impl Strategy<Value = FilterPredicate> {
        prop_oneof![
            prop::sample::select(vec!["M", "F"]).prop_map(|g| FilterPredicate::equals(Column::Gender, g)),
            Just(FilterPredicate::flag_true(Column::Telehealth)),
            Just(FilterPredicate::not_null(Column::Tenure)),
            prop::sample::select(vec!["", "an", "LEE", "o"])
                .prop_map(|n| FilterPredicate::contains(Column::FullName, n)),
            (0i64..10, 0i64..10)
                .prop_map(|(a, b)| FilterPredicate::range(Column::Tenure, a as f64, b as f64)),
        ]
    }

    proptest! {
        #[test]
        fn prop_predicate_order_is_irrelevant(
            records in prop::collection::vec(arb_record(), 0..30),
            (predicates, shuffled) in prop::collection::vec(arb_predicate(), 0..5)
                .prop_flat_map(|p| (Just(p.clone()), Just(p).prop_shuffle())),
        ) {
            let table = Roster::new(records);

            let together = FilterEngine::apply_predicates(&table, &predicates).unwrap();
            let reordered = FilterEngine::apply_predicates(&table, &shuffled).unwrap();
            let one_by_one = predicates.iter().rev().try_fold(table.clone(), |t, p| {
                FilterEngine::apply_predicate(&t, p)
            }).unwrap();

            prop_assert_eq!(&together, &reordered);
            prop_assert_eq!(&together, &one_by_one);
        }

        #[test]
        fn prop_grouping_is_idempotent(records in prop::collection::vec(arb_record(), 0..30)) {
            let table = Roster::new(records);
            let columns = [Column::Gender, Column::Tenure];

            let once = FilterEngine::group_and_deduplicate(&table, &columns);
            let twice = FilterEngine::group_and_deduplicate(&once, &columns);
            prop_assert_eq!(once, twice);
        }
    }
}
