//! FastGolem service
//!
//! Owns the immutable taxonomy index and roster snapshot plus the shared
//! selection store. Per-user filtering state lives in [`Session`]s handed
//! out by [`Golem::session`].

use crate::config::GolemConfig;
use crate::error::{GolemError, Result};
use crate::session::Session;
use golem_ingest::{load_roster, load_tree};
use golem_roster::{Column, FilterEngine, FilterRequest, FilterView, PractitionerRecord, Roster};
use golem_selection::{ExportOptions, SelectionStore, UserId};
use golem_taxonomy::{
    CodeResolver, MalformedTreeError, Resolution, ResolveError, SelectionPath, TaxonomyNode, TreeIndex,
};
use std::sync::Arc;

/// Taxonomy browsing, roster filtering and user selections
#[derive(Debug)]
pub struct Golem {
    config: GolemConfig,
    index: Arc<TreeIndex>,
    roster: Arc<Roster>,
    selections: Arc<SelectionStore>,
    default_columns: Vec<Column>,
    delimiter: u8,
    skipped: Vec<MalformedTreeError>,
}

impl Golem {
    /// Create service over an in-memory tree and roster
    ///
    /// # Errors
    /// Returns [`GolemError::Config`] for an invalid delimiter or default
    /// column.
    pub fn new(tree: &TaxonomyNode, roster: Roster, config: GolemConfig) -> Result<Self> {
        Self::from_index(TreeIndex::build(tree), roster, config)
    }

    /// Create service over a prebuilt index
    ///
    /// # Errors
    /// As [`Golem::new`].
    pub fn from_index(index: TreeIndex, roster: Roster, config: GolemConfig) -> Result<Self> {
        let default_columns = config.default_column_set()?;
        let delimiter = config.delimiter_byte()?;
        let skipped = index.malformed().to_vec();

        Ok(Self {
            config,
            index: Arc::new(index),
            roster: Arc::new(roster),
            selections: Arc::new(SelectionStore::new()),
            default_columns,
            delimiter,
            skipped,
        })
    }

    /// Load the configured taxonomy and roster files
    ///
    /// # Errors
    /// Returns [`GolemError::MissingInput`] when a path is not configured,
    /// [`GolemError::Ingest`] when a file cannot be loaded, and as
    /// [`Golem::new`].
    pub fn load(config: GolemConfig) -> Result<Self> {
        let tree_path = config.tree_path.clone().ok_or(GolemError::MissingInput("taxonomy"))?;
        let roster_path = config.roster_path.clone().ok_or(GolemError::MissingInput("roster"))?;

        let tree = load_tree(&tree_path)?;
        let roster = load_roster(&roster_path)?;

        let mut golem = Self::new(&tree.root, roster, config)?;
        golem.skipped.splice(0..0, tree.skipped);
        tracing::info!(
            "FastGolem ready: {} taxonomy nodes, {} roster rows",
            golem.index.len(),
            golem.roster.len()
        );
        Ok(golem)
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GolemConfig {
        &self.config
    }

    /// Taxonomy index
    #[inline]
    #[must_use]
    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    /// Roster snapshot
    #[inline]
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Shared selection store
    #[inline]
    #[must_use]
    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    /// Default display columns
    #[inline]
    #[must_use]
    pub fn default_columns(&self) -> &[Column] {
        &self.default_columns
    }

    /// Taxonomy subtrees skipped while loading and indexing
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> &[MalformedTreeError] {
        &self.skipped
    }

    /// Sorted Group names
    #[must_use]
    pub fn list_groups(&self) -> Vec<String> {
        self.index.groups()
    }

    /// Sorted child names at `path`; empty when the path does not exist
    #[must_use]
    pub fn list_children(&self, path: &SelectionPath) -> Vec<String> {
        self.index.children(path)
    }

    /// Codes reachable under `path`
    ///
    /// # Errors
    /// Returns [`ResolveError::PathNotFound`] when the path does not exist.
    pub fn resolve_codes(&self, path: &SelectionPath) -> std::result::Result<Resolution, ResolveError> {
        CodeResolver::new(&self.index).resolve(path)
    }

    /// Filter request for `path` with the configured default columns
    ///
    /// # Errors
    /// Returns [`GolemError::Resolve`] when the path does not exist.
    pub fn request(&self, path: &SelectionPath) -> Result<FilterRequest> {
        let resolution = self.resolve_codes(path)?;
        Ok(FilterRequest::new(resolution.codes).with_default_columns(self.config.default_columns.iter().cloned()))
    }

    /// Run one filter pipeline over the roster without session state
    ///
    /// # Errors
    /// Returns [`GolemError::Schema`] when a step does not fit the roster.
    pub fn filter(&self, request: &FilterRequest) -> Result<FilterView> {
        let engine = FilterEngine::new(Arc::clone(&self.roster));
        Ok(engine.filter(&self.roster, request)?)
    }

    /// Start a filtering session for `user`
    #[must_use]
    pub fn session(&self, user: impl Into<UserId>) -> Session {
        Session::new(
            user.into(),
            FilterEngine::new(Arc::clone(&self.roster)),
            Arc::clone(&self.selections),
        )
    }

    /// Add rows to a user's selection; returns the selection length
    pub fn select_rows(
        &self,
        user: &UserId,
        rows: impl IntoIterator<Item = Arc<PractitionerRecord>>,
    ) -> usize {
        self.selections.add_selection(user, rows)
    }

    /// Export options with the configured default columns and delimiter
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::new()
            .with_default_columns(self.default_columns.iter().copied())
            .with_delimiter(self.delimiter)
    }

    /// Serialize a user's selection and keep it
    ///
    /// `columns` follow the default columns; `indices` picks a subset of the
    /// selection, in order.
    ///
    /// # Errors
    /// Returns [`GolemError::Selection`] on a bad index or a write failure.
    pub fn export(&self, user: &UserId, columns: &[Column], indices: Option<&[usize]>) -> Result<Vec<u8>> {
        self.export_with(user, columns, indices, false)
    }

    /// Serialize a user's selection, then empty it
    ///
    /// On error the selection is kept.
    ///
    /// # Errors
    /// As [`Golem::export`].
    pub fn export_and_clear(
        &self,
        user: &UserId,
        columns: &[Column],
        indices: Option<&[usize]>,
    ) -> Result<Vec<u8>> {
        self.export_with(user, columns, indices, true)
    }

    fn export_with(
        &self,
        user: &UserId,
        columns: &[Column],
        indices: Option<&[usize]>,
        clear: bool,
    ) -> Result<Vec<u8>> {
        let mut options = self
            .export_options()
            .with_columns(columns.iter().copied())
            .with_clear(clear);
        if let Some(indices) = indices {
            options = options.with_indices(indices.iter().copied());
        }
        Ok(self.selections.export(user, &options)?)
    }

    /// Empty a user's selection
    pub fn clear_selection(&self, user: &UserId) {
        self.selections.clear(user);
    }
}
