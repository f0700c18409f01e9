//! One user's filtering session

use crate::error::Result;
use golem_roster::{controls, FilterControl, FilterEngine, FilterKind, FilterOutcome, FilterRequest, FilterView};
use golem_selection::{SelectionError, SelectionStore, UserId};
use std::sync::Arc;

/// Filter engine and selection access for one user
///
/// Owned by the caller handling that user; never shared between users.
#[derive(Debug)]
pub struct Session {
    user: UserId,
    engine: FilterEngine,
    selections: Arc<SelectionStore>,
}

impl Session {
    pub(crate) fn new(user: UserId, engine: FilterEngine, selections: Arc<SelectionStore>) -> Self {
        Self {
            user,
            engine,
            selections,
        }
    }

    /// Session user
    #[inline]
    #[must_use]
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Run a filter request; a failed run serves the previous view
    pub fn run(&mut self, request: &FilterRequest) -> FilterOutcome {
        tracing::debug!("User {} running filter over {} codes", self.user, request.codes().len());
        self.engine.run(request)
    }

    /// Last view produced without error
    #[inline]
    #[must_use]
    pub fn view(&self) -> Option<&FilterView> {
        self.engine.last_good()
    }

    /// Controls for the given optional filters over the current view
    ///
    /// Before the first successful run the whole roster is used.
    #[must_use]
    pub fn controls(&self, kinds: &[FilterKind]) -> Vec<(FilterKind, FilterControl)> {
        match self.view() {
            Some(view) => controls(view.rows(), kinds),
            None => controls(self.engine.roster(), kinds),
        }
    }

    /// Add rows of the current view, by position, to the user's selection
    ///
    /// Returns the new selection length.
    ///
    /// # Errors
    /// Returns [`SelectionError::IndexOutOfRange`] if a position is past the
    /// end of the view; nothing is added in that case.
    pub fn select(&self, positions: &[usize]) -> Result<usize> {
        let rows = self.view().map(FilterView::rows);
        let len = rows.map_or(0, |rows| rows.len());

        let picked = positions
            .iter()
            .map(|&index| {
                rows.and_then(|rows| rows.get(index))
                    .cloned()
                    .ok_or(SelectionError::IndexOutOfRange { index, len })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(self.selections.add_selection(&self.user, picked))
    }

    /// Add every row of the current view to the user's selection
    pub fn select_all(&self) -> usize {
        let rows = self
            .view()
            .map(|view| view.rows().rows().to_vec())
            .unwrap_or_default();
        self.selections.add_selection(&self.user, rows)
    }

    /// Rows the user has selected so far
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selections.len(&self.user)
    }
}
