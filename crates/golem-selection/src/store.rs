//! Per-user selection store
//!
//! Each user accumulates rows picked from their filtered views. Entries are
//! independent: the map's shard lock serializes access per user and no
//! operation ever holds two entries at once.

use crate::error::Result;
use crate::export::{write_rows, ExportOptions};
use dashmap::DashMap;
use golem_roster::PractitionerRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Key for a user's selection
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create user id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Accumulating, deduplicated selections keyed by user
#[derive(Debug, Default)]
pub struct SelectionStore {
    entries: DashMap<UserId, Vec<Arc<PractitionerRecord>>>,
}

impl SelectionStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to a user's selection and drop repeats
    ///
    /// Rows equal in every column collapse to the first seen. Returns the
    /// new selection length.
    pub fn add_selection(
        &self,
        user: &UserId,
        rows: impl IntoIterator<Item = Arc<PractitionerRecord>>,
    ) -> usize {
        let mut entry = self.entries.entry(user.clone()).or_default();
        let before = entry.len();
        entry.extend(rows);

        let mut seen = HashSet::new();
        entry.retain(|record| seen.insert(record.full_key()));

        tracing::debug!("User {} selection: {} -> {} rows", user, before, entry.len());
        entry.len()
    }

    /// Rows selected by a user, in accumulation order
    #[must_use]
    pub fn get(&self, user: &UserId) -> Vec<Arc<PractitionerRecord>> {
        self.entries
            .get(user)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Selection length for a user
    #[must_use]
    pub fn len(&self, user: &UserId) -> usize {
        self.entries.get(user).map_or(0, |entry| entry.len())
    }

    /// Check if a user has nothing selected
    #[must_use]
    pub fn is_empty(&self, user: &UserId) -> bool {
        self.len(user) == 0
    }

    /// Users with a selection entry, sorted
    #[must_use]
    pub fn users(&self) -> Vec<UserId> {
        let mut users: Vec<_> = self.entries.iter().map(|entry| entry.key().clone()).collect();
        users.sort();
        users
    }

    /// Serialize a user's selection
    ///
    /// With [`ExportOptions::with_clear`] the selection is emptied while its
    /// entry is still locked. A failed export leaves the selection untouched.
    ///
    /// # Errors
    /// Returns [`SelectionError`](crate::SelectionError) on a bad index or a
    /// write failure.
    pub fn export(&self, user: &UserId, options: &ExportOptions) -> Result<Vec<u8>> {
        let bytes = if options.clears() {
            match self.entries.get_mut(user) {
                Some(mut entry) => {
                    let bytes = write_rows(entry.as_slice(), options)?;
                    entry.clear();
                    bytes
                }
                None => write_rows(&[], options)?,
            }
        } else {
            write_rows(&self.get(user), options)?
        };
        tracing::info!(
            cleared = options.clears(),
            "Exported {} bytes of selection for user {}",
            bytes.len(),
            user
        );
        Ok(bytes)
    }

    /// Empty a user's selection; clearing an empty selection is a no-op
    pub fn clear(&self, user: &UserId) {
        if let Some(mut entry) = self.entries.get_mut(user) {
            entry.clear();
        }
    }
}
