//! Selection paths into the taxonomy tree
//!
//! Provides [`SelectionPath`] for addressing a node by the names chosen at
//! each level, and [`Level`] for the three named levels of the NUCC tree.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The named levels of the taxonomy tree, most general first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Type of practitioner by education
    Group,
    /// Primary function of the practitioner
    Classification,
    /// Niche role of the practitioner
    Specialization,
}

impl Level {
    /// All levels in descending order of generality
    pub const ALL: [Self; 3] = [Self::Group, Self::Classification, Self::Specialization];

    /// Zero-based depth of this level below the root
    #[inline]
    #[must_use]
    pub fn depth(self) -> usize {
        match self {
            Self::Group => 0,
            Self::Classification => 1,
            Self::Specialization => 2,
        }
    }

    /// Human-readable level name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Classification => "Classification",
            Self::Specialization => "Specialization",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered user choices navigating the tree
///
/// Segment `i` is only meaningful when every segment before it is set, so a
/// path never has gaps: it is built either from a list of non-empty names or
/// from per-level UI choices via [`SelectionPath::from_levels`].
///
/// UI choices stop at [`Level::Specialization`], but the tree itself may nest
/// deeper, so [`SelectionPath::new`] takes any number of segments and
/// [`SelectionPath::level`] only names the first three.
///
/// # Examples
/// - `[]` → the whole tree
/// - `["Allopathic & Osteopathic Physicians", "Surgery"]` → one classification
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionPath(Vec<String>);

impl SelectionPath {
    /// Empty path (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create path from segments
    ///
    /// # Errors
    /// Returns [`PathError::EmptySegment`] if any segment is blank.
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if let Some(position) = segments.iter().position(|s| s.trim().is_empty()) {
            return Err(PathError::EmptySegment { position });
        }
        Ok(Self(segments))
    }

    /// Build a path from the choice made at each named level
    ///
    /// `None` and blank strings both mean "not chosen". A level chosen while
    /// a more general level is not is rejected.
    ///
    /// # Errors
    /// Returns [`PathError::MissingParentLevel`] for a gap.
    pub fn from_levels(
        group: Option<&str>,
        classification: Option<&str>,
        specialization: Option<&str>,
    ) -> Result<Self, PathError> {
        let choices = [group, classification, specialization]
            .map(|choice| choice.map(str::trim).filter(|s| !s.is_empty()));

        let mut segments = Vec::new();
        for (level, choice) in Level::ALL.into_iter().zip(choices) {
            match choice {
                Some(name) if segments.len() == level.depth() => segments.push(name.to_string()),
                Some(_) => {
                    return Err(PathError::MissingParentLevel {
                        level,
                        missing: Level::ALL[segments.len()],
                    })
                }
                None => {}
            }
        }
        Ok(Self(segments))
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is the root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Name chosen at a named level
    #[inline]
    #[must_use]
    pub fn level(&self, level: Level) -> Option<&str> {
        self.0.get(level.depth()).map(String::as_str)
    }

    /// Parent path (if not root)
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Check if this path is a prefix of another
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for SelectionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0.join(" > "))
        }
    }
}

/// Errors for selection path construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Blank segment
    #[error("path segment {position} is empty")]
    EmptySegment {
        /// Index of the offending segment
        position: usize,
    },

    /// A level was chosen without the level above it
    #[error("{level} chosen without a {missing}")]
    MissingParentLevel {
        /// The level that was chosen
        level: Level,
        /// The first unchosen level above it
        missing: Level,
    },
}
