//! Category markers.
//!
//! A [`Marker`] tags every line of a writer so downstream filters can route it, e.g. all output of a
//! database driver under `SQL`.
//! Markers may have parents, forming a hierarchy: a `SQL_UPDATE` marker with parent `SQL` is an
//! instance of both.

use std::borrow::Cow;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// A named category tag with optional parent markers.
///
/// Cloning is cheap, clones share the same name and parents.
///
/// # Examples
///
/// ```rust
/// use veecle_log_writer::Marker;
///
/// let sql = Marker::new("SQL");
/// let update = Marker::with_parents("SQL_UPDATE", [sql.clone()]);
///
/// assert!(update.is_instance_of("SQL"));
/// assert!(!sql.is_instance_of("SQL_UPDATE"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Marker(Arc<MarkerInner>);

#[derive(PartialEq, Eq, Hash)]
struct MarkerInner {
    name: Cow<'static, str>,
    parents: Vec<Marker>,
}

impl Marker {
    /// Creates a marker without parents.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(Arc::new(MarkerInner {
            name: name.into(),
            parents: Vec::new(),
        }))
    }

    /// Creates a marker that is a child of every marker in `parents`.
    pub fn with_parents(
        name: impl Into<Cow<'static, str>>,
        parents: impl IntoIterator<Item = Marker>,
    ) -> Self {
        Self(Arc::new(MarkerInner {
            name: name.into(),
            parents: parents.into_iter().collect(),
        }))
    }

    /// Returns the name of this marker.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the direct parents of this marker.
    pub fn parents(&self) -> &[Marker] {
        &self.0.parents
    }

    /// Returns `true` if this marker or any of its ancestors is named `name`.
    pub fn is_instance_of(&self, name: &str) -> bool {
        self.name() == name
            || self
                .parents()
                .iter()
                .any(|parent| parent.is_instance_of(name))
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Debug for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.parents().is_empty() {
            f.debug_tuple("Marker").field(&self.name()).finish()
        } else {
            f.debug_struct("Marker")
                .field("name", &self.name())
                .field("parents", &self.parents())
                .finish()
        }
    }
}
