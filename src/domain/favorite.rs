//! Favorite and visit records.

use super::location::{Footprint, Location};
use std::rc::Rc;

/// A user-curated favorite: a shared location plus a display title.
///
/// The footprint is copied from the location at construction and cannot be set
/// independently. An empty title means "derive the display name from the path";
/// see [`Favorite::display_title`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    location: Rc<Location>,
    footprint: Footprint,
    title: String,
}

impl Favorite {
    pub fn new(location: Rc<Location>, title: impl Into<String>) -> Self {
        let footprint = location.footprint();
        Self {
            location,
            footprint,
            title: title.into(),
        }
    }

    #[must_use]
    pub fn location(&self) -> &Rc<Location> {
        &self.location
    }

    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Title shown to the user: the stored title, or the last path component.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.location.display_name()
        } else {
            &self.title
        }
    }
}

/// Ledger entry for one distinct location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub location: Rc<Location>,
    pub visits_count: u32,
    /// Unix timestamp (seconds) of the most recent visit.
    pub last_visit: i64,
}

impl Visit {
    #[must_use]
    pub const fn first(location: Rc<Location>, timestamp: i64) -> Self {
        Self {
            location,
            visits_count: 1,
            last_visit: timestamp,
        }
    }

    /// Records another visit at `timestamp`.
    ///
    /// A clock that moved backwards never makes the entry look older.
    pub fn bump(&mut self, timestamp: i64) {
        self.visits_count = self.visits_count.saturating_add(1);
        self.last_visit = self.last_visit.max(timestamp);
    }
}
