//! Persisted record models.
//!
//! These are the serde shapes of the stored document. They are kept separate
//! from the domain types: domain records share locations through `Rc` and cache
//! footprints, while persisted records are plain owned data that may be
//! incomplete or stale when read back.

use crate::domain::{Favorite, Footprint, HostStack, Location, Visit};
use serde::{Deserialize, Serialize};

/// A location as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub host_stack: HostStack,
    pub path: String,
}

impl LocationRecord {
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        Self {
            host_stack: location.host_stack().clone(),
            path: location.path().to_string(),
        }
    }
}

/// One entry of the ordered `favorites` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub location: LocationRecord,
    #[serde(default)]
    pub title: String,
}

impl FavoriteRecord {
    #[must_use]
    pub fn from_favorite(favorite: &Favorite) -> Self {
        Self {
            location: LocationRecord::from_location(favorite.location()),
            title: favorite.title().to_string(),
        }
    }
}

/// One entry of the `visits` array.
///
/// The footprint is written for readers that want to key entries without
/// rehashing; on load it is only checked against the recomputed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint: Option<Footprint>,
    #[serde(flatten)]
    pub location: LocationRecord,
    pub count: u32,
    pub last_visit: i64,
}

impl VisitRecord {
    #[must_use]
    pub fn from_visit(visit: &Visit) -> Self {
        Self {
            footprint: Some(visit.location.footprint()),
            location: LocationRecord::from_location(&visit.location),
            count: visit.visits_count,
            last_visit: visit.last_visit,
        }
    }
}

/// Top-level shape of the document written under the store's key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentRecord {
    pub favorites: Vec<FavoriteRecord>,
    pub visits: Vec<VisitRecord>,
}
