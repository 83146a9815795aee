//! Conversion between the in-memory collections and the stored document.
//!
//! Decoding is tolerant per record: an entry that fails to parse or validate is
//! logged and skipped, and the rest of the document still loads. Locations that
//! occur in both collections are interned so that every favorite and visit for
//! the same place shares one `Rc<Location>`.

use crate::domain::error::Result;
use crate::domain::{Favorite, Footprint, Location, Visit};
use crate::storage::models::{DocumentRecord, FavoriteRecord, LocationRecord, VisitRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;

const FAVORITES_FIELD: &str = "favorites";
const VISITS_FIELD: &str = "visits";
const SECONDS_PER_DAY: i64 = 86_400;

/// Knobs applied while decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Drop visits whose last visit is older than this many days.
    pub visit_retention_days: Option<u32>,
    /// Reference time for the retention window.
    pub now: i64,
}

/// Result of decoding a document.
#[derive(Debug, Default)]
pub struct Decoded {
    pub favorites: Vec<Favorite>,
    pub visits: HashMap<Footprint, Visit>,
    /// Whether the document carried a favorites array at all, even an empty one.
    pub has_favorites: bool,
    /// Number of records that were dropped as malformed.
    pub skipped: usize,
}

/// Serializes both collections into a document.
///
/// Favorites keep their order. Visits are written sorted by footprint so that
/// saving an unchanged store produces an identical file.
///
/// # Errors
///
/// Returns an error only if serde fails to build the JSON value.
pub fn encode(favorites: &[Favorite], visits: &HashMap<Footprint, Visit>) -> Result<Value> {
    let mut visit_records: Vec<VisitRecord> = visits.values().map(VisitRecord::from_visit).collect();
    visit_records.sort_by_key(|record| record.footprint);

    let document = DocumentRecord {
        favorites: favorites.iter().map(FavoriteRecord::from_favorite).collect(),
        visits: visit_records,
    };
    Ok(serde_json::to_value(document)?)
}

/// Parses a document, skipping whatever cannot be understood.
#[must_use]
pub fn decode(document: &Value, options: &DecodeOptions) -> Decoded {
    let mut decoded = Decoded::default();

    let Some(root) = document.as_object() else {
        tracing::warn!("stored document is not an object, ignoring it");
        return decoded;
    };

    let mut interner = Interner::default();

    if let Some(visits) = root.get(VISITS_FIELD) {
        decode_visits(visits, options, &mut interner, &mut decoded);
    }

    if let Some(favorites) = root.get(FAVORITES_FIELD) {
        decoded.has_favorites = true;
        decode_favorites(favorites, &mut interner, &mut decoded);
    }

    tracing::debug!(
        favorites = decoded.favorites.len(),
        visits = decoded.visits.len(),
        skipped = decoded.skipped,
        "decoded document"
    );
    decoded
}

fn decode_favorites(value: &Value, interner: &mut Interner, decoded: &mut Decoded) {
    let Some(entries) = value.as_array() else {
        tracing::warn!("favorites field is not an array, ignoring it");
        return;
    };

    for (index, entry) in entries.iter().enumerate() {
        let record = match FavoriteRecord::deserialize(entry) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed favorite");
                decoded.skipped += 1;
                continue;
            }
        };

        let Some(location) = interner.intern(&record.location) else {
            tracing::warn!(index, "skipping favorite without a host stack");
            decoded.skipped += 1;
            continue;
        };

        decoded.favorites.push(Favorite::new(location, record.title));
    }
}

fn decode_visits(value: &Value, options: &DecodeOptions, interner: &mut Interner, decoded: &mut Decoded) {
    let Some(entries) = value.as_array() else {
        tracing::warn!("visits field is not an array, ignoring it");
        return;
    };

    let oldest_kept = options
        .visit_retention_days
        .map(|days| options.now.saturating_sub(i64::from(days) * SECONDS_PER_DAY));

    for (index, entry) in entries.iter().enumerate() {
        let record = match VisitRecord::deserialize(entry) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed visit");
                decoded.skipped += 1;
                continue;
            }
        };

        if record.count == 0 {
            tracing::warn!(index, "skipping visit with zero count");
            decoded.skipped += 1;
            continue;
        }

        if oldest_kept.is_some_and(|oldest| record.last_visit < oldest) {
            tracing::debug!(index, last_visit = record.last_visit, "dropping visit past retention");
            continue;
        }

        let Some(location) = interner.intern(&record.location) else {
            tracing::warn!(index, "skipping visit without a host stack");
            decoded.skipped += 1;
            continue;
        };

        let footprint = location.footprint();
        if let Some(stored) = record.footprint {
            if stored != footprint {
                tracing::warn!(
                    index,
                    stored = %stored,
                    computed = %footprint,
                    "stored footprint is stale, using recomputed value"
                );
            }
        }

        let visit = Visit {
            location,
            visits_count: record.count,
            last_visit: record.last_visit,
        };

        match decoded.visits.get(&footprint) {
            Some(existing) if existing.last_visit >= visit.last_visit => {
                tracing::warn!(index, footprint = %footprint, "skipping duplicate visit");
            }
            Some(_) => {
                tracing::warn!(index, footprint = %footprint, "duplicate visit replaces an older one");
                decoded.visits.insert(footprint, visit);
            }
            None => {
                decoded.visits.insert(footprint, visit);
            }
        }
    }
}

/// Hands out one shared location per footprint.
#[derive(Default)]
struct Interner {
    locations: HashMap<Footprint, Rc<Location>>,
}

impl Interner {
    fn intern(&mut self, record: &LocationRecord) -> Option<Rc<Location>> {
        if record.host_stack.is_empty() {
            return None;
        }

        let location = Location::new(record.host_stack.clone(), &record.path);
        let shared = self
            .locations
            .entry(location.footprint())
            .or_insert_with(|| Rc::new(location));
        Some(Rc::clone(shared))
    }
}
