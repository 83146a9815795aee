use super::PlacemarkStore;
use crate::domain::error::{PlacemarksError, Result};
use crate::domain::{Footprint, Location};
use crate::vfs::VfsHost;
use std::rc::Rc;

impl PlacemarkStore {
    /// Resolves a (host, path) pair to its canonical shared location.
    ///
    /// The host's mount stack is snapshotted and hashed together with the
    /// normalized path. If the ledger or the favorites list already holds a
    /// location with that footprint, the existing `Rc` is returned; otherwise a
    /// new location is minted from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PlacemarksError::Unreachable`] when the host, or a host it is
    /// mounted on, is disconnected.
    pub fn resolve(&self, host: &dyn VfsHost, path: &str) -> Result<Rc<Location>> {
        let stack = host.mount_stack().ok_or_else(|| {
            PlacemarksError::Unreachable(format!("{} on host {}", path, host.layer().tag))
        })?;

        let candidate = Location::new(stack, path);
        if let Some(known) = self.find_location(candidate.footprint()) {
            tracing::trace!(footprint = %candidate.footprint(), "reusing known location");
            return Ok(known);
        }

        tracing::trace!(footprint = %candidate.footprint(), path = %candidate.path(), "minted location");
        Ok(Rc::new(candidate))
    }

    /// Finds the shared location for `footprint` in the ledger or the favorites.
    #[must_use]
    pub fn find_location(&self, footprint: Footprint) -> Option<Rc<Location>> {
        self.visits
            .get(&footprint)
            .map(|visit| &visit.location)
            .or_else(|| {
                self.favorites
                    .iter()
                    .find(|favorite| favorite.footprint() == footprint)
                    .map(|favorite| favorite.location())
            })
            .map(Rc::clone)
    }
}
