//! Virtual filesystem host abstraction.
//!
//! The store never talks to a filesystem. It only needs each host to describe
//! itself as a [`HostLayer`], to name the host it is mounted on, and to say
//! whether it is currently connected. From that the provided
//! [`VfsHost::mount_stack`] derives the snapshot a [`crate::domain::Location`]
//! keeps, which lets locations outlive the live host objects.

mod host;

pub use host::MountedHost;

use crate::domain::{HostLayer, HostStack};
use std::rc::Rc;

/// Tag of the local filesystem layer at the bottom of every native stack.
pub const NATIVE_TAG: &str = "native";

/// A mounted virtual filesystem.
pub trait VfsHost {
    /// Describes this layer alone, without its parents.
    fn layer(&self) -> HostLayer;

    /// The host this one is mounted on, `None` for a root host.
    fn parent(&self) -> Option<Rc<dyn VfsHost>>;

    /// Whether the host can currently serve requests.
    fn is_connected(&self) -> bool {
        true
    }

    /// Snapshots the full chain of layers, root first.
    ///
    /// Returns `None` when this host or any host below it is disconnected.
    fn mount_stack(&self) -> Option<HostStack> {
        if !self.is_connected() {
            return None;
        }

        let mut layers = vec![self.layer()];
        let mut next = self.parent();
        while let Some(host) = next {
            if !host.is_connected() {
                return None;
            }
            layers.push(host.layer());
            next = host.parent();
        }
        layers.reverse();
        Some(HostStack(layers))
    }
}
