//! Concrete host used by the CLI and by embedders without their own VFS layer.

use super::{VfsHost, NATIVE_TAG};
use crate::domain::HostLayer;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A host described entirely by data: a layer, an optional parent and a
/// connectivity flag that can be flipped to simulate a dropped connection.
#[derive(Debug)]
pub struct MountedHost {
    layer: HostLayer,
    parent: Option<Rc<MountedHost>>,
    connected: Cell<bool>,
}

impl MountedHost {
    /// The local filesystem root host.
    #[must_use]
    pub fn native() -> Rc<Self> {
        Rc::new(Self {
            layer: HostLayer::new(NATIVE_TAG, ""),
            parent: None,
            connected: Cell::new(true),
        })
    }

    /// Mounts a new layer on top of `parent`.
    ///
    /// # Examples
    ///
    /// ```
    /// use placemarks::vfs::{MountedHost, VfsHost};
    ///
    /// let native = MountedHost::native();
    /// let archive = MountedHost::mount(&native, "archive", "/tmp/pack.zip");
    /// let stack = archive.mount_stack().unwrap();
    /// assert_eq!(stack.layers().len(), 2);
    /// assert_eq!(stack.layers()[1].junction, "/tmp/pack.zip");
    /// ```
    #[must_use]
    pub fn mount(parent: &Rc<Self>, tag: impl Into<String>, junction: impl Into<String>) -> Rc<Self> {
        Self::mount_with_options(parent, tag, junction, BTreeMap::new())
    }

    #[must_use]
    pub fn mount_with_options(
        parent: &Rc<Self>,
        tag: impl Into<String>,
        junction: impl Into<String>,
        options: BTreeMap<String, String>,
    ) -> Rc<Self> {
        let layer = options
            .into_iter()
            .fold(HostLayer::new(tag, junction), |layer, (key, value)| {
                layer.with_option(key, value)
            });
        Rc::new(Self {
            layer,
            parent: Some(Rc::clone(parent)),
            connected: Cell::new(true),
        })
    }

    pub fn set_connected(&self, connected: bool) {
        tracing::debug!(tag = %self.layer.tag, junction = %self.layer.junction, connected, "host connectivity changed");
        self.connected.set(connected);
    }
}

impl VfsHost for MountedHost {
    fn layer(&self) -> HostLayer {
        self.layer.clone()
    }

    fn parent(&self) -> Option<Rc<dyn VfsHost>> {
        self.parent
            .as_ref()
            .map(|parent| Rc::clone(parent) as Rc<dyn VfsHost>)
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }
}
