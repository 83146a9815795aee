//! Domain layer: location, favorite and visit records plus error types.
//!
//! These types carry no persistence or host logic. A [`Location`] is immutable
//! and shared through `Rc` by every [`Favorite`] and [`Visit`] that refers to it.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`location`]: Host stacks, locations and footprint hashing
//! - [`favorite`]: Favorite and visit records

pub mod error;
pub mod favorite;
pub mod location;

pub use error::{PlacemarksError, Result};
pub use favorite::{Favorite, Visit};
pub use location::{footprint_of, normalize_path, Footprint, HostLayer, HostStack, Location};
