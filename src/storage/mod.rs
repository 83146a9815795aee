//! Storage layer: config backends, the document codec and frecency ranking.
//!
//! # Modules
//!
//! - `backend`: [`ConfigStore`] trait and the in-memory backend
//! - `json`: JSON file-based config store
//! - `codec`: tolerant conversion between collections and the stored document
//! - `frecency`: scoring algorithm combining frequency and recency
//! - `models`: persisted record types separate from domain models

pub mod backend;
pub mod codec;
pub mod frecency;
pub mod json;
pub mod models;

pub use backend::{ConfigStore, MemoryConfig};
pub use codec::{decode, encode, DecodeOptions, Decoded};
pub use frecency::{calculate_score, sort_by_frecency, DEFAULT_VISIT_COUNT_CAP};
pub use json::JsonFileConfig;
pub use models::{FavoriteRecord, LocationRecord, VisitRecord};
