//! Storage layer module.
//!
//! This module provides trait-based storage abstraction allowing different backends
//! to be used without changing business logic.

pub mod factory;
pub mod sqlite;
pub mod traits;

pub use factory::create_storage;
pub use sqlite::SqliteStorage;
pub use traits::{MissionStore, PlanetStore, ScientistStore, Storage};
