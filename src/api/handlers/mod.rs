//! HTTP request handlers, one module per resource.

pub mod health;
pub mod missions;
pub mod planets;
pub mod scientists;
