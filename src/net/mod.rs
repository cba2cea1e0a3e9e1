//! Platform boundary: trait seam, wire DTOs, and the two implementations.
//!
//! SYSTEM CONTEXT
//! ==============
//! `platform` defines the injected traits, `types` the document shapes,
//! `paths` the store layout, `rest` the browser implementation, and `memory`
//! the deterministic one used by tests and host-side builds.

pub mod active;
pub mod memory;
pub mod paths;
pub mod platform;
pub mod rest;
pub mod types;
