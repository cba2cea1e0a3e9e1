//! Authentication core: roles, validators, guards, and submit flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! `role` and `validate` are pure leaves; `resolve` reads the profile store;
//! `guard` decides render-vs-redirect from session state; `flow` orchestrates
//! the credential and profile calls behind every auth form.

pub mod flow;
pub mod guard;
pub mod resolve;
pub mod role;
pub mod validate;
