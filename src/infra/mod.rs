//! Infrastructure layer (adapters/implementations).
//!
//! Configuration on disk and the collaborators backed by it.

pub mod app_config;
pub mod env;
