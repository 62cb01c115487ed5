//! Core business logic modules.

pub mod paths;
pub mod settings;
pub mod store;
