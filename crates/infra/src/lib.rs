//! Infrastructure layer: record store access, inventory services, config.

pub mod config;
pub mod record_store;
pub mod services;
