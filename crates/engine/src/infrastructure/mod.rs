//! Infrastructure layer - external dependency implementations.

pub mod config;
pub mod i18n;
pub mod ports;
pub mod sources;
