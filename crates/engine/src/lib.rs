//! Roleplaying Characters Manager engine library.
//!
//! This crate contains all server-side code for the character manager.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `stores/` - In-memory storage
//! - `use_cases/` - User story orchestration across entities
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
