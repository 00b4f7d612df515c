//! Reference-data source implementations, one per game system.

pub mod custom;
pub mod dnd5e;
pub mod pathfinder;
pub mod wod;

pub use custom::CustomSource;
pub use dnd5e::{Dnd5eClient, DEFAULT_DND5E_BASE_URL};
pub use pathfinder::{PathfinderClient, DEFAULT_PATHFINDER_BASE_URL};
pub use wod::WodSource;

/// Truncate to at most `limit` characters, respecting char boundaries.
/// Upstream descriptions can run to pages; the UI only needs a teaser.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Derive a slug id from a display name, for records missing an upstream id.
pub(crate) fn slug_from_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}
