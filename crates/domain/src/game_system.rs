//! The closed set of supported game systems.
//!
//! Reference data for each system comes from an independent source: the
//! D&D 5e REST API, the Pathfinder 2e REST API, hand-authored World of
//! Darkness tables, or the built-in custom tables. Dispatching on this
//! enum (rather than on raw identifier strings) keeps the routing total:
//! every identifier, known or not, resolves to exactly one variant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported tabletop rule system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSystem {
    Dnd5e,
    Pathfinder,
    Wod,
    Custom,
}

impl GameSystem {
    /// Resolve a wire identifier to a system.
    ///
    /// Unknown identifiers (and the literal `"custom"`) map to `Custom`,
    /// so resolution never fails.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dnd5e" => Self::Dnd5e,
            "pathfinder" => Self::Pathfinder,
            "wod" => Self::Wod,
            _ => Self::Custom,
        }
    }

    /// Wire identifier for this system.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dnd5e => "dnd5e",
            Self::Pathfinder => "pathfinder",
            Self::Wod => "wod",
            Self::Custom => "custom",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dnd5e => "Dungeons & Dragons 5e",
            Self::Pathfinder => "Pathfinder 2e",
            Self::Wod => "World of Darkness",
            Self::Custom => "Custom",
        }
    }

    /// Short description shown in the system picker.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Dnd5e => "Sistema de rol de fantasía medieval, 5ª edición",
            Self::Pathfinder => "Sistema de rol de fantasía medieval, 2ª edición",
            Self::Wod => "Sistema de rol de horror gótico",
            Self::Custom => "Sistema personalizado con opciones avanzadas",
        }
    }

    /// All supported systems, in picker order.
    pub fn all() -> [GameSystem; 4] {
        [Self::Dnd5e, Self::Pathfinder, Self::Wod, Self::Custom]
    }

    /// Picker metadata for this system.
    pub fn info(&self) -> GameSystemInfo {
        GameSystemInfo {
            id: self.as_str(),
            name: self.display_name(),
            description: self.description(),
        }
    }
}

impl fmt::Display for GameSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one game system.
#[derive(Debug, Clone, Serialize)]
pub struct GameSystemInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_identifiers() {
        assert_eq!(GameSystem::parse("dnd5e"), GameSystem::Dnd5e);
        assert_eq!(GameSystem::parse("pathfinder"), GameSystem::Pathfinder);
        assert_eq!(GameSystem::parse("wod"), GameSystem::Wod);
        assert_eq!(GameSystem::parse("custom"), GameSystem::Custom);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(GameSystem::parse("DnD5e"), GameSystem::Dnd5e);
        assert_eq!(GameSystem::parse(" WOD "), GameSystem::Wod);
    }

    #[test]
    fn unknown_identifier_falls_back_to_custom() {
        assert_eq!(GameSystem::parse("shadowrun"), GameSystem::Custom);
        assert_eq!(GameSystem::parse(""), GameSystem::Custom);
    }

    #[test]
    fn roundtrip_through_wire_identifier() {
        for system in GameSystem::all() {
            assert_eq!(GameSystem::parse(system.as_str()), system);
        }
    }

    #[test]
    fn serializes_as_wire_identifier() {
        let json = serde_json::to_string(&GameSystem::Dnd5e).unwrap();
        assert_eq!(json, "\"dnd5e\"");
    }
}
