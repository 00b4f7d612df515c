//! Roleplaying Characters Manager domain library.
//!
//! Core types shared by the engine: the closed set of supported game
//! systems, the uniform reference-data item consumed by the character
//! creation UI, and the character entities.

pub mod entities;
pub mod error;
pub mod game_system;
pub mod ids;

pub use entities::{AbilityBonus, Character, CreateCharacterRequest, ReferenceItem};
pub use error::DomainError;
pub use game_system::{GameSystem, GameSystemInfo};
pub use ids::CharacterId;
