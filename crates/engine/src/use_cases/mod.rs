//! Use cases - user story orchestration.

pub mod characters;
pub mod game_data;

pub use characters::{CharacterError, CharacterUseCases};
pub use game_data::{GameData, GameDataService};
