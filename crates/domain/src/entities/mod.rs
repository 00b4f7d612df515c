//! Domain entities.

mod character;
mod reference;

pub use character::{Character, CreateCharacterRequest};
pub use reference::{AbilityBonus, ReferenceItem};
