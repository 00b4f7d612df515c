//! In-memory character repository.
//!
//! Characters live for the lifetime of the process; durable persistence
//! sits behind the same port and is out of scope here.

use async_trait::async_trait;
use dashmap::DashMap;

use rolechar_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

#[derive(Default)]
pub struct MemoryCharacterRepo {
    characters: DashMap<CharacterId, Character>,
}

impl MemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for MemoryCharacterRepo {
    async fn create(&self, character: Character) -> Result<Character, RepoError> {
        self.characters.insert(character.id, character.clone());
        Ok(character)
    }

    async fn get_all(&self) -> Result<Vec<Character>, RepoError> {
        let mut all: Vec<Character> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolechar_domain::CreateCharacterRequest;

    fn character(name: &str) -> Character {
        Character::from_request(CreateCharacterRequest {
            name: name.to_string(),
            level: 1,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn created_characters_are_listed() {
        let repo = MemoryCharacterRepo::new();
        repo.create(character("Mira")).await.unwrap();
        repo.create(character("Rogar")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|c| c.name == "Mira"));
    }

    #[tokio::test]
    async fn create_echoes_the_stored_record() {
        let repo = MemoryCharacterRepo::new();
        let created = repo.create(character("Mira")).await.unwrap();
        assert_eq!(created.name, "Mira");
    }
}
