//! Character creation and listing.

use std::sync::Arc;

use thiserror::Error;

use rolechar_domain::{Character, CreateCharacterRequest, DomainError};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct CharacterUseCases {
    repo: Arc<dyn CharacterRepo>,
}

impl CharacterUseCases {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    /// Validate the request, stamp id and timestamps, and store the record.
    pub async fn create(&self, request: CreateCharacterRequest) -> Result<Character, CharacterError> {
        request.validate()?;
        let character = Character::from_request(request);
        Ok(self.repo.create(character).await?)
    }

    pub async fn list(&self) -> Result<Vec<Character>, CharacterError> {
        Ok(self.repo.get_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterRepo;

    fn request(name: &str) -> CreateCharacterRequest {
        serde_json::from_value(serde_json::json!({"name": name})).unwrap()
    }

    #[tokio::test]
    async fn create_stores_a_validated_character() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_create().returning(|c| Ok(c));

        let use_cases = CharacterUseCases::new(Arc::new(repo));
        let character = use_cases.create(request("Mira")).await.unwrap();

        assert_eq!(character.name, "Mira");
        assert_eq!(character.level, 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_requests_without_touching_the_repo() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_create().never();

        let use_cases = CharacterUseCases::new(Arc::new(repo));
        let err = use_cases.create(request("   ")).await.unwrap_err();

        assert!(matches!(err, CharacterError::Domain(_)));
    }

    #[tokio::test]
    async fn list_passes_through_repo_contents() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get_all().returning(|| Ok(Vec::new()));

        let use_cases = CharacterUseCases::new(Arc::new(repo));
        assert!(use_cases.list().await.unwrap().is_empty());
    }
}
