//! Port traits for external dependencies.

use async_trait::async_trait;
use thiserror::Error;

use rolechar_domain::{Character, ReferenceItem};

/// Failure of an external reference-data source.
///
/// Sources surface the reason instead of swallowing it; the aggregator
/// logs it and degrades that category to an empty list for the caller.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        Self::RequestFailed(e.to_string())
    }
}

/// Reference data for one game system, one method per category.
///
/// Implementations either query a remote API or serve hand-authored
/// tables. A category the backing system does not model returns the
/// shared fallback table rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameDataSource: Send + Sync {
    async fn races(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn classes(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn backgrounds(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn alignments(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn skills(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn languages(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn proficiencies(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn spells(&self) -> Result<Vec<ReferenceItem>, SourceError>;
    async fn items(&self) -> Result<Vec<ReferenceItem>, SourceError>;
}

/// Character storage failure.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Character storage port (create / get-all).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn create(&self, character: Character) -> Result<Character, RepoError>;
    async fn get_all(&self) -> Result<Vec<Character>, RepoError>;
}
