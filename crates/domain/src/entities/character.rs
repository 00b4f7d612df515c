//! Character entities.
//!
//! A character is created from a client-supplied request and echoed back
//! with a generated id and timestamps. Associated picks (skills, spells,
//! items, ...) are stored as the reference-item ids selected in the UI.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;

/// Client payload for creating a character.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub race_id: Option<String>,
    #[serde(default)]
    pub background_id: Option<String>,
    #[serde(default)]
    pub alignment_id: Option<String>,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub proficiencies: Vec<String>,
    #[serde(default)]
    pub spells: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

fn default_level() -> i32 {
    1
}

impl CreateCharacterRequest {
    /// Check the request against domain invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("character name must not be empty"));
        }
        if self.level < 1 {
            return Err(DomainError::validation("character level must be at least 1"));
        }
        Ok(())
    }
}

/// A created character record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_id: Option<String>,
    pub level: i32,
    pub description: String,
    pub attributes: HashMap<String, i32>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub proficiencies: Vec<String>,
    pub spells: Vec<String>,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Build a character from a validated request.
    pub fn from_request(request: CreateCharacterRequest) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: request.name,
            game_type: request.game_type,
            race_id: request.race_id,
            background_id: request.background_id,
            alignment_id: request.alignment_id,
            level: request.level,
            description: request.description.unwrap_or_default(),
            attributes: request.attributes,
            skills: request.skills,
            languages: request.languages,
            proficiencies: request.proficiencies,
            spells: request.spells,
            items: request.items,
            created_at: now,
            updated_at: now,
        }
    }
}
