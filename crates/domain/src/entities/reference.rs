//! The uniform reference-data item.
//!
//! Every selectable game option (a race, class, spell, item, ...) is
//! normalized into this shape regardless of which source produced it.
//! `id` and `name` are always non-empty; `description` is always present,
//! falling back to an empty string when the upstream source has none.
//! Category-specific fields are optional and omitted from JSON when unset.

use serde::{Deserialize, Serialize};

use crate::game_system::GameSystem;

/// An ability-score bonus granted by a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    pub ability_score: String,
    pub bonus: i32,
}

/// A normalized reference-data record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ability: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_die: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability_bonuses: Option<Vec<AbilityBonus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiencies: Option<Vec<String>>,

    pub source: GameSystem,
}

impl ReferenceItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, source: GameSystem) -> Self {
        let id = id.into();
        let name = name.into();
        debug_assert!(!id.is_empty(), "reference item id must be non-empty");
        debug_assert!(!name.is_empty(), "reference item name must be non-empty");
        Self {
            id,
            name,
            description: String::new(),
            level: None,
            school: None,
            attribute: None,
            kind: None,
            rarity: None,
            category: None,
            hp: None,
            size: None,
            key_ability: None,
            script: None,
            speed: None,
            hit_die: None,
            ability_bonuses: None,
            proficiencies: None,
            source,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_size(mut self, size: Vec<String>) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_key_ability(mut self, key_ability: Vec<String>) -> Self {
        self.key_ability = Some(key_ability);
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_hit_die(mut self, hit_die: i32) -> Self {
        self.hit_die = Some(hit_die);
        self
    }

    pub fn with_ability_bonuses(mut self, bonuses: Vec<AbilityBonus>) -> Self {
        self.ability_bonuses = Some(bonuses);
        self
    }

    pub fn with_proficiencies(mut self, proficiencies: Vec<String>) -> Self {
        self.proficiencies = Some(proficiencies);
        self
    }
}
