//! Pathfinder 2e reference-data client (pf2etools).
//!
//! Endpoints return bare JSON arrays. Records are decoded one by one so a
//! single malformed entry is skipped instead of emptying the category.
//! Skills and languages have no endpoint and are served from fixed
//! tables; alignments and proficiencies fall back to the custom tables.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use rolechar_domain::{GameSystem, ReferenceItem};

use crate::infrastructure::ports::{GameDataSource, SourceError};
use crate::infrastructure::sources::{custom, slug_from_name, truncate_chars};

/// Default Pathfinder 2e API base URL.
pub const DEFAULT_PATHFINDER_BASE_URL: &str = "https://api.pf2etools.com/v1";

/// Description budget for Pathfinder teasers.
const DESCRIPTION_LIMIT: usize = 200;

/// Spell tradition -> school label.
const TRADITION_SCHOOLS: [(&str, &str); 4] = [
    ("arcane", "Arcane"),
    ("divine", "Divine"),
    ("occult", "Occult"),
    ("primal", "Primal"),
];

/// Equipment category keyword -> normalized item type, first match wins.
/// `shield` maps to armor and the magic-item vessels collapse to `magic`.
const EQUIPMENT_TYPES: [(&str, &str); 8] = [
    ("weapon", "weapon"),
    ("armor", "armor"),
    ("shield", "armor"),
    ("adventuring gear", "gear"),
    ("alchemical", "consumable"),
    ("staff", "magic"),
    ("wand", "magic"),
    ("scroll", "magic"),
];

const KNOWN_RARITIES: [&str; 6] = [
    "common",
    "uncommon",
    "rare",
    "very rare",
    "legendary",
    "artifact",
];

/// Client for the Pathfinder 2e REST API.
#[derive(Clone)]
pub struct PathfinderClient {
    client: Client,
    base_url: String,
    background_sample_limit: usize,
    spell_sample_limit: usize,
    equipment_sample_limit: usize,
}

impl PathfinderClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            background_sample_limit: 10,
            spell_sample_limit: 20,
            equipment_sample_limit: 20,
        }
    }

    /// Fetch an endpoint and decode each array element independently,
    /// skipping records that do not match the expected shape.
    async fn get_records<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, SourceError> {
        let response = self
            .client
            .get(format!("{}/{endpoint}", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::RequestFailed(format!(
                "{endpoint} returned {}",
                response.status()
            )));
        }

        let values: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        Ok(values
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect())
    }
}

#[async_trait]
impl GameDataSource for PathfinderClient {
    async fn races(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let records: Vec<AncestryRecord> = self.get_records("ancestries").await?;
        Ok(records.into_iter().map(transform_ancestry).collect())
    }

    async fn classes(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let records: Vec<ClassRecord> = self.get_records("classes").await?;
        Ok(records.into_iter().map(transform_class).collect())
    }

    async fn backgrounds(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let records: Vec<BackgroundRecord> = self.get_records("backgrounds").await?;
        Ok(records
            .into_iter()
            .take(self.background_sample_limit)
            .map(transform_background)
            .collect())
    }

    /// Pathfinder 2e dropped alignments; serve the shared fallback table.
    async fn alignments(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::alignments())
    }

    async fn skills(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(core_skills())
    }

    async fn languages(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(core_languages())
    }

    async fn proficiencies(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::proficiencies())
    }

    async fn spells(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let records: Vec<SpellRecord> = self.get_records("spells").await?;
        Ok(records
            .into_iter()
            .take(self.spell_sample_limit)
            .map(transform_spell)
            .collect())
    }

    async fn items(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let records: Vec<EquipmentRecord> = self.get_records("equipment").await?;
        Ok(records
            .into_iter()
            .take(self.equipment_sample_limit)
            .map(transform_equipment)
            .collect())
    }
}

fn record_id(id: String, name: &str) -> String {
    if id.is_empty() {
        slug_from_name(name)
    } else {
        id
    }
}

fn short_description(text: Option<String>) -> String {
    text.map(|t| truncate_chars(&t, DESCRIPTION_LIMIT))
        .unwrap_or_default()
}

fn tradition_school(traditions: &[String]) -> String {
    traditions
        .first()
        .and_then(|first| {
            TRADITION_SCHOOLS
                .iter()
                .find(|(tradition, _)| tradition == first)
                .map(|(_, school)| school.to_string())
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

fn equipment_kind(category: &str) -> &'static str {
    let category = category.to_lowercase();
    EQUIPMENT_TYPES
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or("gear")
}

fn normalize_rarity(rarity: Option<String>) -> String {
    let rarity = rarity.unwrap_or_else(|| "common".to_string()).to_lowercase();
    if KNOWN_RARITIES.contains(&rarity.as_str()) {
        rarity
    } else {
        "common".to_string()
    }
}

fn transform_ancestry(record: AncestryRecord) -> ReferenceItem {
    let id = record_id(record.id, &record.name);
    ReferenceItem::new(id, record.name, GameSystem::Pathfinder)
        .with_description(short_description(record.description_short))
        .with_hp(record.hp)
        .with_size(record.size)
}

fn transform_class(record: ClassRecord) -> ReferenceItem {
    let id = record_id(record.id, &record.name);
    ReferenceItem::new(id, record.name, GameSystem::Pathfinder)
        .with_description(short_description(record.description_short))
        .with_key_ability(record.key_ability)
}

fn transform_background(record: BackgroundRecord) -> ReferenceItem {
    let id = record_id(record.id, &record.name);
    ReferenceItem::new(id, record.name, GameSystem::Pathfinder)
        .with_description(short_description(record.description_short))
}

fn transform_spell(record: SpellRecord) -> ReferenceItem {
    let id = record_id(record.id, &record.name);
    let school = tradition_school(&record.traditions);
    ReferenceItem::new(id, record.name, GameSystem::Pathfinder)
        .with_description(short_description(record.description))
        .with_level(record.level)
        .with_school(school)
}

fn transform_equipment(record: EquipmentRecord) -> ReferenceItem {
    let id = record_id(record.id, &record.name);
    let kind = equipment_kind(record.category.as_deref().unwrap_or_default());
    ReferenceItem::new(id, record.name, GameSystem::Pathfinder)
        .with_description(short_description(record.description))
        .with_kind(kind)
        .with_rarity(normalize_rarity(record.rarity))
}

/// The 16 Pathfinder 2e core skills.
fn core_skills() -> Vec<ReferenceItem> {
    [
        ("acrobatics", "Acrobatics", "dexterity", "Mantener el equilibrio y realizar hazañas de agilidad."),
        ("arcana", "Arcana", "intelligence", "Conocimiento sobre magia arcana."),
        ("athletics", "Athletics", "strength", "Escalar, nadar y realizar otras actividades físicas."),
        ("crafting", "Crafting", "intelligence", "Crear y reparar objetos."),
        ("deception", "Deception", "charisma", "Mentir y engañar a otros."),
        ("diplomacy", "Diplomacy", "charisma", "Cambiar la actitud de otros mediante negociación."),
        ("intimidation", "Intimidation", "charisma", "Influenciar a través del miedo."),
        ("lore", "Lore", "intelligence", "Conocimiento especializado sobre un tema."),
        ("medicine", "Medicine", "wisdom", "Tratar enfermedades y heridas."),
        ("nature", "Nature", "wisdom", "Conocimiento sobre el mundo natural."),
        ("occultism", "Occultism", "intelligence", "Conocimiento sobre lo paranormal."),
        ("performance", "Performance", "charisma", "Impresionar a otros con arte."),
        ("religion", "Religion", "wisdom", "Conocimiento sobre deidades y religión."),
        ("society", "Society", "intelligence", "Conocimiento sobre civilizaciones e historia."),
        ("stealth", "Stealth", "dexterity", "Moverse sin ser detectado."),
        ("survival", "Survival", "wisdom", "Sobrevivir en la naturaleza."),
    ]
    .into_iter()
    .map(|(id, name, attribute, description)| {
        ReferenceItem::new(id, name, GameSystem::Pathfinder)
            .with_description(description)
            .with_attribute(attribute)
    })
    .collect()
}

/// Common Pathfinder 2e languages (no upstream endpoint).
fn core_languages() -> Vec<ReferenceItem> {
    [
        ("common", "Common", "El idioma hablado por humanos y ampliamente utilizado para el comercio."),
        ("dwarven", "Dwarven", "El idioma de los enanos."),
        ("elven", "Elven", "El idioma de los elfos."),
        ("gnomish", "Gnomish", "El idioma de los gnomos."),
        ("goblin", "Goblin", "El idioma de los goblins y otros goblinoides."),
        ("halfling", "Halfling", "El idioma de los halflings."),
        ("orcish", "Orcish", "El idioma de los orcos."),
        ("sylvan", "Sylvan", "El idioma de las fey y criaturas del bosque."),
        ("draconic", "Draconic", "El idioma de los dragones y sus descendientes."),
        ("celestial", "Celestial", "El idioma de los seres celestiales."),
    ]
    .into_iter()
    .map(|(id, name, description)| {
        ReferenceItem::new(id, name, GameSystem::Pathfinder).with_description(description)
    })
    .collect()
}

// =============================================================================
// pf2etools payload types
// =============================================================================

#[derive(Debug, Deserialize)]
struct AncestryRecord {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(rename = "descriptionShort", default)]
    description_short: Option<String>,
    #[serde(default)]
    hp: i32,
    #[serde(default)]
    size: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ClassRecord {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(rename = "descriptionShort", default)]
    description_short: Option<String>,
    #[serde(rename = "keyAbility", default)]
    key_ability: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BackgroundRecord {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(rename = "descriptionShort", default)]
    description_short: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpellRecord {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    traditions: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EquipmentRecord {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    rarity: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestry_transform_keeps_hp_and_size() {
        let record: AncestryRecord = serde_json::from_value(serde_json::json!({
            "_id": "dwarf",
            "name": "Dwarf",
            "descriptionShort": "Stout and stoic.",
            "hp": 10,
            "size": ["medium"]
        }))
        .unwrap();

        let item = transform_ancestry(record);
        assert_eq!(item.hp, Some(10));
        assert_eq!(item.size.as_deref(), Some(&["medium".to_string()][..]));
        assert_eq!(item.source, GameSystem::Pathfinder);
    }

    #[test]
    fn record_without_id_gets_slug_from_name() {
        let record: AncestryRecord =
            serde_json::from_value(serde_json::json!({"name": "Half Orc"})).unwrap();
        assert_eq!(transform_ancestry(record).id, "half-orc");
    }

    #[test]
    fn description_truncates_to_two_hundred_chars() {
        let record: BackgroundRecord = serde_json::from_value(serde_json::json!({
            "_id": "farmer",
            "name": "Farmer",
            "descriptionShort": "y".repeat(500)
        }))
        .unwrap();

        assert_eq!(transform_background(record).description.chars().count(), 200);
    }

    #[test]
    fn spell_school_follows_first_tradition() {
        assert_eq!(tradition_school(&["arcane".to_string()]), "Arcane");
        assert_eq!(
            tradition_school(&["primal".to_string(), "divine".to_string()]),
            "Primal"
        );
        assert_eq!(tradition_school(&["weird".to_string()]), "Unknown");
        assert_eq!(tradition_school(&[]), "Unknown");
    }

    #[test]
    fn equipment_kind_matches_lowercased_category() {
        assert_eq!(equipment_kind("Martial Weapon"), "weapon");
        assert_eq!(equipment_kind("Tower Shield"), "armor");
        assert_eq!(equipment_kind("Alchemical Bomb"), "consumable");
        assert_eq!(equipment_kind("Magic Wand"), "magic");
        assert_eq!(equipment_kind("Oddity"), "gear");
    }

    #[test]
    fn rarity_normalizes_unknown_values_to_common() {
        assert_eq!(normalize_rarity(Some("Rare".to_string())), "rare");
        assert_eq!(normalize_rarity(Some("mythical".to_string())), "common");
        assert_eq!(normalize_rarity(None), "common");
    }

    #[test]
    fn core_skills_are_sixteen_with_attributes() {
        let skills = core_skills();
        assert_eq!(skills.len(), 16);
        assert!(skills.iter().all(|s| s.attribute.is_some()));
        assert!(skills.iter().all(|s| s.source == GameSystem::Pathfinder));
    }

    #[test]
    fn core_languages_are_ten() {
        assert_eq!(core_languages().len(), 10);
    }

    #[tokio::test]
    async fn alignments_fall_back_to_custom_table() {
        let client = PathfinderClient::new(DEFAULT_PATHFINDER_BASE_URL, Duration::from_secs(5));
        let alignments = client.alignments().await.unwrap();
        assert_eq!(alignments.len(), 9);
        assert_eq!(alignments[0].source, GameSystem::Custom);
    }
}
