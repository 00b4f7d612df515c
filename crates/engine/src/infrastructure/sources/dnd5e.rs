//! D&D 5e reference-data client (dnd5eapi.co).
//!
//! Listing endpoints return `{count, results: [{index, name, url}]}`; each
//! listed resource is resolved with a follow-up request. Detail fetches
//! run concurrently and individual failures are skipped so one bad record
//! cannot empty a whole category. Large catalogs are sampled (spells and
//! equipment to a fixed count, proficiencies per type keyword) to bound
//! latency and payload size.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use rolechar_domain::{AbilityBonus, GameSystem, ReferenceItem};

use crate::infrastructure::ports::{GameDataSource, SourceError};
use crate::infrastructure::sources::truncate_chars;

/// Default D&D 5e API base URL.
pub const DEFAULT_DND5E_BASE_URL: &str = "https://www.dnd5eapi.co/api";

/// Description budget for D&D 5e teasers.
const DESCRIPTION_LIMIT: usize = 100;

/// Proficiency name keyword -> normalized type, first match wins.
const PROFICIENCY_TYPES: [(&str, &str); 5] = [
    ("Armor", "armor"),
    ("Weapons", "weapon"),
    ("Tools", "tool"),
    ("Saving Throw", "saving_throw"),
    ("Skill", "skill"),
];

/// Equipment category keyword -> normalized item type.
const EQUIPMENT_TYPES: [(&str, &str); 5] = [
    ("Weapon", "weapon"),
    ("Armor", "armor"),
    ("Adventuring Gear", "gear"),
    ("Tools", "tool"),
    ("Mounts and Vehicles", "mount"),
];

/// Client for the D&D 5e REST API.
#[derive(Clone)]
pub struct Dnd5eClient {
    client: Client,
    base_url: String,
    spell_sample_limit: usize,
    equipment_sample_limit: usize,
    proficiency_type_limit: usize,
}

impl Dnd5eClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spell_sample_limit: 20,
            equipment_sample_limit: 20,
            proficiency_type_limit: 5,
        }
    }

    /// Override the sampling caps (kept configurable on purpose).
    pub fn with_sample_limits(mut self, spells: usize, equipment: usize, per_type: usize) -> Self {
        self.spell_sample_limit = spells;
        self.equipment_sample_limit = equipment;
        self.proficiency_type_limit = per_type;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SourceError> {
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

        response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }

    /// Listing entries carry either an absolute `/api/...` path or a path
    /// relative to the base URL.
    fn detail_url(&self, listed: &ListedResource) -> String {
        if listed.url.starts_with("/api/") {
            let host = self.base_url.trim_end_matches("/api");
            format!("{host}{}", listed.url)
        } else {
            format!("{}/{}", self.base_url, listed.url)
        }
    }

    /// Resolve listed resources to detail payloads, concurrently.
    /// Failed or malformed fetches are dropped, not propagated.
    async fn resolve_listed<T: DeserializeOwned>(&self, listed: &[ListedResource]) -> Vec<T> {
        let fetches = listed.iter().map(|item| {
            let url = self.detail_url(item);
            let client = self.client.clone();
            async move {
                let response = client.get(&url).send().await.ok()?;
                if !response.status().is_success() {
                    return None;
                }
                response.json::<T>().await.ok()
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}

#[async_trait]
impl GameDataSource for Dnd5eClient {
    async fn races(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("races").await?;
        let details: Vec<RaceDetail> = self.resolve_listed(&listing.results).await;
        Ok(details.into_iter().map(transform_race).collect())
    }

    async fn classes(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("classes").await?;
        let details: Vec<ClassDetail> = self.resolve_listed(&listing.results).await;
        Ok(details.into_iter().map(transform_class).collect())
    }

    /// The D&D 5e API has no backgrounds endpoint; serve the SRD set.
    async fn backgrounds(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(srd_backgrounds())
    }

    async fn alignments(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("alignments").await?;
        let details: Vec<AlignmentDetail> = self.resolve_listed(&listing.results).await;
        Ok(details.into_iter().map(transform_alignment).collect())
    }

    async fn skills(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("skills").await?;
        let details: Vec<SkillDetail> = self.resolve_listed(&listing.results).await;
        Ok(details.into_iter().map(transform_skill).collect())
    }

    async fn languages(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("languages").await?;
        let details: Vec<LanguageDetail> = self.resolve_listed(&listing.results).await;
        Ok(details.into_iter().map(transform_language).collect())
    }

    async fn proficiencies(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("proficiencies").await?;
        let selected = select_proficiencies(&listing.results, self.proficiency_type_limit);
        let details: Vec<ProficiencyDetail> = self.resolve_listed(&selected).await;
        Ok(details.into_iter().map(transform_proficiency).collect())
    }

    async fn spells(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("spells").await?;
        let sample: Vec<ListedResource> = listing
            .results
            .into_iter()
            .take(self.spell_sample_limit)
            .collect();
        let details: Vec<SpellDetail> = self.resolve_listed(&sample).await;
        Ok(details.into_iter().map(transform_spell).collect())
    }

    async fn items(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        let listing: ResourceList = self.get_json("equipment").await?;
        let sample: Vec<ListedResource> = listing
            .results
            .into_iter()
            .take(self.equipment_sample_limit)
            .collect();
        let details: Vec<EquipmentDetail> = self.resolve_listed(&sample).await;
        Ok(details.into_iter().map(transform_equipment).collect())
    }
}

/// Keep at most `per_type` listing entries per proficiency keyword,
/// dropping entries that match no keyword. First keyword match wins.
fn select_proficiencies(results: &[ListedResource], per_type: usize) -> Vec<ListedResource> {
    let mut selected: Vec<ListedResource> = Vec::new();

    for item in results {
        for (keyword, _) in PROFICIENCY_TYPES {
            if item.name.contains(keyword) {
                let kept = selected.iter().filter(|p| p.name.contains(keyword)).count();
                if kept < per_type {
                    selected.push(item.clone());
                }
                break;
            }
        }
    }

    selected
}

fn proficiency_kind(name: &str) -> &'static str {
    PROFICIENCY_TYPES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or("other")
}

fn equipment_kind(category: &str) -> &'static str {
    EQUIPMENT_TYPES
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or("gear")
}

fn map_ability_code(code: &str) -> &'static str {
    match code {
        "STR" => "strength",
        "DEX" => "dexterity",
        "CON" => "constitution",
        "INT" => "intelligence",
        "WIS" => "wisdom",
        "CHA" => "charisma",
        _ => "",
    }
}

fn first_paragraph(desc: &[String], limit: usize) -> String {
    desc.first()
        .map(|text| truncate_chars(text, limit))
        .unwrap_or_default()
}

fn transform_race(race: RaceDetail) -> ReferenceItem {
    let traits = race
        .traits
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let description = format!("{} - {traits}", race.name);
    let bonuses = race
        .ability_bonuses
        .into_iter()
        .map(|b| AbilityBonus {
            ability_score: b.ability_score.map(|a| a.name).unwrap_or_default(),
            bonus: b.bonus,
        })
        .collect();

    ReferenceItem::new(race.index, race.name, GameSystem::Dnd5e)
        .with_description(description)
        .with_speed(race.speed.unwrap_or(30))
        .with_ability_bonuses(bonuses)
}

fn transform_class(class: ClassDetail) -> ReferenceItem {
    let hit_die_label = class
        .hit_die
        .map(|d| d.to_string())
        .unwrap_or_else(|| "?".to_string());
    let description = format!("{} - Hit Die: d{hit_die_label}", class.name);
    let proficiencies = class.proficiencies.into_iter().map(|p| p.name).collect();

    ReferenceItem::new(class.index, class.name, GameSystem::Dnd5e)
        .with_description(description)
        .with_hit_die(class.hit_die.unwrap_or(8))
        .with_proficiencies(proficiencies)
}

fn transform_spell(spell: SpellDetail) -> ReferenceItem {
    let school = spell
        .school
        .map(|s| s.name)
        .unwrap_or_else(|| "Unknown".to_string());
    let description = first_paragraph(&spell.desc, DESCRIPTION_LIMIT);

    ReferenceItem::new(spell.index, spell.name, GameSystem::Dnd5e)
        .with_description(description)
        .with_level(spell.level)
        .with_school(school)
}

fn transform_skill(skill: SkillDetail) -> ReferenceItem {
    let code = skill.ability_score.map(|a| a.name).unwrap_or_default();
    let description = first_paragraph(&skill.desc, DESCRIPTION_LIMIT);

    ReferenceItem::new(skill.index, skill.name, GameSystem::Dnd5e)
        .with_description(description)
        .with_attribute(map_ability_code(&code))
}

fn transform_alignment(alignment: AlignmentDetail) -> ReferenceItem {
    ReferenceItem::new(alignment.index, alignment.name, GameSystem::Dnd5e)
        .with_description(alignment.desc)
}

fn transform_language(language: LanguageDetail) -> ReferenceItem {
    let script_label = language.script.clone().unwrap_or_else(|| "None".to_string());
    let kind_label = language.kind.unwrap_or_else(|| "Unknown".to_string());
    let description = format!("Script: {script_label}, Type: {kind_label}");

    ReferenceItem::new(language.index, language.name, GameSystem::Dnd5e)
        .with_description(description)
        .with_script(language.script.unwrap_or_default())
}

fn transform_proficiency(proficiency: ProficiencyDetail) -> ReferenceItem {
    let kind = proficiency_kind(&proficiency.name);
    ReferenceItem::new(proficiency.index, proficiency.name, GameSystem::Dnd5e).with_kind(kind)
}

fn transform_equipment(equipment: EquipmentDetail) -> ReferenceItem {
    let category = equipment
        .equipment_category
        .map(|c| c.name)
        .unwrap_or_default();
    let description = first_paragraph(&equipment.desc, DESCRIPTION_LIMIT);

    // The API has no rarity field; everything is reported as common.
    ReferenceItem::new(equipment.index, equipment.name, GameSystem::Dnd5e)
        .with_description(description)
        .with_kind(equipment_kind(&category))
        .with_rarity("common")
}

fn srd_backgrounds() -> Vec<ReferenceItem> {
    [
        ("acolyte", "Acolyte", "You have spent your life in service to a temple."),
        ("criminal", "Criminal", "You have a history of breaking the law."),
        (
            "folk-hero",
            "Folk Hero",
            "You come from a humble social rank, but are destined for much more.",
        ),
        (
            "noble",
            "Noble",
            "You were born into a family of wealth, power, and privilege.",
        ),
        ("sage", "Sage", "You spent years learning the lore of the multiverse."),
        (
            "soldier",
            "Soldier",
            "War has been your life for as long as you care to remember.",
        ),
    ]
    .into_iter()
    .map(|(id, name, description)| {
        ReferenceItem::new(id, name, GameSystem::Dnd5e).with_description(description)
    })
    .collect()
}

// =============================================================================
// D&D 5e API payload types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ResourceList {
    #[serde(default)]
    results: Vec<ListedResource>,
}

#[derive(Debug, Clone, Deserialize)]
struct ListedResource {
    #[allow(dead_code)]
    index: String,
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RaceDetail {
    index: String,
    name: String,
    #[serde(default)]
    speed: Option<i32>,
    #[serde(default)]
    traits: Vec<NamedRef>,
    #[serde(default)]
    ability_bonuses: Vec<AbilityBonusDetail>,
}

#[derive(Debug, Deserialize)]
struct AbilityBonusDetail {
    #[serde(default)]
    ability_score: Option<NamedRef>,
    #[serde(default)]
    bonus: i32,
}

#[derive(Debug, Deserialize)]
struct ClassDetail {
    index: String,
    name: String,
    #[serde(default)]
    hit_die: Option<i32>,
    #[serde(default)]
    proficiencies: Vec<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct SpellDetail {
    index: String,
    name: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    school: Option<NamedRef>,
    #[serde(default)]
    desc: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SkillDetail {
    index: String,
    name: String,
    #[serde(default)]
    ability_score: Option<NamedRef>,
    #[serde(default)]
    desc: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AlignmentDetail {
    index: String,
    name: String,
    #[serde(default)]
    desc: String,
}

#[derive(Debug, Deserialize)]
struct LanguageDetail {
    index: String,
    name: String,
    #[serde(default)]
    script: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProficiencyDetail {
    index: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct EquipmentDetail {
    index: String,
    name: String,
    #[serde(default)]
    equipment_category: Option<NamedRef>,
    #[serde(default)]
    desc: Vec<String>,
}
