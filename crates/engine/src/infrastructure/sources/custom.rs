//! Built-in fallback reference data.
//!
//! Serves the "custom" game system and every unrecognized identifier, and
//! individual tables back the categories other systems cannot provide
//! (Pathfinder alignments, World of Darkness classes, ...). Each category
//! always has a table so the facade never fails on an unknown system.

use async_trait::async_trait;

use rolechar_domain::{GameSystem, ReferenceItem};

use crate::infrastructure::ports::{GameDataSource, SourceError};

fn item(id: &str, name: &str, description: &str) -> ReferenceItem {
    ReferenceItem::new(id, name, GameSystem::Custom).with_description(description)
}

pub fn races() -> Vec<ReferenceItem> {
    vec![
        item("human", "Human", "Versatile and adaptable"),
        item("elf", "Elf", "Graceful and long-lived"),
        item("dwarf", "Dwarf", "Strong and sturdy"),
        item("halfling", "Halfling", "Small and nimble"),
        item("gnome", "Gnome", "Curious and inventive"),
    ]
}

pub fn classes() -> Vec<ReferenceItem> {
    vec![
        item("fighter", "Fighter", "Master of weapons and armor"),
        item("wizard", "Wizard", "Scholar of magical arts"),
        item("rogue", "Rogue", "Expert in stealth and trickery"),
        item("cleric", "Cleric", "Divine spellcaster and healer"),
        item("ranger", "Ranger", "Hunter and tracker"),
    ]
}

pub fn backgrounds() -> Vec<ReferenceItem> {
    vec![
        item("noble", "Noble", "Born to wealth and privilege"),
        item("acolyte", "Acolyte", "Served in a temple"),
        item("criminal", "Criminal", "Has a criminal past"),
        item("soldier", "Soldier", "Trained in military"),
        item("sage", "Sage", "Scholar and researcher"),
    ]
}

pub fn alignments() -> Vec<ReferenceItem> {
    vec![
        item("lawful-good", "Lawful Good", "Honor and compassion"),
        item("neutral-good", "Neutral Good", "Do the best good"),
        item("chaotic-good", "Chaotic Good", "Freedom and kindness"),
        item("lawful-neutral", "Lawful Neutral", "Order above all"),
        item("true-neutral", "True Neutral", "Balance in all things"),
        item("chaotic-neutral", "Chaotic Neutral", "Freedom above all"),
        item("lawful-evil", "Lawful Evil", "Methodical conquest"),
        item("neutral-evil", "Neutral Evil", "Selfish interest"),
        item("chaotic-evil", "Chaotic Evil", "Destruction and chaos"),
    ]
}

pub fn skills() -> Vec<ReferenceItem> {
    [
        ("acrobatics", "Acrobatics", "dexterity"),
        ("animal-handling", "Animal Handling", "wisdom"),
        ("arcana", "Arcana", "intelligence"),
        ("athletics", "Athletics", "strength"),
        ("deception", "Deception", "charisma"),
        ("history", "History", "intelligence"),
        ("insight", "Insight", "wisdom"),
        ("intimidation", "Intimidation", "charisma"),
    ]
    .into_iter()
    .map(|(id, name, attribute)| {
        ReferenceItem::new(id, name, GameSystem::Custom).with_attribute(attribute)
    })
    .collect()
}

pub fn languages() -> Vec<ReferenceItem> {
    vec![
        item("common", "Common", "The common tongue of humans"),
        item("elvish", "Elvish", "The language of elves"),
        item("dwarvish", "Dwarvish", "The language of dwarves"),
        item("giant", "Giant", "The language of giants"),
        item("gnomish", "Gnomish", "The language of gnomes"),
    ]
}

pub fn proficiencies() -> Vec<ReferenceItem> {
    [
        ("light-armor", "Light Armor", "armor"),
        ("medium-armor", "Medium Armor", "armor"),
        ("heavy-armor", "Heavy Armor", "armor"),
        ("shields", "Shields", "armor"),
        ("simple-weapons", "Simple Weapons", "weapon"),
        ("martial-weapons", "Martial Weapons", "weapon"),
    ]
    .into_iter()
    .map(|(id, name, kind)| ReferenceItem::new(id, name, GameSystem::Custom).with_kind(kind))
    .collect()
}

pub fn spells() -> Vec<ReferenceItem> {
    [
        ("magic-missile", "Magic Missile", 1, "Evocation"),
        ("fireball", "Fireball", 3, "Evocation"),
        ("cure-wounds", "Cure Wounds", 1, "Evocation"),
        ("detect-magic", "Detect Magic", 1, "Divination"),
        ("invisibility", "Invisibility", 2, "Illusion"),
    ]
    .into_iter()
    .map(|(id, name, level, school)| {
        ReferenceItem::new(id, name, GameSystem::Custom)
            .with_level(level)
            .with_school(school)
    })
    .collect()
}

pub fn items() -> Vec<ReferenceItem> {
    [
        ("potion-of-healing", "Potion of Healing", "consumable"),
        ("longsword", "Longsword", "weapon"),
        ("shield", "Shield", "armor"),
        ("rope", "Rope", "gear"),
        ("lantern", "Lantern", "gear"),
    ]
    .into_iter()
    .map(|(id, name, kind)| {
        ReferenceItem::new(id, name, GameSystem::Custom)
            .with_kind(kind)
            .with_rarity("common")
    })
    .collect()
}

/// The fallback source: static tables for every category.
pub struct CustomSource;

#[async_trait]
impl GameDataSource for CustomSource {
    async fn races(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(races())
    }

    async fn classes(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(classes())
    }

    async fn backgrounds(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(backgrounds())
    }

    async fn alignments(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(alignments())
    }

    async fn skills(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(skills())
    }

    async fn languages(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(languages())
    }

    async fn proficiencies(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(proficiencies())
    }

    async fn spells(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(spells())
    }

    async fn items(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_non_empty_with_valid_items() {
        let tables = [
            races(),
            classes(),
            backgrounds(),
            alignments(),
            skills(),
            languages(),
            proficiencies(),
            spells(),
            items(),
        ];
        for table in tables {
            assert!(!table.is_empty());
            for item in table {
                assert!(!item.id.is_empty());
                assert!(!item.name.is_empty());
                assert_eq!(item.source, GameSystem::Custom);
            }
        }
    }

    #[test]
    fn race_table_matches_the_documented_five() {
        let names: Vec<_> = races().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Human", "Elf", "Dwarf", "Halfling", "Gnome"]);
    }

    #[test]
    fn alignment_table_has_nine_entries() {
        assert_eq!(alignments().len(), 9);
    }
}
