//! World of Darkness reference data.
//!
//! There is no public World of Darkness API, so this source serves
//! hand-authored tables: vampire clans stand in for races, disciplines
//! for spells, and the talent/skill/knowledge abilities for skills.
//! Categories the system does not model fall back to the custom tables.

use async_trait::async_trait;

use rolechar_domain::{GameSystem, ReferenceItem};

use crate::infrastructure::ports::{GameDataSource, SourceError};
use crate::infrastructure::sources::custom;

fn clan(id: &str, name: &str, description: &str) -> ReferenceItem {
    ReferenceItem::new(id, name, GameSystem::Wod).with_description(description)
}

pub fn clans() -> Vec<ReferenceItem> {
    vec![
        clan(
            "brujah",
            "Brujah",
            "Rebeldes apasionados y filósofos iracundos, llevan la sangre de los guerreros.",
        ),
        clan(
            "gangrel",
            "Gangrel",
            "Nómadas solitarios con afinidad a los animales y a la naturaleza.",
        ),
        clan(
            "malkavian",
            "Malkavian",
            "Bendecidos y maldecidos con la locura y visiones proféticas.",
        ),
        clan(
            "nosferatu",
            "Nosferatu",
            "Desfigurados por la Maldición, son maestros de la información y el sigilo.",
        ),
        clan(
            "toreador",
            "Toreador",
            "Apasionados por el arte y la belleza, son los más humanos de los vampiros.",
        ),
        clan(
            "tremere",
            "Tremere",
            "Magos convertidos en vampiros, organizados en una estructura hermética.",
        ),
        clan(
            "ventrue",
            "Ventrue",
            "Nobles y aristocráticos, son los líderes naturales de la sociedad vampírica.",
        ),
    ]
}

pub fn disciplines() -> Vec<ReferenceItem> {
    [
        ("animalism", "Animalism", "Control sobre las bestias y la propia Bestia interior."),
        ("auspex", "Auspex", "Percepción sobrenatural y sentidos agudizados."),
        ("celerity", "Celerity", "Velocidad y reflejos sobrehumanos."),
        ("dominate", "Dominate", "Control mental y manipulación de la voluntad."),
        ("fortitude", "Fortitude", "Resistencia sobrenatural y capacidad de soportar daño."),
        ("obfuscate", "Obfuscate", "Ocultación y manipulación de la percepción."),
        ("potence", "Potence", "Fuerza sobrehumana."),
        ("presence", "Presence", "Manipulación emocional y carisma sobrenatural."),
        ("protean", "Protean", "Transformación física y adaptación."),
        ("thaumaturgy", "Thaumaturgy", "Magia de sangre de los Tremere."),
    ]
    .into_iter()
    .map(|(id, name, description)| {
        ReferenceItem::new(id, name, GameSystem::Wod)
            .with_description(description)
            .with_level(1)
    })
    .collect()
}

pub fn abilities() -> Vec<ReferenceItem> {
    let talents = [
        ("alertness", "Alertness", "Percepción y conciencia del entorno."),
        ("athletics", "Athletics", "Capacidad atlética general."),
        ("brawl", "Brawl", "Combate sin armas."),
        ("empathy", "Empathy", "Comprensión de emociones ajenas."),
        ("expression", "Expression", "Comunicación artística y emocional."),
        ("intimidation", "Intimidation", "Infundir miedo e imponer respeto."),
        ("leadership", "Leadership", "Capacidad para liderar y dirigir."),
        ("streetwise", "Streetwise", "Conocimiento de la vida en las calles."),
        ("subterfuge", "Subterfuge", "Engaño y manipulación sutil."),
    ];
    let skills = [
        ("animal_ken", "Animal Ken", "Comprensión y manejo de animales."),
        ("crafts", "Crafts", "Creación y reparación de objetos."),
        ("drive", "Drive", "Manejo de vehículos."),
        ("etiquette", "Etiquette", "Protocolo social y buenos modales."),
        ("firearms", "Firearms", "Manejo de armas de fuego."),
        ("melee", "Melee", "Combate con armas cuerpo a cuerpo."),
        ("performance", "Performance", "Actuación y artes escénicas."),
        ("security", "Security", "Sistemas de seguridad y cerrajería."),
        ("stealth", "Stealth", "Sigilo y ocultación."),
        ("survival", "Survival", "Supervivencia en entornos hostiles."),
    ];
    let knowledges = [
        ("academics", "Academics", "Conocimientos académicos generales."),
        ("computer", "Computer", "Manejo de sistemas informáticos."),
        ("finance", "Finance", "Conocimiento de finanzas y economía."),
        ("investigation", "Investigation", "Capacidad para investigar y resolver misterios."),
        ("law", "Law", "Conocimiento de leyes y sistemas legales."),
        ("medicine", "Medicine", "Conocimientos médicos y de primeros auxilios."),
        ("occult", "Occult", "Conocimiento de lo sobrenatural y místico."),
        ("politics", "Politics", "Comprensión de sistemas políticos y relaciones de poder."),
        ("science", "Science", "Conocimiento científico general."),
    ];

    let grouped = [
        ("talent", talents.as_slice()),
        ("skill", skills.as_slice()),
        ("knowledge", knowledges.as_slice()),
    ];

    grouped
        .into_iter()
        .flat_map(|(category, entries)| {
            entries.iter().map(move |(id, name, description)| {
                ReferenceItem::new(*id, *name, GameSystem::Wod)
                    .with_description(*description)
                    .with_category(category)
            })
        })
        .collect()
}

pub fn backgrounds() -> Vec<ReferenceItem> {
    [
        ("allies", "Allies", "Personas influyentes que te apoyan."),
        ("contacts", "Contacts", "Red de informantes y conocidos."),
        ("fame", "Fame", "Reconocimiento público y celebridad."),
        ("generation", "Generation", "Cercanía a Caín, el primer vampiro."),
        ("herd", "Herd", "Grupo de mortales para alimentarse."),
        ("influence", "Influence", "Poder en la sociedad mortal."),
        ("mentor", "Mentor", "Guía y maestro vampírico."),
        ("resources", "Resources", "Riqueza material y financiera."),
        ("retainers", "Retainers", "Sirvientes y ayudantes leales."),
        ("status", "Status", "Posición en la sociedad vampírica."),
    ]
    .into_iter()
    .map(|(id, name, description)| {
        ReferenceItem::new(id, name, GameSystem::Wod).with_description(description)
    })
    .collect()
}

/// Static World of Darkness source.
pub struct WodSource;

#[async_trait]
impl GameDataSource for WodSource {
    async fn races(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(clans())
    }

    async fn classes(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::classes())
    }

    async fn backgrounds(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(backgrounds())
    }

    async fn alignments(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::alignments())
    }

    async fn skills(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(abilities())
    }

    async fn languages(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::languages())
    }

    async fn proficiencies(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::proficiencies())
    }

    async fn spells(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(disciplines())
    }

    async fn items(&self) -> Result<Vec<ReferenceItem>, SourceError> {
        Ok(custom::items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_clans_tagged_as_wod() {
        let clans = clans();
        assert_eq!(clans.len(), 7);
        assert!(clans.iter().all(|c| c.source == GameSystem::Wod));
        assert_eq!(clans[0].name, "Brujah");
    }

    #[test]
    fn disciplines_carry_level_one() {
        assert!(disciplines().iter().all(|d| d.level == Some(1)));
    }

    #[test]
    fn abilities_cover_three_categories() {
        let abilities = abilities();
        assert_eq!(abilities.len(), 28);
        for category in ["talent", "skill", "knowledge"] {
            assert!(abilities.iter().any(|a| a.category.as_deref() == Some(category)));
        }
    }

    #[tokio::test]
    async fn unmodeled_categories_fall_back_to_custom_tables() {
        let source = WodSource;
        let classes = source.classes().await.unwrap();
        assert_eq!(classes[0].name, "Fighter");
        assert_eq!(classes[0].source, GameSystem::Custom);
    }
}
