//! Uniform reference-data facade.
//!
//! Routes every lookup to the source registered for the requested game
//! system. A degraded source (network down, bad payload) yields an empty
//! list for that category after logging the reason; it never fails the
//! request and never affects sibling categories.

use std::sync::Arc;

use serde::Serialize;

use rolechar_domain::{GameSystem, ReferenceItem};

use crate::infrastructure::ports::{GameDataSource, SourceError};

/// All reference data for one game system, keyed by category.
#[derive(Debug, Serialize)]
pub struct GameData {
    pub races: Vec<ReferenceItem>,
    pub classes: Vec<ReferenceItem>,
    pub backgrounds: Vec<ReferenceItem>,
    pub alignments: Vec<ReferenceItem>,
    pub skills: Vec<ReferenceItem>,
    pub languages: Vec<ReferenceItem>,
    pub proficiencies: Vec<ReferenceItem>,
    pub spells: Vec<ReferenceItem>,
    pub items: Vec<ReferenceItem>,
}

/// Dispatches reference-data lookups across the registered sources.
pub struct GameDataService {
    dnd5e: Arc<dyn GameDataSource>,
    pathfinder: Arc<dyn GameDataSource>,
    wod: Arc<dyn GameDataSource>,
    custom: Arc<dyn GameDataSource>,
}

impl GameDataService {
    pub fn new(
        dnd5e: Arc<dyn GameDataSource>,
        pathfinder: Arc<dyn GameDataSource>,
        wod: Arc<dyn GameDataSource>,
        custom: Arc<dyn GameDataSource>,
    ) -> Self {
        Self {
            dnd5e,
            pathfinder,
            wod,
            custom,
        }
    }

    fn source_for(&self, system: GameSystem) -> &dyn GameDataSource {
        match system {
            GameSystem::Dnd5e => self.dnd5e.as_ref(),
            GameSystem::Pathfinder => self.pathfinder.as_ref(),
            GameSystem::Wod => self.wod.as_ref(),
            GameSystem::Custom => self.custom.as_ref(),
        }
    }

    fn degrade(
        system: GameSystem,
        category: &'static str,
        result: Result<Vec<ReferenceItem>, SourceError>,
    ) -> Vec<ReferenceItem> {
        match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    system = %system,
                    category,
                    error = %e,
                    "reference data source degraded, returning empty list"
                );
                Vec::new()
            }
        }
    }

    pub async fn races(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(system, "races", self.source_for(system).races().await)
    }

    pub async fn classes(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(system, "classes", self.source_for(system).classes().await)
    }

    pub async fn backgrounds(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(
            system,
            "backgrounds",
            self.source_for(system).backgrounds().await,
        )
    }

    pub async fn alignments(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(
            system,
            "alignments",
            self.source_for(system).alignments().await,
        )
    }

    pub async fn skills(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(system, "skills", self.source_for(system).skills().await)
    }

    pub async fn languages(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(
            system,
            "languages",
            self.source_for(system).languages().await,
        )
    }

    pub async fn proficiencies(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(
            system,
            "proficiencies",
            self.source_for(system).proficiencies().await,
        )
    }

    pub async fn spells(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(system, "spells", self.source_for(system).spells().await)
    }

    pub async fn items(&self, system: GameSystem) -> Vec<ReferenceItem> {
        Self::degrade(system, "items", self.source_for(system).items().await)
    }

    /// Fetch every category concurrently and assemble the full mapping.
    pub async fn all(&self, system: GameSystem) -> GameData {
        let (
            races,
            classes,
            backgrounds,
            alignments,
            skills,
            languages,
            proficiencies,
            spells,
            items,
        ) = tokio::join!(
            self.races(system),
            self.classes(system),
            self.backgrounds(system),
            self.alignments(system),
            self.skills(system),
            self.languages(system),
            self.proficiencies(system),
            self.spells(system),
            self.items(system),
        );

        GameData {
            races,
            classes,
            backgrounds,
            alignments,
            skills,
            languages,
            proficiencies,
            spells,
            items,
        }
    }
}
