//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::config::Settings;
use crate::infrastructure::i18n::TranslationService;
use crate::infrastructure::sources::{CustomSource, Dnd5eClient, PathfinderClient, WodSource};
use crate::stores::MemoryCharacterRepo;
use crate::use_cases::{CharacterUseCases, GameDataService};

/// Main application state.
///
/// Holds the settings, use cases, and the translation service.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub settings: Settings,
    pub use_cases: UseCases,
    pub translations: Arc<TranslationService>,
}

/// Container for all use cases.
pub struct UseCases {
    pub game_data: GameDataService,
    pub characters: CharacterUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(settings: Settings) -> Self {
        let timeout = Duration::from_secs(settings.request_timeout_secs);

        let game_data = GameDataService::new(
            Arc::new(Dnd5eClient::new(&settings.dnd5e_base_url, timeout)),
            Arc::new(PathfinderClient::new(&settings.pathfinder_base_url, timeout)),
            Arc::new(WodSource),
            Arc::new(CustomSource),
        );

        let translations = Arc::new(TranslationService::new(
            settings.translations_dir.clone(),
            settings.supported_languages.clone(),
            settings.default_language.clone(),
        ));

        let characters = CharacterUseCases::new(Arc::new(MemoryCharacterRepo::new()));

        Self {
            settings,
            use_cases: UseCases {
                game_data,
                characters,
            },
            translations,
        }
    }
}
