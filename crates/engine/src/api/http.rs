//! HTTP routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use rolechar_domain::{
    Character, CreateCharacterRequest, GameSystem, GameSystemInfo, ReferenceItem,
};

use crate::api::pages;
use crate::app::App;
use crate::use_cases::{CharacterError, GameData};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(pages::home_page))
        .route("/create-character", get(pages::create_character_page))
        .route("/404", get(pages::not_found_page))
        .route("/health", get(health))
        .route("/api/game-types", get(get_game_types))
        .route("/api/game-data", get(get_game_data))
        .route("/api/races", get(get_races))
        .route("/api/classes", get(get_classes))
        .route("/api/backgrounds", get(get_backgrounds))
        .route("/api/alignments", get(get_alignments))
        .route("/api/skills", get(get_skills))
        .route("/api/languages", get(get_languages))
        .route("/api/proficiencies", get(get_proficiencies))
        .route("/api/spells", get(get_spells))
        .route("/api/items", get(get_items))
        .route("/api/characters", get(list_characters).post(create_character))
}

/// Category lookups default to the custom system.
#[derive(Debug, Deserialize)]
struct GameTypeQuery {
    #[serde(default = "default_game_type")]
    game_type: String,
}

fn default_game_type() -> String {
    "custom".to_string()
}

impl GameTypeQuery {
    fn system(&self) -> GameSystem {
        GameSystem::parse(&self.game_type)
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Roleplaying Characters Manager is running"
    }))
}

async fn get_game_types() -> Json<Vec<GameSystemInfo>> {
    Json(GameSystem::all().iter().map(GameSystem::info).collect())
}

async fn get_game_data(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<GameData> {
    Json(app.use_cases.game_data.all(query.system()).await)
}

async fn get_races(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.races(query.system()).await)
}

async fn get_classes(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.classes(query.system()).await)
}

async fn get_backgrounds(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.backgrounds(query.system()).await)
}

async fn get_alignments(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.alignments(query.system()).await)
}

async fn get_skills(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.skills(query.system()).await)
}

async fn get_languages(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.languages(query.system()).await)
}

async fn get_proficiencies(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.proficiencies(query.system()).await)
}

async fn get_spells(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.spells(query.system()).await)
}

async fn get_items(
    State(app): State<Arc<App>>,
    Query(query): Query<GameTypeQuery>,
) -> Json<Vec<ReferenceItem>> {
    Json(app.use_cases.game_data.items(query.system()).await)
}

async fn create_character(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let character = app.use_cases.characters.create(request).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

async fn list_characters(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = app.use_cases.characters.list().await?;
    Ok(Json(characters))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<CharacterError> for ApiError {
    fn from(e: CharacterError) -> Self {
        match e {
            CharacterError::Domain(domain) => ApiError::BadRequest(domain.to_string()),
            CharacterError::Repo(repo) => ApiError::Internal(repo.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    use crate::infrastructure::config::Settings;

    fn test_app() -> (Arc<App>, TempDir) {
        // Translations point at an empty temp dir: lookups fall through to
        // the keys, which are the default-locale display strings.
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            translations_dir: dir.path().to_path_buf(),
            debug: false,
            ..Settings::default()
        };
        (Arc::new(App::new(settings)), dir)
    }

    fn router() -> (Router, TempDir) {
        let (app, dir) = test_app();
        (routes().with_state(app), dir)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_the_exact_liveness_body() {
        let (router, _dir) = router();
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["message"], "Roleplaying Characters Manager is running");
    }

    #[tokio::test]
    async fn game_types_lists_the_four_systems() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/game-types")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let ids: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["dnd5e", "pathfinder", "wod", "custom"]);
    }

    #[tokio::test]
    async fn unknown_game_type_serves_the_static_custom_races() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/races?game_type=unknown-system")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let names: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Human", "Elf", "Dwarf", "Halfling", "Gnome"]);
    }

    #[tokio::test]
    async fn game_type_defaults_to_custom() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/spells")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["source"], "custom");
    }

    #[tokio::test]
    async fn wod_races_come_from_the_static_clan_table() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/races?game_type=wod")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 7);
        assert_eq!(json[0]["name"], "Brujah");
        assert_eq!(json[0]["source"], "wod");
    }

    #[tokio::test]
    async fn game_data_returns_the_fixed_category_mapping() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/game-data?game_type=custom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 9);
        for key in [
            "races",
            "classes",
            "backgrounds",
            "alignments",
            "skills",
            "languages",
            "proficiencies",
            "spells",
            "items",
        ] {
            assert!(object[key].is_array(), "missing category {key}");
        }
    }

    #[tokio::test]
    async fn create_character_echoes_with_id_and_timestamps() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/characters")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"name": "Mira", "race_id": "elf", "level": 2}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["name"], "Mira");
        assert_eq!(json["race_id"], "elf");
        assert_eq!(json["level"], 2);
        assert!(json["id"].is_string());
        assert!(json["created_at"].is_string());
    }

    #[tokio::test]
    async fn create_character_rejects_empty_names() {
        let (router, _dir) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/characters")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn created_characters_show_up_in_the_listing() {
        let (app, _dir) = test_app();
        let router = routes().with_state(app);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/characters")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "Rogar"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/characters")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "Rogar");
    }
}
