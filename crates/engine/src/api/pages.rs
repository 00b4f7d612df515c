//! HTML pages.
//!
//! Pages are rendered with a per-request translation context: the language
//! comes from the query/cookie/Accept-Language chain and every visible
//! string goes through the catalog for the page's domain. The keys are the
//! Spanish display strings, so a missing catalog still renders a usable
//! page in the default locale.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::i18n::resolve_language;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    lang: Option<String>,
}

pub async fn home_page(
    State(app): State<Arc<App>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    render_page(&app, &query, &headers, "home", |t| {
        format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/create-character\">{}</a>",
            t("¡Hola Mundo!"),
            t("Bienvenido al Gestor de Personajes de Rol"),
            t("Crear Personaje"),
        )
    })
}

pub async fn create_character_page(
    State(app): State<Arc<App>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    render_page(&app, &query, &headers, "create-character", |t| {
        format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/\">{}</a>",
            t("Crear Personaje"),
            t("Elige un sistema de juego y configura tu personaje."),
            t("Volver al inicio"),
        )
    })
}

pub async fn not_found_page(
    State(app): State<Arc<App>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    render_page(&app, &query, &headers, "404", |t| {
        format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/\">{}</a>",
            t("Página no encontrada"),
            t("La página que buscas no existe."),
            t("Volver al inicio"),
        )
    })
}

fn render_page(
    app: &App,
    query: &PageQuery,
    headers: &HeaderMap,
    domain: &str,
    body: impl Fn(&dyn Fn(&str) -> String) -> String,
) -> Response {
    // Live catalog editing: recompile and swap on every page render.
    if app.settings.debug {
        app.translations.reload();
    }

    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let language = resolve_language(
        query.lang.as_deref(),
        cookie,
        accept,
        &app.settings.supported_languages,
        &app.settings.default_language,
    );

    let translate = |key: &str| app.translations.get(key, &language, domain);
    let html = page_shell(&app.settings.app_name, &language, &body(&translate));

    let mut response = Html(html).into_response();

    // Remember an explicitly chosen language for subsequent requests.
    if query.lang.as_deref() == Some(language.as_str()) {
        if let Ok(value) = HeaderValue::from_str(&format!("lang={language}; Path=/")) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

fn page_shell(title: &str, language: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{language}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
