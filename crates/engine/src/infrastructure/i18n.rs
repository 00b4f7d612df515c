//! Translation catalog service.
//!
//! Human-edited catalog sources live at `translations/<lang>/<domain>.json`
//! as a `{"messages": {key: translation}}` envelope. At load time each
//! source is compiled into a flat lookup file at
//! `translations/<lang>/LC_MESSAGES/<domain>.bin`, recompiling only when
//! the source is newer than the compiled file. The loaded tables form an
//! immutable snapshot behind an `Arc`; `reload()` rebuilds the snapshot
//! and swaps it wholesale, so a reload racing a lookup sees a stale but
//! consistent snapshot, never a torn one.
//!
//! Lookup falls back twice: an unsupported language resolves to the
//! configured default language, and a domain with no catalog resolves to
//! the `home` domain. A key with no translation anywhere is returned
//! unchanged (keys double as default-locale display text).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use thiserror::Error;

/// Domain tried when the requested domain has no catalog.
pub const FALLBACK_DOMAIN: &str = "home";

const SOURCE_EXT: &str = "json";
const COMPILED_DIR: &str = "LC_MESSAGES";
const COMPILED_EXT: &str = "bin";

/// Errors from catalog discovery, compilation, and loading.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Envelope of a human-edited catalog source file.
#[derive(Debug, Deserialize)]
struct CatalogSource {
    #[serde(default)]
    messages: HashMap<String, String>,
}

/// Compiled lookup table for one (language, domain) pair.
///
/// An empty catalog acts as a null translator: every key falls through
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }
}

/// language -> domain -> catalog.
type TranslationTables = HashMap<String, HashMap<String, Catalog>>;

/// Owns the loaded translation tables and resolves lookups.
///
/// Injected into request handlers through the `App`; never global state.
pub struct TranslationService {
    translations_dir: PathBuf,
    supported_languages: Vec<String>,
    default_language: String,
    tables: RwLock<Arc<TranslationTables>>,
}

impl TranslationService {
    /// Create the service and perform the initial discovery/compile/load.
    pub fn new(
        translations_dir: PathBuf,
        supported_languages: Vec<String>,
        default_language: String,
    ) -> Self {
        let service = Self {
            translations_dir,
            supported_languages,
            default_language,
            tables: RwLock::new(Arc::new(TranslationTables::new())),
        };
        service.reload();
        service
    }

    /// Re-run discovery/compilation and swap in a fresh snapshot.
    ///
    /// Idempotent; safe to call on every request while editing catalogs.
    pub fn reload(&self) {
        let tables = Arc::new(self.load_tables());
        *self.tables.write().expect("translation lock poisoned") = tables;
    }

    fn snapshot(&self) -> Arc<TranslationTables> {
        self.tables.read().expect("translation lock poisoned").clone()
    }

    /// Resolve `key` for a language and domain.
    ///
    /// Falls back language -> default language, domain -> `home`, and
    /// retries `home` when the domain lookup left the key untranslated.
    /// Never fails; the worst case returns the key unchanged.
    pub fn get(&self, key: &str, language: &str, domain: &str) -> String {
        let tables = self.snapshot();

        let domains = match tables.get(language) {
            Some(domains) => domains,
            None => match tables.get(&self.default_language) {
                Some(domains) => domains,
                None => return key.to_string(),
            },
        };

        let (resolved_domain, catalog) = match domains.get(domain) {
            Some(catalog) => (domain, catalog),
            None => match domains.get(FALLBACK_DOMAIN) {
                Some(catalog) => (FALLBACK_DOMAIN, catalog),
                None => return key.to_string(),
            },
        };

        let translated = catalog.lookup(key);
        if translated == key && resolved_domain != FALLBACK_DOMAIN {
            if let Some(home) = domains.get(FALLBACK_DOMAIN) {
                let retry = home.lookup(key);
                if retry != key {
                    return retry.to_string();
                }
            }
        }

        translated.to_string()
    }

    /// Languages with at least one loaded catalog.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.snapshot().keys().cloned().collect();
        languages.sort_unstable();
        languages
    }

    /// All domains loaded for any language, deduplicated.
    pub fn available_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self
            .snapshot()
            .values()
            .flat_map(|by_domain| by_domain.keys().cloned())
            .collect();
        domains.sort_unstable();
        domains.dedup();
        domains
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Discover sources, compile stale catalogs, and load every table.
    fn load_tables(&self) -> TranslationTables {
        let mut tables = TranslationTables::new();

        for (language, source_files) in discover_sources(&self.translations_dir, &self.supported_languages) {
            let domains = tables.entry(language.clone()).or_default();

            for source in source_files {
                let Some(domain) = source.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let compiled = compiled_path_for_source(&source);

                if needs_recompile(&source, &compiled) {
                    match compile_catalog(&source, &compiled) {
                        Ok(()) => {
                            tracing::debug!(language = %language, domain, "compiled translation catalog");
                        }
                        Err(e) => {
                            tracing::warn!(
                                language = %language,
                                domain,
                                error = %e,
                                "catalog compile failed, empty fallback written"
                            );
                        }
                    }
                }

                let catalog = match load_catalog(&compiled) {
                    Ok(catalog) => catalog,
                    Err(e) => {
                        tracing::warn!(
                            language = %language,
                            domain,
                            error = %e,
                            "compiled catalog unreadable, installing null translator"
                        );
                        Catalog::default()
                    }
                };
                domains.insert(domain.to_string(), catalog);
            }
        }

        tables
    }
}

/// Find catalog sources per supported language: `<dir>/<lang>/*.json`.
fn discover_sources(dir: &Path, supported: &[String]) -> HashMap<String, Vec<PathBuf>> {
    let mut by_language = HashMap::new();

    let Ok(entries) = fs::read_dir(dir) else {
        return by_language;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_dir() || !supported.iter().any(|lang| lang == name) {
            continue;
        }

        let Ok(files) = fs::read_dir(&path) else {
            continue;
        };
        let mut sources: Vec<PathBuf> = files
            .flatten()
            .map(|f| f.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == SOURCE_EXT))
            .collect();
        sources.sort();

        if !sources.is_empty() {
            by_language.insert(name.to_string(), sources);
        }
    }

    by_language
}

/// Compiled counterpart of a source file:
/// `<lang>/<domain>.json` -> `<lang>/LC_MESSAGES/<domain>.bin`.
fn compiled_path_for_source(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    let mut compiled = source.parent().unwrap_or_else(|| Path::new("")).join(COMPILED_DIR);
    compiled.push(stem);
    compiled.set_extension(COMPILED_EXT);
    compiled
}

/// Whether the compiled catalog is missing or older than its source.
/// Equal modification times count as up to date.
fn needs_recompile(source: &Path, compiled: &Path) -> bool {
    let Ok(compiled_meta) = fs::metadata(compiled) else {
        return true;
    };
    let (Ok(source_mtime), Ok(compiled_mtime)) =
        (fs::metadata(source).and_then(|m| m.modified()), compiled_meta.modified())
    else {
        return true;
    };
    source_mtime > compiled_mtime
}

/// Compile one source catalog into its flat compiled form.
///
/// On read/parse failure an empty compiled catalog is written so later
/// loads degrade to a null translator, and the failure is reported to the
/// caller instead of raised.
fn compile_catalog(source: &Path, compiled: &Path) -> Result<(), I18nError> {
    if let Some(parent) = compiled.parent() {
        fs::create_dir_all(parent).map_err(|e| I18nError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let parsed = fs::read(source)
        .map_err(|e| I18nError::Read {
            path: source.to_path_buf(),
            source: e,
        })
        .and_then(|bytes| {
            serde_json::from_slice::<CatalogSource>(&bytes).map_err(|e| I18nError::Parse {
                path: source.to_path_buf(),
                source: e,
            })
        });

    match parsed {
        Ok(catalog) => {
            write_compiled(compiled, &catalog.messages)?;
            Ok(())
        }
        Err(e) => {
            write_compiled(compiled, &HashMap::new())?;
            Err(e)
        }
    }
}

fn write_compiled(compiled: &Path, messages: &HashMap<String, String>) -> Result<(), I18nError> {
    let bytes = serde_json::to_vec(messages).map_err(|e| I18nError::Parse {
        path: compiled.to_path_buf(),
        source: e,
    })?;
    fs::write(compiled, bytes).map_err(|e| I18nError::Write {
        path: compiled.to_path_buf(),
        source: e,
    })
}

fn load_catalog(compiled: &Path) -> Result<Catalog, I18nError> {
    let bytes = fs::read(compiled).map_err(|e| I18nError::Read {
        path: compiled.to_path_buf(),
        source: e,
    })?;
    let messages: HashMap<String, String> =
        serde_json::from_slice(&bytes).map_err(|e| I18nError::Parse {
            path: compiled.to_path_buf(),
            source: e,
        })?;
    Ok(Catalog { messages })
}

/// Pick the response language for a request.
///
/// Priority: explicit `lang` query parameter, then the `lang` cookie,
/// then the first supported code in `Accept-Language`, then the default.
pub fn resolve_language(
    query_lang: Option<&str>,
    cookie_header: Option<&str>,
    accept_language: Option<&str>,
    supported: &[String],
    default: &str,
) -> String {
    let is_supported = |code: &str| supported.iter().any(|lang| lang == code);

    if let Some(lang) = query_lang {
        if is_supported(lang) {
            return lang.to_string();
        }
    }

    if let Some(cookies) = cookie_header {
        if let Some(lang) = cookie_value(cookies, "lang") {
            if is_supported(lang) {
                return lang.to_string();
            }
        }
    }

    if let Some(header) = accept_language {
        for entry in header.split(',') {
            let token = entry.split(';').next().unwrap_or("").trim();
            let primary: String = token.chars().take(2).collect();
            if is_supported(&primary) {
                return primary;
            }
        }
    }

    default.to_string()
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn supported() -> Vec<String> {
        vec!["es".to_string(), "en".to_string()]
    }

    fn write_source(dir: &Path, lang: &str, domain: &str, body: &str) -> PathBuf {
        let lang_dir = dir.join(lang);
        fs::create_dir_all(&lang_dir).unwrap();
        let path = lang_dir.join(format!("{domain}.{SOURCE_EXT}"));
        fs::write(&path, body).unwrap();
        path
    }

    fn service(dir: &TempDir) -> TranslationService {
        TranslationService::new(dir.path().to_path_buf(), supported(), "es".to_string())
    }

    #[test]
    fn compiles_and_translates() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {"Hola": "Hello"}}"#);

        let service = service(&dir);

        assert_eq!(service.get("Hola", "en", "home"), "Hello");
        assert!(dir.path().join("en/LC_MESSAGES/home.bin").exists());
    }

    #[test]
    fn untranslated_key_is_returned_unchanged() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {}}"#);

        let service = service(&dir);
        assert_eq!(service.get("Sin traducir", "en", "home"), "Sin traducir");
    }

    #[test]
    fn unsupported_language_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "es", "home", r#"{"messages": {"Hola": "Hola"}}"#);

        let service = service(&dir);
        assert_eq!(service.get("Hola", "fr", "home"), "Hola");
    }

    #[test]
    fn missing_language_and_default_returns_key() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert_eq!(service.get("Hola", "fr", "home"), "Hola");
    }

    #[test]
    fn missing_domain_falls_back_to_home() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {"Hola": "Hello"}}"#);

        let service = service(&dir);
        assert_eq!(service.get("Hola", "en", "no-such-domain"), "Hello");
        // Matches an explicit home lookup, per the domain-fallback contract.
        assert_eq!(
            service.get("Hola", "en", "no-such-domain"),
            service.get("Hola", "en", FALLBACK_DOMAIN)
        );
    }

    #[test]
    fn untranslated_key_in_domain_retries_home() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {"Hola": "Hello"}}"#);
        write_source(dir.path(), "en", "404", r#"{"messages": {"Atrás": "Back"}}"#);

        let service = service(&dir);
        // "Hola" is not in the 404 catalog but is in home.
        assert_eq!(service.get("Hola", "en", "404"), "Hello");
        // Keys translated by the domain itself are not overridden.
        assert_eq!(service.get("Atrás", "en", "404"), "Back");
    }

    #[test]
    fn reload_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {"Hola": "Hello"}}"#);

        let service = service(&dir);
        let before = service.get("Hola", "en", "home");
        service.reload();
        service.reload();
        assert_eq!(service.get("Hola", "en", "home"), before);
    }

    #[test]
    fn reload_picks_up_changed_source() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "en", "home", r#"{"messages": {"Hola": "Hello"}}"#);

        let service = service(&dir);
        assert_eq!(service.get("Hola", "en", "home"), "Hello");

        // Rewriting the source bumps its mtime past the compiled file.
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&source, r#"{"messages": {"Hola": "Hi"}}"#).unwrap();
        service.reload();
        assert_eq!(service.get("Hola", "en", "home"), "Hi");
    }

    #[test]
    fn malformed_source_installs_null_translator() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", "{ not json");

        let service = service(&dir);

        // The empty fallback was written and lookups degrade to the key.
        assert!(dir.path().join("en/LC_MESSAGES/home.bin").exists());
        assert_eq!(service.get("Hola", "en", "home"), "Hola");
    }

    #[test]
    fn compile_reports_failure_for_malformed_source() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "en", "home", "not json at all");
        let compiled = compiled_path_for_source(&source);

        assert!(compile_catalog(&source, &compiled).is_err());
        assert!(compiled.exists());
    }

    #[test]
    fn unsupported_language_directories_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {}}"#);
        write_source(dir.path(), "de", "home", r#"{"messages": {"Hola": "Hallo"}}"#);

        let service = service(&dir);
        assert_eq!(service.languages(), vec!["en"]);
    }

    #[test]
    fn needs_recompile_when_compiled_missing() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "en", "home", r#"{"messages": {}}"#);
        let compiled = compiled_path_for_source(&source);

        assert!(needs_recompile(&source, &compiled));
        compile_catalog(&source, &compiled).unwrap();
        assert!(!needs_recompile(&source, &compiled));
    }

    #[test]
    fn needs_recompile_when_source_is_newer() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "en", "home", r#"{"messages": {}}"#);
        let compiled = compiled_path_for_source(&source);
        compile_catalog(&source, &compiled).unwrap();

        // Sources rewritten after compilation carry a newer mtime.
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&source, r#"{"messages": {"a": "b"}}"#).unwrap();
        assert!(needs_recompile(&source, &compiled));
    }

    #[test]
    fn available_domains_deduplicates_across_languages() {
        let dir = TempDir::new().unwrap();
        write_source(dir.path(), "en", "home", r#"{"messages": {}}"#);
        write_source(dir.path(), "es", "home", r#"{"messages": {}}"#);
        write_source(dir.path(), "es", "404", r#"{"messages": {}}"#);

        let service = service(&dir);
        assert_eq!(service.available_domains(), vec!["404", "home"]);
    }

    #[test]
    fn resolve_language_prefers_query_param() {
        assert_eq!(
            resolve_language(Some("en"), None, None, &supported(), "es"),
            "en"
        );
    }

    #[test]
    fn resolve_language_cookie_beats_header() {
        assert_eq!(
            resolve_language(
                None,
                Some("lang=es"),
                Some("fr-FR,en;q=0.8"),
                &supported(),
                "es"
            ),
            "es"
        );
    }

    #[test]
    fn resolve_language_scans_accept_language_in_order() {
        assert_eq!(
            resolve_language(None, None, Some("fr-FR,en;q=0.8"), &supported(), "es"),
            "en"
        );
        assert_eq!(
            resolve_language(None, None, Some("en-US,es;q=0.9"), &supported(), "es"),
            "en"
        );
    }

    #[test]
    fn resolve_language_ignores_unsupported_values() {
        assert_eq!(
            resolve_language(Some("de"), Some("lang=fr"), Some("it-IT"), &supported(), "es"),
            "es"
        );
    }

    #[test]
    fn cookie_value_parses_multiple_pairs() {
        assert_eq!(cookie_value("a=1; lang=en; b=2", "lang"), Some("en"));
        assert_eq!(cookie_value("a=1", "lang"), None);
    }
}
