// src/config.rs
//
// Nativo: variables de entorno. Web: query string (?level=N2&subject=語彙&pool=...).

use crate::data::PoolSource;
use crate::model::Level;

pub const DEFAULT_SUBJECT: &str = "文法";

pub const ENV_LEVEL: &str = "JLPT_SPRINT_LEVEL";
pub const ENV_SUBJECT: &str = "JLPT_SPRINT_SUBJECT";
pub const ENV_POOL: &str = "JLPT_SPRINT_POOL";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub level: Level,
    pub subject: String,
    /// None = fuente por defecto del nivel.
    pub pool_source: Option<PoolSource>,
    /// Página de origen que se guarda en cada resultado.
    pub page: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            subject: DEFAULT_SUBJECT.to_string(),
            pool_source: None,
            page: default_page().to_string(),
        }
    }
}

fn default_page() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "index.html"
    } else {
        "native"
    }
}

impl AppConfig {
    /// Construye la configuración a partir de pares clave/valor ya decodificados.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let mut config = AppConfig::default();
        for (key, value) in pairs {
            match key {
                "level" | ENV_LEVEL => match Level::parse(&value) {
                    Some(level) => config.level = level,
                    None => log::warn!("nivel desconocido {value:?}, se usa {}", config.level),
                },
                "subject" | ENV_SUBJECT if !value.trim().is_empty() => {
                    config.subject = value.trim().to_string();
                }
                "pool" | ENV_POOL => config.pool_source = PoolSource::from_setting(&value),
                _ => {}
            }
        }
        config
    }

    /// Parsea una query string (con o sin '?'), decodificando los valores.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query.split('&').filter(|p| !p.is_empty()).map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.replace('+', " ");
            let decoded = match urlencoding::decode(&value) {
                Ok(v) => v.into_owned(),
                Err(_) => value.clone(),
            };
            (key, decoded)
        });
        Self::from_pairs(pairs)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let pairs = [ENV_LEVEL, ENV_SUBJECT, ENV_POOL]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key, v)));
        Self::from_pairs(pairs)
    }

    /// Lee `location.search` y el último segmento de `location.pathname`.
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return AppConfig::default();
        };
        let mut config = location
            .search()
            .map(|search| Self::from_query(&search))
            .unwrap_or_default();
        if let Some(page) = location
            .pathname()
            .ok()
            .and_then(|path| path.rsplit('/').next().map(str::to_string))
            .filter(|page| !page.is_empty())
        {
            config.page = page;
        }
        config
    }

    pub fn pool_source(&self) -> PoolSource {
        self.pool_source
            .clone()
            .unwrap_or_else(|| PoolSource::default_for(self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = AppConfig::from_query("");
        assert_eq!(config.level, Level::N3);
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert_eq!(config.pool_source, None);
    }

    #[test]
    fn query_is_percent_decoded() {
        let config = AppConfig::from_query("?subject=%E8%AA%9E%E5%BD%99&level=n2");
        assert_eq!(config.subject, "語彙");
        assert_eq!(config.level, Level::N2);
    }

    #[test]
    fn unknown_level_and_blank_subject_keep_defaults() {
        let config = AppConfig::from_query("level=N9&subject=&foo=bar");
        assert_eq!(config.level, Level::N3);
        assert_eq!(config.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn env_style_keys() {
        let config = AppConfig::from_pairs([
            (ENV_LEVEL, "N2".to_string()),
            (ENV_SUBJECT, "漢字".to_string()),
        ]);
        assert_eq!(config.level, Level::N2);
        assert_eq!(config.subject, "漢字");
    }
}
