// src/data.rs

use crate::error::QuizError;
use crate::model::{Level, QuestionPool};
use std::path::{Path, PathBuf};

/// De dónde sale el banco de preguntas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolSource {
    /// JSON embebido en el binario (por defecto en nativo).
    Embedded,
    File(PathBuf),
    Url(String),
}

impl PoolSource {
    /// Interpreta un valor de configuración: http(s) es URL, el resto ruta local.
    pub fn from_setting(value: &str) -> Option<PoolSource> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if value.starts_with("http://") || value.starts_with("https://") || cfg!(target_arch = "wasm32") {
            Some(PoolSource::Url(value.to_string()))
        } else {
            Some(PoolSource::File(PathBuf::from(value)))
        }
    }

    /// Fuente por defecto para un nivel en la plataforma actual.
    pub fn default_for(level: Level) -> PoolSource {
        if cfg!(target_arch = "wasm32") {
            PoolSource::Url(format!("./json/{}", level.pool_asset()))
        } else {
            PoolSource::Embedded
        }
    }
}

pub fn embedded_pool_text(level: Level) -> &'static str {
    match level {
        Level::N3 => include_str!("data/questions.json"),
        Level::N2 => include_str!("data/n2questions.json"),
    }
}

/// Parsea un banco JSON; si `yaml` es true, lo trata como YAML.
pub fn parse_pool(text: &str, yaml: bool) -> Result<QuestionPool, QuizError> {
    let pool = if yaml {
        serde_yaml::from_str(text)?
    } else {
        serde_json::from_str(text)?
    };
    Ok(pool)
}

fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn is_yaml_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.ends_with(".yaml") || path.ends_with(".yml")
}

/// Carga síncrona (nativo). Se llama desde un hilo aparte cuando la fuente es remota.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_pool_blocking(source: &PoolSource, level: Level) -> Result<QuestionPool, QuizError> {
    match source {
        PoolSource::Embedded => parse_pool(embedded_pool_text(level), false),
        PoolSource::File(path) => {
            let text = std::fs::read_to_string(path)?;
            parse_pool(&text, is_yaml_path(path))
        }
        PoolSource::Url(url) => {
            let resp = reqwest::blocking::Client::new()
                .get(url)
                .header(reqwest::header::USER_AGENT, "JlptSprint/0.1")
                .send()?;
            let status = resp.status();
            if !status.is_success() {
                return Err(QuizError::Http {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }
            let text = resp.text()?;
            parse_pool(&text, is_yaml_url(url))
        }
    }
}

/// Carga asíncrona en el navegador vía `fetch`.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_pool(source: PoolSource, level: Level) -> Result<QuestionPool, QuizError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let url = match source {
        PoolSource::Embedded => return parse_pool(embedded_pool_text(level), false),
        PoolSource::File(path) => path.to_string_lossy().into_owned(),
        PoolSource::Url(url) => url,
    };

    let window = web_sys::window().ok_or_else(|| QuizError::Fetch("no existe window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|err| QuizError::Fetch(format!("{err:?}")))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| QuizError::Fetch(format!("{err:?}")))?;
    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| QuizError::Fetch("la respuesta no es un Response válido".into()))?;

    if !response.ok() {
        return Err(QuizError::Http {
            status: response.status(),
            url,
        });
    }

    let text_promise = response
        .text()
        .map_err(|err| QuizError::Fetch(format!("{err:?}")))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|err| QuizError::Fetch(format!("{err:?}")))?
        .as_string()
        .ok_or_else(|| QuizError::Fetch("response.text() no devolvió string".into()))?;

    parse_pool(&text, is_yaml_url(&url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionOption;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_pools_parse_and_answers_are_in_range() {
        for level in Level::ALL {
            let pool = parse_pool(embedded_pool_text(level), false).expect("embedded pool ok");
            assert!(!pool.is_empty(), "{level} vacío");
            for (subject, questions) in &pool {
                for q in questions {
                    assert!(
                        q.answer < q.options.len(),
                        "{level}/{subject}: respuesta fuera de rango en {:?}",
                        q.question
                    );
                }
            }
        }
    }

    #[test]
    fn yaml_pool_parses_same_shape() {
        let yaml = "文法:\n  - question: Q1\n    options: [a, b, c]\n    answer: 1\n";
        let pool = parse_pool(yaml, true).expect("yaml ok");
        let q = &pool["文法"][0];
        assert_eq!(q.answer, 1);
        assert_eq!(q.options[1], QuestionOption::Text("b".into()));
    }

    #[test]
    fn broken_pool_is_an_error() {
        assert!(matches!(parse_pool("{not json", false), Err(QuizError::Json(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_file_is_io_error() {
        let source = PoolSource::File(PathBuf::from("/nonexistent/jlpt/pool.json"));
        assert!(matches!(load_pool_blocking(&source, Level::N3), Err(QuizError::Io(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn source_from_setting() {
        assert_eq!(PoolSource::from_setting("  "), None);
        assert_eq!(
            PoolSource::from_setting("https://example.com/q.json"),
            Some(PoolSource::Url("https://example.com/q.json".into()))
        );
        assert_eq!(
            PoolSource::from_setting("pool.yaml"),
            Some(PoolSource::File(PathBuf::from("pool.yaml")))
        );
        assert!(is_yaml_url("https://example.com/q.yml?v=2"));
    }
}
