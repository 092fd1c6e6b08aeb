use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("no se pudo leer el banco de preguntas: {0}")]
    Io(#[from] std::io::Error),
    #[error("banco de preguntas JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
    #[error("banco de preguntas YAML inválido: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("HTTP {status} al descargar {url}")]
    Http { status: u16, url: String },
    #[error("fetch del banco de preguntas falló: {0}")]
    Fetch(String),
    #[error("el cargador del banco de preguntas terminó sin respuesta")]
    LoaderGone,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for QuizError {
    fn from(e: reqwest::Error) -> Self {
        QuizError::Fetch(e.to_string())
    }
}
