use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Banco completo: asignatura -> preguntas en orden de autoría.
pub type QuestionPool = BTreeMap<String, Vec<Question>>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub enum Level {
    #[default]
    N3,
    N2,
}

impl Level {
    pub const ALL: [Level; 2] = [Level::N3, Level::N2];

    /// Nombre del fichero del banco de preguntas para este nivel.
    pub fn pool_asset(self) -> &'static str {
        match self {
            Level::N3 => "questions.json",
            Level::N2 => "n2questions.json",
        }
    }

    /// N3 fija la corrección al primer clic; N2 la revela al entregar.
    pub fn live_feedback(self) -> bool {
        matches!(self, Level::N3)
    }

    pub fn keeps_history(self) -> bool {
        matches!(self, Level::N3)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::N3 => "N3",
            Level::N2 => "N2",
        }
    }

    pub fn parse(value: &str) -> Option<Level> {
        match value.trim().to_ascii_uppercase().as_str() {
            "N3" => Some(Level::N3),
            "N2" => Some(Level::N2),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub question: String,
    pub options: Vec<QuestionOption>,
    /// Índice en la lista ORIGINAL de opciones (antes de barajar).
    pub answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.get(self.answer)
    }
}

/// Una opción puede ser texto plano o un objeto con texto y/o imagen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum QuestionOption {
    Text(String),
    Rich {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
}

pub const IMAGE_PLACEHOLDER: &str = "画像";
pub const EMPTY_PLACEHOLDER: &str = "---";

impl QuestionOption {
    /// Etiqueta legible; las opciones solo-imagen no fallan, muestran un marcador.
    pub fn label(&self) -> &str {
        match self {
            QuestionOption::Text(text) => text,
            QuestionOption::Rich { text: Some(text), .. } if !text.is_empty() => text,
            QuestionOption::Rich { image: Some(_), .. } => IMAGE_PLACEHOLDER,
            QuestionOption::Rich { .. } => EMPTY_PLACEHOLDER,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            QuestionOption::Rich { image, .. } => image.as_deref(),
            QuestionOption::Text(_) => None,
        }
    }
}

/// Etiqueta de la opción `idx` o el marcador si no existe.
pub fn option_label(question: &Question, idx: usize) -> &str {
    question
        .options
        .get(idx)
        .map(QuestionOption::label)
        .unwrap_or(EMPTY_PLACEHOLDER)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Home,
    Settings,
    Running,
    Submitted,
    History,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_accept_plain_text_and_objects() {
        let json = r#"[
            "あ",
            {"text": "い"},
            {"image": "img/u.png"},
            {}
        ]"#;
        let options: Vec<QuestionOption> = serde_json::from_str(json).expect("json ok");
        let labels: Vec<&str> = options.iter().map(QuestionOption::label).collect();
        assert_eq!(labels, vec!["あ", "い", IMAGE_PLACEHOLDER, EMPTY_PLACEHOLDER]);
        assert_eq!(options[2].image(), Some("img/u.png"));
    }

    #[test]
    fn level_variants() {
        assert!(Level::N3.live_feedback());
        assert!(Level::N3.keeps_history());
        assert!(!Level::N2.live_feedback());
        assert!(!Level::N2.keeps_history());
        assert_eq!(Level::parse(" n2 "), Some(Level::N2));
        assert_eq!(Level::parse("N5"), None);
    }

    #[test]
    fn option_label_out_of_range_is_placeholder() {
        let q = Question {
            question: "Q".into(),
            options: vec![QuestionOption::Text("a".into())],
            answer: 0,
            image: None,
        };
        assert_eq!(option_label(&q, 0), "a");
        assert_eq!(option_label(&q, 3), EMPTY_PLACEHOLDER);
    }
}
