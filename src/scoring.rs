// src/scoring.rs
//
// Funciones puras: datos de entrada -> datos de salida. La UI solo consume su resultado.

use crate::model::{option_label, QuestionOption};
use crate::sampling::PresentedQuestion;
use chrono::{DateTime, Utc};

pub const UNANSWERED_LABEL: &str = "未選択";

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionReview {
    pub number: usize,
    pub prompt: String,
    pub is_correct: bool,
    pub correct_label: String,
    pub user_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    pub accuracy_percent: u32,
    pub reviews: Vec<QuestionReview>,
}

/// round(100 * correct / total) en aritmética entera; 0 si no hay preguntas.
pub fn accuracy_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (200 * correct as u64 + total as u64) / (2 * total as u64);
    u32::try_from(pct).unwrap_or(100)
}

/// Compara la selección (índice original) con la respuesta de cada pregunta.
/// Sin respuesta o distinta: incorrecta. Sin puntuación parcial.
pub fn score(items: &[PresentedQuestion], selections: &[Option<usize>]) -> ScoreReport {
    let reviews: Vec<QuestionReview> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let q = &item.question;
            let selected = selections.get(i).copied().flatten();
            QuestionReview {
                number: i + 1,
                prompt: q.question.clone(),
                is_correct: selected == Some(q.answer),
                correct_label: option_label(q, q.answer).to_string(),
                user_label: match selected {
                    Some(idx) => option_label(q, idx).to_string(),
                    None => UNANSWERED_LABEL.to_string(),
                },
            }
        })
        .collect();

    let correct = reviews.iter().filter(|r| r.is_correct).count();
    let total = items.len();
    ScoreReport {
        correct,
        total,
        accuracy_percent: accuracy_percent(correct, total),
        reviews,
    }
}

/// Segundos transcurridos, truncados y limitados al tiempo máximo.
pub fn duration_seconds(started_at: DateTime<Utc>, finished_at: DateTime<Utc>, limit_seconds: u32) -> u32 {
    let elapsed = (finished_at - started_at).num_seconds().max(0);
    u32::try_from(elapsed).unwrap_or(u32::MAX).min(limit_seconds)
}

/// Estado visual de una opción en pantalla.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionView {
    pub original_index: usize,
    pub label: String,
    pub image: Option<String>,
    pub selected: bool,
    pub correct_answer: bool,
    pub wrong_selection: bool,
}

/// Opciones en orden de presentación. Con `revealed` se marca la correcta y,
/// si la elección del usuario falla, también esa; ambas pueden coexistir.
pub fn option_views(item: &PresentedQuestion, selection: Option<usize>, revealed: bool) -> Vec<OptionView> {
    let answer = item.question.answer;
    item.display_order
        .iter()
        .filter_map(|&original| {
            let option: &QuestionOption = item.question.options.get(original)?;
            let selected = selection == Some(original);
            Some(OptionView {
                original_index: original,
                label: option.label().to_string(),
                image: option.image().map(str::to_string),
                selected,
                correct_answer: revealed && original == answer,
                wrong_selection: revealed && selected && original != answer,
            })
        })
        .collect()
}
