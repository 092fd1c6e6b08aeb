// src/view_models.rs

use crate::history::ResultRecord;
use crate::run::Submission;
use crate::timer::format_mm_ss;
use chrono::{DateTime, Local, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub finished: String,
    pub level: String,
    pub subject: String,
    pub score: String,
    pub accuracy: String,
    pub duration: String,
    pub limit: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub correct: usize,
    pub total: usize,
    pub accuracy: String,
    pub duration: String,
}

fn or_dash(value: &str) -> String {
    if value.is_empty() { "-".to_string() } else { value.to_string() }
}

/// Fecha corta en hora local, estilo "5月1日 19:00".
pub fn format_finished(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.with_timezone(&Local).format("%-m月%-d日 %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl From<&ResultRecord> for HistoryRow {
    fn from(r: &ResultRecord) -> Self {
        Self {
            finished: format_finished(r.finished_at),
            level: or_dash(&r.level),
            subject: or_dash(&r.subject),
            score: format!("{} / {}", r.correct_count, r.total_count),
            accuracy: format!("{}%", r.accuracy_percent),
            duration: format_mm_ss(r.duration_sec),
            limit: format_mm_ss(r.time_limit_sec),
        }
    }
}

impl From<&Submission> for ResultSummary {
    fn from(s: &Submission) -> Self {
        Self {
            correct: s.report.correct,
            total: s.report.total,
            accuracy: format!("{}%", s.report.accuracy_percent),
            duration: format_mm_ss(s.duration_seconds),
        }
    }
}

pub fn history_subtitle(runs: usize) -> String {
    if runs > 0 {
        format!("{runs} 件のテストを完了")
    } else {
        "まだ結果がありません".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn history_row_formats_fields() {
        let record = ResultRecord {
            id: "x".into(),
            level: String::new(),
            subject: "文法".into(),
            correct_count: 3,
            total_count: 4,
            accuracy_percent: 75,
            duration_sec: 125,
            time_limit_sec: 3600,
            started_at: None,
            finished_at: None,
            page: String::new(),
        };
        let row = HistoryRow::from(&record);
        assert_eq!(
            row,
            HistoryRow {
                finished: "-".into(),
                level: "-".into(),
                subject: "文法".into(),
                score: "3 / 4".into(),
                accuracy: "75%".into(),
                duration: "02:05".into(),
                limit: "60:00".into(),
            }
        );
    }

    #[test]
    fn subtitle() {
        assert_eq!(history_subtitle(0), "まだ結果がありません");
        assert_eq!(history_subtitle(2), "2 件のテストを完了");
    }
}
