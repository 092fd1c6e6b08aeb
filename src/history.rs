// src/history.rs
//
// Historial de resultados bajo una sola clave del almacenamiento de eframe
// (localStorage en web, fichero RON en nativo). El contenido es un array JSON,
// el más reciente primero, limitado a HISTORY_CAP entradas.

use crate::timer::format_mm_ss;
use chrono::{DateTime, Utc};
use eframe::Storage;
use serde::{Deserialize, Serialize};

pub const HISTORY_KEY: &str = "quizResults";
pub const HISTORY_CAP: usize = 50;

/// Resumen persistido de un intento terminado.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub subject: String,
    #[serde(rename = "correct", default)]
    pub correct_count: usize,
    #[serde(rename = "total", default)]
    pub total_count: usize,
    #[serde(rename = "accuracy", default)]
    pub accuracy_percent: u32,
    #[serde(default)]
    pub duration_sec: u32,
    #[serde(default)]
    pub time_limit_sec: u32,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page: String,
}

/// Parsea el blob guardado. Datos corruptos o que no son array cuentan como vacío;
/// las entradas ilegibles se descartan una a una.
pub fn parse_history(text: &str) -> Vec<ResultRecord> {
    match serde_json::from_str::<Vec<serde_json::Value>>(text) {
        Ok(values) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        Err(err) => {
            log::warn!("historial corrupto, se trata como vacío: {err}");
            Vec::new()
        }
    }
}

/// Registros en el orden en que están guardados.
fn read_stored(storage: &dyn Storage) -> Vec<ResultRecord> {
    storage
        .get_string(HISTORY_KEY)
        .map(|text| parse_history(&text))
        .unwrap_or_default()
}

fn write_stored(storage: &mut dyn Storage, records: &[ResultRecord]) {
    match serde_json::to_string(records) {
        Ok(json) => {
            storage.set_string(HISTORY_KEY, json);
            storage.flush();
        }
        Err(err) => log::error!("no se pudo serializar el historial: {err}"),
    }
}

/// Antepone el registro y recorta a las HISTORY_CAP más recientes.
pub fn append(storage: &mut dyn Storage, record: ResultRecord) {
    let mut records = read_stored(storage);
    records.insert(0, record);
    records.truncate(HISTORY_CAP);
    write_stored(storage, &records);
}

/// Todo el historial ordenado por fecha de fin, descendente.
pub fn list_all(storage: &dyn Storage) -> Vec<ResultRecord> {
    let mut records = read_stored(storage);
    // sort estable: sin fecha van al final
    records.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));
    records
}

/// Borra todo el historial. La confirmación la pide la UI.
pub fn clear(storage: &mut dyn Storage) {
    write_stored(storage, &[]);
    log::info!("historial borrado");
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryStats {
    pub runs: usize,
    pub mean_accuracy: f64,
    pub best_accuracy: u32,
    pub mean_duration_secs: u32,
}

impl HistoryStats {
    pub fn mean_accuracy_label(&self) -> String {
        format!("{:.1}%", self.mean_accuracy)
    }

    pub fn best_accuracy_label(&self) -> String {
        format!("{}%", self.best_accuracy)
    }

    pub fn mean_duration_label(&self) -> String {
        format_mm_ss(self.mean_duration_secs)
    }
}

pub fn aggregate(records: &[ResultRecord]) -> HistoryStats {
    let runs = records.len();
    if runs == 0 {
        return HistoryStats {
            runs: 0,
            mean_accuracy: 0.0,
            best_accuracy: 0,
            mean_duration_secs: 0,
        };
    }
    let sum_accuracy: u64 = records.iter().map(|r| u64::from(r.accuracy_percent)).sum();
    let sum_duration: u64 = records.iter().map(|r| u64::from(r.duration_sec)).sum();
    let best_accuracy = records.iter().map(|r| r.accuracy_percent).max().unwrap_or(0);
    let n = runs as u64;
    HistoryStats {
        runs,
        mean_accuracy: sum_accuracy as f64 / runs as f64,
        best_accuracy,
        mean_duration_secs: u32::try_from((2 * sum_duration + n) / (2 * n)).unwrap_or(u32::MAX),
    }
}
