// src/run.rs
//
// Ciclo de vida de un intento: Idle -> Running -> Submitted.
// Todo el estado mutable (banco en caché, intento activo, cuenta atrás) vive aquí.

use crate::error::QuizError;
use crate::history::ResultRecord;
use crate::model::{Level, QuestionPool};
use crate::sampling::{sample_questions, PresentedQuestion};
use crate::scoring::{duration_seconds, score, ScoreReport};
use crate::timer::{Countdown, Tick};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DEFAULT_QUESTION_COUNT: usize = 20;
pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 60;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSettings {
    pub question_count: usize,
    pub time_limit_minutes: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            time_limit_minutes: DEFAULT_TIME_LIMIT_MINUTES,
        }
    }
}

impl RunSettings {
    /// Entradas del formulario; vacías, no numéricas o <= 0 usan el valor por defecto.
    pub fn from_inputs(count: &str, minutes: &str) -> Self {
        Self {
            question_count: positive_prefix(count)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(DEFAULT_QUESTION_COUNT),
            time_limit_minutes: positive_prefix(minutes)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(DEFAULT_TIME_LIMIT_MINUTES),
        }
    }

    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_minutes.saturating_mul(60)
    }
}

/// Entero al principio del texto ("12abc" -> 12), solo si es positivo.
fn positive_prefix(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().ok().filter(|n| *n > 0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Submitted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartRequest {
    Started,
    /// Hay que cargar el banco; el intento arranca en `pool_loaded`.
    NeedsPool,
    /// Ya hay una carga en curso.
    Ignored,
    /// Reintento sin banco cargado: se vuelve al formulario.
    ShowSettings,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveTally {
    pub correct: usize,
    pub incorrect: usize,
}

impl LiveTally {
    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.correct + self.incorrect)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub level: Level,
    pub subject: String,
    pub items: Vec<PresentedQuestion>,
    /// Índice ORIGINAL elegido por pregunta; None = sin responder.
    pub selections: Vec<Option<usize>>,
    /// Corrección fijada al primer clic (solo niveles con feedback inmediato).
    pub statuses: Vec<Option<bool>>,
    pub time_limit_seconds: u32,
    pub started_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub report: ScoreReport,
    pub duration_seconds: u32,
    pub finished_at: DateTime<Utc>,
    /// Solo en niveles con historial y con al menos una pregunta.
    pub record: Option<ResultRecord>,
}

pub struct RunController {
    level: Level,
    subject: String,
    page: String,
    settings: RunSettings,
    pool: Option<QuestionPool>,
    loading: bool,
    load_error: Option<String>,
    phase: RunPhase,
    attempt: Option<Attempt>,
    countdown: Option<Countdown>,
    tally: LiveTally,
    outcome: Option<Submission>,
    rng: StdRng,
}

impl RunController {
    pub fn new(level: Level, subject: impl Into<String>, page: impl Into<String>) -> Self {
        Self::with_rng(level, subject, page, StdRng::from_entropy())
    }

    pub fn with_rng(level: Level, subject: impl Into<String>, page: impl Into<String>, rng: StdRng) -> Self {
        Self {
            level,
            subject: subject.into(),
            page: page.into(),
            settings: RunSettings::default(),
            pool: None,
            loading: false,
            load_error: None,
            phase: RunPhase::Idle,
            attempt: None,
            countdown: None,
            tally: LiveTally::default(),
            outcome: None,
            rng,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn settings(&self) -> RunSettings {
        self.settings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn has_pool(&self) -> bool {
        self.pool.is_some()
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn tally(&self) -> LiveTally {
        self.tally
    }

    pub fn outcome(&self) -> Option<&Submission> {
        self.outcome.as_ref()
    }

    /// Asignaturas del banco cargado (vacío si aún no se ha cargado).
    pub fn subjects(&self) -> Vec<String> {
        self.pool
            .as_ref()
            .map(|pool| pool.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Cambia de asignatura; no durante un intento en curso.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        if self.phase != RunPhase::Running {
            self.subject = subject.into();
        }
    }

    pub fn countdown_display(&self) -> String {
        self.countdown
            .as_ref()
            .map(Countdown::display)
            .unwrap_or_else(|| crate::timer::format_mm_ss(self.settings.time_limit_seconds()))
    }

    /// Idle/Submitted -> Running. Guarda los ajustes como "últimos usados".
    pub fn request_start(&mut self, settings: RunSettings, now: DateTime<Utc>) -> StartRequest {
        if self.loading {
            log::debug!("inicio ignorado: carga del banco en curso");
            return StartRequest::Ignored;
        }
        self.settings = settings;
        if self.pool.is_some() {
            self.begin(now);
            StartRequest::Started
        } else {
            self.loading = true;
            self.load_error = None;
            StartRequest::NeedsPool
        }
    }

    /// Completa un inicio pendiente. Si la carga falla el intento no arranca.
    pub fn pool_loaded(&mut self, result: Result<QuestionPool, QuizError>, now: DateTime<Utc>) -> Result<(), QuizError> {
        self.loading = false;
        match result {
            Ok(pool) => {
                log::info!("banco {} cargado: {} asignaturas", self.level, pool.len());
                self.pool = Some(pool);
                self.load_error = None;
                self.begin(now);
                Ok(())
            }
            Err(err) => {
                log::error!("no se pudo cargar el banco {}: {err}", self.level);
                self.load_error = Some(err.to_string());
                self.phase = RunPhase::Idle;
                Err(err)
            }
        }
    }

    fn begin(&mut self, now: DateTime<Utc>) {
        // nunca dos cuentas atrás a la vez
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.stop();
        }

        let pool = self
            .pool
            .as_ref()
            .and_then(|pool| pool.get(&self.subject))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if pool.is_empty() {
            log::warn!("la asignatura {:?} no tiene preguntas en {}", self.subject, self.level);
        }
        let items = sample_questions(pool, self.settings.question_count, &mut self.rng);
        let n = items.len();
        let limit = self.settings.time_limit_seconds();

        log::info!(
            "nuevo intento {} / {}: {n} preguntas, {} min",
            self.level,
            self.subject,
            self.settings.time_limit_minutes
        );

        self.attempt = Some(Attempt {
            level: self.level,
            subject: self.subject.clone(),
            items,
            selections: vec![None; n],
            statuses: vec![None; n],
            time_limit_seconds: limit,
            started_at: now,
        });
        self.countdown = Some(Countdown::new(limit));
        self.tally = LiveTally::default();
        self.outcome = None;
        self.phase = RunPhase::Running;
    }

    /// Registra la elección (índice original). Devuelve false si se ignora.
    pub fn select(&mut self, question: usize, original: usize) -> bool {
        if self.phase != RunPhase::Running {
            return false;
        }
        let Some(attempt) = self.attempt.as_mut() else {
            return false;
        };
        let Some((option_count, answer)) = attempt
            .items
            .get(question)
            .map(|item| (item.question.options.len(), item.question.answer))
        else {
            return false;
        };
        if original >= option_count {
            return false;
        }

        if self.level.live_feedback() {
            // la primera elección queda fijada
            if attempt.statuses[question].is_some() {
                return false;
            }
            let correct = original == answer;
            attempt.statuses[question] = Some(correct);
            if correct {
                self.tally.correct += 1;
            } else {
                self.tally.incorrect += 1;
            }
        }
        attempt.selections[question] = Some(original);
        true
    }

    /// ¿Se muestra ya la corrección de esta pregunta?
    pub fn is_revealed(&self, question: usize) -> bool {
        match self.phase {
            RunPhase::Submitted => true,
            RunPhase::Running => self
                .attempt
                .as_ref()
                .and_then(|a| a.statuses.get(question).copied().flatten())
                .is_some(),
            RunPhase::Idle => false,
        }
    }

    /// Un segundo de reloj. Al agotarse el tiempo entrega una única vez.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<&Submission> {
        if self.phase != RunPhase::Running {
            return None;
        }
        let tick = self.countdown.as_mut().map(Countdown::tick);
        if tick == Some(Tick::Expired) {
            log::info!("tiempo agotado, entrega automática");
            self.submit(now)
        } else {
            None
        }
    }

    /// Running -> Submitted. Idempotente: una segunda llamada no puntúa ni guarda nada.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Option<&Submission> {
        if self.phase != RunPhase::Running {
            return None;
        }
        let attempt = self.attempt.as_ref()?;
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.stop();
        }

        let report = score(&attempt.items, &attempt.selections);
        let duration = duration_seconds(attempt.started_at, now, attempt.time_limit_seconds);
        let record = (self.level.keeps_history() && report.total > 0).then(|| ResultRecord {
            id: format!("result-{}-{:08x}", now.timestamp_millis(), self.rng.r#gen::<u32>()),
            level: self.level.to_string(),
            subject: attempt.subject.clone(),
            correct_count: report.correct,
            total_count: report.total,
            accuracy_percent: report.accuracy_percent,
            duration_sec: duration,
            time_limit_sec: attempt.time_limit_seconds,
            started_at: Some(attempt.started_at),
            finished_at: Some(now),
            page: self.page.clone(),
        });

        log::info!(
            "intento entregado: {}/{} ({}%) en {duration}s",
            report.correct,
            report.total,
            report.accuracy_percent
        );

        self.phase = RunPhase::Submitted;
        self.outcome = Some(Submission {
            report,
            duration_seconds: duration,
            finished_at: now,
            record,
        });
        self.outcome.as_ref()
    }

    /// Repite con los últimos ajustes; sin banco cargado vuelve al formulario.
    pub fn retake(&mut self, now: DateTime<Utc>) -> StartRequest {
        if self.loading {
            return StartRequest::Ignored;
        }
        if self.pool.is_none() {
            self.phase = RunPhase::Idle;
            return StartRequest::ShowSettings;
        }
        self.begin(now);
        StartRequest::Started
    }

    /// Abandona el intento (botón "volver" confirmado) sin puntuar.
    pub fn abandon(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.stop();
        }
        self.attempt = None;
        self.outcome = None;
        self.tally = LiveTally::default();
        self.phase = RunPhase::Idle;
    }
}
