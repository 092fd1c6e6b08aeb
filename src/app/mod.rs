use crate::config::AppConfig;
use crate::error::QuizError;
use crate::history::ResultRecord;
use crate::model::{AppState, Level, QuestionPool, Theme};
use crate::run::{RunController, RunSettings};
use crate::timer::TickClock;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;

// Submódulos
pub mod actions;
pub mod loading;
pub mod storage;

/// Escritura pendiente en el almacenamiento; se aplica al final del frame.
#[derive(Clone, Debug, PartialEq)]
pub enum StorageOp {
    AppendResult(ResultRecord),
    ClearHistory,
    SaveTheme(Theme),
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct QuizApp {
    // Lo único que sobrevive entre sesiones (además del historial y el tema)
    pub count_input: String,
    pub minutes_input: String,

    #[serde(skip)]
    pub config: AppConfig,
    #[serde(skip)]
    pub run: RunController,
    #[serde(skip)]
    pub state: AppState,
    #[serde(skip)]
    pub theme: Theme,
    #[serde(skip)]
    pub message: String,
    #[serde(skip)]
    pub subject_input: String,
    #[serde(skip)]
    pub confirm_stop: bool,
    #[serde(skip)]
    pub confirm_exit: bool,
    #[serde(skip)]
    pub confirm_clear: bool,
    #[serde(skip)]
    pub clock: Option<TickClock>,
    #[serde(skip)]
    pub pool_rx: Option<Receiver<Result<QuestionPool, QuizError>>>,
    #[serde(skip)]
    pub pending_ops: Vec<StorageOp>,
    #[serde(skip)]
    pub history: Vec<ResultRecord>,
    #[serde(skip)]
    pub history_stale: bool,
}

impl Default for QuizApp {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl QuizApp {
    pub fn new(config: AppConfig) -> Self {
        let settings = RunSettings::default();
        Self {
            count_input: settings.question_count.to_string(),
            minutes_input: settings.time_limit_minutes.to_string(),
            run: RunController::new(config.level, config.subject.clone(), config.page.clone()),
            subject_input: config.subject.clone(),
            config,
            state: AppState::Home,
            theme: Theme::Light,
            message: String::new(),
            confirm_stop: false,
            confirm_exit: false,
            confirm_clear: false,
            clock: None,
            pool_rx: None,
            pending_ops: Vec::new(),
            history: Vec::new(),
            history_stale: true,
        }
    }

    /// Arranque desde eframe: restaura el estado guardado y el tema.
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = QuizApp::new(config);
        if let Some(storage) = cc.storage {
            if let Some(saved) = eframe::get_value::<QuizApp>(storage, eframe::APP_KEY) {
                app.count_input = saved.count_input;
                app.minutes_input = saved.minutes_input;
            }
        }

        let system_dark = cc.egui_ctx.system_theme() == Some(egui::Theme::Dark);
        app.theme = crate::preferences::load_theme(cc.storage, system_dark);
        cc.egui_ctx.set_visuals(crate::preferences::visuals_for(app.theme));
        app
    }

    /// Cambia de nivel creando un controlador nuevo (cada nivel tiene su banco).
    pub fn switch_level(&mut self, level: Level) {
        if self.run.level() == level {
            return;
        }
        self.run = RunController::new(level, self.subject_input.clone(), self.config.page.clone());
        self.pool_rx = None;
        self.clock = None;
    }
}
