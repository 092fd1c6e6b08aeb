use super::*;
use crate::run::StartRequest;
use chrono::{DateTime, Utc};

impl QuizApp {
    pub fn elegir_nivel(&mut self, level: Level) {
        if self.state == AppState::Running {
            return;
        }
        self.switch_level(level);
        self.message.clear();
        log::info!("nivel seleccionado: {level}");
    }

    pub fn abrir_ajustes(&mut self) {
        self.subject_input = self.run.subject().to_string();
        self.message = self.run.load_error().map(str::to_string).unwrap_or_default();
        self.state = AppState::Settings;
    }

    pub fn cancelar_ajustes(&mut self) {
        self.message.clear();
        self.state = AppState::Home;
    }

    /// Botón "開始" del formulario. Si el banco no está en caché se lanza la carga
    /// y el intento empieza cuando llegue.
    pub fn empezar_test(&mut self, ctx: &egui::Context, now: DateTime<Utc>) {
        let settings = RunSettings::from_inputs(&self.count_input, &self.minutes_input);
        self.count_input = settings.question_count.to_string();
        self.minutes_input = settings.time_limit_minutes.to_string();

        let subject = self.subject_input.trim();
        if !subject.is_empty() {
            self.run.set_subject(subject);
        }

        match self.run.request_start(settings, now) {
            StartRequest::Started => self.enter_running(now),
            StartRequest::NeedsPool => self.spawn_pool_load(ctx),
            StartRequest::Ignored => {}
            StartRequest::ShowSettings => self.abrir_ajustes(),
        }
    }

    pub(crate) fn enter_running(&mut self, now: DateTime<Utc>) {
        self.clock = Some(TickClock::new(now));
        self.confirm_stop = false;
        self.confirm_exit = false;
        self.state = AppState::Running;
    }

    pub fn elegir_opcion(&mut self, question: usize, original: usize) -> bool {
        self.run.select(question, original)
    }

    /// Entrega manual. Una segunda llamada no hace nada.
    pub fn entregar(&mut self, now: DateTime<Utc>) {
        let record = self.run.submit(now).map(|s| s.record.clone());
        if let Some(record) = record {
            self.finish_attempt(record);
        }
    }

    /// Avanza la cuenta atrás según el reloj; entrega sola al agotarse.
    pub fn avanzar_reloj(&mut self, now: DateTime<Utc>) {
        let Some(clock) = self.clock.as_mut() else {
            return;
        };
        let due = clock.advance(now);
        for _ in 0..due {
            let record = self.run.tick(now).map(|s| s.record.clone());
            if let Some(record) = record {
                self.finish_attempt(record);
                break;
            }
        }
    }

    fn finish_attempt(&mut self, record: Option<ResultRecord>) {
        if let Some(record) = record {
            self.pending_ops.push(StorageOp::AppendResult(record));
        }
        self.clock = None;
        self.confirm_stop = false;
        self.confirm_exit = false;
        self.state = AppState::Submitted;
    }

    pub fn pedir_parar(&mut self) {
        self.confirm_stop = true;
    }

    pub fn confirmar_parar(&mut self, now: DateTime<Utc>) {
        self.confirm_stop = false;
        self.entregar(now);
    }

    /// "戻る": durante un intento pide confirmación; si no, vuelve al inicio.
    pub fn volver_inicio(&mut self) {
        if self.state == AppState::Running {
            self.confirm_exit = true;
            return;
        }
        self.message.clear();
        self.state = AppState::Home;
    }

    pub fn confirmar_salir(&mut self) {
        self.run.abandon();
        self.clock = None;
        self.confirm_exit = false;
        self.state = AppState::Home;
        log::info!("intento abandonado");
    }

    pub fn repetir_test(&mut self, now: DateTime<Utc>) {
        match self.run.retake(now) {
            StartRequest::Started => self.enter_running(now),
            StartRequest::ShowSettings | StartRequest::NeedsPool => self.abrir_ajustes(),
            StartRequest::Ignored => {}
        }
    }

    pub fn abrir_historial(&mut self) {
        self.history_stale = true;
        self.state = AppState::History;
    }

    pub fn pedir_borrar_historial(&mut self) {
        self.confirm_clear = true;
    }

    pub fn borrar_historial(&mut self) {
        self.confirm_clear = false;
        self.history.clear();
        self.pending_ops.push(StorageOp::ClearHistory);
    }

    pub fn cambiar_tema(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(crate::preferences::visuals_for(self.theme));
        self.pending_ops.push(StorageOp::SaveTheme(self.theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HISTORY_KEY, list_all};
    use crate::model::{Question, QuestionOption};
    use crate::preferences::THEME_KEY;
    use crate::test_support::MemoryStorage;
    use chrono::{Duration, TimeZone};
    use eframe::Storage;
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn pool() -> QuestionPool {
        let question = Question {
            question: "「静か」の読みは？".into(),
            options: ["しずか", "しかず", "じずか"]
                .iter()
                .map(|s| QuestionOption::Text(s.to_string()))
                .collect(),
            answer: 0,
            image: None,
        };
        QuestionPool::from([("文法".to_string(), vec![question])])
    }

    fn running_app(level: Level) -> QuizApp {
        let mut app = QuizApp::new(AppConfig {
            level,
            ..AppConfig::default()
        });
        app.minutes_input = "1".into();
        app.abrir_ajustes();
        let settings = RunSettings::from_inputs(&app.count_input, &app.minutes_input);
        assert_eq!(app.run.request_start(settings, t0()), StartRequest::NeedsPool);
        app.deliver_pool(Ok(pool()), t0());
        assert_eq!(app.state, AppState::Running);
        app
    }

    #[test]
    fn manual_submit_persists_once() {
        let mut app = running_app(Level::N3);
        assert!(app.elegir_opcion(0, 0));
        app.entregar(t0() + Duration::seconds(30));
        app.entregar(t0() + Duration::seconds(31));
        assert_eq!(app.state, AppState::Submitted);
        assert_eq!(app.pending_ops.len(), 1);

        let mut storage = MemoryStorage::default();
        app.abrir_historial();
        app.sync_storage(&mut storage);
        assert!(app.pending_ops.is_empty());
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].correct_count, 1);
        assert_eq!(app.history[0].duration_sec, 30);
    }

    #[test]
    fn clock_expiry_submits_after_limit() {
        let mut app = running_app(Level::N3);
        app.avanzar_reloj(t0() + Duration::seconds(60));
        assert_eq!(app.state, AppState::Running);
        app.avanzar_reloj(t0() + Duration::seconds(61));
        assert_eq!(app.state, AppState::Submitted);
        assert!(app.clock.is_none());
        assert_eq!(app.pending_ops.len(), 1);

        // ticks tardíos no vuelven a entregar
        app.avanzar_reloj(t0() + Duration::seconds(120));
        app.entregar(t0() + Duration::seconds(121));
        assert_eq!(app.pending_ops.len(), 1);
    }

    #[test]
    fn deferred_level_writes_nothing() {
        let mut app = running_app(Level::N2);
        app.elegir_opcion(0, 1);
        app.entregar(t0() + Duration::seconds(5));
        assert_eq!(app.state, AppState::Submitted);
        assert!(app.pending_ops.is_empty());
    }

    #[test]
    fn load_failure_stays_in_settings() {
        let mut app = QuizApp::default();
        app.abrir_ajustes();
        app.run.request_start(RunSettings::default(), t0());
        app.deliver_pool(Err(QuizError::LoaderGone), t0());
        assert_eq!(app.state, AppState::Settings);
        assert!(app.message.contains("失敗"));
        assert!(!app.is_pool_loading());
    }

    #[test]
    fn start_loads_embedded_pool() {
        let ctx = egui::Context::default();
        let mut app = QuizApp::default();
        app.count_input = "3".into();
        app.abrir_ajustes();
        app.empezar_test(&ctx, t0());
        assert!(app.is_pool_loading());

        // segundo clic mientras carga: ignorado
        app.empezar_test(&ctx, t0());

        let rx = app.pool_rx.take().unwrap();
        let result = rx.recv().unwrap();
        app.deliver_pool(result, t0());
        assert_eq!(app.state, AppState::Running);
        assert_eq!(app.run.attempt().map(|a| a.items.len()), Some(3));
    }

    #[test]
    fn exit_during_run_needs_confirmation() {
        let mut app = running_app(Level::N3);
        app.volver_inicio();
        assert_eq!(app.state, AppState::Running);
        assert!(app.confirm_exit);
        app.confirmar_salir();
        assert_eq!(app.state, AppState::Home);
        assert!(app.run.attempt().is_none());
        assert!(app.pending_ops.is_empty());
    }

    #[test]
    fn retake_starts_fresh_attempt() {
        let mut app = running_app(Level::N3);
        app.elegir_opcion(0, 2);
        app.entregar(t0() + Duration::seconds(3));
        app.repetir_test(t0() + Duration::seconds(10));
        assert_eq!(app.state, AppState::Running);
        let attempt = app.run.attempt().unwrap();
        assert_eq!(attempt.selections, vec![None]);
        assert_eq!(attempt.time_limit_seconds, 60);
    }

    #[test]
    fn clear_and_theme_reach_storage() {
        let ctx = egui::Context::default();
        let mut storage = MemoryStorage::default();
        storage.set_string(HISTORY_KEY, "not json".into());

        let mut app = QuizApp::default();
        app.cambiar_tema(&ctx);
        app.borrar_historial();
        app.sync_storage(&mut storage);

        assert_eq!(storage.get_string(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(storage.get_string(HISTORY_KEY).as_deref(), Some("[]"));
        assert!(list_all(&storage).is_empty());
    }

    #[test]
    fn level_cannot_change_mid_run() {
        let mut app = running_app(Level::N3);
        app.elegir_nivel(Level::N2);
        assert_eq!(app.run.level(), Level::N3);
    }
}
