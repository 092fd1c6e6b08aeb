use super::*;
use chrono::{DateTime, Utc};
use std::sync::mpsc::{self, TryRecvError};

impl QuizApp {
    /// Lanza la carga del banco fuera del hilo de UI. El resultado llega por canal
    /// y se recoge en `poll_pool_load`.
    pub fn spawn_pool_load(&mut self, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel::<Result<QuestionPool, QuizError>>();
        let source = self.config.pool_source();
        let level = self.run.level();
        let ctx = ctx.clone();
        log::info!("cargando banco {level} desde {source:?}");

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = crate::data::load_pool_blocking(&source, level);
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = crate::data::fetch_pool(source, level).await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        self.pool_rx = Some(rx);
        self.message = "問題を読み込み中…".into();
    }

    pub fn poll_pool_load(&mut self, now: DateTime<Utc>) {
        let received = match self.pool_rx.as_ref().map(Receiver::try_recv) {
            None | Some(Err(TryRecvError::Empty)) => return,
            Some(Ok(result)) => result,
            Some(Err(TryRecvError::Disconnected)) => Err(QuizError::LoaderGone),
        };
        self.pool_rx = None;
        self.deliver_pool(received, now);
    }

    /// Entrega el resultado de la carga al controlador y actualiza la vista.
    pub fn deliver_pool(&mut self, result: Result<QuestionPool, QuizError>, now: DateTime<Utc>) {
        match self.run.pool_loaded(result, now) {
            Ok(()) => {
                self.message.clear();
                self.enter_running(now);
            }
            Err(err) => {
                self.message = format!("問題の読み込みに失敗しました: {err}");
                self.state = AppState::Settings;
            }
        }
    }

    pub fn is_pool_loading(&self) -> bool {
        self.pool_rx.is_some() || self.run.is_loading()
    }
}
