mod helpers;
pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::AppState;
use chrono::Utc;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, confirm_window};
use std::time::Duration;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, frame: &mut Frame) {
        let now = Utc::now();
        self.poll_pool_load(now);
        self.avanzar_reloj(now);

        // PANEL INFERIOR TEMA OSCURO O CLARO
        bottom_panel(self, ctx);

        // Dispatch por estado a las funciones en views
        match self.state {
            AppState::Home => views::home::ui_home(self, ctx),
            AppState::Settings => views::settings::ui_settings(self, ctx),
            AppState::Running => views::running::ui_running(self, ctx),
            AppState::Submitted => views::submitted::ui_submitted(self, ctx),
            AppState::History => views::history::ui_history(self, ctx),
        }

        self.confirm_windows(ctx);

        match frame.storage_mut() {
            Some(storage) => self.sync_storage(storage),
            None => self.drop_pending_ops(),
        }

        // El reloj necesita un frame por segundo aunque no haya input
        if self.state == AppState::Running || self.is_pool_loading() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, self);
    }
}

impl QuizApp {
    fn confirm_windows(&mut self, ctx: &Context) {
        if self.confirm_stop {
            match confirm_window(ctx, "テスト終了", "テストを終了して採点しますか？", "終了する", "続ける") {
                Some(true) => self.confirmar_parar(Utc::now()),
                Some(false) => self.confirm_stop = false,
                None => {}
            }
        }
        if self.confirm_exit {
            match confirm_window(ctx, "中断", "結果は保存されません。戻りますか？", "戻る", "続ける") {
                Some(true) => self.confirmar_salir(),
                Some(false) => self.confirm_exit = false,
                None => {}
            }
        }
        if self.confirm_clear {
            match confirm_window(ctx, "履歴を削除", "すべての結果を削除しますか？この操作は元に戻せません。", "削除", "キャンセル") {
                Some(true) => self.borrar_historial(),
                Some(false) => self.confirm_clear = false,
                None => {}
            }
        }
    }
}
