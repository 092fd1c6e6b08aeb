use crate::QuizApp;
use crate::model::Level;
use crate::ui::helpers::big_button;
use crate::ui::layout::centered_panel;
use egui::{Context, RichText};

pub fn ui_home(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 320.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("JLPT Skill Sprint");
            ui.add_space(6.0);
            ui.label("制限時間つきの模擬テスト");
            ui.add_space(18.0);

            // Selector de nivel
            ui.horizontal(|ui| {
                ui.label("レベル:");
                for level in Level::ALL {
                    let selected = app.run.level() == level;
                    if ui.selectable_label(selected, level.as_str()).clicked() && !selected {
                        app.elegir_nivel(level);
                    }
                }
            });
            if !app.run.level().keeps_history() {
                ui.label(RichText::new("このレベルは結果を保存しません").small().weak());
            }
            ui.add_space(14.0);

            let btn_w = (ui.available_width() * 0.8).clamp(160.0, 360.0);
            if big_button(ui, "▶ テスト開始", btn_w, 40.0, !app.is_pool_loading()) {
                app.abrir_ajustes();
            }
            ui.add_space(6.0);
            if big_button(ui, "📊 履歴", btn_w, 40.0, true) {
                app.abrir_historial();
            }
        });
    });
}
