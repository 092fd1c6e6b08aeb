use crate::QuizApp;
use crate::history::aggregate;
use crate::ui::layout::scroll_panel;
use crate::view_models::{HistoryRow, history_subtitle};
use egui::{Button, Context, Grid, RichText};

pub fn ui_history(app: &mut QuizApp, ctx: &Context) {
    let stats = aggregate(&app.history);
    let rows: Vec<HistoryRow> = app.history.iter().map(HistoryRow::from).collect();
    let mut back = false;
    let mut clear = false;

    scroll_panel(ctx, 760.0, |ui| {
        ui.add_space(16.0);
        ui.heading("履歴");
        ui.label(history_subtitle(stats.runs));
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label(format!("平均正解率: {}", stats.mean_accuracy_label()));
            ui.separator();
            ui.label(format!("最高: {}", stats.best_accuracy_label()));
            ui.separator();
            ui.label(format!("平均時間: {}", stats.mean_duration_label()));
        });
        ui.add_space(10.0);

        if rows.is_empty() {
            ui.label(RichText::new("結果はまだありません。").weak());
        } else {
            Grid::new("history_grid")
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for header in ["日時", "レベル", "科目", "得点", "正解率", "時間", "制限"] {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();
                    for r in &rows {
                        ui.label(&r.finished);
                        ui.label(&r.level);
                        ui.label(&r.subject);
                        ui.label(&r.score);
                        ui.label(&r.accuracy);
                        ui.label(&r.duration);
                        ui.label(&r.limit);
                        ui.end_row();
                    }
                });
        }

        ui.add_space(14.0);
        ui.horizontal(|ui| {
            back = ui.add_sized([140.0, 34.0], Button::new("戻る")).clicked();
            clear = ui
                .add_enabled(!rows.is_empty(), Button::new("履歴を削除").min_size([140.0, 34.0].into()))
                .clicked();
        });
        ui.add_space(20.0);
    });

    if back {
        app.volver_inicio();
    }
    if clear {
        app.pedir_borrar_historial();
    }
}
