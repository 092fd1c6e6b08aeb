use crate::QuizApp;
use crate::ui::layout::{centered_panel, two_button_row};
use chrono::Utc;
use egui::{Color32, ComboBox, Context, Grid, RichText, TextEdit};

pub fn ui_settings(app: &mut QuizApp, ctx: &Context) {
    let loading = app.is_pool_loading();
    centered_panel(ctx, 300.0, 420.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("テスト設定");
        });
        ui.add_space(12.0);

        Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("科目");
                // Con el banco en caché se elige de la lista; si no, texto libre
                let subjects = app.run.subjects();
                if subjects.is_empty() {
                    ui.add(TextEdit::singleline(&mut app.subject_input).desired_width(160.0));
                } else {
                    ComboBox::from_id_salt("subject_combo")
                        .selected_text(app.subject_input.clone())
                        .show_ui(ui, |ui| {
                            for subject in subjects {
                                ui.selectable_value(&mut app.subject_input, subject.clone(), subject);
                            }
                        });
                }
                ui.end_row();

                ui.label("問題数");
                ui.add(TextEdit::singleline(&mut app.count_input).desired_width(80.0));
                ui.end_row();

                ui.label("制限時間（分）");
                ui.add(TextEdit::singleline(&mut app.minutes_input).desired_width(80.0));
                ui.end_row();
            });

        ui.add_space(12.0);
        if loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("問題を読み込み中…");
            });
        } else if !app.message.is_empty() {
            ui.label(RichText::new(&app.message).color(Color32::LIGHT_RED));
        }
        ui.add_space(12.0);

        let width = ui.available_width();
        let (start, cancel) = ui
            .add_enabled_ui(!loading, |ui| two_button_row(ui, width, "開始", "キャンセル"))
            .inner;
        if start {
            app.empezar_test(ctx, Utc::now());
        }
        if cancel {
            app.cancelar_ajustes();
        }
    });
}
