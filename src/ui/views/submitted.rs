use crate::QuizApp;
use crate::scoring::{OptionView, option_views};
use crate::ui::helpers::{badge, option_button};
use crate::ui::layout::scroll_panel;
use crate::view_models::ResultSummary;
use chrono::Utc;
use egui::{Button, Color32, Context, RichText};

pub fn ui_submitted(app: &mut QuizApp, ctx: &Context) {
    if app.run.outcome().is_none() {
        app.volver_inicio();
        return;
    }
    let Some(outcome) = app.run.outcome() else {
        return;
    };
    let summary = ResultSummary::from(outcome);
    let reviews = outcome.report.reviews.clone();
    let marked: Vec<Vec<OptionView>> = app
        .run
        .attempt()
        .map(|a| {
            a.items
                .iter()
                .zip(&a.selections)
                .map(|(item, sel)| option_views(item, *sel, true))
                .collect()
        })
        .unwrap_or_default();
    let saved = outcome.record.is_some();

    let mut retake = false;
    let mut back = false;
    let mut history = false;

    scroll_panel(ctx, 680.0, |ui| {
        ui.add_space(16.0);
        ui.heading("結果");
        ui.add_space(8.0);
        badge(ui, &format!("{} / {}", summary.correct, summary.total));
        ui.add_space(8.0);
        ui.label(format!("正解率: {}", summary.accuracy));
        ui.label(format!("所要時間: {}", summary.duration));
        if !saved && app.run.level().keeps_history() {
            ui.label(RichText::new("問題がないため保存されません").small().weak());
        }
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let w = (ui.available_width() - 16.0) / 3.0;
            retake = ui.add_sized([w, 36.0], Button::new("もう一度")).clicked();
            back = ui.add_sized([w, 36.0], Button::new("戻る")).clicked();
            history = ui.add_sized([w, 36.0], Button::new("履歴")).clicked();
        });
        ui.add_space(12.0);
        ui.separator();

        let button_w = ui.available_width() * 0.9;
        for (i, review) in reviews.iter().enumerate() {
            ui.add_space(10.0);
            let mark = if review.is_correct { "⭕" } else { "❌" };
            ui.label(RichText::new(format!("{mark} {}. {}", review.number, review.prompt)).strong());
            if let Some(options) = marked.get(i) {
                for view in options {
                    option_button(ui, view, button_w, false);
                }
            }
            ui.label(RichText::new(format!("正解: {}", review.correct_label)).color(Color32::from_rgb(46, 125, 50)));
            let user_color = if review.is_correct {
                Color32::from_rgb(46, 125, 50)
            } else {
                Color32::from_rgb(183, 28, 28)
            };
            ui.label(RichText::new(format!("あなた: {}", review.user_label)).color(user_color));
        }
        ui.add_space(20.0);
    });

    if retake {
        app.repetir_test(Utc::now());
    } else if back {
        app.volver_inicio();
    } else if history {
        app.abrir_historial();
    }
}
