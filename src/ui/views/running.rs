use crate::QuizApp;
use crate::scoring::{OptionView, option_views};
use crate::ui::helpers::option_button;
use crate::ui::layout::scroll_panel;
use egui::{Context, RichText};

struct QuestionBlock {
    prompt: String,
    image: Option<String>,
    options: Vec<OptionView>,
    enabled: bool,
}

fn question_blocks(app: &QuizApp) -> Vec<QuestionBlock> {
    let Some(attempt) = app.run.attempt() else {
        return Vec::new();
    };
    let live = attempt.level.live_feedback();
    attempt
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let revealed = app.run.is_revealed(i);
            QuestionBlock {
                prompt: item.question.question.clone(),
                image: item.question.image.clone(),
                options: option_views(item, attempt.selections[i], revealed),
                // en N3 la primera elección bloquea la pregunta
                enabled: !(live && revealed),
            }
        })
        .collect()
}

pub fn ui_running(app: &mut QuizApp, ctx: &Context) {
    let live = app.run.level().live_feedback();

    egui::TopBottomPanel::top("run_header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("⏱ {}", app.run.countdown_display())).heading().monospace());
            ui.separator();
            ui.label(format!("{} / {}", app.run.level(), app.run.subject()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("終了").clicked() {
                    app.pedir_parar();
                }
                if ui.button("戻る").clicked() {
                    app.volver_inicio();
                }
            });
        });
    });

    if live {
        let total = app.run.attempt().map(|a| a.items.len()).unwrap_or(0);
        let tally = app.run.tally();
        egui::TopBottomPanel::bottom("live_footer").show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(format!("正解: {}", tally.correct));
                ui.separator();
                ui.label(format!("不正解: {}", tally.incorrect));
                ui.separator();
                ui.label(format!("残り: {}", tally.remaining(total)));
            });
        });
    }

    let blocks = question_blocks(app);
    let mut clicked: Option<(usize, usize)> = None;

    scroll_panel(ctx, 680.0, |ui| {
        if blocks.is_empty() {
            ui.add_space(20.0);
            ui.label("この科目には問題がありません。");
            return;
        }
        let button_w = ui.available_width() * 0.9;
        for (i, block) in blocks.iter().enumerate() {
            ui.add_space(12.0);
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(12, 10))
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("{}. {}", i + 1, block.prompt)).strong());
                    if let Some(image) = &block.image {
                        ui.label(RichText::new(format!("🖼 {image}")).weak());
                    }
                    ui.add_space(6.0);
                    for view in &block.options {
                        if option_button(ui, view, button_w, block.enabled) {
                            clicked = Some((i, view.original_index));
                        }
                        ui.add_space(2.0);
                    }
                });
        }
        ui.add_space(20.0);
    });

    if let Some((question, original)) = clicked {
        app.elegir_opcion(question, original);
    }
}
