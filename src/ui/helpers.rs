// src/ui/helpers.rs
use crate::scoring::OptionView;
use egui::{Button, Color32, RichText, Ui, Vec2};

const CORRECT_FILL: Color32 = Color32::from_rgb(46, 125, 50);
const WRONG_FILL: Color32 = Color32::from_rgb(183, 28, 28);

pub fn big_button(ui: &mut Ui, label: &str, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}

/// Botón de opción. Verde = respuesta correcta, rojo = elección equivocada,
/// resaltado = elegida sin corregir todavía.
pub fn option_button(ui: &mut Ui, view: &OptionView, width: f32, enabled: bool) -> bool {
    let mut text = RichText::new(&view.label);
    let mut button = if view.correct_answer {
        text = text.color(Color32::WHITE);
        Button::new(text).fill(CORRECT_FILL)
    } else if view.wrong_selection {
        text = text.color(Color32::WHITE);
        Button::new(text).fill(WRONG_FILL)
    } else {
        Button::new(text).selected(view.selected)
    };
    button = button.min_size(Vec2::new(width, 32.0));

    let response = ui.add_enabled(enabled, button);
    match view.image.as_deref() {
        Some(image) => response.on_hover_text(image).clicked(),
        None => response.clicked(),
    }
}

pub fn badge(ui: &mut Ui, text: &str) {
    egui::Frame::default()
        .fill(ui.visuals().selection.bg_fill)
        .corner_radius(8)
        .inner_margin(egui::Margin::symmetric(16, 8))
        .show(ui, |ui| {
            ui.label(RichText::new(text).heading().strong().color(Color32::WHITE));
        });
}
