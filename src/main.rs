#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use jlpt_sprint::QuizApp;
use jlpt_sprint::config::AppConfig;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let config = AppConfig::from_env();
    log::info!("arrancando: nivel {} / {}", config.level, config.subject);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "JLPT Skill Sprint",
        options,
        Box::new(|cc| Ok(Box::new(QuizApp::from_creation_context(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Info).ok();
    let config = AppConfig::from_location();

    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("sin document: no se puede arrancar");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("no se encontró el canvas the_canvas_id");
            return;
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(QuizApp::from_creation_context(cc, config)))),
            )
            .await;
        if let Err(err) = result {
            log::error!("fallo al arrancar eframe: {err:?}");
        }
    });
}
