pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod history;
pub mod model;
pub mod preferences;
pub mod run;
pub mod sampling;
pub mod scoring;
pub mod timer;
pub mod ui;
pub mod view_models;

#[cfg(test)]
mod test_support;

pub use app::QuizApp;
