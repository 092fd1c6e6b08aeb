pub mod history;
pub mod home;
pub mod running;
pub mod settings;
pub mod submitted;
