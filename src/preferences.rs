// src/preferences.rs

use crate::model::Theme;
use eframe::Storage;

pub const THEME_KEY: &str = "theme";

/// Tema guardado; si no hay (o no es válido) manda la preferencia del sistema.
pub fn load_theme(storage: Option<&dyn Storage>, system_dark: bool) -> Theme {
    match storage.and_then(|s| s.get_string(THEME_KEY)).as_deref() {
        Some("dark") => Theme::Dark,
        Some("light") => Theme::Light,
        _ if system_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn store_theme(storage: &mut dyn Storage, theme: Theme) {
    storage.set_string(THEME_KEY, theme.as_str().to_string());
    storage.flush();
}

pub fn visuals_for(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn saved_theme_wins_over_system() {
        let mut storage = MemoryStorage::default();
        store_theme(&mut storage, Theme::Light);
        assert_eq!(load_theme(Some(&storage), true), Theme::Light);
        store_theme(&mut storage, Theme::Dark);
        assert_eq!(load_theme(Some(&storage), false), Theme::Dark);
        assert_eq!(storage.get_string(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn falls_back_to_system_preference() {
        let mut storage = MemoryStorage::default();
        storage.set_string(THEME_KEY, "sepia".into());
        assert_eq!(load_theme(Some(&storage), true), Theme::Dark);
        assert_eq!(load_theme(None, false), Theme::Light);
    }
}
