use super::*;
use crate::history;
use crate::preferences::store_theme;
use eframe::Storage;

impl QuizApp {
    /// Aplica las escrituras pendientes y recarga el historial si hace falta.
    /// Las escrituras son "dispara y olvida": sin reintentos.
    pub fn sync_storage(&mut self, storage: &mut dyn Storage) {
        for op in self.pending_ops.drain(..) {
            match op {
                StorageOp::AppendResult(record) => {
                    history::append(storage, record);
                    self.history_stale = true;
                }
                StorageOp::ClearHistory => {
                    history::clear(storage);
                    self.history_stale = true;
                }
                StorageOp::SaveTheme(theme) => store_theme(storage, theme),
            }
        }
        if self.history_stale && self.state == AppState::History {
            self.history = history::list_all(storage);
            self.history_stale = false;
        }
    }

    /// Sin almacenamiento (persistencia desactivada) las escrituras se pierden.
    pub fn drop_pending_ops(&mut self) {
        if !self.pending_ops.is_empty() {
            log::warn!("sin almacenamiento: se descartan {} escrituras", self.pending_ops.len());
            self.pending_ops.clear();
        }
    }
}
