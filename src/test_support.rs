// Utilidades compartidas por los tests.

use std::collections::HashMap;

/// `eframe::Storage` en memoria.
#[derive(Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    pub flushes: usize,
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
