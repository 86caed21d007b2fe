//! Read-only host context handed to the dialog at render time.

use std::collections::HashMap;

use crate::energy::StatisticMetadata;

const BUILTIN_STRINGS: &[(&str, &str)] = &[
    ("ui.common.cancel", "Cancel"),
    ("ui.common.save", "Save"),
];

/// Localization lookup plus the statistic catalog the picker reads.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    translations: HashMap<String, String>,
    statistics: Vec<StatisticMetadata>,
}

impl HostContext {
    pub fn new(translations: HashMap<String, String>, statistics: Vec<StatisticMetadata>) -> Self {
        Self {
            translations,
            statistics,
        }
    }

    /// Resolve a translation key. Unknown keys render as themselves.
    pub fn localize(&self, key: &str) -> String {
        if let Some(text) = self.translations.get(key) {
            return text.clone();
        }
        BUILTIN_STRINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn statistics(&self) -> &[StatisticMetadata] {
        &self.statistics
    }
}
