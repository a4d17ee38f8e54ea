#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::auth::session::Language;

/// Save-state machine observed by the save indicator:
/// `Idle → Saving → (Saved | Error) → Idle`.
///
/// Exactly one coordinator owns this state per editing session. `Saved` and
/// `Error` are display states that revert to `Idle` after a fixed window
/// unless a new edit clears them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

impl SaveStatus {
    /// Indicator label in the session's language.
    pub fn label(&self, locale: Language) -> &'static str {
        match (self, locale) {
            (SaveStatus::Idle, Language::Zh) => "点击保存",
            (SaveStatus::Idle, Language::En) => "Click to Save",
            (SaveStatus::Saving, Language::Zh) => "保存中...",
            (SaveStatus::Saving, Language::En) => "Saving...",
            (SaveStatus::Saved, Language::Zh) => "已保存",
            (SaveStatus::Saved, Language::En) => "Saved",
            (SaveStatus::Error, Language::Zh) => "保存失败",
            (SaveStatus::Error, Language::En) => "Save Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_cover_both_languages() {
        assert_eq!(SaveStatus::Saved.label(Language::En), "Saved");
        assert_eq!(SaveStatus::Saved.label(Language::Zh), "已保存");
        assert_eq!(SaveStatus::Error.label(Language::En), "Save Failed");
        assert_eq!(SaveStatus::Idle.label(Language::Zh), "点击保存");
    }
}
