use serde::{Deserialize, Serialize};

use crate::domain::{ComparisonPeriod, FormRecord, LocalLanguage};

/// User-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
    #[serde(default)]
    pub default_language: LocalLanguage,
    #[serde(default)]
    pub default_comparison_period: ComparisonPeriod,
    /// Expand the optional review counts, social links and notes sections
    /// without asking first.
    #[serde(default)]
    pub expand_optional_sections: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
            default_language: LocalLanguage::default(),
            default_comparison_period: ComparisonPeriod::default(),
            expand_optional_sections: false,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Empty record carrying the preferred language and comparison period.
    pub fn seed_record(&self) -> FormRecord {
        FormRecord::with_defaults(self.default_language, self.default_comparison_period)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default)]
    pub high_contrast: bool,
}
