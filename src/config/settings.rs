use serde::{Deserialize, Serialize};

use crate::dashboard::PAGE_SIZE;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DashboardSettings {
    /// JSON file holding the record list
    #[serde(default)]
    pub records_file: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            records_file: None,
            currency_symbol: default_currency_symbol(),
            page_size: default_page_size(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_page_size() -> usize {
    PAGE_SIZE
}
