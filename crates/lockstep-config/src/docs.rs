//! Documentation table rendering.

use serde::{Deserialize, Serialize};

fn default_string_label() -> String {
    "String".to_string()
}

fn default_bool_label() -> String {
    "Boolean".to_string()
}

const fn default_flag_malformed_rows() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocsConfig {
    /// Type label documented for string-like fields.
    #[serde(default = "default_string_label")]
    pub string_label: String,

    /// Type label documented for boolean fields.
    #[serde(default = "default_bool_label")]
    pub bool_label: String,

    /// Report table rows without exactly four cells.
    #[serde(default = "default_flag_malformed_rows")]
    pub flag_malformed_rows: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            string_label: default_string_label(),
            bool_label: default_bool_label(),
            flag_malformed_rows: default_flag_malformed_rows(),
        }
    }
}
