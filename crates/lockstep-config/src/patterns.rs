//! Identifiers the scanners look for in source artifacts.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_instance() -> String {
    "Config".to_string()
}

fn default_copy_fn() -> String {
    "strlcpy".to_string()
}

fn default_compare_fn() -> String {
    "strcmp".to_string()
}

fn default_bool_parsers() -> Vec<String> {
    vec!["atob".to_string()]
}

fn default_int_parsers() -> Vec<String> {
    vec!["atoi".to_string(), "atol".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternConfig {
    /// Name of the schema struct. Empty means the first struct block in the header.
    #[serde(default)]
    pub struct_name: String,

    /// Global instance through which fields are accessed (`Config.port`).
    #[serde(default = "default_instance")]
    pub instance: String,

    /// Bounded string copy function.
    #[serde(default = "default_copy_fn")]
    pub copy_fn: String,

    /// String comparison used to match an option name.
    #[serde(default = "default_compare_fn")]
    pub compare_fn: String,

    /// Functions that parse a boolean setter value.
    #[serde(default = "default_bool_parsers")]
    pub bool_parsers: Vec<String>,

    /// Functions that parse an integer setter value.
    #[serde(default = "default_int_parsers")]
    pub int_parsers: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            struct_name: String::new(),
            instance: default_instance(),
            copy_fn: default_copy_fn(),
            compare_fn: default_compare_fn(),
            bool_parsers: default_bool_parsers(),
            int_parsers: default_int_parsers(),
        }
    }
}

impl PatternConfig {
    /// Every configured name must be a plain C identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let single = [
            ("patterns.instance", &self.instance),
            ("patterns.copy_fn", &self.copy_fn),
            ("patterns.compare_fn", &self.compare_fn),
        ];
        for (field, value) in single {
            check_identifier(field, value)?;
        }
        if !self.struct_name.is_empty() {
            check_identifier("patterns.struct_name", &self.struct_name)?;
        }
        for (field, list) in [
            ("patterns.bool_parsers", &self.bool_parsers),
            ("patterns.int_parsers", &self.int_parsers),
        ] {
            if list.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "at least one parser is required".to_string(),
                });
            }
            for name in list {
                check_identifier(field, name)?;
            }
        }
        Ok(())
    }
}

fn check_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{value}' is not an identifier"),
        })
    }
}
