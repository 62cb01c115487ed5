//! Settings file model.

use crate::constants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub generate: GenerateSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSection {
    #[serde(default = "default_length")]
    pub default_length: usize,
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            default_length: default_length(),
        }
    }
}

fn default_length() -> usize {
    constants::DEFAULT_PASSWORD_LENGTH
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Mask the Password column in `list` and `show` unless `--reveal`.
    #[serde(default)]
    pub conceal_secrets: bool,
}
