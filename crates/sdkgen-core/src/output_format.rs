//! What a scan writes for each command.
//!
//! `Template` renders the target-language stub. `Json` writes the extracted
//! command as one JSON object per line (JSON Lines) for machine consumption.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{model::Command, Error, Result};

/// Output format of a scan
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered SDK stub text
    #[default]
    #[strum(to_string = "template", serialize = "stub")]
    Template,
    /// Extracted metadata, one JSON object per line
    #[strum(to_string = "json", serialize = "jsonl")]
    Json,
}

impl OutputFormat {
    /// Whether output is machine-readable JSON.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Serialize a command as a single JSON line (no trailing newline).
    pub fn json_line(command: &Command) -> Result<String> {
        serde_json::to_string(command)
            .map_err(|e| Error::Render(format!("Failed to serialize {}: {e}", command.name)))
    }
}
