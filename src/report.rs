/// Per-input result as printed by the CLI, in text or JSON form.

use crate::stream::StreamReport;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputReport {
    /// Path, or `-` for stdin.
    pub source: String,
    pub bytes: u64,
    pub valid: bool,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_offset: Option<u64>,
}

impl InputReport {
    pub fn new(source: &str, stream: &StreamReport) -> Self {
        Self {
            source: source.into(),
            bytes: stream.offset,
            valid: stream.valid,
            complete: stream.complete,
            error_offset: (!stream.valid).then_some(stream.offset),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.valid && self.complete
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for InputReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.valid, self.complete, self.error_offset) {
            (false, _, Some(at)) => write!(f, "{}: invalid UTF-8 at byte {}", self.source, at),
            (false, _, None) => write!(f, "{}: invalid UTF-8", self.source),
            (true, false, _) => write!(f, "{}: incomplete sequence at end ({} bytes)",
                                       self.source, self.bytes),
            (true, true, _) => write!(f, "{}: ok ({} bytes)", self.source, self.bytes),
        }
    }
}

/// Render several reports as one JSON array.
pub fn to_json_array(reports: &[InputReport]) -> Result<String, String> {
    serde_json::to_string_pretty(reports).map_err(|e| e.to_string())
}
