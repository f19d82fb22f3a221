use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::sampler::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Weighted draws tried before falling back to sampling without replacement.
    pub max_attempts: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Discard draws that repeat a main number instead of counting it twice.
    pub reject_duplicates: bool,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            reject_duplicates: false,
            chart_width: 120,
            chart_height: 40,
        }
    }
}

impl PredictorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        Ok(())
    }
}
