//! Pipeline configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::parser::Sources;

/// Which command sources carry text payloads and which carry JSON.
///
/// ```
/// use handoff_commands::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{"text_sources": ["console"]}"#).unwrap();
/// assert!(config.text_sources.contains("console"));
/// assert!(config.json_sources.contains("json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub text_sources: BTreeSet<String>,
    pub json_sources: BTreeSet<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_sources: BTreeSet::from(["text".to_string()]),
            json_sources: BTreeSet::from(["json".to_string()]),
        }
    }
}

impl PipelineConfig {
    pub fn new<T, J>(text_sources: T, json_sources: J) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            text_sources: text_sources.into_iter().map(Into::into).collect(),
            json_sources: json_sources.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid pipeline configuration")?;
        if let Some(shared) = config.text_sources.intersection(&config.json_sources).next() {
            tracing::warn!(source = %shared, "source listed as both text and json, text wins");
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pipeline configuration {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    pub fn text(&self) -> Sources {
        self.text_sources.iter().cloned().collect()
    }

    pub fn json(&self) -> Sources {
        self.json_sources.iter().cloned().collect()
    }
}
