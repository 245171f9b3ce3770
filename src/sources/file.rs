use crate::models::PropertyRecord;
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Reads a JSON array of property records from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PropertySource for JsonFileSource {
    async fn load(&self) -> Result<Vec<PropertyRecord>> {
        info!("Reading properties from {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        debug!("Read {} bytes", raw.len());

        let records: Vec<PropertyRecord> = serde_json::from_str(&raw).with_context(|| {
            format!("Failed to parse property records in {}", self.path.display())
        })?;
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
