use crate::models::PropertyRecord;
use crate::portfolio::Portfolio;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

/// Common trait for everything that supplies property records
/// (built-in seed data, exported JSON files, the REST backend)
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Load every record the source holds, archived ones included
    async fn load(&self) -> Result<Vec<PropertyRecord>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}

/// Load a source into a validated portfolio
pub async fn load_portfolio(source: &dyn PropertySource) -> Result<Portfolio> {
    let records = source.load().await?;
    let portfolio = Portfolio::from_records(records)
        .with_context(|| format!("Invalid data from {} source", source.source_name()))?;

    let (active, archived) = portfolio.counts();
    info!(
        "Loaded {} properties from {} ({} active, {} archived)",
        portfolio.len(),
        source.source_name(),
        active,
        archived
    );
    Ok(portfolio)
}
