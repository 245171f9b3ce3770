use anyhow::Context;
use property_portfolio::config::Config;
use property_portfolio::sources::load_portfolio;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Property Portfolio");
    info!("=====================");

    let config = Config::from_env();
    let source = config.build_source()?;
    let portfolio = load_portfolio(source.as_ref()).await?;

    let stats = portfolio.stats();
    info!(
        "📊 {} active, {} rented, {} GNF/month, {}% occupancy",
        stats.total, stats.rented, stats.monthly_revenue, stats.occupancy_rate
    );

    let criteria = &config.criteria;
    info!(
        "Filtering {:?} view: query={:?} category={:?} status={:?} ({} active filters)",
        config.view,
        criteria.query,
        criteria.category,
        criteria.status,
        criteria.active_filter_count()
    );

    let matches = portfolio.view(config.view, criteria);
    info!("✅ {} properties found\n", matches.len());

    for (i, property) in matches.iter().enumerate() {
        println!("{}. {} [{} · {}]", i + 1, property.address, property.category, property.status);
        if let Some(rent) = property.monthly_rent {
            println!("   Rent: {} GNF/month", rent);
        }
        if let Some(owner) = &property.owner_name {
            println!("   Owner: {}", owner);
        }
        if let Some(sqm) = property.surface_area_sqm {
            println!("   {} m²", sqm);
        }
        println!("   ID: {}", property.id);
        println!();
    }

    let json = serde_json::to_string_pretty(&matches)?;
    tokio::fs::write(&config.output, json)
        .await
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    info!("💾 Saved {} properties to {}", matches.len(), config.output.display());

    Ok(())
}
