//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::filters::{FilterCriteria, View};
use crate::sources::{HttpSource, JsonFileSource, PropertySource, SeedSource};

pub const DEFAULT_OUTPUT: &str = "filtered_properties.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = crate::sources::http::DEFAULT_TIMEOUT_SECS;

/// Where property records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Seed,
    File(PathBuf),
    Http(String),
}

impl SourceKind {
    /// `seed` (or empty), an `http(s)://` URL, or a filesystem path
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("seed") {
            SourceKind::Seed
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            SourceKind::Http(raw.to_string())
        } else {
            SourceKind::File(PathBuf::from(raw))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceKind,
    pub criteria: FilterCriteria,
    pub view: View,
    pub output: PathBuf,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Seed,
            criteria: FilterCriteria::default(),
            view: View::Active,
            output: PathBuf::from(DEFAULT_OUTPUT),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build config from environment variables.
    ///
    /// All optional:
    /// - `PORTFOLIO_SOURCE`: `seed` (default), a JSON file path, or an `http(s)://` URL
    /// - `PORTFOLIO_QUERY`, `PORTFOLIO_CATEGORY`, `PORTFOLIO_STATUS`: filter criteria
    /// - `PORTFOLIO_VIEW`: `active` (default) or `archived`
    /// - `PORTFOLIO_OUTPUT`: default `filtered_properties.json`
    /// - `PORTFOLIO_HTTP_TIMEOUT_SECS`: default 30
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading values through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let source = lookup("PORTFOLIO_SOURCE")
            .map(|raw| SourceKind::parse(&raw))
            .unwrap_or(defaults.source);

        let criteria = FilterCriteria::from_input(
            lookup("PORTFOLIO_QUERY").as_deref().unwrap_or(""),
            lookup("PORTFOLIO_CATEGORY").as_deref(),
            lookup("PORTFOLIO_STATUS").as_deref(),
        );

        let view = match lookup("PORTFOLIO_VIEW") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to active", e);
                View::Active
            }),
            None => defaults.view,
        };

        let output = lookup("PORTFOLIO_OUTPUT")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output);

        let http_timeout = lookup("PORTFOLIO_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Self {
            source,
            criteria,
            view,
            output,
            http_timeout,
        }
    }

    /// Instantiate the configured property source
    pub fn build_source(&self) -> Result<Box<dyn PropertySource>> {
        let source: Box<dyn PropertySource> = match &self.source {
            SourceKind::Seed => Box::new(SeedSource),
            SourceKind::File(path) => Box::new(JsonFileSource::new(path)),
            SourceKind::Http(url) => {
                Box::new(HttpSource::with_timeout(url.clone(), self.http_timeout)?)
            }
        };
        Ok(source)
    }
}
