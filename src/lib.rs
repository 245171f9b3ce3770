pub mod config;
pub mod filters;
pub mod models;
pub mod portfolio;
pub mod sources;

pub use filters::{filter, filter_view, FilterCriteria, View};
pub use models::{Category, Media, PropertyDraft, PropertyRecord, Status};
pub use portfolio::{Portfolio, PortfolioError, PortfolioStats};
