//! Pokémon TCG catalog client for Rust.
//!
//! Fetches card data from the Pokémon TCG API, normalizes the upstream
//! records into a stable [`Card`] model, and keeps a time-bounded cache of
//! the standard-legal sets so synchronization doesn't hammer the API.
//!
//! # Quick start
//!
//! ```no_run
//! use ptcg_catalog::{CardSearch, CatalogService};
//!
//! # async fn example() -> ptcg_catalog::Result<()> {
//! let service = CatalogService::builder().settings_from_env()?.build()?;
//!
//! // Single card
//! let card = service.get_card_by_id("sv3pt5-6").await?;
//!
//! // Filtered search
//! let basics = service
//!     .search_cards(&CardSearch::default().supertype("Pokémon").rarity("Common"))
//!     .await?;
//!
//! // Full standard sync
//! let stats = service.sync_standard_cards().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod legal_sets;
pub mod models;
pub mod normalize;
pub mod query;
pub mod service;
pub mod store;
pub mod upstream;

pub use config::Settings;
pub use error::{CatalogError, Result};
pub use legal_sets::LegalSetCache;
pub use models::{Card, CardSet, MarketplacePricing, Price, PriceSnapshot, SyncStats, UNKNOWN_STATUS};
pub use normalize::{normalize, normalize_many, RawCard};
pub use query::{CardSearch, QueryBuilder};
pub use service::CatalogService;
pub use store::{CardStore, InMemoryCardStore};
pub use upstream::{CatalogBackend, RestClient};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

// ---------------------------------------------------------------------------
// CatalogServiceBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CatalogService`].
///
/// Use [`CatalogService::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CatalogServiceBuilder::build).
///
/// Without an explicit [`backend`](Self::backend) the service talks to the
/// upstream REST API through a [`RestClient`] built from these settings.
#[derive(Default)]
pub struct CatalogServiceBuilder {
    settings: Settings,
    backend: Option<Arc<dyn CatalogBackend>>,
    store: Option<Arc<dyn CardStore>>,
    clock: Option<service::Clock>,
}

impl CatalogServiceBuilder {
    /// Replace all settings at once.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Load settings from the environment (see [`Settings::from_env`]).
    pub fn settings_from_env(self) -> Result<Self> {
        Ok(self.settings(Settings::from_env()?))
    }

    /// Set the upstream API key, sent as `X-Api-Key`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.api_key = Some(key.into());
        self
    }

    /// Point at a different API root (defaults to [`config::API_BASE`]).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// How long the standard-legal set list stays fresh. Defaults to 24 hours.
    pub fn freshness_window(mut self, window: chrono::Duration) -> Self {
        self.settings.freshness_window = window;
        self
    }

    /// Use a custom upstream backend instead of the REST client.
    pub fn backend<B: CatalogBackend + 'static>(mut self, backend: B) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Same as [`backend`](Self::backend) for an already shared backend.
    pub fn shared_backend(mut self, backend: Arc<dyn CatalogBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a store so synchronization can tell new cards from updated ones.
    pub fn store(mut self, store: Arc<dyn CardStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the clock used for cache freshness.
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> chrono::DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the service. Nothing is fetched until the first call.
    pub fn build(self) -> Result<CatalogService> {
        if self.settings.freshness_window < chrono::Duration::zero() {
            return Err(CatalogError::Config(
                "freshness window must not be negative".into(),
            ));
        }

        let backend: Arc<dyn CatalogBackend> = match self.backend {
            Some(backend) => backend,
            None => Arc::new(RestClient::from_settings(&self.settings)),
        };
        let clock: service::Clock = match self.clock {
            Some(clock) => clock,
            None => Arc::new(Utc::now),
        };

        Ok(CatalogService::new(
            backend,
            self.store,
            LegalSetCache::new(self.settings.freshness_window),
            clock,
        ))
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self
            .cached_standard_sets()
            .map(|ids| ids.len().to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "CatalogService(freshness_window={}h, cached_sets={})",
            self.freshness_window().num_hours(),
            cached
        )
    }
}
