//! The catalog engine: card lookups and searches, the standard-legal set
//! cache, and full standard-catalog synchronization.
//!
//! Every upstream call runs on the blocking thread pool via
//! [`tokio::task::spawn_blocking`] and is awaited, so a slow catalog never
//! stalls sibling requests on the async executor. Normalization and query
//! building happen inline.
//!
//! # Example
//!
//! ```no_run
//! use ptcg_catalog::{CardSearch, CatalogService};
//!
//! #[tokio::main]
//! async fn main() -> ptcg_catalog::Result<()> {
//!     let service = CatalogService::builder().api_key("secret").build()?;
//!
//!     let card = service.get_card_by_id("sv1-25").await?;
//!     let hits = service
//!         .search_cards(&CardSearch::default().name("Char"))
//!         .await?;
//!     let stats = service.sync_standard_cards().await?;
//!     Ok(())
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::legal_sets::LegalSetCache;
use crate::models::{Card, PriceSnapshot, SyncStats};
use crate::normalize::{normalize, normalize_many};
use crate::query::{CardSearch, QueryBuilder};
use crate::store::CardStore;
use crate::upstream::CatalogBackend;

/// Source of "now" for cache freshness checks.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Card counts for one synchronized set.
#[derive(Debug, Default)]
struct SetOutcome {
    processed: usize,
    added: usize,
    updated: usize,
}

impl SetOutcome {
    fn tally_into(&self, stats: &mut SyncStats) {
        stats.total_cards_processed += self.processed;
        stats.new_cards_added += self.added;
        stats.cards_updated += self.updated;
    }
}

/// A set that failed partway. `written` holds the cards that reached the
/// store before `error`.
#[derive(Debug)]
struct SetFailure {
    written: SetOutcome,
    error: CatalogError,
}

impl From<CatalogError> for SetFailure {
    fn from(error: CatalogError) -> Self {
        Self {
            written: SetOutcome::default(),
            error,
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogService
// ---------------------------------------------------------------------------

/// Async front door to the upstream catalog.
///
/// Created via [`CatalogService::builder()`]. Each instance owns its own
/// legal-set cache; instances don't coordinate with each other.
///
/// The cache sits behind a [`Mutex`] held only to read or to replace it,
/// never while an upstream call is in flight. Two callers that both find the
/// cache stale will both refresh it and the later write wins; refreshes are
/// idempotent, so either result is correct.
pub struct CatalogService {
    backend: Arc<dyn CatalogBackend>,
    store: Option<Arc<dyn CardStore>>,
    legal_sets: Mutex<LegalSetCache>,
    clock: Clock,
}

impl CatalogService {
    /// Create a new builder for configuring the service.
    pub fn builder() -> crate::CatalogServiceBuilder {
        crate::CatalogServiceBuilder::default()
    }

    pub(crate) fn new(
        backend: Arc<dyn CatalogBackend>,
        store: Option<Arc<dyn CardStore>>,
        cache: LegalSetCache,
        clock: Clock,
    ) -> Self {
        Self {
            backend,
            store,
            legal_sets: Mutex::new(cache),
            clock,
        }
    }

    /// Run a backend operation on the blocking thread pool.
    async fn upstream<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn CatalogBackend) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || f(backend.as_ref()))
            .await
            .map_err(|e| CatalogError::internal("Upstream task failed", e))?
    }

    fn cache(&self) -> Result<MutexGuard<'_, LegalSetCache>> {
        self.legal_sets
            .lock()
            .map_err(|_| CatalogError::Internal("Legal set cache lock poisoned".into()))
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    // -- Lookups -----------------------------------------------------------

    /// Fetch one card by id.
    ///
    /// Fails with [`CatalogError::NotFound`] when upstream has no such card.
    pub async fn get_card_by_id(&self, id: &str) -> Result<Card> {
        let card_id = id.to_string();
        let raw = self.upstream(move |b| b.find_card(&card_id)).await?;
        normalize(raw)
    }

    /// Every card whose standard legality is "legal". Bypasses the set cache.
    pub async fn get_standard_legal_cards(&self) -> Result<Vec<Card>> {
        let query = QueryBuilder::new().standard_legal().build();
        self.search(query).await
    }

    /// All cards printed in `set_id`, in upstream order.
    pub async fn get_cards_by_set(&self, set_id: &str) -> Result<Vec<Card>> {
        let query = QueryBuilder::new().where_eq("set.id", set_id).build();
        self.search(query).await
    }

    /// Search with optional criteria; see [`CardSearch`] for clause order.
    pub async fn search_cards(&self, criteria: &CardSearch) -> Result<Vec<Card>> {
        self.search(criteria.build_query()).await
    }

    async fn search(&self, query: String) -> Result<Vec<Card>> {
        debug!("Searching cards: '{}'", query);
        let raws = self.upstream(move |b| b.search_cards(&query)).await?;
        normalize_many(raws)
    }

    // -- Standard-legal sets -----------------------------------------------

    /// Ids of the standard-legal sets, served from cache while fresh.
    pub async fn get_standard_sets(&self) -> Result<Vec<String>> {
        {
            let cache = self.cache()?;
            if let Some(ids) = cache.get(self.now()) {
                return Ok(ids.to_vec());
            }
        }

        let query = QueryBuilder::new().standard_legal().build();
        let sets = self.upstream(move |b| b.search_sets(&query)).await?;
        let ids = sets
            .into_iter()
            .enumerate()
            .map(|(i, set)| {
                set.id.ok_or_else(|| {
                    CatalogError::Validation(format!("missing required field `id` on set #{}", i))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Refreshed standard-legal sets: {} sets", ids.len());
        self.cache()?.store(ids.clone(), self.now());
        Ok(ids)
    }

    /// The cached set ids regardless of freshness, without touching upstream.
    pub fn cached_standard_sets(&self) -> Option<Vec<String>> {
        self.cache().ok()?.peek().map(|ids| ids.to_vec())
    }

    /// Drop the cached set ids so the next read refreshes.
    pub fn invalidate_standard_sets(&self) -> Result<()> {
        self.cache()?.invalidate();
        Ok(())
    }

    // -- Synchronization ---------------------------------------------------

    /// Walk every standard-legal set and count its cards.
    ///
    /// A set whose cards cannot be fetched (or stored) is recorded in
    /// [`SyncStats::errors`] and skipped; the run carries on with the next
    /// set. Failing to obtain the set list itself aborts the run with
    /// [`CatalogError::Upstream`].
    ///
    /// When the store rejects a card partway through a set, the cards already
    /// written still count as new or updated, and every card fetched from
    /// that set counts as processed.
    ///
    /// With a [`CardStore`] configured, standard-legal cards already in the
    /// store count as updated and the rest as new. Without one, every
    /// standard-legal card counts as new.
    pub async fn sync_standard_cards(&self) -> Result<SyncStats> {
        let set_ids = self.get_standard_sets().await.map_err(|e| {
            if e.is_upstream() {
                e
            } else {
                CatalogError::upstream(None, format!("Error fetching standard sets: {}", e))
            }
        })?;

        let mut stats = SyncStats::default();
        for set_id in &set_ids {
            match self.sync_set(set_id).await {
                Ok(outcome) => outcome.tally_into(&mut stats),
                Err(failure) => {
                    warn!("Skipping set {}: {}", set_id, failure.error);
                    failure.written.tally_into(&mut stats);
                    stats.record_set_failure(set_id, &failure.error);
                }
            }
        }

        info!(
            "Sync finished: {} cards over {} sets, {} new, {} updated, {} failed sets",
            stats.total_cards_processed,
            set_ids.len(),
            stats.new_cards_added,
            stats.cards_updated,
            stats.errors.len()
        );
        Ok(stats)
    }

    async fn sync_set(&self, set_id: &str) -> std::result::Result<SetOutcome, SetFailure> {
        let cards = self.get_cards_by_set(set_id).await?;
        let processed = cards.len();
        let legal: Vec<Card> = cards.into_iter().filter(Card::is_standard_legal).collect();

        let Some(store) = self.store.clone() else {
            return Ok(SetOutcome {
                processed,
                added: legal.len(),
                updated: 0,
            });
        };

        tokio::task::spawn_blocking(move || -> std::result::Result<SetOutcome, SetFailure> {
            let mut outcome = SetOutcome {
                processed,
                ..SetOutcome::default()
            };
            for card in &legal {
                if let Err(error) = write_card(store.as_ref(), card, &mut outcome) {
                    return Err(SetFailure {
                        written: outcome,
                        error,
                    });
                }
            }
            Ok(outcome)
        })
        .await
        .map_err(|e| SetFailure::from(CatalogError::internal("Card store task failed", e)))?
    }

    // -- Pricing -----------------------------------------------------------

    /// Current marketplace prices for a card, or `None` when the card has no
    /// pricing block. Any failure fetching the card is an internal error.
    pub async fn get_card_price_history(&self, id: &str) -> Result<Option<PriceSnapshot>> {
        let card = self
            .get_card_by_id(id)
            .await
            .map_err(|e| CatalogError::internal("Error fetching price history", e))?;

        Ok(card.tcgplayer.map(|pricing| PriceSnapshot {
            card_id: id.to_string(),
            current_prices: pricing.prices,
            last_updated: pricing.updated_at,
        }))
    }

    /// The freshness window applied to the set cache.
    pub fn freshness_window(&self) -> chrono::Duration {
        self.cache()
            .map(|c| c.freshness_window())
            .unwrap_or_else(|_| crate::config::default_freshness_window())
    }
}

/// Upsert one card, counting it once the store has accepted it.
fn write_card(store: &dyn CardStore, card: &Card, outcome: &mut SetOutcome) -> Result<()> {
    let existed = store.contains(&card.id)?;
    store.upsert(card)?;
    if existed {
        outcome.updated += 1;
    } else {
        outcome.added += 1;
    }
    Ok(())
}
