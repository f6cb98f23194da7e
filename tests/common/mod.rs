//! Shared test fixtures for the catalog integration tests.
//!
//! Provides upstream-shaped JSON records and [`FakeBackend`], an in-memory
//! [`CatalogBackend`] that records every query it receives.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use ptcg_catalog::upstream::{ApiCard, ApiSet};
use ptcg_catalog::{CatalogBackend, CatalogError, Result};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Upstream-shaped records
// ---------------------------------------------------------------------------

pub fn set_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Set {}", id),
        "series": "Scarlet & Violet",
        "printedTotal": 198,
        "total": 258,
        "legalities": {"unlimited": "Legal", "standard": "Legal", "expanded": "Legal"},
        "ptcgoCode": "SVI",
        "releaseDate": "2023/03/31",
        "updatedAt": "2023/03/31 15:00:00",
        "images": {
            "symbol": "https://images.pokemontcg.io/sv1/symbol.png",
            "logo": "https://images.pokemontcg.io/sv1/logo.png"
        }
    })
}

/// A fully populated card record, standard-legal or not.
pub fn card_json(id: &str, set_id: &str, standard_legal: bool) -> Value {
    let standard = if standard_legal { json!("Legal") } else { json!("Banned") };
    json!({
        "id": id,
        "name": "Charmander",
        "supertype": "Pokémon",
        "subtypes": ["Basic"],
        "hp": "70",
        "types": ["Fire"],
        "evolvesTo": ["Charmeleon"],
        "attacks": [
            {
                "name": "Ember",
                "cost": ["Fire", "Colorless"],
                "convertedEnergyCost": 2,
                "damage": "30",
                "text": "Discard an Energy from this Pokémon."
            }
        ],
        "weaknesses": [{"type": "Water", "value": "×2"}],
        "retreatCost": ["Colorless"],
        "convertedRetreatCost": 1,
        "set": set_json(set_id),
        "number": "4",
        "artist": "Teeziro",
        "rarity": "Common",
        "nationalPokedexNumbers": [4],
        "legalities": {"unlimited": "Legal", "standard": standard, "expanded": "Legal"},
        "regulationMark": "G",
        "images": {
            "small": format!("https://images.pokemontcg.io/{}/4.png", set_id),
            "large": format!("https://images.pokemontcg.io/{}/4_hires.png", set_id)
        },
        "tcgplayer": {
            "url": format!("https://prices.pokemontcg.io/tcgplayer/{}", id),
            "updatedAt": "2024/03/01",
            "prices": {
                "normal": {"low": 0.05, "mid": 0.2, "high": 2.5, "market": 0.15, "directLow": null},
                "reverseHolofoil": null
            }
        }
    })
}

/// The smallest record that satisfies every required field.
pub fn minimal_card_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Potion",
        "supertype": "Trainer",
        "subtypes": ["Item"],
        "number": "188",
        "set": set_json("sv1"),
        "images": {
            "small": "https://images.pokemontcg.io/sv1/188.png",
            "large": "https://images.pokemontcg.io/sv1/188_hires.png"
        }
    })
}

pub fn api_card(value: Value) -> ApiCard {
    serde_json::from_value(value).unwrap()
}

pub fn api_set(value: Value) -> ApiSet {
    serde_json::from_value(value).unwrap()
}

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

// ---------------------------------------------------------------------------
// FakeBackend
// ---------------------------------------------------------------------------

/// In-memory catalog. Cards are grouped by their `set.id`; sets listed in
/// `failing_sets` answer card searches with an upstream fault.
#[derive(Default)]
pub struct FakeBackend {
    pub cards: Vec<Value>,
    pub sets: Vec<Value>,
    pub failing_sets: HashSet<String>,
    pub fail_set_search: bool,
    pub card_queries: Mutex<Vec<String>>,
    pub set_queries: Mutex<Vec<String>>,
    pub find_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// One standard set per id, each holding `counts[i]` standard-legal cards.
    pub fn with_sets(ids: &[&str], counts: &[usize]) -> Self {
        let mut backend = Self::new();
        for (set_id, count) in ids.iter().zip(counts) {
            backend.sets.push(set_json(set_id));
            for n in 0..*count {
                backend
                    .cards
                    .push(card_json(&format!("{}-{}", set_id, n + 1), set_id, true));
            }
        }
        backend
    }

    pub fn failing(mut self, set_id: &str) -> Self {
        self.failing_sets.insert(set_id.to_string());
        self
    }

    pub fn set_search_count(&self) -> usize {
        self.set_queries.lock().unwrap().len()
    }

    pub fn last_card_query(&self) -> Option<String> {
        self.card_queries.lock().unwrap().last().cloned()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl CatalogBackend for FakeBackend {
    fn find_card(&self, id: &str) -> Result<ApiCard> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.cards
            .iter()
            .find(|c| c["id"] == id)
            .map(|c| api_card(c.clone()))
            .ok_or_else(|| CatalogError::NotFound(format!("Card '{}' not found", id)))
    }

    fn search_cards(&self, query: &str) -> Result<Vec<ApiCard>> {
        self.card_queries.lock().unwrap().push(query.to_string());

        if let Some(set_id) = query.strip_prefix("set.id:") {
            if self.failing_sets.contains(set_id) {
                return Err(CatalogError::upstream(
                    Some(500),
                    format!("Internal Server Error while listing {}", set_id),
                ));
            }
            return Ok(self
                .cards
                .iter()
                .filter(|c| c["set"]["id"] == set_id)
                .map(|c| api_card(c.clone()))
                .collect());
        }

        Ok(self.cards.iter().map(|c| api_card(c.clone())).collect())
    }

    fn search_sets(&self, query: &str) -> Result<Vec<ApiSet>> {
        self.set_queries.lock().unwrap().push(query.to_string());
        if self.fail_set_search {
            return Err(CatalogError::upstream(Some(503), "Service Unavailable"));
        }
        Ok(self.sets.iter().map(|s| api_set(s.clone())).collect())
    }
}
