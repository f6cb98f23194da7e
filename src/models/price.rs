use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Price: One marketplace price tier (e.g. "holofoil", "normal")
// ---------------------------------------------------------------------------

/// Each component is `None` when the marketplace has no listing for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    pub market: Option<f64>,
    pub direct_low: Option<f64>,
}

// ---------------------------------------------------------------------------
// MarketplacePricing: TCGplayer pricing block attached to a card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplacePricing {
    pub url: String,
    pub updated_at: String,
    /// Tier label -> price. A `None` tier means "no listing at that tier".
    #[serde(default)]
    pub prices: BTreeMap<String, Option<Price>>,
}

// ---------------------------------------------------------------------------
// PriceSnapshot: Current pricing for one card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub card_id: String,
    pub current_prices: BTreeMap<String, Option<Price>>,
    pub last_updated: String,
}
