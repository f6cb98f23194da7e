use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::legality::{deserialize_legalities, null_as_default, Legalities};
use super::price::MarketplacePricing;
use super::set::CardSet;
use crate::error::{CatalogError, Result};

// ---------------------------------------------------------------------------
// Card building blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: Vec<String>,
    pub converted_energy_cost: u32,
    pub damage: Option<String>,
    pub text: Option<String>,
}

/// A weakness or resistance, e.g. `{ "type": "Fire", "value": "×2" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Card: The canonical card record
// ---------------------------------------------------------------------------

/// Normalized card, independent of the upstream schema version.
///
/// The list-valued fields are always present; an empty `Vec` stands for
/// "upstream had nothing here".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub supertype: String,
    pub subtypes: Vec<String>,
    pub number: String,
    pub images: CardImages,
    pub set: CardSet,

    pub level: Option<String>,
    pub hp: Option<String>,
    pub types: Option<Vec<String>>,
    pub evolves_from: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evolves_to: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub abilities: Vec<Ability>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attacks: Vec<Attack>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<Effect>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resistances: Vec<Effect>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub retreat_cost: Vec<String>,
    pub rarity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_legalities")]
    pub legalities: Legalities,
    pub regulation_mark: Option<String>,
    pub tcgplayer: Option<MarketplacePricing>,

    // -- Metadata --
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_synced_at: DateTime<Utc>,
}

impl Card {
    /// `true` when the card's own `standard` legality reads "legal".
    pub fn is_standard_legal(&self) -> bool {
        super::legality::is_legal(&self.legalities, "standard")
    }

    pub fn has_pricing(&self) -> bool {
        self.tcgplayer.is_some()
    }

    /// The card as a plain JSON field mapping (camelCase keys).
    ///
    /// Feeding this back through [`normalize`](crate::normalize::normalize)
    /// yields an equal card.
    pub fn to_plain(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| CatalogError::internal("Failed to serialize card", e))
    }
}
