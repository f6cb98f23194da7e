//! Record shapes as the upstream catalog sends them.
//!
//! Every field is optional here: the upstream schema is versioned
//! independently and omits whatever a given card doesn't have. Turning these
//! into canonical models (and rejecting records that lack required fields) is
//! the job of [`crate::normalize`].

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCard {
    pub id: Option<String>,
    pub name: Option<String>,
    pub supertype: Option<String>,
    pub subtypes: Option<Vec<String>>,
    pub level: Option<String>,
    pub hp: Option<String>,
    pub types: Option<Vec<String>>,
    pub evolves_from: Option<String>,
    pub evolves_to: Option<Vec<String>>,
    pub rules: Option<Vec<String>>,
    pub abilities: Option<Vec<ApiAbility>>,
    pub attacks: Option<Vec<ApiAttack>>,
    pub weaknesses: Option<Vec<ApiEffect>>,
    pub resistances: Option<Vec<ApiEffect>>,
    pub retreat_cost: Option<Vec<String>>,
    pub set: Option<ApiSet>,
    pub number: Option<String>,
    pub rarity: Option<String>,
    pub legalities: Option<BTreeMap<String, Option<String>>>,
    pub regulation_mark: Option<String>,
    pub images: Option<ApiImages>,
    pub tcgplayer: Option<ApiTcgPlayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSet {
    pub id: Option<String>,
    pub name: Option<String>,
    pub series: Option<String>,
    pub printed_total: Option<u32>,
    pub total: Option<u32>,
    pub legalities: Option<BTreeMap<String, Option<String>>>,
    pub ptcgo_code: Option<String>,
    pub release_date: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiImages {
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAbility {
    pub name: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAttack {
    pub name: Option<String>,
    pub cost: Option<Vec<String>>,
    pub converted_energy_cost: Option<u32>,
    pub damage: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEffect {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTcgPlayer {
    pub url: Option<String>,
    pub updated_at: Option<String>,
    pub prices: Option<BTreeMap<String, Option<ApiPrice>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPrice {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    pub market: Option<f64>,
    pub direct_low: Option<f64>,
}

/// One page of a search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    pub total_count: Option<usize>,
}

/// Body of a single-record response (`/cards/{id}`).
#[derive(Debug, Deserialize)]
pub(crate) struct Single {
    pub data: serde_json::Value,
}
