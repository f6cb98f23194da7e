use serde::{Deserialize, Serialize};

use super::legality::{deserialize_legalities, Legalities};

// ---------------------------------------------------------------------------
// CardSet: The expansion a card was printed in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub id: String,
    pub name: String,
    pub series: String,
    pub printed_total: u32,
    pub total: u32,
    #[serde(default, deserialize_with = "deserialize_legalities")]
    pub legalities: Legalities,
    pub ptcgo_code: Option<String>,
    pub release_date: String,
    pub updated_at: String,
}
