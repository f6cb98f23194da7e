//! Record normalization: upstream records (or plain JSON mappings) into
//! canonical [`Card`]s.
//!
//! Foreign records go through an explicit adapter per record shape. Required
//! fields are checked here and reported by their dotted path (`set.id`,
//! `images.large`, `attacks[2].name`); list fields absent upstream become empty
//! `Vec`s; missing legality statuses become
//! [`UNKNOWN_STATUS`](crate::models::UNKNOWN_STATUS); price tiers
//! upstream left `null` stay `None`.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::error::{CatalogError, Result};
use crate::models::legality::fill_unknown;
use crate::models::{
    Ability, Attack, Card, CardImages, CardSet, Effect, Legalities, MarketplacePricing, Price,
};
use crate::upstream::{ApiAbility, ApiAttack, ApiCard, ApiEffect, ApiPrice, ApiSet, ApiTcgPlayer};

/// Input to the normalizer.
#[derive(Debug, Clone)]
pub enum RawCard {
    /// A record as returned by the upstream catalog.
    Foreign(ApiCard),
    /// A plain field mapping, e.g. the output of [`Card::to_plain`].
    Plain(serde_json::Value),
}

impl From<ApiCard> for RawCard {
    fn from(card: ApiCard) -> Self {
        RawCard::Foreign(card)
    }
}

impl From<serde_json::Value> for RawCard {
    fn from(value: serde_json::Value) -> Self {
        RawCard::Plain(value)
    }
}

/// Normalize one record, stamping metadata with the current time.
pub fn normalize(raw: impl Into<RawCard>) -> Result<Card> {
    normalize_at(raw, Utc::now())
}

/// Normalize one record, stamping metadata with `now`.
///
/// Plain mappings keep whatever timestamps they carry; `now` only fills
/// timestamps a foreign record cannot have.
pub fn normalize_at(raw: impl Into<RawCard>, now: DateTime<Utc>) -> Result<Card> {
    match raw.into() {
        RawCard::Foreign(card) => from_api_card(card, now),
        RawCard::Plain(value) => {
            serde_json::from_value(value).map_err(|e| CatalogError::Validation(e.to_string()))
        }
    }
}

/// Normalize a batch in input order. The first failing record fails the
/// whole batch.
pub fn normalize_many<I, R>(raws: I) -> Result<Vec<Card>>
where
    I: IntoIterator<Item = R>,
    R: Into<RawCard>,
{
    let now = Utc::now();
    raws.into_iter().map(|raw| normalize_at(raw, now)).collect()
}

// ---------------------------------------------------------------------------
// Foreign adapters
// ---------------------------------------------------------------------------

fn from_api_card(card: ApiCard, now: DateTime<Utc>) -> Result<Card> {
    let images = required(card.images, "images")?;
    let set = required(card.set, "set")?;

    Ok(Card {
        id: required(card.id, "id")?,
        name: required(card.name, "name")?,
        supertype: required(card.supertype, "supertype")?,
        subtypes: required(card.subtypes, "subtypes")?,
        number: required(card.number, "number")?,
        images: CardImages {
            small: required(images.small, "images.small")?,
            large: required(images.large, "images.large")?,
        },
        set: from_api_set(set, "set.")?,
        level: card.level,
        hp: card.hp,
        types: card.types,
        evolves_from: card.evolves_from,
        evolves_to: card.evolves_to.unwrap_or_default(),
        rules: card.rules.unwrap_or_default(),
        abilities: indexed(card.abilities, "abilities", from_api_ability)?,
        attacks: indexed(card.attacks, "attacks", from_api_attack)?,
        weaknesses: indexed(card.weaknesses, "weaknesses", from_api_effect)?,
        resistances: indexed(card.resistances, "resistances", from_api_effect)?,
        retreat_cost: card.retreat_cost.unwrap_or_default(),
        rarity: card.rarity,
        legalities: legalities(card.legalities),
        regulation_mark: card.regulation_mark,
        tcgplayer: card.tcgplayer.map(from_api_tcgplayer).transpose()?,
        created_at: now,
        updated_at: now,
        last_synced_at: now,
    })
}

/// Convert an upstream set. `prefix` is prepended to field names in errors
/// (`"set."` when the set is embedded in a card, `""` for a standalone set).
pub fn from_api_set(set: ApiSet, prefix: &str) -> Result<CardSet> {
    let field = |name: &str| format!("{prefix}{name}");
    Ok(CardSet {
        id: required(set.id, &field("id"))?,
        name: required(set.name, &field("name"))?,
        series: required(set.series, &field("series"))?,
        printed_total: required(set.printed_total, &field("printedTotal"))?,
        total: required(set.total, &field("total"))?,
        legalities: legalities(set.legalities),
        ptcgo_code: set.ptcgo_code,
        release_date: required(set.release_date, &field("releaseDate"))?,
        updated_at: required(set.updated_at, &field("updatedAt"))?,
    })
}

fn from_api_ability(ability: ApiAbility, path: &str) -> Result<Ability> {
    Ok(Ability {
        name: required(ability.name, &format!("{path}.name"))?,
        text: required(ability.text, &format!("{path}.text"))?,
        kind: ability.kind,
    })
}

fn from_api_attack(attack: ApiAttack, path: &str) -> Result<Attack> {
    let cost = attack.cost.unwrap_or_default();
    let converted_energy_cost = attack
        .converted_energy_cost
        .unwrap_or(cost.len() as u32);
    Ok(Attack {
        name: required(attack.name, &format!("{path}.name"))?,
        cost,
        converted_energy_cost,
        damage: attack.damage,
        text: attack.text,
    })
}

fn from_api_effect(effect: ApiEffect, path: &str) -> Result<Effect> {
    Ok(Effect {
        kind: required(effect.kind, &format!("{path}.type"))?,
        value: required(effect.value, &format!("{path}.value"))?,
    })
}

fn from_api_tcgplayer(tcg: ApiTcgPlayer) -> Result<MarketplacePricing> {
    let prices = tcg
        .prices
        .unwrap_or_default()
        .into_iter()
        .map(|(tier, price)| (tier, price.map(from_api_price)))
        .collect();

    Ok(MarketplacePricing {
        url: required(tcg.url, "tcgplayer.url")?,
        updated_at: required(tcg.updated_at, "tcgplayer.updatedAt")?,
        prices,
    })
}

fn from_api_price(price: ApiPrice) -> Price {
    Price {
        low: price.low,
        mid: price.mid,
        high: price.high,
        market: price.market,
        direct_low: price.direct_low,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| CatalogError::Validation(format!("missing required field `{}`", field)))
}

/// Convert each element of an optional list, naming failures `{field}[{i}]`.
fn indexed<A, B>(
    items: Option<Vec<A>>,
    field: &str,
    convert: fn(A, &str) -> Result<B>,
) -> Result<Vec<B>> {
    items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, item)| convert(item, &format!("{field}[{i}]")))
        .collect()
}

fn legalities(raw: Option<BTreeMap<String, Option<String>>>) -> Legalities {
    fill_unknown(raw.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_names_field() {
        let err = required::<String>(None, "set.id").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: missing required field `set.id`");
    }

    #[test]
    fn attack_cost_is_derived_when_absent() {
        let attack = ApiAttack {
            name: Some("Ember".into()),
            cost: Some(vec!["Fire".into(), "Colorless".into()]),
            ..Default::default()
        };
        let attack = from_api_attack(attack, "attacks[0]").unwrap();
        assert_eq!(attack.converted_energy_cost, 2);
    }

    #[test]
    fn effect_missing_value_reports_index() {
        let effect = ApiEffect {
            kind: Some("Water".into()),
            value: None,
        };
        let err = indexed(Some(vec![effect]), "weaknesses", from_api_effect).unwrap_err();
        assert!(err.to_string().contains("weaknesses[0].value"));
    }
}
