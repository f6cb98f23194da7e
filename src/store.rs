//! Persistence seam used by catalog synchronization to tell new cards from
//! updated ones.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CatalogError, Result};
use crate::models::Card;

/// Where synchronized cards end up.
///
/// Implementations may block; the service always calls them from the
/// blocking pool.
pub trait CardStore: Send + Sync {
    /// Whether a card with this id is already stored.
    fn contains(&self, id: &str) -> Result<bool>;

    /// Insert the card, or replace the stored card with the same id.
    fn upsert(&self, card: &Card) -> Result<()>;
}

/// Process-local [`CardStore`] keyed by card id.
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    cards: RwLock<HashMap<String, Card>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Result<Option<Card>> {
        Ok(self.read()?.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Card>>> {
        self.cards
            .read()
            .map_err(|_| CatalogError::Internal("Card store lock poisoned".into()))
    }
}

impl CardStore for InMemoryCardStore {
    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    fn upsert(&self, card: &Card) -> Result<()> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| CatalogError::Internal("Card store lock poisoned".into()))?;
        match cards.get_mut(&card.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = card.clone();
                existing.created_at = created_at;
            }
            None => {
                cards.insert(card.id.clone(), card.clone());
            }
        }
        Ok(())
    }
}
