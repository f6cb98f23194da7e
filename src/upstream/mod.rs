//! The remote catalog as seen by this crate: a find-by-id and two filtered
//! searches, plus the record shapes they return.
//!
//! [`CatalogBackend`] is synchronous. Callers in async code must not invoke
//! it directly; [`CatalogService`](crate::service::CatalogService) moves each
//! call onto the blocking pool.

pub mod records;
pub mod rest;

pub use records::{ApiAbility, ApiAttack, ApiCard, ApiEffect, ApiImages, ApiPrice, ApiSet, ApiTcgPlayer};
pub use rest::RestClient;

use crate::error::Result;

/// Upstream catalog operations.
///
/// Query strings use the upstream grammar: space-separated `field:value`
/// clauses, see [`QueryBuilder`](crate::query::QueryBuilder).
pub trait CatalogBackend: Send + Sync {
    /// Fetch one card. Must fail with [`CatalogError::NotFound`](crate::CatalogError::NotFound)
    /// when upstream has no card with that id.
    fn find_card(&self, id: &str) -> Result<ApiCard>;

    /// All cards matching `query`, in upstream order.
    fn search_cards(&self, query: &str) -> Result<Vec<ApiCard>>;

    /// All sets matching `query`, in upstream order.
    fn search_sets(&self, query: &str) -> Result<Vec<ApiSet>>;
}
