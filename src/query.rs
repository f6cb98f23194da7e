//! Upstream search query construction.
//!
//! The catalog accepts space-separated `field:value` clauses that are combined
//! by conjunction. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use ptcg_catalog::QueryBuilder;
//! let query = QueryBuilder::new()
//!     .where_eq("legalities.standard", "legal")
//!     .where_prefix("name", "Char")
//!     .build();
//! assert_eq!(query, "legalities.standard:legal name:Char*");
//! ```

/// Nested field holding a card's (or set's) standard-format legality.
pub const STANDARD_LEGALITY_FIELD: &str = "legalities.standard";

/// Builds upstream query strings clause by clause, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    clauses: Vec<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause: `{field}:{value}`.
    pub fn where_eq(&mut self, field: &str, value: &str) -> &mut Self {
        self.clauses.push(format!("{}:{}", field, quote(value, "")));
        self
    }

    /// Add a prefix-match clause: `{field}:{value}*`, or `{field}:"{value}*"`
    /// when the value has to be quoted.
    pub fn where_prefix(&mut self, field: &str, value: &str) -> &mut Self {
        self.clauses.push(format!("{}:{}", field, quote(value, "*")));
        self
    }

    /// Add the standard-legality clause.
    pub fn standard_legal(&mut self) -> &mut Self {
        self.where_eq(STANDARD_LEGALITY_FIELD, "legal")
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Join the clauses into the final query string. No clauses means an
    /// empty string, which matches everything upstream.
    pub fn build(&self) -> String {
        self.clauses.join(" ")
    }
}

/// Values with whitespace or quotes must be double-quoted in the upstream
/// grammar, with embedded quotes escaped. `suffix` (a wildcard) goes inside
/// the quotes.
fn quote(value: &str, suffix: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}{}\"", value.replace('"', "\\\""), suffix)
    } else {
        format!("{}{}", value, suffix)
    }
}

// ---------------------------------------------------------------------------
// CardSearch
// ---------------------------------------------------------------------------

/// Criteria for [`CatalogService::search_cards`](crate::CatalogService::search_cards).
///
/// All filters are optional; an omitted filter contributes no clause.
/// `standard_legal` defaults to `true`.
#[derive(Debug, Clone)]
pub struct CardSearch {
    pub name: Option<String>,
    pub card_type: Option<String>,
    pub supertype: Option<String>,
    pub rarity: Option<String>,
    pub set_name: Option<String>,
    pub standard_legal: bool,
}

impl Default for CardSearch {
    fn default() -> Self {
        Self {
            name: None,
            card_type: None,
            supertype: None,
            rarity: None,
            set_name: None,
            standard_legal: true,
        }
    }
}

impl CardSearch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    pub fn supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    pub fn rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    pub fn standard_legal(mut self, standard_legal: bool) -> Self {
        self.standard_legal = standard_legal;
        self
    }

    /// Clauses in fixed order: legality, name prefix, type, supertype,
    /// rarity, set name. Empty-string filters are treated as omitted.
    pub fn to_query(&self) -> QueryBuilder {
        let mut qb = QueryBuilder::new();

        if self.standard_legal {
            qb.standard_legal();
        }
        if let Some(name) = non_empty(&self.name) {
            qb.where_prefix("name", name);
        }
        if let Some(card_type) = non_empty(&self.card_type) {
            qb.where_eq("types", card_type);
        }
        if let Some(supertype) = non_empty(&self.supertype) {
            qb.where_eq("supertype", supertype);
        }
        if let Some(rarity) = non_empty(&self.rarity) {
            qb.where_eq("rarity", rarity);
        }
        if let Some(set_name) = non_empty(&self.set_name) {
            qb.where_eq("set.name", set_name);
        }

        qb
    }

    pub fn build_query(&self) -> String {
        self.to_query().build()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
