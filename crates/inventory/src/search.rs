//! Search strategies over normalized inventory items.

use core::convert::Infallible;
use core::str::FromStr;

use crate::item::InventoryItem;

/// Which field(s) a free-text term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    /// `invoice` contains the term.
    Sku,
    /// Any compatible car's brand or model contains the term.
    Name,
    /// `retailName` contains the term.
    RetailName,
    /// No filtering.
    All,
}

impl SearchStrategy {
    /// Parse a wire value. Unrecognized values mean "no filter".
    pub fn parse(value: &str) -> Self {
        match value {
            "sku" => SearchStrategy::Sku,
            "name" => SearchStrategy::Name,
            "retailName" => SearchStrategy::RetailName,
            _ => SearchStrategy::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::Sku => "sku",
            SearchStrategy::Name => "name",
            SearchStrategy::RetailName => "retailName",
            SearchStrategy::All => "all",
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl core::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A case-insensitive substring search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    strategy: SearchStrategy,
    needle: String,
}

impl InventoryQuery {
    pub fn new(strategy: SearchStrategy, term: &str) -> Self {
        Self {
            strategy,
            needle: term.to_lowercase(),
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self.strategy {
            SearchStrategy::Sku => self.contains(&item.invoice),
            SearchStrategy::Name => item
                .compatibility_cars
                .iter()
                .any(|car| self.contains(&car.brand) || self.contains(&car.model)),
            SearchStrategy::RetailName => self.contains(&item.retail_name),
            SearchStrategy::All => true,
        }
    }

    /// Keep matching items, preserving their order.
    pub fn apply(&self, items: Vec<InventoryItem>) -> Vec<InventoryItem> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }

    fn contains(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}
