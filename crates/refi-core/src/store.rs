//! Persistence of the offer list behind an injected key-value store.

use std::collections::HashMap;

use tracing::warn;

use crate::comparison::{default_offers, Offer};
use crate::error::RefiError;
use crate::RefiResult;

/// Key the offer list is stored under.
pub const OFFERS_KEY: &str = "mortgage-banks";

/// String-valued key-value storage (browser local storage, a directory of
/// files, an in-memory map).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> RefiResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> RefiResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> RefiResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> RefiResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The editable list of offers under comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferBook {
    offers: Vec<Offer>,
}

impl Default for OfferBook {
    fn default() -> Self {
        Self {
            offers: default_offers(),
        }
    }
}

impl OfferBook {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }

    /// Loads the saved list. A missing or undecodable entry yields the
    /// default offers; only a failing store is an error.
    pub fn load(store: &impl KeyValueStore) -> RefiResult<Self> {
        let Some(raw) = store.get(OFFERS_KEY)? else {
            return Ok(Self::default());
        };
        match serde_json::from_str::<Vec<Offer>>(&raw) {
            Ok(offers) => Ok(Self { offers }),
            Err(e) => {
                warn!(key = OFFERS_KEY, error = %e, "stored offers unreadable, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> RefiResult<()> {
        let raw = serde_json::to_string(&self.offers)?;
        store.set(OFFERS_KEY, &raw)
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn get(&self, index: usize) -> RefiResult<&Offer> {
        self.offers.get(index).ok_or_else(|| self.out_of_range(index))
    }

    pub fn push(&mut self, offer: Offer) {
        self.offers.push(offer);
    }

    /// Appends a new option seeded from the first offer.
    pub fn add_option(&mut self) -> &Offer {
        let offer = Offer::new_option(self.offers.len() + 1, self.offers.first());
        self.offers.push(offer);
        &self.offers[self.offers.len() - 1]
    }

    pub fn remove(&mut self, index: usize) -> RefiResult<Offer> {
        if index >= self.offers.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.offers.remove(index))
    }

    pub fn replace(&mut self, index: usize, offer: Offer) -> RefiResult<()> {
        let slot = self
            .offers
            .get_mut(index)
            .ok_or_else(|| RefiError::invalid("index", format!("no offer at index {index}")))?;
        *slot = offer;
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> RefiError {
        RefiError::invalid(
            "index",
            format!("no offer at index {index} ({} stored)", self.offers.len()),
        )
    }
}
