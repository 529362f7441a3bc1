//! In-memory implementation of CashCardStore for testing and development

use crate::core::query::{Page, PageSpec, SortSpec};
use crate::core::record::CashCard;
use crate::core::store::{CardFilter, CashCardStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory cash card store
///
/// Uses RwLock for thread-safe access. Ids come from a monotonically
/// increasing sequence that always stays ahead of every stored id.
#[derive(Clone)]
pub struct InMemoryCashCardStore {
    cards: Arc<RwLock<HashMap<i64, CashCard>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryCashCardStore {
    /// Create an empty store whose first id will be 1
    pub fn new() -> Self {
        Self {
            cards: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Create a store pre-loaded with cards
    ///
    /// Cards without an id are assigned one after all explicit ids.
    pub fn with_cards(cards: impl IntoIterator<Item = CashCard>) -> Self {
        let cards: Vec<CashCard> = cards.into_iter().collect();
        let next_id = cards
            .iter()
            .filter_map(|c| c.id)
            .max()
            .map_or(1, |max| max + 1);

        let store = Self {
            cards: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(next_id)),
        };

        // Lock is fresh and uncontended here
        if let Ok(mut map) = store.cards.write() {
            for mut card in cards {
                let id = match card.id {
                    Some(id) => id,
                    None => store.next_id.fetch_add(1, Ordering::SeqCst),
                };
                card.id = Some(id);
                map.insert(id, card);
            }
        }

        store
    }

    pub fn len(&self) -> Result<usize> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cards.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryCashCardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CashCardStore for InMemoryCashCardStore {
    async fn get(&self, id: i64) -> Result<Option<CashCard>> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cards.get(&id).cloned())
    }

    async fn get_page(
        &self,
        filter: &CardFilter,
        page: &PageSpec,
        sort: &SortSpec,
    ) -> Result<Page<CashCard>> {
        let mut matching: Vec<CashCard> = {
            let cards = self
                .cards
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

            cards
                .values()
                .filter(|card| filter.matches(card))
                .cloned()
                .collect()
        };

        matching.sort_by(|a, b| sort.compare(a, b));

        Ok(Page::from_sorted(matching, *page))
    }

    async fn exists(&self, filter: &CardFilter) -> Result<bool> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(match filter.id {
            Some(id) => cards.get(&id).is_some_and(|card| filter.matches(card)),
            None => cards.values().any(|card| filter.matches(card)),
        })
    }

    async fn save(&self, mut card: CashCard) -> Result<CashCard> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = match card.id {
            Some(id) => {
                self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        card.id = Some(id);

        cards.insert(id, card.clone());

        Ok(card)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        cards.remove(&id);

        Ok(())
    }
}
