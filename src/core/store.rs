//! Storage abstraction for cash cards
//!
//! The service never talks to a concrete backend. Anything that can do keyed
//! reads, filtered paged queries, existence checks, saves and deletes can
//! implement [`CashCardStore`]; the derived "by owner" queries are provided
//! on top of those five primitives.

use crate::core::query::{Page, PageSpec, SortSpec};
use crate::core::record::CashCard;
use anyhow::Result;
use async_trait::async_trait;

/// Selection criteria for [`CashCardStore::get_page`] and [`CashCardStore::exists`]
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub id: Option<i64>,
    pub owner: Option<String>,
}

impl CardFilter {
    pub fn by_owner(owner: impl Into<String>) -> Self {
        Self {
            id: None,
            owner: Some(owner.into()),
        }
    }

    pub fn by_id_and_owner(id: i64, owner: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            owner: Some(owner.into()),
        }
    }

    pub fn matches(&self, card: &CashCard) -> bool {
        self.id.is_none_or(|id| card.id == Some(id))
            && self.owner.as_deref().is_none_or(|owner| card.is_owned_by(owner))
    }
}

/// Persistence collaborator for cash cards
///
/// Implementations must make each call atomic per key; nothing here needs a
/// multi-record transaction.
#[async_trait]
pub trait CashCardStore: Send + Sync {
    /// Fetch a card by id
    async fn get(&self, id: i64) -> Result<Option<CashCard>>;

    /// Fetch one page of the cards matching `filter`, ordered by `sort`
    async fn get_page(
        &self,
        filter: &CardFilter,
        page: &PageSpec,
        sort: &SortSpec,
    ) -> Result<Page<CashCard>>;

    /// Whether at least one card matches `filter`
    async fn exists(&self, filter: &CardFilter) -> Result<bool>;

    /// Insert or overwrite a card, assigning an id when it has none
    async fn save(&self, card: CashCard) -> Result<CashCard>;

    /// Remove a card; removing a missing id is not an error
    async fn delete(&self, id: i64) -> Result<()>;

    async fn find_by_owner(
        &self,
        owner: &str,
        page: &PageSpec,
        sort: &SortSpec,
    ) -> Result<Page<CashCard>> {
        self.get_page(&CardFilter::by_owner(owner), page, sort)
            .await
    }

    async fn find_by_id_and_owner(&self, id: i64, owner: &str) -> Result<Option<CashCard>> {
        Ok(self.get(id).await?.filter(|card| card.is_owned_by(owner)))
    }

    async fn exists_by_id_and_owner(&self, id: i64, owner: &str) -> Result<bool> {
        self.exists(&CardFilter::by_id_and_owner(id, owner)).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.delete(id).await
    }
}
