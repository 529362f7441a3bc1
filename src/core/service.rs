//! The record service: list, get, create, update and delete cash cards
//!
//! Every single-record operation goes through the [`AccessGate`] first. A
//! denial is reported as [`CashCardError::NotFound`], never as a distinct
//! "forbidden" outcome.

use crate::core::access::AccessGate;
use crate::core::error::{CashCardError, CashCardResult};
use crate::core::query::{DEFAULT_MAX_PAGE_SIZE, ListParams, PageSpec, SortSpec};
use crate::core::record::{CashCard, CashCardRequest};
use crate::core::store::CashCardStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Owner-scoped CRUD over a [`CashCardStore`]
///
/// Holds no per-request state; all shared state lives in the store.
#[derive(Clone)]
pub struct CashCardService {
    store: Arc<dyn CashCardStore>,
    gate: AccessGate,
    max_page_size: usize,
}

impl CashCardService {
    pub fn new(store: Arc<dyn CashCardStore>) -> Self {
        Self {
            gate: AccessGate::new(store.clone()),
            store,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Cap applied to caller-supplied page sizes
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    pub fn store(&self) -> &Arc<dyn CashCardStore> {
        &self.store
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    /// List the caller's cards
    ///
    /// Without parameters this is every card the caller owns, amount ascending.
    pub async fn list(&self, caller: &str, params: &ListParams) -> CashCardResult<Vec<CashCard>> {
        let sort = SortSpec::resolve(params.sort.as_deref())?;
        let page = PageSpec::resolve(params.page, params.size, self.max_page_size)?;

        let page = self.store.find_by_owner(caller, &page, &sort).await?;
        debug!(
            owner = caller,
            returned = page.content.len(),
            total = page.total,
            "listed cash cards"
        );

        Ok(page.into_content())
    }

    pub async fn get_by_id(&self, caller: &str, id: i64) -> CashCardResult<CashCard> {
        self.ensure_authorized(caller, id).await?;

        // Deleted between the gate and the read
        self.store
            .get(id)
            .await?
            .filter(|card| card.is_owned_by(caller))
            .ok_or(CashCardError::NotFound)
    }

    /// Create a card owned by `caller`; the store picks the id
    pub async fn create(&self, caller: &str, request: CashCardRequest) -> CashCardResult<CashCard> {
        let saved = self
            .store
            .save(CashCard::new(request.amount, caller))
            .await?;

        info!(owner = caller, id = ?saved.id, "created cash card");
        Ok(saved)
    }

    /// Replace the amount of one of the caller's cards
    ///
    /// `id` and `owner` are re-asserted from server-side values.
    pub async fn update(
        &self,
        caller: &str,
        id: i64,
        request: CashCardRequest,
    ) -> CashCardResult<()> {
        self.ensure_authorized(caller, id).await?;

        self.store
            .save(CashCard::with_id(id, request.amount, caller))
            .await?;

        info!(owner = caller, id, "updated cash card");
        Ok(())
    }

    pub async fn delete(&self, caller: &str, id: i64) -> CashCardResult<()> {
        if !self.store.exists_by_id_and_owner(id, caller).await? {
            debug!(caller, id, "delete denied");
            return Err(CashCardError::NotFound);
        }

        self.store.delete_by_id(id).await?;

        info!(owner = caller, id, "deleted cash card");
        Ok(())
    }

    async fn ensure_authorized(&self, caller: &str, id: i64) -> CashCardResult<()> {
        if self.gate.authorize(id, caller).await? {
            Ok(())
        } else {
            debug!(caller, id, "access gate denied record");
            Err(CashCardError::NotFound)
        }
    }
}
