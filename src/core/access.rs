//! Access control: the per-record gate and the optional resource-level policy
//!
//! Two layers decide two different things:
//!
//! - [`AccessGate`] answers "may this caller touch record N?". A `false`
//!   answer always surfaces as 404, whether the record is missing or belongs
//!   to someone else.
//! - [`ResourcePolicy`] answers "may this caller use `/cashcards` at all?".
//!   It runs in the router before the service and surfaces as 403. It is off
//!   unless configured.

use crate::core::auth::Identity;
use crate::core::store::{CardFilter, CashCardStore};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Binds each record to its owner
#[derive(Clone)]
pub struct AccessGate {
    store: Arc<dyn CashCardStore>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn CashCardStore>) -> Self {
        Self { store }
    }

    /// True iff record `record_id` exists and is owned by `caller`
    pub async fn authorize(&self, record_id: i64, caller: &str) -> Result<bool> {
        self.store
            .exists(&CardFilter::by_id_and_owner(record_id, caller))
            .await
    }
}

/// Operation class used by the resource policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOperation {
    Create,
    Access,
}

/// Whole-resource ban applied before any record operation
///
/// ```yaml
/// access:
///   resource_policy:
///     mode: require_role
///     role: CARD-OWNER
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResourcePolicy {
    /// Every authenticated identity is admitted
    #[default]
    Unrestricted,

    /// Identity must carry `role`
    RequireRole { role: String },

    /// Identity must already own at least one card; creation is exempt
    RequireOwnedRecords,
}

impl ResourcePolicy {
    /// Decide whether `identity` may perform `operation` on the collection
    pub async fn admits(
        &self,
        identity: &Identity,
        operation: ResourceOperation,
        store: &dyn CashCardStore,
    ) -> Result<bool> {
        match self {
            ResourcePolicy::Unrestricted => Ok(true),
            ResourcePolicy::RequireRole { role } => Ok(identity.has_role(role)),
            ResourcePolicy::RequireOwnedRecords => match operation {
                ResourceOperation::Create => Ok(true),
                ResourceOperation::Access => {
                    store.exists(&CardFilter::by_owner(identity.name())).await
                }
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ResourcePolicy::Unrestricted)
    }
}
