//! Server host holding the transport-agnostic application state
//!
//! The host owns the record service and the access collaborators. Exposures
//! (currently only REST) consume it to build their routers.

use crate::cashcards::AppState;
use crate::core::access::ResourcePolicy;
use crate::core::auth::CredentialVerifier;
use crate::core::service::CashCardService;
use std::sync::Arc;

/// Host context containing all service state
pub struct ServerHost {
    /// Owner-scoped record operations
    pub service: Arc<CashCardService>,

    /// Credential store used by the authentication middleware
    pub credentials: Arc<dyn CredentialVerifier>,

    /// Resource-level ban checked before any record operation
    pub resource_policy: Arc<ResourcePolicy>,
}

impl ServerHost {
    pub fn new(
        service: CashCardService,
        credentials: Arc<dyn CredentialVerifier>,
        resource_policy: ResourcePolicy,
    ) -> Self {
        Self {
            service: Arc::new(service),
            credentials,
            resource_policy: Arc::new(resource_policy),
        }
    }

    /// Handler state for the REST exposure
    pub fn app_state(&self) -> AppState {
        AppState {
            service: self.service.clone(),
            credentials: self.credentials.clone(),
            resource_policy: self.resource_policy.clone(),
        }
    }
}
