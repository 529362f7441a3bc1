//! Configuration loading and management

use crate::core::access::ResourcePolicy;
use crate::core::auth::InMemoryCredentials;
use crate::core::error::ConfigError;
use crate::core::query::DEFAULT_MAX_PAGE_SIZE;
use crate::core::record::CashCard;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:8080`
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Cap applied to the `size` query parameter
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Access control settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Resource-level ban; `unrestricted` when omitted
    #[serde(default)]
    pub resource_policy: ResourcePolicy,
}

/// A user known to the credential directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A card loaded into the store at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSeed {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub owner: String,
}

impl From<&CardSeed> for CashCard {
    fn from(seed: &CardSeed) -> Self {
        CashCard::with_id(seed.id, seed.amount, seed.owner.clone())
    }
}

/// Complete configuration for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub users: Vec<UserConfig>,

    #[serde(default)]
    pub cards: Vec<CardSeed>,
}

impl AppConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_page_size == 0 {
            return Err(ConfigError::invalid(
                "server.max_page_size",
                "must be a positive integer",
            ));
        }

        if let ResourcePolicy::RequireRole { role } = &self.access.resource_policy {
            if role.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "access.resource_policy.role",
                    "must not be empty",
                ));
            }
        }

        let mut usernames = HashSet::new();
        for user in &self.users {
            if user.username.is_empty() {
                return Err(ConfigError::invalid("users.username", "must not be empty"));
            }
            if user.username.contains(':') {
                return Err(ConfigError::invalid(
                    "users.username",
                    format!("'{}' must not contain ':'", user.username),
                ));
            }
            if !usernames.insert(user.username.as_str()) {
                return Err(ConfigError::invalid(
                    "users.username",
                    format!("duplicate user '{}'", user.username),
                ));
            }
        }

        let mut ids = HashSet::new();
        for card in &self.cards {
            if !ids.insert(card.id) {
                return Err(ConfigError::invalid(
                    "cards.id",
                    format!("duplicate card id {}", card.id),
                ));
            }
        }

        Ok(())
    }

    /// Build the credential directory from the configured users
    pub fn credentials(&self) -> InMemoryCredentials {
        let mut credentials = InMemoryCredentials::new();
        for user in &self.users {
            credentials.insert(
                user.username.clone(),
                user.password.clone(),
                user.roles.clone(),
            );
        }
        credentials
    }

    /// Seed cards as store records
    pub fn seed_cards(&self) -> Vec<CashCard> {
        self.cards.iter().map(CashCard::from).collect()
    }

    /// Demo configuration: three users, four cards, role-based resource policy
    pub fn default_config() -> Self {
        let user = |username: &str, password: &str, role: &str| UserConfig {
            username: username.to_string(),
            password: password.to_string(),
            roles: vec![role.to_string()],
        };
        let card = |id: i64, cents: i64, owner: &str| CardSeed {
            id,
            amount: Decimal::new(cents, 2),
            owner: owner.to_string(),
        };

        Self {
            server: ServerConfig::default(),
            access: AccessConfig {
                resource_policy: ResourcePolicy::RequireRole {
                    role: "CARD-OWNER".to_string(),
                },
            },
            users: vec![
                user("sarah1", "abc123", "CARD-OWNER"),
                user("hank-owns-no-cards", "qrs456", "NON-OWNER"),
                user("kumar2", "xyz789", "CARD-OWNER"),
            ],
            cards: vec![
                card(99, 12345, "sarah1"),
                card(100, 100, "sarah1"),
                card(101, 15000, "sarah1"),
                card(102, 20000, "kumar2"),
            ],
        }
    }
}
