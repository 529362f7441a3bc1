//! Caller identity and HTTP Basic credential verification
//!
//! Credential checks happen before the record service is ever invoked. The
//! service only sees the resulting [`Identity`].

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;

/// A verified caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    roles: Vec<String>,
}

impl Identity {
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    /// The identity string records are bound to
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Username and password decoded from an `Authorization: Basic ...` header
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse an `Authorization` header value
    ///
    /// Returns `None` for other schemes, bad base64, non-UTF-8 payloads and
    /// payloads without a `:` separator. The scheme name is case-insensitive.
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self::new(username, password))
    }

    /// Encode as an `Authorization` header value
    pub fn to_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

/// Credential store collaborator
///
/// `Ok(None)` means the credentials were checked and rejected; `Err` means
/// the check itself could not be performed.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credentials: &BasicCredentials) -> Result<Option<Identity>>;
}

#[derive(Debug, Clone)]
struct UserRecord {
    password: String,
    roles: Vec<String>,
}

/// Fixed user directory held in memory
///
/// Passwords are compared as plain text.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    users: HashMap<String, UserRecord>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a user
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        roles: &[&str],
    ) -> Self {
        self.insert(
            username.into(),
            password.into(),
            roles.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    pub fn insert(&mut self, username: String, password: String, roles: Vec<String>) {
        self.users.insert(username, UserRecord { password, roles });
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentials {
    async fn verify(&self, credentials: &BasicCredentials) -> Result<Option<Identity>> {
        Ok(self
            .users
            .get(&credentials.username)
            .filter(|user| user.password == credentials.password)
            .map(|user| Identity::new(credentials.username.clone(), user.roles.clone())))
    }
}
