//! User identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualified identity of a user: a backend-local id plus the backend domain.
///
/// Immutable once constructed. Only `value` ever appears in a profile link;
/// the domain is carried for display and logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    value: String,
    domain: String,
}

impl UserIdentity {
    pub fn new(value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            domain: domain.into(),
        }
    }

    /// The backend-local id.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.domain)
    }
}
