//! Profile link state model.

use serde::{Deserialize, Serialize};

use crate::identity::UserIdentity;

/// Path and query prefix appended to the accounts base URL.
pub const USER_PROFILE_PATH: &str = "/user-profile/?id=";

/// Formats the canonical profile link for an identity.
///
/// Both parts are inserted verbatim: no URL encoding, no slash normalisation.
/// The identity's domain is not part of the link.
///
/// # Example
///
/// ```
/// use linkbook_core::identity::UserIdentity;
/// use linkbook_core::profile_link::format_profile_link;
///
/// let identity = UserIdentity::new("abc", "wire.com");
/// assert_eq!(
///     format_profile_link("https://account.wire.com", &identity),
///     "https://account.wire.com/user-profile/?id=abc"
/// );
/// ```
pub fn format_profile_link(accounts_base_url: &str, identity: &UserIdentity) -> String {
    format!("{}{}{}", accounts_base_url, USER_PROFILE_PATH, identity.value())
}

/// Where a resolution currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPhase {
    /// The server configuration has not arrived yet.
    Pending,
    /// Links were derived from the server configuration.
    Resolved,
    /// The configuration fetch failed.
    Failed,
}

impl ResolutionPhase {
    /// `Resolved` and `Failed` are final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Immutable snapshot of a profile link resolution.
///
/// Each transition produces a new value; a snapshot handed out earlier is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLinkState {
    pub identity: UserIdentity,
    pub handle: Option<String>,
    pub profile_link: String,
    pub shareable_link: String,
    pub has_error: bool,
    pub phase: ResolutionPhase,
}

impl ProfileLinkState {
    /// Initial pending state with empty links.
    pub fn pending(identity: UserIdentity, handle: Option<String>) -> Self {
        Self {
            identity,
            handle,
            profile_link: String::new(),
            shareable_link: String::new(),
            has_error: false,
            phase: ResolutionPhase::Pending,
        }
    }

    /// Returns the successor state for a fetched accounts base URL.
    pub fn resolved(&self, accounts_base_url: &str) -> Self {
        let link = format_profile_link(accounts_base_url, &self.identity);
        Self {
            profile_link: link.clone(),
            shareable_link: link,
            phase: ResolutionPhase::Resolved,
            ..self.clone()
        }
    }

    /// Returns the successor state for a failed fetch. Links keep their
    /// previous values.
    pub fn failed(&self) -> Self {
        Self {
            has_error: true,
            phase: ResolutionPhase::Failed,
            ..self.clone()
        }
    }

    /// Handle label as shown under the QR code: `@handle`, or empty.
    pub fn display_handle(&self) -> String {
        match self.handle.as_deref() {
            Some(handle) if !handle.is_empty() => format!("@{}", handle),
            _ => String::new(),
        }
    }

    /// Data encoded into the QR code.
    pub fn qr_payload(&self) -> &str {
        &self.profile_link
    }
}
