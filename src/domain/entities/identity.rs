//! Signed-in identity as reported by the session provider.

use serde::{Deserialize, Serialize};

/// Label shown when an identity carries neither a display name nor an email.
pub const FALLBACK_LABEL: &str = "User";

/// Stable provider-issued user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Read-only copy of the provider's user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    uid: UserId,
    display_name: Option<String>,
    email: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
        }
    }

    /// Sets the display name. Blank names are treated as absent.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = non_blank(display_name.into());
        self
    }

    /// Sets the email address. Blank addresses are treated as absent.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    #[must_use]
    pub const fn uid(&self) -> &UserId {
        &self.uid
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Name to show for this identity: display name, then email, then
    /// [`FALLBACK_LABEL`].
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(FALLBACK_LABEL)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_display_name() {
        let identity = Identity::new("u1")
            .with_display_name("Taro")
            .with_email("taro@example.com");
        assert_eq!(identity.label(), "Taro");
    }

    #[test]
    fn test_label_falls_back_to_email() {
        let identity = Identity::new("u1").with_email("taro@example.com");
        assert_eq!(identity.label(), "taro@example.com");
    }

    #[test]
    fn test_label_generic_fallback() {
        let identity = Identity::new("u1");
        assert_eq!(identity.label(), FALLBACK_LABEL);
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let identity = Identity::new("u1").with_display_name("  ").with_email("");
        assert_eq!(identity.display_name(), None);
        assert_eq!(identity.email(), None);
        assert_eq!(identity.label(), FALLBACK_LABEL);
    }

    #[test]
    fn test_user_id_display() {
        let identity = Identity::new("abc123");
        assert_eq!(identity.uid().to_string(), "abc123");
        assert_eq!(identity.uid().as_str(), "abc123");
    }
}
