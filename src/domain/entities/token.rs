//! Opaque credential value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Provider-issued credential (ID token, refresh token) with masking.
///
/// The value is wiped from memory when the token is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretToken {
    value: String,
}

impl SecretToken {
    /// Creates a token, rejecting blank values and values with inner whitespace.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return None;
        }

        Some(Self {
            value: trimmed.to_string(),
        })
    }

    /// Creates token without validation.
    #[cfg(test)]
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }

        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "AMf-vBxYZ0123456789abcdefghijklmnop";

    #[test]
    fn test_valid_token_creation() {
        let token = SecretToken::new(format!("  {RAW}\n"));
        assert_eq!(token.map(|t| t.as_str().to_string()), Some(RAW.to_string()));
    }

    #[test]
    fn test_blank_token_rejected() {
        assert!(SecretToken::new("   ").is_none());
    }

    #[test]
    fn test_inner_whitespace_rejected() {
        assert!(SecretToken::new("abc def").is_none());
    }

    #[test]
    fn test_token_masking() {
        let token = SecretToken::new_unchecked(RAW);
        let masked = token.masked();

        assert_eq!(masked, "AMf-...mnop");
        assert!(!masked.contains(RAW));
    }

    #[test]
    fn test_short_token_fully_masked() {
        assert_eq!(SecretToken::new_unchecked("abc").masked(), "***");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = SecretToken::new_unchecked(RAW);
        let debug_output = format!("{token:?}");

        assert!(!debug_output.contains(RAW));
    }
}
