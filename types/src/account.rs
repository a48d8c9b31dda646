//! Root-chain account identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PlasmaError;

/// The name of an account on the root chain (coin owner, exitor, operator).
///
/// Account names are opaque text; the only requirement is that they are
/// non-empty and contain no whitespace, so they survive a text boundary intact.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id, validating its shape.
    pub fn new(raw: impl Into<String>) -> Result<Self, PlasmaError> {
        let s = raw.into();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(PlasmaError::InvalidAccount(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for AccountId {
    type Error = PlasmaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        let id = AccountId::new("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new("bad name").is_err());
        assert!(AccountId::try_from("tab\there").is_err());
    }
}
