//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Product publication status.
///
/// Stored as lower-case TEXT in Postgres; `as_str`/`parse` provide the
/// round-trip for repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Being edited; not visible on the storefront.
    Draft,
    /// Visible and purchasable.
    #[default]
    Active,
    /// Retired; kept for history, hidden from the storefront.
    Archived,
}

impl ProductStatus {
    /// All statuses, in form-display order.
    pub const ALL: [Self; 3] = [Self::Draft, Self::Active, Self::Archived];

    /// The lower-case string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Parse the database representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in ProductStatus::ALL {
            assert_eq!(ProductStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProductStatus::parse("deleted"), None);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::Draft).unwrap(),
            "\"draft\""
        );
    }
}
