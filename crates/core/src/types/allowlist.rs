//! Administrator email allow-list.

use serde::{Deserialize, Serialize};

/// The set of email addresses granted administrative access.
///
/// Built from a comma-separated configuration string (typically the
/// `ADMIN_ALLOWED_EMAILS` environment variable). Entries are trimmed and
/// lower-cased at parse time, and membership checks are case-insensitive and
/// trim-tolerant, so `"Admin@Example.com"` matches an allow-list entry of
/// `"admin@example.com"`.
///
/// An empty list is a valid state meaning "no admins configured" - callers
/// must treat it as deny-all, never as allow-all.
///
/// ## Examples
///
/// ```
/// use waterlife_core::AdminAllowList;
///
/// let list = AdminAllowList::parse("a@x.com, B@Y.com,");
/// assert_eq!(list.len(), 2);
/// assert!(list.contains("b@y.com"));
/// assert!(!list.contains("c@z.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminAllowList {
    entries: Vec<String>,
}

impl AdminAllowList {
    /// Parse an allow-list from a comma-separated string.
    ///
    /// Each entry is trimmed and lower-cased. Entries that are empty after
    /// trimming (stray or trailing commas) are dropped; they could never
    /// match a real email address.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect();

        Self { entries }
    }

    /// Returns true if no admin emails are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of configured admin emails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Case-insensitive, trim-tolerant membership check.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        let needle = email.trim().to_lowercase();
        self.entries.iter().any(|entry| *entry == needle)
    }

    /// The normalized entries, in configuration order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl std::str::FromStr for AdminAllowList {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_entries() {
        let list = AdminAllowList::parse(" Admin@Example.com ,ops@waterlife.shop");
        assert_eq!(
            list.entries(),
            &["admin@example.com", "ops@waterlife.shop"]
        );
    }

    #[test]
    fn test_parse_drops_empty_entries() {
        let list = AdminAllowList::parse("a@x.com,, b@y.com ,");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_empty_string_is_empty() {
        assert!(AdminAllowList::parse("").is_empty());
        assert!(AdminAllowList::parse(" , ,").is_empty());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let list = AdminAllowList::parse("admin@example.com");
        assert!(list.contains("admin@example.com"));
        assert!(list.contains("Admin@Example.com"));
        assert!(list.contains("  ADMIN@EXAMPLE.COM  "));
    }

    #[test]
    fn test_contains_rejects_non_members() {
        let list = AdminAllowList::parse("a@x.com, b@y.com");
        assert!(list.contains("b@y.com"));
        assert!(!list.contains("c@z.com"));
    }

    #[test]
    fn test_empty_list_contains_nothing() {
        let list = AdminAllowList::default();
        assert!(!list.contains("anything@x.com"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_from_str() {
        #[allow(clippy::unwrap_used)]
        let list: AdminAllowList = "a@x.com".parse().unwrap();
        assert!(list.contains("a@x.com"));
    }
}
