//! Static mapping from review status codes to display phrases.

use std::collections::HashMap;

/// Catalog of documented homework statuses.
///
/// The default catalog carries the three statuses the review API
/// documents. The display phrases are user-facing text and can be
/// swapped for a localized set at construction time.
#[derive(Debug, Clone)]
pub struct StatusCatalog {
    verdicts: HashMap<String, String>,
}

impl StatusCatalog {
    /// Build a catalog from arbitrary (status, phrase) entries.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            verdicts: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the display phrase for a status code.
    pub fn verdict(&self, status: &str) -> Option<&str> {
        self.verdicts.get(status).map(String::as_str)
    }

    /// Whether the catalog documents this status code.
    pub fn contains(&self, status: &str) -> bool {
        self.verdicts.contains_key(status)
    }
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self::new([
            (
                "approved",
                "Работа проверена: ревьюеру всё понравилось. Ура!",
            ),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_documents_three_statuses() {
        let catalog = StatusCatalog::default();
        assert!(catalog.contains("approved"));
        assert!(catalog.contains("reviewing"));
        assert!(catalog.contains("rejected"));
    }

    #[test]
    fn test_undocumented_status_has_no_verdict() {
        let catalog = StatusCatalog::default();
        assert!(catalog.verdict("pending").is_none());
        assert!(!catalog.contains("pending"));
    }

    #[test]
    fn test_approved_verdict_text() {
        let catalog = StatusCatalog::default();
        assert_eq!(
            catalog.verdict("approved"),
            Some("Работа проверена: ревьюеру всё понравилось. Ура!")
        );
    }

    #[test]
    fn test_custom_entries_replace_defaults() {
        let catalog = StatusCatalog::new([("approved", "Approved, well done!")]);
        assert_eq!(catalog.verdict("approved"), Some("Approved, well done!"));
        assert!(!catalog.contains("reviewing"));
    }
}
