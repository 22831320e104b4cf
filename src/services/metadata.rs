use std::{sync::Arc, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, MetadataRecord},
    services::providers::MetadataCatalog,
};

/// Resolves extracted titles into catalog metadata
///
/// Resolution never fails. Every error path (missing credential, empty
/// result set, transport error, malformed response, timeout) yields a
/// placeholder record that carries only the queried title.
pub struct MetadataResolver {
    catalog: Option<Arc<dyn MetadataCatalog>>,
    image_base_url: String,
    timeout: Duration,
}

impl MetadataResolver {
    /// `catalog` is `None` when no catalog credential is configured
    pub fn new(
        catalog: Option<Arc<dyn MetadataCatalog>>,
        image_base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Resolver that always degrades, for deployments without a catalog key
    pub fn disabled() -> Self {
        Self::new(None, String::new(), Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        self.catalog.is_some()
    }

    /// Look up a single title
    pub async fn resolve(&self, title: &str) -> MetadataRecord {
        let Some(catalog) = &self.catalog else {
            tracing::debug!(query = %title, "No catalog credential configured, skipping lookup");
            return MetadataRecord::placeholder(title);
        };

        match self.lookup(catalog.as_ref(), title).await {
            Ok(Some(entry)) => self.build_record(title, entry),
            Ok(None) => {
                tracing::debug!(query = %title, provider = catalog.name(), "No catalog match");
                MetadataRecord::placeholder(title)
            }
            Err(e) => {
                tracing::warn!(
                    query = %title,
                    provider = catalog.name(),
                    error = %e,
                    "Metadata lookup failed, using placeholder"
                );
                MetadataRecord::placeholder(title)
            }
        }
    }

    /// Look up every title concurrently, keeping input order
    pub async fn resolve_all(&self, titles: &[String]) -> Vec<MetadataRecord> {
        let lookups = titles.iter().map(|title| self.resolve(title));
        futures::future::join_all(lookups).await
    }

    async fn lookup(
        &self,
        catalog: &dyn MetadataCatalog,
        title: &str,
    ) -> AppResult<Option<CatalogEntry>> {
        let entries = tokio::time::timeout(self.timeout, catalog.search(title))
            .await
            .map_err(|_| {
                AppError::ExternalApi(format!("lookup timed out after {:?}", self.timeout))
            })??;

        Ok(entries.into_iter().next())
    }

    fn build_record(&self, queried_title: &str, entry: CatalogEntry) -> MetadataRecord {
        let poster_url = entry
            .poster_path
            .as_deref()
            .map(|path| self.poster_url(path));

        MetadataRecord {
            queried_title: queried_title.to_string(),
            canonical_title: Some(entry.title).filter(|t| !t.is_empty()),
            poster_url,
            overview: entry.overview,
            release_date: entry.release_date,
            rating: entry.rating,
            catalog_id: Some(entry.id),
        }
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url,
            poster_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMetadataCatalog;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn entry(id: u64, title: &str, poster_path: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
            poster_path: poster_path.map(str::to_string),
            overview: Some("An overview.".to_string()),
            release_date: Some("2013-09-19".to_string()),
            rating: Some(6.8),
        }
    }

    fn resolver_with(catalog: MockMetadataCatalog) -> MetadataResolver {
        MetadataResolver::new(
            Some(Arc::new(catalog)),
            IMAGE_BASE.to_string(),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_no_credential_yields_placeholder() {
        let resolver = MetadataResolver::disabled();
        assert!(!resolver.is_enabled());

        let record = tokio_test::block_on(resolver.resolve("Coherence"));
        assert_eq!(record, MetadataRecord::placeholder("Coherence"));
    }

    #[tokio::test]
    async fn test_first_match_populates_record() {
        let mut catalog = MockMetadataCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog
            .expect_search()
            .times(1)
            .returning(|query| {
                assert_eq!(query, "Coherence");
                Ok(vec![
                    entry(220289, "Coherence", Some("/coherence.jpg")),
                    entry(1, "Coherence 2", None),
                ])
            });

        let record = resolver_with(catalog).resolve("Coherence").await;

        assert_eq!(record.queried_title, "Coherence");
        assert_eq!(record.canonical_title, Some("Coherence".to_string()));
        assert_eq!(
            record.poster_url,
            Some(format!("{}/coherence.jpg", IMAGE_BASE))
        );
        assert_eq!(record.catalog_id, Some(220289));
        assert_eq!(record.rating, Some(6.8));
    }

    #[tokio::test]
    async fn test_missing_poster_path_leaves_url_empty() {
        let mut catalog = MockMetadataCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog
            .expect_search()
            .returning(|_| Ok(vec![entry(42, "Primer", None)]));

        let record = resolver_with(catalog).resolve("Primer").await;

        assert_eq!(record.poster_url, None);
        assert_eq!(record.catalog_id, Some(42));
    }

    #[tokio::test]
    async fn test_zero_matches_yields_placeholder() {
        let mut catalog = MockMetadataCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog.expect_search().returning(|_| Ok(Vec::new()));

        let record = resolver_with(catalog).resolve("Nonexistent Film").await;
        assert_eq!(record, MetadataRecord::placeholder("Nonexistent Film"));
    }

    #[tokio::test]
    async fn test_lookup_error_yields_placeholder() {
        let mut catalog = MockMetadataCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog
            .expect_search()
            .returning(|_| Err(AppError::ExternalApi("status 500".to_string())));

        let record = resolver_with(catalog).resolve("Coherence").await;
        assert!(record.is_placeholder());
        assert_eq!(record.queried_title, "Coherence");
    }

    struct SlowCatalog;

    #[async_trait::async_trait]
    impl MetadataCatalog for SlowCatalog {
        async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![entry(1, query, None)])
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_timeout_yields_placeholder() {
        let resolver = MetadataResolver::new(
            Some(Arc::new(SlowCatalog)),
            IMAGE_BASE.to_string(),
            Duration::from_millis(20),
        );

        let record = resolver.resolve("Annihilation").await;
        assert_eq!(record, MetadataRecord::placeholder("Annihilation"));
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_order_and_degrades_per_title() {
        let mut catalog = MockMetadataCatalog::new();
        catalog.expect_name().return_const("mock");
        catalog.expect_search().returning(|query| match query {
            "Coherence" => Ok(vec![entry(1, "Coherence", None)]),
            "Predestination" => Err(AppError::ExternalApi("boom".to_string())),
            other => Ok(vec![entry(3, other, Some("poster.jpg"))]),
        });

        let titles = vec![
            "Coherence".to_string(),
            "Predestination".to_string(),
            "Coherence".to_string(),
            "Primer".to_string(),
        ];
        let records = resolver_with(catalog).resolve_all(&titles).await;

        let queried: Vec<&str> = records.iter().map(|r| r.queried_title.as_str()).collect();
        assert_eq!(
            queried,
            vec!["Coherence", "Predestination", "Coherence", "Primer"]
        );
        assert_eq!(records[0].catalog_id, Some(1));
        assert!(records[1].is_placeholder());
        assert_eq!(records[2].catalog_id, Some(1));
        assert_eq!(
            records[3].poster_url,
            Some(format!("{}/poster.jpg", IMAGE_BASE))
        );
    }
}
