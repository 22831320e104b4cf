/// TMDB catalog provider
///
/// Uses `/search/multi` so that both movies and TV shows resolve. People are
/// skipped; everything else is returned in TMDB's relevance order.
use crate::{
    error::{AppError, AppResult},
    models::{
        tmdb::{TmdbSearchResponse, TmdbSearchResult},
        CatalogEntry,
    },
    services::providers::MetadataCatalog,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn convert_results(results: Vec<TmdbSearchResult>) -> Vec<CatalogEntry> {
        results
            .into_iter()
            .filter(|result| !result.is_person())
            .map(CatalogEntry::from)
            .collect()
    }
}

#[async_trait::async_trait]
impl MetadataCatalog for TmdbProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>> {
        let url = format!("{}/search/multi", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        let entries = Self::convert_results(search.results);

        tracing::info!(
            query = %query,
            results = entries.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_results_skips_people_and_keeps_order() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 1, "media_type": "person", "name": "Denis Villeneuve"},
                {"id": 329865, "media_type": "movie", "title": "Arrival", "release_date": "2016-11-10"},
                {"id": 60625, "media_type": "tv", "name": "Arrival Diaries"}
            ]
        }"#;

        let response: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        let entries = TmdbProvider::convert_results(response.results);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 329865);
        assert_eq!(entries[0].title, "Arrival");
        assert_eq!(entries[1].title, "Arrival Diaries");
    }

    #[test]
    fn test_convert_results_empty() {
        assert!(TmdbProvider::convert_results(Vec::new()).is_empty());
    }

    #[test]
    fn test_provider_name() {
        let provider =
            TmdbProvider::new("key".to_string(), "http://test.local/3/".to_string()).unwrap();
        assert_eq!(provider.name(), "tmdb");
        assert_eq!(provider.api_url, "http://test.local/3");
    }
}
