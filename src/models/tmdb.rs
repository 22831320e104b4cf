use serde::Deserialize;

use super::CatalogEntry;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw response from TMDB's `/search/multi`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchResult>,
}

/// A single multi-search hit; movies use `title`/`release_date`, TV uses `name`/`first_air_date`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl TmdbSearchResult {
    pub fn is_person(&self) -> bool {
        self.media_type.as_deref() == Some("person")
    }
}

/// TMDB sends empty strings for unknown dates and overviews
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbSearchResult> for CatalogEntry {
    fn from(result: TmdbSearchResult) -> Self {
        let title = result.title.or(result.name).unwrap_or_default();

        CatalogEntry {
            id: result.id,
            title,
            poster_path: non_empty(result.poster_path),
            overview: non_empty(result.overview),
            release_date: non_empty(result.release_date).or(non_empty(result.first_air_date)),
            rating: result.vote_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_result_conversion() {
        let json = r#"{
            "id": 220289,
            "media_type": "movie",
            "title": "Coherence",
            "poster_path": "/coherence.jpg",
            "overview": "Strange things happen at a dinner party.",
            "release_date": "2013-09-19",
            "vote_average": 6.8
        }"#;

        let result: TmdbSearchResult = serde_json::from_str(json).unwrap();
        let entry = CatalogEntry::from(result);

        assert_eq!(entry.id, 220289);
        assert_eq!(entry.title, "Coherence");
        assert_eq!(entry.poster_path, Some("/coherence.jpg".to_string()));
        assert_eq!(entry.release_date, Some("2013-09-19".to_string()));
        assert_eq!(entry.rating, Some(6.8));
    }

    #[test]
    fn test_tv_result_uses_name_and_first_air_date() {
        let json = r#"{
            "id": 1396,
            "media_type": "tv",
            "name": "Breaking Bad",
            "poster_path": null,
            "overview": "",
            "first_air_date": "2008-01-20",
            "vote_average": 8.9
        }"#;

        let result: TmdbSearchResult = serde_json::from_str(json).unwrap();
        assert!(!result.is_person());

        let entry = CatalogEntry::from(result);
        assert_eq!(entry.title, "Breaking Bad");
        assert_eq!(entry.poster_path, None);
        assert_eq!(entry.overview, None);
        assert_eq!(entry.release_date, Some("2008-01-20".to_string()));
    }

    #[test]
    fn test_search_response_without_results_field() {
        let response: TmdbSearchResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
