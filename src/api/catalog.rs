//! Open Library client.
//!
//! Turns catalog operations into [`ApiRequest`]s and decodes the matching
//! responses. The URL builders for covers and author photos are pure.

use super::request::{ApiRequest, Completed};
use crate::domain::catalog::{
    sort_works_by_year, with_covers, Author, AuthorWork, AuthorWorksPage, Book, BookDetails, CoverSize,
    SearchPage,
};
use crate::domain::error::Result;
use url::Url;

/// Base URL of the catalog service.
pub const BASE_URL: &str = "https://openlibrary.org";

/// Base URL of the covers service.
pub const COVERS_URL: &str = "https://covers.openlibrary.org";

/// Default page size for search and subject queries.
pub const DEFAULT_LIMIT: u32 = 20;

/// Default number of works requested for an author.
pub const DEFAULT_WORKS_LIMIT: u32 = 50;

const SEARCH_FIELDS: &str = "key,title,author_name,author_key,first_publish_year,isbn,cover_i,subject,publisher,language,number_of_pages_median,ratings_average,ratings_count,want_to_read_count,currently_reading_count,already_read_count";

const SUBJECT_FIELDS: &str = "key,title,author_name,author_key,first_publish_year,isbn,cover_i,subject,publisher,language,number_of_pages_median,ratings_average,ratings_count";

/// Subject tags offered in the genre landscape.
pub const POPULAR_GENRES: [&str; 20] = [
    "fiction",
    "fantasy",
    "science_fiction",
    "mystery",
    "romance",
    "thriller",
    "biography",
    "history",
    "philosophy",
    "poetry",
    "drama",
    "horror",
    "adventure",
    "young_adult",
    "children",
    "self_help",
    "business",
    "psychology",
    "art",
    "cooking",
];

/// Stateless catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClient {
    base_url: String,
    covers_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            covers_url: COVERS_URL.to_string(),
        }
    }
}

impl CatalogClient {
    /// Free-text search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn search_books(&self, query: &str, limit: u32, offset: u32) -> Result<ApiRequest> {
        self.search(&[
            ("q", query),
            ("limit", &limit.to_string()),
            ("offset", &offset.to_string()),
            ("fields", SEARCH_FIELDS),
        ])
    }

    /// Search filtered server-side by subject tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn books_by_subject(&self, subject: &str, limit: u32, offset: u32) -> Result<ApiRequest> {
        self.search(&[
            ("subject", subject),
            ("limit", &limit.to_string()),
            ("offset", &offset.to_string()),
            ("fields", SUBJECT_FIELDS),
        ])
    }

    fn search(&self, params: &[(&str, &str)]) -> Result<ApiRequest> {
        let url = Url::parse_with_params(&format!("{}/search.json", self.base_url), params)?;
        Ok(ApiRequest {
            url: url.into(),
            endpoint: "/search.json".to_string(),
        })
    }

    /// Expanded work record, `key` being e.g. `/works/OL45804W`.
    #[must_use]
    pub fn book_details(&self, key: &str) -> ApiRequest {
        let endpoint = format!("{key}.json");
        ApiRequest {
            url: format!("{}{endpoint}", self.base_url),
            endpoint,
        }
    }

    /// Author record. Accepts a bare id (`OL23919A`) or a key (`/authors/OL23919A`).
    #[must_use]
    pub fn author(&self, key: &str) -> ApiRequest {
        let endpoint = format!("/authors/{}.json", author_id(key));
        ApiRequest {
            url: format!("{}{endpoint}", self.base_url),
            endpoint,
        }
    }

    /// Works written by an author.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn author_works(&self, author_key: &str, limit: u32) -> Result<ApiRequest> {
        let endpoint = format!("/authors/{}/works.json", author_id(author_key));
        let url = Url::parse_with_params(
            &format!("{}{endpoint}", self.base_url),
            &[("limit", limit.to_string())],
        )?;
        Ok(ApiRequest {
            url: url.into(),
            endpoint,
        })
    }

    /// Search for books first published in `year` or the year before.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn trending_books(&self, year: i32) -> Result<ApiRequest> {
        self.search_books(&trending_query(year), DEFAULT_LIMIT, 0)
    }

    /// [`CatalogClient::trending_books`] for the current calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn trending_books_now(&self) -> Result<ApiRequest> {
        use chrono::Datelike;

        self.trending_books(chrono::Utc::now().year())
    }

    #[must_use]
    pub fn cover_url(&self, cover_id: i64, size: CoverSize) -> String {
        format!("{}/b/id/{cover_id}-{}.jpg", self.covers_url, size.code())
    }

    #[must_use]
    pub fn author_photo_url(&self, photo_id: i64, size: CoverSize) -> String {
        format!("{}/a/id/{photo_id}-{}.jpg", self.covers_url, size.code())
    }

    /// The fixed genre list. No network.
    #[must_use]
    pub fn popular_genres(&self) -> Vec<String> {
        POPULAR_GENRES.iter().map(ToString::to_string).collect()
    }
}

/// Strips a `/authors/` prefix if present.
fn author_id(key: &str) -> &str {
    key.trim_start_matches("/authors/")
}

/// Query string matching the current and previous publication year.
#[must_use]
pub fn trending_query(year: i32) -> String {
    format!("first_publish_year:{} OR first_publish_year:{year}", year - 1)
}

/// Decodes a search or subject page.
///
/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_page(completed: &Completed) -> Result<SearchPage> {
    completed.decode()
}

/// Decodes a search page and keeps only books with covers.
///
/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_gallery(completed: &Completed) -> Result<Vec<Book>> {
    Ok(with_covers(decode_page(completed)?.items))
}

/// Decodes the trending search, keeping books with a cover and more than 10 ratings.
///
/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_trending(completed: &Completed) -> Result<Vec<Book>> {
    Ok(decode_page(completed)?
        .items
        .into_iter()
        .filter(Book::is_trending_candidate)
        .collect())
}

/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_details(completed: &Completed) -> Result<BookDetails> {
    completed.decode()
}

/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_author(completed: &Completed) -> Result<Author> {
    completed.decode()
}

/// Decodes an author's works, dropping untitled entries and sorting by year.
///
/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_works(completed: &Completed) -> Result<Vec<AuthorWork>> {
    let page: AuthorWorksPage = completed.decode()?;
    let mut works: Vec<AuthorWork> = page
        .entries
        .into_iter()
        .filter(|work| work.title.as_deref().is_some_and(|title| !title.is_empty()))
        .collect();
    sort_works_by_year(&mut works);
    Ok(works)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completed(body: &serde_json::Value) -> Completed {
        Completed {
            endpoint: "/search.json".to_string(),
            status: 200,
            body: serde_json::to_vec(body).unwrap(),
        }
    }

    #[test]
    fn search_url_encodes_params() {
        let request = CatalogClient::default().search_books("the hobbit", 20, 0).unwrap();
        assert!(request
            .url
            .starts_with("https://openlibrary.org/search.json?q=the+hobbit&limit=20&offset=0&fields=key%2Ctitle"));
        assert_eq!(request.endpoint, "/search.json");
    }

    #[test]
    fn subject_url_uses_subject_param() {
        let request = CatalogClient::default().books_by_subject("science_fiction", 1, 0).unwrap();
        assert!(request.url.contains("subject=science_fiction&limit=1&offset=0"));
    }

    #[test]
    fn author_requests_accept_both_key_forms() {
        let client = CatalogClient::default();
        assert_eq!(client.author("OL23919A").url, "https://openlibrary.org/authors/OL23919A.json");
        assert_eq!(
            client.author("/authors/OL23919A").url,
            "https://openlibrary.org/authors/OL23919A.json"
        );
        assert_eq!(
            client.author_works("OL23919A", 20).unwrap().url,
            "https://openlibrary.org/authors/OL23919A/works.json?limit=20"
        );
    }

    #[test]
    fn details_url_appends_json() {
        let request = CatalogClient::default().book_details("/works/OL45804W");
        assert_eq!(request.url, "https://openlibrary.org/works/OL45804W.json");
    }

    #[test]
    fn image_urls_are_deterministic() {
        let client = CatalogClient::default();
        assert_eq!(
            client.cover_url(8_231_856, CoverSize::Large),
            "https://covers.openlibrary.org/b/id/8231856-L.jpg"
        );
        assert_eq!(
            client.author_photo_url(5_543_033, CoverSize::Small),
            "https://covers.openlibrary.org/a/id/5543033-S.jpg"
        );
    }

    #[test]
    fn trending_query_spans_two_years() {
        assert_eq!(
            trending_query(2026),
            "first_publish_year:2025 OR first_publish_year:2026"
        );
    }

    #[test]
    fn trending_keeps_covered_well_rated_books() {
        let body = json!({
            "numFound": 4,
            "start": 0,
            "docs": [
                {"key": "/works/A", "title": "A", "cover_i": 1, "ratings_count": 11},
                {"key": "/works/B", "title": "B", "cover_i": 2, "ratings_count": 10},
                {"key": "/works/C", "title": "C", "ratings_count": 500},
                {"key": "/works/D", "title": "D", "cover_i": 3}
            ]
        });
        let books = decode_trending(&completed(&body)).unwrap();
        let keys: Vec<&str> = books.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["/works/A"]);
    }

    #[test]
    fn gallery_drops_books_without_covers() {
        let body = json!({
            "numFound": 2,
            "start": 0,
            "docs": [
                {"key": "/works/A", "title": "A"},
                {"key": "/works/B", "title": "B", "cover_i": 9}
            ]
        });
        let books = decode_gallery(&completed(&body)).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].key, "/works/B");
    }

    #[test]
    fn works_are_titled_and_sorted() {
        let body = json!({
            "entries": [
                {"key": "/works/U", "title": "Undated"},
                {"key": "/works/N"},
                {"key": "/works/B", "title": "Later", "first_publish_date": "2001"},
                {"key": "/works/A", "title": "Earlier", "first_publish_date": "1997"}
            ]
        });
        let works = decode_works(&completed(&body)).unwrap();
        let keys: Vec<&str> = works.iter().map(|w| w.key.as_str()).collect();
        assert_eq!(keys, ["/works/A", "/works/B", "/works/U"]);
    }

    #[test]
    fn popular_genres_are_fixed() {
        let genres = CatalogClient::default().popular_genres();
        assert_eq!(genres.len(), 20);
        assert_eq!(genres[0], "fiction");
        assert_eq!(genres[19], "cooking");
    }
}
