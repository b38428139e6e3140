//! Library catalog records as returned by Open Library.
//!
//! All types here are immutable snapshots of one upstream response. Field names
//! follow the upstream JSON (`snake_case` already), optional fields default to
//! `None` so partial documents still decode.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maximum number of characters shown for a book description.
pub const DESCRIPTION_LIMIT: usize = 500;

/// Maximum number of characters shown for an author bio inside the book modal.
pub const BIO_PREVIEW_LIMIT: usize = 300;

/// A book as it appears in search and subject results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub author_key: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub isbn: Option<Vec<String>>,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub subject: Option<Vec<String>>,
    #[serde(default)]
    pub publisher: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<Vec<String>>,
    #[serde(default)]
    pub number_of_pages_median: Option<u32>,
    #[serde(default)]
    pub ratings_average: Option<f64>,
    #[serde(default)]
    pub ratings_count: Option<u64>,
    #[serde(default)]
    pub want_to_read_count: Option<u64>,
    #[serde(default)]
    pub currently_reading_count: Option<u64>,
    #[serde(default)]
    pub already_read_count: Option<u64>,
}

impl Book {
    /// Whether the book can be shown in a gallery (it carries a cover id).
    #[must_use]
    pub const fn has_cover(&self) -> bool {
        self.cover_i.is_some()
    }

    /// Whether the book qualifies for the trending shelf.
    ///
    /// Requires a cover and strictly more than 10 ratings.
    #[must_use]
    pub fn is_trending_candidate(&self) -> bool {
        self.has_cover() && self.ratings_count.is_some_and(|count| count > 10)
    }

    /// Up to `limit` author keys, in upstream order.
    #[must_use]
    pub fn author_keys(&self, limit: usize) -> Vec<String> {
        self.author_key
            .as_deref()
            .unwrap_or_default()
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Author names joined for a card subtitle.
    #[must_use]
    pub fn authors_line(&self) -> Option<String> {
        self.author_name
            .as_ref()
            .filter(|names| !names.is_empty())
            .map(|names| names.join(", "))
    }
}

/// Keeps only books that carry a cover id.
#[must_use]
pub fn with_covers(books: Vec<Book>) -> Vec<Book> {
    books.into_iter().filter(Book::has_cover).collect()
}

/// One page of search or subject results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "docs", default)]
    pub items: Vec<Book>,
    #[serde(rename = "numFound", default)]
    pub total_found: u64,
    #[serde(default)]
    pub start: u64,
}

/// Free text that Open Library returns either plain or wrapped in `{value}`.
///
/// Descriptions and bios use both shapes; callers only ever see the text.
///
/// ```
/// use bookscope::domain::catalog::TextValue;
///
/// let plain: TextValue = serde_json::from_str(r#""A tale.""#).unwrap();
/// let wrapped: TextValue =
///     serde_json::from_str(r#"{"type": "/type/text", "value": "A tale."}"#).unwrap();
/// assert_eq!(plain.as_str(), wrapped.as_str());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Wrapped { value: String },
}

impl TextValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Wrapped { value: text } => text,
        }
    }
}

/// Reference to another record by key (`{"key": "/authors/OL1A"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub key: String,
}

/// Author entry inside a work record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRole {
    pub author: KeyRef,
    #[serde(rename = "type", default)]
    pub role: Option<KeyRef>,
}

/// Expanded work record fetched when a book modal opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Option<Vec<AuthorRole>>,
    #[serde(default)]
    pub description: Option<TextValue>,
    #[serde(default)]
    pub covers: Option<Vec<i64>>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_date: Option<String>,
    #[serde(default)]
    pub publishers: Option<Vec<String>>,
    #[serde(default)]
    pub isbn_10: Option<Vec<String>>,
    #[serde(default)]
    pub isbn_13: Option<Vec<String>>,
    #[serde(default)]
    pub number_of_pages: Option<u32>,
    #[serde(default)]
    pub works: Option<Vec<KeyRef>>,
}

impl BookDetails {
    /// The description text regardless of its upstream shape.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_ref()
            .map(TextValue::as_str)
            .filter(|text| !text.is_empty())
    }
}

/// An author record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub death_date: Option<String>,
    #[serde(default)]
    pub bio: Option<TextValue>,
    #[serde(default)]
    pub photos: Option<Vec<i64>>,
    #[serde(default)]
    pub works_count: Option<u64>,
    #[serde(default)]
    pub top_work: Option<String>,
    #[serde(default)]
    pub top_subjects: Option<Vec<String>>,
}

impl Author {
    #[must_use]
    pub fn bio_text(&self) -> Option<&str> {
        self.bio
            .as_ref()
            .map(TextValue::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Life span line for the timeline header.
    ///
    /// `"1892 - 1973"` when both dates are known, `"1965 - present"` when only the
    /// birth date is, and `None` otherwise.
    #[must_use]
    pub fn lifespan(&self) -> Option<String> {
        let birth = self.birth_date.as_deref().map(display_year);
        let death = self.death_date.as_deref().map(display_year);

        match (birth, death) {
            (birth, Some(death)) => Some(format!("{} - {death}", birth.unwrap_or_else(|| "?".to_string()))),
            (Some(birth), None) => Some(format!("{birth} - present")),
            (None, None) => None,
        }
    }
}

/// A work listed on an author's works page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorWork {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_publish_date: Option<String>,
    #[serde(default)]
    pub covers: Option<Vec<i64>>,
}

impl AuthorWork {
    /// Publication year extracted from the free-form date.
    #[must_use]
    pub fn year(&self) -> Option<u32> {
        self.first_publish_date.as_deref().and_then(extract_year)
    }

    #[must_use]
    pub fn first_cover(&self) -> Option<i64> {
        self.covers.as_ref().and_then(|covers| covers.first().copied())
    }
}

/// Envelope of `/authors/{id}/works.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorWorksPage {
    #[serde(default)]
    pub entries: Vec<AuthorWork>,
}

/// Cover and photo sizes understood by the covers service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CoverSize {
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Small => 'S',
            Self::Medium => 'M',
            Self::Large => 'L',
        }
    }
}

/// Returns the first run of four ASCII digits in `date`.
///
/// ```
/// use bookscope::domain::catalog::extract_year;
///
/// assert_eq!(extract_year("March 4, 1997"), Some(1997));
/// assert_eq!(extract_year("c. 19th century"), None);
/// ```
#[must_use]
pub fn extract_year(date: &str) -> Option<u32> {
    let bytes = date.as_bytes();
    bytes
        .windows(4)
        .position(|window| window.iter().all(u8::is_ascii_digit))
        .and_then(|start| date[start..start + 4].parse().ok())
}

/// The year of a free-form date for display, or the raw string when none is found.
#[must_use]
pub fn display_year(date: &str) -> String {
    extract_year(date).map_or_else(|| date.to_string(), |year| year.to_string())
}

/// Sorts works by publication year, undated works last, keeping upstream order
/// among equal years.
pub fn sort_works_by_year(works: &mut [AuthorWork]) {
    works.sort_by(|a, b| match (a.year(), b.year()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Formats a subject tag for headings: `science_fiction` → `Science Fiction`.
#[must_use]
pub fn format_genre_name(genre: &str) -> String {
    genre
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates `text` to `limit` characters, appending `...` when cut.
#[must_use]
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let kept: String = text.chars().take(limit).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(key: &str, date: Option<&str>) -> AuthorWork {
        AuthorWork {
            key: key.to_string(),
            title: Some(key.to_string()),
            first_publish_date: date.map(ToString::to_string),
            covers: None,
        }
    }

    #[test]
    fn works_sort_by_year_with_undated_last() {
        let mut works = vec![
            work("undated", None),
            work("second", Some("2001")),
            work("first", Some("1997")),
        ];
        sort_works_by_year(&mut works);

        let order: Vec<&str> = works.iter().map(|w| w.key.as_str()).collect();
        assert_eq!(order, ["first", "second", "undated"]);
    }

    #[test]
    fn unparsable_dates_sort_with_undated() {
        let mut works = vec![work("odd", Some("unknown")), work("dated", Some("June 1954"))];
        sort_works_by_year(&mut works);
        assert_eq!(works[0].key, "dated");
    }

    #[test]
    fn description_accepts_both_shapes() {
        let plain: BookDetails =
            serde_json::from_value(serde_json::json!({"key": "/works/OL1W", "description": "A tale."}))
                .unwrap();
        let wrapped: BookDetails = serde_json::from_value(serde_json::json!({
            "key": "/works/OL1W",
            "description": {"type": "/type/text", "value": "A tale."}
        }))
        .unwrap();

        assert_eq!(plain.description_text(), Some("A tale."));
        assert_eq!(plain.description_text(), wrapped.description_text());
    }

    #[test]
    fn lifespan_variants() {
        let mut author: Author =
            serde_json::from_value(serde_json::json!({"key": "/authors/OL1A", "name": "A"})).unwrap();
        assert_eq!(author.lifespan(), None);

        author.birth_date = Some("3 January 1892".to_string());
        assert_eq!(author.lifespan().as_deref(), Some("1892 - present"));

        author.death_date = Some("2 September 1973".to_string());
        assert_eq!(author.lifespan().as_deref(), Some("1892 - 1973"));
    }

    #[test]
    fn trending_candidate_needs_cover_and_ratings() {
        let mut book: Book =
            serde_json::from_value(serde_json::json!({"key": "/works/OL1W", "title": "T"})).unwrap();
        book.ratings_count = Some(50);
        assert!(!book.is_trending_candidate());

        book.cover_i = Some(1);
        book.ratings_count = Some(10);
        assert!(!book.is_trending_candidate());

        book.ratings_count = Some(11);
        assert!(book.is_trending_candidate());
    }

    #[test]
    fn genre_names_are_title_cased() {
        assert_eq!(format_genre_name("science_fiction"), "Science Fiction");
        assert_eq!(format_genre_name("young_adult"), "Young Adult");
        assert_eq!(format_genre_name("fiction"), "Fiction");
    }

    #[test]
    fn truncation_marks_cut_text() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }
}
