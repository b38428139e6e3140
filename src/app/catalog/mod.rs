//! Library catalog screen: state and operations.
//!
//! [`CatalogState`] owns everything the catalog screen shows and decides which
//! requests to issue. Every result slot carries a [`Generation`]; a response
//! whose generation no longer matches its slot is dropped.

mod view;

use super::batch::{Generation, SettledBatch};
use super::gallery::GalleryScroll;
use super::modes::{CatalogSection, InputMode};
use super::Action;
use crate::api::catalog::{self as catalog_api, CatalogClient, DEFAULT_LIMIT};
use crate::api::{ApiRequest, Completed, HttpResponse, RequestTracker};
use crate::domain::catalog::{Author, AuthorWork, Book, BookDetails, CoverSize};
use crate::domain::error::Result;
use std::collections::{HashMap, HashSet};

/// Genre loaded into the collection gallery at startup.
pub const STARTUP_GENRE: &str = "fiction";

/// Maximum number of authors fetched for the book modal.
pub const MODAL_AUTHOR_LIMIT: usize = 3;

/// Number of works requested for an author timeline.
pub const TIMELINE_WORKS_LIMIT: u32 = 20;

/// Genres shown in the landscape grid.
pub const LANDSCAPE_GENRES: usize = 12;

/// Leading genres whose book counts are fetched.
pub const STAT_GENRES: usize = 6;

/// Columns of the genre grid.
pub const GENRE_COLUMNS: usize = 4;

/// Shown instead of a cover that failed to load.
pub const COVER_PLACEHOLDER: &str = "https://via.placeholder.com/300x450/e5e7eb/6b7280?text=No+Cover";

/// Self-loading galleries below the collection: `(title, subject)`.
pub const SHELVES: [(&str, &str); 3] = [
    ("Fantasy Adventures", "fantasy"),
    ("Science Fiction Worlds", "science_fiction"),
    ("Mystery & Thriller", "mystery"),
];

const TRENDING_SLOT: usize = 0;
const COLLECTION_SLOT: usize = 1;
const TIMELINE_AUTHOR_SLOT: usize = 0;
const TIMELINE_WORKS_SLOT: usize = 1;

/// What an in-flight catalog request is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogFetch {
    Startup { generation: Generation, slot: usize },
    Collection { generation: Generation },
    Search { generation: Generation },
    Shelf { index: usize, generation: Generation },
    GenreStat { genre: String },
    Details { generation: Generation },
    ModalAuthor { generation: Generation, slot: usize },
    CoverProbe { generation: Generation },
    TimelineAuthor { generation: Generation },
    TimelineWorks { generation: Generation },
    WorkCoverCheck { generation: Generation, cover: i64 },
}

/// A featured gallery that loads its own subject.
#[derive(Debug, Clone)]
pub struct Shelf {
    pub title: &'static str,
    pub subject: &'static str,
    pub books: Vec<Book>,
    pub loading: bool,
    pub gallery: GalleryScroll,
    generation: Generation,
}

/// Book detail overlay.
#[derive(Debug)]
pub struct BookModal {
    /// The search record the modal was opened from.
    pub book: Book,
    pub details: Option<BookDetails>,
    /// Authors whose lookups succeeded, in upstream order.
    pub authors: Vec<Author>,
    pub author_cursor: usize,
    pub cover_failed: bool,
    details_pending: bool,
    author_batch: Option<SettledBatch<Author>>,
}

impl BookModal {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.details_pending || self.author_batch.is_some()
    }

    #[must_use]
    pub fn selected_author(&self) -> Option<&Author> {
        self.authors.get(self.author_cursor)
    }
}

#[derive(Debug)]
enum TimelinePart {
    Author(Author),
    Works(Vec<AuthorWork>),
}

/// Author timeline overlay, opened from the book modal.
#[derive(Debug)]
pub struct AuthorTimeline {
    pub key: String,
    pub name: String,
    pub author: Option<Author>,
    /// Titled works sorted by year, undated last.
    pub works: Vec<AuthorWork>,
    /// Work covers whose image failed to load; they are not shown.
    pub failed_covers: HashSet<i64>,
    pending: Option<SettledBatch<TimelinePart>>,
}

impl AuthorTimeline {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// State of the catalog screen.
#[derive(Debug)]
pub struct CatalogState {
    client: CatalogClient,
    tracker: RequestTracker<CatalogFetch>,

    /// True until the startup batch settles.
    pub loading: bool,
    startup: Option<SettledBatch<Vec<Book>>>,
    startup_generation: Generation,

    pub trending: Vec<Book>,
    pub trending_gallery: GalleryScroll,

    pub genres: Vec<String>,
    pub genre_stats: HashMap<String, u64>,
    pub genre_cursor: usize,

    /// Genre shown in the collection gallery.
    pub selected_genre: String,
    pub collection: Vec<Book>,
    pub collection_gallery: GalleryScroll,
    collection_generation: Generation,

    /// Text in the search box, not yet submitted.
    pub search_input: String,
    /// Last submitted query.
    pub search_query: String,
    pub search_results: Vec<Book>,
    pub results_gallery: GalleryScroll,
    search_generation: Generation,

    pub shelves: Vec<Shelf>,

    pub modal: Option<BookModal>,
    modal_generation: Generation,
    pub timeline: Option<AuthorTimeline>,
    timeline_generation: Generation,

    pub input_mode: InputMode,
    pub section: CatalogSection,
    pub viewport_cols: usize,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(CatalogClient::default())
    }
}

impl CatalogState {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        let genres = client.popular_genres();
        Self {
            client,
            tracker: RequestTracker::default(),
            loading: true,
            startup: None,
            startup_generation: Generation::default(),
            trending: Vec::new(),
            trending_gallery: GalleryScroll::default(),
            genres,
            genre_stats: HashMap::new(),
            genre_cursor: 0,
            selected_genre: String::new(),
            collection: Vec::new(),
            collection_gallery: GalleryScroll::default(),
            collection_generation: Generation::default(),
            search_input: String::new(),
            search_query: String::new(),
            search_results: Vec::new(),
            results_gallery: GalleryScroll::default(),
            search_generation: Generation::default(),
            shelves: SHELVES
                .iter()
                .map(|&(title, subject)| Shelf {
                    title,
                    subject,
                    books: Vec::new(),
                    loading: true,
                    gallery: GalleryScroll::default(),
                    generation: Generation::default(),
                })
                .collect(),
            modal: None,
            modal_generation: Generation::default(),
            timeline: None,
            timeline_generation: Generation::default(),
            input_mode: InputMode::Normal,
            section: CatalogSection::Genres,
            viewport_cols: 80,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &CatalogClient {
        &self.client
    }

    fn issue(&mut self, request: ApiRequest, kind: CatalogFetch) -> Action {
        Action::Fetch(self.tracker.issue(request, kind))
    }

    /// Width available to a gallery row.
    #[must_use]
    pub const fn gallery_width(&self) -> usize {
        self.viewport_cols.saturating_sub(4)
    }

    /// Issues the startup batch (trending and the startup genre) plus the
    /// independent shelf and genre-count requests.
    ///
    /// # Errors
    ///
    /// Returns an error if a request URL cannot be built.
    pub fn mount(&mut self) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("catalog_mount").entered();

        let generation = self.startup_generation.advance();
        self.loading = true;
        self.startup = Some(SettledBatch::new(2));

        let trending = self.client.trending_books_now()?;
        let collection = self.client.books_by_subject(STARTUP_GENRE, DEFAULT_LIMIT, 0)?;
        let mut actions = vec![
            self.issue(trending, CatalogFetch::Startup { generation, slot: TRENDING_SLOT }),
            self.issue(collection, CatalogFetch::Startup { generation, slot: COLLECTION_SLOT }),
        ];

        for index in 0..self.shelves.len() {
            let shelf = &mut self.shelves[index];
            let generation = shelf.generation.advance();
            shelf.loading = true;
            let request = self.client.books_by_subject(shelf.subject, DEFAULT_LIMIT, 0)?;
            actions.push(self.issue(request, CatalogFetch::Shelf { index, generation }));
        }

        let stat_genres: Vec<String> = self.genres.iter().take(STAT_GENRES).cloned().collect();
        for genre in stat_genres {
            let request = self.client.books_by_subject(&genre, 1, 0)?;
            actions.push(self.issue(request, CatalogFetch::GenreStat { genre }));
        }

        tracing::debug!(requests = actions.len(), "catalog startup issued");
        Ok(actions)
    }

    /// Submits the search box. A blank query clears the results without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn submit_search(&mut self) -> Result<Vec<Action>> {
        let query = self.search_input.trim().to_string();
        let generation = self.search_generation.advance();
        self.input_mode = InputMode::Normal;

        if query.is_empty() {
            tracing::debug!("blank search, clearing results");
            self.search_query.clear();
            self.search_results.clear();
            self.results_gallery = GalleryScroll::default();
            self.ensure_visible_section();
            return Ok(vec![]);
        }

        tracing::debug!(query = %query, "submitting search");
        let request = self.client.search_books(&query, DEFAULT_LIMIT, 0)?;
        self.search_query = query;
        Ok(vec![self.issue(request, CatalogFetch::Search { generation })])
    }

    /// Empties the search box and submits the empty query.
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the signature of [`Self::submit_search`].
    pub fn clear_search(&mut self) -> Result<Vec<Action>> {
        self.search_input.clear();
        self.submit_search()
    }

    /// Replaces the collection gallery with books of `genre`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built.
    pub fn select_genre(&mut self, genre: String) -> Result<Vec<Action>> {
        tracing::debug!(genre = %genre, "genre selected");
        let generation = self.collection_generation.advance();
        let request = self.client.books_by_subject(&genre, DEFAULT_LIMIT, 0)?;
        self.selected_genre = genre;
        Ok(vec![self.issue(request, CatalogFetch::Collection { generation })])
    }

    /// Opens the book modal: details, up to three authors, and a cover probe,
    /// all issued at once.
    pub fn open_book(&mut self, book: Book) -> Vec<Action> {
        let _span = tracing::debug_span!("open_book", key = %book.key).entered();

        let generation = self.modal_generation.advance();
        self.close_timeline();

        let details = self.client.book_details(&book.key);
        let mut actions = vec![self.issue(details, CatalogFetch::Details { generation })];

        let author_keys = book.author_keys(MODAL_AUTHOR_LIMIT);
        for (slot, key) in author_keys.iter().enumerate() {
            let request = self.client.author(key);
            actions.push(self.issue(request, CatalogFetch::ModalAuthor { generation, slot }));
        }

        if let Some(cover_id) = book.cover_i {
            let probe = ApiRequest::probe(self.client.cover_url(cover_id, CoverSize::Large));
            actions.push(self.issue(probe, CatalogFetch::CoverProbe { generation }));
        }

        self.modal = Some(BookModal {
            book,
            details: None,
            authors: Vec::new(),
            author_cursor: 0,
            cover_failed: false,
            details_pending: true,
            author_batch: (!author_keys.is_empty()).then(|| SettledBatch::new(author_keys.len())),
        });

        actions
    }

    /// Discards the modal and anything still loading for it.
    pub fn close_modal(&mut self) {
        self.close_timeline();
        self.modal = None;
        self.modal_generation.advance();
    }

    /// Opens the timeline of the author selected in the modal.
    ///
    /// # Errors
    ///
    /// Returns an error if the works URL cannot be built.
    pub fn open_timeline(&mut self) -> Result<Vec<Action>> {
        let Some(author) = self.modal.as_ref().and_then(BookModal::selected_author) else {
            tracing::debug!("no loaded author to open");
            return Ok(vec![]);
        };
        let key = author.key.clone();
        let name = author.name.clone();

        let generation = self.timeline_generation.advance();
        let author_request = self.client.author(&key);
        let works_request = self.client.author_works(&key, TIMELINE_WORKS_LIMIT)?;

        tracing::debug!(author = %key, "opening author timeline");
        self.timeline = Some(AuthorTimeline {
            key,
            name,
            author: None,
            works: Vec::new(),
            failed_covers: HashSet::new(),
            pending: Some(SettledBatch::new(2)),
        });

        Ok(vec![
            self.issue(author_request, CatalogFetch::TimelineAuthor { generation }),
            self.issue(works_request, CatalogFetch::TimelineWorks { generation }),
        ])
    }

    pub fn close_timeline(&mut self) {
        if self.timeline.take().is_some() {
            self.timeline_generation.advance();
        }
    }

    /// Applies a host response to whichever slot requested it.
    ///
    /// Returns whether the screen should re-render, plus follow-up requests: a
    /// settled author timeline checks the covers of its works.
    ///
    /// # Errors
    ///
    /// Decode and fetch failures are logged and absorbed here; the signature
    /// leaves room for the handler's error path.
    pub fn handle_response(&mut self, response: HttpResponse) -> Result<(bool, Vec<Action>)> {
        let Some((kind, completed)) = self.tracker.resolve(response) else {
            return Ok((false, vec![]));
        };
        let _span =
            tracing::debug_span!("catalog_response", kind = ?kind, status = completed.status).entered();

        if self.is_stale(&kind) {
            tracing::debug!("discarding superseded response");
            return Ok((false, vec![]));
        }

        let settles_timeline = matches!(
            kind,
            CatalogFetch::TimelineAuthor { .. } | CatalogFetch::TimelineWorks { .. }
        );
        let render = self.apply_response(kind, &completed)?;
        let follow_up = if settles_timeline && render {
            self.check_work_covers()
        } else {
            vec![]
        };
        Ok((render, follow_up))
    }

    fn apply_response(&mut self, kind: CatalogFetch, completed: &Completed) -> Result<bool> {
        match kind {
            CatalogFetch::Startup { slot, .. } => Ok(self.apply_startup_entry(slot, completed)),
            CatalogFetch::Collection { .. } => {
                match catalog_api::decode_gallery(completed) {
                    Ok(books) => {
                        self.collection = books;
                        self.collection_gallery = GalleryScroll::default();
                    }
                    Err(e) => {
                        tracing::warn!(genre = %self.selected_genre, error = %e, "failed to load genre books");
                    }
                }
                self.ensure_visible_section();
                Ok(true)
            }
            CatalogFetch::Search { .. } => {
                self.search_results = catalog_api::decode_gallery(completed).unwrap_or_else(|e| {
                    tracing::warn!(query = %self.search_query, error = %e, "search failed");
                    Vec::new()
                });
                self.results_gallery = GalleryScroll::default();
                if self.search_results.is_empty() {
                    self.ensure_visible_section();
                } else {
                    self.section = CatalogSection::Results;
                }
                Ok(true)
            }
            CatalogFetch::Shelf { index, .. } => {
                let Some(shelf) = self.shelves.get_mut(index) else {
                    return Ok(false);
                };
                shelf.loading = false;
                match catalog_api::decode_gallery(completed) {
                    Ok(books) => shelf.books = books,
                    Err(e) => tracing::warn!(subject = shelf.subject, error = %e, "failed to load shelf"),
                }
                self.ensure_visible_section();
                Ok(true)
            }
            CatalogFetch::GenreStat { genre } => {
                match catalog_api::decode_page(completed) {
                    Ok(page) if page.total_found > 0 => {
                        self.genre_stats.insert(genre, page.total_found);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(genre = %genre, error = %e, "failed to load genre count"),
                }
                Ok(true)
            }
            CatalogFetch::Details { .. } => {
                let details = catalog_api::decode_details(completed)
                    .map_err(|e| tracing::warn!(error = %e, "failed to load book details"))
                    .ok();
                if let Some(modal) = self.modal.as_mut() {
                    modal.details = details;
                    modal.details_pending = false;
                }
                Ok(true)
            }
            CatalogFetch::ModalAuthor { slot, .. } => {
                let outcome = catalog_api::decode_author(completed);
                let Some(modal) = self.modal.as_mut() else {
                    return Ok(false);
                };
                let settled = modal
                    .author_batch
                    .as_mut()
                    .is_some_and(|batch| batch.settle(slot, outcome));
                if settled {
                    if let Some(batch) = modal.author_batch.take() {
                        modal.authors = batch.into_fulfilled();
                        tracing::debug!(loaded = modal.authors.len(), "author batch settled");
                    }
                    return Ok(true);
                }
                Ok(false)
            }
            CatalogFetch::CoverProbe { .. } => {
                if let Err(e) = completed.ensure_success() {
                    tracing::debug!(error = %e, "cover failed to load, using placeholder");
                    if let Some(modal) = self.modal.as_mut() {
                        modal.cover_failed = true;
                    }
                    return Ok(true);
                }
                Ok(false)
            }
            CatalogFetch::TimelineAuthor { .. } => Ok(self.settle_timeline(
                TIMELINE_AUTHOR_SLOT,
                catalog_api::decode_author(completed).map(TimelinePart::Author),
            )),
            CatalogFetch::TimelineWorks { .. } => Ok(self.settle_timeline(
                TIMELINE_WORKS_SLOT,
                catalog_api::decode_works(completed).map(TimelinePart::Works),
            )),
            CatalogFetch::WorkCoverCheck { cover, .. } => {
                if let Err(e) = completed.ensure_success() {
                    tracing::debug!(cover, error = %e, "work cover failed to load, hiding it");
                    if let Some(timeline) = self.timeline.as_mut() {
                        timeline.failed_covers.insert(cover);
                    }
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    /// One image check per distinct work cover of the open timeline.
    fn check_work_covers(&mut self) -> Vec<Action> {
        let Some(timeline) = self.timeline.as_ref() else {
            return vec![];
        };
        let mut covers: Vec<i64> = timeline.works.iter().filter_map(AuthorWork::first_cover).collect();
        covers.sort_unstable();
        covers.dedup();

        let generation = self.timeline_generation;
        covers
            .into_iter()
            .map(|cover| {
                let request = ApiRequest::probe(self.client.cover_url(cover, CoverSize::Small));
                self.issue(request, CatalogFetch::WorkCoverCheck { generation, cover })
            })
            .collect()
    }

    fn is_stale(&self, kind: &CatalogFetch) -> bool {
        match kind {
            CatalogFetch::Startup { generation, .. } => {
                *generation != self.startup_generation || self.startup.is_none()
            }
            CatalogFetch::Collection { generation } => *generation != self.collection_generation,
            CatalogFetch::Search { generation } => *generation != self.search_generation,
            CatalogFetch::Shelf { index, generation } => self
                .shelves
                .get(*index)
                .map_or(true, |shelf| shelf.generation != *generation),
            CatalogFetch::GenreStat { .. } => false,
            CatalogFetch::Details { generation }
            | CatalogFetch::ModalAuthor { generation, .. }
            | CatalogFetch::CoverProbe { generation } => {
                *generation != self.modal_generation || self.modal.is_none()
            }
            CatalogFetch::TimelineAuthor { generation }
            | CatalogFetch::TimelineWorks { generation }
            | CatalogFetch::WorkCoverCheck { generation, .. } => {
                *generation != self.timeline_generation || self.timeline.is_none()
            }
        }
    }

    fn apply_startup_entry(&mut self, slot: usize, completed: &Completed) -> bool {
        let outcome = if slot == TRENDING_SLOT {
            catalog_api::decode_trending(completed)
        } else {
            catalog_api::decode_gallery(completed)
        };

        let settled = self
            .startup
            .as_mut()
            .is_some_and(|batch| batch.settle(slot, outcome));
        if !settled {
            return false;
        }

        let Some(batch) = self.startup.take() else {
            return false;
        };
        let mut entries = batch.into_outcomes().into_iter().map(|entry| entry.ok());
        self.trending = entries.next().flatten().unwrap_or_default();
        self.collection = entries.next().flatten().unwrap_or_default();
        self.selected_genre = STARTUP_GENRE.to_string();
        self.loading = false;
        self.ensure_visible_section();

        tracing::info!(
            trending = self.trending.len(),
            collection = self.collection.len(),
            "catalog startup settled"
        );
        true
    }

    fn settle_timeline(&mut self, slot: usize, outcome: Result<TimelinePart>) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        let settled = timeline
            .pending
            .as_mut()
            .is_some_and(|batch| batch.settle(slot, outcome));
        if !settled {
            return false;
        }

        if let Some(batch) = timeline.pending.take() {
            for part in batch.into_fulfilled() {
                match part {
                    TimelinePart::Author(author) => timeline.author = Some(author),
                    TimelinePart::Works(works) => timeline.works = works,
                }
            }
        }
        true
    }

    /// Sections currently on screen, top to bottom.
    #[must_use]
    pub fn visible_sections(&self) -> Vec<CatalogSection> {
        if !self.search_results.is_empty() {
            return vec![CatalogSection::Results];
        }

        let mut sections = vec![CatalogSection::Genres];
        if !self.trending.is_empty() {
            sections.push(CatalogSection::Trending);
        }
        if !self.collection.is_empty() {
            sections.push(CatalogSection::Collection);
        }
        sections.extend(
            self.shelves
                .iter()
                .enumerate()
                .filter(|(_, shelf)| shelf.loading || !shelf.books.is_empty())
                .map(|(index, _)| CatalogSection::Shelf(index)),
        );
        sections
    }

    /// Visible sections that can take focus. A shelf still loading is drawn
    /// but skipped until it has books.
    fn focusable_sections(&self) -> Vec<CatalogSection> {
        let mut sections = self.visible_sections();
        sections.retain(|section| {
            !matches!(section, CatalogSection::Shelf(_)) || !self.gallery_books(*section).is_empty()
        });
        sections
    }

    fn ensure_visible_section(&mut self) {
        let sections = self.focusable_sections();
        if !sections.contains(&self.section) {
            self.section = sections.first().copied().unwrap_or(CatalogSection::Genres);
        }
    }

    /// Moves focus to the next or previous visible section, wrapping.
    pub fn cycle_section(&mut self, forward: bool) {
        let sections = self.focusable_sections();
        let current = sections.iter().position(|s| *s == self.section).unwrap_or(0);
        let next = if forward {
            (current + 1) % sections.len()
        } else {
            (current + sections.len() - 1) % sections.len()
        };
        self.section = sections[next];
    }

    /// Books of a gallery section.
    #[must_use]
    pub fn gallery_books(&self, section: CatalogSection) -> &[Book] {
        match section {
            CatalogSection::Results => &self.search_results,
            CatalogSection::Trending => &self.trending,
            CatalogSection::Collection => &self.collection,
            CatalogSection::Shelf(index) => self
                .shelves
                .get(index)
                .map(|shelf| shelf.books.as_slice())
                .unwrap_or_default(),
            CatalogSection::Genres => &[],
        }
    }

    #[must_use]
    pub fn gallery_scroll(&self, section: CatalogSection) -> GalleryScroll {
        match section {
            CatalogSection::Results => self.results_gallery,
            CatalogSection::Trending => self.trending_gallery,
            CatalogSection::Collection => self.collection_gallery,
            CatalogSection::Shelf(index) => self.shelves.get(index).map(|s| s.gallery).unwrap_or_default(),
            CatalogSection::Genres => GalleryScroll::default(),
        }
    }

    fn gallery_mut(&mut self, section: CatalogSection) -> Option<(&mut GalleryScroll, usize)> {
        match section {
            CatalogSection::Results => Some((&mut self.results_gallery, self.search_results.len())),
            CatalogSection::Trending => Some((&mut self.trending_gallery, self.trending.len())),
            CatalogSection::Collection => Some((&mut self.collection_gallery, self.collection.len())),
            CatalogSection::Shelf(index) => self
                .shelves
                .get_mut(index)
                .map(|shelf| (&mut shelf.gallery, shelf.books.len())),
            CatalogSection::Genres => None,
        }
    }

    /// Horizontal movement: gallery cursor, genre tile, or modal author.
    pub fn move_horizontal(&mut self, forward: bool) -> bool {
        if self.timeline.is_some() {
            return false;
        }
        if let Some(modal) = self.modal.as_mut() {
            let last = modal.authors.len().saturating_sub(1);
            modal.author_cursor = if forward {
                (modal.author_cursor + 1).min(last)
            } else {
                modal.author_cursor.saturating_sub(1)
            };
            return true;
        }

        let width = self.gallery_width();
        let section = self.section;
        if section == CatalogSection::Genres {
            let last = self.landscape_len().saturating_sub(1);
            self.genre_cursor = if forward {
                (self.genre_cursor + 1).min(last)
            } else {
                self.genre_cursor.saturating_sub(1)
            };
            return true;
        }
        if let Some((gallery, len)) = self.gallery_mut(section) {
            gallery.step(forward, len, width);
            return true;
        }
        false
    }

    /// Vertical movement: genre rows, then neighbouring sections.
    pub fn move_vertical(&mut self, down: bool) -> bool {
        if self.modal.is_some() || self.timeline.is_some() {
            return false;
        }
        if self.section == CatalogSection::Genres {
            let len = self.landscape_len();
            if down && self.genre_cursor + GENRE_COLUMNS < len {
                self.genre_cursor += GENRE_COLUMNS;
                return true;
            }
            if !down && self.genre_cursor >= GENRE_COLUMNS {
                self.genre_cursor -= GENRE_COLUMNS;
                return true;
            }
        }

        let sections = self.focusable_sections();
        let current = sections.iter().position(|s| *s == self.section).unwrap_or(0);
        let target = if down {
            (current + 1).min(sections.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        let changed = sections[target] != self.section;
        self.section = sections[target];
        changed
    }

    /// Scrolls the focused gallery by one card stride.
    pub fn page(&mut self, forward: bool) -> bool {
        if self.modal.is_some() {
            return false;
        }
        let width = self.gallery_width();
        let section = self.section;
        self.gallery_mut(section).is_some_and(|(gallery, len)| {
            gallery.scroll_page(forward, len, width);
            true
        })
    }

    /// Enter: pick the focused genre, open the focused book, or open the
    /// selected author's timeline from the modal.
    ///
    /// # Errors
    ///
    /// Returns an error if a request URL cannot be built.
    pub fn select(&mut self) -> Result<Vec<Action>> {
        if self.timeline.is_some() {
            return Ok(vec![]);
        }
        if self.modal.is_some() {
            return self.open_timeline();
        }

        let section = self.section;
        if section == CatalogSection::Genres {
            let Some(genre) = self.genres.get(self.genre_cursor).cloned() else {
                return Ok(vec![]);
            };
            return self.select_genre(genre);
        }

        let cursor = self.gallery_scroll(section).cursor;
        let Some(book) = self.gallery_books(section).get(cursor).cloned() else {
            return Ok(vec![]);
        };
        Ok(self.open_book(book))
    }

    /// Esc: leave the text box, then close the topmost overlay.
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Typing {
            self.input_mode = InputMode::Normal;
            return true;
        }
        if self.timeline.is_some() {
            self.close_timeline();
            return true;
        }
        if self.modal.is_some() {
            self.close_modal();
            return true;
        }
        false
    }

    pub fn focus_search(&mut self) {
        if self.modal.is_none() {
            self.input_mode = InputMode::Typing;
        }
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if self.input_mode != InputMode::Typing {
            return false;
        }
        self.search_input.push(c);
        true
    }

    pub fn pop_char(&mut self) -> bool {
        if self.input_mode != InputMode::Typing {
            return false;
        }
        self.search_input.pop().is_some()
    }

    fn landscape_len(&self) -> usize {
        self.genres.len().min(LANDSCAPE_GENRES)
    }

    pub fn resize(&mut self, cols: usize) {
        if self.viewport_cols == cols {
            return;
        }
        self.viewport_cols = cols;
        let width = self.gallery_width();
        for section in self.visible_sections() {
            if let Some((gallery, len)) = self.gallery_mut(section) {
                gallery.clamp(len, width);
            }
        }
    }
}
