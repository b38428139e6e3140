//! Fiction-trivia screen: state and operations.
//!
//! Startup issues eight concurrent requests (the four listings and one random
//! pick per resource) joined by a [`SettledBatch`]. A language change re-runs
//! the whole batch under a new epoch so replies in the old language are dropped.

mod view;

use super::batch::{Generation, SettledBatch};
use super::modes::InputMode;
use super::Action;
use crate::api::trivia::{self as trivia_api, TriviaClient, TriviaItem, TriviaList, TriviaResource};
use crate::api::{ApiRequest, Completed, HttpResponse, RequestTracker};
use crate::domain::error::Result;
use crate::domain::trivia::{Character, House, Language, Spell, TriviaBook};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::HashMap;

/// Shown instead of a book cover that failed to load.
pub const BOOK_PLACEHOLDER: &str = "https://via.placeholder.com/300x400/7c3aed/ffffff?text=Harry+Potter";

/// Shown instead of a character portrait that failed to load.
pub const CHARACTER_PLACEHOLDER: &str = "https://via.placeholder.com/300x400/6b7280/ffffff?text=Character";

const STARTUP_SLOTS: usize = TriviaResource::ALL.len() * 2;

/// What an in-flight trivia request is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaFetch {
    /// Slots `0..4` are listings and `4..8` random picks, both in
    /// [`TriviaResource::ALL`] order.
    Startup { epoch: Generation, slot: usize },
    Reroll {
        epoch: Generation,
        resource: TriviaResource,
        generation: Generation,
    },
    ImageProbe { generation: Generation },
}

#[derive(Debug)]
enum TriviaPayload {
    List(TriviaList),
    Item(TriviaItem),
}

/// Detail overlay for one record.
#[derive(Debug, Clone)]
pub struct TriviaDetail {
    pub item: TriviaItem,
    pub image_failed: bool,
}

/// State of the trivia screen.
#[derive(Debug)]
pub struct TriviaState {
    client: TriviaClient,
    tracker: RequestTracker<TriviaFetch>,

    /// True until the current startup batch settles.
    pub loading: bool,
    startup: Option<SettledBatch<TriviaPayload>>,
    epoch: Generation,

    pub books: Vec<TriviaBook>,
    pub characters: Vec<Character>,
    pub houses: Vec<House>,
    pub spells: Vec<Spell>,
    /// Random pick per resource.
    pub featured: HashMap<TriviaResource, TriviaItem>,
    reroll_generations: HashMap<TriviaResource, Generation>,

    pub tab: TriviaResource,
    /// Index into `visible`.
    pub cursor: usize,
    pub filter: String,
    /// Indices of the active tab's records that pass the filter.
    visible: Vec<usize>,
    pub input_mode: InputMode,

    pub detail: Option<TriviaDetail>,
    detail_generation: Generation,
}

impl Default for TriviaState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl TriviaState {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            client: TriviaClient::new(language),
            tracker: RequestTracker::default(),
            loading: true,
            startup: None,
            epoch: Generation::default(),
            books: Vec::new(),
            characters: Vec::new(),
            houses: Vec::new(),
            spells: Vec::new(),
            featured: HashMap::new(),
            reroll_generations: HashMap::new(),
            tab: TriviaResource::Books,
            cursor: 0,
            filter: String::new(),
            visible: Vec::new(),
            input_mode: InputMode::Normal,
            detail: None,
            detail_generation: Generation::default(),
        }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.client.language()
    }

    fn issue(&mut self, request: ApiRequest, kind: TriviaFetch) -> Action {
        Action::Fetch(self.tracker.issue(request, kind))
    }

    /// Issues the startup batch in the client's current language.
    pub fn mount(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("trivia_mount", language = %self.language()).entered();

        let epoch = self.epoch.advance();
        self.loading = true;
        self.startup = Some(SettledBatch::new(STARTUP_SLOTS));

        let mut requests: Vec<ApiRequest> = TriviaResource::ALL
            .iter()
            .map(|&resource| self.client.all(resource))
            .collect();
        requests.extend(TriviaResource::ALL.iter().map(|&resource| self.client.random(resource)));

        requests
            .into_iter()
            .enumerate()
            .map(|(slot, request)| self.issue(request, TriviaFetch::Startup { epoch, slot }))
            .collect()
    }

    /// Switches to the next language and reloads everything in it.
    pub fn change_language(&mut self) -> Vec<Action> {
        let language = self.language().next();
        self.set_language(language)
    }

    /// Switches to `language` and reloads everything in it.
    pub fn set_language(&mut self, language: Language) -> Vec<Action> {
        tracing::info!(language = %language, "changing trivia language");
        self.client.set_language(language);
        self.close_detail();
        self.mount()
    }

    /// Fetches a fresh random pick for the active tab.
    pub fn reroll(&mut self) -> Vec<Action> {
        if self.loading {
            return vec![];
        }
        let resource = self.tab;
        let epoch = self.epoch;
        let generation = self.reroll_generations.entry(resource).or_default().advance();
        let request = self.client.random(resource);
        tracing::debug!(resource = resource.label(), "rerolling featured pick");
        vec![self.issue(
            request,
            TriviaFetch::Reroll {
                epoch,
                resource,
                generation,
            },
        )]
    }

    /// Applies a host response.
    ///
    /// Returns whether the screen should re-render.
    ///
    /// # Errors
    ///
    /// Fetch and decode failures degrade in place and are only logged.
    pub fn handle_response(&mut self, response: HttpResponse) -> Result<bool> {
        let Some((kind, completed)) = self.tracker.resolve(response) else {
            return Ok(false);
        };
        let _span =
            tracing::debug_span!("trivia_response", kind = ?kind, status = completed.status).entered();

        match kind {
            TriviaFetch::Startup { epoch, slot } => {
                if epoch != self.epoch {
                    tracing::debug!("discarding response from a previous language");
                    return Ok(false);
                }
                Ok(self.apply_startup_entry(slot, &completed))
            }
            TriviaFetch::Reroll {
                epoch,
                resource,
                generation,
            } => {
                let current = self.reroll_generations.get(&resource).copied().unwrap_or_default();
                if epoch != self.epoch || generation != current {
                    tracing::debug!("discarding superseded reroll");
                    return Ok(false);
                }
                match trivia_api::decode_item(resource, &completed) {
                    Ok(item) => {
                        self.featured.insert(resource, item);
                        Ok(true)
                    }
                    Err(e) => {
                        tracing::warn!(resource = resource.label(), error = %e, "reroll failed");
                        Ok(false)
                    }
                }
            }
            TriviaFetch::ImageProbe { generation } => {
                if generation != self.detail_generation {
                    return Ok(false);
                }
                let Some(detail) = self.detail.as_mut() else {
                    return Ok(false);
                };
                if let Err(e) = completed.ensure_success() {
                    tracing::debug!(error = %e, "image failed to load, using placeholder");
                    detail.image_failed = true;
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    fn apply_startup_entry(&mut self, slot: usize, completed: &Completed) -> bool {
        let kinds = TriviaResource::ALL.len();
        let outcome = match (slot / kinds, TriviaResource::ALL.get(slot % kinds)) {
            (0, Some(&resource)) => trivia_api::decode_list(resource, completed).map(TriviaPayload::List),
            (_, Some(&resource)) => trivia_api::decode_item(resource, completed).map(TriviaPayload::Item),
            (_, None) => return false,
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

        self.books.clear();
        self.characters.clear();
        self.houses.clear();
        self.spells.clear();
        self.featured.clear();

        for (slot, entry) in batch.into_outcomes().into_iter().enumerate() {
            match entry.ok() {
                Some(TriviaPayload::List(TriviaList::Books(books))) => self.books = books,
                Some(TriviaPayload::List(TriviaList::Characters(characters))) => self.characters = characters,
                Some(TriviaPayload::List(TriviaList::Houses(houses))) => self.houses = houses,
                Some(TriviaPayload::List(TriviaList::Spells(spells))) => self.spells = spells,
                Some(TriviaPayload::Item(item)) => {
                    self.featured.insert(TriviaResource::ALL[slot % kinds], item);
                }
                None => {}
            }
        }

        self.loading = false;
        self.cursor = 0;
        self.apply_filter();

        tracing::info!(
            language = %self.language(),
            books = self.books.len(),
            characters = self.characters.len(),
            houses = self.houses.len(),
            spells = self.spells.len(),
            featured = self.featured.len(),
            "trivia startup settled"
        );
        true
    }

    /// Number of records in `resource`, ignoring the filter.
    #[must_use]
    pub fn count(&self, resource: TriviaResource) -> usize {
        match resource {
            TriviaResource::Books => self.books.len(),
            TriviaResource::Characters => self.characters.len(),
            TriviaResource::Houses => self.houses.len(),
            TriviaResource::Spells => self.spells.len(),
        }
    }

    /// Searchable name of record `index` of the active tab.
    fn name_at(&self, index: usize) -> Option<String> {
        match self.tab {
            TriviaResource::Books => self.books.get(index).map(|b| b.title.clone()),
            TriviaResource::Characters => self.characters.get(index).map(|c| c.full_name.clone()),
            TriviaResource::Houses => self.houses.get(index).map(|h| h.house.clone()),
            TriviaResource::Spells => self.spells.get(index).map(|s| s.spell.clone()),
        }
    }

    /// Record `index` of the active tab as an owned item.
    fn item_at(&self, index: usize) -> Option<TriviaItem> {
        match self.tab {
            TriviaResource::Books => self.books.get(index).cloned().map(TriviaItem::Book),
            TriviaResource::Characters => self.characters.get(index).cloned().map(TriviaItem::Character),
            TriviaResource::Houses => self.houses.get(index).cloned().map(TriviaItem::House),
            TriviaResource::Spells => self.spells.get(index).cloned().map(TriviaItem::Spell),
        }
    }

    /// Recomputes the visible records of the active tab.
    ///
    /// Every whitespace-separated token of the filter must fuzzy-match the
    /// record's name. The cursor is clamped to the new bounds.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filter",
            tab = self.tab.label(),
            total = self.count(self.tab),
            query_len = self.filter.len()
        )
        .entered();

        let tokens: Vec<String> = self.filter.split_whitespace().map(str::to_lowercase).collect();
        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        self.visible = (0..self.count(self.tab))
            .filter(|&index| {
                matcher.as_ref().map_or(true, |m| {
                    let name = self.name_at(index).unwrap_or_default().to_lowercase();
                    tokens.iter().all(|token| m.fuzzy_match(&name, token).is_some())
                })
            })
            .collect();

        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
        tracing::debug!(visible = self.visible.len(), "filter applied");
    }

    /// Record indices of the active tab that pass the filter.
    #[must_use]
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Switches tabs, wrapping. The filter text is kept and re-applied.
    pub fn cycle_tab(&mut self, forward: bool) {
        let all = TriviaResource::ALL;
        let index = all.iter().position(|r| *r == self.tab).unwrap_or(0);
        let next = if forward {
            (index + 1) % all.len()
        } else {
            (index + all.len() - 1) % all.len()
        };
        self.tab = all[next];
        self.cursor = 0;
        self.apply_filter();
    }

    /// Moves the list cursor, wrapping at both ends.
    pub fn move_cursor(&mut self, down: bool) -> bool {
        if self.detail.is_some() || self.visible.is_empty() {
            return false;
        }
        let len = self.visible.len();
        self.cursor = if down {
            (self.cursor + 1) % len
        } else if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
        true
    }

    /// Opens the detail overlay for the selected record.
    pub fn open_detail(&mut self) -> Vec<Action> {
        if self.detail.is_some() {
            return vec![];
        }
        let Some(item) = self.visible.get(self.cursor).and_then(|&index| self.item_at(index)) else {
            return vec![];
        };
        self.show_detail(item)
    }

    /// Opens the detail overlay for the active tab's featured pick.
    pub fn open_featured(&mut self) -> Vec<Action> {
        let Some(item) = self.featured.get(&self.tab).cloned() else {
            return vec![];
        };
        self.show_detail(item)
    }

    fn show_detail(&mut self, item: TriviaItem) -> Vec<Action> {
        let generation = self.detail_generation.advance();
        let image = match &item {
            TriviaItem::Book(book) => Some(book.cover.clone()),
            TriviaItem::Character(character) => Some(character.image.clone()),
            TriviaItem::House(_) | TriviaItem::Spell(_) => None,
        };

        let mut detail = TriviaDetail {
            item,
            image_failed: false,
        };
        let mut actions = vec![];
        match image {
            Some(url) if url.trim().is_empty() => detail.image_failed = true,
            Some(url) => actions.push(self.issue(ApiRequest::probe(url), TriviaFetch::ImageProbe { generation })),
            None => {}
        }

        self.detail = Some(detail);
        actions
    }

    pub fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.detail_generation.advance();
        }
    }

    /// Esc: leave the filter box, close the detail, then clear the filter.
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Typing {
            self.input_mode = InputMode::Normal;
            return true;
        }
        if self.detail.is_some() {
            self.close_detail();
            return true;
        }
        if !self.filter.is_empty() {
            self.filter.clear();
            self.apply_filter();
            return true;
        }
        false
    }

    pub fn focus_filter(&mut self) {
        if self.detail.is_none() {
            self.input_mode = InputMode::Typing;
        }
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if self.input_mode != InputMode::Typing {
            return false;
        }
        self.filter.push(c);
        self.apply_filter();
        true
    }

    pub fn pop_char(&mut self) -> bool {
        if self.input_mode != InputMode::Typing || self.filter.pop().is_none() {
            return false;
        }
        self.apply_filter();
        true
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.apply_filter();
    }
}
