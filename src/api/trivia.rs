//! Potter API client.
//!
//! [`TriviaClient`] is a session value: it owns the display language and every
//! request path is prefixed with it. The controller that owns the client is the
//! only thing that can change the language.

use super::request::{ApiRequest, Completed};
use crate::domain::error::Result;
use crate::domain::trivia::{Character, House, Language, Spell, TriviaBook};

/// Base URL of the trivia service.
pub const BASE_URL: &str = "https://potterapi-fedeperin.vercel.app";

/// The four collections the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaResource {
    Books,
    Characters,
    Houses,
    Spells,
}

impl TriviaResource {
    pub const ALL: [Self; 4] = [Self::Books, Self::Characters, Self::Houses, Self::Spells];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Books => "/books",
            Self::Characters => "/characters",
            Self::Houses => "/houses",
            Self::Spells => "/spells",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Characters => "Characters",
            Self::Houses => "Houses",
            Self::Spells => "Spells",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaClient {
    base_url: String,
    language: Language,
}

impl Default for TriviaClient {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl TriviaClient {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            language,
        }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        tracing::debug!(from = %self.language, to = %language, "trivia language changed");
        self.language = language;
    }

    fn request(&self, endpoint: String) -> ApiRequest {
        ApiRequest {
            url: format!("{}/{}{endpoint}", self.base_url, self.language.code()),
            endpoint,
        }
    }

    /// Full listing of `resource`.
    #[must_use]
    pub fn all(&self, resource: TriviaResource) -> ApiRequest {
        self.request(resource.path().to_string())
    }

    /// One random entry of `resource`.
    #[must_use]
    pub fn random(&self, resource: TriviaResource) -> ApiRequest {
        self.request(format!("{}/random", resource.path()))
    }

    #[must_use]
    pub fn all_books(&self) -> ApiRequest {
        self.all(TriviaResource::Books)
    }

    #[must_use]
    pub fn all_characters(&self) -> ApiRequest {
        self.all(TriviaResource::Characters)
    }

    #[must_use]
    pub fn all_houses(&self) -> ApiRequest {
        self.all(TriviaResource::Houses)
    }

    #[must_use]
    pub fn all_spells(&self) -> ApiRequest {
        self.all(TriviaResource::Spells)
    }

    #[must_use]
    pub fn random_book(&self) -> ApiRequest {
        self.random(TriviaResource::Books)
    }

    #[must_use]
    pub fn random_character(&self) -> ApiRequest {
        self.random(TriviaResource::Characters)
    }

    #[must_use]
    pub fn random_house(&self) -> ApiRequest {
        self.random(TriviaResource::Houses)
    }

    #[must_use]
    pub fn random_spell(&self) -> ApiRequest {
        self.random(TriviaResource::Spells)
    }
}

/// A decoded listing of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaList {
    Books(Vec<TriviaBook>),
    Characters(Vec<Character>),
    Houses(Vec<House>),
    Spells(Vec<Spell>),
}

/// A decoded random pick of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaItem {
    Book(TriviaBook),
    Character(Character),
    House(House),
    Spell(Spell),
}

/// Decodes a listing response for `resource`.
///
/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_list(resource: TriviaResource, completed: &Completed) -> Result<TriviaList> {
    Ok(match resource {
        TriviaResource::Books => TriviaList::Books(completed.decode()?),
        TriviaResource::Characters => TriviaList::Characters(completed.decode()?),
        TriviaResource::Houses => TriviaList::Houses(completed.decode()?),
        TriviaResource::Spells => TriviaList::Spells(completed.decode()?),
    })
}

/// Decodes a random-pick response for `resource`.
///
/// # Errors
///
/// Fails on a non-success status or an undecodable body.
pub fn decode_item(resource: TriviaResource, completed: &Completed) -> Result<TriviaItem> {
    Ok(match resource {
        TriviaResource::Books => TriviaItem::Book(completed.decode()?),
        TriviaResource::Characters => TriviaItem::Character(completed.decode()?),
        TriviaResource::Houses => TriviaItem::House(completed.decode()?),
        TriviaResource::Spells => TriviaItem::Spell(completed.decode()?),
    })
}
