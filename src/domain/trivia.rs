//! Fiction-trivia records as returned by the Potter API.
//!
//! The upstream uses `camelCase` keys; every record is renamed wholesale. Some
//! characters come back with missing fields, so everything defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::BookscopeError;

/// A book of the series. Distinct from the catalog [`crate::domain::catalog::Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TriviaBook {
    pub number: u32,
    pub title: String,
    pub original_title: String,
    pub release_date: String,
    pub description: String,
    pub pages: u32,
    pub cover: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub full_name: String,
    pub nickname: String,
    pub hogwarts_house: String,
    pub interpreted_by: String,
    pub children: Vec<String>,
    pub image: String,
    pub birthdate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct House {
    pub house: String,
    pub emoji: String,
    pub founder: String,
    pub colors: Vec<String>,
    pub animal: String,
    pub element: String,
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Spell {
    pub spell: String,
    #[serde(rename = "use")]
    pub usage: String,
}

/// Locales served by the trivia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    Pt,
    It,
    De,
}

impl Language {
    pub const ALL: [Self; 6] = [Self::En, Self::Es, Self::Fr, Self::Pt, Self::It, Self::De];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Pt => "pt",
            Self::It => "it",
            Self::De => "de",
        }
    }

    /// The next language in [`Language::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|lang| *lang == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = BookscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BookscopeError::Config(format!("unsupported language: {s}")))
    }
}
