use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keyboard::char_to_keystroke;

/// Typos corrected out of the box.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("teh", "the"),
    ("adn", "and"),
    ("taht", "that"),
    ("yuo", "you"),
    ("wiht", "with"),
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("acheive", "achieve"),
    ("beleive", "believe"),
    ("definately", "definitely"),
    ("accomodate", "accommodate"),
    ("neccessary", "necessary"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub typo: String,
    pub correction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("dictionary entry has an empty typo")]
    EmptyTypo,
    #[error("typo {0:?} must contain only lowercase ASCII letters")]
    InvalidTypo(String),
    #[error("typo {0:?} appears more than once")]
    DuplicateTypo(String),
    #[error("typo {0:?} has an empty correction")]
    EmptyCorrection(String),
    #[error("correction {correction:?} contains {c:?}, which has no keystroke")]
    UntypableCorrection { correction: String, c: char },
}

/// Immutable typo -> correction table with exact-match lookup.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|&(typo, correction)| (typo.to_string(), correction.to_string()))
            .collect();
        Self { entries }
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = DictionaryEntry>,
    ) -> Result<Self, DictionaryError> {
        let mut map = HashMap::new();

        for DictionaryEntry { typo, correction } in entries {
            if typo.is_empty() {
                return Err(DictionaryError::EmptyTypo);
            }
            if !typo.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(DictionaryError::InvalidTypo(typo));
            }
            if correction.is_empty() {
                return Err(DictionaryError::EmptyCorrection(typo));
            }
            if let Some(c) = correction.chars().find(|&c| char_to_keystroke(c).is_none()) {
                return Err(DictionaryError::UntypableCorrection { correction, c });
            }
            if map.contains_key(&typo) {
                return Err(DictionaryError::DuplicateTypo(typo));
            }
            map.insert(typo, correction);
        }

        Ok(Self { entries: map })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<DictionaryEntry> =
            serde_json::from_str(json).context("failed to parse dictionary JSON")?;
        Ok(Self::from_entries(entries)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("invalid dictionary {}", path.display()))
    }

    /// Exact-match lookup. Callers pass the word already folded to lowercase.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by typo.
    pub fn entries(&self) -> Vec<DictionaryEntry> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .map(|(typo, correction)| DictionaryEntry {
                typo: typo.clone(),
                correction: correction.clone(),
            })
            .collect();
        out.sort_by(|a, b| a.typo.cmp(&b.typo));
        out
    }

    /// Typos too short to ever reach a lookup.
    pub fn unreachable_entries(&self, min_word_length: usize) -> Vec<&str> {
        let mut out: Vec<_> = self
            .entries
            .keys()
            .filter(|typo| typo.len() < min_word_length)
            .map(String::as_str)
            .collect();
        out.sort_unstable();
        out
    }
}
