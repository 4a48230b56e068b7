//! Roster: the immutable character pool selections draw from.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One candidate: display text plus an image URL for the embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub text: String,
    pub image: String,
}

/// Immutable ordered pool of characters.
///
/// Cloning is cheap (shared backing storage), so every live selection can
/// hold its own handle to the same roster.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Arc<[Character]>,
}

impl Roster {
    pub fn new(entries: Vec<Character>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Character> {
        self.entries.get(idx)
    }

    pub fn entries(&self) -> &[Character] {
        &self.entries
    }
}

impl From<Vec<Character>> for Roster {
    fn from(entries: Vec<Character>) -> Self {
        Self::new(entries)
    }
}
