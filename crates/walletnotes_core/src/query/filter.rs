//! Address/search/tag filtering.
//!
//! # Invariants
//! - Results keep collection order; no relevance sorting.
//! - Identical inputs always produce identical output.
//! - Distinct sets are computed from the full collection, never from a
//!   filtered view.

use crate::model::note::Note;
use std::collections::HashSet;

const ADDRESS_HEAD_CHARS: usize = 8;
const ADDRESS_TAIL_CHARS: usize = 6;

/// Filter parameters; empty strings and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive exact address match.
    pub selected_address: String,
    /// Case-insensitive substring over title, content and address.
    pub search_query: String,
    /// Exact tag membership.
    pub filter_tag: Option<String>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.selected_address = address.into();
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.filter_tag = Some(tag.into());
        self
    }

    /// Returns whether `note` passes all three filters.
    pub fn matches(&self, note: &Note) -> bool {
        self.matches_address(note) && self.matches_search(note) && self.matches_tag(note)
    }

    fn matches_address(&self, note: &Note) -> bool {
        self.selected_address.is_empty() || note.address_matches(&self.selected_address)
    }

    fn matches_search(&self, note: &Note) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        [&note.title, &note.content, &note.address]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_tag(&self, note: &Note) -> bool {
        match self.filter_tag.as_deref() {
            None | Some("") => true,
            Some(tag) => note.tags.iter().any(|candidate| candidate == tag),
        }
    }
}

/// Collection counters shown next to the note list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteStats {
    pub total_notes: usize,
    pub wallets: usize,
    pub tags: usize,
}

/// Notes passing `filter`, in collection order.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}

/// Distinct addresses in first-seen order (exact string distinctness).
pub fn distinct_addresses(notes: &[Note]) -> Vec<String> {
    first_seen(notes.iter().map(|note| note.address.as_str()))
}

/// Distinct tags across all notes in first-seen order.
pub fn distinct_tags(notes: &[Note]) -> Vec<String> {
    first_seen(notes.iter().flat_map(|note| note.tags.iter().map(String::as_str)))
}

pub fn collection_stats(notes: &[Note]) -> NoteStats {
    NoteStats {
        total_notes: notes.len(),
        wallets: distinct_addresses(notes).len(),
        tags: distinct_tags(notes).len(),
    }
}

/// Shortens an address to `head...tail` for compact labels.
///
/// Addresses too short to shorten are returned unchanged.
pub fn abbreviate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= ADDRESS_HEAD_CHARS + ADDRESS_TAIL_CHARS {
        return address.to_string();
    }
    let head: String = chars[..ADDRESS_HEAD_CHARS].iter().collect();
    let tail: String = chars[chars.len() - ADDRESS_TAIL_CHARS..].iter().collect();
    format!("{head}...{tail}")
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
