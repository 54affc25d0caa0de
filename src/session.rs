//! # Search Session Module
//!
//! Per-conversation record of the current search: the candidate list, the
//! page cursor, and the mapping from selection tokens to candidate URLs.
//!
//! Every search gets a generation number. Tokens carry it:
//! `link_{generation}_{index}` for a candidate and `next_page_{generation}`
//! for the "Next" button. Buttons left on screen by an older search carry an
//! older generation and are ignored once a newer session replaces it.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::search::Candidate;

const NEXT_PAGE_TOKEN_PREFIX: &str = "next_page_";
const SELECTION_TOKEN_PREFIX: &str = "link_";

/// One page of a session's candidates
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Candidates on this page, at most `page_size`
    pub items: &'a [Candidate],
    /// Position of `items[0]` in the full candidate list
    pub first_index: usize,
    /// Whether another page follows this one
    pub has_next: bool,
    /// Generation of the session the page was cut from
    pub generation: u64,
}

impl<'a> Page<'a> {
    /// Candidates on this page paired with their selection tokens
    pub fn entries(&self) -> impl Iterator<Item = (String, &'a Candidate)> {
        let items: &'a [Candidate] = self.items;
        let first_index = self.first_index;
        let generation = self.generation;
        items.iter().enumerate().map(move |(offset, candidate)| {
            (selection_token(generation, first_index + offset), candidate)
        })
    }

    /// Callback data for this page's "Next" button
    pub fn next_token(&self) -> String {
        next_page_token(self.generation)
    }
}

/// What a callback button asks for
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    NextPage,
    /// Resolve the candidate at this absolute URL
    Select(String),
    /// Unknown token, or a token from an older search
    Ignore,
}

/// Candidates of the latest search and the page currently shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    candidates: Vec<Candidate>,
    page_index: usize,
    page_size: usize,
    generation: u64,
}

impl SearchSession {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self::with_page_size(candidates, DEFAULT_PAGE_SIZE)
    }

    /// Create a session with a custom page size (zero is treated as one)
    pub fn with_page_size(candidates: Vec<Candidate>, page_size: usize) -> Self {
        Self {
            candidates,
            page_index: 0,
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    /// Tag the session with the generation of the search that produced it
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Slice page `index` out of the candidate list.
    ///
    /// Out of range indexes give an empty page with no next page.
    pub fn page(&self, index: usize) -> Page<'_> {
        let len = self.candidates.len();
        let start = index.saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size);

        let items = if start >= len {
            &[][..]
        } else {
            &self.candidates[start..end.min(len)]
        };

        Page {
            items,
            first_index: start,
            has_next: end < len,
            generation: self.generation,
        }
    }

    pub fn current_page(&self) -> Page<'_> {
        self.page(self.page_index)
    }

    /// Move the cursor forward by one page, without bounds checking
    pub fn advance(&mut self) {
        self.page_index = self.page_index.saturating_add(1);
    }

    /// Move forward only when the current page has a successor.
    ///
    /// Returns whether the cursor moved.
    pub fn advance_clamped(&mut self) -> bool {
        if self.current_page().has_next {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Look up the absolute URL behind a selection token of this session
    pub fn resolve_token(&self, token: &str) -> Option<&str> {
        let (generation, index) = token
            .strip_prefix(SELECTION_TOKEN_PREFIX)?
            .split_once('_')?;
        if generation.parse::<u64>().ok()? != self.generation {
            return None;
        }

        let index: usize = index.parse().ok()?;
        self.candidates
            .get(index)
            .map(|candidate| candidate.absolute_url.as_str())
    }

    /// Classify callback data against this session
    pub fn interpret(&self, data: &str) -> CallbackAction {
        if let Some(generation) = data.strip_prefix(NEXT_PAGE_TOKEN_PREFIX) {
            return match generation.parse::<u64>() {
                Ok(generation) if generation == self.generation => CallbackAction::NextPage,
                _ => CallbackAction::Ignore,
            };
        }

        match self.resolve_token(data) {
            Some(url) => CallbackAction::Select(url.to_string()),
            None => CallbackAction::Ignore,
        }
    }
}

/// Token for the candidate at `index` of search `generation`
pub fn selection_token(generation: u64, index: usize) -> String {
    format!("{SELECTION_TOKEN_PREFIX}{generation}_{index}")
}

/// Token for the "Next" button of search `generation`
pub fn next_page_token(generation: u64) -> String {
    format!("{NEXT_PAGE_TOKEN_PREFIX}{generation}")
}
