use std::time::{Duration, Instant};

use super::derive::Listing;
use crate::models::Practitioner;

/// Maximum number of autocomplete suggestions.
pub const SUGGESTION_LIMIT: usize = 3;

/// How long suggestions stay up after the search box loses focus, so a click on one of
/// them still lands.
pub const BLUR_GRACE: Duration = Duration::from_millis(200);

/// First [`SUGGESTION_LIMIT`] practitioners whose name contains `draft`, in directory order.
/// A blank draft yields nothing.
pub fn suggest<'a>(practitioners: &'a [Practitioner], draft: &str) -> Vec<Listing<'a>> {
    if draft.trim().is_empty() {
        return Vec::new();
    }
    let needle = draft.to_lowercase();

    practitioners
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name_contains(&needle))
        .take(SUGGESTION_LIMIT)
        .map(|(position, practitioner)| Listing {
            position,
            practitioner,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No draft being edited.
    Idle,
    /// Draft differs from what was committed; suggestions follow every keystroke.
    Typing,
    /// Draft promoted into the filter query.
    Committed,
}

/// Search input with a transient draft, separate from the committed query.
#[derive(Debug, Clone)]
pub struct SearchBox {
    draft: String,
    phase: SearchPhase,
    show_suggestions: bool,
    hide_at: Option<Instant>,
}

impl SearchBox {
    /// Starts from the committed query, e.g. one restored from the URL.
    pub fn new(committed_query: &str) -> Self {
        let phase = if committed_query.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Committed
        };
        Self {
            draft: committed_query.to_string(),
            phase,
            show_suggestions: false,
            hide_at: None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn input(&mut self, text: &str) {
        self.draft = text.to_string();
        self.phase = if text.trim().is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Typing
        };
        self.show_suggestions = true;
        self.hide_at = None;
    }

    pub fn focus(&mut self) {
        self.show_suggestions = true;
        self.hide_at = None;
    }

    /// Enter pressed. Returns the value to store as the committed query.
    pub fn commit(&mut self) -> String {
        self.phase = SearchPhase::Committed;
        self.show_suggestions = false;
        self.hide_at = None;
        self.draft.clone()
    }

    /// Suggestion clicked. The draft becomes the chosen name, which is committed.
    pub fn select(&mut self, name: &str) -> String {
        self.draft = name.to_string();
        self.commit()
    }

    pub fn blur(&mut self, now: Instant) {
        self.hide_at = Some(now + BLUR_GRACE);
    }

    /// Applies an elapsed blur deadline.
    pub fn settle(&mut self, now: Instant) {
        if matches!(self.hide_at, Some(deadline) if now >= deadline) {
            self.show_suggestions = false;
            self.hide_at = None;
            self.phase = SearchPhase::Idle;
        }
    }

    pub fn suggestions_visible(&self, now: Instant) -> bool {
        if !self.show_suggestions || self.draft.trim().is_empty() {
            return false;
        }
        match self.hide_at {
            Some(deadline) => now < deadline,
            None => true,
        }
    }

    /// Suggestions to display right now; empty when hidden.
    pub fn suggestions<'a>(&self, practitioners: &'a [Practitioner], now: Instant) -> Vec<Listing<'a>> {
        if !self.suggestions_visible(now) {
            return Vec::new();
        }
        suggest(practitioners, &self.draft)
    }
}
