//! Filter state store, kept in sync with the page URL.
//!
//! The URL query is only ever read at hydration and written after a mutation that changed
//! the state, both through [`UrlQuery`]. Nothing else in the crate touches it.

use crate::models::Practitioner;
use crate::search::{derive_view, ConsultationMode, Dimension, FilterState, Listing, SortKey};

/// The page URL's query component.
pub trait UrlQuery {
    fn read_query(&self) -> Option<String>;
    fn replace_query(&mut self, query: &str);
}

/// In-memory URL, counting writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryUrl {
    query: Option<String>,
    writes: usize,
}

impl MemoryUrl {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            writes: 0,
        }
    }

    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl UrlQuery for MemoryUrl {
    fn read_query(&self) -> Option<String> {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = Some(query.to_string());
        self.writes += 1;
    }
}

/// Every mutator returns whether the state changed. Unchanged states are not written back.
#[derive(Debug)]
pub struct FilterStore<U: UrlQuery> {
    state: FilterState,
    url: U,
}

impl<U: UrlQuery> FilterStore<U> {
    /// Restores state from the URL, or defaults when it carries no query.
    pub fn hydrate(url: U) -> Self {
        let state = url
            .read_query()
            .map(|q| FilterState::from_query_lossy(&q))
            .unwrap_or_default();
        tracing::debug!(query = %state.to_query(), "Hydrated filter state from URL");
        Self { state, url }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn url(&self) -> &U {
        &self.url
    }

    pub fn into_url(self) -> U {
        self.url
    }

    /// Derived view of `practitioners` under the current state.
    pub fn view<'a>(&self, practitioners: &'a [Practitioner]) -> Vec<Listing<'a>> {
        derive_view(practitioners, &self.state)
    }

    fn sync(&mut self, changed: bool) -> bool {
        if changed {
            let query = self.state.to_query();
            tracing::debug!(query = %query, "Filter state changed, updating URL");
            self.url.replace_query(&query);
        }
        changed
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        let changed = self.state.query != query;
        self.state.query = query;
        self.sync(changed)
    }

    pub fn set_consultation(&mut self, mode: Option<ConsultationMode>) -> bool {
        let changed = self.state.consultation != mode;
        self.state.consultation = mode;
        self.sync(changed)
    }

    pub fn add_specialty(&mut self, name: &str) -> bool {
        let changed = self.state.insert_specialty(name);
        self.sync(changed)
    }

    pub fn remove_specialty(&mut self, name: &str) -> bool {
        let changed = self.state.remove_specialty(name);
        self.sync(changed)
    }

    /// Checkbox semantics: `checked` adds, unchecked removes.
    pub fn toggle_specialty(&mut self, name: &str, checked: bool) -> bool {
        if checked {
            self.add_specialty(name)
        } else {
            self.remove_specialty(name)
        }
    }

    /// Replaces the whole selection in one step.
    pub fn set_specialties<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.state.clone();
        next.clear_specialties();
        for name in names {
            next.insert_specialty(name.as_ref());
        }
        let changed = next.specialties() != self.state.specialties();
        self.state = next;
        self.sync(changed)
    }

    pub fn clear_specialties(&mut self) -> bool {
        let changed = self.state.clear_specialties();
        self.sync(changed)
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> bool {
        let changed = self.state.sort != sort;
        self.state.sort = sort;
        self.sync(changed)
    }

    pub fn clear(&mut self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Query => self.set_query(String::new()),
            Dimension::Consultation => self.set_consultation(None),
            Dimension::Specialties => self.clear_specialties(),
            Dimension::Sort => self.set_sort(None),
        }
    }

    /// Resets all four dimensions with a single URL write.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.state.is_default();
        self.state = FilterState::default();
        self.sync(changed)
    }
}
