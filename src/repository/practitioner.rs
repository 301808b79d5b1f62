use std::sync::OnceLock;

use crate::directory::DirectorySnapshot;
use crate::models::Practitioner;
use crate::search::{derive_view, suggest, FilterState, Listing, SpecialtyFacets};

/// Holds the single directory snapshot of the running service.
///
/// Starts empty while the startup fetch is in flight; [`install`](Self::install) succeeds
/// exactly once.
#[derive(Debug, Default)]
pub struct PractitionerRepository {
    snapshot: OnceLock<Loaded>,
}

#[derive(Debug)]
struct Loaded {
    snapshot: DirectorySnapshot,
    facets: SpecialtyFacets,
}

impl PractitionerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that is already loaded, mostly for tests and the CLI.
    pub fn with_snapshot(snapshot: DirectorySnapshot) -> Self {
        let repo = Self::new();
        repo.install(snapshot);
        repo
    }

    /// Returns `false` if a snapshot was already installed; the first one wins.
    pub fn install(&self, snapshot: DirectorySnapshot) -> bool {
        let facets = SpecialtyFacets::build(&snapshot.practitioners);
        let count = snapshot.practitioners.len();
        match self.snapshot.set(Loaded { snapshot, facets }) {
            Ok(()) => {
                tracing::debug!(count, "Directory snapshot installed");
                true
            }
            Err(_) => {
                tracing::warn!("Directory snapshot already installed, ignoring reload");
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.get().is_some()
    }

    pub fn snapshot(&self) -> Option<&DirectorySnapshot> {
        self.snapshot.get().map(|l| &l.snapshot)
    }

    /// The loaded practitioners; empty while loading.
    pub fn practitioners(&self) -> &[Practitioner] {
        self.snapshot()
            .map(|s| s.practitioners.as_slice())
            .unwrap_or(&[])
    }

    /// Derived view for `state`, or `None` while the directory is still loading.
    pub fn search(&self, state: &FilterState) -> Option<Vec<Listing<'_>>> {
        let snapshot = self.snapshot()?;
        let view = derive_view(&snapshot.practitioners, state);
        tracing::debug!(
            query = %state.to_query(),
            matched = view.len(),
            total = snapshot.practitioners.len(),
            "Derived practitioner view"
        );
        Some(view)
    }

    pub fn suggest(&self, draft: &str) -> Vec<Listing<'_>> {
        suggest(self.practitioners(), draft)
    }

    pub fn facets(&self) -> Option<&SpecialtyFacets> {
        self.snapshot.get().map(|l| &l.facets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Practitioner {
        Practitioner {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_none_while_loading() {
        let repo = PractitionerRepository::new();
        assert!(!repo.is_loaded());
        assert!(repo.search(&FilterState::default()).is_none());
        assert!(repo.suggest("dr").is_empty());
        assert!(repo.facets().is_none());
    }

    #[test]
    fn test_first_install_wins() {
        let repo = PractitionerRepository::new();
        assert!(repo.install(DirectorySnapshot::loaded("first", vec![named("Dr. A")])));
        assert!(!repo.install(DirectorySnapshot::loaded("second", vec![])));
        assert_eq!(repo.practitioners().len(), 1);
    }

    #[test]
    fn test_degraded_snapshot_searches_empty() {
        let repo = PractitionerRepository::with_snapshot(DirectorySnapshot::degraded("x", "boom"));
        assert_eq!(repo.search(&FilterState::default()), Some(Vec::new()));
    }
}
