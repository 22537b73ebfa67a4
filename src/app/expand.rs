//! Expandable list item: lazy detail fetch, cache until unmount, edit mode

use crate::error::ApiError;

/// Visible state of an expandable item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Collapsed,
    Loading,
    Loaded,
    Editing,
    Failed,
}

/// Outcome of toggling an item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Expanded with nothing cached; caller must fetch the detail
    Fetch,
    /// Expanded from cache
    Shown,
    Hidden,
}

#[derive(Clone, Debug)]
pub struct Expandable<T> {
    phase: Phase,
    cache: Option<T>,
    refreshing: bool,
    error: Option<String>,
}

impl<T> Default for Expandable<T> {
    fn default() -> Self {
        Expandable {
            phase: Phase::Collapsed,
            cache: None,
            refreshing: false,
            error: None,
        }
    }
}

impl<T> Expandable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_expanded(&self) -> bool {
        self.phase != Phase::Collapsed
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn value(&self) -> Option<&T> {
        self.cache.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.cache.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle(&mut self) -> Toggle {
        if self.is_expanded() {
            self.collapse();
            Toggle::Hidden
        } else {
            self.expand()
        }
    }

    pub fn expand(&mut self) -> Toggle {
        match self.phase {
            Phase::Collapsed if self.cache.is_some() => {
                self.phase = Phase::Loaded;
                Toggle::Shown
            }
            Phase::Collapsed => {
                self.phase = Phase::Loading;
                self.error = None;
                Toggle::Fetch
            }
            _ => Toggle::Shown,
        }
    }

    /// Collapse; a failed item also drops its cache so re-expanding refetches
    pub fn collapse(&mut self) {
        if self.phase == Phase::Failed {
            self.cache = None;
            self.error = None;
        }
        self.phase = Phase::Collapsed;
    }

    /// Mark a cached item stale. Returns whether a fetch should be issued.
    pub fn refresh(&mut self) -> bool {
        if self.cache.is_none() && self.phase == Phase::Collapsed {
            return false;
        }
        self.refreshing = true;
        true
    }

    pub fn finish_fetch(&mut self, result: Result<T, ApiError>) {
        self.refreshing = false;
        match result {
            Ok(value) => {
                self.cache = Some(value);
                self.error = None;
                if matches!(self.phase, Phase::Loading | Phase::Failed) {
                    self.phase = Phase::Loaded;
                }
            }
            Err(e) => {
                self.error = Some(e.summary());
                if matches!(self.phase, Phase::Loading | Phase::Loaded) {
                    self.phase = Phase::Failed;
                }
            }
        }
    }

    pub fn begin_edit(&mut self) -> bool {
        if self.phase == Phase::Loaded && self.cache.is_some() {
            self.phase = Phase::Editing;
            true
        } else {
            false
        }
    }

    /// Leave edit mode after save or cancel
    pub fn end_edit(&mut self) {
        if self.phase == Phase::Editing {
            self.phase = Phase::Loaded;
        }
    }

    pub fn patch(&mut self, value: T) {
        self.cache = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_expand_fetches_then_cache_is_reused() {
        let mut item: Expandable<u32> = Expandable::new();
        assert_eq!(item.phase(), Phase::Collapsed);

        assert_eq!(item.toggle(), Toggle::Fetch);
        assert_eq!(item.phase(), Phase::Loading);
        item.finish_fetch(Ok(5));
        assert_eq!(item.phase(), Phase::Loaded);

        assert_eq!(item.toggle(), Toggle::Hidden);
        assert_eq!(item.toggle(), Toggle::Shown);
        assert_eq!(item.value(), Some(&5));
    }

    #[test]
    fn test_collapsing_failed_item_refetches_on_expand() {
        let mut item: Expandable<u32> = Expandable::new();
        item.toggle();
        item.finish_fetch(Err(ApiError::Transport("down".into())));
        assert_eq!(item.phase(), Phase::Failed);
        assert!(!item.begin_edit());

        assert_eq!(item.toggle(), Toggle::Hidden);
        assert_eq!(item.toggle(), Toggle::Fetch);
    }

    #[test]
    fn test_failed_item_recovers_on_refresh() {
        let mut item: Expandable<u32> = Expandable::new();
        item.toggle();
        item.finish_fetch(Err(ApiError::SessionExpired));
        assert!(item.refresh());
        item.finish_fetch(Ok(7));

        assert_eq!(item.phase(), Phase::Loaded);
        assert_eq!(item.value(), Some(&7));
        assert_eq!(item.error(), None);
        assert!(item.begin_edit());
    }

    #[test]
    fn test_edit_cycle() {
        let mut item: Expandable<u32> = Expandable::new();
        assert!(!item.begin_edit());
        item.toggle();
        item.finish_fetch(Ok(1));
        assert!(item.begin_edit());
        assert_eq!(item.phase(), Phase::Editing);

        // A refresh landing mid-edit does not kick the user out of the form
        assert!(item.refresh());
        item.finish_fetch(Ok(2));
        assert_eq!(item.phase(), Phase::Editing);

        item.end_edit();
        assert_eq!(item.phase(), Phase::Loaded);
        assert_eq!(item.value(), Some(&2));
    }

    #[test]
    fn test_refresh_requires_something_to_refresh() {
        let mut item: Expandable<u32> = Expandable::new();
        assert!(!item.refresh());
        item.toggle();
        item.finish_fetch(Ok(1));
        item.toggle();
        assert!(item.refresh());
        assert!(item.is_refreshing());
        item.finish_fetch(Ok(3));
        assert!(!item.is_refreshing());
        assert_eq!(item.phase(), Phase::Collapsed);
    }

    #[test]
    fn test_response_after_collapse_still_fills_cache() {
        let mut item: Expandable<u32> = Expandable::new();
        assert_eq!(item.toggle(), Toggle::Fetch);
        item.toggle();
        item.finish_fetch(Ok(4));
        assert_eq!(item.phase(), Phase::Collapsed);
        assert_eq!(item.toggle(), Toggle::Shown);
    }
}
