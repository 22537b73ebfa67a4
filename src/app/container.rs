//! Entity state containers and the change reducer
//!
//! A container owns fetched data plus a loading flag and an error slot. Load
//! failures never blank existing data. Child mutations reach their parent as a
//! [`ChangeEvent`]; [`Collection::reduce`] decides whether the parent can
//! apply it locally or has to reload.

use chrono::{DateTime, Local};

use crate::error::ApiError;
use crate::models::{Entity, Id};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Message a child emits after a successful mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub id: Id,
}

impl ChangeEvent {
    pub fn created(id: Id) -> Self {
        ChangeEvent { kind: ChangeKind::Created, id }
    }

    pub fn updated(id: Id) -> Self {
        ChangeEvent { kind: ChangeKind::Updated, id }
    }

    pub fn deleted(id: Id) -> Self {
        ChangeEvent { kind: ChangeKind::Deleted, id }
    }
}

/// What the parent must do after reducing an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    Keep,
    Reload,
}

/// A fetched list of entities
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    loaded_at: Option<DateTime<Local>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            items: Vec::new(),
            loading: false,
            error: None,
            loaded_at: None,
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.position(id).is_some()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the items on success; keep them and record the error on failure
    pub fn finish_load(&mut self, result: Result<Vec<T>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.loaded_at = Some(Local::now());
            }
            Err(e) => {
                self.error = Some(e.summary());
            }
        }
    }

    /// Replace an entry with the server's updated copy
    pub fn patch(&mut self, entity: T) -> bool {
        match self.position(entity.id()) {
            Some(index) => {
                self.items[index] = entity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Apply a child's change event.
    ///
    /// Deletes are applied in place. Creates and updates need server-computed
    /// fields, so the parent reloads.
    pub fn reduce(&mut self, event: ChangeEvent) -> Refresh {
        match event.kind {
            ChangeKind::Deleted => {
                self.remove(event.id);
                Refresh::Keep
            }
            ChangeKind::Created | ChangeKind::Updated => Refresh::Reload,
        }
    }
}

/// A single fetched entity
#[derive(Clone, Debug)]
pub struct Detail<T> {
    value: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Detail<T> {
    fn default() -> Self {
        Detail {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Detail<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: Result<T, ApiError>) {
        self.loading = false;
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(e) => self.error = Some(e.summary()),
        }
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrlParameter;

    fn param(id: Id, token: &str) -> UrlParameter {
        UrlParameter {
            id,
            project_under: Some(1),
            parameter: token.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_failed_load_keeps_stale_items() {
        let mut params = Collection::new();
        params.begin_load();
        params.finish_load(Ok(vec![param(1, "{id}")]));
        assert!(params.has_loaded());

        params.begin_load();
        assert!(params.is_loading());
        params.finish_load(Err(ApiError::Transport("offline".into())));
        assert!(!params.is_loading());
        assert_eq!(params.len(), 1);
        assert!(params.error().unwrap().contains("offline"));

        params.finish_load(Ok(vec![param(1, "{id}"), param(2, "{slug}")]));
        assert_eq!(params.error(), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_reduce_delete_is_local() {
        let mut params = Collection::new();
        params.finish_load(Ok(vec![param(1, "a"), param(2, "b")]));
        assert_eq!(params.reduce(ChangeEvent::deleted(1)), Refresh::Keep);
        assert!(!params.contains(1));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_reduce_create_and_update_reload() {
        let mut params: Collection<UrlParameter> = Collection::new();
        assert_eq!(params.reduce(ChangeEvent::created(9)), Refresh::Reload);
        assert_eq!(params.reduce(ChangeEvent::updated(9)), Refresh::Reload);
        assert!(params.is_empty());
    }

    #[test]
    fn test_patch_replaces_by_id_only() {
        let mut params = Collection::new();
        params.finish_load(Ok(vec![param(1, "a")]));
        assert!(params.patch(param(1, "renamed")));
        assert!(!params.patch(param(5, "missing")));
        assert_eq!(params.get(1).unwrap().parameter, "renamed");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_detail_error_keeps_value() {
        let mut detail = Detail::new();
        detail.finish_load(Ok(param(1, "a")));
        detail.finish_load(Err(ApiError::Status { status: 500, body: String::new() }));
        assert_eq!(detail.value().unwrap().id, 1);
        assert_eq!(detail.error(), Some("server returned 500"));
    }
}
