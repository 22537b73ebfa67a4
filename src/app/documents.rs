//! API document list of a project
//!
//! Rows expand lazily into a [`DocumentPanel`] holding the document detail and
//! its body items. Only one row is expanded at a time; collapsed panels keep
//! their cache until the project view goes away.

use std::collections::HashMap;

use crate::app::bodies::{BodyKey, BodyList};
use crate::app::container::{ChangeEvent, ChangeKind, Collection, Refresh};
use crate::app::dispatch::Dispatcher;
use crate::app::expand::{Expandable, Toggle};
use crate::error::ApiError;
use crate::messages::network::{ApiOp, Scope};
use crate::messages::render::{DocRowView, DocsView};
use crate::models::{ApiDocument, BodyDetail, BodyKind, DocumentSummary, Entity, Id};

#[derive(Clone, Debug, Default)]
pub struct DocumentPanel {
    pub detail: Expandable<ApiDocument>,
    pub bodies: BodyList,
}

impl DocumentPanel {
    /// Apply a body change to the cached document
    pub fn reduce_body(&mut self, kind: BodyKind, event: ChangeEvent) -> Refresh {
        match event.kind {
            ChangeKind::Deleted => {
                self.bodies.remove((kind, event.id));
                if let Some(doc) = self.detail.value_mut() {
                    doc.bodies_mut(kind).retain(|b| b.id != event.id);
                }
                if let Some(doc) = self.detail.value() {
                    self.bodies.prune(doc);
                }
                Refresh::Keep
            }
            ChangeKind::Created | ChangeKind::Updated => Refresh::Reload,
        }
    }

    fn owns_body(&self, key: BodyKey) -> bool {
        self.bodies.contains(key)
            || self
                .detail
                .value()
                .is_some_and(|doc| doc.bodies(key.0).iter().any(|b| b.id == key.1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DocFocus {
    #[default]
    Rows,
    Bodies,
}

#[derive(Clone, Debug)]
pub struct DocumentList {
    project_id: Id,
    docs: Collection<DocumentSummary>,
    panels: HashMap<Id, DocumentPanel>,
    expanded: Option<Id>,
    selected: usize,
    focus: DocFocus,
    pending_expand: Option<Id>,
}

impl DocumentList {
    pub fn new(project_id: Id) -> Self {
        DocumentList {
            project_id,
            docs: Collection::new(),
            panels: HashMap::new(),
            expanded: None,
            selected: 0,
            focus: DocFocus::Rows,
            pending_expand: None,
        }
    }

    pub fn docs(&self) -> &Collection<DocumentSummary> {
        &self.docs
    }

    pub fn expanded(&self) -> Option<Id> {
        self.expanded
    }

    pub fn focus(&self) -> DocFocus {
        self.focus
    }

    pub fn panel(&self, id: Id) -> Option<&DocumentPanel> {
        self.panels.get(&id)
    }

    pub fn panel_mut(&mut self, id: Id) -> Option<&mut DocumentPanel> {
        self.panels.get_mut(&id)
    }

    pub fn selected_id(&self) -> Option<Id> {
        self.docs.items().get(self.selected).map(|d| d.id)
    }

    /// Loaded detail of the expanded row
    pub fn expanded_document(&self) -> Option<&ApiDocument> {
        self.expanded
            .and_then(|id| self.panels.get(&id))
            .and_then(|panel| panel.detail.value())
    }

    /// Body under the cursor of the expanded row
    pub fn selected_body(&self) -> Option<BodyKey> {
        let panel = self.panels.get(&self.expanded?)?;
        panel.bodies.selected(panel.detail.value()?)
    }

    pub fn load(&mut self, scope: Scope, dispatch: &mut Dispatcher) {
        self.docs.begin_load();
        dispatch.send(scope, ApiOp::ListDocuments(self.project_id));
    }

    pub fn finish_load(
        &mut self,
        result: Result<Vec<DocumentSummary>, ApiError>,
        scope: Scope,
        dispatch: &mut Dispatcher,
    ) {
        let ok = result.is_ok();
        self.docs.finish_load(result);
        if !ok {
            return;
        }

        // A created id missing from this page stays pending with its primed panel
        let docs = &self.docs;
        let pending = self.pending_expand;
        self.panels
            .retain(|id, _| docs.contains(*id) || pending == Some(*id));
        if self.expanded.is_some_and(|id| !self.docs.contains(id)) {
            self.expanded = None;
            self.focus = DocFocus::Rows;
        }
        self.clamp_selection();

        let found = pending.and_then(|id| Some((id, self.docs.position(id)?)));
        if let Some((id, index)) = found {
            self.pending_expand = None;
            self.selected = index;
            self.expand(id, scope, dispatch);
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.docs.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        match self.focus {
            DocFocus::Rows => {
                if self.selected + 1 < self.docs.len() {
                    self.selected += 1;
                }
            }
            DocFocus::Bodies => {
                if let Some(panel) = self.expanded.and_then(|id| self.panels.get_mut(&id)) {
                    if let Some(doc) = panel.detail.value() {
                        panel.bodies.next(doc);
                    }
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            DocFocus::Rows => self.selected = self.selected.saturating_sub(1),
            DocFocus::Bodies => {
                if let Some(panel) = self.expanded.and_then(|id| self.panels.get_mut(&id)) {
                    panel.bodies.prev();
                }
            }
        }
    }

    /// Move focus into the body list of the expanded row
    pub fn focus_bodies(&mut self) {
        let has_bodies = self
            .expanded_document()
            .is_some_and(|doc| !BodyList::entries(doc).is_empty());
        if has_bodies {
            self.focus = DocFocus::Bodies;
        }
    }

    pub fn focus_rows(&mut self) {
        self.focus = DocFocus::Rows;
    }

    /// Enter on the focused row or body
    pub fn activate(&mut self, scope: Scope, dispatch: &mut Dispatcher) {
        match self.focus {
            DocFocus::Rows => {
                if let Some(id) = self.selected_id() {
                    if self.expanded == Some(id) {
                        self.collapse();
                    } else {
                        self.expand(id, scope, dispatch);
                    }
                }
            }
            DocFocus::Bodies => {
                let Some(key) = self.selected_body() else {
                    return;
                };
                let Some(panel) = self.expanded.and_then(|id| self.panels.get_mut(&id)) else {
                    return;
                };
                if panel.bodies.toggle(key) == Toggle::Fetch {
                    dispatch.send(scope, ApiOp::GetBody(key.0, key.1));
                }
            }
        }
    }

    /// Expand a row, collapsing whichever row was open
    pub fn expand(&mut self, id: Id, scope: Scope, dispatch: &mut Dispatcher) {
        if self.expanded != Some(id) {
            self.collapse();
        }
        let panel = self.panels.entry(id).or_default();
        if panel.detail.expand() == Toggle::Fetch {
            dispatch.send(scope, ApiOp::GetDocument(id));
        }
        self.expanded = Some(id);
    }

    pub fn collapse(&mut self) {
        if let Some(panel) = self.expanded.take().and_then(|id| self.panels.get_mut(&id)) {
            panel.detail.collapse();
        }
        self.focus = DocFocus::Rows;
    }

    /// Re-fetch a document whose children changed
    pub fn refetch(&mut self, id: Id, scope: Scope, dispatch: &mut Dispatcher) {
        if let Some(panel) = self.panels.get_mut(&id) {
            if panel.detail.refresh() {
                dispatch.send(scope, ApiOp::GetDocument(id));
            }
        }
    }

    pub fn refetch_expanded(&mut self, scope: Scope, dispatch: &mut Dispatcher) {
        if let Some(id) = self.expanded {
            self.refetch(id, scope, dispatch);
        }
    }

    pub fn finish_document(&mut self, id: Id, result: Result<ApiDocument, ApiError>) {
        if let Ok(doc) = &result {
            self.docs.patch(doc.summary());
        }
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.detail.finish_fetch(result);
            if let Some(doc) = panel.detail.value() {
                panel.bodies.prune(doc);
            }
        }
    }

    // ========================
    // Document mutations
    // ========================

    /// New document: prime its panel, reload the list, then expand it
    pub fn on_created(&mut self, doc: ApiDocument, scope: Scope, dispatch: &mut Dispatcher) {
        let id = doc.id;
        self.panels.entry(id).or_default().detail.patch(doc);
        if self.docs.reduce(ChangeEvent::created(id)) == Refresh::Reload {
            self.pending_expand = Some(id);
            self.load(scope, dispatch);
        }
    }

    pub fn on_updated(&mut self, doc: ApiDocument, scope: Scope, dispatch: &mut Dispatcher) {
        let id = doc.id;
        if let Some(panel) = self.panels.get_mut(&id) {
            match panel.detail.value_mut() {
                Some(cached) => cached.merge_info(&doc),
                None => panel.detail.patch(doc),
            }
            panel.detail.end_edit();
        }
        if self.docs.reduce(ChangeEvent::updated(id)) == Refresh::Reload {
            self.load(scope, dispatch);
        }
    }

    pub fn on_deleted(&mut self, id: Id) {
        self.docs.reduce(ChangeEvent::deleted(id));
        self.panels.remove(&id);
        if self.expanded == Some(id) {
            self.expanded = None;
            self.focus = DocFocus::Rows;
        }
        self.clamp_selection();
    }

    // ========================
    // Body mutations
    // ========================

    fn body_owner(&self, key: BodyKey) -> Option<Id> {
        self.panels
            .iter()
            .find(|(_, panel)| panel.owns_body(key))
            .map(|(id, _)| *id)
    }

    pub fn finish_body(&mut self, key: BodyKey, result: Result<BodyDetail, ApiError>) {
        if let Some(panel) = self.body_owner(key).and_then(|id| self.panels.get_mut(&id)) {
            panel.bodies.finish_fetch(key, result);
        }
    }

    pub fn on_body_created(
        &mut self,
        doc_id: Id,
        detail: BodyDetail,
        scope: Scope,
        dispatch: &mut Dispatcher,
    ) {
        let Some(panel) = self.panels.get_mut(&doc_id) else {
            return;
        };
        let event = ChangeEvent::created(detail.id());
        let kind = detail.kind();
        panel.bodies.store(detail);
        if panel.reduce_body(kind, event) == Refresh::Reload {
            self.refetch(doc_id, scope, dispatch);
        }
    }

    pub fn on_body_updated(&mut self, detail: BodyDetail, scope: Scope, dispatch: &mut Dispatcher) {
        let key = (detail.kind(), detail.id());
        let Some(doc_id) = self.body_owner(key) else {
            return;
        };
        if let Some(panel) = self.panels.get_mut(&doc_id) {
            panel.bodies.store(detail);
            if panel.reduce_body(key.0, ChangeEvent::updated(key.1)) == Refresh::Reload {
                self.refetch(doc_id, scope, dispatch);
            }
        }
    }

    pub fn on_body_deleted(&mut self, key: BodyKey) {
        if let Some(panel) = self.body_owner(key).and_then(|id| self.panels.get_mut(&id)) {
            panel.reduce_body(key.0, ChangeEvent::deleted(key.1));
            if panel.detail.value().is_some_and(|doc| BodyList::entries(doc).is_empty()) {
                self.focus = DocFocus::Rows;
            }
        }
    }

    pub fn view(&self) -> DocsView {
        let rows = self
            .docs
            .items()
            .iter()
            .enumerate()
            .map(|(i, summary)| {
                let panel = self.panels.get(&summary.id);
                let expanded = self.expanded == Some(summary.id);
                let detail = panel.filter(|_| expanded).and_then(|p| p.detail.value());
                DocRowView {
                    summary: summary.clone(),
                    selected: i == self.selected,
                    expanded,
                    phase: panel.map(|p| p.detail.phase()),
                    refreshing: panel.is_some_and(|p| p.detail.is_refreshing()),
                    detail: detail.cloned(),
                    error: panel
                        .filter(|_| expanded)
                        .and_then(|p| p.detail.error().map(str::to_string)),
                    bodies: match (panel, detail) {
                        (Some(p), Some(doc)) => {
                            p.bodies.views(doc, self.focus == DocFocus::Bodies)
                        }
                        _ => Vec::new(),
                    },
                }
            })
            .collect();
        DocsView {
            rows,
            focus_bodies: self.focus == DocFocus::Bodies,
            loading: self.docs.is_loading(),
            error: self.docs.error().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::expand::Phase;
    use crate::models::{BodySummary, HttpMethod, RequestBody};
    use serde_json::json;

    fn summary(id: Id, url: &str) -> DocumentSummary {
        DocumentSummary {
            id,
            http_method: HttpMethod::GET,
            url: url.into(),
            description: String::new(),
        }
    }

    fn document(id: Id, url: &str) -> ApiDocument {
        ApiDocument {
            id,
            project_under: Some(1),
            http_method: HttpMethod::GET,
            url: url.into(),
            description: String::new(),
            request_bodies: vec![BodySummary { id: 3, description: "req".into(), http_status: None }],
            response_bodies: Vec::new(),
            url_parameters: Vec::new(),
        }
    }

    fn count_gets(dispatch: &Dispatcher, id: Id) -> usize {
        dispatch
            .queued_ops()
            .into_iter()
            .filter(|op| **op == ApiOp::GetDocument(id))
            .count()
    }

    fn loaded_list(dispatch: &mut Dispatcher) -> (DocumentList, Scope) {
        let scope = dispatch.new_scope();
        let mut list = DocumentList::new(1);
        list.load(scope, dispatch);
        list.finish_load(Ok(vec![summary(1, "api/a/"), summary(2, "api/b/")]), scope, dispatch);
        dispatch.drain();
        (list, scope)
    }

    #[test]
    fn test_lazy_expand_fetches_once() {
        let mut dispatch = Dispatcher::new();
        let (mut list, scope) = loaded_list(&mut dispatch);
        assert_eq!(count_gets(&dispatch, 1), 0);

        list.activate(scope, &mut dispatch);
        assert_eq!(count_gets(&dispatch, 1), 1);
        list.finish_document(1, Ok(document(1, "api/a/")));

        list.activate(scope, &mut dispatch);
        list.activate(scope, &mut dispatch);
        assert_eq!(count_gets(&dispatch, 1), 1);
        assert_eq!(list.panel(1).unwrap().detail.phase(), Phase::Loaded);
    }

    #[test]
    fn test_single_expanded_row() {
        let mut dispatch = Dispatcher::new();
        let (mut list, scope) = loaded_list(&mut dispatch);
        list.expand(1, scope, &mut dispatch);
        list.expand(2, scope, &mut dispatch);
        assert_eq!(list.expanded(), Some(2));
        assert_eq!(list.panel(1).unwrap().detail.phase(), Phase::Collapsed);
    }

    #[test]
    fn test_delete_expanded_collapses_and_removes() {
        let mut dispatch = Dispatcher::new();
        let (mut list, scope) = loaded_list(&mut dispatch);
        list.expand(2, scope, &mut dispatch);
        list.on_deleted(2);
        assert_eq!(list.expanded(), None);
        assert!(!list.docs().contains(2));
        assert!(list.panel(2).is_none());
        assert_eq!(list.selected_id(), Some(1));
    }

    #[test]
    fn test_body_delete_is_local_and_update_refetches() {
        let mut dispatch = Dispatcher::new();
        let (mut list, scope) = loaded_list(&mut dispatch);
        list.expand(1, scope, &mut dispatch);
        list.finish_document(1, Ok(document(1, "api/a/")));
        dispatch.drain();

        let updated = BodyDetail::Request(RequestBody {
            id: 3,
            description: "renamed".into(),
            request_example: json!({"a": 1}),
        });
        list.on_body_updated(updated, scope, &mut dispatch);
        assert_eq!(count_gets(&dispatch, 1), 1);
        list.finish_document(1, Ok(document(1, "api/a/")));
        dispatch.drain();

        list.on_body_deleted((BodyKind::Request, 3));
        assert!(dispatch.queued_ops().is_empty());
        assert!(list.expanded_document().unwrap().request_bodies.is_empty());
    }

    #[test]
    fn test_created_id_stays_pending_until_a_reload_lists_it() {
        let mut dispatch = Dispatcher::new();
        let (mut list, scope) = loaded_list(&mut dispatch);

        list.on_created(document(42, "api/users/"), scope, &mut dispatch);
        list.finish_load(Err(ApiError::Transport("offline".into())), scope, &mut dispatch);
        assert_eq!(list.expanded(), None);

        list.load(scope, &mut dispatch);
        list.finish_load(Ok(vec![summary(1, "api/a/")]), scope, &mut dispatch);
        assert_eq!(list.expanded(), None);
        dispatch.drain();

        list.load(scope, &mut dispatch);
        let docs = vec![summary(1, "api/a/"), summary(42, "api/users/")];
        list.finish_load(Ok(docs), scope, &mut dispatch);
        assert_eq!(list.expanded(), Some(42));
        assert_eq!(list.selected_id(), Some(42));
        assert_eq!(count_gets(&dispatch, 42), 0);
    }
}
