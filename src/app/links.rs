//! URL parameter link editor
//!
//! Splits the project's parameter library into parameters that can be linked
//! to a document and parameters that can be unlinked from it, and collects the
//! user's checks into one [`RelationDelta`].

use std::collections::BTreeSet;

use crate::messages::render::{LinkRow, LinksView};
use crate::models::{ApiDocument, Id, RelationDelta, UrlParameter};

/// Result of pressing save in the editor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkSubmit {
    /// Nothing checked; close without a request
    Close,
    Send(RelationDelta),
    /// A save is already in flight
    Busy,
}

#[derive(Clone, Debug)]
pub struct LinkEditor {
    doc_id: Id,
    linked: BTreeSet<Id>,
    to_add: BTreeSet<Id>,
    to_pop: BTreeSet<Id>,
    cursor: usize,
    submitting: bool,
}

impl LinkEditor {
    pub fn new(doc: &ApiDocument) -> Self {
        LinkEditor {
            doc_id: doc.id,
            linked: doc.url_parameters.iter().map(|p| p.id).collect(),
            to_add: BTreeSet::new(),
            to_pop: BTreeSet::new(),
            cursor: 0,
            submitting: false,
        }
    }

    pub fn doc_id(&self) -> Id {
        self.doc_id
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Library entries not yet linked
    pub fn available<'a>(&self, library: &'a [UrlParameter]) -> Vec<&'a UrlParameter> {
        library.iter().filter(|p| !self.linked.contains(&p.id)).collect()
    }

    /// Library entries currently linked
    pub fn linked<'a>(&self, library: &'a [UrlParameter]) -> Vec<&'a UrlParameter> {
        library.iter().filter(|p| self.linked.contains(&p.id)).collect()
    }

    /// Check or uncheck a parameter for linking; ignored unless it is available
    pub fn toggle_add(&mut self, id: Id, library: &[UrlParameter]) {
        if self.linked.contains(&id) || !library.iter().any(|p| p.id == id) {
            return;
        }
        if !self.to_add.remove(&id) {
            self.to_add.insert(id);
        }
    }

    /// Check or uncheck a linked parameter for removal
    pub fn toggle_pop(&mut self, id: Id, library: &[UrlParameter]) {
        if !self.linked.contains(&id) || !library.iter().any(|p| p.id == id) {
            return;
        }
        if !self.to_pop.remove(&id) {
            self.to_pop.insert(id);
        }
    }

    fn row_ids(&self, library: &[UrlParameter]) -> Vec<(Id, bool)> {
        let available = self.available(library).into_iter().map(|p| (p.id, false));
        let linked = self.linked(library).into_iter().map(|p| (p.id, true));
        available.chain(linked).collect()
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, library: &[UrlParameter]) {
        let rows = self.row_ids(library).len();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    /// Toggle whichever checkbox the cursor is on
    pub fn toggle_at_cursor(&mut self, library: &[UrlParameter]) {
        if self.submitting {
            return;
        }
        if let Some(&(id, linked)) = self.row_ids(library).get(self.cursor) {
            if linked {
                self.toggle_pop(id, library);
            } else {
                self.toggle_add(id, library);
            }
        }
    }

    /// Drop checks for parameters that left the library after a reload
    pub fn prune(&mut self, library: &[UrlParameter]) {
        let known: BTreeSet<Id> = library.iter().map(|p| p.id).collect();
        self.to_add.retain(|id| known.contains(id));
        self.to_pop.retain(|id| known.contains(id));
        let rows = self.row_ids(library).len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    pub fn delta(&self) -> RelationDelta {
        RelationDelta {
            to_add: self.to_add.iter().copied().collect(),
            to_pop: self.to_pop.iter().copied().collect(),
        }
    }

    pub fn begin_submit(&mut self) -> LinkSubmit {
        if self.submitting {
            return LinkSubmit::Busy;
        }
        let delta = self.delta();
        if delta.is_empty() {
            return LinkSubmit::Close;
        }
        self.submitting = true;
        LinkSubmit::Send(delta)
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn view(&self, library: &[UrlParameter], loading: bool) -> LinksView {
        let rows = self
            .row_ids(library)
            .into_iter()
            .filter_map(|(id, linked)| {
                let param = library.iter().find(|p| p.id == id)?;
                let checked = if linked {
                    self.to_pop.contains(&id)
                } else {
                    self.to_add.contains(&id)
                };
                Some(LinkRow {
                    parameter: param.parameter.clone(),
                    description: param.description.clone(),
                    linked,
                    checked,
                })
            })
            .collect();
        LinksView {
            doc_id: self.doc_id,
            rows,
            cursor: self.cursor,
            submitting: self.submitting,
            loading,
        }
    }
}
