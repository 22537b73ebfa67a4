//! Request/response body items under one expanded document

use std::collections::HashMap;

use crate::app::expand::{Expandable, Toggle};
use crate::error::ApiError;
use crate::messages::render::BodyRowView;
use crate::models::{ApiDocument, BodyDetail, BodyKind, BodySummary, Entity, Id};

/// Identity of a body item; ids are only unique per kind
pub type BodyKey = (BodyKind, Id);

#[derive(Clone, Debug, Default)]
pub struct BodyList {
    items: HashMap<BodyKey, Expandable<BodyDetail>>,
    cursor: usize,
}

impl BodyList {
    /// Request bodies first, then response bodies, in server order
    pub fn entries(doc: &ApiDocument) -> Vec<(BodyKind, &BodySummary)> {
        let requests = doc.request_bodies.iter().map(|b| (BodyKind::Request, b));
        let responses = doc.response_bodies.iter().map(|b| (BodyKind::Response, b));
        requests.chain(responses).collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self, doc: &ApiDocument) -> Option<BodyKey> {
        Self::entries(doc)
            .get(self.cursor)
            .map(|(kind, summary)| (*kind, summary.id))
    }

    pub fn next(&mut self, doc: &ApiDocument) {
        let count = Self::entries(doc).len();
        if self.cursor + 1 < count {
            self.cursor += 1;
        }
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn item(&self, key: BodyKey) -> Option<&Expandable<BodyDetail>> {
        self.items.get(&key)
    }

    pub fn item_mut(&mut self, key: BodyKey) -> Option<&mut Expandable<BodyDetail>> {
        self.items.get_mut(&key)
    }

    pub fn contains(&self, key: BodyKey) -> bool {
        self.items.contains_key(&key)
    }

    pub fn toggle(&mut self, key: BodyKey) -> Toggle {
        self.items.entry(key).or_default().toggle()
    }

    pub fn finish_fetch(&mut self, key: BodyKey, result: Result<BodyDetail, ApiError>) {
        if let Some(item) = self.items.get_mut(&key) {
            item.finish_fetch(result);
        }
    }

    /// Cache a body returned by a create or update and leave edit mode
    pub fn store(&mut self, detail: BodyDetail) {
        let item = self.items.entry((detail.kind(), detail.id())).or_default();
        item.patch(detail);
        item.end_edit();
    }

    pub fn remove(&mut self, key: BodyKey) {
        self.items.remove(&key);
    }

    /// Forget items the document no longer lists
    pub fn prune(&mut self, doc: &ApiDocument) {
        self.items
            .retain(|(kind, id), _| doc.bodies(*kind).iter().any(|b| b.id == *id));
        let count = Self::entries(doc).len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    pub fn views(&self, doc: &ApiDocument, focused: bool) -> Vec<BodyRowView> {
        Self::entries(doc)
            .into_iter()
            .enumerate()
            .map(|(i, (kind, summary))| {
                let item = self.items.get(&(kind, summary.id));
                BodyRowView {
                    kind,
                    summary: summary.clone(),
                    selected: focused && i == self.cursor,
                    phase: item.map(|it| it.phase()),
                    detail: item
                        .filter(|it| it.is_expanded())
                        .and_then(|it| it.value().cloned()),
                    error: item.and_then(|it| it.error().map(str::to_string)),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::expand::Phase;
    use crate::models::{HttpMethod, ResponseBody};
    use serde_json::json;

    fn doc() -> ApiDocument {
        ApiDocument {
            id: 1,
            project_under: None,
            http_method: HttpMethod::POST,
            url: "api/orders/".into(),
            description: String::new(),
            request_bodies: vec![BodySummary { id: 7, description: "create".into(), http_status: None }],
            response_bodies: vec![BodySummary { id: 7, description: "ok".into(), http_status: Some(201) }],
            url_parameters: Vec::new(),
        }
    }

    fn response(id: Id, status: u16) -> BodyDetail {
        BodyDetail::Response(ResponseBody {
            id,
            description: "ok".into(),
            http_status: status,
            response_example: json!({"id": 1}),
        })
    }

    #[test]
    fn test_same_id_different_kind_are_separate_items() {
        let doc = doc();
        let mut bodies = BodyList::default();
        assert_eq!(bodies.selected(&doc), Some((BodyKind::Request, 7)));
        bodies.next(&doc);
        assert_eq!(bodies.selected(&doc), Some((BodyKind::Response, 7)));
        bodies.next(&doc);
        assert_eq!(bodies.cursor(), 1);

        assert_eq!(bodies.toggle((BodyKind::Response, 7)), Toggle::Fetch);
        bodies.finish_fetch((BodyKind::Response, 7), Ok(response(7, 201)));
        assert!(!bodies.contains((BodyKind::Request, 7)));

        let views = bodies.views(&doc, true);
        assert_eq!(views[1].phase, Some(Phase::Loaded));
        assert!(views[1].selected);
        assert_eq!(views[1].detail.as_ref().and_then(|d| d.http_status()), Some(201));
        assert_eq!(views[0].phase, None);
    }

    #[test]
    fn test_store_ends_edit_and_prune_forgets_removed() {
        let mut doc = doc();
        let mut bodies = BodyList::default();
        bodies.toggle((BodyKind::Response, 7));
        bodies.finish_fetch((BodyKind::Response, 7), Ok(response(7, 201)));
        assert!(bodies.item_mut((BodyKind::Response, 7)).unwrap().begin_edit());

        bodies.store(response(7, 404));
        let item = bodies.item((BodyKind::Response, 7)).unwrap();
        assert_eq!(item.phase(), Phase::Loaded);
        assert_eq!(item.value().and_then(|d| d.http_status()), Some(404));

        doc.response_bodies.clear();
        bodies.prune(&doc);
        assert!(!bodies.contains((BodyKind::Response, 7)));
        assert_eq!(bodies.cursor(), 0);
    }
}
