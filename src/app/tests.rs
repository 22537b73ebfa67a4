//! Scenario tests driving AppState through UI events and scripted responses

use serde_json::json;

use crate::app::state::{AppState, Screen};
use crate::error::ApiError;
use crate::messages::network::{ApiOp, ApiPayload, RequestId, Scope};
use crate::messages::render::{ModalView, ProjectPageView, ScreenView};
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::models::{
    ApiDocument, BodyDetail, BodyInput, BodyKind, BodySummary, DocumentInput, DocumentSummary,
    HttpMethod, Id, Project, RelationDelta, ResponseBody, ResponseBodyInput, UrlParameter,
};

fn project(id: Id, name: &str) -> Project {
    Project {
        id,
        name: name.into(),
        description: String::new(),
        instruction: String::new(),
        base_web_url: String::new(),
        base_api_url: String::new(),
        created_by: None,
        handover_text: None,
        to_do_request: None,
    }
}

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
        request_bodies: Vec::new(),
        response_bodies: Vec::new(),
        url_parameters: Vec::new(),
    }
}

fn param(id: Id, name: &str) -> UrlParameter {
    UrlParameter {
        id,
        project_under: Some(1),
        parameter: name.into(),
        description: format!("{} parameter", name),
    }
}

/// AppState plus a fake network that records commands and replies on demand
struct Harness {
    state: AppState,
    queued: Vec<(RequestId, Scope, ApiOp)>,
    sent: Vec<ApiOp>,
    cancelled: Vec<Scope>,
}

impl Harness {
    fn new(signed_in: bool) -> Self {
        let mut harness = Harness {
            state: AppState::new(signed_in),
            queued: Vec::new(),
            sent: Vec::new(),
            cancelled: Vec::new(),
        };
        harness.pump();
        harness
    }

    fn pump(&mut self) {
        for cmd in self.state.drain_commands() {
            match cmd {
                NetworkCommand::Execute { id, scope, op } => {
                    self.sent.push(op.clone());
                    self.queued.push((id, scope, op));
                }
                NetworkCommand::CancelScope(scope) => self.cancelled.push(scope),
                NetworkCommand::Logout | NetworkCommand::Shutdown => {}
            }
        }
    }

    fn press(&mut self, event: UiEvent) {
        assert!(!self.state.apply_event(event));
        self.pump();
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(UiEvent::CharInput(c));
        }
    }

    fn count(&self, pred: impl Fn(&ApiOp) -> bool) -> usize {
        self.sent.iter().filter(|&op| pred(op)).count()
    }

    fn is_queued(&self, op: &ApiOp) -> bool {
        self.queued.iter().any(|(_, _, queued)| queued == op)
    }

    /// Answer the oldest queued request matching `pred` and return its op
    fn reply(
        &mut self,
        pred: impl Fn(&ApiOp) -> bool,
        result: Result<ApiPayload, ApiError>,
    ) -> ApiOp {
        let index = self
            .queued
            .iter()
            .position(|(_, _, op)| pred(op))
            .unwrap_or_else(|| panic!("no matching request in {:?}", self.queued));
        let (id, scope, op) = self.queued.remove(index);
        self.state.handle_response(NetworkResponse::Completed {
            id,
            scope,
            op: op.clone(),
            result,
        });
        self.pump();
        op
    }

    fn render(&self) -> RenderState {
        self.state.to_render_state()
    }

    fn page(&self) -> ProjectPageView {
        match self.render().screen {
            ScreenView::Project(page) => *page,
            other => panic!("expected project screen, got {:?}", other),
        }
    }

    fn form_error(&self) -> Option<String> {
        match self.render().modal {
            Some(ModalView::Form(form)) => form.error,
            other => panic!("expected a form modal, got {:?}", other),
        }
    }
}

/// Signed in, project 1 open with the given documents
fn open_project(docs: Vec<DocumentSummary>) -> Harness {
    let mut h = Harness::new(true);
    h.reply(
        |op| *op == ApiOp::ListProjects,
        Ok(ApiPayload::Projects(vec![project(1, "Shop")])),
    );
    h.press(UiEvent::Activate);
    h.reply(
        |op| *op == ApiOp::GetProject(1),
        Ok(ApiPayload::Project(project(1, "Shop"))),
    );
    h.reply(
        |op| *op == ApiOp::ListDocuments(1),
        Ok(ApiPayload::Documents(docs)),
    );
    h
}

/// Open project 1 and expand its only document
fn with_expanded(doc: ApiDocument) -> Harness {
    let id = doc.id;
    let mut h = open_project(vec![doc.summary()]);
    h.press(UiEvent::Activate);
    h.reply(|op| *op == ApiOp::GetDocument(id), Ok(ApiPayload::Document(doc)));
    h
}

#[test]
fn test_sign_in_failure_then_success() {
    let mut h = Harness::new(false);
    assert!(h.sent.is_empty());

    h.type_text("alice");
    h.press(UiEvent::NextField);
    h.type_text("secret");
    h.press(UiEvent::Submit);
    h.reply(
        |op| matches!(op, ApiOp::Login(_)),
        Err(ApiError::Status { status: 401, body: String::new() }),
    );
    match h.render().screen {
        ScreenView::Login { form, .. } => {
            assert_eq!(form.error.as_deref(), Some("Invalid username or password"));
            assert!(!form.submitting);
        }
        other => panic!("expected login screen, got {:?}", other),
    }

    h.press(UiEvent::Submit);
    h.reply(|op| matches!(op, ApiOp::Login(_)), Ok(ApiPayload::Done));
    assert!(matches!(h.state.screen, Screen::Projects));
    assert!(h.is_queued(&ApiOp::ListProjects));
}

#[test]
fn test_created_document_is_expanded_without_refetch() {
    let mut h = open_project(vec![summary(7, "api/items/")]);

    h.press(UiEvent::New);
    h.press(UiEvent::NextField);
    h.type_text("users/");
    h.press(UiEvent::Submit);
    let op = h.reply(
        |op| matches!(op, ApiOp::CreateDocument(..)),
        Ok(ApiPayload::Document(document(42, "api/users/"))),
    );
    assert_eq!(
        op,
        ApiOp::CreateDocument(
            1,
            DocumentInput {
                http_method: HttpMethod::GET,
                url: "api/users/".into(),
                description: String::new(),
            }
        )
    );
    assert!(h.state.modal.is_none());

    h.reply(
        |op| *op == ApiOp::ListDocuments(1),
        Ok(ApiPayload::Documents(vec![
            summary(7, "api/items/"),
            summary(42, "api/users/"),
        ])),
    );
    let page = h.page();
    let row = page.docs.rows.iter().find(|r| r.summary.id == 42).unwrap();
    assert!(row.expanded);
    assert!(row.selected);
    assert_eq!(row.detail.as_ref().map(|d| d.url.as_str()), Some("api/users/"));
    assert_eq!(h.count(|op| *op == ApiOp::GetDocument(42)), 0);
}

#[test]
fn test_invalid_json_keeps_body_form_open_without_request() {
    let mut h = with_expanded(document(5, "api/login/"));

    h.press(UiEvent::NewBody(BodyKind::Request));
    h.press(UiEvent::NextField);
    h.type_text("oops");
    h.press(UiEvent::Submit);

    assert_eq!(h.count(|op| matches!(op, ApiOp::CreateBody(..))), 0);
    assert!(h
        .form_error()
        .is_some_and(|e| e.starts_with("Invalid JSON format")));
}

#[test]
fn test_response_body_update_shows_saved_values() {
    let mut doc = document(5, "api/orders/");
    doc.response_bodies = vec![BodySummary {
        id: 7,
        description: "ok".into(),
        http_status: Some(200),
    }];
    let mut h = with_expanded(doc.clone());

    h.press(UiEvent::FocusRight);
    h.press(UiEvent::Activate);
    h.reply(
        |op| *op == ApiOp::GetBody(BodyKind::Response, 7),
        Ok(ApiPayload::Body(BodyDetail::Response(ResponseBody {
            id: 7,
            description: "ok".into(),
            http_status: 200,
            response_example: json!({"ok": true}),
        }))),
    );

    h.press(UiEvent::Edit);
    h.press(UiEvent::NextField);
    for _ in 0..3 {
        h.press(UiEvent::Backspace);
    }
    h.type_text("404");
    h.press(UiEvent::NextField);
    let example_len = match h.render().modal {
        Some(ModalView::Form(form)) => form.fields[2].value.chars().count(),
        other => panic!("expected body form, got {:?}", other),
    };
    for _ in 0..example_len {
        h.press(UiEvent::Backspace);
    }
    h.type_text(r#"{"error": "not found"}"#);
    h.press(UiEvent::Submit);

    let expected = json!({"error": "not found"});
    let op = h.reply(
        |op| matches!(op, ApiOp::UpdateBody(7, _)),
        Ok(ApiPayload::Body(BodyDetail::Response(ResponseBody {
            id: 7,
            description: "ok".into(),
            http_status: 404,
            response_example: expected.clone(),
        }))),
    );
    assert_eq!(
        op,
        ApiOp::UpdateBody(
            7,
            BodyInput::Response(ResponseBodyInput {
                description: "ok".into(),
                http_status: 404,
                response_example: expected.clone(),
            })
        )
    );
    assert!(h.state.modal.is_none());

    doc.response_bodies[0].http_status = Some(404);
    h.reply(|op| *op == ApiOp::GetDocument(5), Ok(ApiPayload::Document(doc)));

    let page = h.page();
    let body = &page.docs.rows[0].bodies[0];
    assert_eq!(body.summary.http_status, Some(404));
    match &body.detail {
        Some(BodyDetail::Response(detail)) => {
            assert_eq!(detail.http_status, 404);
            assert_eq!(detail.response_example, expected);
        }
        other => panic!("expected response detail, got {:?}", other),
    }
}

#[test]
fn test_link_editor_sends_delta_and_refetches_document() {
    let mut doc = document(10, "api/items/");
    doc.url_parameters = vec![param(5, "size"), param(8, "sort")];
    let mut h = with_expanded(doc.clone());

    h.press(UiEvent::EditLinks);
    h.reply(
        |op| *op == ApiOp::ListParameters(1),
        Ok(ApiPayload::Parameters(vec![
            param(3, "page"),
            param(5, "size"),
            param(8, "sort"),
        ])),
    );
    match h.render().modal {
        Some(ModalView::Links(links)) => assert_eq!(links.rows.len(), 3),
        other => panic!("expected links modal, got {:?}", other),
    }

    // row 0 is the unlinked "page", row 1 the linked "size"
    h.press(UiEvent::Activate);
    h.press(UiEvent::Down);
    h.press(UiEvent::Activate);
    h.press(UiEvent::Submit);

    let op = h.reply(
        |op| matches!(op, ApiOp::UpdateLinks(..)),
        Ok(ApiPayload::Done),
    );
    assert_eq!(
        op,
        ApiOp::UpdateLinks(
            10,
            RelationDelta {
                to_add: vec![3],
                to_pop: vec![5],
            }
        )
    );
    assert!(h.state.modal.is_none());

    doc.url_parameters = vec![param(3, "page"), param(8, "sort")];
    h.reply(|op| *op == ApiOp::GetDocument(10), Ok(ApiPayload::Document(doc)));
    let page = h.page();
    let ids: Vec<Id> = page.docs.rows[0]
        .detail
        .as_ref()
        .map(|d| d.url_parameters.iter().map(|p| p.id).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![3, 8]);
}

#[test]
fn test_response_after_leaving_project_is_dropped() {
    let mut h = Harness::new(true);
    h.reply(
        |op| *op == ApiOp::ListProjects,
        Ok(ApiPayload::Projects(vec![project(1, "Shop")])),
    );
    h.press(UiEvent::Activate);
    h.press(UiEvent::Back);
    assert!(matches!(h.state.screen, Screen::Projects));
    assert_eq!(h.cancelled.len(), 1);

    h.press(UiEvent::Activate);
    // oldest ListDocuments belongs to the cancelled visit
    h.reply(
        |op| *op == ApiOp::ListDocuments(1),
        Ok(ApiPayload::Documents(vec![summary(99, "api/stale/")])),
    );
    let page = h.page();
    assert!(page.docs.rows.is_empty());
    assert!(page.docs.loading);

    h.reply(
        |op| *op == ApiOp::ListDocuments(1),
        Ok(ApiPayload::Documents(vec![summary(1, "api/fresh/")])),
    );
    let page = h.page();
    assert_eq!(page.docs.rows.len(), 1);
    assert_eq!(page.docs.rows[0].summary.id, 1);
}

#[test]
fn test_session_expiry_returns_to_login() {
    let mut h = open_project(vec![summary(5, "api/a/")]);
    h.press(UiEvent::Activate);
    h.reply(
        |op| *op == ApiOp::GetDocument(5),
        Err(ApiError::SessionExpired),
    );

    match h.render().screen {
        ScreenView::Login { sign_up, notice, .. } => {
            assert!(!sign_up);
            assert_eq!(notice.as_deref(), Some("session expired, please sign in again"));
        }
        other => panic!("expected login screen, got {:?}", other),
    }
    assert!(h.state.modal.is_none());
    assert_eq!(h.state.in_flight(), 0);
    assert!(h.cancelled.contains(&Scope::ROOT));
}

#[test]
fn test_write_failure_alerts_and_keeps_form() {
    let mut h = open_project(Vec::new());
    h.press(UiEvent::NextTab);
    h.reply(
        |op| *op == ApiOp::ListParameters(1),
        Ok(ApiPayload::Parameters(Vec::new())),
    );

    h.press(UiEvent::New);
    h.type_text("page");
    h.press(UiEvent::NextField);
    h.type_text("Page number");
    h.press(UiEvent::Submit);
    h.press(UiEvent::Submit);
    let creates = |op: &ApiOp| matches!(op, ApiOp::CreateParameter(..));
    assert_eq!(h.count(creates), 1);

    h.reply(
        creates,
        Err(ApiError::Status {
            status: 400,
            body: r#"{"parameter":["already exists"]}"#.into(),
        }),
    );
    let render = h.render();
    assert!(render.alert.as_deref().is_some_and(|a| a.contains("400")));
    assert!(matches!(render.modal, Some(ModalView::Form(ref form)) if !form.submitting));

    // the alert swallows everything but dismissal
    h.press(UiEvent::Submit);
    assert_eq!(h.count(creates), 1);
    h.press(UiEvent::Dismiss);
    h.press(UiEvent::Submit);
    assert_eq!(h.count(creates), 2);
}

#[test]
fn test_confirmed_delete_collapses_document() {
    let mut h = open_project(vec![summary(5, "api/a/"), summary(6, "api/b/")]);
    h.press(UiEvent::Activate);
    h.reply(
        |op| *op == ApiOp::GetDocument(5),
        Ok(ApiPayload::Document(document(5, "api/a/"))),
    );

    h.press(UiEvent::Delete);
    assert!(matches!(h.render().modal, Some(ModalView::Confirm(_))));
    h.press(UiEvent::Confirm);
    h.reply(|op| *op == ApiOp::DeleteDocument(5), Ok(ApiPayload::Done));

    let page = h.page();
    assert_eq!(page.docs.rows.len(), 1);
    assert_eq!(page.docs.rows[0].summary.id, 6);
    assert!(!page.docs.rows[0].expanded);
}

#[test]
fn test_project_delete_requires_exact_name() {
    let mut h = open_project(Vec::new());
    h.press(UiEvent::PrevTab);
    h.press(UiEvent::Delete);

    h.type_text("Sho");
    h.press(UiEvent::Submit);
    assert_eq!(h.count(|op| matches!(op, ApiOp::DeleteProject(_))), 0);
    assert_eq!(
        h.form_error().as_deref(),
        Some("type the project name exactly to confirm")
    );

    h.type_text("p");
    h.press(UiEvent::Submit);
    h.reply(|op| *op == ApiOp::DeleteProject(1), Ok(ApiPayload::Done));
    assert!(matches!(h.state.screen, Screen::Projects));
    assert!(h.state.projects.projects().is_empty());
}
