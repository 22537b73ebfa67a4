//! Command handlers - business logic for processing UI events and network responses

use crate::app::documents::DocFocus;
use crate::app::forms::{
    BodyForm, DeleteProjectForm, DocumentForm, Form, FormState, LoginForm, ParameterForm,
    ProjectForm, TextField,
};
use crate::app::links::{LinkEditor, LinkSubmit};
use crate::app::projects::{ProjectTab, ProjectView};
use crate::app::state::{AppState, LoginMode, LoginScreen, Modal, PendingAction, Screen, Target};
use crate::error::ApiError;
use crate::messages::network::{ApiOp, ApiPayload, RequestId, Scope};
use crate::messages::{NetworkCommand, NetworkResponse, UiEvent};
use crate::models::{BodyKind, Id, Project};

/// Unwrap the expected payload variant, treating anything else as a decode error
macro_rules! payload {
    ($result:expr, $variant:ident) => {
        $result.and_then(|payload| match payload {
            ApiPayload::$variant(value) => Ok(value),
            _ => Err(ApiError::Decode(
                concat!("expected ", stringify!($variant)).to_string(),
            )),
        })
    };
}

enum FormAction<T> {
    Close,
    Submit(T),
    Stay,
}

/// Text editing events shared by every form
fn edit_form<F: Form>(form: &mut FormState<F>, event: &UiEvent) {
    match event {
        UiEvent::NextField => form.next_field(),
        UiEvent::PrevField => form.prev_field(),
        UiEvent::CharInput(c) => form.input(*c),
        UiEvent::Backspace => form.backspace(),
        UiEvent::CursorLeft => form.cursor_left(),
        UiEvent::CursorRight => form.cursor_right(),
        UiEvent::Newline => form.newline(),
        _ => {}
    }
}

fn form_event<F: Form>(form: &mut FormState<F>, event: &UiEvent) -> FormAction<F::Output> {
    match event {
        UiEvent::Back => FormAction::Close,
        UiEvent::Submit => match form.begin_submit() {
            Some(output) => FormAction::Submit(output),
            None => FormAction::Stay,
        },
        other => {
            edit_form(form, other);
            FormAction::Stay
        }
    }
}

/// Close the modal whose write just succeeded
fn close_submitted(modal: &mut Option<Modal>) {
    if modal.as_ref().is_some_and(Modal::is_submitting) {
        *modal = None;
    }
}

fn confirm(prompt: String, action: PendingAction) -> Option<Modal> {
    Some(Modal::Confirm { prompt, action })
}

impl AppState {
    // ========================
    // UI events
    // ========================

    /// Apply a UI event; returns true when the app should quit
    pub fn apply_event(&mut self, event: UiEvent) -> bool {
        if event == UiEvent::Quit {
            return true;
        }
        if self.alert.is_some() {
            if event == UiEvent::Dismiss {
                self.alert = None;
            }
            return false;
        }
        if let Some(modal) = self.modal.take() {
            self.modal = self.modal_event(modal, event);
            return false;
        }
        match self.screen {
            Screen::Login(_) => self.login_event(event),
            Screen::Projects => self.projects_event(event),
            Screen::Project(_) => self.project_event(event),
        }
        false
    }

    fn login_event(&mut self, event: UiEvent) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        match (event, login.mode) {
            (UiEvent::ToggleSignUp, mode) => {
                login.mode = match mode {
                    LoginMode::SignIn => LoginMode::SignUp,
                    LoginMode::SignUp => LoginMode::SignIn,
                };
                login.notice = None;
            }
            (UiEvent::Submit, LoginMode::SignIn) => {
                if let Some(input) = login.login.begin_submit() {
                    tracing::info!(username = %input.username, "Signing in");
                    self.dispatch.send(Scope::ROOT, ApiOp::Login(input));
                }
            }
            (UiEvent::Submit, LoginMode::SignUp) => {
                if let Some(input) = login.register.begin_submit() {
                    tracing::info!(username = %input.username, "Registering account");
                    self.dispatch.send(Scope::ROOT, ApiOp::Register(input));
                }
            }
            (other, LoginMode::SignIn) => edit_form(&mut login.login, &other),
            (other, LoginMode::SignUp) => edit_form(&mut login.register, &other),
        }
    }

    fn projects_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Up => self.projects.select_prev(),
            UiEvent::Down => self.projects.select_next(),
            UiEvent::Activate => {
                if let Some(project) = self.projects.selected_project().cloned() {
                    self.open_project(project.id, Some(project));
                }
            }
            UiEvent::New => {
                self.modal = Some(Modal::Project {
                    editing: None,
                    form: FormState::new(ProjectForm::default()),
                })
            }
            UiEvent::Reload => self.projects.load(&mut self.dispatch),
            UiEvent::Logout => self.modal = confirm("Sign out?".into(), PendingAction::Logout),
            UiEvent::ToggleHelp => self.modal = Some(Modal::Help),
            _ => {}
        }
    }

    fn project_event(&mut self, event: UiEvent) {
        let Screen::Project(view) = &mut self.screen else {
            return;
        };
        let dispatch = &mut self.dispatch;
        match event {
            UiEvent::Back => {
                if view.tab() == ProjectTab::Docs && view.documents.focus() == DocFocus::Bodies {
                    view.documents.focus_rows();
                } else {
                    self.leave_project();
                }
            }
            UiEvent::NextTab => {
                let tab = view.tab().next();
                view.set_tab(tab, dispatch);
            }
            UiEvent::PrevTab => {
                let tab = view.tab().prev();
                view.set_tab(tab, dispatch);
            }
            UiEvent::Reload => view.reload(dispatch),
            UiEvent::Logout => self.modal = confirm("Sign out?".into(), PendingAction::Logout),
            UiEvent::ToggleHelp => self.modal = Some(Modal::Help),
            other => {
                self.modal = match view.tab() {
                    ProjectTab::Docs => docs_event(view, dispatch, &mut self.status, other),
                    ProjectTab::Parameters => params_event(view, other),
                    ProjectTab::Pages => {
                        match other {
                            UiEvent::Up => view.select_prev_page(),
                            UiEvent::Down => view.select_next_page(),
                            _ => {}
                        }
                        None
                    }
                    ProjectTab::Settings => settings_event(view, other),
                }
            }
        }
    }

    fn modal_event(&mut self, modal: Modal, event: UiEvent) -> Option<Modal> {
        match modal {
            Modal::Help => None,
            Modal::Confirm { prompt, action } => match event {
                UiEvent::Confirm => {
                    self.run_action(action);
                    None
                }
                UiEvent::Back => None,
                _ => Some(Modal::Confirm { prompt, action }),
            },
            Modal::Links(editor) => self.links_event(editor, event),
            Modal::Project { editing, mut form } => match form_event(&mut form, &event) {
                FormAction::Close => None,
                FormAction::Submit(input) => {
                    match editing {
                        None => {
                            self.dispatch.send(Scope::ROOT, ApiOp::CreateProject(input));
                        }
                        Some(id) => {
                            self.send_scoped(ApiOp::UpdateProject(id, input));
                        }
                    }
                    Some(Modal::Project { editing, form })
                }
                FormAction::Stay => Some(Modal::Project { editing, form }),
            },
            Modal::DeleteProject(mut form) => match form_event(&mut form, &event) {
                FormAction::Close => None,
                FormAction::Submit(id) => {
                    self.send_scoped(ApiOp::DeleteProject(id));
                    Some(Modal::DeleteProject(form))
                }
                FormAction::Stay => Some(Modal::DeleteProject(form)),
            },
            Modal::Document { target, mut form } => match form_event(&mut form, &event) {
                FormAction::Close => {
                    if let Target::Edit(id) = target {
                        self.end_document_edit(id);
                    }
                    None
                }
                FormAction::Submit(input) => {
                    self.send_scoped(match target {
                        Target::Create(project) => ApiOp::CreateDocument(project, input),
                        Target::Edit(id) => ApiOp::UpdateDocument(id, input),
                    });
                    Some(Modal::Document { target, form })
                }
                FormAction::Stay => Some(Modal::Document { target, form }),
            },
            Modal::Body { target, mut form } => match form_event(&mut form, &event) {
                FormAction::Close => {
                    if let Target::Edit(id) = target {
                        self.end_body_edit(form.form.kind, id);
                    }
                    None
                }
                FormAction::Submit(input) => {
                    self.send_scoped(match target {
                        Target::Create(doc) => ApiOp::CreateBody(doc, input),
                        Target::Edit(id) => ApiOp::UpdateBody(id, input),
                    });
                    Some(Modal::Body { target, form })
                }
                FormAction::Stay => Some(Modal::Body { target, form }),
            },
            Modal::Parameter { target, mut form } => match form_event(&mut form, &event) {
                FormAction::Close => None,
                FormAction::Submit(input) => {
                    self.send_scoped(match target {
                        Target::Create(project) => ApiOp::CreateParameter(project, input),
                        Target::Edit(id) => ApiOp::UpdateParameter(id, input),
                    });
                    Some(Modal::Parameter { target, form })
                }
                FormAction::Stay => Some(Modal::Parameter { target, form }),
            },
        }
    }

    fn links_event(&mut self, mut editor: LinkEditor, event: UiEvent) -> Option<Modal> {
        let library = match self.project_view() {
            Some(view) => view.parameters.params().items(),
            None => return None,
        };
        match event {
            UiEvent::Back => return None,
            UiEvent::Up => editor.cursor_up(),
            UiEvent::Down => editor.cursor_down(library),
            UiEvent::Activate => editor.toggle_at_cursor(library),
            UiEvent::Submit => match editor.begin_submit() {
                LinkSubmit::Close => return None,
                LinkSubmit::Busy => {}
                LinkSubmit::Send(delta) => {
                    self.send_scoped(ApiOp::UpdateLinks(editor.doc_id(), delta));
                }
            },
            _ => {}
        }
        Some(Modal::Links(editor))
    }

    fn run_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteDocument(id) => {
                self.send_scoped(ApiOp::DeleteDocument(id));
            }
            PendingAction::DeleteBody(kind, id) => {
                self.send_scoped(ApiOp::DeleteBody(kind, id));
            }
            PendingAction::DeleteParameter(id) => {
                self.send_scoped(ApiOp::DeleteParameter(id));
            }
            PendingAction::Logout => self.logout(),
        }
    }

    // ========================
    // Navigation
    // ========================

    /// Send under the open project's scope, or the root scope outside one
    fn send_scoped(&mut self, op: ApiOp) -> RequestId {
        let scope = self.project_view().map_or(Scope::ROOT, ProjectView::scope);
        self.dispatch.send(scope, op)
    }

    fn open_project(&mut self, id: Id, seed: Option<Project>) {
        if let Screen::Project(view) = &self.screen {
            view.close(&mut self.dispatch);
        }
        let view = ProjectView::open(id, seed, &mut self.dispatch);
        self.screen = Screen::Project(Box::new(view));
    }

    fn leave_project(&mut self) {
        if let Screen::Project(view) = &self.screen {
            view.close(&mut self.dispatch);
        }
        self.screen = Screen::Projects;
    }

    fn end_document_edit(&mut self, id: Id) {
        if let Some(panel) = self
            .project_view_mut()
            .and_then(|view| view.documents.panel_mut(id))
        {
            panel.detail.end_edit();
        }
    }

    fn end_body_edit(&mut self, kind: BodyKind, id: Id) {
        let Some(view) = self.project_view_mut() else {
            return;
        };
        let Some(doc_id) = view.documents.expanded() else {
            return;
        };
        if let Some(item) = view
            .documents
            .panel_mut(doc_id)
            .and_then(|panel| panel.bodies.item_mut((kind, id)))
        {
            item.end_edit();
        }
    }

    pub fn logout(&mut self) {
        tracing::info!("Signing out");
        self.dispatch.push(NetworkCommand::Logout);
        self.reset_to_login(None);
    }

    fn expire_session(&mut self) {
        tracing::warn!("Session expired, returning to sign-in");
        self.reset_to_login(Some(ApiError::SessionExpired.to_string()));
    }

    fn reset_to_login(&mut self, notice: Option<String>) {
        if let Screen::Project(view) = &self.screen {
            view.close(&mut self.dispatch);
        }
        self.dispatch.cancel(Scope::ROOT);
        self.modal = None;
        self.projects.reset();
        self.screen = Screen::Login(LoginScreen::new(notice));
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let NetworkResponse::Completed {
            id,
            scope,
            op,
            result,
        } = response;

        if !self.dispatch.accept(id) {
            tracing::debug!(id, op = op.name(), "Dropping stale response");
            return;
        }

        match &result {
            Err(ApiError::SessionExpired) => {
                self.expire_session();
                return;
            }
            Err(e) if op.is_write() => {
                self.write_failed(&op, e);
                return;
            }
            Err(e) => {
                tracing::warn!(op = op.name(), error = %e, "Load failed");
                self.status = format!("Load failed: {}", e.summary());
            }
            Ok(_) => {}
        }

        if scope == Scope::ROOT {
            self.apply_root(op, result);
        } else {
            self.apply_project(scope, op, result);
        }
    }

    fn write_failed(&mut self, op: &ApiOp, error: &ApiError) {
        tracing::warn!(op = op.name(), error = %error, "Write failed");
        if let Screen::Login(login) = &mut self.screen {
            let message = if error.is_unauthorized() {
                "Invalid username or password".to_string()
            } else {
                error.to_string()
            };
            match op {
                ApiOp::Register(_) => login.register.set_error(message),
                _ => login.login.set_error(message),
            }
            return;
        }
        if let Some(modal) = self.modal.as_mut() {
            modal.finish_submit();
        }
        self.alert = Some(format!("Could not {}: {}", op.name().replace('_', " "), error));
    }

    fn apply_root(&mut self, op: ApiOp, result: Result<ApiPayload, ApiError>) {
        match op {
            ApiOp::Login(_) => {
                if result.is_ok() {
                    tracing::info!("Signed in");
                    self.screen = Screen::Projects;
                    self.status = "Signed in".into();
                    self.projects.load(&mut self.dispatch);
                }
            }
            ApiOp::Register(input) => {
                if let (Ok(_), Screen::Login(login)) = (result, &mut self.screen) {
                    *login = LoginScreen::new(Some("Account created. Sign in to continue.".into()));
                    login.login = FormState::new(LoginForm {
                        username: TextField::new(input.username),
                        password: TextField::default(),
                    });
                    login.login.next_field();
                }
            }
            ApiOp::ListProjects => self.projects.finish_load(payload!(result, Projects)),
            ApiOp::CreateProject(_) => {
                if let Ok(project) = payload!(result, Project) {
                    close_submitted(&mut self.modal);
                    self.status = format!("Created project {}", project.name);
                    self.projects.on_created(&project, &mut self.dispatch);
                    self.open_project(project.id, Some(project));
                }
            }
            other => tracing::debug!(op = other.name(), "Ignoring response outside a project"),
        }
    }

    fn apply_project(&mut self, scope: Scope, op: ApiOp, result: Result<ApiPayload, ApiError>) {
        let Screen::Project(view) = &mut self.screen else {
            return;
        };
        if view.scope() != scope {
            tracing::debug!(scope = scope.0, op = op.name(), "Response for a closed project");
            return;
        }
        let dispatch = &mut self.dispatch;

        match op {
            ApiOp::GetProject(_) => view.finish_project(payload!(result, Project)),
            ApiOp::UpdateProject(..) => {
                if let Ok(project) = payload!(result, Project) {
                    close_submitted(&mut self.modal);
                    self.projects.on_updated(project.clone());
                    view.on_project_updated(project);
                    self.status = "Project saved".into();
                }
            }
            ApiOp::DeleteProject(id) => {
                if result.is_ok() {
                    close_submitted(&mut self.modal);
                    view.close(dispatch);
                    self.screen = Screen::Projects;
                    self.projects.on_deleted(id);
                    self.status = "Project deleted".into();
                }
            }

            ApiOp::ListDocuments(_) => {
                view.documents
                    .finish_load(payload!(result, Documents), scope, dispatch)
            }
            ApiOp::CreateDocument(..) => {
                if let Ok(doc) = payload!(result, Document) {
                    close_submitted(&mut self.modal);
                    self.status = format!("Created {} {}", doc.http_method.as_str(), doc.url);
                    view.documents.on_created(doc, scope, dispatch);
                }
            }
            ApiOp::GetDocument(id) => view
                .documents
                .finish_document(id, payload!(result, Document)),
            ApiOp::UpdateDocument(..) => {
                if let Ok(doc) = payload!(result, Document) {
                    close_submitted(&mut self.modal);
                    view.documents.on_updated(doc, scope, dispatch);
                }
            }
            ApiOp::DeleteDocument(id) => {
                if result.is_ok() {
                    view.documents.on_deleted(id);
                    self.status = "Document deleted".into();
                }
            }

            ApiOp::ListParameters(_) => {
                view.parameters.finish_load(payload!(result, Parameters));
                if let Some(Modal::Links(editor)) = &mut self.modal {
                    editor.prune(view.parameters.params().items());
                }
            }
            ApiOp::CreateParameter(..) => {
                if let Ok(param) = payload!(result, Parameter) {
                    close_submitted(&mut self.modal);
                    view.parameters.on_created(&param, scope, dispatch);
                }
            }
            ApiOp::UpdateParameter(..) => {
                if let Ok(param) = payload!(result, Parameter) {
                    close_submitted(&mut self.modal);
                    view.parameters.on_updated(param);
                    view.documents.refetch_expanded(scope, dispatch);
                }
            }
            ApiOp::DeleteParameter(id) => {
                if result.is_ok() {
                    view.parameters.on_deleted(id);
                    view.documents.refetch_expanded(scope, dispatch);
                }
            }
            ApiOp::UpdateLinks(doc, _) => {
                if result.is_ok() {
                    close_submitted(&mut self.modal);
                    view.documents.refetch(doc, scope, dispatch);
                    self.status = "Parameter links saved".into();
                }
            }

            ApiOp::CreateBody(doc, _) => {
                if let Ok(detail) = payload!(result, Body) {
                    close_submitted(&mut self.modal);
                    view.documents.on_body_created(doc, detail, scope, dispatch);
                }
            }
            ApiOp::GetBody(kind, id) => view
                .documents
                .finish_body((kind, id), payload!(result, Body)),
            ApiOp::UpdateBody(..) => {
                if let Ok(detail) = payload!(result, Body) {
                    close_submitted(&mut self.modal);
                    view.documents.on_body_updated(detail, scope, dispatch);
                }
            }
            ApiOp::DeleteBody(kind, id) => {
                if result.is_ok() {
                    view.documents.on_body_deleted((kind, id));
                }
            }

            ApiOp::ListPages(_) => view.finish_pages(payload!(result, Pages)),

            other => tracing::debug!(op = other.name(), "Ignoring session response in project scope"),
        }
    }
}

// ========================
// Per-tab key handling
// ========================

fn docs_event(
    view: &mut ProjectView,
    dispatch: &mut crate::app::dispatch::Dispatcher,
    status: &mut String,
    event: UiEvent,
) -> Option<Modal> {
    let scope = view.scope();
    let project_id = view.project_id();
    let docs = &mut view.documents;
    match event {
        UiEvent::Up => docs.select_prev(),
        UiEvent::Down => docs.select_next(),
        UiEvent::FocusRight => docs.focus_bodies(),
        UiEvent::FocusLeft => docs.focus_rows(),
        UiEvent::Activate => docs.activate(scope, dispatch),
        UiEvent::New => {
            return Some(Modal::Document {
                target: Target::Create(project_id),
                form: FormState::new(DocumentForm::default()),
            })
        }
        UiEvent::Edit => match docs.focus() {
            DocFocus::Rows => {
                let Some(id) = docs.expanded() else {
                    *status = "Expand a document to edit it".into();
                    return None;
                };
                let panel = docs.panel_mut(id)?;
                if !panel.detail.begin_edit() {
                    *status = "Document is not loaded yet".into();
                    return None;
                }
                let form = DocumentForm::from_document(panel.detail.value()?);
                return Some(Modal::Document {
                    target: Target::Edit(id),
                    form: FormState::new(form),
                });
            }
            DocFocus::Bodies => {
                let key = docs.selected_body()?;
                let doc_id = docs.expanded()?;
                let Some(item) = docs.panel_mut(doc_id)?.bodies.item_mut(key) else {
                    *status = "Expand the body to edit it".into();
                    return None;
                };
                if !item.begin_edit() {
                    *status = "Expand the body to edit it".into();
                    return None;
                }
                let form = BodyForm::from_detail(item.value()?);
                return Some(Modal::Body {
                    target: Target::Edit(key.1),
                    form: FormState::new(form),
                });
            }
        },
        UiEvent::Delete => match docs.focus() {
            DocFocus::Rows => {
                let id = docs.selected_id()?;
                let label = docs
                    .docs()
                    .get(id)
                    .map(|d| format!("{} {}", d.http_method.as_str(), d.url))
                    .unwrap_or_default();
                return confirm(
                    format!("Delete API document {}?", label),
                    PendingAction::DeleteDocument(id),
                );
            }
            DocFocus::Bodies => {
                let (kind, id) = docs.selected_body()?;
                return confirm(
                    format!("Delete {} body #{}?", kind.label().to_lowercase(), id),
                    PendingAction::DeleteBody(kind, id),
                );
            }
        },
        UiEvent::EditLinks => {
            let Some(doc) = docs.expanded_document() else {
                *status = "Expand a document to edit its parameters".into();
                return None;
            };
            let editor = LinkEditor::new(doc);
            view.parameters.ensure_loaded(scope, dispatch);
            return Some(Modal::Links(editor));
        }
        UiEvent::NewBody(kind) => {
            let Some(doc_id) = docs.expanded_document().map(|d| d.id) else {
                *status = "Expand a document to add a body".into();
                return None;
            };
            return Some(Modal::Body {
                target: Target::Create(doc_id),
                form: FormState::new(BodyForm::new(kind)),
            });
        }
        _ => {}
    }
    None
}

fn params_event(view: &mut ProjectView, event: UiEvent) -> Option<Modal> {
    let project_id = view.project_id();
    let library = &mut view.parameters;
    match event {
        UiEvent::Up => library.select_prev(),
        UiEvent::Down => library.select_next(),
        UiEvent::New => {
            return Some(Modal::Parameter {
                target: Target::Create(project_id),
                form: FormState::new(ParameterForm::default()),
            })
        }
        UiEvent::Edit => {
            let param = library.selected_param()?;
            return Some(Modal::Parameter {
                target: Target::Edit(param.id),
                form: FormState::new(ParameterForm::from_parameter(param)),
            });
        }
        UiEvent::Delete => {
            let param = library.selected_param()?;
            return confirm(
                format!("Delete URL parameter {}?", param.parameter),
                PendingAction::DeleteParameter(param.id),
            );
        }
        _ => {}
    }
    None
}

fn settings_event(view: &ProjectView, event: UiEvent) -> Option<Modal> {
    let project = view.project()?;
    match event {
        UiEvent::Edit => Some(Modal::Project {
            editing: Some(project.id),
            form: FormState::new(ProjectForm::from_project(project)),
        }),
        UiEvent::Delete => Some(Modal::DeleteProject(FormState::new(DeleteProjectForm::new(
            project,
        )))),
        _ => None,
    }
}
