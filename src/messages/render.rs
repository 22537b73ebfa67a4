//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::expand::Phase;
use crate::app::projects::ProjectTab;
use crate::messages::ui_events::InputMode;
use crate::models::{
    ApiDocument, BodyDetail, BodyKind, BodySummary, DocumentSummary, FrontPage, Id, Project,
    UrlParameter,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub cursor: usize,
    pub secret: bool,
    pub multiline: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub focus: usize,
    pub submitting: bool,
    pub error: Option<String>,
}

impl FormView {
    pub fn focused_multiline(&self) -> bool {
        self.fields.get(self.focus).is_some_and(|f| f.multiline)
    }
}

#[derive(Debug, Clone)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectsView {
    pub items: Vec<Project>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone)]
pub struct BodyRowView {
    pub kind: BodyKind,
    pub summary: BodySummary,
    pub selected: bool,
    /// `None` until the item was first expanded
    pub phase: Option<Phase>,
    pub detail: Option<BodyDetail>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DocRowView {
    pub summary: DocumentSummary,
    pub selected: bool,
    pub expanded: bool,
    pub phase: Option<Phase>,
    pub refreshing: bool,
    pub detail: Option<ApiDocument>,
    pub error: Option<String>,
    pub bodies: Vec<BodyRowView>,
}

#[derive(Debug, Clone)]
pub struct DocsView {
    pub rows: Vec<DocRowView>,
    pub focus_bodies: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectPageView {
    pub project_id: Id,
    pub project: Option<Project>,
    pub project_loading: bool,
    pub project_error: Option<String>,
    pub tab: ProjectTab,
    pub docs: DocsView,
    pub params: ListView<UrlParameter>,
    pub pages: ListView<FrontPage>,
    pub loaded_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkRow {
    pub parameter: String,
    pub description: String,
    /// Row belongs to the linked-to-remove set
    pub linked: bool,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct LinksView {
    pub doc_id: Id,
    pub rows: Vec<LinkRow>,
    pub cursor: usize,
    pub submitting: bool,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub enum ScreenView {
    Login {
        sign_up: bool,
        form: FormView,
        notice: Option<String>,
    },
    Projects(ProjectsView),
    Project(Box<ProjectPageView>),
}

#[derive(Debug, Clone)]
pub enum ModalView {
    Form(FormView),
    Confirm(String),
    Links(LinksView),
    Help,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: ScreenView,
    pub modal: Option<ModalView>,
    /// Blocking error popup drawn above everything
    pub alert: Option<String>,
    pub status: String,
    pub in_flight: usize,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            screen: ScreenView::Projects(ProjectsView::default()),
            modal: None,
            alert: None,
            status: String::new(),
            in_flight: 0,
        }
    }
}

impl RenderState {
    /// Which key map applies to the frontmost element
    pub fn input_mode(&self) -> InputMode {
        if self.alert.is_some() {
            return InputMode::Alert;
        }
        match &self.modal {
            Some(ModalView::Help) => InputMode::Help,
            Some(ModalView::Confirm(_)) => InputMode::Confirm,
            Some(ModalView::Links(_)) => InputMode::Checklist,
            Some(ModalView::Form(form)) => InputMode::Form {
                multiline: form.focused_multiline(),
            },
            None => match &self.screen {
                ScreenView::Login { .. } => InputMode::Form { multiline: false },
                _ => InputMode::Normal,
            },
        }
    }
}
