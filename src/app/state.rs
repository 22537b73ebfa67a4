//! App state - pure data structure with no I/O logic

use crate::app::dispatch::Dispatcher;
use crate::app::forms::{
    BodyForm, DeleteProjectForm, DocumentForm, FormState, LoginForm, ParameterForm, ProjectForm,
    RegisterForm,
};
use crate::app::links::LinkEditor;
use crate::app::projects::{ProjectList, ProjectView};
use crate::messages::render::{ModalView, ScreenView};
use crate::messages::{NetworkCommand, RenderState};
use crate::models::{BodyKind, Id};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Clone, Debug)]
pub struct LoginScreen {
    pub mode: LoginMode,
    pub login: FormState<LoginForm>,
    pub register: FormState<RegisterForm>,
    pub notice: Option<String>,
}

impl LoginScreen {
    pub fn new(notice: Option<String>) -> Self {
        LoginScreen {
            mode: LoginMode::SignIn,
            login: FormState::new(LoginForm::default()),
            register: FormState::new(RegisterForm::default()),
            notice,
        }
    }
}

pub enum Screen {
    Login(LoginScreen),
    Projects,
    Project(Box<ProjectView>),
}

/// Whether a form creates under a parent or edits an existing entity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Create(Id),
    Edit(Id),
}

/// Action waiting for a yes/no answer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    DeleteDocument(Id),
    DeleteBody(BodyKind, Id),
    DeleteParameter(Id),
    Logout,
}

pub enum Modal {
    Help,
    Confirm {
        prompt: String,
        action: PendingAction,
    },
    Project {
        editing: Option<Id>,
        form: FormState<ProjectForm>,
    },
    DeleteProject(FormState<DeleteProjectForm>),
    Document {
        target: Target,
        form: FormState<DocumentForm>,
    },
    Body {
        target: Target,
        form: FormState<BodyForm>,
    },
    Parameter {
        target: Target,
        form: FormState<ParameterForm>,
    },
    Links(LinkEditor),
}

impl Modal {
    pub fn is_submitting(&self) -> bool {
        match self {
            Modal::Help | Modal::Confirm { .. } => false,
            Modal::Project { form, .. } => form.is_submitting(),
            Modal::DeleteProject(form) => form.is_submitting(),
            Modal::Document { form, .. } => form.is_submitting(),
            Modal::Body { form, .. } => form.is_submitting(),
            Modal::Parameter { form, .. } => form.is_submitting(),
            Modal::Links(editor) => editor.is_submitting(),
        }
    }

    /// Clear the submitting flag after a failed write; the form stays open
    pub fn finish_submit(&mut self) {
        match self {
            Modal::Help | Modal::Confirm { .. } => {}
            Modal::Project { form, .. } => form.finish_submit(),
            Modal::DeleteProject(form) => form.finish_submit(),
            Modal::Document { form, .. } => form.finish_submit(),
            Modal::Body { form, .. } => form.finish_submit(),
            Modal::Parameter { form, .. } => form.finish_submit(),
            Modal::Links(editor) => editor.finish_submit(),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub screen: Screen,
    pub projects: ProjectList,
    pub modal: Option<Modal>,
    pub alert: Option<String>,
    pub status: String,
    pub(crate) dispatch: Dispatcher,
}

impl AppState {
    /// Start on the project list when credentials are already stored
    pub fn new(signed_in: bool) -> Self {
        let mut state = AppState {
            screen: Screen::Login(LoginScreen::new(None)),
            projects: ProjectList::new(),
            modal: None,
            alert: None,
            status: String::new(),
            dispatch: Dispatcher::new(),
        };
        if signed_in {
            state.screen = Screen::Projects;
            state.projects.load(&mut state.dispatch);
        }
        state
    }

    pub fn project_view(&self) -> Option<&ProjectView> {
        match &self.screen {
            Screen::Project(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    pub fn project_view_mut(&mut self) -> Option<&mut ProjectView> {
        match &mut self.screen {
            Screen::Project(view) => Some(view.as_mut()),
            _ => None,
        }
    }

    /// Commands produced since the last drain, in order
    pub fn drain_commands(&mut self) -> Vec<NetworkCommand> {
        self.dispatch.drain()
    }

    pub fn in_flight(&self) -> usize {
        self.dispatch.in_flight()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let screen = match &self.screen {
            Screen::Login(login) => ScreenView::Login {
                sign_up: login.mode == LoginMode::SignUp,
                form: match login.mode {
                    LoginMode::SignIn => login.login.view("Sign in"),
                    LoginMode::SignUp => login.register.view("Sign up"),
                },
                notice: login.notice.clone(),
            },
            Screen::Projects => ScreenView::Projects(self.projects.view()),
            Screen::Project(view) => ScreenView::Project(Box::new(view.view())),
        };
        RenderState {
            screen,
            modal: self.modal.as_ref().map(|modal| self.modal_view(modal)),
            alert: self.alert.clone(),
            status: self.status.clone(),
            in_flight: self.dispatch.in_flight(),
        }
    }

    fn modal_view(&self, modal: &Modal) -> ModalView {
        match modal {
            Modal::Help => ModalView::Help,
            Modal::Confirm { prompt, .. } => ModalView::Confirm(prompt.clone()),
            Modal::Project { editing, form } => ModalView::Form(form.view(match editing {
                Some(_) => "Edit project",
                None => "New project",
            })),
            Modal::DeleteProject(form) => ModalView::Form(
                form.view(format!("Delete project '{}'", form.form.expected)),
            ),
            Modal::Document { target, form } => ModalView::Form(form.view(match target {
                Target::Create(_) => "New API document",
                Target::Edit(_) => "Edit API document",
            })),
            Modal::Body { target, form } => {
                let verb = match target {
                    Target::Create(_) => "New",
                    Target::Edit(_) => "Edit",
                };
                let noun = form.form.kind.label().to_lowercase();
                ModalView::Form(form.view(format!("{} {} body", verb, noun)))
            }
            Modal::Parameter { target, form } => ModalView::Form(form.view(match target {
                Target::Create(_) => "New URL parameter",
                Target::Edit(_) => "Edit URL parameter",
            })),
            Modal::Links(editor) => {
                let (library, loading) = match self.project_view() {
                    Some(view) => (
                        view.parameters.params().items(),
                        view.parameters.params().is_loading(),
                    ),
                    None => (&[][..], false),
                };
                ModalView::Links(editor.view(library, loading))
            }
        }
    }
}
