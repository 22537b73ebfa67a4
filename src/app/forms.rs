//! Form state - text fields, focus, validation and the submitting guard
//!
//! Every form is a plain struct with named fields. [`Form`] exposes them by
//! index so [`FormState`] can drive focus, editing and rendering generically,
//! and `validate` turns the text into the typed write payload.

use serde_json::Value;

use crate::constants::{EMPTY_JSON_EXAMPLE, NEW_DOCUMENT_URL};
use crate::error::ValidationError;
use crate::messages::render::{FieldView, FormView};
use crate::models::{
    ApiDocument, BodyDetail, BodyInput, BodyKind, DocumentInput, HttpMethod, Id, LoginInput, Project,
    ProjectInput, RegisterInput, RequestBodyInput, ResponseBodyInput, UrlParameter,
    UrlParameterInput,
};

/// Single editable text value with a byte cursor on a char boundary
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        TextField { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn insert(&mut self, c: char) {
        if self.cursor <= self.value.len() {
            self.value.insert(self.cursor, c);
            self.cursor += c.len_utf8();
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }
}

fn required(field: &TextField, name: &'static str) -> Result<String, ValidationError> {
    if field.is_blank() {
        Err(ValidationError::Required(name))
    } else {
        Ok(field.trimmed().to_string())
    }
}

fn parse_json(field: &TextField) -> Result<Value, ValidationError> {
    serde_json::from_str(field.value()).map_err(|e| ValidationError::InvalidJson(e.to_string()))
}

fn parse_status(field: &TextField) -> Result<u16, ValidationError> {
    let text = field.trimmed();
    match text.parse::<u16>() {
        Ok(status) if (100..=599).contains(&status) => Ok(status),
        _ => Err(ValidationError::InvalidStatus(text.to_string())),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Field access and validation shared by all forms
pub trait Form {
    type Output;

    fn labels(&self) -> &'static [&'static str];
    fn field(&self, index: usize) -> &TextField;
    fn field_mut(&mut self, index: usize) -> &mut TextField;
    fn validate(&self) -> Result<Self::Output, ValidationError>;

    fn is_secret(&self, _index: usize) -> bool {
        false
    }

    fn is_multiline(&self, _index: usize) -> bool {
        false
    }
}

/// A form plus focus, inline error and the submitting flag
#[derive(Clone, Debug)]
pub struct FormState<F> {
    pub form: F,
    focus: usize,
    submitting: bool,
    error: Option<String>,
}

impl<F: Form> FormState<F> {
    pub fn new(form: F) -> Self {
        FormState {
            form,
            focus: 0,
            submitting: false,
            error: None,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn focus_is_multiline(&self) -> bool {
        self.form.is_multiline(self.focus)
    }

    pub fn next_field(&mut self) {
        let count = self.form.labels().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.form.labels().len();
        if count > 0 {
            self.focus = self.focus.checked_sub(1).unwrap_or(count - 1);
        }
    }

    pub fn input(&mut self, c: char) {
        if !self.submitting {
            self.form.field_mut(self.focus).insert(c);
        }
    }

    pub fn newline(&mut self) {
        if self.focus_is_multiline() {
            self.input('\n');
        }
    }

    pub fn backspace(&mut self) {
        if !self.submitting {
            self.form.field_mut(self.focus).backspace();
        }
    }

    pub fn cursor_left(&mut self) {
        self.form.field_mut(self.focus).left();
    }

    pub fn cursor_right(&mut self) {
        self.form.field_mut(self.focus).right();
    }

    /// Validate and raise the submitting flag.
    ///
    /// Returns `None` while a submission is in flight or when validation
    /// fails; the failure is kept as the inline error.
    pub fn begin_submit(&mut self) -> Option<F::Output> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(output) => {
                self.submitting = true;
                self.error = None;
                Some(output)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Request finished without closing the form
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    pub fn view(&self, title: impl Into<String>) -> FormView {
        let fields = self
            .form
            .labels()
            .iter()
            .enumerate()
            .map(|(i, &label)| {
                let field = self.form.field(i);
                FieldView {
                    label,
                    value: field.value().to_string(),
                    cursor: field.cursor(),
                    secret: self.form.is_secret(i),
                    multiline: self.form.is_multiline(i),
                }
            })
            .collect();
        FormView {
            title: title.into(),
            fields,
            focus: self.focus,
            submitting: self.submitting,
            error: self.error.clone(),
        }
    }
}

// ========================
// Session
// ========================

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
}

impl Form for LoginForm {
    type Output = LoginInput;

    fn labels(&self) -> &'static [&'static str] {
        &["Username", "Password"]
    }

    fn field(&self, index: usize) -> &TextField {
        match index {
            0 => &self.username,
            _ => &self.password,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.username,
            _ => &mut self.password,
        }
    }

    fn is_secret(&self, index: usize) -> bool {
        index == 1
    }

    fn validate(&self) -> Result<LoginInput, ValidationError> {
        Ok(LoginInput {
            username: required(&self.username, "Username")?,
            password: required(&self.password, "Password")?,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub username: TextField,
    pub password: TextField,
    pub email: TextField,
    pub nickname: TextField,
    pub bio: TextField,
    pub gemini_key: TextField,
}

impl Form for RegisterForm {
    type Output = RegisterInput;

    fn labels(&self) -> &'static [&'static str] {
        &["Username", "Password", "Email", "Nickname", "Bio", "Gemini API key"]
    }

    fn field(&self, index: usize) -> &TextField {
        match index {
            0 => &self.username,
            1 => &self.password,
            2 => &self.email,
            3 => &self.nickname,
            4 => &self.bio,
            _ => &self.gemini_key,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.username,
            1 => &mut self.password,
            2 => &mut self.email,
            3 => &mut self.nickname,
            4 => &mut self.bio,
            _ => &mut self.gemini_key,
        }
    }

    fn is_secret(&self, index: usize) -> bool {
        index == 1 || index == 5
    }

    fn validate(&self) -> Result<RegisterInput, ValidationError> {
        Ok(RegisterInput {
            username: required(&self.username, "Username")?,
            password: required(&self.password, "Password")?,
            email: required(&self.email, "Email")?,
            nickname: required(&self.nickname, "Nickname")?,
            bio: (!self.bio.is_blank()).then(|| self.bio.trimmed().to_string()),
            gemini_key: required(&self.gemini_key, "Gemini API key")?,
        })
    }
}

// ========================
// Projects
// ========================

#[derive(Clone, Debug, Default)]
pub struct ProjectForm {
    pub name: TextField,
    pub description: TextField,
    pub instruction: TextField,
    pub base_web_url: TextField,
    pub base_api_url: TextField,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        ProjectForm {
            name: TextField::new(project.name.as_str()),
            description: TextField::new(project.description.as_str()),
            instruction: TextField::new(project.instruction.as_str()),
            base_web_url: TextField::new(project.base_web_url.as_str()),
            base_api_url: TextField::new(project.base_api_url.as_str()),
        }
    }
}

impl Form for ProjectForm {
    type Output = ProjectInput;

    fn labels(&self) -> &'static [&'static str] {
        &["Name", "Description", "Instruction", "Base web URL", "Base API URL"]
    }

    fn field(&self, index: usize) -> &TextField {
        match index {
            0 => &self.name,
            1 => &self.description,
            2 => &self.instruction,
            3 => &self.base_web_url,
            _ => &self.base_api_url,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.name,
            1 => &mut self.description,
            2 => &mut self.instruction,
            3 => &mut self.base_web_url,
            _ => &mut self.base_api_url,
        }
    }

    fn is_multiline(&self, index: usize) -> bool {
        index == 1 || index == 2
    }

    fn validate(&self) -> Result<ProjectInput, ValidationError> {
        Ok(ProjectInput {
            name: required(&self.name, "Project name")?,
            description: self.description.value().to_string(),
            instruction: self.instruction.value().to_string(),
            base_web_url: self.base_web_url.trimmed().to_string(),
            base_api_url: self.base_api_url.trimmed().to_string(),
        })
    }
}

/// Delete gate: the user must type the project name
#[derive(Clone, Debug)]
pub struct DeleteProjectForm {
    pub project_id: Id,
    pub expected: String,
    pub confirm: TextField,
}

impl DeleteProjectForm {
    pub fn new(project: &Project) -> Self {
        DeleteProjectForm {
            project_id: project.id,
            expected: project.name.clone(),
            confirm: TextField::default(),
        }
    }
}

impl Form for DeleteProjectForm {
    type Output = Id;

    fn labels(&self) -> &'static [&'static str] {
        &["Project name"]
    }

    fn field(&self, _index: usize) -> &TextField {
        &self.confirm
    }

    fn field_mut(&mut self, _index: usize) -> &mut TextField {
        &mut self.confirm
    }

    fn validate(&self) -> Result<Id, ValidationError> {
        if self.confirm.value() == self.expected {
            Ok(self.project_id)
        } else {
            Err(ValidationError::ConfirmationMismatch)
        }
    }
}

// ========================
// API documents
// ========================

#[derive(Clone, Debug)]
pub struct DocumentForm {
    pub method: TextField,
    pub url: TextField,
    pub description: TextField,
}

impl Default for DocumentForm {
    fn default() -> Self {
        DocumentForm {
            method: TextField::new(HttpMethod::default().as_str()),
            url: TextField::new(NEW_DOCUMENT_URL),
            description: TextField::default(),
        }
    }
}

impl DocumentForm {
    pub fn from_document(doc: &ApiDocument) -> Self {
        DocumentForm {
            method: TextField::new(doc.http_method.as_str()),
            url: TextField::new(doc.url.as_str()),
            description: TextField::new(doc.description.as_str()),
        }
    }
}

impl Form for DocumentForm {
    type Output = DocumentInput;

    fn labels(&self) -> &'static [&'static str] {
        &["Method", "URL", "Description"]
    }

    fn field(&self, index: usize) -> &TextField {
        match index {
            0 => &self.method,
            1 => &self.url,
            _ => &self.description,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.method,
            1 => &mut self.url,
            _ => &mut self.description,
        }
    }

    fn is_multiline(&self, index: usize) -> bool {
        index == 2
    }

    fn validate(&self) -> Result<DocumentInput, ValidationError> {
        Ok(DocumentInput {
            http_method: self.method.value().parse()?,
            url: required(&self.url, "URL")?,
            description: self.description.value().to_string(),
        })
    }
}

// ========================
// Request / response bodies
// ========================

#[derive(Clone, Debug)]
pub struct BodyForm {
    pub kind: BodyKind,
    pub description: TextField,
    pub http_status: TextField,
    pub example: TextField,
}

impl BodyForm {
    pub fn new(kind: BodyKind) -> Self {
        BodyForm {
            kind,
            description: TextField::default(),
            http_status: TextField::new("200"),
            example: TextField::new(EMPTY_JSON_EXAMPLE),
        }
    }

    pub fn from_detail(detail: &BodyDetail) -> Self {
        BodyForm {
            kind: detail.kind(),
            description: TextField::new(detail.description()),
            http_status: TextField::new(
                detail.http_status().map(|s| s.to_string()).unwrap_or_default(),
            ),
            example: TextField::new(pretty(detail.example())),
        }
    }

    fn example_index(&self) -> usize {
        match self.kind {
            BodyKind::Request => 1,
            BodyKind::Response => 2,
        }
    }
}

impl Form for BodyForm {
    type Output = BodyInput;

    fn labels(&self) -> &'static [&'static str] {
        match self.kind {
            BodyKind::Request => &["Description", "Example (JSON)"],
            BodyKind::Response => &["Description", "HTTP status", "Example (JSON)"],
        }
    }

    fn field(&self, index: usize) -> &TextField {
        match (self.kind, index) {
            (_, 0) => &self.description,
            (BodyKind::Response, 1) => &self.http_status,
            _ => &self.example,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match (self.kind, index) {
            (_, 0) => &mut self.description,
            (BodyKind::Response, 1) => &mut self.http_status,
            _ => &mut self.example,
        }
    }

    fn is_multiline(&self, index: usize) -> bool {
        index == self.example_index()
    }

    fn validate(&self) -> Result<BodyInput, ValidationError> {
        let description = self.description.value().to_string();
        match self.kind {
            BodyKind::Request => Ok(BodyInput::Request(RequestBodyInput {
                description,
                request_example: parse_json(&self.example)?,
            })),
            BodyKind::Response => {
                let http_status = parse_status(&self.http_status)?;
                Ok(BodyInput::Response(ResponseBodyInput {
                    description,
                    http_status,
                    response_example: parse_json(&self.example)?,
                }))
            }
        }
    }
}

// ========================
// URL parameters
// ========================

#[derive(Clone, Debug, Default)]
pub struct ParameterForm {
    pub parameter: TextField,
    pub description: TextField,
}

impl ParameterForm {
    pub fn from_parameter(param: &UrlParameter) -> Self {
        ParameterForm {
            parameter: TextField::new(param.parameter.as_str()),
            description: TextField::new(param.description.as_str()),
        }
    }
}

impl Form for ParameterForm {
    type Output = UrlParameterInput;

    fn labels(&self) -> &'static [&'static str] {
        &["Parameter", "Description"]
    }

    fn field(&self, index: usize) -> &TextField {
        match index {
            0 => &self.parameter,
            _ => &self.description,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.parameter,
            _ => &mut self.description,
        }
    }

    fn validate(&self) -> Result<UrlParameterInput, ValidationError> {
        Ok(UrlParameterInput {
            parameter: required(&self.parameter, "Parameter")?,
            description: required(&self.description, "Description")?,
        })
    }
}
