use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::ValidationError;

/// Server-assigned primary key
pub type Id = u64;

/// Anything with a server-assigned id
pub trait Entity {
    fn id(&self) -> Id;
}

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
        HttpMethod::DELETE,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownMethod(s.trim().to_string()))
    }
}

/// Which of the two body collections of a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Request,
    Response,
}

impl BodyKind {
    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Request => "Request",
            BodyKind::Response => "Response",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub base_web_url: String,
    #[serde(default)]
    pub base_api_url: String,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub handover_text: Option<String>,
    #[serde(default)]
    pub to_do_request: Option<String>,
}

/// Paginated list envelope used by the project list endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Row of the document list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Id,
    pub http_method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Row of a document's body list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySummary {
    pub id: Id,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub http_status: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub id: Id,
    #[serde(default)]
    pub project_under: Option<Id>,
    pub http_method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "requests")]
    pub request_bodies: Vec<BodySummary>,
    #[serde(default, alias = "responses")]
    pub response_bodies: Vec<BodySummary>,
    #[serde(default)]
    pub url_parameters: Vec<UrlParameter>,
}

impl ApiDocument {
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            http_method: self.http_method,
            url: self.url.clone(),
            description: self.description.clone(),
        }
    }

    pub fn bodies(&self, kind: BodyKind) -> &[BodySummary] {
        match kind {
            BodyKind::Request => &self.request_bodies,
            BodyKind::Response => &self.response_bodies,
        }
    }

    pub fn bodies_mut(&mut self, kind: BodyKind) -> &mut Vec<BodySummary> {
        match kind {
            BodyKind::Request => &mut self.request_bodies,
            BodyKind::Response => &mut self.response_bodies,
        }
    }

    /// Copy the editable header fields of an update response
    pub fn merge_info(&mut self, updated: &ApiDocument) {
        self.http_method = updated.http_method;
        self.url = updated.url.clone();
        self.description = updated.description.clone();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub id: Id,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub request_example: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub id: Id,
    #[serde(default)]
    pub description: String,
    pub http_status: u16,
    #[serde(default)]
    pub response_example: Value,
}

/// Detail of either body kind
#[derive(Clone, Debug, PartialEq)]
pub enum BodyDetail {
    Request(RequestBody),
    Response(ResponseBody),
}

impl BodyDetail {
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyDetail::Request(_) => BodyKind::Request,
            BodyDetail::Response(_) => BodyKind::Response,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            BodyDetail::Request(b) => &b.description,
            BodyDetail::Response(b) => &b.description,
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            BodyDetail::Request(_) => None,
            BodyDetail::Response(b) => Some(b.http_status),
        }
    }

    pub fn example(&self) -> &Value {
        match self {
            BodyDetail::Request(b) => &b.request_example,
            BodyDetail::Response(b) => &b.response_example,
        }
    }

    pub fn summary(&self) -> BodySummary {
        BodySummary {
            id: self.id(),
            description: self.description().to_string(),
            http_status: self.http_status(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UrlParameter {
    pub id: Id,
    #[serde(default)]
    pub project_under: Option<Id>,
    pub parameter: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrontPage {
    pub id: Id,
    #[serde(default)]
    pub project_under: Option<Id>,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub implemented: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AccessToken {
    pub access: String,
}

// ---------------------------------------------------------------------------
// Write payloads
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub instruction: String,
    pub base_web_url: String,
    pub base_api_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocumentInput {
    pub http_method: HttpMethod,
    pub url: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestBodyInput {
    pub description: String,
    pub request_example: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseBodyInput {
    pub description: String,
    pub http_status: u16,
    pub response_example: Value,
}

/// Body write payload of either kind
#[derive(Clone, Debug, PartialEq)]
pub enum BodyInput {
    Request(RequestBodyInput),
    Response(ResponseBodyInput),
}

impl BodyInput {
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyInput::Request(_) => BodyKind::Request,
            BodyInput::Response(_) => BodyKind::Response,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UrlParameterInput {
    pub parameter: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "gemini_key_encrypted")]
    pub gemini_key: String,
}

/// Add/remove delta for the document ↔ parameter relation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDelta {
    pub to_add: Vec<Id>,
    pub to_pop: Vec<Id>,
}

impl RelationDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_pop.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Entity impls
// ---------------------------------------------------------------------------

macro_rules! impl_entity {
    ($($ty:ty),*) => {
        $(impl Entity for $ty {
            fn id(&self) -> Id {
                self.id
            }
        })*
    };
}

impl_entity!(
    Project,
    DocumentSummary,
    BodySummary,
    ApiDocument,
    RequestBody,
    ResponseBody,
    UrlParameter,
    FrontPage
);

impl Entity for BodyDetail {
    fn id(&self) -> Id {
        match self {
            BodyDetail::Request(b) => b.id,
            BodyDetail::Response(b) => b.id,
        }
    }
}
