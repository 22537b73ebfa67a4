//! Network messages - communication between App and Network layers

use crate::error::ApiError;
use crate::models::{
    ApiDocument, BodyDetail, BodyInput, BodyKind, DocumentInput, DocumentSummary, FrontPage, Id,
    LoginInput, Project, ProjectInput, RegisterInput, RelationDelta, UrlParameter,
    UrlParameterInput,
};

/// Correlates a response with the command that caused it
pub type RequestId = u64;

/// Lifetime group of requests; all requests of a scope are cancelled together
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scope(pub u64);

impl Scope {
    /// Session, project list and other app-lifetime requests
    pub const ROOT: Scope = Scope(0);
}

/// One typed call against the documentation server
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOp {
    Login(LoginInput),
    Register(RegisterInput),

    ListProjects,
    CreateProject(ProjectInput),
    GetProject(Id),
    UpdateProject(Id, ProjectInput),
    DeleteProject(Id),

    ListDocuments(Id),
    CreateDocument(Id, DocumentInput),
    GetDocument(Id),
    UpdateDocument(Id, DocumentInput),
    DeleteDocument(Id),

    ListParameters(Id),
    CreateParameter(Id, UrlParameterInput),
    UpdateParameter(Id, UrlParameterInput),
    DeleteParameter(Id),
    UpdateLinks(Id, RelationDelta),

    CreateBody(Id, BodyInput),
    GetBody(BodyKind, Id),
    UpdateBody(Id, BodyInput),
    DeleteBody(BodyKind, Id),

    ListPages(Id),
}

impl ApiOp {
    /// Whether this op changes server state (failures surface as alerts)
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            ApiOp::ListProjects
                | ApiOp::GetProject(_)
                | ApiOp::ListDocuments(_)
                | ApiOp::GetDocument(_)
                | ApiOp::ListParameters(_)
                | ApiOp::GetBody(..)
                | ApiOp::ListPages(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiOp::Login(_) => "login",
            ApiOp::Register(_) => "register",
            ApiOp::ListProjects => "list_projects",
            ApiOp::CreateProject(_) => "create_project",
            ApiOp::GetProject(_) => "get_project",
            ApiOp::UpdateProject(..) => "update_project",
            ApiOp::DeleteProject(_) => "delete_project",
            ApiOp::ListDocuments(_) => "list_documents",
            ApiOp::CreateDocument(..) => "create_document",
            ApiOp::GetDocument(_) => "get_document",
            ApiOp::UpdateDocument(..) => "update_document",
            ApiOp::DeleteDocument(_) => "delete_document",
            ApiOp::ListParameters(_) => "list_parameters",
            ApiOp::CreateParameter(..) => "create_parameter",
            ApiOp::UpdateParameter(..) => "update_parameter",
            ApiOp::DeleteParameter(_) => "delete_parameter",
            ApiOp::UpdateLinks(..) => "update_links",
            ApiOp::CreateBody(..) => "create_body",
            ApiOp::GetBody(..) => "get_body",
            ApiOp::UpdateBody(..) => "update_body",
            ApiOp::DeleteBody(..) => "delete_body",
            ApiOp::ListPages(_) => "list_pages",
        }
    }
}

/// Successful result of an [`ApiOp`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Done,
    Projects(Vec<Project>),
    Project(Project),
    Documents(Vec<DocumentSummary>),
    Document(ApiDocument),
    Parameters(Vec<UrlParameter>),
    Parameter(UrlParameter),
    Body(BodyDetail),
    Pages(Vec<FrontPage>),
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run an API call
    Execute {
        id: RequestId,
        scope: Scope,
        op: ApiOp,
    },
    /// Abort every in-flight request of a scope
    CancelScope(Scope),
    /// Drop stored credentials
    Logout,
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Completed {
        id: RequestId,
        scope: Scope,
        op: ApiOp,
        result: Result<ApiPayload, ApiError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> RequestId {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
        }
    }
}
