//! Resource accessors - one typed call per server endpoint
//!
//! Each submodule adds methods to [`ApiClient`]. [`execute`] maps the
//! message-level [`ApiOp`] onto those methods for the network actor.

pub mod bodies;
pub mod documents;
pub mod pages;
pub mod parameters;
pub mod projects;
pub mod session;

use crate::error::ApiError;
use crate::messages::network::{ApiOp, ApiPayload};
use crate::network::client::ApiClient;

/// Run one operation and wrap its result
pub async fn execute(client: &ApiClient, op: &ApiOp) -> Result<ApiPayload, ApiError> {
    let payload = match op {
        ApiOp::Login(input) => client.login(input).await.map(|_| ApiPayload::Done)?,
        ApiOp::Register(input) => client.register(input).await.map(|_| ApiPayload::Done)?,

        ApiOp::ListProjects => ApiPayload::Projects(client.list_projects().await?),
        ApiOp::CreateProject(input) => ApiPayload::Project(client.create_project(input).await?),
        ApiOp::GetProject(id) => ApiPayload::Project(client.get_project(*id).await?),
        ApiOp::UpdateProject(id, input) => {
            ApiPayload::Project(client.update_project(*id, input).await?)
        }
        ApiOp::DeleteProject(id) => client.delete_project(*id).await.map(|_| ApiPayload::Done)?,

        ApiOp::ListDocuments(project) => ApiPayload::Documents(client.list_documents(*project).await?),
        ApiOp::CreateDocument(project, input) => {
            ApiPayload::Document(client.create_document(*project, input).await?)
        }
        ApiOp::GetDocument(id) => ApiPayload::Document(client.get_document(*id).await?),
        ApiOp::UpdateDocument(id, input) => {
            ApiPayload::Document(client.update_document(*id, input).await?)
        }
        ApiOp::DeleteDocument(id) => client.delete_document(*id).await.map(|_| ApiPayload::Done)?,

        ApiOp::ListParameters(project) => {
            ApiPayload::Parameters(client.list_parameters(*project).await?)
        }
        ApiOp::CreateParameter(project, input) => {
            ApiPayload::Parameter(client.create_parameter(*project, input).await?)
        }
        ApiOp::UpdateParameter(id, input) => {
            ApiPayload::Parameter(client.update_parameter(*id, input).await?)
        }
        ApiOp::DeleteParameter(id) => client.delete_parameter(*id).await.map(|_| ApiPayload::Done)?,
        ApiOp::UpdateLinks(doc, delta) => {
            client.update_links(*doc, delta).await.map(|_| ApiPayload::Done)?
        }

        ApiOp::CreateBody(doc, input) => ApiPayload::Body(client.create_body(*doc, input).await?),
        ApiOp::GetBody(kind, id) => ApiPayload::Body(client.get_body(*kind, *id).await?),
        ApiOp::UpdateBody(id, input) => ApiPayload::Body(client.update_body(*id, input).await?),
        ApiOp::DeleteBody(kind, id) => client.delete_body(*kind, *id).await.map(|_| ApiPayload::Done)?,

        ApiOp::ListPages(project) => ApiPayload::Pages(client.list_pages(*project).await?),
    };
    Ok(payload)
}
