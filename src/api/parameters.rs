//! URL parameter library and document ↔ parameter relation endpoints

use crate::error::ApiError;
use crate::models::{Id, RelationDelta, UrlParameter, UrlParameterInput};
use crate::network::client::ApiClient;

impl ApiClient {
    pub async fn list_parameters(&self, project_id: Id) -> Result<Vec<UrlParameter>, ApiError> {
        self.get(&format!("/apidocs/parameters/{}/", project_id)).await
    }

    pub async fn create_parameter(
        &self,
        project_id: Id,
        input: &UrlParameterInput,
    ) -> Result<UrlParameter, ApiError> {
        self.post(&format!("/apidocs/parameters/{}/", project_id), input)
            .await
    }

    pub async fn update_parameter(
        &self,
        param_id: Id,
        input: &UrlParameterInput,
    ) -> Result<UrlParameter, ApiError> {
        self.put(&format!("/apidocs/parameter/{}/", param_id), input).await
    }

    pub async fn delete_parameter(&self, param_id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/apidocs/parameter/{}/", param_id)).await
    }

    /// Apply an add/remove delta to a document's linked parameters
    pub async fn update_links(&self, doc_id: Id, delta: &RelationDelta) -> Result<(), ApiError> {
        self.post_discard(&format!("/apidocs/parameter/relation/{}/", doc_id), delta)
            .await
    }
}
