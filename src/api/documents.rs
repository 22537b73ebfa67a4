//! API document endpoints

use crate::error::ApiError;
use crate::models::{ApiDocument, DocumentInput, DocumentSummary, Id};
use crate::network::client::ApiClient;

impl ApiClient {
    pub async fn list_documents(&self, project_id: Id) -> Result<Vec<DocumentSummary>, ApiError> {
        self.get(&format!("/apidocs/{}/", project_id)).await
    }

    pub async fn create_document(
        &self,
        project_id: Id,
        input: &DocumentInput,
    ) -> Result<ApiDocument, ApiError> {
        self.post(&format!("/apidocs/{}/", project_id), input).await
    }

    pub async fn get_document(&self, doc_id: Id) -> Result<ApiDocument, ApiError> {
        self.get(&format!("/apidocs/detail/{}/", doc_id)).await
    }

    pub async fn update_document(
        &self,
        doc_id: Id,
        input: &DocumentInput,
    ) -> Result<ApiDocument, ApiError> {
        self.put(&format!("/apidocs/detail/{}/", doc_id), input).await
    }

    pub async fn delete_document(&self, doc_id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/apidocs/detail/{}/", doc_id)).await
    }
}
