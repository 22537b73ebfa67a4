//! Request and response body endpoints

use crate::error::ApiError;
use crate::models::{
    BodyDetail, BodyInput, BodyKind, Id, RequestBody, RequestBodyInput, ResponseBody,
    ResponseBodyInput,
};
use crate::network::client::ApiClient;

impl ApiClient {
    pub async fn create_request_body(
        &self,
        doc_id: Id,
        input: &RequestBodyInput,
    ) -> Result<RequestBody, ApiError> {
        self.post(&format!("/apidocs/requests/{}/", doc_id), input).await
    }

    pub async fn get_request_body(&self, body_id: Id) -> Result<RequestBody, ApiError> {
        self.get(&format!("/apidocs/request/{}/", body_id)).await
    }

    pub async fn update_request_body(
        &self,
        body_id: Id,
        input: &RequestBodyInput,
    ) -> Result<RequestBody, ApiError> {
        self.put(&format!("/apidocs/request/{}/", body_id), input).await
    }

    pub async fn delete_request_body(&self, body_id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/apidocs/request/{}/", body_id)).await
    }

    pub async fn create_response_body(
        &self,
        doc_id: Id,
        input: &ResponseBodyInput,
    ) -> Result<ResponseBody, ApiError> {
        self.post(&format!("/apidocs/responses/{}/", doc_id), input).await
    }

    pub async fn get_response_body(&self, body_id: Id) -> Result<ResponseBody, ApiError> {
        self.get(&format!("/apidocs/response/{}/", body_id)).await
    }

    pub async fn update_response_body(
        &self,
        body_id: Id,
        input: &ResponseBodyInput,
    ) -> Result<ResponseBody, ApiError> {
        self.put(&format!("/apidocs/response/{}/", body_id), input).await
    }

    pub async fn delete_response_body(&self, body_id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/apidocs/response/{}/", body_id)).await
    }

    // Kind-dispatching helpers used by the network actor

    pub async fn create_body(&self, doc_id: Id, input: &BodyInput) -> Result<BodyDetail, ApiError> {
        match input {
            BodyInput::Request(i) => self.create_request_body(doc_id, i).await.map(BodyDetail::Request),
            BodyInput::Response(i) => self.create_response_body(doc_id, i).await.map(BodyDetail::Response),
        }
    }

    pub async fn get_body(&self, kind: BodyKind, body_id: Id) -> Result<BodyDetail, ApiError> {
        match kind {
            BodyKind::Request => self.get_request_body(body_id).await.map(BodyDetail::Request),
            BodyKind::Response => self.get_response_body(body_id).await.map(BodyDetail::Response),
        }
    }

    pub async fn update_body(&self, body_id: Id, input: &BodyInput) -> Result<BodyDetail, ApiError> {
        match input {
            BodyInput::Request(i) => self.update_request_body(body_id, i).await.map(BodyDetail::Request),
            BodyInput::Response(i) => self.update_response_body(body_id, i).await.map(BodyDetail::Response),
        }
    }

    pub async fn delete_body(&self, kind: BodyKind, body_id: Id) -> Result<(), ApiError> {
        match kind {
            BodyKind::Request => self.delete_request_body(body_id).await,
            BodyKind::Response => self.delete_response_body(body_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use crate::api::tests::client_with;
    use crate::models::{BodyDetail, BodyInput, BodyKind, ResponseBodyInput};
    use crate::network::testing::ScriptedTransport;

    #[tokio::test]
    async fn test_update_response_body_round_trips_example() {
        let example = json!({"error": "not found", "nested": {"codes": [1, 2]}});
        let transport = Arc::new(ScriptedTransport::new().reply(
            200,
            json!({"id": 7, "description": "", "http_status": 404, "response_example": example}),
        ));
        let input = BodyInput::Response(ResponseBodyInput {
            description: String::new(),
            http_status: 404,
            response_example: example.clone(),
        });
        let detail = client_with(&transport).update_body(7, &input).await.unwrap();
        assert_eq!(detail.http_status(), Some(404));
        assert_eq!(detail.example(), &example);

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.url, "http://docs.test/api/apidocs/response/7/");
        assert_eq!(sent.body.as_ref().unwrap()["response_example"], example);
    }

    #[tokio::test]
    async fn test_get_body_routes_by_kind() {
        let transport = Arc::new(ScriptedTransport::new().reply(
            200,
            json!({"id": 2, "description": "login", "request_example": {"user": "a"}}),
        ));
        let detail = client_with(&transport)
            .get_body(BodyKind::Request, 2)
            .await
            .unwrap();
        assert!(matches!(detail, BodyDetail::Request(ref b) if b.description == "login"));
        assert_eq!(
            transport.requests()[0].url,
            "http://docs.test/api/apidocs/request/2/"
        );
    }
}
