//! Project endpoints

use crate::error::ApiError;
use crate::models::{Id, Paginated, Project, ProjectInput};
use crate::network::client::ApiClient;

impl ApiClient {
    /// First page of the caller's projects
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let page: Paginated<Project> = self.get("/project/").await?;
        Ok(page.results)
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        self.post("/project/", input).await
    }

    pub async fn get_project(&self, project_id: Id) -> Result<Project, ApiError> {
        self.get(&format!("/project/{}/", project_id)).await
    }

    pub async fn update_project(
        &self,
        project_id: Id,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        self.put(&format!("/project/{}/", project_id), input).await
    }

    pub async fn delete_project(&self, project_id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/project/{}/", project_id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use crate::api::tests::client_with;
    use crate::models::ProjectInput;
    use crate::network::testing::ScriptedTransport;

    #[tokio::test]
    async fn test_list_projects_unwraps_results() {
        let transport = Arc::new(ScriptedTransport::new().reply(
            200,
            json!({"count": 2, "results": [
                {"id": 1, "name": "alpha", "created_by": {"username": "kim"}},
                {"id": 2, "name": "beta"}
            ]}),
        ));
        let projects = client_with(&transport).list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].created_by.as_ref().unwrap().username, "kim");
        assert_eq!(transport.requests()[0].url, "http://docs.test/api/project/");
    }

    #[tokio::test]
    async fn test_update_project_puts_full_input() {
        let transport = Arc::new(
            ScriptedTransport::new().reply(200, json!({"id": 5, "name": "renamed"})),
        );
        let input = ProjectInput {
            name: "renamed".into(),
            ..ProjectInput::default()
        };
        let project = client_with(&transport).update_project(5, &input).await.unwrap();
        assert_eq!(project.name, "renamed");

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.url, "http://docs.test/api/project/5/");
        assert_eq!(sent.body.as_ref().unwrap()["base_api_url"], "");
    }
}
