//! Front page description endpoints

use crate::error::ApiError;
use crate::models::{FrontPage, Id};
use crate::network::client::ApiClient;

impl ApiClient {
    pub async fn list_pages(&self, project_id: Id) -> Result<Vec<FrontPage>, ApiError> {
        self.get(&format!("/frontpages/{}/", project_id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::tests::client_with;
    use crate::network::testing::ScriptedTransport;

    #[tokio::test]
    async fn test_list_pages_is_project_scoped() {
        let transport = Arc::new(ScriptedTransport::new().reply(
            200,
            json!([
                {"id": 1, "url": "/login", "implemented": true},
                {"id": 2, "url": "/signup"}
            ]),
        ));
        let client = client_with(&transport);

        let pages = client.list_pages(2).await.unwrap();
        assert!(pages[0].implemented);
        assert!(!pages[1].implemented);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://docs.test/api/frontpages/2/");
    }
}
