//! HTTP client wrapper - authenticated JSON requests with single-shot token refresh

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::models::AccessToken;

const REFRESH_PATH: &str = "/authentication/token/refresh/";

/// A fully resolved outgoing request
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Raw response: status plus undecoded body text
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations must not interpret the status code; refresh and error
/// mapping happen in [`ApiClient`].
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, ApiError>>;
}

/// Production transport backed by reqwest
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        ReqwestTransport {
            client: create_client(timeout),
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, ApiError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, &request.url)
                .header("Accept", "application/json");

            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let resp = builder.send().await?;
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| ApiError::Transport(format!("error reading body: {}", e)))?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Create an HTTP client with default configuration
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Authenticated client for the documentation server.
///
/// Every request carries the current access token. A 401 triggers exactly one
/// refresh cycle; if the refresh is rejected the credentials are cleared and
/// the call fails with [`ApiError::SessionExpired`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: AuthContext, timeout: Duration) -> Self {
        Self::with_transport(base_url, auth, Arc::new(ReqwestTransport::new(timeout)))
    }

    pub fn with_transport(
        base_url: impl Into<String>,
        auth: AuthContext,
        transport: Arc<dyn Transport>,
    ) -> Self {
        ApiClient {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a resource path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.execute(Method::GET, path, None).await?;
        decode(resp)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.execute(Method::POST, path, Some(to_value(body)?)).await?;
        decode(resp)
    }

    /// POST whose response body is not needed
    pub async fn post_discard<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let resp = self.execute(Method::POST, path, Some(to_value(body)?)).await?;
        check(resp).map(|_| ())
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.execute(Method::PUT, path, Some(to_value(body)?)).await?;
        decode(resp)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.execute(Method::DELETE, path, None).await?;
        check(resp).map(|_| ())
    }

    /// Unauthenticated POST without refresh handling (login, register)
    pub async fn post_anonymous<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .send(Method::POST, path, Some(to_value(body)?), None)
            .await?;
        decode(resp)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, ApiError> {
        let resp = self
            .send(method.clone(), path, body.clone(), self.auth.access_token())
            .await?;
        if resp.status != 401 {
            return Ok(resp);
        }

        let Some(refresh) = self.auth.refresh_token() else {
            return Ok(resp);
        };

        tracing::info!(path, "Access token rejected, refreshing");
        let access = match self.refresh_access(refresh).await {
            Ok(access) => access,
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, clearing credentials");
                self.auth.clear();
                return Err(ApiError::SessionExpired);
            }
        };
        self.auth.set_access_token(access.clone());

        // Retried once; a second 401 is returned to the caller as-is
        self.send(method, path, body, Some(access)).await
    }

    async fn refresh_access(&self, refresh: String) -> Result<String, ApiError> {
        let body = serde_json::json!({ "refresh": refresh });
        let resp = self.send(Method::POST, REFRESH_PATH, Some(body), None).await?;
        let token: AccessToken = decode(resp)?;
        Ok(token.access)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            url: self.url(path),
            bearer,
            body,
        };
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        let resp = self.transport.send(request).await?;
        tracing::debug!(status = resp.status, "Response received");
        Ok(resp)
    }
}

fn to_value<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn check(resp: HttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(ApiError::Status {
            status: resp.status,
            body: resp.body,
        })
    }
}

fn decode<T: DeserializeOwned>(resp: HttpResponse) -> Result<T, ApiError> {
    let resp = check(resp)?;
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::testing::ScriptedTransport;
    use serde_json::json;

    fn signed_in() -> AuthContext {
        let auth = AuthContext::new();
        auth.set_tokens("old-access", "refresh-1");
        auth
    }

    fn client(transport: &Arc<ScriptedTransport>, auth: AuthContext) -> ApiClient {
        ApiClient::with_transport("http://docs.test/api/", auth, transport.clone())
    }

    #[test]
    fn test_url_join_normalizes_slashes() {
        let transport = Arc::new(ScriptedTransport::new());
        let c = client(&transport, AuthContext::new());
        assert_eq!(c.url("/project/"), "http://docs.test/api/project/");
        assert_eq!(c.url("project/3/"), "http://docs.test/api/project/3/");
    }

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let transport = Arc::new(ScriptedTransport::new().reply(200, json!({"ok": true})));
        let c = client(&transport, signed_in());

        let value: Value = c.get("/project/1/").await.unwrap();
        assert_eq!(value["ok"], true);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some("old-access"));
        assert_eq!(sent[0].method, Method::GET);
    }

    #[tokio::test]
    async fn test_refresh_then_retry_once_with_new_token() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(401, json!({"detail": "expired"}))
                .reply(200, json!({"access": "new-access"}))
                .reply(200, json!({"id": 1})),
        );
        let auth = signed_in();
        let c = client(&transport, auth.clone());

        let value: Value = c.get("/project/1/").await.unwrap();
        assert_eq!(value["id"], 1);

        let sent = transport.requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].url, "http://docs.test/api/authentication/token/refresh/");
        assert_eq!(sent[1].body, Some(json!({"refresh": "refresh-1"})));
        assert_eq!(sent[1].bearer, None);
        assert_eq!(sent[2].url, sent[0].url);
        assert_eq!(sent[2].bearer.as_deref(), Some("new-access"));
        assert_eq!(auth.access_token().as_deref(), Some("new-access"));
        assert_eq!(auth.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_credentials() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(401, json!({"detail": "expired"}))
                .reply(401, json!({"detail": "refresh invalid"})),
        );
        let auth = signed_in();
        let c = client(&transport, auth.clone());

        let err = c.get::<Value>("/project/").await.unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert!(!auth.is_signed_in());
        assert_eq!(auth.refresh_token(), None);
        // original + refresh, nothing re-issued
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_second_unauthorized_is_not_refreshed_again() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(401, json!({}))
                .reply(200, json!({"access": "new-access"}))
                .reply(401, json!({"detail": "still no"})),
        );
        let c = client(&transport, signed_in());

        let err = c.delete("/apidocs/detail/4/").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_unauthorized_without_refresh_token_is_plain_error() {
        let transport = Arc::new(ScriptedTransport::new().reply(401, json!({})));
        let c = client(&transport, AuthContext::new());

        let err = c.get::<Value>("/project/").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_post_skips_token_and_refresh() {
        let transport = Arc::new(ScriptedTransport::new().reply(401, json!({"detail": "bad"})));
        let auth = signed_in();
        let c = client(&transport, auth.clone());

        let err = c
            .post_anonymous::<Value, _>("/authentication/token/", &json!({"username": "u"}))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer, None);
        assert!(auth.is_signed_in());
    }

    #[tokio::test]
    async fn test_error_status_and_decode_failures() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(404, json!({"detail": "Not found."}))
                .reply_text(200, "not json"),
        );
        let c = client(&transport, signed_in());

        let err = c.get::<Value>("/project/9/").await.unwrap_err();
        assert!(err.is_not_found());
        let err = c.get::<Value>("/project/9/").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
