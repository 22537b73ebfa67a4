//! Sign-in, sign-up and sign-out

use crate::error::ApiError;
use crate::models::{LoginInput, RegisterInput, TokenPair};
use crate::network::client::ApiClient;

impl ApiClient {
    /// Exchange credentials for a token pair and store it in the auth context
    pub async fn login(&self, input: &LoginInput) -> Result<(), ApiError> {
        let tokens: TokenPair = self.post_anonymous("/authentication/token/", input).await?;
        self.auth().set_tokens(tokens.access, tokens.refresh);
        tracing::info!(username = %input.username, "Signed in");
        Ok(())
    }

    pub async fn register(&self, input: &RegisterInput) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post_anonymous("/authentication/register/", input)
            .await?;
        tracing::info!(username = %input.username, "Account registered");
        Ok(())
    }

    pub fn logout(&self) {
        self.auth().clear();
        tracing::info!("Signed out");
    }
}
