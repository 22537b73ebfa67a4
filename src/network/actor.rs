//! Network actor - runs API calls in the Tokio runtime

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};

use crate::api;
use crate::messages::network::{RequestId, Scope};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Tracks an active request for cancellation
struct ActiveRequest {
    scope: Scope,
    abort: AbortHandle,
}

/// Network actor that processes API commands
pub struct NetworkActor {
    client: Arc<ApiClient>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<RequestId>,
    in_flight: HashMap<RequestId, ActiveRequest>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: Arc::new(client),
            response_tx,
            active_requests: JoinSet::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, scope, op }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            let abort = self.active_requests.spawn(async move {
                                tracing::info!(id, op = op.name(), "Executing request");
                                let result = api::execute(&client, &op).await;
                                match &result {
                                    Ok(_) => tracing::info!(id, op = op.name(), "Request completed"),
                                    Err(e) => tracing::warn!(id, op = op.name(), error = %e, "Request failed"),
                                }
                                let _ = response_tx.send(NetworkResponse::Completed { id, scope, op, result });
                                id
                            });
                            self.in_flight.insert(id, ActiveRequest { scope, abort });
                        }

                        Some(NetworkCommand::CancelScope(scope)) => {
                            self.cancel_scope(scope);
                        }

                        Some(NetworkCommand::Logout) => {
                            self.client.logout();
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, active) in self.in_flight.drain() {
                                active.abort.abort();
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Ok(id) = result {
                        self.in_flight.remove(&id);
                    }
                }
            }
        }
    }

    fn cancel_scope(&mut self, scope: Scope) {
        let ids: Vec<RequestId> = self
            .in_flight
            .iter()
            .filter(|(_, active)| active.scope == scope)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            if let Some(active) = self.in_flight.remove(&id) {
                tracing::info!(id, scope = scope.0, "Cancelling request");
                active.abort.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;
    use crate::messages::network::{ApiOp, ApiPayload};
    use crate::network::testing::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_executes_and_reports_with_scope() {
        let transport = Arc::new(
            ScriptedTransport::new().reply(200, json!({"count": 0, "results": []})),
        );
        let client = ApiClient::with_transport("http://docs.test/api", AuthContext::new(), transport);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(client, resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::Execute {
                id: 7,
                scope: Scope(3),
                op: ApiOp::ListProjects,
            })
            .unwrap();

        let NetworkResponse::Completed { id, scope, op, result } = resp_rx.recv().await.unwrap();
        assert_eq!(id, 7);
        assert_eq!(scope, Scope(3));
        assert_eq!(op, ApiOp::ListProjects);
        assert_eq!(result.unwrap(), ApiPayload::Projects(Vec::new()));

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_clears_shared_credentials() {
        let auth = AuthContext::new();
        auth.set_tokens("a", "r");
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::with_transport("http://docs.test/api", auth.clone(), transport);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, _resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(client, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::Logout).unwrap();
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
        assert!(!auth.is_signed_in());
    }
}
