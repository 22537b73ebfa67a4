//! Outgoing request bookkeeping for the App layer
//!
//! Hands out request ids and scopes, remembers which ids are still wanted and
//! buffers commands until the actor forwards them to the network layer.

use std::collections::HashMap;

use crate::messages::network::{ApiOp, RequestId, Scope};
use crate::messages::NetworkCommand;

#[derive(Debug)]
pub struct Dispatcher {
    next_id: RequestId,
    next_scope: u64,
    pending: HashMap<RequestId, Scope>,
    outbox: Vec<NetworkCommand>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            next_id: 1,
            next_scope: 1,
            pending: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    /// Allocate a fresh scope for a screen's requests
    pub fn new_scope(&mut self) -> Scope {
        let scope = Scope(self.next_scope);
        self.next_scope += 1;
        scope
    }

    pub fn send(&mut self, scope: Scope, op: ApiOp) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, scope = scope.0, op = op.name(), "Queueing request");
        self.pending.insert(id, scope);
        self.outbox.push(NetworkCommand::Execute { id, scope, op });
        id
    }

    /// Abort a scope's requests and forget their ids
    pub fn cancel(&mut self, scope: Scope) {
        self.pending.retain(|_, s| *s != scope);
        self.outbox.push(NetworkCommand::CancelScope(scope));
    }

    pub fn push(&mut self, cmd: NetworkCommand) {
        self.outbox.push(cmd);
    }

    /// Claim a response id. Returns false for stale or unknown ids.
    pub fn accept(&mut self, id: RequestId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn drain(&mut self) -> Vec<NetworkCommand> {
        std::mem::take(&mut self.outbox)
    }

    #[cfg(test)]
    pub fn queued_ops(&self) -> Vec<&ApiOp> {
        self.outbox
            .iter()
            .filter_map(|cmd| match cmd {
                NetworkCommand::Execute { op, .. } => Some(op),
                _ => None,
            })
            .collect()
    }
}
