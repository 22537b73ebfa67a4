//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        signed_in: bool,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(signed_in),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Startup loads were queued by AppState::new
        self.flush();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.state.apply_event(event) {
                        tracing::info!("Quit requested");
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.flush();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.flush();
                }
                else => break,
            }
        }
    }

    /// Forward queued commands, then publish the new render state
    fn flush(&mut self) {
        for cmd in self.state.drain_commands() {
            if self.network_tx.send(cmd).is_err() {
                tracing::error!("Network actor is gone, dropping command");
            }
        }
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}
