//! Network actor - runs test calls and credit refreshes in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_test, fetch_credits};

/// Network actor that executes commands as detached tasks.
///
/// In-flight calls are never aborted; the app actor discards results it no
/// longer wants.
pub struct NetworkActor {
    client: reqwest::Client,
    base_url: Option<String>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, config: &Config) -> Self {
        NetworkActor {
            client: create_client(config.request_timeout),
            base_url: config.api_base_url.clone(),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteTest { id, epoch, request }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %request.url, method = request.method.as_str(), "Executing test call");
                                let result = execute_test(&client, request, id, epoch).await;
                                tracing::info!(id, "Test call completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::RefreshCredits { epoch, credentials }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.active_requests.spawn(async move {
                                let result = fetch_credits(&client, base_url.as_deref(), &credentials, epoch).await;
                                if let NetworkResponse::CreditsFailed { message, .. } = &result {
                                    tracing::warn!(epoch, %message, "Credit refresh failed");
                                }
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - results were already sent by the task
                }
            }
        }
    }
}
