use crate::node::client::NodeClient;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns reconnect attempts for the node connection so the scan path
/// never blocks on connection lifecycle work.
///
/// Failure reports go through a bounded channel; while a reconnect is
/// already pending, further reports are coalesced by dropping them.
#[derive(Clone)]
pub struct ConnectionHealth {
    tx: mpsc::Sender<()>,
}

impl ConnectionHealth {
    pub fn spawn(client: Arc<dyn NodeClient>) -> Self {
        let (tx, mut rx) = mpsc::channel::<()>(1);
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                match client.reconnect().await {
                    Ok(()) => info!("Node client reconnected"),
                    Err(e) => warn!("Node client reconnect failed: {}", e),
                }
            }
        });
        ConnectionHealth { tx }
    }

    /// Non-blocking; safe to call from inside the scan loop.
    pub fn report_failure(&self) {
        let _ = self.tx.try_send(());
    }
}
