pub mod client;
pub mod health;
pub mod types;

use crate::node::client::NodeClient;
use crate::node::health::ConnectionHealth;
use crate::node::types::Block;
use crate::utils::error::AppError;
use std::sync::Arc;

/// Fee precision of the native coin (sun per TRX).
const NATIVE_FEE_PRECISION: f64 = 1_000_000.0;

/// Thin wrapper over the node client. Every RPC failure is reported to
/// the connection-health task before the original error is surfaced;
/// the caller decides whether to abort the block.
pub struct BlockFetcher {
    client: Arc<dyn NodeClient>,
    health: ConnectionHealth,
}

impl BlockFetcher {
    pub fn new(client: Arc<dyn NodeClient>, health: ConnectionHealth) -> Self {
        BlockFetcher { client, health }
    }

    pub async fn get_block(&self, block_num: u64) -> Result<Block, AppError> {
        match self.client.get_block_by_num(block_num).await {
            Ok(block) => Ok(block),
            Err(e) => {
                self.health.report_failure();
                Err(e)
            }
        }
    }

    /// Fee (native-coin units) and unix time (seconds) of a confirmed
    /// transaction.
    pub async fn get_transaction_info(&self, tx_id: &str) -> Result<(f64, i64), AppError> {
        match self.client.get_transaction_info_by_id(tx_id).await {
            Ok(info) => {
                let fee = info.fee as f64 / NATIVE_FEE_PRECISION;
                let timestamp = info.block_time_stamp / 1000;
                Ok((fee, timestamp))
            }
            Err(e) => {
                self.health.report_failure();
                Err(e)
            }
        }
    }
}
