use crate::node::types::{Block, TransactionInfo};
use crate::utils::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::RwLock;

/// Access to a TRON full node. The wallet endpoints used here are the
/// node's HTTP/JSON form of its public Wallet service (GetBlockByNum,
/// GetTransactionInfoByID).
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn get_block_by_num(&self, block_num: u64) -> Result<Block, AppError>;
    async fn get_transaction_info_by_id(&self, tx_id: &str) -> Result<TransactionInfo, AppError>;
    /// Tear down and rebuild the underlying connection.
    async fn reconnect(&self) -> Result<(), AppError>;
}

pub struct HttpNodeClient {
    api_url: String,
    client: RwLock<Client>,
}

impl HttpNodeClient {
    pub fn new(api_url: &str) -> Result<Self, AppError> {
        let api_url = api_url.trim_end_matches('/').to_string();
        Ok(HttpNodeClient {
            api_url,
            client: RwLock::new(Self::build_client()?),
        })
    }

    fn build_client() -> Result<Client, AppError> {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::NetworkError(e.to_string()))
    }

    async fn make_http_request(&self, method: &str, params: Value) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.api_url, method);
        let client = self.client.read().await.clone();
        let response = client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(AppError::ApiError(format!(
                "HTTP error: {}, body: {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| AppError::JsonParseError(e.to_string()))
    }
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn get_block_by_num(&self, block_num: u64) -> Result<Block, AppError> {
        let result = self
            .make_http_request("wallet/getblockbynum", json!({ "num": block_num }))
            .await?;
        serde_json::from_value(result).map_err(|e| {
            AppError::JsonParseError(format!("Failed to parse block {}: {}", block_num, e))
        })
    }

    async fn get_transaction_info_by_id(&self, tx_id: &str) -> Result<TransactionInfo, AppError> {
        let result = self
            .make_http_request("wallet/gettransactioninfobyid", json!({ "value": tx_id }))
            .await?;
        serde_json::from_value(result).map_err(|e| {
            AppError::JsonParseError(format!("Failed to parse tx info {}: {}", tx_id, e))
        })
    }

    async fn reconnect(&self) -> Result<(), AppError> {
        let fresh = Self::build_client()?;
        *self.client.write().await = fresh;
        Ok(())
    }
}
