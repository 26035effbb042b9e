use crate::scanner::contracts::Protocol;
use crate::scanner::trade::TransactionDetail;
use crate::utils::error::AppError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::info;

/// External predicate deciding whether a decoded transaction is
/// relevant. The optional payload travels with the match for the
/// consumer's own use; the scanner never inspects it.
#[async_trait]
pub trait Concern: Send + Sync {
    async fn filter_concerned_accounts(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<(bool, Option<Value>), AppError>;
}

/// Best-effort delivery of a block's matched transactions.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        protocol: Protocol,
        details: &[TransactionDetail],
    ) -> Result<(), AppError>;
}

/// Concern backed by a fixed address watch list.
pub struct WatchListConcern {
    addresses: HashSet<String>,
}

impl WatchListConcern {
    pub fn new(addresses: impl IntoIterator<Item = String>) -> Self {
        WatchListConcern {
            addresses: addresses.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Concern for WatchListConcern {
    async fn filter_concerned_accounts(
        &self,
        from: &str,
        to: &str,
        _amount: f64,
    ) -> Result<(bool, Option<Value>), AppError> {
        let from_watched = self.addresses.contains(from);
        let to_watched = self.addresses.contains(to);
        if from_watched || to_watched {
            Ok((
                true,
                Some(json!({
                    "from_watched": from_watched,
                    "to_watched": to_watched,
                })),
            ))
        } else {
            Ok((false, None))
        }
    }
}

/// Notifier that writes matches to the log stream.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        protocol: Protocol,
        details: &[TransactionDetail],
    ) -> Result<(), AppError> {
        for detail in details {
            info!(
                protocol = %protocol,
                tx_id = %detail.tx_id,
                kind = %detail.kind,
                from = %detail.from,
                to = %detail.to,
                amount = detail.amount,
                "Matched transaction"
            );
        }
        Ok(())
    }
}
