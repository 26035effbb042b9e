use crate::scanner::contracts::Protocol;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeKind {
    Transfer,
    Approve,
    TransferFrom,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Transfer => write!(f, "transfer"),
            TradeKind::Approve => write!(f, "approve"),
            TradeKind::TransferFrom => write!(f, "transferFrom"),
        }
    }
}

/// One decoded, accepted transaction. Constructed once per match and
/// handed off to whatever persists it.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    /// Chain transaction hash.
    pub id: String,
    pub protocol: Protocol,
    pub from: String,
    pub to: String,
    /// Already scaled by the contract's precision.
    pub amount: f64,
    pub token: String,
    /// Unix seconds.
    pub time: i64,
    pub block_number: u64,
    /// Native-coin units.
    pub fee: f64,
    pub kind: TradeKind,
}

/// Notification-shaped projection of a matched transaction; batched
/// per block for the notifier.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    pub tx_id: String,
    pub token: String,
    pub kind: TradeKind,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub fee: f64,
    pub time: i64,
    pub block_number: u64,
}

impl From<&Trade> for TransactionDetail {
    fn from(trade: &Trade) -> Self {
        TransactionDetail {
            tx_id: trade.id.clone(),
            token: trade.token.clone(),
            kind: trade.kind,
            from: trade.from.clone(),
            to: trade.to.clone(),
            amount: trade.amount,
            fee: trade.fee,
            time: trade.time,
            block_number: trade.block_number,
        }
    }
}
