//! Per-block transaction classification.
//!
//! `TradeParser::parse` walks one block's transactions in on-chain
//! order, decodes token calls against the tracked contract, runs the
//! concern filter, and batches matched details for the notifier.
//! Per-transaction decode and filter failures are aggregated and never
//! stop the rest of the block.

use crate::node::BlockFetcher;
use crate::node::types::{CONTRACT_TYPE_TRANSFER, CONTRACT_TYPE_TRIGGER_SMART, Transaction};
use crate::scanner::abi::{AbiDecoder, MethodKind};
use crate::scanner::concern::{Concern, Notifier};
use crate::scanner::contracts::{Contract, Protocol};
use crate::scanner::trade::{Trade, TradeKind, TransactionDetail};
use crate::utils::error::AppError;
use crate::utils::tron::hex_to_tron_address;
use std::sync::Arc;
use tracing::{debug, warn};

/// Native-coin symbol and precision for TransferContract entries.
const NATIVE_TOKEN: &str = "TRX";
const NATIVE_PRECISION: f64 = 1_000_000.0;

/// One transaction the block could not be fully processed for.
#[derive(Debug)]
pub struct TxFailure {
    pub tx_id: String,
    pub error: AppError,
}

/// Result of one `parse` call. A non-empty `failures` list does not
/// invalidate the trades decoded from the block's other transactions.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub trades: Vec<Trade>,
    pub failures: Vec<TxFailure>,
}

/// Decoded fields of a candidate trade, before filtering.
struct Candidate {
    kind: TradeKind,
    from: String,
    to: String,
    amount: f64,
    token: String,
}

pub struct TradeParser {
    fetcher: BlockFetcher,
    abi: AbiDecoder,
    protocol: Protocol,
    contract: Contract,
    include_native: bool,
    concern: Arc<dyn Concern>,
    notifier: Arc<dyn Notifier>,
}

impl TradeParser {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fetcher: BlockFetcher,
        abi: AbiDecoder,
        protocol: Protocol,
        contract: Contract,
        include_native: bool,
        concern: Arc<dyn Concern>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        TradeParser {
            fetcher,
            abi,
            protocol,
            contract,
            include_native,
            concern,
            notifier,
        }
    }

    /// Scan one confirmed block. Holds no state across calls; the same
    /// block number can be re-parsed safely.
    pub async fn parse(&self, block_number: u64) -> Result<ParseOutcome, AppError> {
        let block = self.fetcher.get_block(block_number).await?;
        debug!(
            block_number,
            tx_count = block.transactions.len(),
            "Scanning block"
        );

        let mut outcome = ParseOutcome::default();
        let mut details: Vec<TransactionDetail> = Vec::new();

        for tx in &block.transactions {
            let candidate = match self.classify(tx) {
                Ok(Some(c)) => c,
                Ok(None) => continue,
                Err(error) => {
                    outcome.failures.push(TxFailure {
                        tx_id: tx.tx_id.clone(),
                        error,
                    });
                    continue;
                }
            };

            let matched = match self
                .concern
                .filter_concerned_accounts(&candidate.from, &candidate.to, candidate.amount)
                .await
            {
                Ok((matched, _data)) => matched,
                Err(error) => {
                    outcome.failures.push(TxFailure {
                        tx_id: tx.tx_id.clone(),
                        error,
                    });
                    continue;
                }
            };
            if !matched {
                continue;
            }

            let (fee, time) = match self.fetcher.get_transaction_info(&tx.tx_id).await {
                Ok(info) => info,
                Err(error) => {
                    outcome.failures.push(TxFailure {
                        tx_id: tx.tx_id.clone(),
                        error,
                    });
                    continue;
                }
            };

            let trade = Trade {
                id: tx.tx_id.clone(),
                protocol: self.protocol,
                from: candidate.from,
                to: candidate.to,
                amount: candidate.amount,
                token: candidate.token,
                time,
                block_number,
                fee,
                kind: candidate.kind,
            };
            details.push(TransactionDetail::from(&trade));
            outcome.trades.push(trade);
        }

        if !details.is_empty() {
            // Best effort: a failed notification never fails the parse.
            if let Err(e) = self.notifier.notify(self.protocol, &details).await {
                warn!(block_number, "Notify failed: {}", e);
            }
        }

        Ok(outcome)
    }

    /// Classify one transaction. `Ok(None)` means irrelevant traffic:
    /// wrong contract, unknown method, failed execution, or an
    /// instruction kind the scanner does not handle.
    fn classify(&self, tx: &Transaction) -> Result<Option<Candidate>, AppError> {
        let instruction = match tx.first_instruction() {
            Some(i) => i,
            None => return Ok(None),
        };
        if !tx.executed_successfully() {
            return Ok(None);
        }
        let value = &instruction.parameter.value;

        match instruction.contract_type.as_str() {
            CONTRACT_TYPE_TRIGGER_SMART => {
                // Not the token we track: skip, even when the target
                // address fails to decode.
                let target = match hex_to_tron_address(&value.contract_address) {
                    Ok(addr) => addr,
                    Err(_) => return Ok(None),
                };
                if target != self.contract.address {
                    return Ok(None);
                }

                let (kind, to, raw_value) = match self.abi.method_type(&value.data) {
                    MethodKind::Transfer => {
                        let (to, v) = self.abi.unpack_transfer(&value.data)?;
                        (TradeKind::Transfer, to, v)
                    }
                    MethodKind::Approve => {
                        let (to, v) = self.abi.unpack_approve(&value.data)?;
                        (TradeKind::Approve, to, v)
                    }
                    MethodKind::TransferFrom => {
                        let (to, v) = self.abi.unpack_transfer_from(&value.data)?;
                        (TradeKind::TransferFrom, to, v)
                    }
                    MethodKind::Unknown => return Ok(None),
                };

                let from = hex_to_tron_address(&value.owner_address)?;
                Ok(Some(Candidate {
                    kind,
                    from,
                    to,
                    amount: self.contract.scale(raw_value),
                    token: self.contract.token.clone(),
                }))
            }
            CONTRACT_TYPE_TRANSFER => {
                if !self.include_native {
                    return Ok(None);
                }
                let from = hex_to_tron_address(&value.owner_address)?;
                let to = hex_to_tron_address(&value.to_address)?;
                Ok(Some(Candidate {
                    kind: TradeKind::Transfer,
                    from,
                    to,
                    amount: value.amount as f64 / NATIVE_PRECISION,
                    token: NATIVE_TOKEN.to_string(),
                }))
            }
            _ => Ok(None),
        }
    }
}
