use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tronwatch::node::client::HttpNodeClient;
use tronwatch::node::health::ConnectionHealth;
use tronwatch::node::BlockFetcher;
use tronwatch::scanner::abi::AbiDecoder;
use tronwatch::scanner::concern::{LogNotifier, WatchListConcern};
use tronwatch::scanner::contracts::{ContractResolver, Protocol};
use tronwatch::scanner::parser::TradeParser;
use tronwatch::utils::{config::AppConfig, log::Logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::new()?;
    let _log_guard = Logger::init(&config.log)?;

    info!("Starting trade scanner...");

    let protocol = Protocol::from_str(&config.tracker.protocol)?;
    let resolver = ContractResolver::new();
    let contract = resolver
        .get_contract(protocol, &config.tracker.currency)?
        .clone();
    info!(
        %protocol,
        token = %contract.token,
        address = %contract.address,
        "Tracking contract"
    );

    let node: Arc<HttpNodeClient> = Arc::new(HttpNodeClient::new(&config.node.api_url)?);
    let health = ConnectionHealth::spawn(node.clone());
    let fetcher = BlockFetcher::new(node, health);

    let concern = Arc::new(WatchListConcern::new(config.watch.addresses.clone()));
    let notifier = Arc::new(LogNotifier);

    let parser = TradeParser::new(
        fetcher,
        AbiDecoder::new(),
        protocol,
        contract,
        config.tracker.include_native,
        concern,
        notifier,
    );

    let interval = tokio::time::Duration::from_secs(config.scheduler.interval_seconds);
    let mut current_block = config.tracker.start_block;
    loop {
        match parser.parse(current_block).await {
            Ok(outcome) => {
                if !outcome.trades.is_empty() {
                    info!(
                        block = current_block,
                        trades = outcome.trades.len(),
                        "Block produced trades"
                    );
                    for trade in &outcome.trades {
                        info!("{}", serde_json::to_string(trade).unwrap_or_default());
                    }
                }
                for failure in &outcome.failures {
                    warn!(
                        block = current_block,
                        tx_id = %failure.tx_id,
                        "Transaction skipped with error: {}",
                        failure.error
                    );
                }
                current_block += 1;
            }
            Err(e) => {
                // The block stays current; re-parsing the same block is safe.
                error!(block = current_block, "Block scan failed: {}", e);
            }
        }
        tokio::time::sleep(interval).await;
    }
}
