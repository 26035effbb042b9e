use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    pub api_url: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackerConfig {
    /// Chain family, "trc20" or "erc20".
    pub protocol: String,
    /// Symbol of the tracked token, e.g. "USDT".
    pub currency: String,
    /// Whether native-coin transfers (TransferContract) are scanned too.
    pub include_native: bool,
    pub start_block: u64,
}

#[derive(Debug, Deserialize)]
pub struct WatchConfig {
    /// Base58 addresses whose activity is of interest.
    pub addresses: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SchedulerConfig {
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub output: String,
    pub file_path: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub node: NodeConfig,
    pub tracker: TrackerConfig,
    pub watch: WatchConfig,
    pub scheduler: SchedulerConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
    }
}
