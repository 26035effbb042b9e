use crate::utils::error::AppError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Chain family. Closed set; anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Trc20,
    Erc20,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Trc20 => write!(f, "trc20"),
            Protocol::Erc20 => write!(f, "erc20"),
        }
    }
}

impl FromStr for Protocol {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trc20" => Ok(Protocol::Trc20),
            "erc20" => Ok(Protocol::Erc20),
            other => Err(AppError::ParseError(format!(
                "unknown protocol: {}",
                other
            ))),
        }
    }
}

/// A deployed token contract the scanner can track. Built once at
/// startup, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    /// Chain-native encoded address (Base58 for TRON, 0x-hex for EVM).
    pub address: String,
    /// "production" or "test".
    pub kind: String,
    /// Token symbol, e.g. "USDT".
    pub token: String,
    /// Decimal places dividing raw units into human amounts.
    pub precision: u32,
}

impl Contract {
    /// Human-readable amount for a raw integer value.
    pub fn scale(&self, raw_value: i64) -> f64 {
        raw_value as f64 / 10f64.powi(self.precision as i32)
    }
}

/// Read-only (protocol, symbol) -> Contract table. Lookups after
/// construction require no locking.
pub struct ContractResolver {
    contracts: HashMap<(Protocol, String), Contract>,
}

impl ContractResolver {
    pub fn new() -> Self {
        let supported = [
            (
                Protocol::Trc20,
                Contract {
                    address: "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string(),
                    kind: "production".to_string(),
                    token: "USDT".to_string(),
                    precision: 6,
                },
            ),
            (
                Protocol::Erc20,
                Contract {
                    address: "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(),
                    kind: "production".to_string(),
                    token: "USDT".to_string(),
                    precision: 6,
                },
            ),
        ];

        let mut contracts = HashMap::new();
        for (protocol, contract) in supported {
            contracts.insert((protocol, contract.token.clone()), contract);
        }
        ContractResolver { contracts }
    }

    /// Errors on unsupported pairs; "currency not configured" is a hard
    /// stop for the caller, never a silent default.
    pub fn get_contract(&self, protocol: Protocol, currency: &str) -> Result<&Contract, AppError> {
        self.contracts
            .get(&(protocol, currency.to_string()))
            .ok_or_else(|| {
                AppError::UnsupportedContract(format!("{}/{}", protocol, currency))
            })
    }
}

impl Default for ContractResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_round_trip() {
        assert_eq!("trc20".parse::<Protocol>().unwrap(), Protocol::Trc20);
        assert_eq!("erc20".parse::<Protocol>().unwrap(), Protocol::Erc20);
        assert!("btc".parse::<Protocol>().is_err());
        assert_eq!(Protocol::Trc20.to_string(), "trc20");
    }

    #[test]
    fn resolves_supported_pair() {
        let resolver = ContractResolver::new();
        let contract = resolver.get_contract(Protocol::Trc20, "USDT").unwrap();
        assert_eq!(contract.token, "USDT");
        assert_eq!(contract.precision, 6);
        assert!(contract.address.starts_with('T'));
    }

    #[test]
    fn unsupported_pair_is_an_error() {
        let resolver = ContractResolver::new();
        assert!(resolver.get_contract(Protocol::Trc20, "DOGE").is_err());
    }

    #[test]
    fn scaling_uses_contract_precision() {
        let resolver = ContractResolver::new();
        let contract = resolver.get_contract(Protocol::Trc20, "USDT").unwrap();
        assert_eq!(contract.scale(253_500_000), 253.5);
        assert_eq!(contract.scale(75_000_000), 75.0);
        assert_eq!(contract.scale(0), 0.0);
    }
}
