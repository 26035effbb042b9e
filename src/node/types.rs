//! Typed view of the node's wallet API responses.
//!
//! Only the fields the scanner actually reads are modeled; everything
//! else in the node's JSON is ignored during deserialization.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub block_header: BlockHeader,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub raw_data: BlockRawData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockRawData {
    #[serde(default)]
    pub number: u64,
    /// Milliseconds since the unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(rename = "txID")]
    pub tx_id: String,
    /// Execution results; the first entry's contractRet decides success.
    #[serde(default)]
    pub ret: Vec<TransactionRet>,
    #[serde(default)]
    pub raw_data: TransactionRawData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRet {
    #[serde(rename = "contractRet", default)]
    pub contract_ret: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRawData {
    #[serde(default)]
    pub contract: Vec<ContractInstruction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractInstruction {
    #[serde(rename = "type", default)]
    pub contract_type: String,
    #[serde(default)]
    pub parameter: ContractParameter,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractParameter {
    #[serde(default)]
    pub value: ContractValue,
}

/// Union of the instruction payload fields across the contract types
/// the scanner handles. TriggerSmartContract fills contract_address +
/// data; TransferContract fills to_address + amount.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractValue {
    #[serde(default)]
    pub owner_address: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInfo {
    /// Total fee in sun (10^-6 TRX).
    #[serde(default)]
    pub fee: i64,
    #[serde(rename = "blockTimeStamp", default)]
    pub block_time_stamp: i64,
}

impl Block {
    pub fn number(&self) -> u64 {
        self.block_header.raw_data.number
    }
}

impl Transaction {
    /// First on-chain instruction, if any. Transactions carry at most a
    /// handful of instructions and only the first one is classified.
    pub fn first_instruction(&self) -> Option<&ContractInstruction> {
        self.raw_data.contract.first()
    }

    pub fn executed_successfully(&self) -> bool {
        self.ret
            .first()
            .map(|r| r.contract_ret == "SUCCESS")
            .unwrap_or(false)
    }
}

pub const CONTRACT_TYPE_TRIGGER_SMART: &str = "TriggerSmartContract";
pub const CONTRACT_TYPE_TRANSFER: &str = "TransferContract";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_block_with_trigger_contract() {
        let raw = r#"{
            "block_header": {"raw_data": {"number": 51234567, "timestamp": 1700000000000}},
            "transactions": [{
                "txID": "deadbeef",
                "ret": [{"contractRet": "SUCCESS"}],
                "raw_data": {"contract": [{
                    "type": "TriggerSmartContract",
                    "parameter": {"value": {
                        "owner_address": "41111111111111111111111111111111111111111b",
                        "contract_address": "41a614f803b6fd780986a42c78ec9c7f77e6ded13c",
                        "data": "a9059cbb"
                    }}
                }]}
            }]
        }"#;
        let block: Block = serde_json::from_str(raw).unwrap();
        assert_eq!(block.number(), 51234567);
        let tx = &block.transactions[0];
        assert!(tx.executed_successfully());
        let inst = tx.first_instruction().unwrap();
        assert_eq!(inst.contract_type, CONTRACT_TYPE_TRIGGER_SMART);
        assert_eq!(inst.parameter.value.data, "a9059cbb");
    }

    #[test]
    fn missing_ret_is_not_success() {
        let raw = r#"{"txID": "00", "raw_data": {"contract": []}}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert!(!tx.executed_successfully());
        assert!(tx.first_instruction().is_none());
    }

    #[test]
    fn failed_ret_is_not_success() {
        let raw = r#"{"txID": "00", "ret": [{"contractRet": "REVERT"}]}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert!(!tx.executed_successfully());
    }
}
