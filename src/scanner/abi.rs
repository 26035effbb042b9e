//! TRC-20 call-data decoding.
//!
//! Call data is a hex string: 8 chars of method selector followed by
//! 64-char argument fields, each a 32-byte word padded left with
//! zeros. The layout is fixed by the TVM ABI convention; offsets below
//! are in hex characters (2 chars = 1 byte).

use crate::utils::error::AppError;
use crate::utils::tron::address_from_abi_field;
use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive};

const SELECTOR_LEN: usize = 8;
const FIELD_LEN: usize = 64;

const SELECTOR_TRANSFER: &str = "a9059cbb";
const SELECTOR_APPROVE: &str = "095ea7b3";
const SELECTOR_TRANSFER_FROM: &str = "23b872dd";

/// Raw-unit boundary approvals are clamped to when the on-chain value
/// does not fit in an i64. Kept for compatibility with downstream
/// consumers of approval amounts.
pub const APPROVE_OVERFLOW_CLAMP: i64 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Transfer,
    Approve,
    TransferFrom,
    /// Selector not in the table; the classifier skips these silently.
    Unknown,
}

/// Stateless decoder, constructed by the caller and handed to the
/// classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiDecoder;

impl AbiDecoder {
    pub fn new() -> Self {
        AbiDecoder
    }

    pub fn method_type(&self, calldata: &str) -> MethodKind {
        if !calldata.is_ascii() || calldata.len() < SELECTOR_LEN {
            return MethodKind::Unknown;
        }
        match &calldata[..SELECTOR_LEN] {
            SELECTOR_TRANSFER => MethodKind::Transfer,
            SELECTOR_APPROVE => MethodKind::Approve,
            SELECTOR_TRANSFER_FROM => MethodKind::TransferFrom,
            _ => MethodKind::Unknown,
        }
    }

    /// transfer(address,uint256): recipient and raw value.
    pub fn unpack_transfer(&self, calldata: &str) -> Result<(String, i64), AppError> {
        let args = strip_selector(calldata, SELECTOR_TRANSFER)?;
        let recipient = address_from_abi_field(field(args, 0)?)?;
        let value = parse_value(value_field(args, 1), false)?;
        Ok((recipient, value))
    }

    /// approve(address,uint256): spender and raw value. Out-of-range
    /// values clamp instead of failing.
    pub fn unpack_approve(&self, calldata: &str) -> Result<(String, i64), AppError> {
        let args = strip_selector(calldata, SELECTOR_APPROVE)?;
        let spender = address_from_abi_field(field(args, 0)?)?;
        let value = parse_value(value_field(args, 1), true)?;
        Ok((spender, value))
    }

    /// transferFrom(address,address,uint256): the recipient is the
    /// second address field, the value sits one field further out.
    pub fn unpack_transfer_from(&self, calldata: &str) -> Result<(String, i64), AppError> {
        let args = strip_selector(calldata, SELECTOR_TRANSFER_FROM)?;
        let recipient = address_from_abi_field(field(args, 1)?)?;
        let value = parse_value(value_field(args, 2), false)?;
        Ok((recipient, value))
    }
}

fn strip_selector<'a>(calldata: &'a str, selector: &str) -> Result<&'a str, AppError> {
    // Byte-offset slicing below relies on single-byte characters.
    if !calldata.is_ascii() {
        return Err(AppError::DecodeError(
            "call data is not an ASCII hex string".to_string(),
        ));
    }
    if calldata.len() < SELECTOR_LEN {
        return Err(AppError::DecodeError(format!(
            "call data too short for a method selector: {} chars",
            calldata.len()
        )));
    }
    if &calldata[..SELECTOR_LEN] != selector {
        return Err(AppError::DecodeError(format!(
            "method selector mismatch: expected {}, got {}",
            selector,
            &calldata[..SELECTOR_LEN]
        )));
    }
    Ok(&calldata[SELECTOR_LEN..])
}

/// Argument field at `index`; address fields must be present in full.
fn field(args: &str, index: usize) -> Result<&str, AppError> {
    let start = index * FIELD_LEN;
    let end = start + FIELD_LEN;
    if args.len() < end {
        return Err(AppError::DecodeError(format!(
            "call data truncated: argument {} needs {} chars, have {}",
            index,
            end,
            args.len()
        )));
    }
    Ok(&args[start..end])
}

/// Value field at `index`, tolerating truncation. Some chains strip
/// trailing zero bytes, so the field may be short or missing entirely.
fn value_field(args: &str, index: usize) -> &str {
    let start = (index * FIELD_LEN).min(args.len());
    let end = (start + FIELD_LEN).min(args.len());
    &args[start..end]
}

/// Parse a big-endian hex value field. Leading zeros are stripped; an
/// empty or all-zero field is a legal zero-value transfer.
fn parse_value(field: &str, clamp_on_overflow: bool) -> Result<i64, AppError> {
    let trimmed = field.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(0);
    }
    let big = BigInt::from_str_radix(trimmed, 16)
        .map_err(|e| AppError::DecodeError(format!("invalid value field {:?}: {}", field, e)))?;
    match big.to_i64() {
        Some(v) => Ok(v),
        None if clamp_on_overflow => Ok(APPROVE_OVERFLOW_CLAMP),
        None => Err(AppError::DecodeError(format!(
            "value out of range for i64: {}",
            big
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_253_5M: &str = "a9059cbb00000000000000000000000006f68705166a03d60f103703bed0d87a71571048000000000000000000000000000000000000000000000000000000000f1c1a60";
    const TRANSFER_PREFIXED_75M: &str = "a9059cbb00000000000000000000004179309abcff2cf531070ca9222a1f72c4a513687400000000000000000000000000000000000000000000000000000000047868c0";

    #[test]
    fn method_type_table() {
        let abi = AbiDecoder::new();
        assert_eq!(abi.method_type(TRANSFER_253_5M), MethodKind::Transfer);
        assert_eq!(abi.method_type("095ea7b3"), MethodKind::Approve);
        assert_eq!(abi.method_type("23b872dd"), MethodKind::TransferFrom);
        assert_eq!(abi.method_type("deadbeef"), MethodKind::Unknown);
        assert_eq!(abi.method_type("a9"), MethodKind::Unknown);
    }

    #[test]
    fn unpack_transfer_known_amount() {
        let abi = AbiDecoder::new();
        let (recipient, value) = abi.unpack_transfer(TRANSFER_253_5M).unwrap();
        assert_eq!(value, 253_500_000);
        assert!(recipient.starts_with('T'));
    }

    #[test]
    fn unpack_transfer_with_wire_prefix() {
        let abi = AbiDecoder::new();
        let (recipient, value) = abi.unpack_transfer(TRANSFER_PREFIXED_75M).unwrap();
        assert_eq!(value, 75_000_000);
        let direct =
            crate::utils::tron::hex_to_tron_address("79309abcff2cf531070ca9222a1f72c4a5136874")
                .unwrap();
        assert_eq!(recipient, direct);
    }

    #[test]
    fn truncated_at_address_field_is_zero_value() {
        let abi = AbiDecoder::new();
        let data = &TRANSFER_253_5M[..SELECTOR_LEN + FIELD_LEN];
        let (_, value) = abi.unpack_transfer(data).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn short_value_field_parses() {
        let abi = AbiDecoder::new();
        // value field truncated to "0f1c1a60" with padding stripped
        let data = format!("{}0f1c1a60", &TRANSFER_253_5M[..SELECTOR_LEN + FIELD_LEN]);
        let (_, value) = abi.unpack_transfer(&data).unwrap();
        assert_eq!(value, 253_500_000);
    }

    #[test]
    fn all_zero_value_field_is_zero() {
        let abi = AbiDecoder::new();
        let data = format!("{}{}", &TRANSFER_253_5M[..SELECTOR_LEN + FIELD_LEN], "0".repeat(64));
        let (_, value) = abi.unpack_transfer(&data).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn decoding_is_deterministic() {
        let abi = AbiDecoder::new();
        let a = abi.unpack_transfer(TRANSFER_253_5M).unwrap();
        let b = abi.unpack_transfer(TRANSFER_253_5M).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn transfer_overflow_is_an_error() {
        let abi = AbiDecoder::new();
        let data = format!(
            "{}{}",
            &TRANSFER_253_5M[..SELECTOR_LEN + FIELD_LEN],
            "f".repeat(64)
        );
        assert!(abi.unpack_transfer(&data).is_err());
    }

    #[test]
    fn approve_overflow_clamps() {
        let abi = AbiDecoder::new();
        let data = format!(
            "{}{}{}",
            SELECTOR_APPROVE,
            &TRANSFER_253_5M[SELECTOR_LEN..SELECTOR_LEN + FIELD_LEN],
            "f".repeat(64)
        );
        let (_, value) = abi.unpack_approve(&data).unwrap();
        assert_eq!(value, APPROVE_OVERFLOW_CLAMP);
    }

    #[test]
    fn approve_in_range_is_exact() {
        let abi = AbiDecoder::new();
        let data = format!(
            "{}{}{}",
            SELECTOR_APPROVE,
            &TRANSFER_253_5M[SELECTOR_LEN..SELECTOR_LEN + FIELD_LEN],
            &TRANSFER_253_5M[SELECTOR_LEN + FIELD_LEN..]
        );
        let (_, value) = abi.unpack_approve(&data).unwrap();
        assert_eq!(value, 253_500_000);
    }

    #[test]
    fn transfer_from_value_offset_shifts() {
        let abi = AbiDecoder::new();
        let from_field = "0".repeat(24) + "1111111111111111111111111111111111111111";
        let to_field = &TRANSFER_253_5M[SELECTOR_LEN..SELECTOR_LEN + FIELD_LEN];
        let value_field = &TRANSFER_253_5M[SELECTOR_LEN + FIELD_LEN..];
        let data = format!("{}{}{}{}", SELECTOR_TRANSFER_FROM, from_field, to_field, value_field);
        let (recipient, value) = abi.unpack_transfer_from(&data).unwrap();
        assert_eq!(value, 253_500_000);
        let expected =
            crate::utils::tron::hex_to_tron_address("06f68705166a03d60f103703bed0d87a71571048")
                .unwrap();
        assert_eq!(recipient, expected);
    }

    #[test]
    fn selector_mismatch_is_an_error() {
        let abi = AbiDecoder::new();
        assert!(abi.unpack_approve(TRANSFER_253_5M).is_err());
        assert!(abi.unpack_transfer("095ea7b3").is_err());
    }

    #[test]
    fn malformed_hex_is_an_error() {
        let abi = AbiDecoder::new();
        let data = format!("{}{}", SELECTOR_TRANSFER, "zz".repeat(32));
        assert!(abi.unpack_transfer(&data).is_err());
    }
}
