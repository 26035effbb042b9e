use sha2::{Digest, Sha256};

use super::error::AppError;

/// TRON 主网地址前缀字节
pub const ADDRESS_PREFIX: u8 = 0x41;

/// 将十六进制形式的 TRON 地址转换为 Base58 地址（以 'T' 开头）
///
/// Accepts either the bare 20-byte body (40 hex chars) or the 21-byte
/// prefixed form (42 hex chars starting with "41").
pub fn hex_to_tron_address(hex_addr: &str) -> Result<String, AppError> {
    let body = if hex_addr.len() == 42 && hex_addr.starts_with("41") {
        &hex_addr[2..]
    } else {
        hex_addr
    };
    if body.len() != 40 {
        return Err(AppError::ParseError(
            "Invalid Tron address length".to_string(),
        ));
    }

    let mut decoded = vec![ADDRESS_PREFIX];
    decoded
        .extend_from_slice(&hex::decode(body).map_err(|e| AppError::ParseError(e.to_string()))?);

    base58check(decoded)
}

/// Extract the address from one 64-hex-char ABI argument field.
///
/// The address occupies the last 20 bytes of the field. Some callers
/// encode the 21-byte prefixed address instead; in that case the byte
/// in front of the body already holds `0x41` and is kept as is.
pub fn address_from_abi_field(field: &str) -> Result<String, AppError> {
    if !field.is_ascii() {
        return Err(AppError::ParseError(
            "ABI address field is not ASCII".to_string(),
        ));
    }
    if field.len() < 40 {
        return Err(AppError::ParseError(format!(
            "ABI address field too short: {} chars",
            field.len()
        )));
    }
    let body_start = field.len() - 40;
    if body_start >= 2 && &field[body_start - 2..body_start] == "41" {
        hex_to_tron_address(&field[body_start - 2..])
    } else {
        hex_to_tron_address(&field[body_start..])
    }
}

/// 计算双重 SHA256 校验和并进行 Base58 编码
fn base58check(mut payload: Vec<u8>) -> Result<String, AppError> {
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    let hash1 = hasher.finalize();

    let mut hasher = Sha256::new();
    hasher.update(hash1);
    let hash2 = hasher.finalize();

    // 取前4个字节作为校验和
    payload.extend_from_slice(&hash2[..4]);

    Ok(bs58::encode(payload).into_string())
}
