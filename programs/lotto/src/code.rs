//! Ticket codes are `u64`s. Clients write them in hex ("0" to "F" for a
//! sixteen-code lottery) and the draw compares them as 8-byte big-endian arrays.

use anchor_lang::prelude::*;

use crate::constants::MAX_HEX_CODE_DIGITS;
use crate::error::LottoError;

/// Parses `"f"`, `"0F"` or `"0x0f"` into a code.
pub fn parse_hex_code(hex: &str) -> Result<u64> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);

    require!(
        !digits.is_empty() && digits.len() <= MAX_HEX_CODE_DIGITS,
        LottoError::InvalidCode
    );

    u64::from_str_radix(digits, 16).map_err(|_| error!(LottoError::InvalidCode))
}

pub fn format_hex_code(code: u64) -> String {
    format!("{:X}", code)
}

pub fn code_to_bytes(code: u64) -> [u8; 8] {
    code.to_be_bytes()
}

pub fn code_from_bytes(bytes: [u8; 8]) -> u64 {
    u64::from_be_bytes(bytes)
}
