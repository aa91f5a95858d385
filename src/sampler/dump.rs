//! Load raw buffers from text dumps.
//!
//! A dump is a list of addresses separated by whitespace or commas, written
//! in decimal or `0x`-prefixed hex. Everything after `#` on a line is a
//! comment. Line breaks carry no meaning; only the sentinel `0` ends a
//! backtrace.

use super::Address;
use crate::utils::error::SamplerError;
use log::debug;
use std::fs;
use std::path::Path;

/// Parse a dump held in memory
///
/// # Errors
/// * `SamplerError::InvalidAddress` - a token is not a valid address
pub fn parse_addresses(text: &str) -> Result<Vec<Address>, SamplerError> {
    let mut addresses = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");

        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let address = parse_token(token).ok_or_else(|| SamplerError::InvalidAddress {
                token: token.to_string(),
                line: index + 1,
            })?;
            addresses.push(address);
        }
    }

    Ok(addresses)
}

/// Read and parse a dump file
pub fn load_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<Address>, SamplerError> {
    let path = path.as_ref();
    debug!("Loading address dump: {}", path.display());

    let text = fs::read_to_string(path)?;
    let addresses = parse_addresses(&text)?;

    debug!("Loaded {} addresses", addresses.len());
    Ok(addresses)
}

fn parse_token(token: &str) -> Option<Address> {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Address::from_str_radix(hex, 16).ok()
    } else {
        token.parse().ok()
    }
}
