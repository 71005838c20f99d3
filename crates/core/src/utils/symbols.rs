use crate::errors::{Error, Result};

const SYMBOL_MAX_LEN: usize = 20;

/// Trim and upper-case a ticker symbol, rejecting empty or malformed input.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(Error::invalid_field("symbol", "is required"));
    }
    if symbol.len() > SYMBOL_MAX_LEN {
        return Err(Error::invalid_field("symbol", "is too long"));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '^'))
    {
        return Err(Error::invalid_field("symbol", "contains invalid characters"));
    }

    Ok(symbol)
}
