use crate::error::{Error, Result};
use ethers::types::U256;
use ethers::utils::{format_ether, parse_ether};

/// Fractional digits of one ether expressed in wei.
pub const WEI_DECIMALS: usize = 18;

/// Converts a decimal ether amount such as `"2.5"` into wei.
pub fn eth_to_wei(flag: &'static str, eth: &str) -> Result<U256> {
    let eth = eth.trim();
    if eth.is_empty() || eth.starts_with('-') {
        return Err(Error::InvalidValue {
            flag,
            reason: format!("'{}' is not a non-negative ether amount", eth),
        });
    }
    if let Some((_, frac)) = eth.split_once('.') {
        if frac.len() > WEI_DECIMALS {
            return Err(Error::InvalidValue {
                flag,
                reason: format!(
                    "'{}' has more than {} decimal places and is not a whole number of wei",
                    eth, WEI_DECIMALS
                ),
            });
        }
    }
    parse_ether(eth).map_err(|e| Error::InvalidValue {
        flag,
        reason: format!("'{}': {}", eth, e),
    })
}

/// Formats wei as ether, without the trailing zeros `format_ether` pads to 18 digits.
pub fn wei_to_eth(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{}.0", int)
            } else {
                format!("{}.{}", int, frac)
            }
        }
        None => format!("{}.0", formatted),
    }
}
