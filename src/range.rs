use crate::config::{BlockSelection, Settings, ValueSelection};
use crate::error::{Error, Result};
use crate::models::{BlockRange, ValueRange};
use ethers::types::U256;

/// Turns a block selection into a closed range against the current head.
///
/// An exact block wins over `--latest`, which wins over min/max bounds.
pub fn resolve_blocks(selection: BlockSelection, head: u64) -> Result<BlockRange> {
    let (min, max) = match selection {
        BlockSelection::Exact(n) => (n, n),
        BlockSelection::Latest(n) => (head.saturating_sub(n.saturating_sub(1)), head),
        BlockSelection::Bounds { min, max } => (min.unwrap_or(head), max.unwrap_or(head)),
    };

    if max > head {
        return Err(Error::InvalidRange(format!(
            "block {} is beyond the chain head {}",
            max, head
        )));
    }
    BlockRange::new(min, max).ok_or_else(|| {
        Error::InvalidRange(format!("block min {} is above block max {}", min, max))
    })
}

/// Zero-only wins over an exact value, which wins over min/max bounds.
pub fn resolve_values(selection: ValueSelection) -> Result<ValueRange> {
    match selection {
        ValueSelection::ZeroOnly => Ok(ValueRange::exact(U256::zero())),
        ValueSelection::Exact(v) => Ok(ValueRange::exact(v)),
        ValueSelection::Bounds { min, max } => ValueRange::new(min, max)
            .ok_or_else(|| Error::InvalidRange("value min is above value max".to_string())),
    }
}

/// The per-transaction inclusion test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFilter {
    pub range: ValueRange,
    pub exclude_zero: bool,
}

impl ValueFilter {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(ValueFilter {
            range: resolve_values(settings.values)?,
            exclude_zero: settings.excludes_zero(),
        })
    }

    pub fn matches(&self, value: U256) -> bool {
        self.range.contains(value) && !(self.exclude_zero && value.is_zero())
    }
}
