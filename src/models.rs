use ethers::types::{H256, U256};

/// A block as seen by the scanner: its number and the ids of its transactions, in chain order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub number: u64,
    pub transaction_ids: Vec<H256>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: H256,
    pub value: U256,
    pub block_number: u64,
}

/// Closed interval of block numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub min: u64,
    pub max: u64,
}

impl BlockRange {
    /// Builds a range, rejecting `min > max`.
    pub fn new(min: u64, max: u64) -> Option<Self> {
        (min <= max).then_some(BlockRange { min, max })
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.min..=self.max
    }
}

/// Value interval in wei. `max == None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: U256,
    pub max: Option<U256>,
}

impl ValueRange {
    pub fn new(min: U256, max: Option<U256>) -> Option<Self> {
        match max {
            Some(max) if min > max => None,
            _ => Some(ValueRange { min, max }),
        }
    }

    pub fn exact(value: U256) -> Self {
        ValueRange {
            min: value,
            max: Some(value),
        }
    }

    pub fn contains(&self, value: U256) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// One matching transaction, handed unchanged to every report sink.
#[derive(Debug, Clone, PartialEq)]
pub struct TxRecord {
    /// 1-based position among all matches of the run.
    pub sequence_index: usize,
    /// 1-based position among the matches of its block.
    pub index_in_block: usize,
    pub value: U256,
    pub tx_id: H256,
    pub block_number: u64,
}

/// Per-block accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTotals {
    pub number: u64,
    /// Transactions in the block, matching or not.
    pub scanned: usize,
    pub tx_count: usize,
    pub value: U256,
}

impl BlockTotals {
    pub fn new(number: u64, scanned: usize) -> Self {
        BlockTotals {
            number,
            scanned,
            tx_count: 0,
            value: U256::zero(),
        }
    }

    /// Counts a match and returns its 1-based index within the block.
    pub fn add(&mut self, value: U256) -> usize {
        self.tx_count += 1;
        self.value += value;
        self.tx_count
    }
}

/// Running totals of a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub total_tx_count: usize,
    pub total_value: U256,
    pub scanned_tx_count: usize,
    pub blocks: Vec<BlockTotals>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a match and returns its 1-based sequence index for the run.
    pub fn add(&mut self, value: U256) -> usize {
        self.total_tx_count += 1;
        self.total_value += value;
        self.total_tx_count
    }

    pub fn push_block(&mut self, totals: BlockTotals) {
        self.scanned_tx_count += totals.scanned;
        self.blocks.push(totals);
    }

    pub fn blocks_scanned(&self) -> usize {
        self.blocks.len()
    }

    /// Global totals equal the sum of the per-block totals.
    pub fn is_consistent(&self) -> bool {
        let count: usize = self.blocks.iter().map(|b| b.tx_count).sum();
        let value = self
            .blocks
            .iter()
            .fold(U256::zero(), |acc, b| acc + b.value);
        count == self.total_tx_count && value == self.total_value
    }
}
