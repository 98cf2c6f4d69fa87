use crate::error::Result;
use crate::models::{BlockTotals, ScanResult, TxRecord};
use crate::report::{Explorer, ReportSink};
use crate::units::wei_to_eth;
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

pub const HEADER: [&str; 8] = [
    "#",
    "#b",
    "Value (ETH)",
    "Value (wei)",
    "Tx id",
    "Tx link",
    "Block number",
    "Block link",
];

#[derive(Debug, Serialize)]
pub struct CsvRow {
    pub seq: usize,
    pub index_in_block: usize,
    pub value_eth: String,
    pub value_wei: String,
    pub tx_id: String,
    pub tx_link: String,
    pub block_number: u64,
    pub block_link: String,
}

impl CsvRow {
    pub fn new(record: &TxRecord, explorer: &Explorer) -> Self {
        CsvRow {
            seq: record.sequence_index,
            index_in_block: record.index_in_block,
            value_eth: wei_to_eth(record.value),
            value_wei: record.value.to_string(),
            tx_id: format!("{:?}", record.tx_id),
            tx_link: explorer.tx_link(&record.tx_id).unwrap_or_default(),
            block_number: record.block_number,
            block_link: explorer.block_link(record.block_number).unwrap_or_default(),
        }
    }
}

/// `;`-delimited report, one row per matching transaction.
pub struct CsvReport {
    wtr: Writer<File>,
    explorer: Explorer,
}

impl CsvReport {
    pub fn create(path: &Path, explorer: Explorer) -> Result<Self> {
        let mut wtr = WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_path(path)?;
        wtr.write_record(HEADER)?;
        Ok(CsvReport { wtr, explorer })
    }
}

impl ReportSink for CsvReport {
    fn record(&mut self, record: &TxRecord) -> Result<()> {
        self.wtr.serialize(CsvRow::new(record, &self.explorer))?;
        Ok(())
    }

    fn end_block(&mut self, _totals: &BlockTotals) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }

    fn finish(&mut self, _result: &ScanResult) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}
