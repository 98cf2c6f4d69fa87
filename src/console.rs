use crate::error::Result;
use crate::models::{BlockTotals, ScanResult, TxRecord};
use crate::report::{Explorer, ReportSink};
use crate::units::wei_to_eth;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Plain-text report, to stdout or to a file.
pub struct ConsoleReport {
    out: Box<dyn Write>,
    explorer: Explorer,
}

impl ConsoleReport {
    pub fn stdout(explorer: Explorer, settings: &[(&'static str, String)]) -> Result<Self> {
        Self::new(Box::new(io::stdout()), explorer, settings)
    }

    pub fn create(
        path: &Path,
        explorer: Explorer,
        settings: &[(&'static str, String)],
    ) -> Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Self::new(Box::new(file), explorer, settings)
    }

    /// Writes the header and returns the report.
    pub fn new(
        mut out: Box<dyn Write>,
        explorer: Explorer,
        settings: &[(&'static str, String)],
    ) -> Result<Self> {
        writeln!(out, "#### Get ethereum transactions by sent ether value ####")?;
        writeln!(out)?;
        for (name, value) in settings {
            writeln!(out, "{}: {}", name, value)?;
        }
        writeln!(out)?;
        Ok(ConsoleReport { out, explorer })
    }

    pub fn format_record(&self, record: &TxRecord) -> String {
        let mut line = format!(
            "#{} [{}] {} ETH ({} wei) {:?} block {}",
            record.sequence_index,
            record.index_in_block,
            wei_to_eth(record.value),
            record.value,
            record.tx_id,
            record.block_number
        );
        if let Some(link) = self.explorer.tx_link(&record.tx_id) {
            line.push_str(&format!(" {}", link));
        }
        if let Some(link) = self.explorer.block_link(record.block_number) {
            line.push_str(&format!(" {}", link));
        }
        line
    }
}

impl ReportSink for ConsoleReport {
    fn record(&mut self, record: &TxRecord) -> Result<()> {
        let line = self.format_record(record);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn end_block(&mut self, totals: &BlockTotals) -> Result<()> {
        writeln!(
            self.out,
            "Block {}: {} of {} transactions, {} ETH",
            totals.number,
            totals.tx_count,
            totals.scanned,
            wei_to_eth(totals.value)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, result: &ScanResult) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Blocks scanned: {}", result.blocks_scanned())?;
        writeln!(self.out, "Transactions scanned: {}", result.scanned_tx_count)?;
        writeln!(self.out, "Transactions found: {}", result.total_tx_count)?;
        writeln!(
            self.out,
            "Total value: {} ETH ({} wei)",
            wei_to_eth(result.total_value),
            result.total_value
        )?;
        self.out.flush()?;
        Ok(())
    }
}
