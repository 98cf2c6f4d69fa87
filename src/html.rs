use crate::error::{Error, Result};
use crate::models::{BlockTotals, ScanResult, TxRecord};
use crate::report::{Explorer, ReportSink};
use crate::units::wei_to_eth;
use chrono::Utc;
use log::warn;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const STYLE: &str = "body { font-family: sans-serif; } \
table { border-collapse: collapse; margin-bottom: 1em; } \
td, th { border: 1px solid #999; padding: 2px 6px; } \
td.num { text-align: right; }";

/// HTML document: settings table, one row per match, totals table.
pub struct HtmlReport<W: Write = BufWriter<File>> {
    out: W,
    explorer: Explorer,
    finished: bool,
}

impl HtmlReport {
    pub fn create(
        path: &Path,
        explorer: Explorer,
        settings: &[(&'static str, String)],
    ) -> Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        HtmlReport::new(file, explorer, settings)
    }
}

impl<W: Write> HtmlReport<W> {
    pub fn new(mut out: W, explorer: Explorer, settings: &[(&'static str, String)]) -> Result<Self> {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>Ethereum transactions by value</title>")?;
        writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE)?;
        writeln!(out, "<h1>Ethereum transactions by value</h1>")?;

        writeln!(out, "<table class=\"settings\">")?;
        for (name, value) in settings {
            writeln!(out, "<tr><th>{}</th><td>{}</td></tr>", escape(name), escape(value))?;
        }
        writeln!(
            out,
            "<tr><th>Generated</th><td>{}</td></tr>",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out, "</table>")?;

        writeln!(out, "<table class=\"transactions\">")?;
        writeln!(
            out,
            "<tr><th>#</th><th>#b</th><th>Value (ETH)</th><th>Value (wei)</th><th>Tx id</th><th>Block number</th></tr>"
        )?;
        Ok(HtmlReport {
            out,
            explorer,
            finished: false,
        })
    }

    fn close_document(&mut self) -> Result<()> {
        writeln!(self.out, "</body>\n</html>")?;
        self.out.flush()?;
        Ok(())
    }

    fn tx_cell(&self, record: &TxRecord) -> String {
        let id = format!("{:?}", record.tx_id);
        match self.explorer.tx_link(&record.tx_id) {
            Some(url) => format!("<a href=\"{}\">{}</a>", escape(&url), id),
            None => id,
        }
    }

    fn block_cell(&self, number: u64) -> String {
        match self.explorer.block_link(number) {
            Some(url) => format!("<a href=\"{}\">{}</a>", escape(&url), number),
            None => number.to_string(),
        }
    }
}

impl<W: Write> ReportSink for HtmlReport<W> {
    fn record(&mut self, record: &TxRecord) -> Result<()> {
        let tx = self.tx_cell(record);
        let block = self.block_cell(record.block_number);
        writeln!(
            self.out,
            "<tr><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td>{}</td><td>{}</td></tr>",
            record.sequence_index,
            record.index_in_block,
            wei_to_eth(record.value),
            record.value,
            tx,
            block
        )?;
        Ok(())
    }

    fn end_block(&mut self, _totals: &BlockTotals) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, result: &ScanResult) -> Result<()> {
        self.finished = true;
        writeln!(self.out, "</table>")?;
        writeln!(self.out, "<table class=\"totals\">")?;
        writeln!(
            self.out,
            "<tr><th>Blocks scanned</th><td class=\"num\">{}</td></tr>",
            result.blocks_scanned()
        )?;
        writeln!(
            self.out,
            "<tr><th>Transactions scanned</th><td class=\"num\">{}</td></tr>",
            result.scanned_tx_count
        )?;
        writeln!(
            self.out,
            "<tr><th>Transactions found</th><td class=\"num\">{}</td></tr>",
            result.total_tx_count
        )?;
        writeln!(
            self.out,
            "<tr><th>Total value (ETH)</th><td class=\"num\">{}</td></tr>",
            wei_to_eth(result.total_value)
        )?;
        writeln!(
            self.out,
            "<tr><th>Total value (wei)</th><td class=\"num\">{}</td></tr>",
            result.total_value
        )?;
        writeln!(self.out, "</table>")?;
        self.close_document()
    }
}

impl<W: Write> Drop for HtmlReport<W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let closed = writeln!(self.out, "</table>")
            .map_err(Error::from)
            .and_then(|_| self.close_document());
        if let Err(e) = closed {
            warn!("cannot close HTML report: {}", e);
        }
    }
}

/// Escapes text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
