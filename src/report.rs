use crate::config::{LinkSettings, Settings};
use crate::console::ConsoleReport;
use crate::csv::CsvReport;
use crate::error::Result;
use crate::html::HtmlReport;
use crate::models::{BlockTotals, ScanResult, TxRecord};
use ethers::types::H256;
use log::info;

/// An output destination for matched transactions.
pub trait ReportSink {
    fn record(&mut self, record: &TxRecord) -> Result<()>;

    /// Called after every scanned block; buffered output must be flushed here.
    fn end_block(&mut self, totals: &BlockTotals) -> Result<()>;

    fn finish(&mut self, result: &ScanResult) -> Result<()>;
}

/// Builds explorer URLs. Pure formatting, no network access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explorer {
    tx_url: String,
    block_url: String,
    tx_links: bool,
    block_links: bool,
}

impl Explorer {
    pub fn new(links: &LinkSettings) -> Self {
        Explorer {
            tx_url: links.tx_url.clone(),
            block_url: links.block_url.clone(),
            tx_links: links.tx_links,
            block_links: links.block_links,
        }
    }

    pub fn tx_url(&self, id: &H256) -> String {
        format!("{}{:?}", self.tx_url, id)
    }

    pub fn block_url(&self, number: u64) -> String {
        format!("{}{}", self.block_url, number)
    }

    /// The tx link if tx links are enabled.
    pub fn tx_link(&self, id: &H256) -> Option<String> {
        self.tx_links.then(|| self.tx_url(id))
    }

    /// The block link if block links are enabled.
    pub fn block_link(&self, number: u64) -> Option<String> {
        self.block_links.then(|| self.block_url(number))
    }
}

/// The active sinks of a run, called in a fixed order.
#[derive(Default)]
pub struct Sinks {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Sinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console to stdout, then the console file copy, CSV and HTML when configured.
    pub fn open(settings: &Settings) -> Result<Self> {
        let explorer = Explorer::new(&settings.links);
        let describe = settings.describe();
        let mut sinks = Sinks::new();

        sinks.push(Box::new(ConsoleReport::stdout(explorer.clone(), &describe)?));
        if let Some(path) = &settings.outputs.console {
            info!("writing console copy to {}", path.display());
            sinks.push(Box::new(ConsoleReport::create(path, explorer.clone(), &describe)?));
        }
        if let Some(path) = &settings.outputs.csv {
            info!("writing CSV report to {}", path.display());
            sinks.push(Box::new(CsvReport::create(path, explorer.clone())?));
        }
        if let Some(path) = &settings.outputs.html {
            info!("writing HTML report to {}", path.display());
            sinks.push(Box::new(HtmlReport::create(path, explorer, &describe)?));
        }
        Ok(sinks)
    }

    pub fn push(&mut self, sink: Box<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ReportSink for Sinks {
    fn record(&mut self, record: &TxRecord) -> Result<()> {
        for sink in self.sinks.iter_mut() {
            sink.record(record)?;
        }
        Ok(())
    }

    fn end_block(&mut self, totals: &BlockTotals) -> Result<()> {
        for sink in self.sinks.iter_mut() {
            sink.end_block(totals)?;
        }
        Ok(())
    }

    fn finish(&mut self, result: &ScanResult) -> Result<()> {
        for sink in self.sinks.iter_mut() {
            sink.finish(result)?;
        }
        Ok(())
    }
}
