/// # Modules Overview
///
/// This crate scans a range of Ethereum blocks, selects the transactions whose
/// transferred value lies within a configured range, and reports them to the
/// console and optionally to CSV and HTML files.

/// `config`
///
/// Command line arguments (`Args`), the TOML config file (`FileConfig`) and the
/// merged, validated `Settings` of a run.
///
/// Example usage:
/// ```rust,ignore
/// let settings = config::Settings::load(&config::Args::parse())?;
/// ```
pub mod config;

pub mod error;

/// `models`
///
/// Defines core data structures used by the scanner and the reports:
/// * `Block` and `Transaction` – What the chain client returns.
/// * `BlockRange` and `ValueRange` – Resolved closed intervals.
/// * `TxRecord` – One matching transaction, as passed to every report.
/// * `BlockTotals` and `ScanResult` – Per-block and global totals.
pub mod models;

/// `units`
///
/// Ether/wei conversion on top of `ethers::utils`.
pub mod units;

/// `provider`
///
/// The `ChainClient` trait, its implementation over ethers providers, and the
/// selection of the HTTP, WebSocket or IPC transport from a provider string.
///
/// Example usage:
/// ```rust,ignore
/// let client = provider::connect(Transport::classify("wss://node.example")).await?;
/// ```
pub mod provider;

/// `range`
///
/// Resolves block and value selections into `BlockRange`/`ValueRange` and
/// provides the per-transaction `ValueFilter`.
pub mod range;

/// `scanner`
///
/// Walks the block range, fetches every transaction, applies the value filter
/// and feeds matches to the report sinks.
///
/// Example usage:
/// ```rust,ignore
/// let result = scanner::run(client.as_ref(), &settings).await?;
/// ```
pub mod scanner;

/// `report`
///
/// The `ReportSink` trait, the ordered set of active sinks, and explorer links.
pub mod report;

pub mod console;

/// `csv`
///
/// `;`-delimited CSV report with a fixed eight column header.
pub mod csv;

pub mod html;
