use crate::error::{Error, Result};
use crate::provider::Transport;
use crate::units::{eth_to_wei, wei_to_eth};
use clap::Parser;
use ethers::types::U256;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "gettxbyeth.toml";
pub const DEFAULT_TX_URL: &str = "https://etherscan.io/tx/";
pub const DEFAULT_BLOCK_URL: &str = "https://etherscan.io/block/";

/// Get Ethereum transactions by sent ether value.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "eth_txscan", version)]
pub struct Args {
    /// Config file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Provider: http(s) URL, ws(s) URL or IPC path; empty for auto-detection
    #[arg(long, value_name = "URI")]
    pub provider: Option<String>,

    /// Scan only this block
    #[arg(long, value_name = "NUMBER")]
    pub block: Option<u64>,

    /// Scan the last N blocks (default 1)
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "1")]
    pub latest: Option<u64>,

    /// Lowest block to scan (default: latest)
    #[arg(long, value_name = "NUMBER")]
    pub block_min: Option<u64>,

    /// Highest block to scan (default: latest)
    #[arg(long, value_name = "NUMBER")]
    pub block_max: Option<u64>,

    /// Skip transactions with zero value
    #[arg(long)]
    pub skip_zero: bool,

    /// Report only transactions with zero value
    #[arg(long)]
    pub zero_only: bool,

    /// Report only transactions sending exactly this many ether
    #[arg(long, value_name = "ETH")]
    pub exact_eth: Option<String>,

    /// Minimum value in ether (default 0)
    #[arg(long, value_name = "ETH")]
    pub eth_min: Option<String>,

    /// Maximum value in ether (default unbounded)
    #[arg(long, value_name = "ETH")]
    pub eth_max: Option<String>,

    /// Add transaction explorer links
    #[arg(long)]
    pub out_txlink: bool,

    /// Add block explorer links
    #[arg(long)]
    pub out_blocklink: bool,

    /// Write an HTML report
    #[arg(long, value_name = "FILE")]
    pub out_html: Option<PathBuf>,

    /// Copy console output to a file
    #[arg(long, value_name = "FILE")]
    pub out_console: Option<PathBuf>,

    /// Write a CSV report
    #[arg(long, value_name = "FILE")]
    pub out_csv: Option<PathBuf>,

    /// Write <BASENAME>.txt, <BASENAME>.csv and <BASENAME>.html
    #[arg(long, value_name = "BASENAME")]
    pub out_files: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Shown in the report header only.
    pub account: Option<String>,
    pub provider: ProviderSection,
    pub infura: Option<InfuraSection>,
    pub explorer: ExplorerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfuraSection {
    pub url: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerSection {
    pub tx_url: String,
    pub block_url: String,
}

impl Default for ExplorerSection {
    fn default() -> Self {
        ExplorerSection {
            tx_url: DEFAULT_TX_URL.to_string(),
            block_url: DEFAULT_BLOCK_URL.to_string(),
        }
    }
}

impl FileConfig {
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`. A missing file is only an error when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(FileConfig::default())
            }
            Err(source) => Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Which blocks to scan, before the chain head is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSelection {
    Exact(u64),
    Latest(u64),
    Bounds { min: Option<u64>, max: Option<u64> },
}

/// Which values to report, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSelection {
    ZeroOnly,
    Exact(U256),
    Bounds { min: U256, max: Option<U256> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub console: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    pub tx_links: bool,
    pub block_links: bool,
    pub tx_url: String,
    pub block_url: String,
}

/// The complete, validated configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub provider: String,
    pub blocks: BlockSelection,
    pub values: ValueSelection,
    pub skip_zero: bool,
    pub account: Option<String>,
    pub outputs: OutputPaths,
    pub links: LinkSettings,
}

impl Settings {
    /// Reads the config file named by `args` (or the default one) and merges it with `args`.
    pub fn load(args: &Args) -> Result<Self> {
        let (path, required) = match &args.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let file = FileConfig::load(&path, required)?;
        Self::from_sources(args, &file, &path)
    }

    /// Merges defaults, the config file and the command line, in that order.
    pub fn from_sources(args: &Args, file: &FileConfig, config_path: &Path) -> Result<Self> {
        let provider = resolve_provider(args, file, config_path)?;
        let blocks = block_selection(args)?;
        let values = value_selection(args)?;

        let derived = args.out_files.as_deref().map(|base| OutputPaths {
            console: Some(PathBuf::from(format!("{}.txt", base))),
            csv: Some(PathBuf::from(format!("{}.csv", base))),
            html: Some(PathBuf::from(format!("{}.html", base))),
        });
        let derived = derived.unwrap_or_default();
        let outputs = OutputPaths {
            console: args.out_console.clone().or(derived.console),
            csv: args.out_csv.clone().or(derived.csv),
            html: args.out_html.clone().or(derived.html),
        };

        Ok(Settings {
            provider,
            blocks,
            values,
            skip_zero: args.skip_zero,
            account: file
                .account
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            outputs,
            links: LinkSettings {
                tx_links: args.out_txlink,
                block_links: args.out_blocklink,
                tx_url: file.explorer.tx_url.clone(),
                block_url: file.explorer.block_url.clone(),
            },
        })
    }

    pub fn transport(&self) -> Transport {
        Transport::classify(&self.provider)
    }

    /// Zero-valued transactions are dropped only when skipping is asked for and
    /// zero-only reporting is not.
    pub fn excludes_zero(&self) -> bool {
        self.skip_zero && self.values != ValueSelection::ZeroOnly
    }

    /// Name/value pairs shown in report headers.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let blocks = match self.blocks {
            BlockSelection::Exact(n) => format!("block {}", n),
            BlockSelection::Latest(n) => format!("latest {} block(s)", n),
            BlockSelection::Bounds { min, max } => format!(
                "{} .. {}",
                min.map_or("latest".to_string(), |n| n.to_string()),
                max.map_or("latest".to_string(), |n| n.to_string()),
            ),
        };
        let values = match self.values {
            ValueSelection::ZeroOnly => "zero only".to_string(),
            ValueSelection::Exact(v) => format!("exactly {} ETH", wei_to_eth(v)),
            ValueSelection::Bounds { min, max } => format!(
                "{} .. {} ETH",
                wei_to_eth(min),
                max.map_or("unbounded".to_string(), wei_to_eth),
            ),
        };
        let mut rows = vec![("Provider", self.transport().to_string())];
        if let Some(account) = &self.account {
            rows.push(("Account", account.clone()));
        }
        rows.push(("Blocks", blocks));
        rows.push(("Value", values));
        rows.push(("Skip zero", self.excludes_zero().to_string()));
        rows
    }
}

fn resolve_provider(args: &Args, file: &FileConfig, config_path: &Path) -> Result<String> {
    if let Some(uri) = &args.provider {
        return Ok(uri.clone());
    }
    if let Some(uri) = &file.provider.uri {
        return Ok(uri.clone());
    }
    match &file.infura {
        Some(infura) if !infura.url.is_empty() => {
            if infura.id.trim().is_empty() {
                return Err(Error::MissingCredential(format!(
                    "Infura id is missing, please edit the {} file.",
                    config_path.display()
                )));
            }
            Ok(format!("{}{}", infura.url, infura.id.trim()))
        }
        _ => Ok(String::new()),
    }
}

fn block_selection(args: &Args) -> Result<BlockSelection> {
    if let Some(n) = args.block {
        return Ok(BlockSelection::Exact(n));
    }
    if let Some(n) = args.latest {
        if n == 0 {
            return Err(Error::InvalidValue {
                flag: "--latest",
                reason: "block count must be at least 1".to_string(),
            });
        }
        return Ok(BlockSelection::Latest(n));
    }
    if let (Some(min), Some(max)) = (args.block_min, args.block_max) {
        if min > max {
            return Err(Error::InvalidRange(format!(
                "--block-min {} is above --block-max {}",
                min, max
            )));
        }
    }
    Ok(BlockSelection::Bounds {
        min: args.block_min,
        max: args.block_max,
    })
}

fn value_selection(args: &Args) -> Result<ValueSelection> {
    if args.zero_only {
        return Ok(ValueSelection::ZeroOnly);
    }
    if let Some(eth) = &args.exact_eth {
        return Ok(ValueSelection::Exact(eth_to_wei("--exact-eth", eth)?));
    }
    let min = match &args.eth_min {
        Some(eth) => eth_to_wei("--eth-min", eth)?,
        None => U256::zero(),
    };
    let max = args
        .eth_max
        .as_deref()
        .map(|eth| eth_to_wei("--eth-max", eth))
        .transpose()?;
    if let Some(max) = max {
        if min > max {
            return Err(Error::InvalidRange(format!(
                "--eth-min {} is above --eth-max {}",
                wei_to_eth(min),
                wei_to_eth(max)
            )));
        }
    }
    Ok(ValueSelection::Bounds { min, max })
}
