use crate::error::{Error, Result};
use crate::models::{Block, Transaction};
use async_trait::async_trait;
use ethers::providers::{Http, Ipc, Middleware, Provider, Ws};
use ethers::types::H256;
use log::{info, warn};
use std::fmt;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_PROVIDER: &str = "http://127.0.0.1:8545";

/// Environment variable consulted by auto-detection.
pub const PROVIDER_ENV: &str = "WEB3_PROVIDER_URI";

/// The node operations the scanner depends on.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn latest_block_number(&self) -> Result<u64>;

    async fn get_block(&self, number: u64) -> Result<Block>;

    async fn get_transaction(&self, id: H256) -> Result<Transaction>;

    async fn is_connected(&self) -> bool;
}

/// Transport selected from a provider string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Http(String),
    WebSocket(String),
    Ipc(String),
    Auto,
}

impl Transport {
    /// `http*` is HTTP, `ws*` is WebSocket, any other non-empty string is an IPC path,
    /// and an empty string asks for auto-detection.
    pub fn classify(uri: &str) -> Self {
        let uri = uri.trim();
        if uri.is_empty() {
            Transport::Auto
        } else if uri.starts_with("http") {
            Transport::Http(uri.to_string())
        } else if uri.starts_with("ws") {
            Transport::WebSocket(uri.to_string())
        } else {
            Transport::Ipc(uri.to_string())
        }
    }

    /// Replaces `Auto` with a concrete transport: `WEB3_PROVIDER_URI` if set, else the local node.
    pub fn resolve_auto(self, env_value: Option<&str>) -> Self {
        match self {
            Transport::Auto => match env_value.map(Transport::classify) {
                Some(Transport::Auto) | None => Transport::Http(DEFAULT_PROVIDER.to_string()),
                Some(resolved) => resolved,
            },
            concrete => concrete,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Http(url) => write!(f, "{} (http)", url),
            Transport::WebSocket(url) => write!(f, "{} (websocket)", url),
            Transport::Ipc(path) => write!(f, "{} (ipc)", path),
            Transport::Auto => write!(f, "auto"),
        }
    }
}

/// `ChainClient` over any ethers middleware.
pub struct EthersClient<M> {
    provider: M,
}

impl<M: Middleware> EthersClient<M> {
    pub fn new(provider: M) -> Self {
        EthersClient { provider }
    }
}

#[async_trait]
impl<M> ChainClient for EthersClient<M>
where
    M: Middleware + 'static,
{
    async fn latest_block_number(&self) -> Result<u64> {
        let number = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| Error::Rpc(e.to_string()))?;
        Ok(number.as_u64())
    }

    async fn get_block(&self, number: u64) -> Result<Block> {
        let block = self
            .provider
            .get_block(number)
            .await
            .map_err(|e| Error::Rpc(e.to_string()))?
            .ok_or(Error::BlockNotFound(number))?;

        Ok(Block {
            number,
            transaction_ids: block.transactions,
        })
    }

    async fn get_transaction(&self, id: H256) -> Result<Transaction> {
        let tx = self
            .provider
            .get_transaction(id)
            .await
            .map_err(|e| Error::Rpc(e.to_string()))?
            .ok_or(Error::TransactionNotFound(id))?;

        Ok(Transaction {
            id: tx.hash,
            value: tx.value,
            block_number: tx.block_number.map(|n| n.as_u64()).unwrap_or_default(),
        })
    }

    async fn is_connected(&self) -> bool {
        match self.provider.get_chainid().await {
            Ok(_) => true,
            Err(e) => {
                warn!("connectivity check failed: {}", e);
                false
            }
        }
    }
}

/// Opens the transport and checks that the node answers.
pub async fn connect(transport: Transport) -> Result<Box<dyn ChainClient>> {
    let env_value = std::env::var(PROVIDER_ENV).ok();
    let transport = transport.resolve_auto(env_value.as_deref());
    let target = transport.to_string();
    info!("connecting to {}", target);

    let client: Box<dyn ChainClient> = match transport {
        Transport::Http(url) => {
            let provider = Provider::<Http>::try_from(url.as_str())
                .map_err(|e| Error::NotConnected(format!("{}: {}", target, e)))?;
            Box::new(EthersClient::new(provider))
        }
        Transport::WebSocket(url) => {
            let provider = Provider::<Ws>::connect(url.as_str())
                .await
                .map_err(|e| Error::NotConnected(format!("{}: {}", target, e)))?;
            Box::new(EthersClient::new(provider))
        }
        Transport::Ipc(path) => {
            let provider = Provider::<Ipc>::connect_ipc(path.as_str())
                .await
                .map_err(|e| Error::NotConnected(format!("{}: {}", target, e)))?;
            Box::new(EthersClient::new(provider))
        }
        Transport::Auto => return Err(Error::NotConnected(target)),
    };

    if !client.is_connected().await {
        return Err(Error::NotConnected(target));
    }
    info!("connected to {}", target);
    Ok(client)
}
