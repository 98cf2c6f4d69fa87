use clap::Parser;
use eth_txscan::config::{Args, Settings};
use eth_txscan::error::Result;
use eth_txscan::provider;
use eth_txscan::scanner;
use log::error;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()).await {
        error!("{}", e);
        if e.is_config() {
            eprintln!("[!] {}, exiting", e);
        } else {
            eprintln!("[!] scan aborted: {}", e);
        }
        std::process::exit(-1);
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = Settings::load(&args)?;
    let client = provider::connect(settings.transport()).await?;
    scanner::run(client.as_ref(), &settings).await?;
    Ok(())
}
