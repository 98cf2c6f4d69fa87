use crate::config::Settings;
use crate::error::Result;
use crate::models::{BlockRange, BlockTotals, ScanResult, TxRecord};
use crate::provider::ChainClient;
use crate::range::{resolve_blocks, ValueFilter};
use crate::report::{ReportSink, Sinks};
use log::{debug, info};

/// Visits `blocks` in ascending order and reports every transaction accepted by `filter`.
///
/// Blocks and transactions are fetched one at a time; the first fetch or sink error ends the scan.
pub async fn scan_blocks(
    client: &dyn ChainClient,
    blocks: BlockRange,
    filter: &ValueFilter,
    sink: &mut dyn ReportSink,
) -> Result<ScanResult> {
    let mut result = ScanResult::new();

    for block_number in blocks.iter() {
        let block = client.get_block(block_number).await?;
        info!(
            "Scanning block {} ({} transactions)",
            block_number,
            block.transaction_ids.len()
        );

        let mut totals = BlockTotals::new(block_number, block.transaction_ids.len());
        for id in block.transaction_ids {
            let tx = client.get_transaction(id).await?;
            if !filter.matches(tx.value) {
                continue;
            }
            debug!("match {:?} ({} wei)", tx.id, tx.value);

            let index_in_block = totals.add(tx.value);
            let sequence_index = result.add(tx.value);
            sink.record(&TxRecord {
                sequence_index,
                index_in_block,
                value: tx.value,
                tx_id: tx.id,
                block_number,
            })?;
        }

        sink.end_block(&totals)?;
        result.push_block(totals);
    }

    sink.finish(&result)?;
    Ok(result)
}

/// Resolves the ranges against the chain head, opens the configured sinks and scans.
pub async fn run(client: &dyn ChainClient, settings: &Settings) -> Result<ScanResult> {
    let filter = ValueFilter::from_settings(settings)?;
    let head = client.latest_block_number().await?;
    let blocks = resolve_blocks(settings.blocks, head)?;
    info!(
        "head {}, scanning blocks {}..={}",
        head, blocks.min, blocks.max
    );

    let mut sinks = Sinks::open(settings)?;
    scan_blocks(client, blocks, &filter, &mut sinks).await
}
