use crate::blockchain::classifier::classify;
use crate::blockchain::client::{ChainRpc, ClientError};
use crate::blockchain::explorer::Explorer;
use crate::models::ClassifiedTransaction;
use tracing::{debug, warn};

/// Fetch and classify the most recent `limit` transactions for `address`.
///
/// Detail fetches run concurrently; the result keeps the order of the
/// signature list. A detail that fails to load, or that does not involve the
/// wallet, is left out. Only the signature list fetch can fail the whole call.
pub async fn fetch_history<C: ChainRpc + ?Sized>(
    client: &C,
    address: &str,
    limit: usize,
    explorer: &Explorer,
) -> Result<Vec<ClassifiedTransaction>, ClientError> {
    let signatures = client.get_signatures_for_address(address, limit).await?;

    if signatures.is_empty() {
        return Ok(Vec::new());
    }

    let futures: Vec<_> = signatures
        .iter()
        .map(|record| client.get_transaction(&record.signature))
        .collect();

    // join_all yields results in input order, not completion order
    let results = futures::future::join_all(futures).await;

    let mut transactions = Vec::with_capacity(signatures.len());
    for (record, result) in signatures.iter().zip(results) {
        match result {
            Ok(Some(detail)) => {
                match classify(&detail, address, record.confirmation_status, explorer) {
                    Some(tx) => transactions.push(tx),
                    None => debug!("Transaction {} does not touch {}", record.signature, address),
                }
            }
            Ok(None) => debug!("Transaction {} returned no detail", record.signature),
            Err(e) => warn!("Failed to get transaction {}: {}", record.signature, e),
        }
    }

    transactions.truncate(limit);

    debug!(
        "Classified {} of {} transactions for {}",
        transactions.len(),
        signatures.len(),
        address
    );

    Ok(transactions)
}
