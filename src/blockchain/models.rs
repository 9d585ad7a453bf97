use crate::models::TransactionDetail;
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiMessage,
};
use tracing::warn;

/// Reduce an RPC transaction record to the balance view the classifier works on.
///
/// Returns `None` when the record has no metadata or uses a binary encoding.
pub fn extract_transaction_detail(
    signature: &str,
    tx_data: &EncodedConfirmedTransactionWithStatusMeta,
) -> Option<TransactionDetail> {
    let transaction_with_meta = &tx_data.transaction;

    let transaction = match &transaction_with_meta.transaction {
        EncodedTransaction::Json(tx) => tx,
        _ => {
            warn!("Unsupported transaction encoding for {}", signature);
            return None;
        }
    };

    let meta = match &transaction_with_meta.meta {
        Some(meta) => meta,
        None => {
            warn!("Transaction {} has no metadata", signature);
            return None;
        }
    };

    let account_keys: Vec<String> = match &transaction.message {
        UiMessage::Parsed(message) => message
            .account_keys
            .iter()
            .map(|account| account.pubkey.clone())
            .collect(),
        UiMessage::Raw(message) => {
            let mut keys = message.account_keys.clone();
            // v0 messages index loaded writable keys, then loaded readonly keys
            if let OptionSerializer::Some(loaded) = &meta.loaded_addresses {
                keys.extend(loaded.writable.iter().cloned());
                keys.extend(loaded.readonly.iter().cloned());
            }
            keys
        }
    };

    if account_keys.is_empty() {
        warn!("Transaction {} has no account keys", signature);
        return None;
    }

    Some(TransactionDetail {
        signature: signature.to_string(),
        block_time: tx_data.block_time,
        account_keys,
        pre_balances: meta.pre_balances.clone(),
        post_balances: meta.post_balances.clone(),
    })
}
