//! Refresh coordination and history assembly against a fake chain

#[cfg(test)]
mod tests {
    use crate::blockchain::history::fetch_history;
    use crate::dashboard::{Dashboard, RefreshOutcome};
    use crate::models::TransactionKind;
    use crate::tests::support::{explorer, transfer_detail, FakeRpc, OTHER, WALLET};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    fn dashboard(rpc: Arc<FakeRpc>, page_size: usize) -> Dashboard {
        let dashboard = Dashboard::new(rpc, explorer(), page_size);
        dashboard.set_address(Some(WALLET.to_string()));
        dashboard
    }

    fn signatures_of(dashboard: &Dashboard) -> Vec<String> {
        dashboard
            .snapshot()
            .transactions
            .iter()
            .map(|tx| tx.signature.clone())
            .collect()
    }

    fn three_transfers() -> FakeRpc {
        FakeRpc::new()
            .with_balance(WALLET, 1_500_000_000)
            .with_signatures(WALLET, &["S1", "S2", "S3"])
            .with_detail(transfer_detail("S1", WALLET, 1_000_000_000, 1_500_000_000))
            .with_detail(transfer_detail("S2", WALLET, 1_250_000_000, 1_000_000_000))
            .with_detail(transfer_detail("S3", WALLET, 1_250_000_000, 1_250_000_000))
    }

    #[tokio::test]
    async fn refresh_populates_balance_and_history() {
        let rpc = Arc::new(three_transfers());
        let dashboard = dashboard(rpc, 10);

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Completed);

        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.formatted_balance(), "1.5000");
        assert!(!snapshot.is_refreshing);
        assert!(!snapshot.is_loading_balance);
        assert!(!snapshot.is_loading_history);
        assert!(snapshot.last_refreshed_at.is_some());

        let kinds: Vec<_> = snapshot.transactions.iter().map(|tx| tx.kind).collect();
        assert_eq!(
            kinds,
            vec![TransactionKind::Receive, TransactionKind::Send, TransactionKind::Sign]
        );
        assert_eq!(snapshot.transactions[0].display_amount, "+0.5000 SOL");
        assert_eq!(snapshot.transactions[1].display_amount, "-0.2500 SOL");
        assert_eq!(snapshot.transactions[0].status, "finalized");
    }

    #[tokio::test]
    async fn refresh_without_address_clears_state() {
        let rpc = Arc::new(three_transfers());
        let dashboard = dashboard(rpc.clone(), 10);
        dashboard.refresh().await;
        assert!(!dashboard.snapshot().transactions.is_empty());

        dashboard.set_address(None);
        assert_eq!(dashboard.refresh().await, RefreshOutcome::NoAddress);

        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.address, None);
        assert_eq!(snapshot.balance, 0.0);
        assert!(snapshot.transactions.is_empty());
        assert_eq!(rpc.balance_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn history_keeps_signature_order_regardless_of_settlement() {
        // S1 settles last, S3 first
        let rpc = FakeRpc::new()
            .with_signatures(WALLET, &["S1", "S2", "S3"])
            .with_delayed_detail(transfer_detail("S1", WALLET, 0, 1_000_000_000), Duration::from_millis(40))
            .with_delayed_detail(transfer_detail("S2", WALLET, 0, 2_000_000_000), Duration::from_millis(20))
            .with_delayed_detail(transfer_detail("S3", WALLET, 0, 3_000_000_000), Duration::ZERO);

        let history = fetch_history(&rpc, WALLET, 10, &explorer()).await.unwrap();
        let order: Vec<_> = history.iter().map(|tx| tx.signature.as_str()).collect();
        assert_eq!(order, vec!["S1", "S2", "S3"]);
        assert_eq!(rpc.detail_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_detail_removes_only_that_transaction() {
        let rpc = FakeRpc::new()
            .with_signatures(WALLET, &["S1", "S2", "S3", "S4"])
            .with_detail(transfer_detail("S1", WALLET, 0, 1_000_000_000))
            .failing_detail("S2")
            .with_detail(transfer_detail("S3", WALLET, 1_000_000_000, 0))
            .missing_detail("S4");

        let history = fetch_history(&rpc, WALLET, 10, &explorer()).await.unwrap();
        let order: Vec<_> = history.iter().map(|tx| tx.signature.as_str()).collect();
        assert_eq!(order, vec!["S1", "S3"]);
    }

    #[tokio::test]
    async fn transactions_without_wallet_are_dropped() {
        let rpc = FakeRpc::new()
            .with_signatures(WALLET, &["S1", "S2"])
            .with_detail(transfer_detail("S1", OTHER, 0, 1_000_000_000))
            .with_detail(transfer_detail("S2", WALLET, 0, 1_000_000_000));

        let history = fetch_history(&rpc, WALLET, 10, &explorer()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].signature, "S2");
    }

    #[tokio::test]
    async fn history_is_capped_by_page_size() {
        let rpc = Arc::new(three_transfers());
        let dashboard = dashboard(rpc, 2);
        dashboard.refresh().await;
        assert_eq!(signatures_of(&dashboard), vec!["S1", "S2"]);
    }

    #[tokio::test]
    async fn balance_failure_does_not_affect_history() {
        let rpc = Arc::new(
            FakeRpc::new()
                .with_signatures(WALLET, &["S1"])
                .with_detail(transfer_detail("S1", WALLET, 0, 1_000_000_000)),
        );
        let dashboard = dashboard(rpc, 10);

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Completed);
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.balance, 0.0);
        assert_eq!(signatures_of(&dashboard), vec!["S1"]);
        assert!(!snapshot.is_refreshing);
    }

    #[tokio::test]
    async fn history_failure_does_not_affect_balance() {
        let rpc = Arc::new(
            FakeRpc::new()
                .with_balance(WALLET, 2_000_000_000)
                .failing_signatures(),
        );
        let dashboard = dashboard(rpc, 10);

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Completed);
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.formatted_balance(), "2.0000");
        assert!(snapshot.transactions.is_empty());
        assert!(!dashboard.is_refreshing());
    }

    #[tokio::test]
    async fn repeated_refresh_is_idempotent() {
        let rpc = Arc::new(three_transfers());
        let dashboard = dashboard(rpc, 10);

        dashboard.refresh().await;
        let first = dashboard.snapshot();
        dashboard.refresh().await;
        let second = dashboard.snapshot();

        assert_eq!(first.balance, second.balance);
        assert_eq!(first.transactions, second.transactions);
    }

    #[tokio::test]
    async fn concurrent_refresh_is_suppressed() {
        let rpc = Arc::new(three_transfers());
        let dashboard = dashboard(rpc.clone(), 10);
        let mut updates = dashboard.subscribe();

        let record = async {
            let mut seen = Vec::new();
            while let Ok(Ok(())) =
                tokio::time::timeout(Duration::from_millis(50), updates.changed()).await
            {
                seen.push(updates.borrow_and_update().is_refreshing);
            }
            seen
        };
        let (first, second, mut seen) =
            tokio::join!(dashboard.refresh(), dashboard.refresh(), record);

        assert_eq!(first, RefreshOutcome::Completed);
        assert_eq!(second, RefreshOutcome::AlreadyRunning);
        assert_eq!(rpc.balance_calls.load(Ordering::SeqCst), 1);
        assert_eq!(rpc.signature_calls.load(Ordering::SeqCst), 1);
        assert!(!dashboard.is_refreshing());

        // one start and one end for the whole burst
        seen.dedup();
        assert_eq!(seen, vec![true, false]);

        // the gate reopens once the cycle is over
        assert_eq!(dashboard.refresh().await, RefreshOutcome::Completed);
        assert_eq!(rpc.balance_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn results_for_a_replaced_address_are_discarded() {
        let rpc = Arc::new(three_transfers().with_balance_delay(Duration::from_millis(30)));
        let dashboard = dashboard(rpc, 10);

        let disconnect = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            dashboard.set_address(None);
        };
        let (outcome, _) = tokio::join!(dashboard.refresh(), disconnect);

        assert_eq!(outcome, RefreshOutcome::Completed);
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.address, None);
        assert_eq!(snapshot.balance, 0.0);
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.last_refreshed_at.is_none());
    }
}
