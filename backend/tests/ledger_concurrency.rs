//! Concurrent upserts against the in-memory ledger, wrapped in the timeout
//! decorator the assistant uses.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;
use std::time::Duration;

use stock_assistant::domain::ports::StockLedger;
use stock_assistant::domain::{StockLine, TimedStockLedger, UpsertKind, UserId};
use stock_assistant::outbound::memory::InMemoryStockLedger;

const WRITERS: u32 = 64;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_lose_no_increments() {
    let ledger: Arc<dyn StockLedger> = Arc::new(TimedStockLedger::new(
        Arc::new(InMemoryStockLedger::new()),
        Duration::from_secs(5),
    ));
    let user = UserId::new(99);

    let handles: Vec<_> = (1..=WRITERS)
        .map(|delta| {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move { ledger.upsert(user, "pan", delta).await })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        let outcome = handle.await.expect("task joins").expect("upsert succeeds");
        if outcome.kind == UpsertKind::Inserted {
            inserted += 1;
        }
    }

    let expected = u64::from(WRITERS * (WRITERS + 1) / 2);
    assert_eq!(inserted, 1, "exactly one writer creates the row");
    assert_eq!(
        ledger.list(user).await.expect("list"),
        vec![StockLine::new("pan", expected)]
    );
}
