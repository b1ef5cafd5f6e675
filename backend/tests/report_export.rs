//! Export artifacts written through the directory archive.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use stock_assistant::domain::ports::StockLedger;
use stock_assistant::domain::{StockExporter, UserId};
use stock_assistant::outbound::files::DirectoryReportArchive;
use stock_assistant::outbound::memory::InMemoryStockLedger;

#[tokio::test]
async fn new_export_replaces_a_stale_artifact() {
    let reports = tempfile::tempdir().expect("tempdir");
    let stale = reports.path().join("stock_12.txt");
    std::fs::write(&stale, "viejo: 99\notro: 1\n").expect("seed");

    let ledger = Arc::new(InMemoryStockLedger::new());
    ledger
        .upsert(UserId::new(12), "pan", 5)
        .await
        .expect("upsert");
    let exporter = StockExporter::new(
        ledger,
        Arc::new(DirectoryReportArchive::open(reports.path()).expect("archive opens")),
    );

    let report = exporter
        .export(UserId::new(12))
        .await
        .expect("export succeeds")
        .expect("rows exist");

    let on_disk = std::fs::read_to_string(&stale).expect("artifact exists");
    assert_eq!(on_disk, "pan: 5\n");
    assert_eq!(report.attachment.bytes, on_disk.into_bytes());

    exporter.discard(&report).await.expect("discard succeeds");
    assert!(!stale.exists());
}

#[tokio::test]
async fn users_get_separate_artifacts() {
    let reports = tempfile::tempdir().expect("tempdir");
    let ledger = Arc::new(InMemoryStockLedger::new());
    ledger.upsert(UserId::new(1), "pan", 1).await.expect("upsert");
    ledger.upsert(UserId::new(2), "té", 2).await.expect("upsert");
    let exporter = StockExporter::new(
        ledger,
        Arc::new(DirectoryReportArchive::open(reports.path()).expect("archive opens")),
    );

    let first = exporter.export(UserId::new(1)).await.expect("export").expect("rows");
    let second = exporter.export(UserId::new(2)).await.expect("export").expect("rows");

    assert_eq!(first.attachment.file_name, "stock_1.txt");
    assert_eq!(second.attachment.file_name, "stock_2.txt");
    assert!(reports.path().join("stock_1.txt").exists());
    assert!(reports.path().join("stock_2.txt").exists());
}
