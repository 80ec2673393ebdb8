use super::*;
use crate::config::FixedScoringConfig;
use crate::domain::listing::{ExtractSet, LocationRecord, PerformanceRecord, PriceRecord};
use crate::domain::snapshot::SnapshotOutput;
use crate::domain::types::CriticalityGroup;
use crate::engine::PipelineOrchestrator;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn perf(id: &str, revenue: f64, date: NaiveDate) -> PerformanceRecord {
    PerformanceRecord {
        listing_id: id.to_string(),
        group_name: Some("Studio".to_string()),
        blocked_days: Some(1),
        revenue_month: Some(revenue),
        target: Some(10000.0),
        occupancy_rate: Some(0.5),
        execution_date: Some(date),
        ..PerformanceRecord::default()
    }
}

fn price(id: &str) -> PriceRecord {
    PriceRecord {
        listing_id: id.to_string(),
        avg_price_occupied: Some(250.0),
        avg_price_available: Some(300.0),
        days_available_raw: Some(12),
    }
}

/// 三个房源: A/C 在观察名单内, B 为 critical
fn snapshot(date: NaiveDate) -> SnapshotOutput {
    let extracts = ExtractSet {
        performance: vec![
            perf("A", 9000.0, date),
            perf("B", 3000.0, date),
            perf("C", 10500.0, date),
        ],
        prices: vec![price("A"), price("B"), price("C")],
        locations: vec![LocationRecord {
            listing_id: "A".to_string(),
            city: Some("Florianópolis".to_string()),
            ..LocationRecord::default()
        }],
        min_prices: None,
    };
    PipelineOrchestrator::new(Arc::new(FixedScoringConfig::default())).run(&extracts)
}

/// 观察名单为空的快照
fn snapshot_without_watchlist(date: NaiveDate) -> SnapshotOutput {
    let extracts = ExtractSet {
        performance: vec![perf("B", 3000.0, date)],
        prices: vec![price("B")],
        locations: Vec::new(),
        min_prices: None,
    };
    PipelineOrchestrator::new(Arc::new(FixedScoringConfig::default())).run(&extracts)
}

#[test]
fn test_write_then_read_back_snapshot() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let output = snapshot(d(2025, 9, 25));

    let paths = repo.write_snapshot(&output, true).unwrap();
    assert_eq!(paths.enriched, repo.enriched_path(d(2025, 9, 25)));
    assert!(paths.watchlist.is_some());
    assert!(paths.summary.is_some());

    let enriched = repo.read_enriched(&paths.enriched).unwrap();
    assert_eq!(enriched, output.enriched);

    let watchlist = repo.read_watchlist(paths.watchlist.as_ref().unwrap()).unwrap();
    assert_eq!(watchlist, output.watchlist);
    let ids: Vec<&str> = watchlist.iter().map(|w| w.listing_id()).collect();
    assert_eq!(ids, vec!["A", "C"]);
}

#[test]
fn test_enriched_header_omits_min_price_when_extract_absent() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let paths = repo.write_snapshot(&snapshot(d(2025, 9, 25)), false).unwrap();

    let content = fs::read_to_string(&paths.enriched).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(header, enriched_columns(false).join(","));
    assert!(!header.contains("min_price_days"));
    assert!(paths.summary.is_none());
}

#[test]
fn test_empty_watchlist_writes_no_file_and_removes_stale_one() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let date = d(2025, 9, 25);

    repo.write_snapshot(&snapshot(date), false).unwrap();
    assert!(repo.watchlist_path(date).is_file());

    let paths = repo.write_snapshot(&snapshot_without_watchlist(date), false).unwrap();
    assert!(paths.watchlist.is_none());
    assert!(!repo.watchlist_path(date).exists());
    assert!(paths.enriched.is_file());

    // 回读: 文件不存在 = 空观察名单
    assert!(repo.read_watchlist(&repo.watchlist_path(date)).unwrap().is_empty());
}

#[test]
fn test_rewriting_same_input_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let date = d(2025, 9, 25);

    let first = repo.write_snapshot(&snapshot(date), true).unwrap();
    let enriched = fs::read(&first.enriched).unwrap();
    let watchlist = fs::read(first.watchlist.as_ref().unwrap()).unwrap();
    let summary = fs::read(first.summary.as_ref().unwrap()).unwrap();

    let second = repo.write_snapshot(&snapshot(date), true).unwrap();
    assert_eq!(fs::read(&second.enriched).unwrap(), enriched);
    assert_eq!(fs::read(second.watchlist.as_ref().unwrap()).unwrap(), watchlist);
    assert_eq!(fs::read(second.summary.as_ref().unwrap()).unwrap(), summary);
}

#[test]
fn test_catalog_lists_newest_first_and_pairs_files() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());

    repo.write_snapshot(&snapshot(d(2025, 9, 10)), false).unwrap();
    repo.write_snapshot(&snapshot_without_watchlist(d(2025, 9, 25)), true).unwrap();
    repo.write_snapshot(&snapshot(d(2025, 8, 31)), false).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let entries = repo.list_snapshots().unwrap();
    let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d(2025, 9, 25), d(2025, 9, 10), d(2025, 8, 31)]);

    assert!(entries[0].watchlist_path.is_none());
    assert!(entries[0].summary_path.is_some());
    assert_eq!(entries[1].watchlist_path, Some(repo.watchlist_path(d(2025, 9, 10))));
    assert!(entries[1].summary_path.is_none());
    assert_eq!(entries[0].label(), "25/09/2025");

    let latest = repo.latest_snapshot().unwrap().unwrap();
    assert_eq!(latest.date, d(2025, 9, 25));

    let (enriched, watchlist) = repo.read_snapshot(&entries[1]).unwrap();
    assert_eq!(enriched.len(), 3);
    assert_eq!(watchlist.len(), 2);
}

#[test]
fn test_catalog_of_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path().join("processed"));
    assert!(repo.list_snapshots().unwrap().is_empty());
    assert!(repo.latest_snapshot().unwrap().is_none());
}

#[test]
fn test_find_snapshot_reports_unknown_date() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    repo.write_snapshot(&snapshot(d(2025, 9, 10)), false).unwrap();

    assert_eq!(repo.find_snapshot(d(2025, 9, 10)).unwrap().date, d(2025, 9, 10));
    let err = repo.find_snapshot(d(2025, 9, 11)).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn test_watchlist_without_derived_columns_is_incompatible() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let path = repo.watchlist_path(d(2025, 9, 10));
    fs::write(
        &path,
        "listing_id,revenue_month,target,achievement_ratio,criticality_group,reference_date\n\
         A,9000,10000,0.9,watchlist,2025-09-10\n",
    )
    .unwrap();

    match repo.read_watchlist(&path).unwrap_err() {
        RepositoryError::Import(ImportError::SchemaIncompatibility {
            missing_columns, ..
        }) => {
            assert_eq!(missing_columns.len(), 8);
            assert!(missing_columns.contains(&"operational_status".to_string()));
            assert!(!missing_columns.contains(&"reference_date".to_string()));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_legacy_percentage_ratios_are_rescaled() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let path = repo.enriched_path(d(2025, 7, 15));
    fs::write(
        &path,
        "listing_id,revenue_month,target,achievement_ratio,criticality_group\n\
         A,9000,10000,90,berlinda\n\
         B,4000,10000,40,crítico\n",
    )
    .unwrap();

    let rows = repo.read_enriched(&path).unwrap();
    assert_eq!(rows[0].achievement_ratio, 0.9);
    assert_eq!(rows[1].achievement_ratio, 0.4);
    assert_eq!(rows[0].criticality_group, crate::domain::types::CriticalityGroup::Watchlist);
    assert_eq!(rows[1].criticality_group, crate::domain::types::CriticalityGroup::Critical);
    assert_eq!(rows[1].shortfall, 6000.0);
}

#[test]
fn test_underestimated_target_ratio_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let date = d(2025, 9, 10);
    let extracts = ExtractSet {
        performance: vec![perf("A", 9000.0, date), perf("Z", 60000.0, date)],
        prices: vec![price("A"), price("Z")],
        locations: Vec::new(),
        min_prices: None,
    };
    let output = PipelineOrchestrator::new(Arc::new(FixedScoringConfig::default())).run(&extracts);
    let paths = repo.write_snapshot(&output, false).unwrap();

    let enriched = repo.read_enriched(&paths.enriched).unwrap();
    let ratios: Vec<(f64, CriticalityGroup)> = enriched
        .iter()
        .map(|l| (l.achievement_ratio, l.criticality_group))
        .collect();
    assert_eq!(
        ratios,
        vec![
            (0.9, CriticalityGroup::Watchlist),
            (6.0, CriticalityGroup::TargetUnderestimated)
        ]
    );

    let watchlist = repo.read_watchlist(paths.watchlist.as_deref().unwrap()).unwrap();
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].enriched.achievement_ratio, 0.9);
}

#[test]
fn test_legacy_repair_tolerates_rounded_boundary_rows() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let path = repo.enriched_path(d(2025, 9, 10));
    // 1.1049 取整后为 1.1, 已存分档 ok; 按原值分档为 watchlist, 但不应触发换算
    fs::write(
        &path,
        "listing_id,revenue_month,target,achievement_ratio,criticality_group\n\
         A,11049,10000,1.1,ok\n\
         B,9000,10000,0.9,watchlist\n\
         C,3000,10000,0.3,critical\n",
    )
    .unwrap();

    let rows = repo.read_enriched(&path).unwrap();
    let ratios: Vec<f64> = rows.iter().map(|l| l.achievement_ratio).collect();
    assert_eq!(ratios, vec![1.1, 0.9, 0.3]);
}

#[test]
fn test_unknown_group_tag_is_a_conversion_error() {
    let dir = TempDir::new().unwrap();
    let repo = SnapshotRepository::new(dir.path());
    let path = repo.enriched_path(d(2025, 7, 15));
    fs::write(
        &path,
        "listing_id,revenue_month,target,achievement_ratio,criticality_group\nA,9000,10000,0.9,great\n",
    )
    .unwrap();

    let err = repo.read_enriched(&path).unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Import(ImportError::TypeConversionError { row: 1, .. })
    ));
}
