//! Integration tests for the on-disk stores

mod common;

use ipl_stats::storage::{PointsRow, PointsTableStore, SquadStore, StatCache, StatTable};
use ipl_stats::{ErrorKind, IplError, Season, StatCategory};
use std::fs;

#[test]
fn test_points_table_import_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = PointsTableStore::new(dir.path().join("points_tables"));
    let upload = dir.path().join("standings.csv");
    fs::write(&upload, common::POINTS_2025).unwrap();

    let rows = store.import(Season::new(2025), &upload).unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].team, "Punjab Kings");
    assert_eq!(rows[0].nrr, 0.372);

    store
        .put(Season::new(2024), &[PointsRow::new("KKR", 14, 9, 3, 1.428, 20)])
        .unwrap();
    assert_eq!(
        store.available_seasons().unwrap(),
        vec![Season::new(2025), Season::new(2024)]
    );

    let all = store.all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].1[0].team, "Kolkata Knight Riders");
}

#[test]
fn test_points_table_rejects_impossible_rows() {
    let dir = tempfile::tempdir().unwrap();
    let store = PointsTableStore::new(dir.path());
    let upload = dir.path().join("bad.csv");
    fs::write(&upload, "Team,Played,Won,Lost,NRR,Points\nMI,5,4,3,+0.1,8\n").unwrap();

    let err = store.import(Season::new(2025), &upload).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataValidation);
    assert!(store.get(Season::new(2025)).unwrap().is_none());
}

#[test]
fn test_points_table_put_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = PointsTableStore::new(dir.path());
    store
        .put(Season::new(2025), &[PointsRow::new("GT", 1, 1, 0, 0.5, 2)])
        .unwrap();
    store
        .put(Season::new(2025), &[PointsRow::new("CSK", 1, 0, 1, -0.5, 0)])
        .unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["IPL_Points_Table_2025.csv".to_string()]);

    let rows = store.get(Season::new(2025)).unwrap().unwrap();
    assert_eq!(rows[0].team, "Chennai Super Kings");
}

#[test]
fn test_stat_cache_round_trip_under_season_folder() {
    let dir = tempfile::tempdir().unwrap();
    let cache = StatCache::new(dir.path());
    let table = StatTable::new(
        vec!["POS".into(), "Player".into(), "Runs".into()],
        vec![
            vec!["1".into(), "Sai Sudharsan".into(), "759".into()],
            vec!["2".into(), "Suryakumar Yadav".into(), "717".into()],
        ],
    );

    let path = cache.put(StatCategory::OrangeCap, Season::new(2025), &table).unwrap();
    assert!(path.starts_with(dir.path().join("2025")));
    assert!(cache.exists(StatCategory::OrangeCap, Season::new(2025)));
    assert!(!cache.exists(StatCategory::OrangeCap, Season::new(2024)));

    let loaded = cache.get(StatCategory::OrangeCap, Season::new(2025)).unwrap();
    assert_eq!(loaded, table);
    assert_eq!(loaded.to_records()[1]["Player"], "Suryakumar Yadav");
}

#[test]
fn test_stat_cache_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let cache = StatCache::new(dir.path());
    let err = cache.get(StatCategory::GreenDotBalls, Season::new(2025)).unwrap_err();
    assert!(matches!(err, IplError::MissingCache { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_squads_filter_and_normalise_roles() {
    let dir = tempfile::tempdir().unwrap();
    let store = SquadStore::new(dir.path());
    fs::write(
        dir.path().join("Mumbai_Indians.csv"),
        "Player Name,Image URL,Detail Page URL,role\n\
         Hardik Pandya,img1,url1,Allrounder\n\
         Jasprit Bumrah,img2,url2,Bowler\n\
         Will Jacks,img3,url3,All Rounder\n",
    )
    .unwrap();

    assert_eq!(store.franchise_info("MI").unwrap().player_count, 3);
    assert_eq!(store.franchise_info("csk").unwrap().player_count, 0);

    // Role spellings are reconciled on read, before any rewrite.
    assert_eq!(store.players("mi", Some("Allrounder")).unwrap().len(), 2);

    assert_eq!(store.normalize_roles().unwrap(), 1);
    let rewritten = fs::read_to_string(dir.path().join("Mumbai_Indians.csv")).unwrap();
    assert!(!rewritten.contains("Allrounder"));
    assert!(!rewritten.contains("All Rounder"));
    let rounders = store.players("mi", Some("All-Rounder")).unwrap();
    assert_eq!(rounders.len(), 2);
    assert_eq!(store.players("mi", Some("All")).unwrap().len(), 3);
    assert_eq!(store.players("mi", None).unwrap().len(), 3);
}

#[test]
fn test_squads_unknown_franchise() {
    let dir = tempfile::tempdir().unwrap();
    let store = SquadStore::new(dir.path());
    let err = store.players("xyz", None).unwrap_err();
    assert!(matches!(err, IplError::UnknownFranchise { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
