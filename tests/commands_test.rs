//! Integration tests for command handlers

mod common;

use ipl_stats::analysis::playoffs::{PredictionMethod, Scenario};
use ipl_stats::commands::common::DataContext;
use ipl_stats::commands::{playoffs, points_table, stats, teams};
use ipl_stats::{ErrorKind, IplError, Season, StatCategory};
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serve `body` to a single request and return a feed URL template for it.
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}/{{resource}}/{{season}}", addr)
}

#[test]
fn test_final_standings_drive_playoff_prediction() {
    let (_dir, config) = common::data_dir();
    common::write(&config.points_store().path_for(Season::new(2025)), common::POINTS_2025);
    let ctx = DataContext::load(config).unwrap();

    let prediction = playoffs::playoff_prediction(&ctx, None).unwrap();
    assert_eq!(prediction.method, PredictionMethod::PointsTable);
    assert_eq!(
        prediction.qualifiers,
        vec![
            "Punjab Kings",
            "Royal Challengers Bengaluru",
            "Gujarat Titans",
            "Mumbai Indians"
        ]
    );
    // Fifth place has no games left, so its points are the bar.
    assert_eq!(prediction.threshold_points, Some(15));
    for scenario in prediction.scenarios.iter().take(4) {
        assert_eq!(scenario.scenario, Scenario::AlreadyQualified);
    }
    let csk = prediction
        .scenarios
        .iter()
        .find(|s| s.team == "Chennai Super Kings")
        .unwrap();
    assert_eq!(csk.scenario, Scenario::MathematicallyEliminated);
}

#[test]
fn test_unreadable_snapshot_falls_back_with_note() {
    let (_dir, config) = common::data_dir();
    common::write(
        &config.points_store().path_for(Season::new(2025)),
        "Team,Played,Won\nMI,1,1\n",
    );
    let ctx = DataContext::load(config).unwrap();

    let prediction = playoffs::playoff_prediction(&ctx, None).unwrap();
    assert_eq!(prediction.method, PredictionMethod::Historical);
    assert!(prediction.note.unwrap().contains("could not be read"));
    assert!(prediction.threshold_points.is_none());
    assert!(prediction.scenarios.is_empty());
}

#[test]
fn test_explicit_points_table_file_is_used() {
    let (dir, config) = common::data_dir();
    let file = dir.path().join("mid_season.csv");
    fs::write(
        &file,
        "Team,Played,Won,Lost,NRR,Points\n\
         RCB,8,6,2,+0.5,12\n\
         MI,8,5,3,+0.4,10\n\
         CSK,8,1,7,-1.0,2\n",
    )
    .unwrap();
    let ctx = DataContext::load(config).unwrap();

    let prediction = playoffs::playoff_prediction(&ctx, Some(&file)).unwrap();
    assert_eq!(prediction.method, PredictionMethod::PointsTable);
    assert_eq!(prediction.qualifiers[0], "Royal Challengers Bengaluru");
    // Only three teams have standings, so nothing fixes the bar.
    assert!(prediction.threshold_points.is_none());
}

#[test]
fn test_venues_listed_from_corpus() {
    let (_dir, config) = common::data_dir();
    let ctx = DataContext::load(config).unwrap();
    let list = teams::venue_list(&ctx);
    assert!(list.venues.contains(&"Narendra Modi Stadium".to_string()));
    assert!(list.venues.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_points_table_refresh_from_feed() {
    let (_dir, mut config) = common::data_dir();
    config.feed_url = Some(serve_once(
        r#"[{"Team":"GT","Played":"2","Won":"2","Lost":"0","NRR":"+1.1","Points":"4"},
            {"Team":"SRH","Played":"2","Won":"0","Lost":"2","NRR":"-1.1","Points":"0"}]"#,
    ));

    let view = points_table::points_table(&config, true).await.unwrap();
    assert_eq!(view.source, points_table::TableSource::Live);
    assert_eq!(view.data[0].team, "Gujarat Titans");

    let cached = config.points_store().get(Season::new(2025)).unwrap().unwrap();
    assert_eq!(cached, view.data);
}

#[tokio::test]
async fn test_stats_refresh_reports_upstream_failure() {
    let (_dir, mut config) = common::data_dir();
    config.feed_url = Some(serve_once("<html>maintenance</html>"));

    let err = stats::leaderboard(&config, StatCategory::OrangeCap, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    assert!(!config.stat_cache().exists(StatCategory::OrangeCap, Season::new(2025)));
}

#[test]
fn test_error_json_lists_available_teams() {
    let (_dir, config) = common::data_dir();
    let ctx = DataContext::load(config).unwrap();
    let err = ipl_stats::analysis::analyze(&ctx.corpus, "Nonexistent FC").unwrap_err();
    assert!(matches!(err, IplError::TeamNotFound { .. }));

    let json = err.to_json();
    assert_eq!(json["kind"], "not_found");
    assert!(json["available_teams"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t == "Chennai Super Kings"));
}
