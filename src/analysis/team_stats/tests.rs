use super::*;
use crate::analysis::corpus::MatchRecord;
use crate::TossDecision;

fn game(season: u16, t1: &str, t2: &str, winner: Option<&str>, venue: &str) -> MatchRecord {
    MatchRecord {
        team1: t1.to_string(),
        team2: t2.to_string(),
        winner: winner.map(str::to_string),
        venue: Some(venue.to_string()),
        season: Season::new(season),
        toss_winner: None,
        toss_decision: None,
    }
}

fn corpus(matches: Vec<MatchRecord>) -> MatchCorpus {
    MatchCorpus::from_records(matches, Season::new(2025))
}

#[test]
fn test_two_team_win_rate() {
    let c = corpus(vec![
        game(2023, "A", "B", Some("A"), "X"),
        game(2023, "B", "A", Some("A"), "X"),
        game(2024, "A", "B", Some("B"), "Y"),
    ]);
    let stats = analyze(&c, "A").unwrap();
    assert_eq!(stats.matches, 3);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.win_rate, 66.67);
    assert_eq!(stats.toss, None);
}

#[test]
fn test_unknown_team_is_not_found() {
    let c = corpus(vec![game(2023, "A", "B", Some("A"), "X")]);
    match analyze(&c, "Nonexistent FC") {
        Err(IplError::TeamNotFound { name, available }) => {
            assert_eq!(name, "Nonexistent FC");
            assert_eq!(available, vec!["A".to_string(), "B".to_string()]);
        }
        other => panic!("expected TeamNotFound, got {:?}", other),
    }
}

#[test]
fn test_all_no_result_gives_zero_rate() {
    let c = corpus(vec![
        game(2023, "A", "B", None, "X"),
        game(2024, "A", "B", None, "X"),
    ]);
    let stats = analyze(&c, "A").unwrap();
    assert_eq!(stats.matches, 0);
    assert_eq!(stats.no_results, 2);
    assert_eq!(stats.win_rate, 0.0);
    assert!(stats.seasons.by_season.is_empty());
    assert_eq!(stats.seasons.average_win_rate, 0.0);
    assert!(stats.head_to_head.most_played.is_none());
}

#[test]
fn test_wins_plus_losses_equals_matches_for_all_teams() {
    let c = corpus(vec![
        game(2022, "A", "B", Some("A"), "X"),
        game(2022, "B", "C", Some("C"), "Y"),
        game(2023, "C", "A", None, "Z"),
        game(2023, "A", "C", Some("C"), "X"),
        game(2024, "B", "A", Some("B"), "Y"),
    ]);
    let all = analyze_all(&c);
    assert_eq!(all.len(), 3);
    for stats in all.values() {
        assert_eq!(stats.wins + stats.losses, stats.matches);
        assert!((0.0..=100.0).contains(&stats.win_rate));
    }
}

#[test]
fn test_partial_name_resolves() {
    let c = corpus(vec![game(
        2023,
        "Chennai Super Kings",
        "Mumbai Indians",
        Some("Mumbai Indians"),
        "Wankhede",
    )]);
    let stats = analyze(&c, "mumbai").unwrap();
    assert_eq!(stats.team, "Mumbai Indians");
}

#[test]
fn test_venue_extremes_respect_threshold() {
    let mut games = vec![
        // Two wins at a rarely used ground: 100% but under the threshold.
        game(2023, "A", "B", Some("A"), "Small"),
        game(2023, "A", "B", Some("A"), "Small"),
    ];
    for winner in ["A", "B", "B"] {
        games.push(game(2024, "A", "B", Some(winner), "Big"));
    }
    for winner in ["A", "A", "B"] {
        games.push(game(2024, "A", "B", Some(winner), "Home"));
    }
    let stats = analyze(&corpus(games), "A").unwrap();

    assert_eq!(stats.venues.venues.len(), 3);
    assert_eq!(stats.venues.best.as_ref().unwrap().venue, "Home");
    assert_eq!(stats.venues.worst.as_ref().unwrap().venue, "Big");
}

#[test]
fn test_head_to_head_extremes_and_most_played() {
    let mut games = Vec::new();
    for i in 0..5 {
        let winner = if i < 4 { "A" } else { "B" };
        games.push(game(2023, "A", "B", Some(winner), "X"));
    }
    for i in 0..6 {
        let winner = if i < 2 { "A" } else { "C" };
        games.push(game(2024, "A", "C", Some(winner), "X"));
    }
    // Only three games against D, unbeaten, so never an extreme.
    for _ in 0..3 {
        games.push(game(2024, "A", "D", Some("A"), "X"));
    }
    let stats = analyze(&corpus(games), "A").unwrap();
    let h2h = &stats.head_to_head;

    assert_eq!(h2h.records.len(), 3);
    assert_eq!(h2h.best.as_ref().unwrap().opponent, "B");
    assert_eq!(h2h.worst.as_ref().unwrap().opponent, "C");
    assert_eq!(h2h.most_played.as_ref().unwrap().opponent, "C");
    let vs_c = h2h.records.iter().find(|r| r.opponent == "C").unwrap();
    assert_eq!((vs_c.won, vs_c.lost), (2, 4));
}

#[test]
fn test_head_to_head_extremes_empty_below_threshold() {
    let c = corpus(vec![
        game(2023, "A", "B", Some("A"), "X"),
        game(2023, "A", "B", Some("B"), "X"),
    ]);
    let stats = analyze(&c, "A").unwrap();
    assert!(stats.head_to_head.best.is_none());
    assert!(stats.head_to_head.worst.is_none());
    assert_eq!(stats.head_to_head.most_played.as_ref().unwrap().played, 2);
}

#[test]
fn test_season_breakdown_and_estimate() {
    let c = corpus(vec![
        game(2022, "A", "B", Some("A"), "X"),
        game(2022, "A", "B", Some("A"), "X"),
        game(2023, "A", "B", Some("B"), "X"),
        game(2023, "A", "B", Some("A"), "X"),
        game(2024, "A", "B", Some("B"), "X"),
    ]);
    let stats = analyze(&c, "A").unwrap();
    let seasons = &stats.seasons;

    assert_eq!(seasons.by_season.len(), 3);
    assert_eq!(seasons.best.as_ref().unwrap().season, Season::new(2022));
    assert_eq!(seasons.worst.as_ref().unwrap().season, Season::new(2024));
    assert_eq!(seasons.average_win_rate, 50.0);
    // Only 2022 is strictly above 50%.
    assert_eq!(stats.playoff_appearances_estimate, 1);
}

#[test]
fn test_season_ties_pick_earliest() {
    let c = corpus(vec![
        game(2021, "A", "B", Some("A"), "X"),
        game(2022, "A", "B", Some("A"), "X"),
    ]);
    let stats = analyze(&c, "A").unwrap();
    assert_eq!(stats.seasons.best.as_ref().unwrap().season, Season::new(2021));
    assert_eq!(stats.seasons.worst.as_ref().unwrap().season, Season::new(2021));
}

#[test]
fn test_titles_use_normalised_champions() {
    let c = corpus(vec![game(
        2024,
        "Sunrisers Hyderabad",
        "Chennai Super Kings",
        Some("Chennai Super Kings"),
        "X",
    )]);
    let srh = analyze(&c, "Sunrisers Hyderabad").unwrap();
    // 2009 (as Deccan Chargers) and 2016.
    assert_eq!(srh.titles, 2);
    assert_eq!(
        srh.title_seasons,
        vec![Season::new(2009), Season::new(2016)]
    );
    let csk = analyze(&c, "CSK").unwrap();
    assert_eq!(csk.titles, 5);
}

#[test]
fn test_current_season_champion_is_added() {
    let c = corpus(vec![
        game(2025, "A", "B", Some("B"), "X"),
        game(2025, "A", "B", Some("B"), "X"),
        game(2025, "A", "B", Some("A"), "X"),
    ]);
    let table = champions(&c);
    assert_eq!(table.get(&Season::new(2025)).map(String::as_str), Some("B"));
    assert_eq!(analyze(&c, "B").unwrap().titles, 1);
}

#[test]
fn test_toss_record_when_toss_data_present() {
    let mut g1 = game(2024, "A", "B", Some("A"), "X");
    g1.toss_winner = Some("A".into());
    g1.toss_decision = Some(TossDecision::Bat);
    let mut g2 = game(2024, "A", "B", Some("B"), "X");
    g2.toss_winner = Some("A".into());
    g2.toss_decision = Some(TossDecision::Field);
    let mut g3 = game(2024, "A", "B", Some("A"), "X");
    g3.toss_winner = Some("B".into());
    g3.toss_decision = Some(TossDecision::Bat);

    let stats = analyze(&corpus(vec![g1, g2, g3]), "A").unwrap();
    assert_eq!(
        stats.toss,
        Some(TossRecord {
            tosses_won: 2,
            wins_after_toss_win: 1,
            losses_after_toss_win: 1,
        })
    );
}
