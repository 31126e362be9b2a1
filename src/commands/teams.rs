//! Team listing, team analysis and venue commands.

use super::common::{print_json, DataContext};
use crate::analysis::team_stats::{analyze, analyze_all, TeamStats};
use crate::analysis::venues::{venue_stats, venues, VenueReport};
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct TeamList {
    pub teams: Vec<String>,
    pub count: usize,
}

pub fn team_list(ctx: &DataContext) -> TeamList {
    let teams = ctx.corpus.teams();
    TeamList {
        count: teams.len(),
        teams,
    }
}

pub fn handle_teams(ctx: &DataContext, as_json: bool) -> Result<()> {
    let list = team_list(ctx);
    if as_json {
        return print_json(&list);
    }
    println!("{} teams:", list.count);
    for team in &list.teams {
        println!("  {}", team);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct AllTeamStats {
    pub teams: BTreeMap<String, TeamStats>,
    pub count: usize,
}

pub fn handle_analyze(ctx: &DataContext, team: Option<&str>, as_json: bool) -> Result<()> {
    match team {
        Some(name) => {
            let stats = analyze(&ctx.corpus, name)?;
            if as_json {
                print_json(&stats)
            } else {
                print_team_stats(&stats);
                Ok(())
            }
        }
        None => {
            let teams = analyze_all(&ctx.corpus);
            if as_json {
                return print_json(&AllTeamStats {
                    count: teams.len(),
                    teams,
                });
            }
            for stats in teams.values() {
                print_team_stats(stats);
                println!();
            }
            Ok(())
        }
    }
}

/// The playoff count is a win-rate heuristic and is always labelled as one.
pub fn playoff_estimate_line(stats: &TeamStats) -> String {
    format!(
        "Playoff appearances (estimate, seasons above 50%): {}",
        stats.playoff_appearances_estimate
    )
}

fn print_team_stats(stats: &TeamStats) {
    println!("{}", stats.team);
    println!(
        "  Played {} (decided)  Won {}  Lost {}  No result {}  Win rate {:.2}%",
        stats.matches, stats.wins, stats.losses, stats.no_results, stats.win_rate
    );
    if stats.titles > 0 {
        let seasons: Vec<String> = stats.title_seasons.iter().map(|s| s.to_string()).collect();
        println!("  Titles: {} ({})", stats.titles, seasons.join(", "));
    } else {
        println!("  Titles: 0");
    }
    println!("  {}", playoff_estimate_line(stats));
    if let Some(toss) = &stats.toss {
        println!(
            "  Tosses won {}: {} wins, {} losses after winning the toss",
            toss.tosses_won, toss.wins_after_toss_win, toss.losses_after_toss_win
        );
    }
    if let (Some(best), Some(worst)) = (&stats.seasons.best, &stats.seasons.worst) {
        println!(
            "  Best season {} ({:.2}%), worst season {} ({:.2}%)",
            best.season, best.win_rate, worst.season, worst.win_rate
        );
    }
    if let Some(best) = &stats.venues.best {
        println!("  Best venue: {} ({:.2}% of {})", best.venue, best.win_rate, best.played);
    }
    if let Some(worst) = &stats.venues.worst {
        println!("  Worst venue: {} ({:.2}% of {})", worst.venue, worst.win_rate, worst.played);
    }
    if let Some(best) = &stats.head_to_head.best {
        println!("  Best against: {} ({:.2}%)", best.opponent, best.win_rate);
    }
    if let Some(worst) = &stats.head_to_head.worst {
        println!("  Worst against: {} ({:.2}%)", worst.opponent, worst.win_rate);
    }
}

#[derive(Debug, Serialize)]
pub struct VenueList {
    pub venues: Vec<String>,
}

pub fn venue_list(ctx: &DataContext) -> VenueList {
    VenueList {
        venues: venues(&ctx.corpus),
    }
}

pub fn handle_venues(ctx: &DataContext, as_json: bool) -> Result<()> {
    let list = venue_list(ctx);
    if as_json {
        return print_json(&list);
    }
    for venue in &list.venues {
        println!("{}", venue);
    }
    Ok(())
}

pub fn handle_venue(ctx: &DataContext, name: &str, as_json: bool) -> Result<()> {
    let report: VenueReport = venue_stats(&ctx.corpus, name);
    if as_json {
        return print_json(&report);
    }
    if report.team_stats.is_empty() {
        println!("No decided matches found at {}", report.venue);
        return Ok(());
    }
    println!("{} ({} decided matches)", report.venue, report.matches);
    for (team, record) in &report.team_stats {
        println!(
            "  {:<30} played {:>3}  won {:>3}  {:>6.2}%",
            team, record.played, record.wins, record.win_rate
        );
    }
    Ok(())
}
