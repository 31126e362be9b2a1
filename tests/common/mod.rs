//! Fixture data directories shared by the integration tests.

#![allow(dead_code)]

use ipl_stats::config::AppConfig;
use ipl_stats::Season;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const HISTORICAL: &str = "\
id,season,city,date,team1,team2,toss_winner,toss_decision,result,winner,venue
1,2008,Bangalore,2008-04-18,Royal Challengers Bangalore,Kolkata Knight Riders,Royal Challengers Bangalore,field,runs,Kolkata Knight Riders,M Chinnaswamy Stadium
2,2008,Chandigarh,2008-04-19,Kings XI Punjab,Chennai Super Kings,Chennai Super Kings,bat,runs,Chennai Super Kings,Punjab Cricket Association Stadium
3,2010,Mumbai,2010-04-25,Chennai Super Kings,Mumbai Indians,Chennai Super Kings,bat,runs,Chennai Super Kings,Dr DY Patil Sports Academy
4,2016,Bangalore,2016-05-29,Sunrisers Hyderabad,Royal Challengers Bangalore,Sunrisers Hyderabad,bat,runs,Sunrisers Hyderabad,M Chinnaswamy Stadium
5,2019,Hyderabad,2019-05-12,Mumbai Indians,Chennai Super Kings,Mumbai Indians,bat,runs,Mumbai Indians,Rajiv Gandhi International Stadium
6,2022,Ahmedabad,2022-05-29,Rajasthan Royals,Gujarat Titans,Rajasthan Royals,bat,wickets,Gujarat Titans,Narendra Modi Stadium
7,2023,Ahmedabad,2023-05-29,Chennai Super Kings,Gujarat Titans,Chennai Super Kings,field,wickets,Chennai Super Kings,Narendra Modi Stadium
8,2023,Lucknow,2023-05-03,Lucknow Super Giants,Chennai Super Kings,Chennai Super Kings,field,no result,No Result,Ekana Cricket Stadium
9,2024,Chennai,2024-05-26,Sunrisers Hyderabad,Kolkata Knight Riders,Sunrisers Hyderabad,bat,wickets,Kolkata Knight Riders,MA Chidambaram Stadium
10,2024,Delhi,2024-04-20,Delhi Capitals,Sunrisers Hyderabad,Delhi Capitals,field,runs,Sunrisers Hyderabad,Arun Jaitley Stadium
";

pub const CURRENT: &str = "\
MatchNo,Date,Team1,Team2,Venue,TossWinner,TossDecision,Winner,Status
1,2025-03-22,KKR,RCB,Eden Gardens,RCB,field,RCB,Completed
2,2025-03-23,SRH,RR,Rajiv Gandhi International Stadium,RR,field,SRH,Completed
3,2025-06-03,RCB,PBKS,Narendra Modi Stadium,PBKS,field,RCB,Completed
4,2025-06-05,MI,DC,Wankhede Stadium,,,,Scheduled
";

pub const POINTS_2025: &str = "\
Team,Played,Won,Lost,NRR,Points
PBKS,14,9,4,+0.372,19
RCB,14,9,4,+0.301,19
GT,14,9,5,+0.254,18
MI,14,8,6,+1.142,16
DC,14,7,6,+0.011,15
SRH,14,6,7,-0.241,13
LSG,14,6,8,-0.376,12
KKR,14,5,7,-0.305,12
RR,14,4,10,-0.549,8
CSK,14,4,10,-0.647,8
";

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().expect("fixture path has a parent")).unwrap();
    fs::write(path, contents).unwrap();
}

/// A data directory holding both match tables for the 2025 season.
pub fn data_dir() -> (TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        season: Season::new(2025),
        feed_url: None,
        adjustments_path: None,
    };
    write(&config.historical_matches_path(), HISTORICAL);
    write(&config.current_season_matches_path(), CURRENT);
    (dir, config)
}
