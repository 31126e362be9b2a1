//! Franchise squad lists.
//!
//! One CSV per franchise under `squads/`, named after the franchise with
//! spaces replaced by underscores.

use crate::core::replace_csv;
use crate::error::{IplError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SQUAD_COLUMNS: [&str; 4] = ["Player Name", "Image URL", "Detail Page URL", "role"];

/// Role filter value that matches every player.
pub const ALL_ROLES: &str = "All";

pub const STANDARD_ROLES: [&str; 5] = [ALL_ROLES, "All-Rounder", "Batsman", "Bowler", "Wicketkeeper"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Franchise {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

impl Franchise {
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name.replace(' ', "_"))
    }
}

pub const FRANCHISES: [Franchise; 10] = [
    Franchise { id: "csk", name: "Chennai Super Kings", color: "#FFFF3C" },
    Franchise { id: "dc", name: "Delhi Capitals", color: "#0078BC" },
    Franchise { id: "gt", name: "Gujarat Titans", color: "#1C1C1C" },
    Franchise { id: "kkr", name: "Kolkata Knight Riders", color: "#3A225D" },
    Franchise { id: "lsg", name: "Lucknow Super Giants", color: "#A72056" },
    Franchise { id: "mi", name: "Mumbai Indians", color: "#004BA0" },
    Franchise { id: "pbks", name: "Punjab Kings", color: "#ED1C24" },
    Franchise { id: "rr", name: "Rajasthan Royals", color: "#FF69B4" },
    Franchise { id: "rcb", name: "Royal Challengers Bengaluru", color: "#0080FF" },
    Franchise { id: "srh", name: "Sunrisers Hyderabad", color: "#F7A721" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FranchiseInfo {
    #[serde(flatten)]
    pub franchise: Franchise,
    pub player_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "Player Name")]
    pub name: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "Detail Page URL")]
    pub detail_url: String,
    pub role: String,
}

/// Canonical spelling of a role cell.
pub fn normalize_role(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "Allrounder" | "All Rounder" => "All-Rounder".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct SquadStore {
    dir: PathBuf,
}

impl SquadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn franchises(&self) -> &'static [Franchise] {
        &FRANCHISES
    }

    pub fn franchise(&self, id: &str) -> Result<&'static Franchise> {
        let id = id.trim().to_lowercase();
        FRANCHISES
            .iter()
            .find(|f| f.id == id)
            .ok_or(IplError::UnknownFranchise { id })
    }

    fn path_for(&self, franchise: &Franchise) -> PathBuf {
        self.dir.join(franchise.file_name())
    }

    /// Franchise details with its squad size; 0 when the file is unreadable.
    pub fn franchise_info(&self, id: &str) -> Result<FranchiseInfo> {
        let franchise = self.franchise(id)?;
        let path = self.path_for(franchise);
        let player_count = match count_rows(&path) {
            Ok(n) => n,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "squad file unreadable");
                0
            }
        };
        Ok(FranchiseInfo {
            franchise: *franchise,
            player_count,
        })
    }

    /// Players of a franchise, optionally restricted to one role.
    pub fn players(&self, id: &str, role: Option<&str>) -> Result<Vec<Player>> {
        let franchise = self.franchise(id)?;
        let path = self.path_for(franchise);
        let players = read_players(&path)?;

        let wanted = role
            .map(normalize_role)
            .filter(|r| !r.eq_ignore_ascii_case(ALL_ROLES));
        Ok(players
            .into_iter()
            .filter(|p| wanted.as_deref().map_or(true, |r| p.role == r))
            .collect())
    }

    pub fn roles(&self) -> &'static [&'static str] {
        &STANDARD_ROLES
    }

    /// Rewrite every squad file with canonical role names. Returns the
    /// number of files updated.
    pub fn normalize_roles(&self) -> Result<usize> {
        let mut updated = 0;
        for franchise in &FRANCHISES {
            let path = self.path_for(franchise);
            let players = match read_players(&path) {
                Ok(players) => players,
                Err(e) => {
                    warn!(team = franchise.name, error = %e, "skipping squad file");
                    continue;
                }
            };
            write_players(&path, &players)?;
            info!(team = franchise.name, players = players.len(), "normalised roles");
            updated += 1;
        }
        Ok(updated)
    }
}

fn count_rows(path: &Path) -> Result<usize> {
    let mut rdr = csv::Reader::from_path(path)?;
    Ok(rdr.records().filter(|r| r.is_ok()).count())
}

fn read_players(path: &Path) -> Result<Vec<Player>> {
    if !path.exists() {
        return Err(IplError::MissingCache {
            path: path.to_path_buf(),
        });
    }
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();
    for column in SQUAD_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(IplError::MissingColumn {
                table: path.display().to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut players = Vec::new();
    for record in rdr.deserialize::<Player>() {
        let mut player = record?;
        player.role = normalize_role(&player.role);
        players.push(player);
    }
    Ok(players)
}

fn write_players(path: &Path, players: &[Player]) -> Result<()> {
    replace_csv(path, |wtr| {
        if players.is_empty() {
            wtr.write_record(SQUAD_COLUMNS)?;
        }
        for player in players {
            wtr.serialize(player)?;
        }
        Ok(())
    })
}
