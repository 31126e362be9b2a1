//! Franchise squad commands.

use super::common::print_json;
use crate::config::AppConfig;
use crate::Result;

pub fn handle_list(config: &AppConfig, as_json: bool) -> Result<()> {
    let store = config.squad_store();
    let infos = store
        .franchises()
        .iter()
        .map(|f| store.franchise_info(f.id))
        .collect::<Result<Vec<_>>>()?;
    if as_json {
        return print_json(&serde_json::json!({ "teams": infos }));
    }
    for info in &infos {
        println!(
            "{:<5} {:<30} {:>3} players",
            info.franchise.id, info.franchise.name, info.player_count
        );
    }
    Ok(())
}

pub fn handle_show(config: &AppConfig, id: &str, role: Option<&str>, as_json: bool) -> Result<()> {
    let store = config.squad_store();
    let info = store.franchise_info(id)?;
    let players = store.players(id, role)?;
    if as_json {
        return print_json(&serde_json::json!({
            "team": info,
            "players": players,
        }));
    }
    println!("{} ({} shown)", info.franchise.name, players.len());
    for player in &players {
        println!("  {:<28} {}", player.name, player.role);
    }
    Ok(())
}

pub fn handle_roles(config: &AppConfig, as_json: bool) -> Result<()> {
    let roles = config.squad_store().roles();
    if as_json {
        return print_json(&serde_json::json!({ "roles": roles }));
    }
    for role in roles {
        println!("{}", role);
    }
    Ok(())
}

pub fn handle_normalize_roles(config: &AppConfig, as_json: bool) -> Result<()> {
    let updated = config.squad_store().normalize_roles()?;
    if as_json {
        return print_json(&serde_json::json!({ "updated_files": updated }));
    }
    println!("Normalised roles in {} squad files", updated);
    Ok(())
}
