//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ipl_stats::{
    cli::{Commands, IplStats, PointsTableCmd, SquadsCmd, StatsCmd},
    commands::{common::DataContext, playoffs, points_table, prediction, squads, stats, teams},
    config::AppConfig,
    logging::init_logging,
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() {
    let app = IplStats::parse();
    init_logging(app.verbose);
    let as_json = app.json;

    if let Err(e) = run(app).await {
        tracing::debug!(error = ?e, kind = e.kind().as_str(), "command failed");
        if as_json {
            println!("{}", e.to_json());
        } else {
            eprintln!("Error: {}", e);
            if let ipl_stats::IplError::TeamNotFound { available, .. } = &e {
                eprintln!("Available teams: {}", available.join(", "));
            }
        }
        std::process::exit(1);
    }
}

async fn run(app: IplStats) -> Result<()> {
    let config = AppConfig::from_env()?.with_overrides(app.data_dir, app.season);
    let json = app.json;

    match app.command {
        Commands::Teams => teams::handle_teams(&DataContext::load(config)?, json)?,

        Commands::Analyze { team } => {
            teams::handle_analyze(&DataContext::load(config)?, team.as_deref(), json)?
        }

        Commands::PredictPlayoffs { points_table } => playoffs::handle_predict_playoffs(
            &DataContext::load(config)?,
            points_table.as_deref(),
            json,
        )?,

        Commands::PointsTable { cmd } => match cmd {
            PointsTableCmd::Get { refresh } => points_table::handle_get(&config, refresh, json).await?,
            PointsTableCmd::Years => points_table::handle_years(&config, json)?,
            PointsTableCmd::All => points_table::handle_all(&config, json)?,
            PointsTableCmd::Refresh => points_table::handle_refresh(&config, json).await?,
            PointsTableCmd::Upload { file } => {
                points_table::handle_upload(&DataContext::load(config)?, &file, json)?
            }
            PointsTableCmd::Teams => points_table::handle_teams(json)?,
        },

        Commands::Stats { cmd } => match cmd {
            StatsCmd::Get { category, refresh } => {
                stats::handle_get(&config, category, refresh, json).await?
            }
            StatsCmd::Categories => stats::handle_categories(&config, json)?,
        },

        Commands::Squads { cmd } => match cmd {
            SquadsCmd::List => squads::handle_list(&config, json)?,
            SquadsCmd::Show { id, role } => squads::handle_show(&config, &id, role.as_deref(), json)?,
            SquadsCmd::Roles => squads::handle_roles(&config, json)?,
            SquadsCmd::NormalizeRoles => squads::handle_normalize_roles(&config, json)?,
        },

        Commands::Venues => teams::handle_venues(&DataContext::load(config)?, json)?,

        Commands::Venue { name } => teams::handle_venue(&DataContext::load(config)?, &name, json)?,

        Commands::PredictMatch { args } => {
            prediction::handle_predict_match(&DataContext::load(config)?, &args.into(), json)?
        }

        Commands::PredictLive { args } => {
            prediction::handle_predict_live(&config, &args.into(), json)?
        }
    }

    Ok(())
}
