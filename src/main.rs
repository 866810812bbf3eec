/// `dwlr` command-line front end.
///
/// Loads configuration, initializes logging, generates the station dataset
/// once, then runs a single subcommand against it. Reports go to stdout;
/// log lines go to stderr.

use std::path::PathBuf;
use std::process;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use dwlr_dashboard::config::{self, DashboardConfig};
use dwlr_dashboard::dashboards::community::{CommunityView, LeaderProfile};
use dwlr_dashboard::dashboards::policy::PolicyView;
use dwlr_dashboard::dashboards::researcher::ResearcherWorkspace;
use dwlr_dashboard::dashboards::{group_thousands, Role};
use dwlr_dashboard::export::{DateRange, ExportFormat};
use dwlr_dashboard::filter::{filter_stations, StationQuery, StatusFilter};
use dwlr_dashboard::generator::StationSet;
use dwlr_dashboard::logging::{self, Component};
use dwlr_dashboard::model::StationStatus;
use dwlr_dashboard::session::{FileStore, Session, SIGNUP_SUCCESS_MESSAGE};
use dwlr_dashboard::statistics;

#[derive(Parser, Debug)]
#[command(name = "dwlr", version, about = "Groundwater Guardians: India DWLR network dashboard")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible dataset (overrides config and DWLR_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Data(DataCommand),
    #[command(flatten)]
    Account(AccountCommand),
}

/// Commands that read the generated station dataset.
#[derive(Subcommand, Debug)]
enum DataCommand {
    /// Network-wide statistics
    Stats,
    /// Search and filter stations
    Stations {
        #[arg(long, default_value = "")]
        search: String,
        /// all, good, moderate or critical
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Maximum rows (defaults to the configured page size)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render a role dashboard
    Dashboard {
        /// policy, researcher or community
        role: Role,
    },
    /// Export selected stations to a file
    Export {
        /// Station ids to export
        #[arg(long, num_args = 1.., required = true)]
        ids: Vec<String>,
        /// csv or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Output directory (defaults to the configured export_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Start a community recharge project
    Activity {
        /// Activity id, e.g. ACT001
        id: String,
    },
}

/// Commands against the local account store.
#[derive(Subcommand, Debug)]
enum AccountCommand {
    /// Register a local account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with a registered account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

fn main() {
    let cli = Cli::parse();

    let mut cfg = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Logger is not up yet.
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }

    // validate() has already checked the level parses.
    let level = cfg.logging.min_level().unwrap_or(logging::LogLevel::Info);
    logging::init_logger(level, cfg.logging.file.as_deref(), cfg.logging.timestamps);

    if let Err(message) = run(cli.command, &cfg) {
        logging::error(Component::Cli, None, &message);
        process::exit(1);
    }
}

fn run(command: Command, cfg: &DashboardConfig) -> Result<(), String> {
    match command {
        Command::Account(account) => run_account_command(account, cfg),
        Command::Data(data) => {
            let set = StationSet::from_config(cfg, Utc::now());
            run_data_command(data, &set, cfg)
        }
    }
}

fn run_account_command(command: AccountCommand, cfg: &DashboardConfig) -> Result<(), String> {
    let mut session = Session::new(FileStore::new(cfg.storage_dir.clone()));

    match command {
        AccountCommand::Signup { username, email, password } => {
            session.signup(&username, &email, &password).map_err(|e| e.to_string())?;
            println!("{}", SIGNUP_SUCCESS_MESSAGE);
        }
        AccountCommand::Login { email, password } => {
            let user = session.login(&email, &password).map_err(|e| e.to_string())?;
            println!("Signed in as {} <{}>", user.username, user.email);
        }
        AccountCommand::Logout => {
            session.logout().map_err(|e| e.to_string())?;
            println!("Signed out.");
        }
        AccountCommand::Whoami => match session.current_user().map_err(|e| e.to_string())? {
            Some(user) => println!("{} <{}>", user.username, user.email),
            None => println!("Not signed in."),
        },
    }
    Ok(())
}

fn run_data_command(
    command: DataCommand,
    set: &StationSet,
    cfg: &DashboardConfig,
) -> Result<(), String> {
    match command {
        DataCommand::Stats => print_stats(set),

        DataCommand::Stations { search, status, limit } => {
            let query = StationQuery::new(search, status);
            let rows = filter_stations(set.all(), &query, limit.unwrap_or(cfg.page_size));
            for station in &rows {
                println!(
                    "{:<9} {:<24} {:<16} {:<15} {:>5}m {:<9} {}",
                    station.id,
                    station.location,
                    station.district,
                    station.state,
                    station.water_level,
                    station.status,
                    station.trend.arrow()
                );
            }
            logging::debug(
                Component::Cli,
                None,
                &format!("{} rows for search '{}' status {}", rows.len(), query.search, query.status),
            );
        }

        DataCommand::Dashboard { role } => {
            let text = match role {
                Role::PolicyMaker => PolicyView::build(set, cfg.map_marker_limit).render(),
                Role::Researcher => {
                    ResearcherWorkspace::with_page_size(cfg.page_size).render(set.all())
                }
                Role::CommunityLeader => {
                    CommunityView::build(set, cfg.nearby_limit, LeaderProfile::default()).render()
                }
            };
            print!("{}", text);
        }

        DataCommand::Export { ids, format, start, end, out } => {
            let defaults = DateRange::default();
            let mut workspace = ResearcherWorkspace::with_page_size(cfg.page_size);
            workspace.format = format;
            workspace.range = DateRange {
                start: start.unwrap_or(defaults.start),
                end: end.unwrap_or(defaults.end),
            };
            workspace.select_ids(set.all(), ids);

            let dir = out.unwrap_or_else(|| cfg.export_dir.clone());
            let path = workspace
                .export_to_dir(set.all(), &dir)
                .map_err(|e| e.to_string())?;
            println!("{}", path.display());
        }

        DataCommand::Activity { id } => {
            let view = CommunityView::build(set, cfg.nearby_limit, LeaderProfile::default());
            let message = view.start_project(&id).map_err(|e| e.to_string())?;
            println!("{}", message);
        }
    }
    Ok(())
}

fn print_stats(set: &StationSet) {
    let snapshot = statistics::snapshot(set.all());
    let distribution = statistics::status_distribution(set.all());

    println!("Stations Online      {}", group_thousands(snapshot.online_stations));
    println!("Critical Zones       {}", group_thousands(snapshot.critical_zones));
    println!("Average Water Level  {}m", snapshot.average_water_level);
    println!("States Monitored     {}", snapshot.states_monitored);

    println!();
    for status in StationStatus::ALL {
        println!("{:<20} {:>6}", status.legend(), distribution.count(status));
    }

    println!();
    for summary in statistics::state_summaries(set.all()) {
        println!("{:<16} {:>6} stations  {:>5.1}m", summary.state, summary.stations, summary.level);
    }

    logging::debug(Component::Stats, None, &format!("{:?}", snapshot));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_commands_parse_at_top_level() {
        let cli = Cli::try_parse_from([
            "dwlr", "signup", "--username", "asha", "--email", "a@b.in", "--password", "pw",
        ])
        .expect("signup parses");
        assert!(matches!(
            cli.command,
            Command::Account(AccountCommand::Signup { ref username, .. }) if username == "asha"
        ));

        let cli = Cli::try_parse_from(["dwlr", "whoami"]).expect("whoami parses");
        assert!(matches!(cli.command, Command::Account(AccountCommand::Whoami)));
    }

    #[test]
    fn test_data_commands_parse_with_global_options() {
        let cli = Cli::try_parse_from([
            "dwlr", "export", "--ids", "DWLR001", "DWLR002", "--format", "json", "--seed", "7",
        ])
        .expect("export parses");
        assert_eq!(cli.seed, Some(7));
        match cli.command {
            Command::Data(DataCommand::Export { ids, format, start, .. }) => {
                assert_eq!(ids, ["DWLR001", "DWLR002"]);
                assert_eq!(format, ExportFormat::Json);
                assert!(start.is_none());
            }
            other => panic!("expected export, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["dwlr", "dashboard", "community"]).expect("dashboard parses");
        assert!(matches!(
            cli.command,
            Command::Data(DataCommand::Dashboard { role: Role::CommunityLeader })
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Cli::try_parse_from(["dwlr", "dashboard", "admin"]).is_err());
    }
}
