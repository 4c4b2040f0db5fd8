mod athlete;
mod config_cmd;
mod export;
mod forecast;
mod import;
mod scholarships;
mod stats;

use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::storage::RosterStore;

pub use athlete::{AthleteFields, ListCommand};
pub use export::ExportCommand;
pub use forecast::{ForecastCommand, ForecastView};
pub use import::ImportCommand;
pub use scholarships::ScholarshipsCommand;
pub use stats::StatsCommand;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Track & field roster dashboard with scholarship and recruiting forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "ROSTER_FORECAST_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import athletes from a CSV file
    Import(ImportCommand),

    /// Export the roster to a CSV file
    Export(ExportCommand),

    /// Manage athletes
    #[command(subcommand)]
    Athlete(AthleteSubcommands),

    /// Show the roster overview
    Stats(StatsCommand),

    /// Show scholarship allocation against the limits
    Scholarships(ScholarshipsCommand),

    /// Forecast scholarships, graduation, performance and recruiting
    Forecast(ForecastCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum AthleteSubcommands {
    /// List athletes
    List(ListCommand),

    /// Show athlete details
    Show {
        /// Athlete ID or full name
        who: String,
    },

    /// Add an athlete
    Add {
        /// Full name
        name: String,

        #[command(flatten)]
        fields: AthleteFields,

        /// Save even when the scholarship limit would be exceeded
        #[arg(long)]
        allow_over_limit: bool,
    },

    /// Edit an athlete
    Edit {
        /// Athlete ID or full name
        who: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: AthleteFields,

        /// Save even when the scholarship limit would be exceeded
        #[arg(long)]
        allow_over_limit: bool,
    },

    /// Archive an athlete, keeping the record out of forecasts
    Archive {
        /// Athlete ID or full name
        who: String,
    },

    /// Restore an archived athlete
    Restore {
        /// Athlete ID or full name
        who: String,
    },

    /// Delete an athlete
    Delete {
        /// Athlete ID or full name
        who: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_file = Config::resolve_file(self.config.as_deref())?;
        let config = Config::load_from(&config_file)?;
        crate::ui::init(config.ui.color);

        match self.command {
            Commands::Import(cmd) => cmd.execute(&config).await,
            Commands::Export(cmd) => cmd.execute(&config).await,
            Commands::Athlete(subcmd) => {
                let store = RosterStore::from_config(&config)?;
                match subcmd {
                    AthleteSubcommands::List(cmd) => cmd.execute(&store).await,
                    AthleteSubcommands::Show { who } => {
                        athlete::show_athlete(&store, &config, &who).await
                    }
                    AthleteSubcommands::Add {
                        name,
                        fields,
                        allow_over_limit,
                    } => athlete::add_athlete(&store, &config, name, fields, allow_over_limit).await,
                    AthleteSubcommands::Edit {
                        who,
                        name,
                        fields,
                        allow_over_limit,
                    } => {
                        athlete::edit_athlete(&store, &config, &who, name, fields, allow_over_limit)
                            .await
                    }
                    AthleteSubcommands::Archive { who } => {
                        athlete::archive_athlete(&store, &who).await
                    }
                    AthleteSubcommands::Restore { who } => {
                        athlete::restore_athlete(&store, &config, &who).await
                    }
                    AthleteSubcommands::Delete { who, force } => {
                        athlete::delete_athlete(&store, &who, force).await
                    }
                }
            }
            Commands::Stats(cmd) => cmd.execute(&config).await,
            Commands::Scholarships(cmd) => cmd.execute(&config).await,
            Commands::Forecast(cmd) => cmd.execute(&config).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&config_file).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(&config_file).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(&config_file, force).await
                }
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Season used when no year is given on the command line
pub(crate) fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
