use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chirp_config::{AppConfig, DatabaseConfig};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::error;

mod commands;
use commands::{
    SqlBackend, cmd_bootstrap, cmd_migrate, cmd_serve, cmd_sql, cmd_status, cmd_wait_db,
};

/// chirp: post and list short messages.
#[derive(Parser, Debug)]
#[command(name = "chirp", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Wait for the database, migrate, provision the demo account, then serve HTTP.
    Serve {
        #[command(flatten)]
        config: AppConfig,
    },
    /// Block until the database accepts connections.
    WaitDb {
        #[command(flatten)]
        database: DatabaseConfig,
    },
    /// Wait for the database and apply pending migrations.
    Migrate {
        #[command(flatten)]
        database: DatabaseConfig,
    },
    /// Run the startup sequence without serving.
    Bootstrap {
        #[command(flatten)]
        config: AppConfig,
    },
    /// Show configuration and which migrations are applied.
    Status {
        #[command(flatten)]
        config: AppConfig,
    },
    /// Print the SQL of the embedded migrations.
    Sql {
        #[arg(long, value_enum, default_value_t = SqlBackend::Postgres)]
        backend: SqlBackend,
        /// Read migration plans from this directory instead.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

impl Commands {
    fn debug(&self) -> bool {
        match self {
            Commands::Serve { config }
            | Commands::Bootstrap { config }
            | Commands::Status { config } => config.debug,
            _ => false,
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve { config } => cmd_serve(config),
        Commands::WaitDb { database } => cmd_wait_db(database),
        Commands::Migrate { database } => cmd_migrate(database),
        Commands::Bootstrap { config } => cmd_bootstrap(config),
        Commands::Status { config } => cmd_status(config),
        Commands::Sql { backend, dir } => cmd_sql(backend, dir),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    chirp_server::telemetry::init(command.debug());
    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("fatal error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
