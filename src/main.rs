use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use grant_relief::config::AppConfig;
use grant_relief::database::{establish_connection, get_database_url, setup_database};
use grant_relief::server;
use grant_relief::services::import_service::{ImportService, DEFAULT_GRANTS_FILE};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// YAML file with database, port, cors_origin and default_page_size
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        cors_origin: Option<String>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Load a tab-delimited grants export into the grants table
    ImportGrants {
        /// Defaults to ./data/grants.csv
        file: Option<String>,
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let mut config = AppConfig::load(args.config.as_deref())?;

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database = database;
            }
            if cors_origin.is_some() {
                config.cors_origin = cors_origin;
            }
            info!("Starting server on port {}", config.port);
            server::start_server(&config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                let database = database.unwrap_or(config.database);
                info!("Initializing database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                let database = database.unwrap_or(config.database);
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database, direction).await?;
            }
        },
        Commands::ImportGrants { file, database } => {
            let file = file.unwrap_or_else(|| DEFAULT_GRANTS_FILE.to_string());
            let database = database.unwrap_or(config.database);
            if let Err(err) = import_grants(&file, &database).await {
                error!("Error importing grants: {:#}", err);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn import_grants(file: &str, database: &str) -> Result<()> {
    let db = establish_connection(&get_database_url(Some(database))).await?;
    setup_database(&db).await?;
    ImportService::new(db).import_grants_from_file(file).await?;
    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "handlebars=off,sqlx=warn,{}",
            log_level
        )))
        .without_time()
        .init();
}
