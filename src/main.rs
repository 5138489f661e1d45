//! Unified recauth CLI.
//!
//! - `recauth serve` - Run the HTTP service
//! - `recauth init-db` - Create the database schema
//! - `recauth hash` - Print the password digest for a roster entry
//!
//! The server can also be run as the standalone `recauth-server` binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use recauth_auth::sha224_hex;
use recauth_store::{ConnectionManager, StoreConfig};

/// recauth unified CLI.
#[derive(Parser)]
#[command(
    name = "recauth",
    version,
    about = "Record authorization service",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service.
    #[command(name = "serve", alias = "server")]
    Serve(Box<recauth_server::ServerArgs>),

    /// Initialize database schema.
    #[command(name = "init-db")]
    InitDb {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,
    },

    /// Print the SHA-224 digest of a password for `password_hash`.
    Hash {
        password: String,
    },
}

async fn init_db(url: String) -> Result<(), Box<dyn std::error::Error>> {
    let db = ConnectionManager::new(
        StoreConfig::new(url)
            .max_connections(1)
            .max_connect_retries(1)
            .init_schema(true),
    )?;
    db.init().await?;
    db.shutdown().await?;

    println!("Database schema initialized successfully.");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => recauth_server::cli::run(*args).await,
        Commands::InitDb { database } => init_db(database).await,
        Commands::Hash { password } => {
            println!("{}", sha224_hex(&password));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
