// ABOUTME: Command-line entry point for installing a records store and inspecting it
// ABOUTME: Parses arguments, sets up logging and hands off to the library

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sciproj::{seed, ConnectionConfig, InstallOptions, Installer};

#[derive(Debug, Parser)]
#[command(name = "sciproj", version, about = "Scientific project records store")]
struct Cli {
    /// YAML file describing the database connection
    #[arg(long, short)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the schema, seed data and the administrator account
    Install {
        #[arg(long, default_value = seed::DEFAULT_ADMINISTRATOR_PASSWORD)]
        admin_password: String,
        #[arg(long)]
        admin_email: Option<String>,
        /// Drop all existing tables first
        #[arg(long)]
        overwrite: bool,
    },
    /// Print the equipment category forest as JSON
    Categories {
        #[arg(long, default_value = seed::ADMINISTRATOR_LOGIN)]
        login: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ConnectionConfig::from_file(&cli.config)?;

    match cli.command {
        Command::Install {
            admin_password,
            admin_email,
            overwrite,
        } => {
            let installer = Installer::new(InstallOptions {
                administrator_password: admin_password,
                administrator_email: admin_email,
                overwrite,
            });
            installer.install(&config).await?.close().await?;
        }
        Command::Categories { login, password } => {
            let mut client = sciproj::Client::connect(&config).await?;
            client.sign_in(&login, &password).await?;
            let forest = client
                .equipment
                .get_equipment_categories_tree(&client.context, None)
                .await;
            client.close().await?;
            println!("{}", serde_json::to_string_pretty(&forest?)?);
        }
    }

    Ok(())
}
