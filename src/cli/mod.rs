pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "margin")]
#[command(about = "Marginalia admin CLI - seeding and account provisioning")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Insert the starter catalog (authors and books)")]
    Seed,

    #[command(about = "Create an administrator account")]
    CreateAdmin {
        #[arg(help = "Username for the new administrator")]
        username: String,
        #[arg(help = "Password (hashed before storage)")]
        password: String,
    },

    #[command(about = "Hash a password for out-of-band provisioning")]
    HashPassword {
        #[arg(help = "Password to hash")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Seed => commands::seed::handle().await,
        Commands::CreateAdmin { username, password } => {
            commands::admin::handle_create(username, password).await
        }
        Commands::HashPassword { password } => commands::admin::handle_hash(password),
    }
}
