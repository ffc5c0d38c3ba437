use clap::{Parser, Subcommand};

mod db;
mod product;
mod profile;
mod token;

#[derive(Debug, Parser)]
#[command(name = "attar-app", about = "Attar storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Profile(profile::ProfileCommand),
    Product(product::ProductCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Profile(command) => profile::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

/// Connect with default pool settings, mapping failures to a printable message.
pub(crate) async fn connect(database_url: &str) -> Result<attar_app::database::Db, String> {
    attar_app::database::connect(database_url)
        .await
        .map(attar_app::database::Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
