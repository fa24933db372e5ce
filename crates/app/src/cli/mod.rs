use clap::{Parser, Subcommand};

mod db;
mod menu;

#[derive(Debug, Parser)]
#[command(name = "cafe-app", about = "Cafe administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Menu(menu::MenuCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Menu(command) => menu::run(command).await,
        }
    }
}
