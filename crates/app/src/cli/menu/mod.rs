use clap::{Args, Subcommand};

mod import;

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// Load menu items from a YAML file
    Import(import::ImportMenuArgs),
}

pub(crate) async fn run(command: MenuCommand) -> Result<(), String> {
    match command.command {
        MenuSubcommand::Import(args) => import::run(args).await,
    }
}
