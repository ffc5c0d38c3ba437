use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    Create(create::CreateProfileArgs),
}

pub(crate) async fn run(command: ProfileCommand) -> Result<(), String> {
    match command.command {
        ProfileSubcommand::Create(args) => create::run(args).await,
    }
}
