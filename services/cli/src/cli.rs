use crate::commands::{run_clean, run_split, CleanArgs, SplitArgs};
use clap::{Parser, Subcommand};
use contact_clean::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "contact-clean",
    about = "Clean pharmacy contact exports and flag rows needing review before CRM import",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean a contact export and write the flagged CSV (default command)
    Clean(CleanArgs),
    /// Show how interlocutor strings are split into civility, first and last name
    Split(SplitArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Clean(CleanArgs::default()));

    match command {
        Command::Clean(args) => run_clean(args),
        Command::Split(args) => run_split(args),
    }
}
