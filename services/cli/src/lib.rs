mod cli;
mod commands;

use contact_clean::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
