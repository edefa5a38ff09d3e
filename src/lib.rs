pub mod cli;
pub mod config;
pub mod history;
pub mod model;
pub mod runtime;
pub mod session;
pub mod slice;
pub mod view;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
