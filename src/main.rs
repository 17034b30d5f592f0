use clap::Parser;

use reladb::cli::{
    self,
    parsers::{CliMode, CliParser},
};

fn main() {
    let arguments = CliParser::parse();

    match arguments.mode {
        Some(CliMode::Server) => cli::run_server(),
        Some(CliMode::Client) | None => cli::run_client(),
    }
}
