//! terradex CLI: query provider schemas from the shell.
//!
//! Prints the navigation tree, renders item details as Markdown and lists
//! field anchors, using the same core as the TUI.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
