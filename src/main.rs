//! krnr CLI - a global registry of named terminal workflows
//!
//! Usage: krnr <COMMAND>
//!
//! Commands:
//!   save     Save a named command set
//!   run      Run a command set
//!   list     List saved command sets
//!   history  Show the version history of a set
//!   export   Export the database or a single set

use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if cli.whoami {
        println!("Hello there, you found something interesting, isn't it?");
        println!("I'm @VoxDroid - https://github.com/VoxDroid");
        return;
    }

    let json = cli.json;
    if let Err(err) = commands::dispatch(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}
