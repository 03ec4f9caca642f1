use clap::Parser;
use log::debug;
use quick_prompt_core::console::{StdinInput, Terminal};
use quick_prompt_core::error::Result;
use std::io::{stderr, stdout};
use std::process::ExitCode;

use quick_prompt_cli::cli_args::Args;
use quick_prompt_cli::commands::{print_answer, run, Outcome};

fn execute() -> Result<Outcome> {
    let args = Args::parse();
    debug!("Parsed arguments: {args:?}");

    // The conversation goes to stderr so stdout carries only the answer
    let mut terminal = Terminal::new(stderr(), Box::new(StdinInput));
    let outcome = run(&mut terminal, &args)?;
    print_answer(&mut stdout(), &outcome)?;
    Ok(outcome)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(Outcome::Declined) => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
