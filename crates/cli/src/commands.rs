//! Running a parsed `qp` command against a console.
//!
//! Prompts, menus and notes go through the console; the final answer is
//! handed back as an [`Outcome`] so the caller can print it on its own
//! stream.

use std::io::Write;

use log::info;
use quick_prompt_core::console::{with_scripted_input, Console};
use quick_prompt_core::error::Result;
use quick_prompt_core::menu::{MainOptions, MenuOptions};
use quick_prompt_core::prompt::{
    ask, ask_captcha, ask_float, ask_int, ask_yesno, AskOptions,
};
use quick_prompt_core::validation::{Formatter, TypeTag};

use crate::cli_args::{Args, AskArgs, Command, MenuArgs};
use crate::entries::build_menu;

/// How a command finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The accepted answer or menu selection
    Answered(String),
    /// A yes/no question was answered "no"
    Declined,
    /// A looping menu was quit; there is no answer
    Finished,
}

impl Outcome {
    /// The text to print for this outcome, if any.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        match self {
            Outcome::Answered(answer) => Some(answer.as_str()),
            Outcome::Declined => Some("no"),
            Outcome::Finished => None,
        }
    }
}

/// Runs `args.command` against `console` and returns the answer.
///
/// Scripted `--answer` values replace the console's input for the duration
/// of the command.
pub fn run<C: Console + ?Sized>(console: &mut C, args: &Args) -> Result<Outcome> {
    if args.answers.is_empty() {
        run_command(console, &args.command)
    } else {
        with_scripted_input(console, args.answers.clone(), |console| {
            run_command(console, &args.command)
        })
    }
}

/// Writes the outcome's answer, alone on one line, to `output`.
pub fn print_answer<W: Write>(output: &mut W, outcome: &Outcome) -> Result<()> {
    if let Some(answer) = outcome.answer() {
        writeln!(output, "{answer}")?;
        output.flush()?;
    }
    Ok(())
}

fn run_command<C: Console + ?Sized>(console: &mut C, command: &Command) -> Result<Outcome> {
    let answer = match command {
        Command::Ask(ask_args) => ask(console, &ask_options(ask_args))?.to_string(),
        Command::Yesno { message, default } => {
            let options = AskOptions::yes_no(*default).message(message.as_str());
            if !ask_yesno(console, &options)? {
                return Ok(Outcome::Declined);
            }
            "yes".to_string()
        }
        Command::Int { message, default } => {
            let mut options = AskOptions::integer().message(message.as_str());
            if let Some(default) = default {
                options = options.default(*default);
            }
            ask_int(console, &options)?.to_string()
        }
        Command::Float { message, default } => {
            let mut options = AskOptions::float().message(message.as_str());
            if let Some(default) = default {
                options = options.default(*default);
            }
            format!("{:?}", ask_float(console, &options)?)
        }
        Command::Menu(menu_args) => return run_menu(console, menu_args),
        Command::Captcha { length } => ask_captcha(console, *length)?,
    };

    Ok(Outcome::Answered(answer))
}

/// Translates `qp ask` flags into prompt options.
pub fn ask_options(args: &AskArgs) -> AskOptions {
    let mut options = AskOptions::new(args.message.as_str())
        .rules(args.valid.iter().map(String::as_str))
        .echo(!args.hidden)
        .blank(args.blank);

    if let Some(answer_type) = args.answer_type {
        options = options.rule(TypeTag::from(answer_type));
    }
    if args.lowercase {
        options = options.format(Formatter::text(|raw| raw.to_lowercase()));
    }
    if let Some(default) = &args.default {
        options = options.default(default.as_str());
    }
    if let Some(notes) = &args.notes {
        options = options.help(notes.as_str());
    }

    options
}

fn run_menu<C: Console + ?Sized>(console: &mut C, args: &MenuArgs) -> Result<Outcome> {
    let mut show = MenuOptions::new().compact(args.compact);
    if let Some(header) = &args.header {
        show = show.header(header.as_str());
    }
    if let Some(message) = &args.message {
        show = show.message(message.as_str());
    }
    if let Some(default) = &args.default {
        show = show.default(default.as_str());
    }
    if let Some(limit) = args.limit {
        show = show.limit(limit);
    }
    if let Some(returns) = args.returns {
        show = show.returns(returns);
    }

    let mut menu = build_menu(&args.entries, &args.items, show)?;

    let mut main_options = MainOptions::new().looping(args.looping);
    if args.no_quit {
        main_options = main_options.without_quit();
    }

    info!("Showing menu with {} entries", menu.entries().len());
    Ok(menu
        .main(console, &main_options)?
        .map_or(Outcome::Finished, Outcome::Answered))
}
