//! Command-line argument parsing.
//!
//! This module defines the `qp` command-line interface using the `clap`
//! crate. Every subcommand asks one question (or shows one menu) on stderr
//! and prints only the answer on stdout, so it can be captured by shell
//! scripts.

use clap::{Parser, Subcommand, ValueEnum};
use quick_prompt_core::menu::ReturnField;
use quick_prompt_core::validation::TypeTag;

/// Command-line arguments for the `qp` tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use quick_prompt_cli::cli_args::Args;
///
/// let args = Args::parse_from(["qp", "yesno", "Continue?"]);
/// assert!(args.answers.is_empty());
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Answer prompts from these values instead of the keyboard.
    ///
    /// Repeat the flag once per answer, before the subcommand; they are
    /// consumed in order.
    #[arg(long = "answer", short = 'a', action = clap::ArgAction::Append)]
    pub answers: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a free-form or restricted question.
    Ask(AskArgs),

    /// Ask a yes/no question. Exits with status 1 on "no".
    Yesno {
        #[arg(default_value = "Proceed?")]
        message: String,

        /// Answer used for a blank line (yes/no, true/false)
        #[arg(long, short = 'd', value_parser = clap::builder::BoolishValueParser::new())]
        default: Option<bool>,
    },

    /// Ask for an integer.
    Int {
        #[arg(default_value = "Enter an integer")]
        message: String,

        #[arg(long, short = 'd', allow_negative_numbers = true)]
        default: Option<i64>,
    },

    /// Ask for a floating point number.
    Float {
        #[arg(default_value = "Enter a float")]
        message: String,

        #[arg(long, short = 'd', allow_negative_numbers = true)]
        default: Option<f64>,
    },

    /// Show a menu and print the selection.
    Menu(MenuArgs),

    /// Ask the user to type back random letters.
    Captcha {
        /// Number of letters
        #[arg(long, short = 'l')]
        length: Option<usize>,
    },
}

/// Type restriction for `qp ask`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerType {
    Int,
    Float,
    Str,
}

impl From<AnswerType> for TypeTag {
    fn from(answer_type: AnswerType) -> Self {
        match answer_type {
            AnswerType::Int => TypeTag::Int,
            AnswerType::Float => TypeTag::Float,
            AnswerType::Str => TypeTag::Str,
        }
    }
}

#[derive(clap::Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct AskArgs {
    #[arg(default_value = "Enter input")]
    pub message: String,

    /// Answer used for a blank line
    #[arg(long, short = 'd')]
    pub default: Option<String>,

    /// An acceptable answer; repeat for several.
    #[arg(long = "valid", short = 'v', action = clap::ArgAction::Append)]
    pub valid: Vec<String>,

    /// Accept any answer of this type.
    #[arg(long = "type", short = 't', value_enum)]
    pub answer_type: Option<AnswerType>,

    /// Lowercase answers before checking them.
    #[arg(long, action)]
    pub lowercase: bool,

    /// Don't echo typed text.
    #[arg(long, action)]
    pub hidden: bool,

    /// Accept a blank answer.
    #[arg(long, short = 'b', action)]
    pub blank: bool,

    /// Extra notes shown when `?` is answered.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct MenuArgs {
    /// An entry in the format name=description; repeat for several.
    #[arg(long = "entry", short = 'e', action = clap::ArgAction::Append)]
    pub entries: Vec<String>,

    /// Entries numbered from 1, after any `--entry` ones.
    #[arg(trailing_var_arg = true)]
    pub items: Vec<String>,

    #[arg(long = "header", short = 'H')]
    pub header: Option<String>,

    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Entry name selected by a blank answer
    #[arg(long, short = 'd')]
    pub default: Option<String>,

    /// Show this many entries at a time.
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Return the selected entry's `name` or `desc`.
    #[arg(long, short = 'r')]
    pub returns: Option<ReturnField>,

    /// Only show the prompt, not the entries.
    #[arg(long, short = 'c', action)]
    pub compact: bool,

    /// Keep showing the menu until quit is selected.
    #[arg(long = "loop", action)]
    pub looping: bool,

    /// Don't add a quit entry.
    #[arg(long, action)]
    pub no_quit: bool,
}
