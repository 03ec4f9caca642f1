//! Asking the user for validated answers.
//!
//! [`ask`] is the general read-validate-retry loop. The `ask_*` helpers are
//! thin wrappers over preset [`AskOptions`].
//!
//! Answering `?` at any prompt prints the acceptable answers instead of
//! being validated. Invalid answers are silently asked for again; there is
//! no retry limit.

use itertools::Itertools;
use log::debug;
use rand::Rng;

use crate::config::{
    DEFAULT_CAPTCHA_LENGTH, HELP_REQUEST, INPUT_MARKER, PAUSE_MESSAGE, PROMPT_PREFIX,
};
use crate::console::Console;
use crate::error::{Error, Result};
use crate::validation::{format_input, Formatter, Rule, RuleSet, TypeTag};
use crate::value::Value;

/// Answers [`ask_yesno`] treats as yes
pub const YES_ANSWERS: [&str; 4] = ["y", "yes", "Y", "YES"];
/// Answers [`ask_yesno`] treats as no
pub const NO_ANSWERS: [&str; 4] = ["n", "no", "N", "NO"];

/// Settings for a single [`ask`] call.
///
/// The short method names (`msg`, `fmt`, `dft`, `vld`, `shw`, `blk`, `hlp`)
/// are aliases of the descriptive ones.
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Text shown after the prompt prefix
    pub message: String,
    /// Applied to the typed text before validation
    pub format: Option<Formatter>,
    /// Returned for a blank answer; disables `blank`
    pub default: Option<Value>,
    /// Acceptance rules; empty accepts any non-blank answer
    pub rules: Vec<Rule>,
    /// Whether typed text is shown
    pub echo: bool,
    /// Whether a blank answer is accepted as `""`
    pub blank: bool,
    /// Extra notes printed with the help listing
    pub help: Option<String>,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            message: "Enter input".to_string(),
            format: None,
            default: None,
            rules: Vec::new(),
            echo: true,
            blank: false,
            help: None,
        }
    }
}

impl AskOptions {
    pub fn new(message: impl Into<String>) -> Self {
        <Self as Default>::default().message(message)
    }

    /// Preset for integers: int formatter and a single `<int>` rule.
    #[must_use]
    pub fn integer() -> Self {
        Self::new("Enter an integer")
            .format(Formatter::int())
            .rule(TypeTag::Int)
    }

    /// Preset for floats: float formatter and a single `<float>` rule.
    #[must_use]
    pub fn float() -> Self {
        Self::new("Enter a float")
            .format(Formatter::float())
            .rule(TypeTag::Float)
    }

    /// Preset for free text; blank answers are allowed.
    #[must_use]
    pub fn string() -> Self {
        Self::new("Enter a string").rule(TypeTag::Str).blank(true)
    }

    /// Preset for yes/no questions.
    #[must_use]
    pub fn yes_no(default: Option<bool>) -> Self {
        let options = Self::new("Proceed?")
            .rules(YES_ANSWERS.iter().chain(NO_ANSWERS.iter()).map(|a| Rule::from(*a)));

        match default {
            Some(true) => options.default(YES_ANSWERS[0]),
            Some(false) => options.default(NO_ANSWERS[0]),
            None => options,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn format(mut self, formatter: Formatter) -> Self {
        self.format = Some(formatter);
        self
    }

    #[must_use]
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Appends one rule.
    #[must_use]
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Replaces all rules.
    #[must_use]
    pub fn rules<I, R>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        self.rules = rules.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Hides typed text, for passwords and the like.
    #[must_use]
    pub fn hidden(self) -> Self {
        self.echo(false)
    }

    #[must_use]
    pub fn blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn msg(self, message: impl Into<String>) -> Self {
        self.message(message)
    }

    #[must_use]
    pub fn fmt(self, formatter: Formatter) -> Self {
        self.format(formatter)
    }

    #[must_use]
    pub fn dft(self, default: impl Into<Value>) -> Self {
        self.default(default)
    }

    #[must_use]
    pub fn vld<I, R>(self, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        self.rules(rules)
    }

    #[must_use]
    pub fn shw(self, echo: bool) -> Self {
        self.echo(echo)
    }

    #[must_use]
    pub fn blk(self, blank: bool) -> Self {
        self.blank(blank)
    }

    #[must_use]
    pub fn hlp(self, help: impl Into<String>) -> Self {
        self.help(help)
    }
}

/// Prompt text: prefix, message, optional `[default]`, input marker.
#[must_use]
pub fn render_prompt(message: &str, default: Option<&Value>) -> String {
    match default {
        Some(default) => format!("{PROMPT_PREFIX}{message} [{default}]{INPUT_MARKER}"),
        None => format!("{PROMPT_PREFIX}{message}{INPUT_MARKER}"),
    }
}

fn print_help<C: Console + ?Sized>(
    console: &mut C,
    rules: &RuleSet,
    allow_blank: bool,
    help: Option<&str>,
) -> Result<()> {
    let hints = rules.hints(allow_blank);
    if !hints.is_empty() {
        console.write_line(&format!("[HELP] Valid input: {}", hints.iter().join(" | ")))?;
    }

    if let Some(help) = help.filter(|h| !h.is_empty()) {
        console.write_line(&format!("[HELP] Extra notes: {help}"))?;
    }

    if allow_blank {
        console.write_line("[HELP] Input may be blank.")?;
    }

    Ok(())
}

/// Prompts until an acceptable answer is given and returns it.
///
/// # Errors
///
/// Only console failures are returned, including [`Error::EndOfInput`] when
/// the input runs out before an acceptable answer arrives.
pub fn ask<C: Console + ?Sized>(console: &mut C, options: &AskOptions) -> Result<Value> {
    let formatter = options.format.as_ref();
    let mut rules = RuleSet::new(options.rules.clone(), formatter);
    let mut allow_blank = options.blank;

    // A default is formatted like any answer, and a blank line resolves to it
    let default = options.default.as_ref().map(|default| match formatter {
        Some(formatter) => formatter
            .apply(&default.to_string())
            .unwrap_or_else(|_| default.clone()),
        None => default.clone(),
    });

    if let Some(default) = &default {
        rules.push(Rule::Literal(default.clone()), formatter);
        allow_blank = false;
    }

    let prompt = render_prompt(&options.message, default.as_ref());

    loop {
        let line = if options.echo {
            console.read_line(&prompt)?
        } else {
            console.read_line_hidden(&prompt)?
        };

        if line == HELP_REQUEST {
            print_help(console, &rules, allow_blank, options.help.as_deref())?;
            continue;
        }

        if line.is_empty() {
            if let Some(default) = &default {
                return Ok(default.clone());
            }

            if allow_blank {
                return Ok(Value::Str(line));
            }

            if !rules.contains_blank() {
                debug!("Blank answer rejected for `{}`", options.message);
                continue;
            }
        }

        match format_input(formatter, &line).and_then(|candidate| rules.accept(candidate)) {
            Ok(value) => return Ok(value),
            Err(reason) => debug!("Answer rejected for `{}`: {reason}", options.message),
        }
    }
}

/// Asks a yes/no question; `true` means yes.
pub fn ask_yesno<C: Console + ?Sized>(console: &mut C, options: &AskOptions) -> Result<bool> {
    let answer = ask(console, options)?;
    Ok(answer
        .as_str()
        .is_some_and(|answer| YES_ANSWERS.contains(&answer)))
}

/// Asks for an integer.
pub fn ask_int<C: Console + ?Sized>(console: &mut C, options: &AskOptions) -> Result<i64> {
    let answer = ask(console, options)?;
    TypeTag::Int
        .coerce(&answer)
        .and_then(|value| value.as_int())
        .ok_or_else(|| Error::unexpected_answer("integer", &answer))
}

/// Asks for a float.
pub fn ask_float<C: Console + ?Sized>(console: &mut C, options: &AskOptions) -> Result<f64> {
    let answer = ask(console, options)?;
    TypeTag::Float
        .coerce(&answer)
        .and_then(|value| value.as_float())
        .ok_or_else(|| Error::unexpected_answer("float", &answer))
}

/// Asks for free text.
pub fn ask_str<C: Console + ?Sized>(console: &mut C, options: &AskOptions) -> Result<String> {
    Ok(ask(console, options)?.to_string())
}

/// Asks the user to type back a random lowercase string, in either case.
pub fn ask_captcha<C: Console + ?Sized>(console: &mut C, length: Option<usize>) -> Result<String> {
    let mut rng = rand::rng();
    let captcha: String = (0..length.unwrap_or(DEFAULT_CAPTCHA_LENGTH))
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect();

    let options = AskOptions::string()
        .message(format!("Enter the following letters, \"{captcha}\""))
        .rules([captcha.clone(), captcha.to_uppercase()])
        .blank(false);

    ask_str(console, &options)
}

/// Waits for the user to press enter.
pub fn pause<C: Console + ?Sized>(console: &mut C) -> Result<()> {
    console.read_line_hidden(PAUSE_MESSAGE)?;
    Ok(())
}
