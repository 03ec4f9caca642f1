//! Message helpers: alerts, rules, wrapped blocks and terminal control.

use std::io::stdout;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, SetTitle};
use log::warn as log_warn;

use crate::config::{RULE_CHAR, RULE_WIDTH, WRAP_BOTTOM_CHAR, WRAP_TOP_CHAR};
use crate::console::Console;
use crate::error::Result;
use crate::prompt::pause;

/// Prints `[!] message`.
pub fn alert<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<()> {
    console.write_line(&format!("[!] {message}"))
}

/// Prints `[WARNING] message`.
pub fn warn<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<()> {
    console.write_line(&format!("[WARNING] {message}"))
}

/// Prints `[ERROR] message`.
pub fn error<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<()> {
    console.write_line(&format!("[ERROR] {message}"))
}

/// Prints `[FATAL] message`, optionally waits for enter, then exits the
/// process with `exit_code` (1 when unset).
pub fn fatal<C: Console + ?Sized>(
    console: &mut C,
    message: &str,
    exit_code: Option<i32>,
    pause_before_exit: bool,
) -> ! {
    // Exiting regardless, so console failures are only logged
    if let Err(e) = console.write_line(&format!("[FATAL] {message}")) {
        log_warn!("Could not print fatal message: {e}");
    }
    if pause_before_exit {
        if let Err(e) = pause(console) {
            log_warn!("Pause before exit failed: {e}");
        }
    }
    std::process::exit(exit_code.unwrap_or(1))
}

/// Prints `[!] message `, runs `f`, then prints `finish` ("DONE." when
/// unset) on the same line.
///
/// If `f` fails its error is returned and `finish` is not printed.
pub fn status<C, T>(
    console: &mut C,
    message: &str,
    finish: Option<&str>,
    f: impl FnOnce(&mut C) -> Result<T>,
) -> Result<T>
where
    C: Console + ?Sized,
{
    console.write(&format!("[!] {message} "))?;
    let result = f(&mut *console)?;
    console.write_line(finish.unwrap_or("DONE."))?;
    Ok(result)
}

fn line_of(c: char, width: usize) -> String {
    std::iter::repeat(c).take(width).collect()
}

/// Prints a horizontal line.
pub fn hrule<C: Console + ?Sized>(
    console: &mut C,
    width: Option<usize>,
    c: Option<char>,
) -> Result<()> {
    console.write_line(&line_of(
        c.unwrap_or(RULE_CHAR),
        width.unwrap_or(RULE_WIDTH),
    ))
}

/// Settings for [`wrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOptions {
    pub header: Option<String>,
    pub width: usize,
    pub top: char,
    pub bottom: char,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            header: None,
            width: RULE_WIDTH,
            top: WRAP_TOP_CHAR,
            bottom: WRAP_BOTTOM_CHAR,
        }
    }
}

impl WrapOptions {
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Uses `c` for both borders.
    #[must_use]
    pub fn border(mut self, c: char) -> Self {
        self.top = c;
        self.bottom = c;
        self
    }
}

/// Top border line: `/` then the border, with ` header ` from column 3.
/// Characters past the width are dropped.
fn wrap_top(options: &WrapOptions) -> String {
    let mut top: Vec<char> = std::iter::once('/')
        .chain(std::iter::repeat(options.top).take(options.width.saturating_sub(1)))
        .collect();

    if let Some(header) = options.header.as_deref().filter(|h| !h.is_empty()) {
        let label = std::iter::once(' ')
            .chain(header.chars())
            .chain(std::iter::once(' '));
        for (slot, c) in top.iter_mut().skip(3).zip(label) {
            *slot = c;
        }
    }

    top.into_iter().collect()
}

/// Prints `body` between a top and a bottom border.
pub fn wrap<C: Console + ?Sized>(console: &mut C, body: &str, options: &WrapOptions) -> Result<()> {
    console.write_line(&wrap_top(options))?;
    console.write_line(body)?;
    console.write_line(&format!(
        "\\{}",
        line_of(options.bottom, options.width.saturating_sub(1))
    ))
}

/// Clears the terminal. Best effort; failures are only logged.
pub fn clear() {
    if let Err(e) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
        log_warn!("Could not clear the terminal: {e}");
    }
}

/// Sets the terminal window title. Best effort; failures are only logged.
pub fn title(text: &str) {
    if let Err(e) = execute!(stdout(), SetTitle(text)) {
        log_warn!("Could not set the terminal title: {e}");
    }
}
