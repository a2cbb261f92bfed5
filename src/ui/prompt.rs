//! Terminal implementations of the `Prompter` port.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use dialoguer::{Confirm, Input};
use krnr::domain::ports::Prompter;

use crate::ui::context::UiContext;
use crate::ui::theme::KrnrTheme;

/// dialoguer prompts, for a real terminal.
pub struct TerminalPrompter {
    theme: KrnrTheme,
}

impl TerminalPrompter {
    pub fn new(ui: &UiContext) -> Self {
        Self {
            theme: KrnrTheme::new(ui.color, ui.unicode),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> io::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(io::Error::other)
    }

    fn ask(&self, message: &str) -> io::Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;
        Ok(answer.trim().to_string())
    }
}

/// Line-based prompts over any reader, for pipes and scripts.
///
/// End of input answers "no" and the empty string.
pub struct LinePrompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    fn read_answer(&self, prompt: &str) -> io::Result<String> {
        {
            let mut out = self.output.borrow_mut();
            write!(out, "{}", prompt)?;
            out.flush()?;
        }
        let mut line = String::new();
        self.input.borrow_mut().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&self, message: &str) -> io::Result<bool> {
        let answer = self.read_answer(&format!("{} [y/N]: ", message))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn ask(&self, message: &str) -> io::Result<String> {
        self.read_answer(&format!("{}: ", message))
    }
}

/// dialoguer on a terminal, plain stdin lines otherwise.
pub fn prompter_for(ui: &UiContext) -> Box<dyn Prompter> {
    if ui.can_prompt() {
        Box::new(TerminalPrompter::new(ui))
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}
