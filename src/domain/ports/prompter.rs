//! Prompter port
//!
//! Questions a use case may need to ask the user mid-flow. The CLI answers
//! them from the terminal; tests answer from a script.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

pub trait Prompter {
    /// Yes/no question; anything but yes is no.
    fn confirm(&self, message: &str) -> io::Result<bool>;

    /// Free-text answer, trimmed.
    fn ask(&self, message: &str) -> io::Result<String>;
}

/// Answers every question with a fixed response, for non-interactive runs.
#[derive(Debug, Clone, Default)]
pub struct NoPrompt {
    pub assume_yes: bool,
}

impl Prompter for NoPrompt {
    fn confirm(&self, _message: &str) -> io::Result<bool> {
        Ok(self.assume_yes)
    }

    fn ask(&self, _message: &str) -> io::Result<String> {
        Ok(String::new())
    }
}

/// Replays queued answers and records the questions asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions seen so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    fn next(&self, message: &str) -> String {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> io::Result<bool> {
        let answer = self.next(message).trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    fn ask(&self, message: &str) -> io::Result<String> {
        Ok(self.next(message).trim().to_string())
    }
}
