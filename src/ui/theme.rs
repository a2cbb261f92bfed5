use crossterm::style::{Color, Stylize};
use dialoguer::theme::Theme;
use std::fmt;

/// Every color the binary prints comes from here.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

/// Glyphs with an ASCII spelling for terminals that cannot draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Error,
    Warning,
    Pointer,
}

impl Icon {
    pub fn glyph(self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Icon::Error, true) => "✗",
            (Icon::Error, false) => "[ERROR]",
            (Icon::Warning, true) => "⚠",
            (Icon::Warning, false) => "[WARN]",
            (Icon::Pointer, true) => "›",
            (Icon::Pointer, false) => ">",
        }
    }
}

/// `text` in `color` when color is enabled, unchanged otherwise.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}

/// Wraps `ColorfulTheme` (or `SimpleTheme` when color is off) and swaps the
/// select pointer for the krnr glyph.
pub struct KrnrTheme {
    unicode: bool,
    color: bool,
    colorful: dialoguer::theme::ColorfulTheme,
    simple: dialoguer::theme::SimpleTheme,
}

impl KrnrTheme {
    pub fn new(color: bool, unicode: bool) -> Self {
        Self {
            unicode,
            color,
            colorful: dialoguer::theme::ColorfulTheme::default(),
            simple: dialoguer::theme::SimpleTheme,
        }
    }

    fn inner(&self) -> &dyn Theme {
        if self.color {
            &self.colorful
        } else {
            &self.simple
        }
    }

    pub fn pointer(&self) -> &'static str {
        Icon::Pointer.glyph(self.unicode)
    }
}

impl Theme for KrnrTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner().format_prompt(f, prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        self.inner().format_error(f, err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        self.inner().format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        self.inner()
            .format_confirm_prompt_selection(f, prompt, selection)
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        self.inner().format_input_prompt(f, prompt, default)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        self.inner().format_input_prompt_selection(f, prompt, sel)
    }

    fn format_select_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner().format_select_prompt(f, prompt)
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        active: bool,
    ) -> fmt::Result {
        if !active {
            return write!(f, "  {}", text);
        }
        let pointer = paint(self.pointer(), colors::INFO, self.color);
        let text = paint(text, colors::INFO, self.color);
        write!(f, "{} {}", pointer, text)
    }
}
