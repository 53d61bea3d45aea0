use std::io::IsTerminal;

use crate::model::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Cyan,
    Bold,
    Dim,
}

impl Tone {
    fn code(&self) -> &'static str {
        match self {
            Tone::Green => "32",
            Tone::Yellow => "33",
            Tone::Red => "31",
            Tone::Cyan => "36",
            Tone::Bold => "1",
            Tone::Dim => "2",
        }
    }
}

/// Green for likely, yellow for uncertain, red for unlikely.
pub fn verdict_tone(verdict: Verdict) -> Tone {
    match verdict {
        Verdict::Likely => Tone::Green,
        Verdict::Uncertain => Tone::Yellow,
        Verdict::Unlikely => Tone::Red,
    }
}

/// Applies ANSI colour when enabled; a no-op otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colour unless `--no-color`, `NO_COLOR`, or stdout is not a terminal.
    pub fn detect(no_color_flag: bool) -> Self {
        let env_off = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color_flag && !env_off && std::io::stdout().is_terminal())
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", tone.code(), text)
        } else {
            text.to_string()
        }
    }
}
