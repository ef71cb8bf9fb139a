//! Terminal output and typed events
//!
//! Front ends render `LogLine`s and turn typed lines into `UserEvent`s.

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// 24-bit text color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors used by the chat
pub mod palette {
    use super::Color;

    pub const SYSTEM: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const AGENT: Color = Color::rgb(0x00, 0x80, 0x5a);
    pub const NARRATION: Color = Color::rgb(0x40, 0x40, 0x40);
    pub const ALERT: Color = Color::rgb(0xff, 0x30, 0x00);
    pub const WARNING: Color = Color::rgb(0xff, 0x80, 0x00);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub align: Align,
    pub color: Color,
}

/// Anything that can display chat lines
pub trait Terminal {
    fn log(&mut self, text: &str, align: Align, color: Color);
}

/// In-memory scrollback, oldest line first
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<LogLine>,
    capacity: Option<usize>,
    logged: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` lines, dropping the oldest
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Lines logged over the whole session, including dropped ones
    pub fn logged(&self) -> usize {
        self.logged
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl Terminal for Transcript {
    fn log(&mut self, text: &str, align: Align, color: Color) {
        self.lines.push(LogLine {
            text: text.to_string(),
            align,
            color,
        });
        self.logged += 1;
        if let Some(capacity) = self.capacity {
            if self.lines.len() > capacity {
                let excess = self.lines.len() - capacity;
                self.lines.drain(..excess);
            }
        }
    }
}

/// Prints colored, aligned lines to stdout
#[derive(Debug, Clone)]
pub struct ConsoleTerminal {
    width: usize,
}

impl ConsoleTerminal {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render(&self, text: &str, align: Align) -> String {
        let len = text.chars().count();
        let pad = self.width.saturating_sub(len);
        match align {
            Align::Left => text.to_string(),
            Align::Center => format!("{}{}", " ".repeat(pad / 2), text),
            Align::Right => format!("{}{}", " ".repeat(pad), text),
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn log(&mut self, text: &str, align: Align, color: Color) {
        println!(
            "{}",
            self.render(text, align).truecolor(color.r, color.g, color.b)
        );
    }
}

/// A typed line, already split into free text or a `/command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    Input(String),
    Command(String),
}

impl UserEvent {
    /// Blank lines produce no event
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }
        match line.trim_start().strip_prefix('/') {
            Some(command) => Some(Self::Command(command.trim().to_string())),
            None => Some(Self::Input(line.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_capacity() {
        let mut transcript = Transcript::with_capacity(2);
        transcript.log("one", Align::Left, palette::SYSTEM);
        transcript.log("two", Align::Center, palette::SYSTEM);
        transcript.log("three", Align::Right, palette::SYSTEM);
        assert_eq!(transcript.texts(), ["two", "three"]);
        assert_eq!(transcript.logged(), 3);
        assert_eq!(transcript.lines()[1].align, Align::Right);
    }

    #[test]
    fn test_console_alignment() {
        let console = ConsoleTerminal::new(10);
        assert_eq!(console.render("abcd", Align::Left), "abcd");
        assert_eq!(console.render("abcd", Align::Center), "   abcd");
        assert_eq!(console.render("abcd", Align::Right), "      abcd");
        assert_eq!(console.render("a very long line", Align::Right), "a very long line");
    }

    #[test]
    fn test_user_event_parse() {
        assert_eq!(
            UserEvent::parse("/relocate engine room\n"),
            Some(UserEvent::Command("relocate engine room".to_string()))
        );
        assert_eq!(
            UserEvent::parse("You are scary"),
            Some(UserEvent::Input("You are scary".to_string()))
        );
        assert_eq!(UserEvent::parse("   "), None);
        assert_eq!(UserEvent::parse(""), None);
    }
}
